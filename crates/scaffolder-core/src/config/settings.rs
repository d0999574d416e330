//! Environment-driven settings
//!
//! Every value has a built-in default; the product's environment variables
//! override them. Invalid overrides are rejected before anything runs.

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::runtime::OutputMode;
use semver::VersionReq;

/// npm executable name for this platform
#[cfg(windows)]
const DEFAULT_NPM: &str = "npm.cmd";
#[cfg(not(windows))]
const DEFAULT_NPM: &str = "npm";

/// Pinned major version of create-vite
pub const DEFAULT_GENERATOR_VERSION: &str = "6";

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// npm executable used for both the generator and the installer
    pub npm: String,
    /// Version tag appended to the generator package (`vite@<tag>`)
    pub generator_version: String,
    pub output: OutputMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            npm: DEFAULT_NPM.to_string(),
            generator_version: DEFAULT_GENERATOR_VERSION.to_string(),
            output: OutputMode::Inherit,
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn from_env<C: ProductConfig>(config: &C) -> Result<Self, ScaffoldError> {
        Self::from_lookup(config, |key| std::env::var(key).ok())
    }

    /// Resolve settings using `lookup` for environment access
    pub fn from_lookup<C, F>(config: &C, lookup: F) -> Result<Self, ScaffoldError>
    where
        C: ProductConfig,
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(npm) = non_empty(config.npm_env()) {
            settings.npm = npm.trim().to_string();
        }

        if let Some(version) = non_empty(config.generator_version_env()) {
            let version = version.trim();
            VersionReq::parse(version).map_err(|e| ScaffoldError::InvalidSetting {
                name: config.generator_version_env().to_string(),
                value: version.to_string(),
                reason: e.to_string(),
            })?;
            settings.generator_version = version.to_string();
        }

        if let Some(output) = non_empty(config.output_env()) {
            settings.output =
                OutputMode::parse(&output).ok_or_else(|| ScaffoldError::InvalidSetting {
                    name: config.output_env().to_string(),
                    value: output.clone(),
                    reason: "expected 'inherit' or 'prefixed'".to_string(),
                })?;
        }

        Ok(settings)
    }
}
