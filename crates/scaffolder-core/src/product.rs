//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to give the scaffolder its identity,
//! the environment variables it reads and the closing instructions it prints.

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Suggested answer for the project name prompt
    fn default_project_name(&self) -> &'static str;

    /// Environment variable overriding the npm executable
    fn npm_env(&self) -> &'static str;

    /// Environment variable overriding the pinned generator version
    fn generator_version_env(&self) -> &'static str;

    /// Environment variable selecting how child output is streamed
    fn output_env(&self) -> &'static str;

    /// Instructions printed after a successful run
    fn next_steps(&self, project_name: &str) -> Vec<String>;
}
