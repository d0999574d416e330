//! Scaffolder Core - Shared library for the React + TypeScript scaffolding CLI
//!
//! This library provisions a new front-end project: it runs the pinned
//! project generator, installs a fixed dependency set, then writes a
//! directory and file overlay on top of the generated project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - External process runner, template catalogue,
//!   filesystem materializer
//! - **Layer 2: Workflow Orchestration** - `ProjectBuilder`, which sequences the
//!   stages behind the `Prompter`, `ProcessRunner` and `Reporter` seams
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{templates, Capabilities, ProjectBuilder, Settings, SystemRunner};
//!
//! let settings = Settings::from_env(&MyConfig)?;
//! let builder = ProjectBuilder::new(
//!     templates::react_ts(),
//!     &settings,
//!     std::env::current_dir()?,
//!     Capabilities { prompter: &my_prompter, runner: &SystemRunner, reporter: &my_reporter },
//! );
//! let outcome = builder.run().await;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod product;
pub mod prompt;
pub mod report;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use builder::{Capabilities, ProjectBuilder, ProjectName, RunOutcome, ScaffoldSummary, Stage};
pub use config::Settings;
pub use error::ScaffoldError;
pub use product::ProductConfig;
pub use prompt::Prompter;
pub use report::Reporter;
pub use runtime::{CommandSpec, OutputMode, ProcessRunner, SystemRunner};
pub use templates::{Blueprint, FileTemplate};

#[cfg(feature = "tui")]
pub use tui::run;
