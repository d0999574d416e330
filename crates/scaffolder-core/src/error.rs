//! Error types shared by every scaffolding stage

use std::io;
use std::path::PathBuf;

/// Everything that can stop a scaffold run
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("failed to read project name: {0}")]
    Prompt(#[source] io::Error),

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("target {} cannot be used as a project directory: {source}", .path.display())]
    TargetUnusable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` was not found on PATH")]
    ToolNotFound { program: String },

    #[error("target directory {} already exists and is not empty", .path.display())]
    TargetNotEmpty { path: PathBuf },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write file {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidSetting {
        name: String,
        value: String,
        reason: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}
