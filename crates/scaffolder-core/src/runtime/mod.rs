//! External process execution
//!
//! This module provides:
//! - `CommandSpec`, a description of one external invocation
//! - The `ProcessRunner` capability and its real implementation, `SystemRunner`

pub mod process;

pub use process::{child_in_flight, CommandSpec, OutputMode, ProcessRunner, SystemRunner};
