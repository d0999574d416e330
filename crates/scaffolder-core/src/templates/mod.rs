//! Project templates
//!
//! This module provides:
//! - The built-in blueprint (generator, dependencies, directory and file overlay)
//! - The materializer that writes an overlay onto disk

pub mod catalog;
pub mod materializer;

pub use catalog::{react_ts, Blueprint, FileTemplate, Generator};
pub use materializer::{create_directories, write_files};
