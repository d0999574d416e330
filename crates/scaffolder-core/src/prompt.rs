//! Operator input

use std::io;

/// Capability to ask the operator for a line of text
pub trait Prompter {
    /// Show `message` with `default` pre-filled.
    ///
    /// Returns the submitted text: `default` when accepted unchanged, an
    /// empty string when the operator cleared the field.
    fn text(&self, message: &str, default: &str) -> io::Result<String>;
}
