//! Status lines shown to the operator while a scaffold runs

/// Sink for user-visible progress messages
pub trait Reporter {
    /// A stage is starting
    fn step(&self, message: &str);

    fn info(&self, message: &str);

    fn success(&self, message: &str);

    fn error(&self, message: &str);
}
