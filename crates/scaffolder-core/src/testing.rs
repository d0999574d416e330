//! Deterministic fakes for the prompt, process and report seams

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::prompt::Prompter;
use crate::report::Reporter;
use crate::runtime::{CommandSpec, ProcessRunner};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Clone)]
pub struct TestProduct;

impl ProductConfig for TestProduct {
    fn display_name(&self) -> &'static str {
        "Test"
    }

    fn default_project_name(&self) -> &'static str {
        "test-app"
    }

    fn npm_env(&self) -> &'static str {
        "TEST_NPM"
    }

    fn generator_version_env(&self) -> &'static str {
        "TEST_VITE_VERSION"
    }

    fn output_env(&self) -> &'static str {
        "TEST_OUTPUT"
    }

    fn next_steps(&self, project_name: &str) -> Vec<String> {
        vec![format!("cd {}", project_name)]
    }
}

/// Answers every prompt with a fixed value, or fails with a fixed error kind
pub struct ScriptedPrompter {
    answer: Result<String, io::ErrorKind>,
    asked: RefCell<Vec<(String, String)>>,
}

impl ScriptedPrompter {
    /// `None` behaves like the operator cancelling the prompt
    pub fn new(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_string).ok_or(io::ErrorKind::Interrupted),
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            answer: Err(kind),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// `(message, default)` pairs seen so far
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, message: &str, default: &str) -> io::Result<String> {
        self.asked
            .borrow_mut()
            .push((message.to_string(), default.to_string()));
        self.answer
            .clone()
            .map_err(|kind| io::Error::new(kind, "scripted prompt failure"))
    }
}

type SuccessHook = Box<dyn Fn(usize, &CommandSpec) + Send + Sync>;

/// Records every command and exits with scripted statuses
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failures: HashMap<usize, i32>,
    missing: Vec<String>,
    on_success: Option<SuccessHook>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `index`-th call (0-based) exit with `code`
    pub fn fail_call(mut self, index: usize, code: i32) -> Self {
        self.failures.insert(index, code);
        self
    }

    /// Report `program` as absent from PATH
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Run `hook` after each successful call
    pub fn on_success<F>(mut self, hook: F) -> Self
    where
        F: Fn(usize, &CommandSpec) + Send + Sync + 'static,
    {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<(), ScaffoldError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(spec.clone());
            calls.len() - 1
        };

        if let Some(code) = self.failures.get(&index) {
            return Err(ScaffoldError::CommandFailed {
                command: spec.to_string(),
                code: Some(*code),
            });
        }

        if let Some(hook) = &self.on_success {
            hook(index, spec);
        }
        Ok(())
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.missing.iter().any(|m| m == program) {
            None
        } else {
            Some(PathBuf::from(program))
        }
    }
}

/// Hook that lays down a minimal generator scaffold on the first call
pub fn scaffold_like_generator(name: &'static str) -> impl Fn(usize, &CommandSpec) + Send + Sync {
    move |index, spec| {
        if index == 0 {
            let root = spec.cwd.join(name);
            std::fs::create_dir_all(root.join("src")).unwrap();
            std::fs::write(root.join("package.json"), "{}").unwrap();
            std::fs::write(root.join("src/main.tsx"), "// generator entry").unwrap();
        }
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}
