//! External command execution
//!
//! Commands run one at a time and are awaited to completion. The child's
//! output reaches the operator's terminal either untouched (`Inherit`) or
//! line by line with indentation (`Prefixed`). Stdin is always inherited so
//! interactive tools keep working.

use crate::error::ScaffoldError;
use async_trait::async_trait;
use colored::Colorize;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, ChildStdout, Command as TokioCommand};

static CHILD_IN_FLIGHT: AtomicBool = AtomicBool::new(false);

/// Whether a child process started by [`SystemRunner`] is currently running.
///
/// Signal handlers use this to let an interrupt terminate the child (and
/// surface as that stage's failure) instead of killing the whole tool.
pub fn child_in_flight() -> bool {
    CHILD_IN_FLIGHT.load(Ordering::SeqCst)
}

struct InFlightGuard;

impl InFlightGuard {
    fn enter() -> Self {
        CHILD_IN_FLIGHT.store(true, Ordering::SeqCst);
        Self
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        CHILD_IN_FLIGHT.store(false, Ordering::SeqCst);
    }
}

/// How a child's stdout/stderr reach the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Inherit,
    Prefixed,
}

impl OutputMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inherit" => Some(OutputMode::Inherit),
            "prefixed" => Some(OutputMode::Prefixed),
            _ => None,
        }
    }
}

/// One external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory of the child
    pub cwd: PathBuf,
    pub output: OutputMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            output: OutputMode::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Capability to run external commands
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion. A nonzero exit is an error.
    async fn run(&self, spec: &CommandSpec) -> Result<(), ScaffoldError>;

    /// Resolve a program name against PATH
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<(), ScaffoldError> {
        let mut command = TokioCommand::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::inherit());

        let _guard = InFlightGuard::enter();

        let status = match spec.output {
            OutputMode::Inherit => {
                command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
                command
                    .status()
                    .await
                    .map_err(|source| spawn_error(spec, source))?
            }
            OutputMode::Prefixed => run_prefixed(spec, command).await?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::CommandFailed {
                command: spec.to_string(),
                code: status.code(),
            })
        }
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

fn spawn_error(spec: &CommandSpec, source: std::io::Error) -> ScaffoldError {
    ScaffoldError::Spawn {
        command: spec.to_string(),
        source,
    }
}

async fn run_prefixed(
    spec: &CommandSpec,
    mut command: TokioCommand,
) -> Result<ExitStatus, ScaffoldError> {
    command.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| spawn_error(spec, source))?;

    if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
        stream_output(stdout, stderr).await;
    }

    child.wait().await.map_err(|source| spawn_error(spec, source))
}

/// Forward both pipes until each reaches EOF
///
/// Lines are split on raw bytes so output that is not valid UTF-8 is still
/// drained and shown lossily instead of stalling the child on a full pipe.
async fn stream_output(stdout: ChildStdout, stderr: ChildStderr) {
    let mut stdout_reader = BufReader::new(stdout);
    let mut stderr_reader = BufReader::new(stderr);
    // read_until keeps partial lines here when the other branch wins
    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            read = stdout_reader.read_until(b'\n', &mut stdout_buf), if stdout_open => {
                match read {
                    Ok(0) => stdout_open = false,
                    Ok(_) => {
                        println!("  {}", decode_line(&stdout_buf));
                        stdout_buf.clear();
                    }
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                }
            }
            read = stderr_reader.read_until(b'\n', &mut stderr_buf), if stderr_open => {
                match read {
                    Ok(0) => stderr_open = false,
                    Ok(_) => {
                        eprintln!("  {}", decode_line(&stderr_buf).yellow());
                        stderr_buf.clear();
                    }
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                }
            }
        }
    }
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_display_joins_program_and_args() {
        let spec = CommandSpec::new("npm", "/tmp")
            .arg("install")
            .args(["-D", "@types/node"]);
        assert_eq!(spec.to_string(), "npm install -D @types/node");
    }

    #[test]
    fn test_parse_output_mode() {
        assert_eq!(OutputMode::parse("inherit"), Some(OutputMode::Inherit));
        assert_eq!(OutputMode::parse(" Prefixed "), Some(OutputMode::Prefixed));
        assert_eq!(OutputMode::parse("quiet"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("sh", dir.path()).args(["-c", "true"]);

        SystemRunner.run(&spec).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_reports_status() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("sh", dir.path()).args(["-c", "exit 3"]);

        let err = SystemRunner.run(&spec).await.unwrap_err();
        match err {
            ScaffoldError::CommandFailed { command, code } => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_requested_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();
        let spec = CommandSpec::new("sh", dir.path()).args(["-c", "test -f marker"]);

        SystemRunner.run(&spec).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_prefixed_output_waits_for_exit() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("sh", dir.path())
            .args(["-c", "echo out; echo err >&2; exit 2"])
            .output(OutputMode::Prefixed);

        let err = SystemRunner.run(&spec).await.unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::CommandFailed { code: Some(2), .. }
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_prefixed_output_survives_invalid_utf8() {
        let dir = tempfile::TempDir::new().unwrap();
        // One undecodable line, then far more than a pipe buffer holds
        let spec = CommandSpec::new("sh", dir.path())
            .args([
                "-c",
                "printf '\\377\\n'; head -c 300000 /dev/zero | tr '\\0' a; echo; exit 0",
            ])
            .output(OutputMode::Prefixed);

        let result = tokio::time::timeout(Duration::from_secs(30), SystemRunner.run(&spec))
            .await
            .expect("child stalled on an undrained pipe");
        assert!(result.is_ok());
    }

    #[test]
    fn test_decode_line_strips_terminator_and_replaces_bad_bytes() {
        assert_eq!(decode_line(b"ready\r\n"), "ready");
        assert_eq!(decode_line(b"tail"), "tail");
        assert_eq!(decode_line(b"\xff\n"), "\u{FFFD}");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("reactkit-no-such-program", dir.path());

        let err = SystemRunner.run(&spec).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Spawn { .. }));
    }

    #[test]
    fn test_locate_unknown_program() {
        assert!(SystemRunner.locate("reactkit-no-such-program").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_shell() {
        assert!(SystemRunner.locate("sh").is_some());
    }
}
