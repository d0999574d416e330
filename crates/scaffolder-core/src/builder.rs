//! Scaffold orchestration
//!
//! `ProjectBuilder` drives one run through a fixed, linear sequence of
//! stages:
//!
//! ```text
//! ResolveInput -> Preflight -> RunGenerator -> InstallRuntimeDeps
//!     -> InstallDevDeps -> CreateDirectories -> WriteFiles
//! ```
//!
//! An empty project name ends the run before any side effect. The first
//! failing stage ends the run; nothing already done is undone.

use crate::config::Settings;
use crate::error::ScaffoldError;
use crate::prompt::Prompter;
use crate::report::Reporter;
use crate::runtime::{CommandSpec, ProcessRunner};
use crate::templates::{create_directories, write_files, Blueprint};
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Prompt shown when asking for the project name
pub const PROJECT_NAME_PROMPT: &str = "Project name?";

/// Validated, non-empty name of the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Parse operator input. Blank input yields `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, ScaffoldError> {
        let name = input.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let invalid = |reason| ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason,
        };

        // npm would read it as one of its own options
        if name.starts_with('-') {
            return Err(invalid("must not start with '-'"));
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => {
                Ok(Some(Self(name.to_string())))
            }
            (Some(Component::CurDir | Component::ParentDir), None) => {
                Err(invalid("must name a new directory"))
            }
            _ => Err(invalid("must be a single directory name")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stages of a scaffold run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ResolveInput,
    Preflight,
    RunGenerator,
    InstallRuntimeDeps,
    InstallDevDeps,
    CreateDirectories,
    WriteFiles,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::ResolveInput => "Project name",
            Stage::Preflight => "Preflight checks",
            Stage::RunGenerator => "Project generator",
            Stage::InstallRuntimeDeps => "Dependency install",
            Stage::InstallDevDeps => "Dev dependency install",
            Stage::CreateDirectories => "Folder structure",
            Stage::WriteFiles => "File writing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ScaffoldSummary {
    pub project_name: ProjectName,
    pub project_root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Terminal state of a run
#[derive(Debug)]
pub enum RunOutcome {
    Success(ScaffoldSummary),
    /// The operator submitted an empty project name
    AbortedNoInput,
    Failed { stage: Stage, error: ScaffoldError },
}

impl RunOutcome {
    /// Collapse into the tool's exit result.
    ///
    /// `Ok(Some(_))` on success, `Ok(None)` when the operator gave no name,
    /// and an error carrying "<stage> failed" context otherwise.
    pub fn into_result(self) -> anyhow::Result<Option<ScaffoldSummary>> {
        match self {
            RunOutcome::Success(summary) => Ok(Some(summary)),
            RunOutcome::AbortedNoInput => Ok(None),
            RunOutcome::Failed { stage, error } => {
                Err(anyhow::Error::new(error).context(format!("{} failed", stage)))
            }
        }
    }
}

/// The collaborators a run talks to
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub prompter: &'a dyn Prompter,
    pub runner: &'a dyn ProcessRunner,
    pub reporter: &'a dyn Reporter,
}

/// Orchestrates one scaffold run
pub struct ProjectBuilder<'a> {
    blueprint: &'a Blueprint,
    settings: &'a Settings,
    caps: Capabilities<'a>,
    working_dir: PathBuf,
    default_name: String,
}

impl<'a> ProjectBuilder<'a> {
    /// The project is created as `<working_dir>/<name>`
    pub fn new(
        blueprint: &'a Blueprint,
        settings: &'a Settings,
        working_dir: impl Into<PathBuf>,
        caps: Capabilities<'a>,
    ) -> Self {
        Self {
            blueprint,
            settings,
            caps,
            working_dir: working_dir.into(),
            default_name: "my-react-app".to_string(),
        }
    }

    /// Suggested answer for the project name prompt
    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    pub async fn run(&self) -> RunOutcome {
        let name = match self.resolve_name() {
            Ok(Some(name)) => name,
            Ok(None) => {
                self.caps.reporter.error("Project name required");
                return RunOutcome::AbortedNoInput;
            }
            Err(error) => return self.fail(Stage::ResolveInput, error),
        };

        match self.scaffold(name).await {
            Ok(summary) => {
                self.caps.reporter.success("Project setup complete!");
                RunOutcome::Success(summary)
            }
            Err((stage, error)) => self.fail(stage, error),
        }
    }

    fn resolve_name(&self) -> Result<Option<ProjectName>, ScaffoldError> {
        let input = match self
            .caps
            .prompter
            .text(PROJECT_NAME_PROMPT, &self.default_name)
        {
            Ok(input) => input,
            // Esc or Ctrl+C at the prompt counts as no answer
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
            Err(e) => return Err(ScaffoldError::Prompt(e)),
        };
        ProjectName::parse(&input)
    }

    async fn scaffold(&self, name: ProjectName) -> Result<ScaffoldSummary, (Stage, ScaffoldError)> {
        let reporter = self.caps.reporter;
        let root = self.working_dir.join(name.as_str());

        reporter.step(&format!("Creating project: {}", name));
        self.preflight(&root).await.map_err(at(Stage::Preflight))?;

        self.execute(self.generator_command(&name))
            .await
            .map_err(at(Stage::RunGenerator))?;

        reporter.step("Installing dependencies...");
        self.execute(self.install_command(&root, self.blueprint.dependencies, false))
            .await
            .map_err(at(Stage::InstallRuntimeDeps))?;
        self.execute(self.install_command(&root, self.blueprint.dev_dependencies, true))
            .await
            .map_err(at(Stage::InstallDevDeps))?;

        reporter.step("Creating folder structure...");
        let directories = create_directories(&root, self.blueprint.directories)
            .await
            .map_err(at(Stage::CreateDirectories))?;

        reporter.step("Writing project files...");
        let files = write_files(&root, self.blueprint.files)
            .await
            .map_err(at(Stage::WriteFiles))?;
        reporter.info(&format!(
            "Wrote {} files in {}",
            files.len(),
            root.display()
        ));

        Ok(ScaffoldSummary {
            project_name: name,
            project_root: root,
            directories,
            files,
        })
    }

    /// Fail fast instead of relying on the generator to refuse a populated
    /// target directory.
    async fn preflight(&self, root: &Path) -> Result<(), ScaffoldError> {
        if self.caps.runner.locate(&self.settings.npm).is_none() {
            return Err(ScaffoldError::ToolNotFound {
                program: self.settings.npm.clone(),
            });
        }

        let mut entries = match fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(ScaffoldError::TargetUnusable {
                    path: root.to_path_buf(),
                    source,
                })
            }
        };

        match entries.next_entry().await {
            Ok(None) => Ok(()),
            Ok(Some(_)) => Err(ScaffoldError::TargetNotEmpty {
                path: root.to_path_buf(),
            }),
            Err(source) => Err(ScaffoldError::TargetUnusable {
                path: root.to_path_buf(),
                source,
            }),
        }
    }

    async fn execute(&self, spec: CommandSpec) -> Result<(), ScaffoldError> {
        self.caps.reporter.info(&format!("Running: {}", spec));
        self.caps.runner.run(&spec).await
    }

    /// `npm create vite@<pin> <name> -- --template <variant>`, run in the working directory
    pub fn generator_command(&self, name: &ProjectName) -> CommandSpec {
        let generator = &self.blueprint.generator;
        CommandSpec::new(&self.settings.npm, &self.working_dir)
            .arg("create")
            .arg(format!(
                "{}@{}",
                generator.package, self.settings.generator_version
            ))
            .arg(name.as_str())
            .args(["--", "--template", generator.template])
            .output(self.settings.output)
    }

    /// `npm install [-D] <packages...>`, run in the project root
    pub fn install_command(&self, root: &Path, packages: &[&str], dev: bool) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.settings.npm, root).arg("install");
        if dev {
            spec = spec.arg("-D");
        }
        spec.args(packages.iter().copied()).output(self.settings.output)
    }

    fn fail(&self, stage: Stage, error: ScaffoldError) -> RunOutcome {
        self.caps
            .reporter
            .error(&format!("{} failed: {}", stage, error));
        RunOutcome::Failed { stage, error }
    }
}

fn at(stage: Stage) -> impl FnOnce(ScaffoldError) -> (Stage, ScaffoldError) {
    move |error| (stage, error)
}
