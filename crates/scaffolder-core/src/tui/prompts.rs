//! Charm-style CLI prompts using cliclack

use crate::builder::{Capabilities, ProjectBuilder};
use crate::config::Settings;
use crate::product::ProductConfig;
use crate::prompt::Prompter;
use crate::report::Reporter;
use crate::runtime::SystemRunner;
use crate::templates;
use anyhow::Result;
use std::io;

/// Reads input with a cliclack text field
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn text(&self, message: &str, default: &str) -> io::Result<String> {
        cliclack::input(message)
            .placeholder(default)
            .default_input(default)
            .required(false)
            .interact()
    }
}

/// Reports progress as cliclack log lines
pub struct ClackReporter;

impl Reporter for ClackReporter {
    fn step(&self, message: &str) {
        let _ = cliclack::log::step(message);
    }

    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn error(&self, message: &str) {
        let _ = cliclack::log::error(message);
    }
}

/// Run the interactive project creation flow
pub async fn run<C: ProductConfig>(config: &C, cli_version: &str) -> Result<()> {
    cliclack::intro(format!("{} v{}", config.display_name(), cli_version))?;

    let settings = Settings::from_env(config)?;
    if settings != Settings::default() {
        cliclack::log::info(format!(
            "Using {} with generator version {}",
            settings.npm, settings.generator_version
        ))?;
    }

    let working_dir = std::env::current_dir()?;
    let builder = ProjectBuilder::new(
        templates::react_ts(),
        &settings,
        working_dir,
        Capabilities {
            prompter: &ClackPrompter,
            runner: &SystemRunner,
            reporter: &ClackReporter,
        },
    )
    .default_name(config.default_project_name());

    match builder.run().await.into_result() {
        Ok(Some(summary)) => print_next_steps(config, summary.project_name.as_str()),
        Ok(None) => {
            cliclack::outro_cancel("No project created.")?;
            Ok(())
        }
        Err(err) => {
            cliclack::outro_cancel("Setup stopped. Fix the problem above and run again.")?;
            Err(err)
        }
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, project_name: &str) -> Result<()> {
    let steps = config.next_steps(project_name);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
