//! Reactkit CLI - Project scaffolding for React + TypeScript apps

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use scaffolder_core::ProductConfig;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reactkit product configuration
#[derive(Clone)]
pub struct ReactkitConfig;

impl ProductConfig for ReactkitConfig {
    fn display_name(&self) -> &'static str {
        "Reactkit"
    }

    fn default_project_name(&self) -> &'static str {
        "my-react-app"
    }

    fn npm_env(&self) -> &'static str {
        "REACTKIT_NPM"
    }

    fn generator_version_env(&self) -> &'static str {
        "REACTKIT_VITE_VERSION"
    }

    fn output_env(&self) -> &'static str {
        "REACTKIT_OUTPUT"
    }

    fn next_steps(&self, project_name: &str) -> Vec<String> {
        vec![format!("cd {}", project_name), "npm run dev".to_string()]
    }
}

#[derive(Parser, Debug)]
#[command(name = "reactkit")]
#[command(about = "CLI for scaffolding React + TypeScript projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Say hello
    Hello(HelloArgs),
    /// Create a React + TypeScript project
    Init,
}

#[derive(Parser, Debug)]
pub struct HelloArgs {
    /// Your name
    #[arg(long)]
    pub name: Option<String>,
}

fn greeting(name: Option<&str>) -> String {
    format!("{} {}", "👋 Hello".green(), name.unwrap_or("World").cyan())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully. While a child runs it receives the interrupt
    // itself and its exit is reported as that stage's failure.
    ctrlc::set_handler(move || {
        if scaffolder_core::runtime::child_in_flight() {
            return;
        }
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = ReactkitConfig;

    match args.command {
        Some(Command::Hello(hello)) => {
            println!("{}", greeting(hello.name.as_deref()));
            Ok(())
        }
        // No subcommand defaults to init
        Some(Command::Init) | None => {
            let result = scaffolder_core::run(&config, CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
