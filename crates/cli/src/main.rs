use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::*;
use lifecycle_core::lifecycle_manager::{LifecycleManager, LifecycleManagerConfig};
use tracing_subscriber::EnvFilter;

mod commands;

/// lifecycle - Release lifecycle runner for a software package
#[derive(Parser)]
#[command(name = "lifecycle")]
#[command(about = "Build, test, document, publish and clean a package")]
#[command(version)]
struct Cli {
    /// Project root the commands run in (defaults to current directory)
    #[arg(short = 'C', long, default_value = ".", global = true)]
    project_root: PathBuf,

    /// Path to the lifecycle config file (defaults to <project-root>/lifecycle.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Target to run: build, publish, dev-install, test, docs, docs-pdf,
    /// docs-html, clean-all, clean, clean-cfg or clean-test
    target: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the execution plan for a target without running it
    Plan {
        /// Target name
        target: String,
    },
    /// List the declared targets
    List,
    /// Show the target dependency graph
    Graph,
    /// Print the JSON schema of lifecycle.yml
    Schema,
}

/// Parse arguments; a positional target cannot be combined with a subcommand
fn parse_cli<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    if let (Some(target), Some(_)) = (&cli.target, &cli.command) {
        return Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            format!("target '{}' cannot be used together with a subcommand", target),
        ));
    }
    Ok(cli)
}

fn main() -> ExitCode {
    let cli = parse_cli(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_logging(cli.verbose);

    match dispatch(cli) {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<i32> {
    if let Some(Commands::Schema) = cli.command {
        commands::schema::execute()?;
        return Ok(0);
    }

    // Initialize lifecycle manager with all business logic
    let manager = LifecycleManager::new(LifecycleManagerConfig {
        project_root: cli.project_root,
        config_path: cli.config,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize lifecycle: {}", e))?;

    // Execute command (CLI layer only handles presentation)
    match (cli.command, cli.target) {
        (Some(Commands::Plan { target }), None) => commands::plan::execute(&manager, &target),
        (Some(Commands::List), None) => commands::list::execute(&manager).map(|_| 0),
        (Some(Commands::Graph), None) => commands::graph::execute(&manager).map(|_| 0),
        (Some(Commands::Schema), None) => Ok(0),
        (Some(_), Some(target)) => {
            anyhow::bail!("target '{}' cannot be used together with a subcommand", target)
        }
        (None, Some(target)) => commands::run::execute(&manager, &target),
        (None, None) => {
            commands::list::execute(&manager)?;
            Ok(lifecycle_core::types::RESOLUTION_EXIT_CODE)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
