//! Command execution and runtime logic.
//!
//! Contains the command dispatch and logging initialization.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Commands;
use crate::commands;
use crate::types::{ExitCode, OutputFormat};

/// Initializes logging infrastructure.
///
/// Sets up tracing with appropriate log levels based on verbosity flag.
/// Logs go to stderr so that `cat` output on stdout stays clean.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Pack {
            source,
            output,
            store,
            include_hidden,
            no_empty_dirs,
        } => commands::pack::run(
            &source,
            &output,
            &commands::pack::pack_options(store, include_hidden, no_empty_dirs),
            output_format,
        ),
        Commands::Ls {
            path,
            archive,
            page,
        } => commands::ls::run(&archive, &path, page, output_format),
        Commands::Cat { path, archive } => commands::cat::run(&archive, &path),
        Commands::Stat { path, archive } => commands::stat::run(&archive, &path, output_format),
        Commands::Tree { archive } => commands::tree::run(&archive, output_format),
        Commands::Completions { shell } => {
            use crate::cli::Cli;
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
