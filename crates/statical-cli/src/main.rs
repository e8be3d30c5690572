//! Statical CLI.
//!
//! Command-line interface for packing directories into embeddable
//! archives and browsing them through the read-only file tree.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `pack` - Pack a directory into an archive
//! - `ls` - List a directory inside an archive
//! - `cat` - Print a file from an archive
//! - `stat` - Show metadata of an entry
//! - `tree` - Print every path in an archive
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Pack a site
//! statical pack ./public -o assets.zip
//!
//! # Browse it
//! statical ls /css --archive assets.zip
//! ```

use anyhow::Result;
use clap::Parser;
use statical_cli::cli::Cli;
use statical_cli::runner::{execute_command, init_logging};
use statical_cli::types::OutputFormat;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    // Parse output format
    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    // Execute command and get exit code
    let exit_code = execute_command(cli.command, output_format)?;

    // Exit with appropriate code
    std::process::exit(exit_code.as_i32());
}
