//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Statical - pack a directory into an archive and browse it.
///
/// Archives produced by `pack` are meant to be embedded in a binary and
/// served read-only; the other commands read them back the same way.
#[derive(Parser, Debug)]
#[command(name = "statical")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack a directory into a ZIP archive.
    ///
    /// Every regular file under `SRC` becomes a record named by its path
    /// relative to `SRC`, keeping permissions and modification time.
    ///
    /// # Examples
    ///
    /// ```bash
    /// statical pack ./public -o assets.zip
    /// statical pack ./public -o assets.zip --store --include-hidden
    /// ```
    Pack {
        /// Directory to pack
        source: PathBuf,

        /// Archive file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Store records uncompressed instead of deflating them
        #[arg(long)]
        store: bool,

        /// Include files and directories whose name starts with '.'
        #[arg(long)]
        include_hidden: bool,

        /// Do not record directories that contain nothing to pack
        #[arg(long)]
        no_empty_dirs: bool,
    },

    /// List a directory inside an archive.
    ///
    /// # Examples
    ///
    /// ```bash
    /// statical ls /public --archive assets.zip
    /// STATICAL_ARCHIVE=assets.zip statical ls --page 50
    /// ```
    Ls {
        /// Directory to list
        #[arg(default_value = "/")]
        path: String,

        /// Archive to read
        #[arg(short, long, env = "STATICAL_ARCHIVE")]
        archive: PathBuf,

        /// Read the listing this many entries at a time (0 reads it at once)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page: isize,
    },

    /// Write a file from an archive to stdout.
    Cat {
        /// File to print
        path: String,

        /// Archive to read
        #[arg(short, long, env = "STATICAL_ARCHIVE")]
        archive: PathBuf,
    },

    /// Show metadata of an entry in an archive.
    Stat {
        /// Entry to describe
        path: String,

        /// Archive to read
        #[arg(short, long, env = "STATICAL_ARCHIVE")]
        archive: PathBuf,
    },

    /// Print every path in an archive, sorted.
    Tree {
        /// Archive to read
        #[arg(short, long, env = "STATICAL_ARCHIVE")]
        archive: PathBuf,
    },

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}
