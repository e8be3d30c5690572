//! Ls command implementation.
//!
//! Lists a directory through the paged `read_dir` interface, the same way a
//! serving layer renders a directory index.

use anyhow::{Context, Result};
use statical_vfs::{StaticFs, read_dir_paged};
use std::path::Path;
use tracing::debug;

use super::common::{EntryReport, load_tree, not_found};
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};

/// Lists `path`, reading `page` entries at a time.
///
/// A regular file lists as itself.
///
/// # Errors
///
/// Returns `VfsError::NotFound` if `path` does not exist.
pub fn list(tree: &StaticFs, path: &str, page: isize) -> statical_vfs::Result<Vec<EntryReport>> {
    let info = tree.stat(path)?;
    if !info.is_dir() {
        return Ok(vec![EntryReport::from(info)]);
    }

    let listing = read_dir_paged(tree, path, page)?;
    debug!(path, page, entries = listing.len(), "listed directory");
    Ok(listing.iter().map(EntryReport::from).collect())
}

/// Runs the ls command.
pub fn run(archive: &Path, path: &str, page: isize, output_format: OutputFormat) -> Result<ExitCode> {
    let tree = load_tree(archive)?;
    let entries = match list(&tree, path, page) {
        Ok(entries) => entries,
        Err(e) => return not_found(e),
    };

    let formatted = format_output(&entries, output_format).context("failed to format listing")?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}
