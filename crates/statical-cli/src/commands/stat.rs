//! Stat command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use statical_vfs::StaticFs;
use std::path::Path;

use super::common::{EntryReport, load_tree, not_found};
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};

/// Metadata of one entry together with the path it was found at.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatReport {
    /// Normalized path of the entry
    pub path: String,
    /// Entry metadata
    #[serde(flatten)]
    pub entry: EntryReport,
    /// Number of children, for directories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<usize>,
}

/// Describes the entry at `path`.
///
/// # Errors
///
/// Returns `VfsError::NotFound` if `path` does not exist.
pub fn describe(tree: &StaticFs, path: &str) -> statical_vfs::Result<StatReport> {
    let handle = tree.open(path)?;
    let path = handle.path().as_str();

    Ok(StatReport {
        path: path.to_string(),
        entry: EntryReport::from(handle.stat()),
        children: handle.is_dir().then(|| tree.children(path).len()),
    })
}

/// Runs the stat command.
pub fn run(archive: &Path, path: &str, output_format: OutputFormat) -> Result<ExitCode> {
    let tree = load_tree(archive)?;
    let report = match describe(&tree, path) {
        Ok(report) => report,
        Err(e) => return not_found(e),
    };

    let formatted = format_output(&report, output_format).context("failed to format metadata")?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}
