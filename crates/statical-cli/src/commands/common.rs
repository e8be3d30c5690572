//! Helpers shared by the archive-reading commands.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use statical_archive::{Archive, FileInfo};
use statical_vfs::{StaticFs, VfsError};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::types::ExitCode;

/// Reads an archive file and builds the tree from it.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid archive, or
/// holds paths the tree rejects.
pub fn load_tree(archive: &Path) -> Result<StaticFs> {
    let blob = fs::read(archive)
        .with_context(|| format!("failed to read archive {}", archive.display()))?;
    debug!(archive = %archive.display(), bytes = blob.len(), "read archive");

    StaticFs::from_archive(&Archive::new(blob))
        .with_context(|| format!("failed to load archive {}", archive.display()))
}

/// Maps a lookup failure to an exit code.
///
/// Missing paths are reported on stderr and turn into
/// [`ExitCode::NOT_FOUND`]; everything else stays an error.
///
/// # Errors
///
/// Returns `error` unchanged unless it is `VfsError::NotFound`.
pub fn not_found(error: VfsError) -> Result<ExitCode> {
    match error {
        VfsError::NotFound { path } => {
            eprintln!("{} {path}", "not found:".red().bold());
            Ok(ExitCode::NOT_FOUND)
        }
        other => Err(other.into()),
    }
}

/// Metadata of one entry as printed by `ls` and `stat`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntryReport {
    /// Base name of the entry
    pub name: String,
    /// `dir` or `file`
    pub kind: &'static str,
    /// Size in bytes
    pub size: u64,
    /// Permission bits in octal
    pub mode: String,
    /// Modification time, if recorded
    pub modified: Option<DateTime<Utc>>,
}

impl From<&FileInfo> for EntryReport {
    fn from(info: &FileInfo) -> Self {
        Self {
            name: info.name().to_string(),
            kind: if info.is_dir() { "dir" } else { "file" },
            size: info.size(),
            mode: format!("{:04o}", info.permissions()),
            modified: info.modified(),
        }
    }
}
