//! Pack command implementation.
//!
//! Packs a directory into an archive file and checks that the result loads
//! as a tree before reporting on it.

use anyhow::{Context, Result};
use serde::Serialize;
use statical_archive::{Archive, Compression, PackOptions};
use statical_vfs::StaticFs;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};

/// Summary of a packed archive.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PackReport {
    /// Directory that was packed
    pub source: String,
    /// Archive file written
    pub output: String,
    /// Archive size in bytes
    pub bytes: usize,
    /// `stored` or `deflated`
    pub compression: &'static str,
    /// Regular files in the archive
    pub files: usize,
    /// Directories in the loaded tree, root and synthesized ones included
    pub dirs: usize,
}

/// Translates command-line flags into [`PackOptions`].
#[must_use]
pub const fn pack_options(store: bool, include_hidden: bool, no_empty_dirs: bool) -> PackOptions {
    let compression = if store {
        Compression::Stored
    } else {
        Compression::Deflated
    };
    PackOptions::new()
        .with_compression(compression)
        .with_hidden(include_hidden)
        .with_empty_dirs(!no_empty_dirs)
}

/// Packs `source` into `output` and returns a summary.
///
/// # Errors
///
/// Returns an error if packing fails, the archive cannot be written, or
/// the written archive does not load back.
pub fn pack(source: &Path, output: &Path, options: &PackOptions) -> Result<PackReport> {
    let blob = statical_archive::pack_dir(source, options)
        .with_context(|| format!("failed to pack {}", source.display()))?;
    let bytes = blob.len();

    fs::write(output, &blob)
        .with_context(|| format!("failed to write archive {}", output.display()))?;

    let tree = StaticFs::from_archive(&Archive::new(blob))
        .context("packed archive does not load back")?;

    info!(
        source = %source.display(),
        output = %output.display(),
        bytes,
        "packed archive"
    );

    Ok(PackReport {
        source: source.display().to_string(),
        output: output.display().to_string(),
        bytes,
        compression: match options.compression {
            Compression::Stored => "stored",
            Compression::Deflated => "deflated",
        },
        files: tree.file_count(),
        dirs: tree.dir_count(),
    })
}

/// Runs the pack command.
pub fn run(
    source: &Path,
    output: &Path,
    options: &PackOptions,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let report = pack(source, output, options)?;
    let formatted = format_output(&report, output_format).context("failed to format pack report")?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}
