//! Packing a directory tree into an archive blob.
//!
//! The blob produced here is what a binary embeds and later passes to
//! [`register`](crate::register).
//!
//! # Examples
//!
//! ```
//! use statical_archive::{Archive, Compression, PackOptions};
//! # use tempfile::TempDir;
//!
//! # let src = TempDir::new().unwrap();
//! # std::fs::create_dir(src.path().join("css")).unwrap();
//! # std::fs::write(src.path().join("css/app.css"), "body{}").unwrap();
//! let options = PackOptions::default().with_compression(Compression::Stored);
//! let blob = statical_archive::pack_dir(src.path(), &options)?;
//!
//! let entries = Archive::new(blob).extract()?;
//! assert_eq!(entries["/css/app.css"].data(), b"body{}");
//! # Ok::<(), statical_archive::ArchiveError>(())
//! ```

use crate::error::{ArchiveError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fs;
use std::io::{self, Cursor, Write};
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// How record contents are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// Contents stored as-is
    Stored,
    /// Contents deflated
    #[default]
    Deflated,
}

impl Compression {
    const fn method(self) -> CompressionMethod {
        match self {
            Self::Stored => CompressionMethod::Stored,
            Self::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Options for packing a directory.
///
/// # Examples
///
/// ```
/// use statical_archive::{Compression, PackOptions};
///
/// let options = PackOptions::default()
///     .with_compression(Compression::Stored)
///     .with_hidden(true);
///
/// assert_eq!(options.compression, Compression::Stored);
/// assert!(options.include_hidden);
/// assert!(options.include_empty_dirs);
/// ```
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Compression applied to file contents
    pub compression: Compression,
    /// Include entries whose name starts with `.`
    pub include_hidden: bool,
    /// Record directories that would otherwise vanish because they hold
    /// no packed entries
    pub include_empty_dirs: bool,
}

impl PackOptions {
    /// Creates pack options with defaults.
    ///
    /// Defaults:
    /// - compression: deflated
    /// - `include_hidden`: false
    /// - `include_empty_dirs`: true
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compression: Compression::Deflated,
            include_hidden: false,
            include_empty_dirs: true,
        }
    }

    /// Sets the compression method.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets whether hidden entries are packed.
    #[must_use]
    pub const fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Sets whether empty directories are recorded.
    #[must_use]
    pub const fn with_empty_dirs(mut self, include_empty_dirs: bool) -> Self {
        self.include_empty_dirs = include_empty_dirs;
        self
    }
}

impl Default for PackOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Packs every regular file under `src` into an archive blob.
///
/// Records are named by their slash-separated path relative to `src` and
/// written in sorted order, so the same tree always yields the same record
/// sequence. Symlinks and other special files are skipped.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if `src` is not a directory or a file cannot
/// be read, [`ArchiveError::Walk`] if traversal fails, and
/// [`ArchiveError::Write`]/[`ArchiveError::Finalize`] if the archive cannot
/// be written.
pub fn pack_dir(src: impl AsRef<Path>, options: &PackOptions) -> Result<Vec<u8>> {
    let src = src.as_ref();
    if !src.is_dir() {
        return Err(ArchiveError::Io {
            path: src.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotADirectory),
        });
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut files = 0usize;
    let mut dirs = 0usize;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || options.include_hidden || !is_hidden(entry));

    for entry in walker {
        let entry = entry?;
        let name = record_name(src, entry.path())?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if options.include_empty_dirs && !has_packable_children(entry.path(), options)? {
                let record = format!("{name}/");
                writer
                    .add_directory(record.as_str(), record_options(options, &entry))
                    .map_err(|source| ArchiveError::Write {
                        name: record.clone(),
                        source,
                    })?;
                debug!(record = %record, "packed empty directory");
                dirs += 1;
            }
        } else if file_type.is_file() {
            let data = fs::read(entry.path()).map_err(|source| ArchiveError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
            writer
                .start_file(name.as_str(), record_options(options, &entry))
                .map_err(|source| ArchiveError::Write {
                    name: name.clone(),
                    source,
                })?;
            writer
                .write_all(&data)
                .map_err(|source| ArchiveError::Write {
                    name: name.clone(),
                    source: source.into(),
                })?;
            debug!(record = %name, size = data.len(), "packed file");
            files += 1;
        } else {
            debug!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }

    let blob = writer
        .finish()
        .map_err(ArchiveError::Finalize)?
        .into_inner();

    info!(
        src = %src.display(),
        files,
        dirs,
        bytes = blob.len(),
        "packed directory"
    );
    Ok(blob)
}

/// Packs `src` and writes the blob to `dest`.
///
/// # Errors
///
/// Returns any error from [`pack_dir`], or [`ArchiveError::Io`] if `dest`
/// cannot be written.
pub fn pack_dir_to_file(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &PackOptions,
) -> Result<usize> {
    let dest = dest.as_ref();
    let blob = pack_dir(src, options)?;
    fs::write(dest, &blob).map_err(|source| ArchiveError::Io {
        path: dest.to_path_buf(),
        source,
    })?;
    Ok(blob.len())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Relative, slash-separated record name; non-UTF-8 names are refused.
fn record_name(src: &Path, path: &Path) -> Result<String> {
    let invalid = || ArchiveError::Io {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
    };

    let relative = path.strip_prefix(src).map_err(|_| invalid())?;
    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_str().ok_or_else(invalid)?);
    }
    Ok(parts.join("/"))
}

fn has_packable_children(dir: &Path, options: &PackOptions) -> Result<bool> {
    let read_dir = fs::read_dir(dir).map_err(|source| ArchiveError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for child in read_dir {
        let child = child.map_err(|source| ArchiveError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if options.include_hidden || !child.file_name().to_string_lossy().starts_with('.') {
            return Ok(true);
        }
    }
    Ok(false)
}

fn record_options(options: &PackOptions, entry: &DirEntry) -> SimpleFileOptions {
    let mut record = SimpleFileOptions::default().compression_method(options.compression.method());
    let Ok(metadata) = entry.metadata() else {
        return record;
    };

    if let Some(stamp) = metadata
        .modified()
        .ok()
        .and_then(|modified| to_zip_time(DateTime::<Utc>::from(modified)))
    {
        record = record.last_modified_time(stamp);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        record = record.unix_permissions(metadata.permissions().mode() & 0o777);
    }

    record
}

/// Archive timestamps cover 1980-2107 only; anything else is left unset.
fn to_zip_time(time: DateTime<Utc>) -> Option<zip::DateTime> {
    zip::DateTime::from_date_and_time(
        u16::try_from(time.year()).ok()?,
        u8::try_from(time.month()).ok()?,
        u8::try_from(time.day()).ok()?,
        u8::try_from(time.hour()).ok()?,
        u8::try_from(time.minute()).ok()?,
        u8::try_from(time.second()).ok()?,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Archive;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public/css")).unwrap();
        fs::create_dir_all(dir.path().join("public/empty")).unwrap();
        fs::write(dir.path().join("public/css/app.css"), "body{}").unwrap();
        fs::write(dir.path().join("public/hello.txt"), "hi").unwrap();
        fs::write(dir.path().join("public/.secret"), "hidden").unwrap();
        dir
    }

    #[test]
    fn test_pack_options_defaults() {
        let options = PackOptions::default();
        assert_eq!(options.compression, Compression::Deflated);
        assert!(!options.include_hidden);
        assert!(options.include_empty_dirs);
    }

    #[test]
    fn test_pack_dir_round_trip() {
        let src = site();
        let blob = pack_dir(src.path(), &PackOptions::default()).unwrap();
        let entries = Archive::new(blob).extract().unwrap();

        assert_eq!(entries["/public/css/app.css"].data(), b"body{}");
        assert_eq!(entries["/public/hello.txt"].data(), b"hi");
        assert!(entries["/public/empty"].info().is_dir());
        assert!(!entries.contains_key("/public/.secret"));
    }

    #[test]
    fn test_pack_dir_stored() {
        let src = site();
        let options = PackOptions::default().with_compression(Compression::Stored);
        let blob = pack_dir(src.path(), &options).unwrap();

        // Stored contents appear verbatim in the blob
        assert!(blob.windows(6).any(|window| window == b"body{}"));
    }

    #[test]
    fn test_pack_dir_includes_hidden_when_asked() {
        let src = site();
        let options = PackOptions::default().with_hidden(true);
        let entries = Archive::new(pack_dir(src.path(), &options).unwrap())
            .extract()
            .unwrap();

        assert_eq!(entries["/public/.secret"].data(), b"hidden");
    }

    #[test]
    fn test_pack_dir_without_empty_dirs() {
        let src = site();
        let options = PackOptions::default().with_empty_dirs(false);
        let entries = Archive::new(pack_dir(src.path(), &options).unwrap())
            .extract()
            .unwrap();

        assert!(!entries.contains_key("/public/empty"));
        // Directories holding files are implied by their files, never recorded
        assert!(!entries.contains_key("/public/css"));
    }

    #[test]
    fn test_pack_dir_rejects_file_source() {
        let src = site();
        let err = pack_dir(src.path().join("public/hello.txt"), &PackOptions::default())
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Io { .. }));
    }

    #[test]
    fn test_pack_dir_to_file() {
        let src = site();
        let out = TempDir::new().unwrap();
        let dest = out.path().join("site.zip");

        let written = pack_dir_to_file(src.path(), &dest, &PackOptions::default()).unwrap();
        assert_eq!(fs::metadata(&dest).unwrap().len(), written as u64);
    }

    #[test]
    fn test_to_zip_time_out_of_range() {
        let before_dos = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert!(to_zip_time(before_dos).is_none());

        let fine = Utc.with_ymd_and_hms(2020, 2, 29, 23, 59, 58).unwrap();
        assert!(to_zip_time(fine).is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_pack_dir_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let src = site();
        let script = src.path().join("public/run.sh");
        fs::write(&script, "#!/bin/sh").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let entries = Archive::new(pack_dir(src.path(), &PackOptions::default()).unwrap())
            .extract()
            .unwrap();
        assert_eq!(entries["/public/run.sh"].info().permissions(), 0o755);
    }
}
