//! Per-record metadata and the flat entry mapping produced by extraction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// File-type bit marking a directory in a unix mode.
pub const MODE_DIR: u32 = 0o040_000;

/// File-type bit marking a regular file in a unix mode.
pub const MODE_FILE: u32 = 0o100_000;

/// Mode reported for directories that carry no mode of their own.
pub const DEFAULT_DIR_MODE: u32 = MODE_DIR | 0o755;

/// Mode reported for files that carry no mode of their own.
pub const DEFAULT_FILE_MODE: u32 = MODE_FILE | 0o644;

const PERMISSION_BITS: u32 = 0o7777;

/// Flat mapping from absolute path (`"/" + record name`) to extracted entry.
///
/// Ordered so that iteration, logging and test output are deterministic.
pub type FlatEntries = BTreeMap<String, ArchiveEntry>;

/// Metadata describing one archived record.
///
/// # Examples
///
/// ```
/// use statical_archive::{FileInfo, DEFAULT_FILE_MODE};
///
/// let info = FileInfo::file("hello.txt", 2);
/// assert_eq!(info.name(), "hello.txt");
/// assert_eq!(info.size(), 2);
/// assert_eq!(info.mode(), DEFAULT_FILE_MODE);
/// assert!(!info.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    name: String,
    size: u64,
    mode: u32,
    modified: Option<DateTime<Utc>>,
    is_dir: bool,
}

impl FileInfo {
    /// Creates metadata for a regular file with default permissions.
    #[must_use]
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mode: DEFAULT_FILE_MODE,
            modified: None,
            is_dir: false,
        }
    }

    /// Creates metadata for a directory.
    ///
    /// Directories always report size 0 and, until told otherwise, mode
    /// `0755` and no modification time.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_archive::{FileInfo, DEFAULT_DIR_MODE};
    ///
    /// let info = FileInfo::directory("css");
    /// assert!(info.is_dir());
    /// assert_eq!(info.size(), 0);
    /// assert_eq!(info.mode(), DEFAULT_DIR_MODE);
    /// assert!(info.modified().is_none());
    /// ```
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            mode: DEFAULT_DIR_MODE,
            modified: None,
            is_dir: true,
        }
    }

    /// Replaces the permission bits, keeping the file-type bits.
    #[must_use]
    pub fn with_permissions(mut self, permissions: u32) -> Self {
        let kind = if self.is_dir { MODE_DIR } else { MODE_FILE };
        self.mode = kind | (permissions & PERMISSION_BITS);
        self
    }

    /// Sets the modification time.
    #[must_use]
    pub fn with_modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    /// Base name of the record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uncompressed size in bytes; always 0 for directories.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Full unix mode, file-type bits included.
    #[must_use]
    pub const fn mode(&self) -> u32 {
        self.mode
    }

    /// Permission bits only.
    #[must_use]
    pub const fn permissions(&self) -> u32 {
        self.mode & PERMISSION_BITS
    }

    /// Modification time, if the record carries one.
    #[must_use]
    pub const fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    /// Whether the record is a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// An extracted record: its metadata and its decompressed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    info: FileInfo,
    data: Vec<u8>,
}

impl ArchiveEntry {
    /// Creates an entry from metadata and content.
    #[must_use]
    pub const fn new(info: FileInfo, data: Vec<u8>) -> Self {
        Self { info, data }
    }

    /// Creates a regular-file entry with default metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_archive::ArchiveEntry;
    ///
    /// let entry = ArchiveEntry::file("hello.txt", b"hi".to_vec());
    /// assert_eq!(entry.data(), b"hi");
    /// assert_eq!(entry.info().size(), 2);
    /// ```
    #[must_use]
    pub fn file(name: impl Into<String>, data: Vec<u8>) -> Self {
        let info = FileInfo::file(name, data.len() as u64);
        Self { info, data }
    }

    /// Creates an explicit directory entry with default metadata.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            info: FileInfo::directory(name),
            data: Vec::new(),
        }
    }

    /// Record metadata.
    #[must_use]
    pub const fn info(&self) -> &FileInfo {
        &self.info
    }

    /// Decompressed content; empty for directories.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Splits the entry into metadata and content.
    #[must_use]
    pub fn into_parts(self) -> (FileInfo, Vec<u8>) {
        (self.info, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_defaults() {
        let info = FileInfo::file("app.css", 6);
        assert_eq!(info.mode(), 0o100_644);
        assert_eq!(info.permissions(), 0o644);
        assert!(info.modified().is_none());
    }

    #[test]
    fn test_with_permissions_keeps_type_bits() {
        let file = FileInfo::file("run.sh", 0).with_permissions(0o100_755);
        assert_eq!(file.mode(), MODE_FILE | 0o755);

        let dir = FileInfo::directory("bin").with_permissions(0o700);
        assert_eq!(dir.mode(), MODE_DIR | 0o700);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_with_modified() {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let info = FileInfo::file("a", 1).with_modified(Some(stamp));
        assert_eq!(info.modified(), Some(stamp));
    }

    #[test]
    fn test_entry_into_parts() {
        let (info, data) = ArchiveEntry::file("hello.txt", b"hi".to_vec()).into_parts();
        assert_eq!(info.name(), "hello.txt");
        assert_eq!(data, b"hi");
    }

    #[test]
    fn test_directory_entry_is_empty() {
        let entry = ArchiveEntry::directory("css");
        assert!(entry.info().is_dir());
        assert!(entry.data().is_empty());
    }
}
