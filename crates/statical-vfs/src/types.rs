//! Core types for the virtual filesystem.
//!
//! This module defines strong types for VFS paths, entries, and errors.
//!
//! # Examples
//!
//! ```
//! use statical_vfs::{Entry, EntryPath};
//!
//! let path = EntryPath::new("/public/css/app.css").unwrap();
//! let entry = Entry::file("app.css", "body{}");
//!
//! assert_eq!(path.base_name(), "app.css");
//! assert_eq!(entry.data(), b"body{}");
//! ```

use statical_archive::{ArchiveEntry, ArchiveError, FileInfo};
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors that can occur during VFS operations.
///
/// All error variants include contextual information and implement
/// `is_xxx()` methods for easy error classification.
///
/// # Examples
///
/// ```
/// use statical_vfs::VfsError;
///
/// let error = VfsError::NotFound {
///     path: "/missing.txt".to_string(),
/// };
///
/// assert!(error.is_not_found());
/// ```
#[derive(Error, Debug)]
pub enum VfsError {
    /// No entry exists at the requested path
    #[error("File not found: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// A regular file sits where a directory is required
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory
        path: String,
    },

    /// Path is malformed or uses a component the archive may not contain
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The invalid path
        path: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// A bounded directory read found no entries left.
    ///
    /// This is the end-of-listing sentinel for paging callers, not a failure.
    #[error("end of directory")]
    EndOfDirectory,

    /// The underlying archive could not be loaded
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl VfsError {
    /// Returns `true` if this is a not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_vfs::VfsError;
    ///
    /// let error = VfsError::NotFound {
    ///     path: "/test.txt".to_string(),
    /// };
    ///
    /// assert!(error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a not-a-directory error.
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` if this is an invalid path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_vfs::VfsError;
    ///
    /// let error = VfsError::InvalidPath {
    ///     path: "/a/../b".to_string(),
    ///     reason: "contains a '..' segment",
    /// };
    ///
    /// assert!(error.is_invalid_path());
    /// ```
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Returns `true` if a bounded directory read ran past the end.
    #[must_use]
    pub const fn is_end_of_directory(&self) -> bool {
        matches!(self, Self::EndOfDirectory)
    }
}

impl From<VfsError> for io::Error {
    fn from(error: VfsError) -> Self {
        let kind = match &error {
            VfsError::NotFound { .. } => io::ErrorKind::NotFound,
            VfsError::NotADirectory { .. } => io::ErrorKind::NotADirectory,
            VfsError::InvalidPath { .. } => io::ErrorKind::InvalidInput,
            VfsError::EndOfDirectory => io::ErrorKind::UnexpectedEof,
            VfsError::Archive(_) => io::ErrorKind::InvalidData,
        };
        Self::new(kind, error)
    }
}

/// Type alias for VFS operation results.
pub type Result<T> = std::result::Result<T, VfsError>;

/// A validated absolute path naming one entry.
///
/// Paths are slash-separated and rooted at `/`, carry no trailing slash
/// except for the root itself, and contain no empty, `.` or `..` segments.
/// Archive paths that break these rules are rejected rather than rewritten.
///
/// # Examples
///
/// ```
/// use statical_vfs::EntryPath;
///
/// let path = EntryPath::new("/public/hello.txt").unwrap();
/// assert_eq!(path.as_str(), "/public/hello.txt");
/// assert_eq!(path.parent().unwrap().as_str(), "/public");
///
/// assert!(EntryPath::new("relative/path").is_err());
/// assert!(EntryPath::new("/parent/../escape").is_err());
/// assert!(EntryPath::new("/double//slash").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath(String);

impl EntryPath {
    /// Creates a new `EntryPath`, enforcing the strict path rules.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::InvalidPath` if the path is empty, relative, ends
    /// with a slash (other than the root), or contains an empty, `.` or `..`
    /// segment, a backslash, or a NUL byte.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let invalid = |path: String, reason| Err(VfsError::InvalidPath { path, reason });

        if path.is_empty() {
            return invalid(path, "empty path");
        }
        if !path.starts_with('/') {
            return invalid(path, "path must be absolute");
        }
        if path.contains(['\\', '\0']) {
            return invalid(path, "contains a backslash or NUL byte");
        }
        if path == "/" {
            return Ok(Self(path));
        }

        let bad_segment = path[1..].split('/').find_map(|segment| match segment {
            "" => Some("contains an empty segment"),
            "." => Some("contains a '.' segment"),
            ".." => Some("contains a '..' segment"),
            _ => None,
        });
        if let Some(reason) = bad_segment {
            return invalid(path, reason);
        }

        Ok(Self(path))
    }

    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the parent directory of this path.
    ///
    /// Returns `None` if this is the root path.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_vfs::EntryPath;
    ///
    /// let path = EntryPath::new("/hello.txt").unwrap();
    /// assert!(path.parent().unwrap().is_root());
    /// assert!(EntryPath::root().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        self.0.rfind('/').map(|pos| {
            if pos == 0 {
                Self::root()
            } else {
                Self(self.0[..pos].to_string())
            }
        })
    }

    /// Last segment of the path; `/` for the root.
    #[must_use]
    pub fn base_name(&self) -> &str {
        if self.is_root() {
            return "/";
        }
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Appends a single child segment.
    ///
    /// The caller guarantees `name` is a valid segment; it comes from the
    /// directory index built out of validated paths.
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        if self.is_root() {
            Self(format!("/{name}"))
        } else {
            Self(format!("{}/{name}", self.0))
        }
    }

    /// Normalizes a lookup path into the form entries are keyed by.
    ///
    /// Runs of `/` collapse to one and a trailing slash is dropped (except
    /// for the root). `.` and `..` are left alone; such paths simply never
    /// match an entry. `StaticFs::open` additionally refuses a trailing
    /// slash on anything but a directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_vfs::EntryPath;
    ///
    /// assert_eq!(EntryPath::normalize("/public//hello.txt"), "/public/hello.txt");
    /// assert_eq!(EntryPath::normalize("/public/"), "/public");
    /// assert_eq!(EntryPath::normalize("//"), "/");
    /// ```
    #[must_use]
    pub fn normalize(path: &str) -> Cow<'_, str> {
        if !path.contains("//") && (path.len() <= 1 || !path.ends_with('/')) {
            return Cow::Borrowed(path);
        }

        let mut normalized = String::with_capacity(path.len());
        let mut previous_slash = false;
        for ch in path.chars() {
            if ch == '/' && previous_slash {
                continue;
            }
            previous_slash = ch == '/';
            normalized.push(ch);
        }
        if normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }
        Cow::Owned(normalized)
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntryPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One node of the tree: a regular file with content, or a directory.
///
/// # Examples
///
/// ```
/// use statical_vfs::Entry;
///
/// let file = Entry::file("hello.txt", "hi");
/// assert!(!file.is_dir());
/// assert_eq!(file.metadata().size(), 2);
///
/// let dir = Entry::directory("css");
/// assert!(dir.is_dir());
/// assert!(dir.data().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    info: FileInfo,
    data: Vec<u8>,
}

impl Entry {
    /// Creates a regular file entry with default metadata.
    #[must_use]
    pub fn file(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        Self {
            info: FileInfo::file(name, data.len() as u64),
            data,
        }
    }

    /// Creates a directory entry with synthetic metadata.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            info: FileInfo::directory(name),
            data: Vec::new(),
        }
    }

    /// Entry metadata.
    #[must_use]
    pub const fn metadata(&self) -> &FileInfo {
        &self.info
    }

    /// File content; empty for directories.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the entry is a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.info.is_dir()
    }
}

impl From<ArchiveEntry> for Entry {
    fn from(entry: ArchiveEntry) -> Self {
        let (info, data) = entry.into_parts();
        Self { info, data }
    }
}
