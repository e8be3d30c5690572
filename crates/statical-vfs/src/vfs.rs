//! The static file tree.
//!
//! Provides an in-memory, read-only filesystem built from an embedded
//! archive. Entries are stored in a `HashMap` for O(1) lookup and every
//! directory carries a pre-sorted list of its children's base names.
//!
//! # Examples
//!
//! ```
//! use statical_vfs::StaticFs;
//! use std::io::Read;
//!
//! let fs = StaticFs::builder()
//!     .add_file("/public/hello.txt", "hi")
//!     .build()
//!     .unwrap();
//!
//! let mut content = String::new();
//! fs.open("/public/hello.txt")
//!     .unwrap()
//!     .read_to_string(&mut content)
//!     .unwrap();
//! assert_eq!(content, "hi");
//! ```

use crate::builder::StaticFsBuilder;
use crate::handle::Handle;
use crate::types::{Entry, EntryPath, Result, VfsError};
use statical_archive::{Archive, FileInfo, FlatEntries};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Serializes construction from the process-wide archive.
static BUILD_LOCK: Mutex<()> = Mutex::new(());

/// A read-only tree of files and directories held entirely in memory.
///
/// The tree is never mutated after construction. Any number of threads may
/// open [`Handle`]s on it at once; each handle keeps its own read offset or
/// directory cursor.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, making it safe to use across threads.
///
/// # Examples
///
/// ```
/// use statical_vfs::StaticFs;
///
/// let fs = StaticFs::builder()
///     .add_file("/public/css/app.css", "body{}")
///     .build()
///     .unwrap();
///
/// assert!(fs.exists("/public/css"));
/// assert_eq!(fs.file_count(), 1);
/// assert_eq!(fs.dir_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct StaticFs {
    entries: HashMap<EntryPath, Entry>,
    children: HashMap<EntryPath, Vec<String>>,
}

impl StaticFs {
    /// Builds a tree from the archive registered with
    /// [`statical_archive::register`].
    ///
    /// Concurrent calls are serialized. Every call extracts the archive
    /// afresh and returns an independent tree.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::Archive` if no archive is registered or it cannot
    /// be extracted, or any error [`StaticFsBuilder::build`] reports.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use statical_vfs::StaticFs;
    ///
    /// statical_archive::register(std::fs::read("assets.zip")?)?;
    /// let fs = StaticFs::new()?;
    /// assert!(fs.exists("/"));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new() -> Result<Self> {
        let _guard = BUILD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        Self::from_flat_entries(statical_archive::build()?)
    }

    /// Builds a tree from an explicit archive, bypassing registration.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::Archive` if extraction fails, or any error
    /// [`StaticFsBuilder::build`] reports.
    pub fn from_archive(archive: &Archive) -> Result<Self> {
        Self::from_flat_entries(archive.extract()?)
    }

    /// Builds a tree from already extracted entries.
    ///
    /// # Errors
    ///
    /// See [`StaticFsBuilder::build`].
    pub fn from_flat_entries(flat: FlatEntries) -> Result<Self> {
        StaticFsBuilder::from_flat_entries(flat).build()
    }

    /// Starts an empty [`StaticFsBuilder`].
    #[must_use]
    pub fn builder() -> StaticFsBuilder {
        StaticFsBuilder::new()
    }

    pub(crate) const fn from_parts(
        entries: HashMap<EntryPath, Entry>,
        children: HashMap<EntryPath, Vec<String>>,
    ) -> Self {
        Self { entries, children }
    }

    /// Opens the entry at `path`.
    ///
    /// Runs of `/` are collapsed, so `/public//hello.txt` resolves like
    /// `/public/hello.txt`. A trailing slash is accepted on directories only.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotFound` if nothing lives at `path`, including
    /// relative paths and file paths ending in `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_vfs::StaticFs;
    ///
    /// let fs = StaticFs::builder().add_file("/a.txt", "x").build().unwrap();
    ///
    /// assert!(fs.open("//a.txt").is_ok());
    /// assert!(fs.open("/b.txt").unwrap_err().is_not_found());
    /// ```
    pub fn open(&self, path: &str) -> Result<Handle<'_>> {
        let (path, entry) = self.lookup(path)?;
        Ok(Handle::new(self, path, entry))
    }

    /// Returns the metadata of the entry at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`StaticFs::open`].
    pub fn stat(&self, path: &str) -> Result<&FileInfo> {
        self.lookup(path).map(|(_, entry)| entry.metadata())
    }

    /// Returns `true` if an entry exists at `path`.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.lookup(path).is_ok()
    }

    /// Returns the whole content of the file at `path`.
    ///
    /// Directories have no content and yield an empty slice.
    ///
    /// # Errors
    ///
    /// Same as [`StaticFs::open`].
    pub fn read_file(&self, path: &str) -> Result<&[u8]> {
        self.lookup(path).map(|(_, entry)| entry.data())
    }

    /// Returns the entry stored at exactly `path`, without normalization.
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<&Entry> {
        self.entries.get(path)
    }

    /// Sorted base names of the children of directory `dir`.
    ///
    /// Empty for regular files, empty directories and unknown paths.
    #[must_use]
    pub fn children(&self, dir: &str) -> &[String] {
        self.children
            .get(&*EntryPath::normalize(dir))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates over every entry in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&EntryPath, &Entry)> {
        self.entries.iter()
    }

    /// Every path in the tree, sorted.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&EntryPath> {
        let mut paths: Vec<_> = self.entries.keys().collect();
        paths.sort();
        paths
    }

    /// Total number of entries, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree holds no entries at all.
    ///
    /// A built tree always contains the root, so this is `false` for
    /// anything returned by the constructors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of regular files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.values().filter(|entry| !entry.is_dir()).count()
    }

    /// Number of directories, root included.
    #[must_use]
    pub fn dir_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.is_dir()).count()
    }

    /// Resolves a child named in the directory index.
    ///
    /// # Panics
    ///
    /// Panics if the child is missing. The index is built from the entry
    /// map itself, so a miss means the tree is corrupted.
    pub(crate) fn child(&self, dir: &EntryPath, name: &str) -> &Entry {
        let path = dir.join(name);
        self.entries.get(&path).unwrap_or_else(|| {
            panic!("directory index of {dir} names {name:?} but {path} is missing")
        })
    }

    fn lookup(&self, path: &str) -> Result<(&EntryPath, &Entry)> {
        let not_found = || VfsError::NotFound {
            path: path.to_string(),
        };
        if !path.starts_with('/') {
            return Err(not_found());
        }

        let (key, entry) = self
            .entries
            .get_key_value(&*EntryPath::normalize(path))
            .ok_or_else(not_found)?;
        // A trailing slash only names directories.
        if path.ends_with('/') && !entry.is_dir() {
            return Err(not_found());
        }
        Ok((key, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn sample() -> StaticFs {
        StaticFs::builder()
            .add_file("/public/css/app.css", "body{}")
            .add_file("/public/hello.txt", "hi")
            .build()
            .unwrap()
    }

    #[test]
    fn test_open_file() {
        let fs = sample();
        let mut handle = fs.open("/public/hello.txt").unwrap();
        let mut content = String::new();
        handle.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hi");
    }

    #[test]
    fn test_open_collapses_slashes() {
        let fs = sample();
        let handle = fs.open("//public///hello.txt").unwrap();
        assert_eq!(handle.path().as_str(), "/public/hello.txt");
        assert_eq!(fs.open("/public/").unwrap().path().as_str(), "/public");
    }

    #[test]
    fn test_open_not_found() {
        let fs = sample();
        let err = fs.open("/nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_open_relative_path() {
        let fs = sample();
        assert!(fs.open("public/hello.txt").unwrap_err().is_not_found());
        assert!(fs.open("").unwrap_err().is_not_found());

        let err: std::io::Error = fs.open("public").unwrap_err().into();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_trailing_slash_on_file() {
        let fs = sample();
        assert!(fs.open("/public/hello.txt/").unwrap_err().is_not_found());
        assert!(fs.open("/public//hello.txt//").unwrap_err().is_not_found());
        assert!(fs.stat("/public/hello.txt/").unwrap_err().is_not_found());
        assert!(fs.open("/public/css/").unwrap().is_dir());
    }

    #[test]
    fn test_open_dot_segments_are_not_interpreted() {
        let fs = sample();
        assert!(fs.open("/public/css/../hello.txt").unwrap_err().is_not_found());
        assert!(fs.open("/public/./hello.txt").unwrap_err().is_not_found());
    }

    #[test]
    fn test_stat() {
        let fs = sample();
        let info = fs.stat("/public/hello.txt").unwrap();
        assert_eq!(info.name(), "hello.txt");
        assert_eq!(info.size(), 2);
        assert!(!info.is_dir());

        assert!(fs.stat("/public").unwrap().is_dir());
        assert_eq!(fs.stat("/").unwrap().name(), "/");
    }

    #[test]
    fn test_exists() {
        let fs = sample();
        assert!(fs.exists("/"));
        assert!(fs.exists("/public/css/app.css"));
        assert!(!fs.exists("/public/js"));
        assert!(!fs.exists("relative"));
    }

    #[test]
    fn test_read_file() {
        let fs = sample();
        assert_eq!(fs.read_file("/public/css/app.css").unwrap(), b"body{}");
        assert!(fs.read_file("/public").unwrap().is_empty());
    }

    #[test]
    fn test_entry_is_exact() {
        let fs = sample();
        assert!(fs.entry("/public/hello.txt").is_some());
        assert!(fs.entry("/public//hello.txt").is_none());
    }

    #[test]
    fn test_children() {
        let fs = sample();
        assert_eq!(fs.children("/"), ["public"]);
        assert_eq!(fs.children("/public"), ["css", "hello.txt"]);
        assert_eq!(fs.children("/public/"), ["css", "hello.txt"]);
        assert!(fs.children("/public/hello.txt").is_empty());
        assert!(fs.children("/missing").is_empty());
    }

    #[test]
    fn test_counts() {
        let fs = sample();
        assert_eq!(fs.len(), 5);
        assert!(!fs.is_empty());
        assert_eq!(fs.file_count(), 2);
        assert_eq!(fs.dir_count(), 3);
        assert_eq!(fs.entries().count(), fs.len());
    }

    #[test]
    fn test_all_paths_sorted() {
        let fs = sample();
        let paths: Vec<&str> = fs.all_paths().into_iter().map(EntryPath::as_str).collect();
        assert_eq!(
            paths,
            [
                "/",
                "/public",
                "/public/css",
                "/public/css/app.css",
                "/public/hello.txt"
            ]
        );
    }

    #[test]
    fn test_parent_invariant() {
        let fs = sample();
        for (path, _) in fs.entries() {
            if let Some(parent) = path.parent() {
                let parent = fs.entry(parent.as_str()).unwrap();
                assert!(parent.is_dir(), "parent of {path} must be a directory");
            }
        }
    }

    #[test]
    fn test_child_resolves() {
        let fs = sample();
        let public = EntryPath::new("/public").unwrap();
        assert_eq!(fs.child(&public, "hello.txt").data(), b"hi");
    }

    #[test]
    #[should_panic(expected = "directory index of /public names \"ghost\"")]
    fn test_child_missing_panics() {
        let fs = sample();
        let public = EntryPath::new("/public").unwrap();
        let _ = fs.child(&public, "ghost");
    }

    #[test]
    fn test_from_archive_corrupt() {
        let err = StaticFs::from_archive(&Archive::new(&b"not a zip"[..])).unwrap_err();
        assert!(matches!(err, VfsError::Archive(ref e) if e.is_corrupt()));
    }

    #[test]
    fn test_static_fs_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<StaticFs>();
        assert_sync::<StaticFs>();
    }
}
