//! Builder pattern for constructing the static file tree.
//!
//! Entries are collected first and the tree is assembled in one pass on
//! [`StaticFsBuilder::build`]: missing ancestor directories are synthesized,
//! then every directory's children are indexed and sorted.
//!
//! # Examples
//!
//! ```
//! use statical_vfs::StaticFsBuilder;
//!
//! let fs = StaticFsBuilder::new()
//!     .add_file("/public/css/app.css", "body{}")
//!     .add_file("/public/hello.txt", "hi")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fs.file_count(), 2);
//! assert_eq!(fs.children("/public"), ["css", "hello.txt"]);
//! ```

use crate::types::{Entry, EntryPath, Result, VfsError};
use crate::vfs::StaticFs;
use statical_archive::{ArchiveEntry, FlatEntries};
use std::collections::HashMap;
use tracing::{debug, info};

/// Builder for a [`StaticFs`].
///
/// Invalid paths are collected while adding and reported by `build()`, so
/// calls can be chained without checking each one.
///
/// # Examples
///
/// ```
/// use statical_vfs::StaticFsBuilder;
///
/// let result = StaticFsBuilder::new()
///     .add_file("/ok.txt", "fine")
///     .add_file("relative.txt", "rejected")
///     .build();
///
/// assert!(result.unwrap_err().is_invalid_path());
/// ```
#[derive(Debug, Default)]
pub struct StaticFsBuilder {
    entries: HashMap<EntryPath, Entry>,
    errors: Vec<VfsError>,
}

impl StaticFsBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with extracted archive entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_archive::{ArchiveEntry, FlatEntries};
    /// use statical_vfs::StaticFsBuilder;
    ///
    /// let mut flat = FlatEntries::new();
    /// flat.insert(
    ///     "/docs/readme.md".to_string(),
    ///     ArchiveEntry::file("readme.md", b"# hi".to_vec()),
    /// );
    ///
    /// let fs = StaticFsBuilder::from_flat_entries(flat).build().unwrap();
    /// assert!(fs.exists("/docs"));
    /// ```
    #[must_use]
    pub fn from_flat_entries(flat: FlatEntries) -> Self {
        flat.into_iter()
            .fold(Self::new(), |builder, (path, entry)| builder.add_entry(path, entry))
    }

    /// Adds a regular file with default metadata.
    ///
    /// Adding the same path twice keeps the later entry.
    #[must_use]
    pub fn add_file(self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        let entry = Entry::file(base_name_of(&path), content);
        self.insert(path, entry)
    }

    /// Adds an explicit directory with default metadata.
    #[must_use]
    pub fn add_dir(self, path: impl Into<String>) -> Self {
        let path = path.into();
        let entry = Entry::directory(base_name_of(&path));
        self.insert(path, entry)
    }

    /// Adds an extracted archive entry, keeping its metadata as recorded.
    #[must_use]
    pub fn add_entry(self, path: impl Into<String>, entry: ArchiveEntry) -> Self {
        self.insert(path.into(), Entry::from(entry))
    }

    /// Number of entries added so far, directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(mut self, path: String, entry: Entry) -> Self {
        match EntryPath::new(path) {
            Ok(path) => {
                self.entries.insert(path, entry);
            }
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Assembles the tree.
    ///
    /// # Errors
    ///
    /// Returns the first invalid path that was added, or
    /// `VfsError::NotADirectory` if a regular file would need children.
    /// Nothing is returned on failure; construction is all-or-nothing.
    pub fn build(self) -> Result<StaticFs> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        let mut entries = self.entries;
        let listed: Vec<EntryPath> = entries.keys().cloned().collect();

        let root = entries
            .entry(EntryPath::root())
            .or_insert_with(|| Entry::directory("/"));
        if !root.is_dir() {
            return Err(VfsError::NotADirectory {
                path: "/".to_string(),
            });
        }

        let mut synthesized = 0;
        for path in &listed {
            synthesized += synthesize_ancestors(&mut entries, path)?;
        }

        let mut children: HashMap<EntryPath, Vec<String>> = HashMap::new();
        for path in entries.keys() {
            if let Some(parent) = path.parent() {
                children
                    .entry(parent)
                    .or_default()
                    .push(path.base_name().to_string());
            }
        }
        for names in children.values_mut() {
            names.sort_unstable();
        }

        let fs = StaticFs::from_parts(entries, children);
        info!(
            entries = fs.len(),
            files = fs.file_count(),
            dirs = fs.dir_count(),
            synthesized,
            "built static file tree"
        );
        Ok(fs)
    }
}

/// Inserts every missing ancestor of `path`, stopping at the first one that
/// already exists. Returns how many directories were created.
fn synthesize_ancestors(
    entries: &mut HashMap<EntryPath, Entry>,
    path: &EntryPath,
) -> Result<usize> {
    let mut created = 0;
    let mut current = path.parent();

    while let Some(dir) = current {
        match entries.get(&dir) {
            Some(existing) if existing.is_dir() => break,
            Some(_) => {
                return Err(VfsError::NotADirectory {
                    path: dir.to_string(),
                });
            }
            None => {
                debug!(path = %dir, "synthesized directory");
                current = dir.parent();
                entries.insert(dir.clone(), Entry::directory(dir.base_name()));
                created += 1;
            }
        }
    }

    Ok(created)
}

fn base_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
