//! Abstractions a serving layer programs against.
//!
//! [`FileSystem`] opens paths and [`File`] reads, seeks and lists what was
//! opened. [`StaticFs`] and its [`Handle`] implement them, so code written
//! against the traits can serve from any other implementation as well.
//! Mapping URLs to paths, falling back to index documents and translating
//! errors into status codes stay with the caller.
//!
//! # Examples
//!
//! ```
//! use statical_vfs::{FileSystem, StaticFs, read_dir_paged};
//!
//! let fs = StaticFs::builder()
//!     .add_file("/public/css/app.css", "body{}")
//!     .add_file("/public/hello.txt", "hi")
//!     .build()
//!     .unwrap();
//!
//! let listing = read_dir_paged(&fs, "/public", 1).unwrap();
//! let names: Vec<_> = listing.iter().map(|info| info.name()).collect();
//! assert_eq!(names, ["css", "hello.txt"]);
//! ```

use crate::handle::Handle;
use crate::types::{Result, VfsError};
use crate::vfs::StaticFs;
use statical_archive::FileInfo;
use std::io::{Read, Seek};

/// An opened entry.
pub trait File: Read + Seek {
    /// Metadata of the opened entry.
    fn stat(&self) -> &FileInfo;

    /// Lists the next `count` children, or all remaining ones when
    /// `count <= 0`.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::EndOfDirectory` when `count > 0` and nothing is
    /// left to list.
    fn read_dir(&mut self, count: isize) -> Result<Vec<FileInfo>>;

    /// Releases the entry.
    ///
    /// # Errors
    ///
    /// Implementations backed by real resources may fail to release them.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Something that can open paths.
pub trait FileSystem {
    /// Handle type returned by [`FileSystem::open`].
    type File<'a>: File
    where
        Self: 'a;

    /// Opens the entry at `path`.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotFound` if nothing lives at `path`.
    fn open(&self, path: &str) -> Result<Self::File<'_>>;
}

impl File for Handle<'_> {
    fn stat(&self) -> &FileInfo {
        Handle::stat(self)
    }

    fn read_dir(&mut self, count: isize) -> Result<Vec<FileInfo>> {
        Handle::read_dir(self, count).map(|listing| listing.into_iter().cloned().collect())
    }

    fn close(self) -> Result<()> {
        Handle::close(self);
        Ok(())
    }
}

impl FileSystem for StaticFs {
    type File<'a> = Handle<'a>;

    fn open(&self, path: &str) -> Result<Handle<'_>> {
        Self::open(self, path)
    }
}

/// Lists a whole directory by reading it `page` entries at a time until
/// the end-of-directory sentinel.
///
/// A `page` of zero or less reads everything in one call.
///
/// # Errors
///
/// Returns any error from opening `dir` or reading it, other than the
/// end-of-directory sentinel.
pub fn read_dir_paged<F: FileSystem>(fs: &F, dir: &str, page: isize) -> Result<Vec<FileInfo>> {
    let mut handle = fs.open(dir)?;
    let mut listing = Vec::new();

    loop {
        match handle.read_dir(page) {
            Ok(batch) => {
                let done = page <= 0 || batch.is_empty();
                listing.extend(batch);
                if done {
                    break;
                }
            }
            Err(VfsError::EndOfDirectory) => break,
            Err(e) => return Err(e),
        }
    }

    handle.close()?;
    Ok(listing)
}
