//! Open handles on entries of a [`StaticFs`].
//!
//! A handle borrows the tree and owns only its position: the byte offset of
//! a file or the cursor of a directory listing. Any number of handles may be
//! open on the same entry without affecting one another.

use crate::types::{Entry, EntryPath, Result, VfsError};
use crate::vfs::StaticFs;
use statical_archive::FileInfo;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

#[derive(Debug)]
enum State<'a> {
    File(Cursor<&'a [u8]>),
    Dir { position: usize },
}

/// An open file or directory.
///
/// File handles implement [`Read`] and [`Seek`] over the archived bytes.
/// Directory handles read as empty and are enumerated with
/// [`Handle::read_dir`].
///
/// # Examples
///
/// ```
/// use statical_vfs::StaticFs;
/// use std::io::{Read, Seek, SeekFrom};
///
/// let fs = StaticFs::builder().add_file("/a.txt", "hello").build().unwrap();
///
/// let mut handle = fs.open("/a.txt").unwrap();
/// handle.seek(SeekFrom::Start(1)).unwrap();
///
/// let mut rest = String::new();
/// handle.read_to_string(&mut rest).unwrap();
/// assert_eq!(rest, "ello");
/// ```
#[derive(Debug)]
pub struct Handle<'a> {
    fs: &'a StaticFs,
    path: &'a EntryPath,
    entry: &'a Entry,
    state: State<'a>,
}

impl<'a> Handle<'a> {
    pub(crate) fn new(fs: &'a StaticFs, path: &'a EntryPath, entry: &'a Entry) -> Self {
        let state = if entry.is_dir() {
            State::Dir { position: 0 }
        } else {
            State::File(Cursor::new(entry.data()))
        };
        Self {
            fs,
            path,
            entry,
            state,
        }
    }

    /// Path of the opened entry, normalized.
    #[must_use]
    pub const fn path(&self) -> &'a EntryPath {
        self.path
    }

    /// Returns `true` if the handle refers to a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    /// Metadata of the opened entry.
    #[must_use]
    pub const fn stat(&self) -> &'a FileInfo {
        self.entry.metadata()
    }

    /// Lists the next children of a directory, in sorted order.
    ///
    /// With `count > 0` at most `count` entries are returned and the cursor
    /// advances past them; once the listing is exhausted the call fails with
    /// [`VfsError::EndOfDirectory`]. With `count <= 0` every remaining entry
    /// is returned (possibly none) and no error is raised.
    ///
    /// Handles on regular files always return an empty listing.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::EndOfDirectory` when `count > 0` and the cursor is
    /// already at the end.
    ///
    /// # Panics
    ///
    /// Panics if the directory index names a child that does not exist,
    /// which only happens if the tree is corrupted.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_vfs::StaticFs;
    ///
    /// let fs = StaticFs::builder()
    ///     .add_file("/d/a", "")
    ///     .add_file("/d/b", "")
    ///     .add_file("/d/c", "")
    ///     .build()
    ///     .unwrap();
    ///
    /// let mut dir = fs.open("/d").unwrap();
    /// assert_eq!(dir.read_dir(2).unwrap().len(), 2);
    /// assert_eq!(dir.read_dir(2).unwrap()[0].name(), "c");
    /// assert!(dir.read_dir(2).unwrap_err().is_end_of_directory());
    /// ```
    pub fn read_dir(&mut self, count: isize) -> Result<Vec<&'a FileInfo>> {
        let fs = self.fs;
        let path = self.path;
        let State::Dir { position } = &mut self.state else {
            return Ok(Vec::new());
        };

        let names = fs.children(path.as_str());
        if count > 0 && *position >= names.len() {
            return Err(VfsError::EndOfDirectory);
        }

        let end = if count > 0 {
            position.saturating_add(count.unsigned_abs()).min(names.len())
        } else {
            names.len()
        };

        let listing = names[*position..end]
            .iter()
            .map(|name| fs.child(path, name).metadata())
            .collect();
        *position = end;
        Ok(listing)
    }

    /// Closes the handle.
    ///
    /// Nothing is released beyond the borrow of the tree, so this is
    /// equivalent to dropping the handle.
    #[allow(clippy::unused_self)]
    pub fn close(self) {}
}

impl Read for Handle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.state {
            State::File(cursor) => cursor.read(buf),
            State::Dir { .. } => Ok(0),
        }
    }
}

impl Seek for Handle<'_> {
    /// Moves the read offset of a file.
    ///
    /// Directories accept any seek and stay at offset 0.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.state {
            State::File(cursor) => cursor.seek(pos),
            State::Dir { .. } => Ok(0),
        }
    }
}
