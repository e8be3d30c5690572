//! Embedded static-file archives.
//!
//! A directory tree is packed into a single compressed blob, embedded in a
//! binary, registered once at start-up and extracted into a flat mapping of
//! absolute path to content and metadata. The mapping feeds
//! `statical-vfs`, which turns it into a browsable read-only file system.
//!
//! # Examples
//!
//! ```
//! use statical_archive::{Archive, PackOptions};
//! # use tempfile::TempDir;
//!
//! # let src = TempDir::new().unwrap();
//! # std::fs::create_dir_all(src.path().join("public/css")).unwrap();
//! # std::fs::write(src.path().join("public/css/app.css"), "body{}").unwrap();
//! # std::fs::write(src.path().join("public/hello.txt"), "hi").unwrap();
//! let blob = statical_archive::pack_dir(src.path(), &PackOptions::default())?;
//! let entries = Archive::new(blob).extract()?;
//!
//! assert_eq!(entries["/public/hello.txt"].data(), b"hi");
//! assert_eq!(entries["/public/css/app.css"].info().name(), "app.css");
//! # Ok::<(), statical_archive::ArchiveError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod archive;
pub mod error;
pub mod info;
pub mod pack;
pub mod registry;

pub use archive::Archive;
pub use error::{ArchiveError, Result};
pub use info::{
    ArchiveEntry, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, FileInfo, FlatEntries, MODE_DIR, MODE_FILE,
};
pub use pack::{Compression, PackOptions, pack_dir, pack_dir_to_file};
pub use registry::{build, is_registered, register, registered};
