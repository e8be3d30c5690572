//! Read-only virtual filesystem over an embedded static-file archive.
//!
//! An archive extracted by `statical-archive` is turned into an immutable
//! in-memory tree. Directories missing from the archive are synthesized,
//! every directory lists its children in sorted order and any number of
//! handles can read, seek and page through the tree concurrently.
//!
//! # Examples
//!
//! ```
//! use statical_archive::{Archive, PackOptions};
//! use statical_vfs::StaticFs;
//! use std::io::Read;
//! # use tempfile::TempDir;
//!
//! # let src = TempDir::new().unwrap();
//! # std::fs::create_dir_all(src.path().join("public/css")).unwrap();
//! # std::fs::write(src.path().join("public/css/app.css"), "body{}").unwrap();
//! # std::fs::write(src.path().join("public/hello.txt"), "hi").unwrap();
//! let blob = statical_archive::pack_dir(src.path(), &PackOptions::default())?;
//! let fs = StaticFs::from_archive(&Archive::new(blob))?;
//!
//! let mut hello = String::new();
//! fs.open("/public/hello.txt")?.read_to_string(&mut hello)?;
//! assert_eq!(hello, "hi");
//!
//! let mut public = fs.open("/public")?;
//! let names: Vec<_> = public.read_dir(0)?.iter().map(|info| info.name()).collect();
//! assert_eq!(names, ["css", "hello.txt"]);
//!
//! assert!(fs.open("/nope").unwrap_err().is_not_found());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod handle;
pub mod serve;
pub mod types;
pub mod vfs;

pub use builder::StaticFsBuilder;
pub use handle::Handle;
pub use serve::{File, FileSystem, read_dir_paged};
pub use statical_archive::FileInfo;
pub use types::{Entry, EntryPath, Result, VfsError};
pub use vfs::StaticFs;
