//! Cat command implementation.
//!
//! Streams a file's bytes to stdout through a read handle.

use anyhow::{Context, Result, bail};
use statical_vfs::StaticFs;
use std::io::{self, Write};
use std::path::Path;

use super::common::{load_tree, not_found};
use crate::types::ExitCode;

/// Copies the file at `path` into `out`, returning the number of bytes.
///
/// # Errors
///
/// Returns an error if `path` is missing, is a directory, or `out` fails.
pub fn copy_to(tree: &StaticFs, path: &str, out: &mut impl Write) -> Result<u64> {
    let mut handle = tree.open(path)?;
    if handle.is_dir() {
        bail!("{} is a directory", handle.path());
    }
    io::copy(&mut handle, out).context("failed to write file contents")
}

/// Runs the cat command.
pub fn run(archive: &Path, path: &str) -> Result<ExitCode> {
    let tree = load_tree(archive)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match copy_to(&tree, path, &mut out) {
        Ok(_) => {
            out.flush().context("failed to flush stdout")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match e.downcast::<statical_vfs::VfsError>() {
            Ok(vfs_error) => not_found(vfs_error),
            Err(other) => Err(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> StaticFs {
        StaticFs::builder()
            .add_file("/public/hello.txt", "hi")
            .add_file("/bin.dat", vec![0u8, 159, 146, 150])
            .build()
            .unwrap()
    }

    #[test]
    fn test_copy_text() {
        let mut out = Vec::new();
        let copied = copy_to(&tree(), "/public/hello.txt", &mut out).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(out, b"hi");
    }

    #[test]
    fn test_copy_binary() {
        let mut out = Vec::new();
        copy_to(&tree(), "/bin.dat", &mut out).unwrap();
        assert_eq!(out, [0u8, 159, 146, 150]);
    }

    #[test]
    fn test_copy_directory_fails() {
        let mut out = Vec::new();
        let err = copy_to(&tree(), "/public/", &mut out).unwrap_err();
        assert_eq!(err.to_string(), "/public is a directory");
        assert!(out.is_empty());
    }

    #[test]
    fn test_copy_missing() {
        let mut out = Vec::new();
        let err = copy_to(&tree(), "/nope", &mut out).unwrap_err();
        let vfs_error = err.downcast_ref::<statical_vfs::VfsError>().unwrap();
        assert!(vfs_error.is_not_found());
    }
}
