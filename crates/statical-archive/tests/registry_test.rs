//! Integration tests for process-wide archive registration.
//!
//! Registration is global, so everything that registers lives in a single
//! test and runs in order.

use statical_archive::{ArchiveError, PackOptions};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_register_then_build() {
    let src = TempDir::new().unwrap();
    fs::create_dir_all(src.path().join("public/css")).unwrap();
    fs::write(src.path().join("public/css/app.css"), "body{}").unwrap();
    fs::write(src.path().join("public/hello.txt"), "hi").unwrap();

    let blob = statical_archive::pack_dir(src.path(), &PackOptions::default()).unwrap();
    let size = blob.len();

    assert!(!statical_archive::is_registered());
    statical_archive::register(blob).unwrap();
    assert!(statical_archive::is_registered());
    assert_eq!(statical_archive::registered().unwrap().len(), size);

    // Second registration is refused and the first blob stays
    let err = statical_archive::register(&b"other"[..]).unwrap_err();
    assert!(matches!(err, ArchiveError::AlreadyRegistered));
    assert_eq!(statical_archive::registered().unwrap().len(), size);

    let entries = statical_archive::build().unwrap();
    assert_eq!(entries["/public/hello.txt"].data(), b"hi");
    assert_eq!(entries["/public/css/app.css"].data(), b"body{}");

    // Every build extracts afresh
    let again = statical_archive::build().unwrap();
    assert_eq!(entries, again);
}
