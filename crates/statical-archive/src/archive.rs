//! Decompression of an archive blob into flat entries.
//!
//! # Examples
//!
//! ```
//! use statical_archive::{Archive, PackOptions};
//! # use tempfile::TempDir;
//!
//! # let src = TempDir::new().unwrap();
//! # std::fs::write(src.path().join("hello.txt"), "hi").unwrap();
//! let blob = statical_archive::pack_dir(src.path(), &PackOptions::default())?;
//! let entries = Archive::new(blob).extract()?;
//!
//! assert_eq!(entries["/hello.txt"].data(), b"hi");
//! # Ok::<(), statical_archive::ArchiveError>(())
//! ```

use crate::error::{ArchiveError, Result};
use crate::info::{ArchiveEntry, FileInfo, FlatEntries};
use chrono::{DateTime, NaiveDate, Utc};
use std::borrow::Cow;
use std::io::{Cursor, Read, Seek};
use tracing::{debug, info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

/// A compressed archive blob.
///
/// The blob is either borrowed for the whole process (the usual
/// `include_bytes!` case) or owned.
///
/// # Examples
///
/// ```
/// use statical_archive::Archive;
///
/// let archive = Archive::new(&b"not an archive"[..]);
/// assert_eq!(archive.len(), 14);
///
/// let err = archive.extract().unwrap_err();
/// assert!(err.is_corrupt());
/// ```
#[derive(Debug, Clone)]
pub struct Archive {
    blob: Cow<'static, [u8]>,
}

impl Archive {
    /// Wraps a blob without inspecting it.
    #[must_use]
    pub fn new(blob: impl Into<Cow<'static, [u8]>>) -> Self {
        Self { blob: blob.into() }
    }

    /// Raw blob bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }

    /// Size of the compressed blob in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blob.len()
    }

    /// Whether the blob is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }

    /// Decompresses every record into memory.
    ///
    /// Keys are `"/" + record name`. Directory records have their trailing
    /// slash removed, so a file `a` and a directory `a/` share a key; the
    /// later record wins and a warning is logged. Nothing is kept if any
    /// record fails.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::CorruptArchive`] if the blob cannot be parsed,
    /// or [`ArchiveError::ExtractionFailed`] naming the first record that
    /// fails to decompress.
    pub fn extract(&self) -> Result<FlatEntries> {
        let mut zip = ZipArchive::new(Cursor::new(self.as_bytes()))
            .map_err(|source| ArchiveError::CorruptArchive { source })?;

        let mut entries = FlatEntries::new();
        for index in 0..zip.len() {
            let (key, entry) = read_record(&mut zip, index)?;
            debug!(
                path = %key,
                size = entry.info().size(),
                dir = entry.info().is_dir(),
                "extracted record"
            );
            if let Some(replaced) = entries.insert(key, entry) {
                warn!(
                    name = %replaced.info().name(),
                    dir = replaced.info().is_dir(),
                    "record shadowed by a later record with the same path"
                );
            }
        }

        info!(
            records = entries.len(),
            bytes = self.blob.len(),
            "extracted archive"
        );
        Ok(entries)
    }
}

fn read_record<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    index: usize,
) -> Result<(String, ArchiveEntry)> {
    let listed_name = zip.name_for_index(index).unwrap_or_default().to_string();
    let mut record = zip
        .by_index(index)
        .map_err(|source| ArchiveError::ExtractionFailed {
            name: listed_name,
            source,
        })?;

    let raw_name = record.name().to_string();
    let is_dir = record.is_dir();
    let name = raw_name.trim_end_matches('/');
    let base = name.rsplit('/').next().unwrap_or(name).to_string();
    let modified = record.last_modified().and_then(to_utc);
    let mode = record.unix_mode();

    let mut data = Vec::new();
    if !is_dir {
        record
            .read_to_end(&mut data)
            .map_err(|source| ArchiveError::ExtractionFailed {
                name: raw_name.clone(),
                source: ZipError::Io(source),
            })?;
    }

    let mut info = if is_dir {
        FileInfo::directory(base)
    } else {
        FileInfo::file(base, data.len() as u64)
    };
    if let Some(mode) = mode {
        info = info.with_permissions(mode);
    }
    let info = info.with_modified(modified);

    Ok((format!("/{name}"), ArchiveEntry::new(info, data)))
}

/// Archive timestamps carry no zone; they are read as UTC.
fn to_utc(stamp: zip::DateTime) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(
        i32::from(stamp.year()),
        u32::from(stamp.month()),
        u32::from(stamp.day()),
    )?
    .and_hms_opt(
        u32::from(stamp.hour()),
        u32::from(stamp.minute()),
        u32::from(stamp.second()),
    )
    .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn zip_of(records: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            || SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in records {
            if name.ends_with('/') {
                writer.add_directory(*name, options()).unwrap();
            } else {
                writer.start_file(*name, options()).unwrap();
                writer.write_all(data.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_prefixes_paths_with_root() {
        let blob = zip_of(&[
            ("public/css/app.css", "body{}"),
            ("public/hello.txt", "hi"),
        ]);
        let entries = Archive::new(blob).extract().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries["/public/css/app.css"].data(), b"body{}");
        assert_eq!(entries["/public/hello.txt"].data(), b"hi");
        assert_eq!(entries["/public/hello.txt"].info().name(), "hello.txt");
        assert_eq!(entries["/public/hello.txt"].info().size(), 2);
    }

    #[test]
    fn test_extract_directory_records() {
        let blob = zip_of(&[("assets/", ""), ("assets/empty/", "")]);
        let entries = Archive::new(blob).extract().unwrap();

        let empty = &entries["/assets/empty"];
        assert!(empty.info().is_dir());
        assert_eq!(empty.info().name(), "empty");
        assert_eq!(empty.info().size(), 0);
        assert!(empty.data().is_empty());
    }

    #[test]
    fn test_extract_empty_archive() {
        let blob = zip_of(&[]);
        let entries = Archive::new(blob).extract().unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_extract_garbage_is_corrupt() {
        let err = Archive::new(&b"definitely not a zip"[..])
            .extract()
            .unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_extract_empty_blob_is_corrupt() {
        let archive = Archive::new(Vec::new());
        assert!(archive.is_empty());
        assert!(archive.extract().unwrap_err().is_corrupt());
    }

    #[test]
    fn test_extract_bad_checksum_names_record() {
        let mut blob = zip_of(&[("ok.txt", "fine"), ("broken.txt", "original content")]);
        let needle = b"original content";
        let at = blob
            .windows(needle.len())
            .position(|window| window == needle)
            .unwrap();
        blob[at..at + needle.len()].copy_from_slice(b"tampered content");

        let err = Archive::new(blob).extract().unwrap_err();
        assert!(err.is_extraction_failed());
        assert_eq!(err.record_name(), Some("broken.txt"));
    }

    #[test]
    fn test_extract_ignores_inflated_declared_size() {
        let payload = "x".repeat(37);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .large_file(true);
        writer.start_file("big.bin", options).unwrap();
        writer.write_all(payload.as_bytes()).unwrap();
        let mut blob = writer.finish().unwrap().into_inner();

        // Zip64 extra fields: tag 0x0001, then the uncompressed size.
        let declared = 37u64.to_le_bytes();
        let inflated = (u64::MAX / 2 - 10).to_le_bytes();
        let mut patched = 0;
        for at in 0..blob.len().saturating_sub(12) {
            let is_zip64_tag = blob[at..at + 2] == [0x01, 0x00] && blob[at + 3] == 0;
            if is_zip64_tag && blob[at + 4..at + 12] == declared {
                blob[at + 4..at + 12].copy_from_slice(&inflated);
                patched += 1;
            }
        }
        assert!(patched > 0);

        match Archive::new(blob).extract() {
            Ok(entries) => assert_eq!(entries["/big.bin"].data().len(), payload.len()),
            Err(err) => assert!(err.is_extraction_failed() || err.is_corrupt()),
        }
    }

    #[test]
    fn test_extract_file_and_directory_with_same_path() {
        let blob = zip_of(&[("a", "file"), ("a/", "")]);
        let entries = Archive::new(blob).extract().unwrap();

        assert_eq!(entries.len(), 1);
        assert!(entries["/a"].info().is_dir());
    }

    #[test]
    fn test_to_utc_converts_fields() {
        let stamp = zip::DateTime::from_date_and_time(2023, 7, 14, 9, 30, 12).unwrap();
        let utc = to_utc(stamp).unwrap();
        assert_eq!(utc.to_rfc3339(), "2023-07-14T09:30:12+00:00");
    }
}
