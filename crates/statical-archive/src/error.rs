//! Error types for archive registration, extraction and packing.
//!
//! # Examples
//!
//! ```
//! use statical_archive::ArchiveError;
//!
//! let error = ArchiveError::NotConfigured;
//! assert!(error.is_not_configured());
//! assert_eq!(error.to_string(), "statical: no archive registered");
//! ```

use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while registering, extracting or packing an archive.
///
/// Extraction errors are fatal to start-up: the blob is compiled into the
/// binary, so retrying cannot succeed and the only fix is a new archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// `build()` was called before any archive was registered.
    #[error("statical: no archive registered")]
    NotConfigured,

    /// `register()` was called a second time.
    ///
    /// The first registered blob stays in place.
    #[error("statical: an archive is already registered")]
    AlreadyRegistered,

    /// The blob is not a structurally valid archive.
    #[error("statical: corrupt archive")]
    CorruptArchive {
        /// Underlying parse failure
        #[source]
        source: ZipError,
    },

    /// A single record could not be decompressed.
    #[error("statical: error extracting {name:?}")]
    ExtractionFailed {
        /// Name of the offending record, as stored in the archive
        name: String,
        /// Underlying decompression failure
        #[source]
        source: ZipError,
    },

    /// Reading the source tree failed while packing.
    #[error("I/O error at {}", path.display())]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed while packing.
    #[error("failed to walk source directory")]
    Walk(#[from] walkdir::Error),

    /// A record could not be written while packing.
    #[error("failed to write record {name:?}")]
    Write {
        /// Name of the record being written
        name: String,
        /// Underlying writer failure
        #[source]
        source: ZipError,
    },

    /// The archive's central directory could not be written.
    #[error("failed to finalize archive")]
    Finalize(#[source] ZipError),
}

impl ArchiveError {
    /// Returns `true` if no archive was registered.
    #[must_use]
    pub const fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }

    /// Returns `true` if the blob failed to parse.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptArchive { .. })
    }

    /// Returns `true` if a single record failed to decompress.
    ///
    /// # Examples
    ///
    /// ```
    /// use statical_archive::ArchiveError;
    /// use zip::result::ZipError;
    ///
    /// let error = ArchiveError::ExtractionFailed {
    ///     name: "public/app.js".to_string(),
    ///     source: ZipError::FileNotFound,
    /// };
    ///
    /// assert!(error.is_extraction_failed());
    /// assert_eq!(error.record_name(), Some("public/app.js"));
    /// ```
    #[must_use]
    pub const fn is_extraction_failed(&self) -> bool {
        matches!(self, Self::ExtractionFailed { .. })
    }

    /// Returns the record name carried by the error, if any.
    #[must_use]
    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::ExtractionFailed { name, .. } | Self::Write { name, .. } => Some(name),
            _ => None,
        }
    }
}
