//! Process-wide archive registration.
//!
//! A binary embeds its archive with `include_bytes!` and registers it once
//! during start-up; the file system is built from it later.
//!
//! ```no_run
//! // Usually `include_bytes!("../public.zip")`.
//! let blob = std::fs::read("public.zip").expect("archive on disk");
//!
//! statical_archive::register(blob)?;
//! let entries = statical_archive::build()?;
//! # Ok::<(), statical_archive::ArchiveError>(())
//! ```

use crate::archive::Archive;
use crate::error::{ArchiveError, Result};
use crate::info::FlatEntries;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::{info, warn};

static REGISTERED: OnceLock<Archive> = OnceLock::new();

/// Registers the process-wide archive blob.
///
/// # Errors
///
/// Returns [`ArchiveError::AlreadyRegistered`] if a blob was registered
/// before; the earlier blob is kept.
pub fn register(blob: impl Into<Cow<'static, [u8]>>) -> Result<()> {
    let archive = Archive::new(blob);
    let bytes = archive.len();

    REGISTERED.set(archive).map_err(|_| {
        warn!(bytes, "archive already registered, ignoring");
        ArchiveError::AlreadyRegistered
    })?;

    info!(bytes, "registered archive");
    Ok(())
}

/// Returns the registered archive, if any.
#[must_use]
pub fn registered() -> Option<&'static Archive> {
    REGISTERED.get()
}

/// Whether an archive has been registered.
#[must_use]
pub fn is_registered() -> bool {
    REGISTERED.get().is_some()
}

/// Extracts the registered archive.
///
/// Each call decompresses the blob again and returns fresh entries.
///
/// # Errors
///
/// Returns [`ArchiveError::NotConfigured`] if nothing was registered, or any
/// error from [`Archive::extract`].
pub fn build() -> Result<FlatEntries> {
    registered().ok_or(ArchiveError::NotConfigured)?.extract()
}
