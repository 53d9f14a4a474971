//! Resource providers over a native-library bundle.
//!
//! A bundle is a zip archive carrying platform-specific shared libraries
//! under logical paths of the form `/<namespace>/native/<folder>/<file>`.
//! Two providers expose the same entries through genuinely different
//! lookup paths so that verification can cross-check whether a discrepancy
//! is an artefact of one particular access mechanism:
//!
//! - [`BundleResourceProvider`] resolves entries by name through the
//!   archive's central directory, the way a packaging runtime's
//!   resource-lookup API does.
//! - [`RawArchiveEntryProvider`] scans the entry table by index and reads
//!   the matching entry directly.
//!
//! Every open re-opens the bundle file, so repeated reads are fully
//! independent of one another.

use crate::error::{Result, StageError};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{Cursor, Read};
use zip::ZipArchive;
use zip::result::ZipError;

/// Anything that can produce a readable byte stream for a logical
/// resource path.
pub trait ResourceProvider {
    /// Whether a resource exists at `path`.
    fn has_resource(&self, path: &str) -> bool;

    /// Open the resource at `path` for reading from the start.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::ResourceNotFound`] if no entry matches
    /// `path`, or [`StageError::Archive`] / [`StageError::Io`] if the
    /// bundle cannot be opened or read.
    fn open_resource(&self, path: &str) -> Result<Box<dyn Read>>;

    /// A short human-readable name for the access mechanism, used in
    /// verification reports.
    fn mechanism(&self) -> &'static str;
}

/// Strip the leading `/` of a logical resource path to obtain the
/// archive entry name.
fn entry_name(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Name-keyed resource lookup through the archive central directory.
#[derive(Debug, Clone)]
pub struct BundleResourceProvider {
    bundle_path: Utf8PathBuf,
}

impl BundleResourceProvider {
    /// Create a provider over the bundle at `bundle_path`.
    #[must_use]
    pub fn new(bundle_path: &Utf8Path) -> Self {
        Self {
            bundle_path: bundle_path.to_owned(),
        }
    }

    fn open_archive(&self) -> Result<ZipArchive<File>> {
        let file = File::open(&self.bundle_path)?;
        Ok(ZipArchive::new(file)?)
    }
}

impl ResourceProvider for BundleResourceProvider {
    fn has_resource(&self, path: &str) -> bool {
        let Ok(mut archive) = self.open_archive() else {
            return false;
        };
        archive.by_name(entry_name(path)).is_ok()
    }

    fn open_resource(&self, path: &str) -> Result<Box<dyn Read>> {
        let mut archive = self.open_archive()?;
        let mut entry = match archive.by_name(entry_name(path)) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(StageError::ResourceNotFound {
                    path: path.to_owned(),
                });
            }
            Err(other) => return Err(StageError::Archive(other)),
        };
        let mut contents = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut contents)?;
        Ok(Box::new(Cursor::new(contents)))
    }

    fn mechanism(&self) -> &'static str {
        "bundle resource lookup"
    }
}

/// Index-scanning entry access that bypasses name-keyed lookup.
#[derive(Debug, Clone)]
pub struct RawArchiveEntryProvider {
    bundle_path: Utf8PathBuf,
}

impl RawArchiveEntryProvider {
    /// Create a provider over the bundle at `bundle_path`.
    #[must_use]
    pub fn new(bundle_path: &Utf8Path) -> Self {
        Self {
            bundle_path: bundle_path.to_owned(),
        }
    }

    fn open_archive(&self) -> Result<ZipArchive<File>> {
        let file = File::open(&self.bundle_path)?;
        Ok(ZipArchive::new(file)?)
    }

    /// Walk the entry table in index order and return the index of the
    /// entry whose name matches.
    fn entry_index(archive: &ZipArchive<File>, name: &str) -> Option<usize> {
        (0..archive.len()).find(|&index| archive.name_for_index(index) == Some(name))
    }
}

impl ResourceProvider for RawArchiveEntryProvider {
    fn has_resource(&self, path: &str) -> bool {
        let Ok(archive) = self.open_archive() else {
            return false;
        };
        Self::entry_index(&archive, entry_name(path)).is_some()
    }

    fn open_resource(&self, path: &str) -> Result<Box<dyn Read>> {
        let mut archive = self.open_archive()?;
        let index = Self::entry_index(&archive, entry_name(path)).ok_or_else(|| {
            StageError::ResourceNotFound {
                path: path.to_owned(),
            }
        })?;
        let mut entry = archive.by_index(index)?;
        let mut contents = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut contents)?;
        Ok(Box::new(Cursor::new(contents)))
    }

    fn mechanism(&self) -> &'static str {
        "raw archive entry"
    }
}
