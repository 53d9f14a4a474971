//! Guarded copy of an embedded resource to the filesystem.
//!
//! The destination filename is unique per attempt, so concurrent
//! processes never contend for the same path. The copy lands in a
//! temporary file beside the destination and is atomically renamed into
//! place: a partial copy is never visible under the destination name, and
//! the rename makes the overwrite-if-present policy explicit.

use crate::bundle::ResourceProvider;
use crate::error::{Result, StageError};
use crate::naming::{ExtractedName, unique_token};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::OpenOptions;
use std::io::ErrorKind;

/// Inputs for one extraction attempt.
#[derive(Debug)]
pub struct ExtractRequest<'a> {
    /// Logical resource path of the embedded library.
    pub resource_path: &'a str,
    /// Base name of the library (e.g. `jansi`).
    pub library_name: &'a str,
    /// Platform filename of the library (e.g. `libjansi.so`).
    pub library_file_name: &'a str,
    /// Advisory version string woven into the destination name.
    pub version: &'a str,
    /// Directory the extracted file is written into.
    pub target_dir: &'a Utf8Path,
}

/// Copy the embedded resource named by `request` into the target
/// directory and return the destination path.
///
/// A zero-byte lock marker (`<destination>.lck`) is created alongside the
/// destination with create-new semantics; a marker left behind by an
/// earlier run is tolerated, so extraction is idempotent with respect to
/// the marker.
///
/// # Errors
///
/// Returns [`StageError::ResourceNotFound`] if the resource cannot be
/// opened, and [`StageError::Io`] for any filesystem failure. On failure
/// the destination path is never left holding a partial copy.
pub fn extract_library(
    provider: &dyn ResourceProvider,
    request: &ExtractRequest<'_>,
) -> Result<Utf8PathBuf> {
    let name = ExtractedName::new(
        request.library_name,
        request.version,
        &unique_token(),
        request.library_file_name,
    );
    std::fs::create_dir_all(request.target_dir)?;

    create_lock_marker(&request.target_dir.join(name.lock_file_name()))?;

    let destination = request.target_dir.join(name.to_string());
    let mut reader = provider.open_resource(request.resource_path)?;
    let mut staged = tempfile::Builder::new()
        .prefix(".libstage-")
        .tempfile_in(request.target_dir)?;
    let copied = std::io::copy(&mut reader, staged.as_file_mut())?;
    staged
        .persist(destination.as_std_path())
        .map_err(|e| StageError::Io(e.error))?;

    log::debug!("extracted {} ({copied} bytes) to {destination}", request.resource_path);
    Ok(destination)
}

/// Create the zero-byte lock marker, tolerating one left by a prior run.
fn create_lock_marker(path: &Utf8Path) -> Result<()> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(StageError::Io(e)),
    }
}
