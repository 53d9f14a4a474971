//! End-to-end staging pipeline: locate, extract, verify twice.
//!
//! The embedded library is resolved for the current platform, copied out
//! of the bundle, then verified byte-for-byte against the embedded source
//! under two independent access paths. A path is only handed back once
//! both verification passes come up clean; a caller never receives a file
//! known to be incomplete or corrupted.

use crate::bundle::{BundleResourceProvider, RawArchiveEntryProvider, ResourceProvider};
use crate::digest::compute_sha256;
use crate::error::{Result, StageError};
use crate::extraction::{ExtractRequest, extract_library};
use crate::platform::{current_native_lib_folder, library_file_name, resource_path};
use crate::report::MismatchReport;
use crate::verify::{Comparison, DiagnosticWindow, compare};
use crate::version::bundled_version;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;

/// Configuration for one staging run.
#[derive(Debug)]
pub struct StageConfig<'a> {
    /// Path to the bundle archive on disk.
    pub bundle: &'a Utf8Path,
    /// Slash-separated namespace inside the bundle (e.g. `org/acme`).
    pub namespace: &'a str,
    /// Base name of the library (e.g. `jansi`).
    pub library: &'a str,
    /// Directory extracted files are written into.
    pub target_dir: &'a Utf8Path,
    /// Optional byte range captured verbatim for mismatch reports.
    pub window: Option<DiagnosticWindow>,
}

/// The result of a successful staging run.
#[derive(Debug)]
pub struct StageOutcome {
    /// Path of the verified extracted library, ready to hand to a loader.
    pub library_path: Utf8PathBuf,
    /// Advisory version resolved from the bundle properties.
    pub version: String,
    /// Bytes compared during each verification pass.
    pub bytes_verified: u64,
}

/// Stage the native library for the current platform out of a bundle.
///
/// # Errors
///
/// Returns [`StageError::ResourceNotFound`] before any filesystem side
/// effect if the bundle lacks the library for this platform,
/// [`StageError::ContentMismatch`] if either verification pass finds the
/// extracted bytes differ from the embedded source, and
/// [`StageError::StreamProtocol`] / [`StageError::Io`] for structural
/// comparison failures and filesystem errors.
pub fn stage_native_library(config: &StageConfig<'_>) -> Result<StageOutcome> {
    let file_name = library_file_name(config.library);
    let folder = current_native_lib_folder();
    let library_resource = resource_path(config.namespace, &folder, &file_name);

    let by_name = BundleResourceProvider::new(config.bundle);
    if !by_name.has_resource(&library_resource) {
        return Err(StageError::ResourceNotFound {
            path: library_resource,
        });
    }

    let properties_resource = format!("/{}/{}.properties", config.namespace, config.library);
    let version = bundled_version(&by_name, &properties_resource);

    let library_path = extract_library(
        &by_name,
        &ExtractRequest {
            resource_path: &library_resource,
            library_name: config.library,
            library_file_name: &file_name,
            version: &version,
            target_dir: config.target_dir,
        },
    )?;
    log::info!("extracted {library_resource} to {library_path}");

    // Verify against the embedded source, then again through the
    // independent entry-table path to rule out a lookup-mechanism
    // artefact.
    let comparison = verify_extraction(&by_name, &library_resource, &library_path, config.window)?;
    let by_index = RawArchiveEntryProvider::new(config.bundle);
    verify_extraction(&by_index, &library_resource, &library_path, config.window)?;

    Ok(StageOutcome {
        library_path,
        version,
        bytes_verified: comparison.bytes_compared,
    })
}

/// Compare the embedded resource, read through `provider`, against the
/// extracted file.
///
/// # Errors
///
/// Returns [`StageError::ContentMismatch`] when bytes differ (after
/// logging the full report) and [`StageError::StreamProtocol`] when the
/// comparison itself was unreliable.
pub fn verify_extraction(
    provider: &dyn ResourceProvider,
    resource: &str,
    extracted: &Utf8Path,
    window: Option<DiagnosticWindow>,
) -> Result<Comparison> {
    log::info!(
        "comparing {extracted} to {resource} via {}",
        provider.mechanism()
    );
    let embedded = provider.open_resource(resource)?;
    let extracted_file = File::open(extracted)?;
    let comparison = compare(embedded, extracted_file, window)?;

    if comparison.is_match() {
        return Ok(comparison);
    }

    let embedded_sha256 = compute_sha256(provider.open_resource(resource)?)?;
    let extracted_sha256 = compute_sha256(File::open(extracted)?)?;
    let report = MismatchReport {
        mechanism: provider.mechanism(),
        comparison: &comparison,
        embedded_sha256: &embedded_sha256,
        extracted_sha256: &extracted_sha256,
    };
    log::error!("{report}");
    Err(StageError::ContentMismatch {
        mechanism: provider.mechanism(),
        mismatches: comparison.differing.len(),
    })
}
