//! Error types for native-library staging.
//!
//! This module defines the crate-wide error taxonomy. Content differences
//! discovered during verification are deliberately separated from structural
//! comparison failures: a [`StageError::ContentMismatch`] means the copy is
//! corrupt, while a [`StageError::StreamProtocol`] means the comparison
//! itself could not be trusted.

use crate::verify::CompareError;
use thiserror::Error;

/// Errors that can occur while staging a native library out of a bundle.
#[derive(Debug, Error)]
pub enum StageError {
    /// The embedded library resource does not exist at the computed path.
    ///
    /// Fatal: the library cannot be loaded without it, so this surfaces
    /// before any filesystem side effect.
    #[error("embedded resource not found: {path}")]
    ResourceNotFound {
        /// The logical resource path that was looked up.
        path: String,
    },

    /// The bundle could not be opened or an entry could not be read.
    #[error("bundle archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An I/O operation failed during extraction or verification.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The target directory could not be resolved to a usable path.
    #[error("invalid target directory: {reason}")]
    InvalidTargetDir {
        /// Description of why resolution failed.
        reason: String,
    },

    /// The two compared streams disagreed in length or short-read behaviour
    /// at a point where both should still have had data.
    ///
    /// More severe than a content mismatch: it indicates the comparison
    /// itself was unreliable.
    #[error("stream protocol violation during verification: {0}")]
    StreamProtocol(CompareError),

    /// The extracted file differs from the embedded source.
    ///
    /// The full per-byte detail is written to the log sink; this variant
    /// carries enough for the caller to decide what to do.
    #[error("extracted file differs from bundle ({mechanism}): {mismatches} byte(s) differ")]
    ContentMismatch {
        /// Which access path disagreed with the extracted file.
        mechanism: &'static str,
        /// Number of differing byte positions observed.
        mismatches: usize,
    },
}

impl From<CompareError> for StageError {
    fn from(error: CompareError) -> Self {
        match error {
            CompareError::Io(source) => Self::Io(source),
            other => Self::StreamProtocol(other),
        }
    }
}

/// Result type alias using [`StageError`].
pub type Result<T> = std::result::Result<T, StageError>;
