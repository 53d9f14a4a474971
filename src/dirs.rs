//! Target directory resolution for extracted libraries.
//!
//! Precedence: an explicit override (CLI flag), then the
//! `LIBSTAGE_TMPDIR` environment variable, then the platform temporary
//! directory.

use crate::error::{Result, StageError};
use camino::Utf8PathBuf;

/// Environment variable overriding the extraction directory.
pub const TMPDIR_ENV: &str = "LIBSTAGE_TMPDIR";

/// Resolve the directory extracted libraries are written into.
///
/// # Errors
///
/// Returns [`StageError::InvalidTargetDir`] if the resolved path is not
/// valid UTF-8.
pub fn resolve_target_dir(explicit: Option<Utf8PathBuf>) -> Result<Utf8PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(TMPDIR_ENV) {
        return Utf8PathBuf::from_path_buf(dir.into()).map_err(|path| {
            StageError::InvalidTargetDir {
                reason: format!("{TMPDIR_ENV} is not valid UTF-8: {}", path.display()),
            }
        });
    }
    Utf8PathBuf::from_path_buf(std::env::temp_dir()).map_err(|path| {
        StageError::InvalidTargetDir {
            reason: format!("temporary directory is not valid UTF-8: {}", path.display()),
        }
    })
}
