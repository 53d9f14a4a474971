//! SHA-256 digests for verification reports.

use sha2::{Digest, Sha256};
use std::io::Read;

/// Compute the lowercase hex SHA-256 digest of everything `reader` yields.
///
/// Used only for reporting: the pass/fail decision is always the
/// byte-for-byte comparison, never a digest.
///
/// # Errors
///
/// Returns the underlying error if the reader fails.
pub fn compute_sha256<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
