//! Human-readable verification mismatch reports.
//!
//! The report is informational output for root-causing why bytes differ,
//! not a machine-readable contract. It lists every differing position,
//! the captured diagnostic windows from both sources, and the SHA-256 of
//! each side.

use crate::verify::Comparison;
use std::fmt;

/// A fully-detailed account of one failed verification pass.
#[derive(Debug)]
pub struct MismatchReport<'a> {
    /// The access mechanism the embedded side was read through.
    pub mechanism: &'a str,
    /// The comparison that found the differences.
    pub comparison: &'a Comparison,
    /// Digest of the embedded source as read through `mechanism`.
    pub embedded_sha256: &'a str,
    /// Digest of the extracted file.
    pub extracted_sha256: &'a str,
}

impl fmt::Display for MismatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} byte(s) differ between {} and extracted file:",
            self.comparison.differing.len(),
            self.mechanism
        )?;
        for byte in &self.comparison.differing {
            writeln!(f, "- {byte}")?;
        }
        if !self.comparison.first_window.is_empty() {
            writeln!(f, "diagnostic window (embedded): {}", hex(&self.comparison.first_window))?;
            writeln!(f, "diagnostic window (extracted): {}", hex(&self.comparison.second_window))?;
        }
        writeln!(f, "sha256 (embedded):  {}", self.embedded_sha256)?;
        write!(f, "sha256 (extracted): {}", self.extracted_sha256)
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
