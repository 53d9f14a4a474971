//! User-facing output helpers for the libstage binary.

use crate::staging::StageOutcome;
use std::io::Write;

/// Write a single line to the given stderr sink.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Format the one-line staging summary shown on success.
#[must_use]
pub fn success_summary(outcome: &StageOutcome) -> String {
    format!(
        "Staged {} (version {}, {} bytes verified twice)",
        outcome.library_path, outcome.version, outcome.bytes_verified
    )
}
