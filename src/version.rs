//! Advisory version resolution from a bundled properties resource.
//!
//! The version string only feeds the extraction filename; it is cosmetic
//! and must never cause extraction to fail. Every failure mode degrades to
//! the `"unknown"` sentinel.

use crate::bundle::ResourceProvider;
use std::io::Read;

/// Sentinel returned when the version cannot be determined.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Read the `version` key from a `key=value` properties resource.
///
/// The value is sanitised to retain only ASCII digits and dots, so
/// `1.2.3-SNAPSHOT` becomes `1.2.3`. A missing resource, missing key,
/// unreadable stream, or value with no digits at all yields
/// [`UNKNOWN_VERSION`].
#[must_use]
pub fn bundled_version(provider: &dyn ResourceProvider, properties_path: &str) -> String {
    match read_properties(provider, properties_path) {
        Some(text) => version_from_properties(&text),
        None => {
            log::debug!("no readable properties resource at {properties_path}");
            UNKNOWN_VERSION.to_owned()
        }
    }
}

fn read_properties(provider: &dyn ResourceProvider, path: &str) -> Option<String> {
    let mut reader = provider.open_resource(path).ok()?;
    let mut text = String::new();
    reader.read_to_string(&mut text).ok()?;
    Some(text)
}

fn version_from_properties(text: &str) -> String {
    text.lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "version")
        .map(|(_, value)| sanitise(value))
        .unwrap_or_else(|| UNKNOWN_VERSION.to_owned())
}

/// Keep only digits and dots; fall back to the sentinel when nothing
/// survives.
fn sanitise(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        UNKNOWN_VERSION.to_owned()
    } else {
        cleaned
    }
}
