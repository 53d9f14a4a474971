//! Destination naming for extracted libraries.
//!
//! Every extraction attempt gets a fresh, collision-free filename of the
//! form `<library>-<version>-<unique>-<file_name>`, so concurrent
//! processes extracting the same logical library never write the same
//! destination path. The companion lock marker shares the name with a
//! `.lck` suffix.

use std::fmt;
use uuid::Uuid;

/// Suffix appended to the destination name to form the lock marker name.
const LOCK_SUFFIX: &str = ".lck";

/// A fully-qualified destination filename for one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedName {
    library: String,
    version: String,
    unique: String,
    file_name: String,
}

impl ExtractedName {
    /// Create a destination name from its components.
    #[must_use]
    pub fn new(library: &str, version: &str, unique: &str, file_name: &str) -> Self {
        Self {
            library: library.to_owned(),
            version: version.to_owned(),
            unique: unique.to_owned(),
            file_name: file_name.to_owned(),
        }
    }

    /// Return the companion lock-marker filename.
    #[must_use]
    pub fn lock_file_name(&self) -> String {
        format!("{self}{LOCK_SUFFIX}")
    }
}

impl fmt::Display for ExtractedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.library, self.version, self.unique, self.file_name
        )
    }
}

/// Generate a random token that is overwhelmingly unlikely to collide
/// across processes or repeated runs.
///
/// Not cryptographic; collision avoidance is the only requirement.
#[must_use]
pub fn unique_token() -> String {
    Uuid::new_v4().simple().to_string()
}
