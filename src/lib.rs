//! Native-library staging and verification.
//!
//! A platform-specific shared library ships as an embedded resource inside
//! a zip bundle. A dynamic linker cannot load it from there, so it must be
//! copied out to a real filesystem path first. This crate implements that
//! extraction, and — because extraction has been observed to corrupt bytes
//! silently — verifies the copy byte-for-byte against the embedded source
//! under two independent archive access paths.
//!
//! # Modules
//!
//! - [`bundle`] - Resource providers over the bundle archive
//! - [`cli`] - Command-line argument definitions
//! - [`digest`] - SHA-256 digests for mismatch reports
//! - [`dirs`] - Target directory resolution
//! - [`error`] - Semantic error taxonomy
//! - [`extraction`] - Guarded, crash-safe resource copy
//! - [`naming`] - Collision-free destination names
//! - [`output`] - User-facing output helpers
//! - [`platform`] - Platform folder and filename conventions
//! - [`report`] - Mismatch report formatting
//! - [`staging`] - End-to-end pipeline orchestration
//! - [`verify`] - Chunked byte-for-byte stream comparison
//! - [`version`] - Advisory version resolution

pub mod bundle;
pub mod cli;
pub mod digest;
pub mod dirs;
pub mod error;
pub mod extraction;
pub mod naming;
pub mod output;
pub mod platform;
pub mod report;
pub mod staging;
pub mod verify;
pub mod version;
