//! Platform folder and library filename conventions.
//!
//! Resource paths in a bundle follow
//! `/<namespace>/native/<os>/<arch>/<file>`; this module builds those
//! paths and the platform-appropriate shared-library filename.

/// Return the bundle folder for an operating system and architecture.
#[must_use]
pub fn native_lib_folder(os: &str, arch: &str) -> String {
    format!("{os}/{arch}")
}

/// Return the bundle folder for the running platform.
#[must_use]
pub fn current_native_lib_folder() -> String {
    native_lib_folder(std::env::consts::OS, std::env::consts::ARCH)
}

/// Return the platform-specific shared-library filename for `name`.
#[must_use]
pub fn library_file_name(name: &str) -> String {
    format!("{}{}{}", library_prefix(), name, library_extension())
}

/// Build the logical resource path for a library file inside a bundle.
///
/// `namespace` is slash-separated (e.g. `org/acme`); the returned path
/// always carries a leading `/`.
#[must_use]
pub fn resource_path(namespace: &str, folder: &str, file_name: &str) -> String {
    format!("/{namespace}/native/{folder}/{file_name}")
}

/// Return the platform-specific library file extension (including the dot).
#[must_use]
pub const fn library_extension() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        ".dylib"
    }
    #[cfg(target_os = "windows")]
    {
        ".dll"
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        ".so"
    }
}

/// Return the platform-specific library filename prefix.
#[must_use]
pub const fn library_prefix() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        ""
    }
    #[cfg(not(target_os = "windows"))]
    {
        "lib"
    }
}
