//! End-to-end behaviour tests for the staging pipeline.
//!
//! Each test builds a real zip bundle on disk with the production writer
//! API and drives the public crate surface against it.

use camino::{Utf8Path, Utf8PathBuf};
use libstage::bundle::{BundleResourceProvider, RawArchiveEntryProvider, ResourceProvider};
use libstage::error::StageError;
use libstage::platform::{current_native_lib_folder, library_file_name};
use libstage::staging::{StageConfig, stage_native_library};
use libstage::verify::{DiagnosticWindow, compare};
use std::fs::File;
use std::io::Write;
use zip::write::SimpleFileOptions;

fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path).expect("utf-8 temp path")
}

fn write_bundle(dir: &Utf8Path, entries: &[(&str, &[u8])]) -> Utf8PathBuf {
    let path = dir.join("bundle.zip");
    let file = File::create(&path).expect("create bundle");
    let mut writer = zip::ZipWriter::new(file);
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start entry");
        writer.write_all(data).expect("write entry");
    }
    writer.finish().expect("finish bundle");
    path
}

fn library_entry() -> String {
    format!(
        "org/acme/native/{}/{}",
        current_native_lib_folder(),
        library_file_name("demo")
    )
}

/// Payload large enough to span several comparison chunks, with content
/// that varies so positional corruption cannot go unnoticed.
fn payload() -> Vec<u8> {
    (0..40_000u32).map(|v| (v % 251) as u8).collect()
}

#[test]
fn round_trip_extraction_verifies_clean() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = utf8(dir.path().to_path_buf());
    let target = root.join("staged");
    let data = payload();
    let entry = library_entry();
    let bundle = write_bundle(
        &root,
        &[
            (entry.as_str(), data.as_slice()),
            ("org/acme/demo.properties", b"version=2.4.2\n"),
        ],
    );

    let outcome = stage_native_library(&StageConfig {
        bundle: &bundle,
        namespace: "org/acme",
        library: "demo",
        target_dir: &target,
        window: Some(DiagnosticWindow::new(18_960, 40)),
    })
    .expect("staging succeeds");

    assert_eq!(outcome.version, "2.4.2");
    assert_eq!(outcome.bytes_verified as usize, data.len());
    assert_eq!(std::fs::read(&outcome.library_path).expect("read staged"), data);

    let lock = Utf8PathBuf::from(format!("{}.lck", outcome.library_path));
    assert!(lock.exists(), "lock marker missing at {lock}");
    assert_eq!(
        std::fs::metadata(&lock).expect("lock metadata").len(),
        0,
        "lock marker must be zero bytes"
    );
}

#[test]
fn both_access_paths_read_identical_bytes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = utf8(dir.path().to_path_buf());
    let data = payload();
    let entry = library_entry();
    let bundle = write_bundle(&root, &[(entry.as_str(), data.as_slice())]);
    let resource = format!("/{entry}");

    let by_name = BundleResourceProvider::new(&bundle);
    let by_index = RawArchiveEntryProvider::new(&bundle);

    let result = compare(
        by_name.open_resource(&resource).expect("open by name"),
        by_index.open_resource(&resource).expect("open by index"),
        None,
    )
    .expect("comparison succeeds");
    assert!(result.is_match());
    assert_eq!(result.bytes_compared as usize, data.len());
}

#[test]
fn repeated_staging_runs_never_collide_or_trip_on_lock_markers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = utf8(dir.path().to_path_buf());
    let target = root.join("staged");
    let data = payload();
    let entry = library_entry();
    let bundle = write_bundle(
        &root,
        &[
            (entry.as_str(), data.as_slice()),
            ("org/acme/demo.properties", b"version=2.4.2\n"),
        ],
    );

    let config = StageConfig {
        bundle: &bundle,
        namespace: "org/acme",
        library: "demo",
        target_dir: &target,
        window: None,
    };
    let first = stage_native_library(&config).expect("first run");
    let second = stage_native_library(&config).expect("second run");

    assert_ne!(first.library_path, second.library_path);
    assert!(first.library_path.exists());
    assert!(second.library_path.exists());
}

#[test]
fn target_directory_comes_from_environment_when_not_overridden() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = utf8(dir.path().to_path_buf());
    let env_target = root.join("env-staged");

    temp_env::with_var(
        libstage::dirs::TMPDIR_ENV,
        Some(env_target.as_str()),
        || {
            let resolved = libstage::dirs::resolve_target_dir(None).expect("resolves");
            assert_eq!(resolved, env_target);
        },
    );
}

#[test]
fn absent_library_for_platform_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = utf8(dir.path().to_path_buf());
    let bundle = write_bundle(
        &root,
        &[("org/acme/native/plan9/mips/libdemo.so", b"wrong platform")],
    );

    let result = stage_native_library(&StageConfig {
        bundle: &bundle,
        namespace: "org/acme",
        library: "demo",
        target_dir: &root.join("staged"),
        window: None,
    });
    assert!(matches!(result, Err(StageError::ResourceNotFound { .. })));
}

#[test]
fn unreadable_bundle_surfaces_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = utf8(dir.path().to_path_buf());
    let bundle = root.join("not-a-bundle.zip");
    std::fs::write(&bundle, b"this is not a zip archive").expect("write junk");

    let result = stage_native_library(&StageConfig {
        bundle: &bundle,
        namespace: "org/acme",
        library: "demo",
        target_dir: &root.join("staged"),
        window: None,
    });
    assert!(result.is_err());
}
