//! CLI argument definitions for the libstage binary.
//!
//! Separated from the entrypoint so `main.rs` stays focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Stage a bundled native library to disk and verify the copy.
#[derive(Parser, Debug)]
#[command(name = "libstage")]
#[command(version, about)]
#[command(long_about = concat!(
    "Stage a bundled native library to disk and verify the copy.\n\n",
    "A bundle is a zip archive carrying platform-specific shared libraries ",
    "under /<namespace>/native/<os>/<arch>/. Dynamic linkers cannot load a ",
    "library from inside an archive, so libstage copies it out to a ",
    "temporary location under a collision-free name, then verifies the ",
    "extracted bytes against the embedded source through two independent ",
    "archive access paths to catch silent corruption.\n\n",
    "On success the path of the verified library is printed to stdout, ",
    "ready to hand to a loader. On mismatch every differing byte position ",
    "is reported and the exit status is non-zero.",
))]
pub struct Cli {
    /// Path to the bundle archive.
    pub bundle: Utf8PathBuf,

    /// Base name of the library to stage (e.g. `jansi` for libjansi.so).
    #[arg(short, long)]
    pub library: String,

    /// Slash-separated namespace inside the bundle (e.g. `org/acme`).
    #[arg(short, long)]
    pub namespace: String,

    /// Directory to extract into (defaults to LIBSTAGE_TMPDIR, then the
    /// platform temporary directory).
    #[arg(long)]
    pub target_dir: Option<Utf8PathBuf>,

    /// Start offset of the diagnostic byte window captured on mismatch.
    #[arg(long, requires = "window_len")]
    pub window_start: Option<u64>,

    /// Length of the diagnostic byte window.
    #[arg(long, requires = "window_start")]
    pub window_len: Option<u64>,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,
}
