//! libstage CLI entrypoint.
//!
//! Stages the native library for the current platform out of a bundle
//! archive, verifies the copy, and prints the verified path to stdout.

use clap::Parser;
use libstage::cli::Cli;
use libstage::dirs::resolve_target_dir;
use libstage::error::{Result, StageError};
use libstage::output::{success_summary, write_stderr_line};
use libstage::staging::{StageConfig, stage_native_library};
use libstage::verify::DiagnosticWindow;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if let Err(error) = run(&cli, &mut stderr) {
        write_stderr_line(&mut stderr, format!("error: {error}"));
        std::process::exit(exit_code_for(&error));
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let target_dir = resolve_target_dir(cli.target_dir.clone())?;
    let window = diagnostic_window(cli);

    let outcome = stage_native_library(&StageConfig {
        bundle: &cli.bundle,
        namespace: &cli.namespace,
        library: &cli.library,
        target_dir: &target_dir,
        window,
    })?;

    if !cli.quiet {
        write_stderr_line(stderr, success_summary(&outcome));
    }
    println!("{}", outcome.library_path);
    Ok(())
}

fn diagnostic_window(cli: &Cli) -> Option<DiagnosticWindow> {
    match (cli.window_start, cli.window_len) {
        (Some(start), Some(len)) => Some(DiagnosticWindow::new(start, len)),
        _ => None,
    }
}

/// Map error classes to distinct exit codes so scripted callers can tell
/// a corrupt copy from an absent resource.
fn exit_code_for(error: &StageError) -> i32 {
    match error {
        StageError::ContentMismatch { .. } => 2,
        StageError::StreamProtocol(_) => 3,
        _ => 1,
    }
}
