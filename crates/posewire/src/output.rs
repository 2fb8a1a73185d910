//! Terminal output for the posewire binary

use anyhow::Error;
use colored::*;

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print a run summary once the bridge stops
pub fn print_summary(frames: u64, bytes: u64) {
    eprintln!(
        "{} {} frames, {} bytes",
        "Sent".green().bold(),
        frames,
        bytes
    );
}
