//! Output handling for the `scan` and `classify` commands.
//!
//! The rendered report goes to stdout (unless quiet) and optionally to a
//! file. Read errors are diagnostics: they go to stderr and never into the
//! report body.

use crate::classify::TagClass;
use crate::error::{Result, ScanError};
use crate::models::FileReport;
use crate::utils;
use owo_colors::OwoColorize;
use std::fs;
use std::path::Path;

/// Print the rendered report to stdout.
pub fn print_report(report: &str, quiet: bool) {
    if !quiet {
        print!("{}", report);
    }
}

/// Write the rendered report to `path`, creating parent directories.
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    let io_err = |source| ScanError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, report).map_err(io_err)
}

/// Print one stderr line per unreadable input.
pub fn print_file_errors(reports: &[FileReport]) {
    let prefix = utils::warn_prefix();
    for line in compose_error_lines(reports) {
        eprintln!("{} {}", prefix, line);
    }
}

/// Compose the diagnostic lines for unreadable inputs (pure).
pub fn compose_error_lines(reports: &[FileReport]) -> Vec<String> {
    reports
        .iter()
        .filter(|r| r.had_error)
        .map(|r| match &r.error_detail {
            Some(d) => d.clone(),
            None => format!("cannot read {}", r.file_path),
        })
        .collect()
}

/// Print the verdict for one tag given to `tagscan classify`.
pub fn print_classification(tag: &str, class: TagClass) {
    let verdict = match class {
        TagClass::Custom if utils::use_colors() => class.yellow().bold().to_string(),
        TagClass::Standard if utils::use_colors() => class.green().to_string(),
        _ => class.to_string(),
    };
    println!("{}\t{}", tag, verdict);
}
