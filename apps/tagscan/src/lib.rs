//! Tagscan core library.
//!
//! Finds hand-picked ("custom") image tags in loosely structured YAML
//! deployment files. The pipeline is scan once, render many ways:
//! paths -> per-file scan + classify + filter -> `FileReport`s and a
//! `ScanSummary` -> text, CSV or Markdown.
//!
//! High-level modules:
//! - `classify`: tag classification (custom vs standard).
//! - `scan`: indentation-aware line scanner linking tags to services.
//! - `filter`: service exclusion by name suffix.
//! - `aggregate`: runs the scanner over a file set and builds the summary.
//! - `render`: text/CSV/Markdown renderers.
//! - `models`: `TagRecord`, `FileReport`, `ScanSummary`.
//! - `config`: discovery and effective configuration resolution.
//! - `discover`: expands CLI paths into input files.
//! - `cli`, `output`, `logging`, `utils`: the binary's shell.
pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod output;
pub mod render;
pub mod scan;
pub mod utils;

pub use aggregate::{aggregate, ScanPolicy};
pub use classify::{Classifier, TagClass};
pub use error::ScanError;
pub use filter::ExclusionFilter;
pub use models::{FileReport, ScanSummary, TagRecord};
pub use render::{render, RenderOptions, ReportFormat};

use std::path::Path;

/// Scan `paths` under `policy` and render the result as `format`.
///
/// Unreadable files never fail the call; they are left out of the body.
pub fn scan_and_render<P>(
    paths: &[P],
    format: ReportFormat,
    policy: &ScanPolicy,
    opts: RenderOptions,
) -> error::Result<String>
where
    P: AsRef<Path> + Sync,
{
    let (reports, summary) = aggregate(paths, policy);
    render(&reports, &summary, format, opts)
}
