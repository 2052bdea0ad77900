//! Error taxonomy for scanning and rendering.
//!
//! Content never produces an error: a line the scanner cannot recognize is
//! simply inert. Only I/O failures and an invalid format selector surface
//! here.

use std::io;
use thiserror::Error;

/// Errors reported by the scan/render pipeline and its CLI shell.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read {path}: {source}")]
    FileUnreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a regular file")]
    NotAFile { path: String },

    #[error("unsupported format '{0}' (expected txt, csv or md)")]
    UnsupportedFormat(String),

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write report to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
