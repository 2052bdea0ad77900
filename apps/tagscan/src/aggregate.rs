//! File-set aggregation: scan, classify and filter every input path.
//!
//! Each path yields exactly one `FileReport`, in the order the paths were
//! given, whether or not the file could be read. Files are scanned in
//! parallel; `rayon` preserves input order when collecting.

use crate::classify::Classifier;
use crate::error::{Result, ScanError};
use crate::filter::ExclusionFilter;
use crate::models::{FileReport, ScanSummary, TagRecord};
use crate::scan::{scan_str, ScanOptions};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Everything that decides which tag occurrences become records.
#[derive(Debug, Clone, Default)]
pub struct ScanPolicy {
    pub classifier: Classifier,
    pub filter: ExclusionFilter,
    pub scan: ScanOptions,
}

/// Scan every path and compute the run summary.
pub fn aggregate<P>(paths: &[P], policy: &ScanPolicy) -> (Vec<FileReport>, ScanSummary)
where
    P: AsRef<Path> + Sync,
{
    let reports: Vec<FileReport> = paths
        .par_iter()
        .map(|p| scan_file(p.as_ref(), policy))
        .collect();
    let summary = ScanSummary::from_reports(&reports);
    debug!(
        files = summary.files_total,
        with_matches = summary.files_with_matches,
        records = summary.records_total,
        "aggregation finished"
    );
    (reports, summary)
}

/// Produce the report for one path. Read failures are captured in the
/// report rather than returned.
pub fn scan_file(path: &Path, policy: &ScanPolicy) -> FileReport {
    let file_path = path.to_string_lossy().to_string();
    match read_text(path) {
        Ok(content) => {
            let records = collect_records(&file_path, &content, policy);
            debug!(file = %file_path, records = records.len(), "scanned");
            FileReport::ok(file_path, records)
        }
        Err(e) => {
            // The CLI reports read errors itself.
            debug!(file = %file_path, error = %e, "skipping unreadable file");
            FileReport::failed(file_path, e.to_string())
        }
    }
}

/// Scan already-loaded content: classifier first, then the exclusion filter.
pub fn collect_records(file_path: &str, content: &str, policy: &ScanPolicy) -> Vec<TagRecord> {
    scan_str(content, &policy.scan)
        .into_iter()
        .filter(|raw| {
            let custom = policy.classifier.is_custom(&raw.tag);
            if !custom {
                debug!(file = %file_path, line = raw.line, tag = %raw.tag, "standard tag");
            }
            custom
        })
        .filter(|raw| {
            let keep = policy.filter.keep(&raw.service);
            if !keep {
                debug!(file = %file_path, line = raw.line, service = %raw.service, "excluded service");
            }
            keep
        })
        .map(|raw| TagRecord {
            file_path: file_path.to_string(),
            service_name: raw.service,
            tag_value: raw.tag,
            line_number: raw.line,
        })
        .collect()
}

fn read_text(path: &Path) -> Result<String> {
    let display = path.to_string_lossy().to_string();
    let meta = fs::metadata(path).map_err(|source| ScanError::FileUnreadable {
        path: display.clone(),
        source,
    })?;
    if !meta.is_file() {
        return Err(ScanError::NotAFile { path: display });
    }
    fs::read_to_string(path).map_err(|source| ScanError::FileUnreadable {
        path: display,
        source,
    })
}
