//! Shared data models for scan results and the summary used by renderers.

use std::path::Path;

/// One custom tag found under a kept service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub file_path: String,
    pub service_name: String,
    pub tag_value: String,
    pub line_number: usize,
}

/// Scan result for a single input path. Records are in line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file_path: String,
    pub records: Vec<TagRecord>,
    pub had_error: bool,
    pub error_detail: Option<String>,
}

impl FileReport {
    pub fn ok(file_path: impl Into<String>, records: Vec<TagRecord>) -> Self {
        Self {
            file_path: file_path.into(),
            records,
            had_error: false,
            error_detail: None,
        }
    }

    pub fn failed(file_path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            records: Vec::new(),
            had_error: true,
            error_detail: Some(detail.into()),
        }
    }

    /// Reports that contribute to a rendered body.
    pub fn has_matches(&self) -> bool {
        !self.had_error && !self.records.is_empty()
    }

    /// Short label: the file name without its extension.
    pub fn label(&self) -> String {
        Path::new(&self.file_path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.file_path.clone())
    }
}

/// Run-wide counters, always derived from the reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_total: usize,
    pub files_with_matches: usize,
    pub records_total: usize,
}

impl ScanSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        Self {
            files_total: reports.len(),
            files_with_matches: reports.iter().filter(|r| !r.records.is_empty()).count(),
            records_total: reports.iter().map(|r| r.records.len()).sum(),
        }
    }
}
