//! Report rendering: plain text, CSV and Markdown views of one scan.
//!
//! All three views share the same input and skip reports that errored or
//! found nothing. Rendering is pure; the same inputs always produce the
//! same bytes.
//!
//! `RenderOptions::line_numbers` adds each record's source line: a
//! `line:` entry in text, a trailing `line` column in CSV and a leading
//! `Line` column in Markdown. Without it the layouts are unchanged.

use crate::error::{Result, ScanError};
use crate::models::{FileReport, ScanSummary};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Csv,
    Markdown,
}

impl ReportFormat {
    /// Canonical selector accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
            ReportFormat::Markdown => "md",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            _ => Err(ScanError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Layout switches shared by all formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub line_numbers: bool,
}

/// Render reports in the given format.
pub fn render(
    reports: &[FileReport],
    summary: &ScanSummary,
    format: ReportFormat,
    opts: RenderOptions,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(reports, summary, opts)),
        ReportFormat::Csv => render_csv(reports, opts),
        ReportFormat::Markdown => Ok(render_markdown(reports, summary, opts)),
    }
}

/// Render with a textual format selector (`txt`, `csv`, `md`).
pub fn render_named(
    reports: &[FileReport],
    summary: &ScanSummary,
    format: &str,
    opts: RenderOptions,
) -> Result<String> {
    render(reports, summary, format.parse()?, opts)
}

fn render_text(reports: &[FileReport], summary: &ScanSummary, opts: RenderOptions) -> String {
    let mut out = String::new();
    for r in reports.iter().filter(|r| r.has_matches()) {
        let _ = writeln!(out, "path: {}", r.file_path);
        for rec in &r.records {
            if opts.line_numbers {
                let _ = writeln!(out, "  line: {}", rec.line_number);
            }
            let _ = writeln!(out, "  service: {}", rec.service_name);
            let _ = writeln!(out, "  tag: {}", rec.tag_value);
        }
        out.push('\n');
    }
    out.push_str("Statistics:\n");
    let _ = writeln!(out, "  Files processed: {}", summary.files_total);
    let _ = writeln!(out, "  Files with custom tags: {}", summary.files_with_matches);
    let _ = writeln!(out, "  Custom tags found: {}", summary.records_total);
    out
}

fn render_csv(reports: &[FileReport], opts: RenderOptions) -> Result<String> {
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if opts.line_numbers {
        w.write_record(["path", "service", "tag", "line"])?;
    } else {
        w.write_record(["path", "service", "tag"])?;
    }
    for r in reports.iter().filter(|r| r.has_matches()) {
        let label = r.label();
        for rec in &r.records {
            if opts.line_numbers {
                let line = rec.line_number.to_string();
                w.write_record([
                    label.as_str(),
                    rec.service_name.as_str(),
                    rec.tag_value.as_str(),
                    line.as_str(),
                ])?;
            } else {
                w.write_record([label.as_str(), rec.service_name.as_str(), rec.tag_value.as_str()])?;
            }
        }
    }
    let bytes = w
        .into_inner()
        .map_err(|e| ScanError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_markdown(reports: &[FileReport], summary: &ScanSummary, opts: RenderOptions) -> String {
    let mut out = String::new();
    for r in reports.iter().filter(|r| r.has_matches()) {
        let _ = writeln!(out, "## {}\n", r.label());
        if opts.line_numbers {
            out.push_str("| Line | Service | Tag |\n");
            out.push_str("|------|---------|-----|\n");
        } else {
            out.push_str("| Service | Tag |\n");
            out.push_str("|---------|-----|\n");
        }
        for rec in &r.records {
            if opts.line_numbers {
                let _ = write!(out, "| {} ", rec.line_number);
            }
            let _ = writeln!(
                out,
                "| {} | {} |",
                code_span(&rec.service_name),
                code_span(&rec.tag_value)
            );
        }
        out.push('\n');
    }
    out.push_str("## Statistics\n\n");
    let _ = writeln!(out, "- **Files processed:** {}", summary.files_total);
    let _ = writeln!(out, "- **Files with custom tags:** {}", summary.files_with_matches);
    let _ = writeln!(out, "- **Custom tags found:** {}", summary.records_total);
    out
}

/// Inline code span safe inside a table cell.
fn code_span(value: &str) -> String {
    let escaped = value.replace('|', "\\|");
    if escaped.contains('`') {
        format!("`` {} ``", escaped)
    } else {
        format!("`{}`", escaped)
    }
}
