//! Input discovery: expands CLI paths into the ordered file list that the
//! aggregator scans.
//!
//! Files are taken as given. Directories are listed (not recursively) and
//! filtered by file-name glob patterns, case-insensitively, then sorted by
//! name. Paths that do not exist are passed through so that the aggregator
//! reports them as unreadable.

use crate::error::{Result, ScanError};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MATCH_OPTS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled file-name patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    patterns: Vec<Pattern>,
}

impl FileMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|source| ScanError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(file_name, MATCH_OPTS))
    }
}

/// Expand `inputs` into files, preserving the order of the inputs.
pub fn collect_inputs<P: AsRef<Path>>(inputs: &[P], matcher: &FileMatcher) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let mut found = list_dir(input, matcher);
            debug!(dir = %input.display(), files = found.len(), "listed directory");
            out.append(&mut found);
        } else {
            out.push(input.to_path_buf());
        }
    }
    out
}

fn list_dir(dir: &Path, matcher: &FileMatcher) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list directory");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .map(|n| matcher.matches(&n.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = FileMatcher::new(&["prod[.yml"]).unwrap_err();
        assert!(matches!(err, ScanError::InvalidPattern { ref pattern, .. } if pattern == "prod[.yml"));
    }

    #[test]
    fn test_matcher_is_case_insensitive() {
        let m = FileMatcher::new(&["prod*.yml"]).unwrap();
        assert!(m.matches("prod1.yml"));
        assert!(m.matches("PROD2.YML"));
        assert!(!m.matches("stage1.yml"));
        assert!(!m.matches("prod1.yaml"));
    }

    #[test]
    fn test_directory_listing_is_filtered_and_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for name in ["prod2.yml", "prod10.yaml", "notes.txt", "prod1.yml"] {
            fs::write(root.join(name), "x: 1\n").unwrap();
        }
        fs::create_dir(root.join("sub.yml")).unwrap();

        let m = FileMatcher::new(&["*.yml", "*.yaml"]).unwrap();
        let single = root.join("notes.txt");
        let missing = root.join("gone.yml");
        let got = collect_inputs(&[single.clone(), root.to_path_buf(), missing.clone()], &m);
        assert_eq!(
            got,
            vec![
                single,
                root.join("prod1.yml"),
                root.join("prod10.yaml"),
                root.join("prod2.yml"),
                missing,
            ]
        );
    }
}
