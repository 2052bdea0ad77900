//! Configuration discovery and effective settings resolution.
//!
//! Tagscan reads `tagscan.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `format`: `txt`
//! - `pattern`: `["*.yml", "*.yaml"]`
//! - `exclude_suffixes`: `["-limited"]`
//! - `reserved_words`: `["latest", "stable", "production"]`
//! - `ignored_keys`: YAML structure keys (`services`, `environment`, ...)
//! - `max_service_indent`: 4
//! - `line_numbers`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::aggregate::ScanPolicy;
use crate::classify::{Classifier, DEFAULT_RESERVED_WORDS};
use crate::filter::{ExclusionFilter, DEFAULT_EXCLUDE_SUFFIX};
use crate::render::RenderOptions;
use crate::scan::{ScanOptions, DEFAULT_IGNORED_KEYS, DEFAULT_MAX_SERVICE_INDENT};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Patterns used to pick files out of a directory when none are configured.
pub const DEFAULT_PATTERNS: &[&str] = &["*.yml", "*.yaml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `tagscan.toml|yaml`.
pub struct TagscanConfig {
    pub format: Option<String>,
    pub pattern: Option<Vec<String>>,
    pub output: Option<String>,
    pub quiet: Option<bool>,
    pub exclude_suffixes: Option<Vec<String>>,
    pub reserved_words: Option<Vec<String>>,
    pub ignored_keys: Option<Vec<String>>,
    pub max_service_indent: Option<usize>,
    pub line_numbers: Option<bool>,
}

/// Values supplied on the command line; `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub format: Option<&'a str>,
    pub patterns: &'a [String],
    pub output: Option<&'a str>,
    pub quiet: bool,
    pub exclude_suffixes: &'a [String],
    pub max_service_indent: Option<usize>,
    pub line_numbers: bool,
}

#[derive(Debug, Clone)]
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub format: String,
    pub patterns: Vec<String>,
    pub output: Option<String>,
    pub quiet: bool,
    pub policy: ScanPolicy,
    pub render: RenderOptions,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `tagscan.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("tagscan.toml").exists()
            || cur.join("tagscan.yaml").exists()
            || cur.join("tagscan.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `TagscanConfig` from `tagscan.toml` or `tagscan.yaml|yml` if present.
///
/// A file that exists but does not parse is logged and treated as absent.
pub fn load_config(root: &Path) -> Option<TagscanConfig> {
    let toml_path = root.join("tagscan.toml");
    if toml_path.exists() {
        let s = read_config(&toml_path)?;
        return match toml::from_str(&s) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!(path = %toml_path.display(), error = %e, "ignoring invalid config");
                None
            }
        };
    }
    for yml in ["tagscan.yaml", "tagscan.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = read_config(&p)?;
            return match serde_yaml::from_str(&s) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "ignoring invalid config");
                    None
                }
            };
        }
    }
    None
}

fn read_config(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read config");
            None
        }
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Effective {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let format = cli
        .format
        .map(|s| s.to_string())
        .or(cfg.format)
        .unwrap_or_else(|| "txt".to_string());

    let patterns = non_empty(cli.patterns)
        .or(cfg.pattern)
        .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect());

    let output = cli.output.map(|s| s.to_string()).or(cfg.output);
    let quiet = cli.quiet || cfg.quiet.unwrap_or(false);
    let line_numbers = cli.line_numbers || cfg.line_numbers.unwrap_or(false);

    let exclude_suffixes = non_empty(cli.exclude_suffixes)
        .or(cfg.exclude_suffixes)
        .unwrap_or_else(|| vec![DEFAULT_EXCLUDE_SUFFIX.to_string()]);
    let reserved_words = cfg
        .reserved_words
        .unwrap_or_else(|| DEFAULT_RESERVED_WORDS.iter().map(|w| w.to_string()).collect());
    let ignored_keys = cfg
        .ignored_keys
        .unwrap_or_else(|| DEFAULT_IGNORED_KEYS.iter().map(|k| k.to_string()).collect());
    let max_service_indent = cli
        .max_service_indent
        .or(cfg.max_service_indent)
        .unwrap_or(DEFAULT_MAX_SERVICE_INDENT);

    Effective {
        repo_root,
        config_found,
        format,
        patterns,
        output,
        quiet,
        policy: ScanPolicy {
            classifier: Classifier::new(reserved_words),
            filter: ExclusionFilter::new(exclude_suffixes),
            scan: ScanOptions {
                max_service_indent,
                ignored_keys,
            },
        },
        render: RenderOptions { line_numbers },
    }
}

fn non_empty(v: &[String]) -> Option<Vec<String>> {
    if v.is_empty() {
        None
    } else {
        Some(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TagClass;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(&CliOverrides {
            repo_root: dir.path().to_str(),
            ..Default::default()
        });
        assert!(!eff.config_found);
        assert_eq!(eff.format, "txt");
        assert_eq!(eff.patterns, vec!["*.yml", "*.yaml"]);
        assert_eq!(eff.output, None);
        assert!(!eff.quiet);
        assert!(!eff.render.line_numbers);
        assert_eq!(eff.policy.filter.suffixes(), ["-limited"]);
        assert_eq!(eff.policy.scan.max_service_indent, 4);
        assert!(eff.policy.scan.ignored_keys.iter().any(|k| k == "services"));
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("tagscan.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
format = "csv"
pattern = ["prod*.yml"]
exclude_suffixes = ["-limited", "-canary"]
reserved_words = ["latest", "main"]
max_service_indent = 2
            "#
        )
        .unwrap();

        let nested = root.join("deploy/prod");
        fs::create_dir_all(&nested).unwrap();
        let eff = resolve_effective(&CliOverrides {
            repo_root: nested.to_str(),
            ..Default::default()
        });
        assert_eq!(eff.repo_root, root);
        assert!(eff.config_found);
        assert_eq!(eff.format, "csv");
        assert_eq!(eff.patterns, vec!["prod*.yml"]);
        assert!(!eff.policy.filter.keep("api-canary"));
        assert_eq!(eff.policy.classifier.classify("main"), TagClass::Standard);
        assert_eq!(eff.policy.classifier.classify("stable"), TagClass::Custom);
        assert_eq!(eff.policy.scan.max_service_indent, 2);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("tagscan.yaml"),
            "format: md\nquiet: true\noutput: report.md\nignored_keys: [services]\n",
        )
        .unwrap();
        let eff = resolve_effective(&CliOverrides {
            repo_root: root.to_str(),
            ..Default::default()
        });
        assert_eq!(eff.format, "md");
        assert!(eff.quiet);
        assert_eq!(eff.output.as_deref(), Some("report.md"));
        assert_eq!(eff.policy.scan.ignored_keys, vec!["services"]);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("tagscan.toml"),
            "format = \"csv\"\nexclude_suffixes = [\"-canary\"]\nmax_service_indent = 2\n",
        )
        .unwrap();
        let patterns = vec!["stage*.yml".to_string()];
        let suffixes = vec!["-beta".to_string()];
        let eff = resolve_effective(&CliOverrides {
            repo_root: root.to_str(),
            format: Some("md"),
            patterns: &patterns,
            exclude_suffixes: &suffixes,
            max_service_indent: Some(6),
            ..Default::default()
        });
        assert_eq!(eff.format, "md");
        assert_eq!(eff.patterns, patterns);
        assert!(eff.policy.filter.keep("api-canary"));
        assert!(!eff.policy.filter.keep("api-beta"));
        assert_eq!(eff.policy.scan.max_service_indent, 6);
    }

    #[test]
    fn test_line_numbers_from_config_or_cli() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tagscan.yml"), "line_numbers: true\n").unwrap();
        let eff = resolve_effective(&CliOverrides {
            repo_root: root.to_str(),
            ..Default::default()
        });
        assert!(eff.render.line_numbers);

        let bare = tempdir().unwrap();
        fs::create_dir(bare.path().join(".git")).unwrap();
        let eff = resolve_effective(&CliOverrides {
            repo_root: bare.path().to_str(),
            line_numbers: true,
            ..Default::default()
        });
        assert!(eff.render.line_numbers);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tagscan.toml"), "format = [unclosed").unwrap();
        assert!(load_config(root).is_none());
        let eff = resolve_effective(&CliOverrides {
            repo_root: root.to_str(),
            ..Default::default()
        });
        assert_eq!(eff.format, "txt");
        assert!(!eff.config_found);
    }
}
