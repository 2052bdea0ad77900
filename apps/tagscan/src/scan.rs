//! Line scanner associating `tag:` values with the nearest service.
//!
//! The scanner is a two-field state machine (`current_service`,
//! `current_service_indent`) stepped once per line. It never looks back
//! and never fails: lines it cannot recognize leave the state untouched.
//!
//! Recognized lines:
//! - service declaration: a bare `identifier:` key (optionally followed by a
//!   comment) or a list item `- name: identifier`, indented no deeper than
//!   `max_service_indent` columns. Keys listed in `ignored_keys` are YAML
//!   structure (`services`, `environment`, ...) and never become services.
//! - tag declaration: `tag: value` at any depth. The value is emitted only
//!   when a service is already known.
//!
//! Known limitation: services declared deeper than the indent ceiling are
//! not recognized; tags under them are attributed to the enclosing
//! shallower service.

use crate::classify::normalize_tag_value;
use regex::Regex;
use std::sync::OnceLock;

/// Deepest indentation (in columns) at which a service can be declared.
pub const DEFAULT_MAX_SERVICE_INDENT: usize = 4;

/// Structural keys that look like `name:` but never name a service.
pub const DEFAULT_IGNORED_KEYS: &[&str] = &[
    "services",
    "volumes",
    "networks",
    "configs",
    "secrets",
    "environment",
    "labels",
    "ports",
    "image",
    "deploy",
    "version",
    "build",
    "depends_on",
    "restart",
    "command",
    "entrypoint",
    "healthcheck",
    "logging",
];

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub max_service_indent: usize,
    pub ignored_keys: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_service_indent: DEFAULT_MAX_SERVICE_INDENT,
            ignored_keys: DEFAULT_IGNORED_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// A tag occurrence before classification and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub service: String,
    pub tag: String,
    pub line: usize,
}

enum LineKind<'a> {
    Inert,
    Service { indent: usize, name: &'a str },
    Tag(&'a str),
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*tag:(.*)$").expect("tag pattern compiles"))
}

fn service_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)([A-Za-z0-9_-]+):\s*(#.*)?$").expect("service key pattern compiles")
    })
}

fn service_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^(\s*)-\s*name:\s*["']?([A-Za-z0-9_-]+)["']?\s*(#.*)?$"#)
            .expect("service item pattern compiles")
    })
}

fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineKind::Inert;
    }
    if let Some(c) = tag_re().captures(line) {
        return match c.get(1) {
            Some(m) => LineKind::Tag(m.as_str()),
            None => LineKind::Inert,
        };
    }
    let caps = service_key_re()
        .captures(line)
        .or_else(|| service_item_re().captures(line));
    match caps {
        Some(c) => match (c.get(1), c.get(2)) {
            (Some(ws), Some(name)) => LineKind::Service {
                indent: ws.as_str().chars().count(),
                name: name.as_str(),
            },
            _ => LineKind::Inert,
        },
        None => LineKind::Inert,
    }
}

/// Scanner state carried from one line to the next.
#[derive(Debug, Default, Clone)]
pub struct ScannerState {
    pub current_service: Option<String>,
    pub current_service_indent: Option<usize>,
}

impl ScannerState {
    /// Advance over one line (1-based `line_no`), returning a tag occurrence
    /// when the line declares a tag under a known service.
    pub fn step(&mut self, line_no: usize, line: &str, opts: &ScanOptions) -> Option<RawTag> {
        let line = line.trim_end_matches('\r');
        match classify_line(line) {
            LineKind::Inert => None,
            LineKind::Service { indent, name } => {
                if indent <= opts.max_service_indent && !opts.ignored_keys.iter().any(|k| k == name)
                {
                    self.current_service = Some(name.to_string());
                    self.current_service_indent = Some(indent);
                }
                None
            }
            LineKind::Tag(raw) => {
                let value = normalize_tag_value(raw);
                if value.is_empty() {
                    return None;
                }
                let service = self.current_service.as_ref()?;
                Some(RawTag {
                    service: service.clone(),
                    tag: value.to_string(),
                    line: line_no,
                })
            }
        }
    }
}

/// Scan all lines of one file.
pub fn scan_lines<'a, I>(lines: I, opts: &ScanOptions) -> Vec<RawTag>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut state = ScannerState::default();
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(i, line)| state.step(i + 1, line, opts))
        .collect()
}

pub fn scan_str(content: &str, opts: &ScanOptions) -> Vec<RawTag> {
    scan_lines(content.lines(), opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> Vec<(String, String, usize)> {
        scan_str(src, &ScanOptions::default())
            .into_iter()
            .map(|r| (r.service, r.tag, r.line))
            .collect()
    }

    #[test]
    fn test_tag_attributed_to_nearest_service() {
        let src = "auth-service:\n  cpu: 2\n  tag: feature/oauth2\nworker-limited:\n  tag: hotfix/x\n";
        assert_eq!(
            scan(src),
            vec![
                ("auth-service".into(), "feature/oauth2".into(), 3),
                ("worker-limited".into(), "hotfix/x".into(), 5),
            ]
        );
    }

    #[test]
    fn test_tag_before_any_service_is_dropped() {
        let src = "\n  tag: feature/orphan\napi:\n  tag: feature/a\n";
        assert_eq!(scan(src), vec![("api".into(), "feature/a".into(), 4)]);
    }

    #[test]
    fn test_deep_keys_do_not_replace_service() {
        let src = "\
services:
  api:
    image:
      repository: registry/api
      tag: feature/deep
  web:
    config:
      nested:
        tag: 1.0.0
";
        assert_eq!(
            scan(src),
            vec![
                ("api".into(), "feature/deep".into(), 5),
                // `config:` sits at indent 4 and is a legitimate service key
                ("config".into(), "1.0.0".into(), 9),
            ]
        );
    }

    #[test]
    fn test_ignored_keys_keep_current_service() {
        let src = "api:\n  environment:\n    tag: feature/env\n";
        assert_eq!(scan(src), vec![("api".into(), "feature/env".into(), 3)]);
    }

    #[test]
    fn test_list_item_name_declares_service() {
        let src = "\
apps:
  - name: \"billing\"
    tag: 'feature/pay'   # pinned for QA
  - name: search
    tag: release/7
";
        assert_eq!(
            scan(src),
            vec![
                ("billing".into(), "feature/pay".into(), 3),
                ("search".into(), "release/7".into(), 5),
            ]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_keep_state() {
        let src = "api:\n\n# comment\n   # indented comment\n  tag: feature/a\r\n";
        assert_eq!(scan(src), vec![("api".into(), "feature/a".into(), 5)]);
    }

    #[test]
    fn test_empty_tag_value_is_inert() {
        let src = "api:\n  tag:\n  tag: \"\"\n  tag:   # nothing\n";
        assert!(scan(src).is_empty());
    }

    #[test]
    fn test_service_key_with_trailing_comment() {
        let src = "api:   # main api\n  tag: feature/a\n";
        assert_eq!(scan(src), vec![("api".into(), "feature/a".into(), 2)]);
    }

    #[test]
    fn test_state_step_tracks_indent() {
        let opts = ScanOptions::default();
        let mut st = ScannerState::default();
        assert!(st.step(1, "  api:", &opts).is_none());
        assert_eq!(st.current_service.as_deref(), Some("api"));
        assert_eq!(st.current_service_indent, Some(2));
        assert!(st.step(2, "      deep:", &opts).is_none());
        assert_eq!(st.current_service.as_deref(), Some("api"));
        assert_eq!(st.current_service_indent, Some(2));
    }

    #[test]
    fn test_custom_indent_ceiling() {
        let opts = ScanOptions {
            max_service_indent: 8,
            ..ScanOptions::default()
        };
        let found = scan_str("root:\n        deep:\n          tag: feature/x\n", &opts);
        assert_eq!(found[0].service, "deep");
    }
}
