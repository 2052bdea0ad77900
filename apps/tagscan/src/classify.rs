//! Tag classification: decides whether an image tag was hand-picked by a
//! developer (`Custom`) or is a routine release identifier (`Standard`).
//!
//! Standard tags, compared case-insensitively:
//! - a reserved word (`latest`, `stable`, `production` by default);
//! - a semantic version: optional `v`, `MAJOR.MINOR.PATCH`, optional
//!   `-suffix` made of alphanumerics and dots;
//! - a commit hash: 7 to 40 hex characters and nothing else.
//!
//! Anything else is custom, including every branch-style value such as
//! `feature/x`.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::OnceLock;

/// Reserved words used when no override is configured.
pub const DEFAULT_RESERVED_WORDS: &[&str] = &["latest", "stable", "production"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Custom,
    Standard,
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagClass::Custom => f.write_str("custom"),
            TagClass::Standard => f.write_str("standard"),
        }
    }
}

fn semver_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"^v?\d+\.\d+\.\d+(-[0-9a-z.]+)?$")
            .case_insensitive(true)
            .build()
            .expect("semver pattern compiles")
    })
}

fn commit_hash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"^[0-9a-f]{7,40}$")
            .case_insensitive(true)
            .build()
            .expect("commit hash pattern compiles")
    })
}

/// Classifier with a configurable reserved-word list.
#[derive(Debug, Clone)]
pub struct Classifier {
    reserved: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_WORDS.iter().copied())
    }
}

impl Classifier {
    pub fn new<I, S>(reserved_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reserved = reserved_words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { reserved }
    }

    pub fn reserved_words(&self) -> &[String] {
        &self.reserved
    }

    /// Classify a raw tag value. Quotes and trailing comments are removed
    /// first, so both scanner output and user input can be passed as-is.
    pub fn classify(&self, raw: &str) -> TagClass {
        let tag = normalize_tag_value(raw);
        let lowered = tag.to_lowercase();
        if self.reserved.iter().any(|w| *w == lowered) {
            return TagClass::Standard;
        }
        if semver_re().is_match(tag) || commit_hash_re().is_match(tag) {
            return TagClass::Standard;
        }
        TagClass::Custom
    }

    pub fn is_custom(&self, raw: &str) -> bool {
        self.classify(raw) == TagClass::Custom
    }
}

/// Strip a trailing `#` comment (outside a leading quoted part), surrounding whitespace
/// and one layer of matching quotes.
pub fn normalize_tag_value(raw: &str) -> &str {
    let uncommented = strip_inline_comment(raw).trim();
    strip_matching_quotes(uncommented)
}

fn strip_inline_comment(s: &str) -> &str {
    // Only a leading quote opens a quoted scalar; `it's` is plain text.
    let start = s.len() - s.trim_start().len();
    let body = &s[start..];
    let scan_from = match body.chars().next() {
        Some(q @ ('"' | '\'')) => match body[1..].find(q) {
            Some(end) => start + end + 2,
            None => return s,
        },
        _ => start,
    };
    match s[scan_from..].find('#') {
        Some(i) => &s[..scan_from + i],
        None => s,
    }
}

fn strip_matching_quotes(s: &str) -> &str {
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
