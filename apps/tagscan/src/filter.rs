//! Service exclusion by name suffix.

/// Suffix excluded when no override is configured.
pub const DEFAULT_EXCLUDE_SUFFIX: &str = "-limited";

/// Drops services whose name ends with any configured suffix (case-sensitive).
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    suffixes: Vec<String>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new([DEFAULT_EXCLUDE_SUFFIX])
    }
}

impl ExclusionFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let suffixes = suffixes
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
        Self { suffixes }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn keep(&self, service: &str) -> bool {
        !self.suffixes.iter().any(|s| service.ends_with(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drops_limited_services() {
        let f = ExclusionFilter::default();
        assert!(!f.keep("worker-limited"));
        assert!(f.keep("worker"));
        assert!(f.keep("limited-worker"));
        assert!(f.keep("worker-LIMITED"));
    }

    #[test]
    fn test_empty_suffixes_keep_everything() {
        let f = ExclusionFilter::new(Vec::<String>::new());
        assert!(f.keep("worker-limited"));
        let f = ExclusionFilter::new([""]);
        assert!(f.suffixes().is_empty());
    }

    #[test]
    fn test_any_suffix_excludes() {
        let f = ExclusionFilter::new(["-limited", "-canary"]);
        assert!(!f.keep("api-canary"));
        assert!(!f.keep("api-limited"));
        assert!(f.keep("api"));
    }
}
