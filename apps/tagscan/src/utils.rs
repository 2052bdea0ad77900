//! Colored message prefixes shared by the binary's diagnostics.

use owo_colors::OwoColorize;

/// Colors are disabled by `NO_COLOR`.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if use_colors() {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn warn_prefix() -> String {
    prefix("warning:", |s| s.yellow().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.blue().bold().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_keep_label_text() {
        assert!(error_prefix().contains("error:"));
        assert!(warn_prefix().contains("warning:"));
        assert!(note_prefix().contains("note:"));
    }
}
