//! Prefix helpers
//!
//! The store has flat keys; folders are emulated with `/`-terminated prefixes.
//! These helpers derive display names and keys from prefixes.

/// Fallback display name for a prefix with no usable segment
const UNKNOWN_NAME: &str = "Unknown";

/// Display name of a common prefix listed under `parent`
///
/// Strips `parent` and the trailing `/`. Falls back to the last non-empty
/// segment of the prefix when stripping leaves nothing.
pub fn folder_name(common_prefix: &str, parent: &str) -> String {
    let relative = common_prefix
        .strip_prefix(parent)
        .unwrap_or(common_prefix)
        .trim_end_matches('/');

    if !relative.is_empty() {
        return relative.to_string();
    }

    common_prefix
        .split('/')
        .rfind(|segment| !segment.is_empty())
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

/// Display name of an object key: everything after the last `/`
pub fn file_name(key: &str) -> &str {
    match key.rfind('/') {
        Some(pos) => &key[pos + 1..],
        None => key,
    }
}

/// Key for a file named `name` placed under `prefix`
pub fn object_key(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name_strips_parent() {
        assert_eq!(folder_name("docs/", ""), "docs");
        assert_eq!(folder_name("docs/reports/", "docs/"), "reports");
    }

    #[test]
    fn test_folder_name_unrelated_parent() {
        // Parent does not prefix the common prefix; only the slash is dropped
        assert_eq!(folder_name("a/b/", "x/"), "a/b");
    }

    #[test]
    fn test_folder_name_fallback() {
        // A "//" common prefix under "docs/" strips down to nothing
        assert_eq!(folder_name("docs//", "docs//"), "docs");
        assert_eq!(folder_name("/", "/"), "Unknown");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("docs/report.pdf"), "report.pdf");
        assert_eq!(file_name("report.pdf"), "report.pdf");
        assert_eq!(file_name("docs/"), "");
    }

    #[test]
    fn test_object_key() {
        assert_eq!(object_key("docs/", "report.pdf"), "docs/report.pdf");
        assert_eq!(object_key("", "report.pdf"), "report.pdf");
    }
}
