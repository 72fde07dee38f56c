//! Ancestor-list tokenizing and resolution.

use regex::Regex;
use std::sync::LazyLock;

/// A quoted token, or a bare run of characters outside list punctuation.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'([^']*)'|"([^"]*)"|([^,\[\]\s'"]+)"#).unwrap());

/// Split a list literal such as `[0]`, `['none']` or `[1, 2]` into raw tokens.
pub fn parse_ancestor_list(cell: &str) -> Vec<String> {
    TOKEN_PATTERN
        .captures_iter(cell)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Integer form of an ancestor token, or `None` for a sentinel such as `none`.
pub fn resolve_ancestor(token: &str) -> Option<i64> {
    token.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_lists() {
        assert_eq!(parse_ancestor_list("[0]"), vec!["0"]);
        assert_eq!(parse_ancestor_list("[1, 2]"), vec!["1", "2"]);
        assert_eq!(parse_ancestor_list("[ 3 ,4 ]"), vec!["3", "4"]);
    }

    #[test]
    fn quoted_tokens() {
        assert_eq!(parse_ancestor_list("['none']"), vec!["none"]);
        assert_eq!(parse_ancestor_list(r#"["seed", '7']"#), vec!["seed", "7"]);
    }

    #[test]
    fn empty_list() {
        assert!(parse_ancestor_list("[]").is_empty());
        assert!(parse_ancestor_list("").is_empty());
    }

    #[test]
    fn bare_sentinel() {
        assert_eq!(parse_ancestor_list("none"), vec!["none"]);
    }

    #[test]
    fn resolution() {
        assert_eq!(resolve_ancestor("12"), Some(12));
        assert_eq!(resolve_ancestor(" 12 "), Some(12));
        assert_eq!(resolve_ancestor("none"), None);
        assert_eq!(resolve_ancestor("1.0"), None);
    }
}
