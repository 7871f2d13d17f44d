//! SQL utility functions

/// Quote a value as a ClickHouse string literal
///
/// Backslashes and single quotes are escaped with a backslash, so the
/// literal always evaluates to exactly the input text.
///
/// # Example
///
/// ```
/// use loghouse_query::utils::sql::quote_string_literal;
///
/// assert_eq!(quote_string_literal("it's"), "'it\\'s'");
/// ```
pub fn quote_string_literal(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Remove every `/` from a regex operand
///
/// Filter expressions may carry regexes in `/.../` form; ClickHouse `match`
/// takes the bare pattern.
pub fn strip_regex_delimiters(s: &str) -> String {
    s.replace('/', "")
}

/// Check whether a value contains a SQL LIKE wildcard (`%` or `_`)
pub fn has_like_wildcard(s: &str) -> bool {
    s.contains(|c: char| c == '%' || c == '_')
}

/// Check that a name is safe to emit unquoted as a column identifier
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string_literal_plain() {
        assert_eq!(quote_string_literal("hello"), "'hello'");
    }

    #[test]
    fn test_quote_string_literal_single_quote() {
        assert_eq!(quote_string_literal("o'brien"), r"'o\'brien'");
    }

    #[test]
    fn test_quote_string_literal_backslash() {
        assert_eq!(quote_string_literal(r"\d+"), r"'\\d+'");
    }

    #[test]
    fn test_quote_string_literal_injection_attempt() {
        assert_eq!(
            quote_string_literal("x') OR 1=1 --"),
            r"'x\') OR 1=1 --'"
        );
    }

    #[test]
    fn test_quote_string_literal_empty() {
        assert_eq!(quote_string_literal(""), "''");
    }

    #[test]
    fn test_strip_regex_delimiters() {
        assert_eq!(strip_regex_delimiters("foo/bar"), "foobar");
        assert_eq!(strip_regex_delimiters("/^err.*/"), "^err.*");
        assert_eq!(strip_regex_delimiters("plain"), "plain");
    }

    #[test]
    fn test_has_like_wildcard() {
        assert!(has_like_wildcard("%abc%"));
        assert!(has_like_wildcard("a_b"));
        assert!(!has_like_wildcard("abc"));
        assert!(!has_like_wildcard(""));
    }

    #[test]
    fn test_is_plain_identifier() {
        assert!(is_plain_identifier("pod_name"));
        assert!(is_plain_identifier("_private"));
        assert!(is_plain_identifier("host2"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("2host"));
        assert!(!is_plain_identifier("pod-name"));
        assert!(!is_plain_identifier("host; DROP TABLE logs"));
    }
}
