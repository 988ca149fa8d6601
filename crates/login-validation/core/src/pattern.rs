//! Pattern matching with HTML `pattern` attribute semantics

use regex::Regex;
use tracing::warn;

/// Compile a pattern the way a browser compiles a `pattern` attribute:
/// anchored at both ends, so the whole value must match.
///
/// A pattern that does not compile imposes no constraint; `None` is returned
/// and the failure is logged.
pub fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(pattern, error = %e, "ignoring field pattern that does not compile");
            None
        }
    }
}

/// Check a value against an optional pattern. No pattern means no constraint.
pub fn matches(value: &str, pattern: Option<&str>) -> bool {
    match pattern.and_then(compile) {
        Some(regex) => regex.is_match(value),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{EMAIL_PATTERN, PASSWORD_PATTERN};
    use rstest::rstest;

    #[rstest]
    #[case("you@yourdomain.com", true)]
    #[case("first.last@mail.example.org", true)]
    #[case("under_score-dash@my-host.io", true)]
    #[case("a@b.co", true)]
    #[case("", false)]
    #[case("you@yourdomain", false)]
    #[case("You@yourdomain.com", false)]
    #[case("you@@yourdomain.com", false)]
    #[case("you@yourdomain.museum", false)]
    #[case("you@yourdomain.c0m", false)]
    #[case(".you@yourdomain.com", false)]
    #[case("-a_b-@my-host.com", true)]
    #[case("you@yourdomain.com\n", false)]
    #[case("you yourdomain.com", false)]
    fn test_email_pattern(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(matches(value, Some(EMAIL_PATTERN)), expected, "value: {value:?}");
    }

    #[rstest]
    #[case("weak1", true)]
    #[case("1abc", true)]
    #[case("abc1", true)]
    #[case("1234", true)]
    #[case("abcdefg1", true)]
    #[case("1bcdefgh", true)]
    #[case("ab1", false)]
    #[case("abcdefgh1", false)]
    #[case("abcdefgh", false)]
    #[case("abcd", false)]
    #[case("", false)]
    #[case("ééé1", true)]
    #[case("ab\n1", true)]
    #[case("1\n\n\n", true)]
    #[case("ab\r12", true)]
    #[case("\n\n\n\n", false)]
    fn test_password_pattern(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(matches(value, Some(PASSWORD_PATTERN)), expected, "value: {value:?}");
    }

    #[test]
    fn test_password_pattern_agrees_with_its_definition() {
        let regex = compile(PASSWORD_PATTERN).unwrap();
        let alphabet = ['a', '7', '\n', '\r', 'Z'];
        for len in 0..=9usize {
            let mut indices = vec![0usize; len];
            loop {
                let value: String = indices.iter().map(|&i| alphabet[i]).collect();
                let expected = (4..=8).contains(&len) && value.chars().any(|c| c.is_ascii_digit());
                assert_eq!(regex.is_match(&value), expected, "value: {value:?}");

                // Next combination, odometer style
                let mut pos = 0;
                while pos < len && indices[pos] == alphabet.len() - 1 {
                    indices[pos] = 0;
                    pos += 1;
                }
                if pos == len {
                    break;
                }
                indices[pos] += 1;
            }
        }
    }

    #[test]
    fn test_email_pattern_escapes_class_hyphens() {
        assert!(!EMAIL_PATTERN.contains("-]"));
        assert!(EMAIL_PATTERN.contains(r"\-]"));
    }

    #[test]
    fn test_missing_pattern_is_no_constraint() {
        assert!(matches("", None));
        assert!(matches("anything at all", None));
    }

    #[test]
    fn test_broken_pattern_is_no_constraint() {
        assert!(compile("([unclosed").is_none());
        assert!(matches("value", Some("([unclosed")));
    }

    #[test]
    fn test_pattern_is_anchored() {
        assert!(matches("abc", Some("abc")));
        assert!(!matches("xabcx", Some("abc")));
        assert!(matches("b", Some("a|b")));
        assert!(!matches("ab", Some("a|b")));
    }
}
