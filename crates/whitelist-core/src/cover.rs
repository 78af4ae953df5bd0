//! Rule coverage resolution
//!
//! One rule covers another when every path the second rule matches is also
//! matched by the first, making the second rule redundant. Coverage is
//! decided by running the candidate's compiled matcher against the other
//! rule's literal text. This is an approximation of true set containment,
//! not general language-inclusion checking: it is exact when the covered
//! rule is a literal path, and conservative for wildcard-vs-wildcard
//! comparisons. That is sufficient for the path-prefix-style globs this
//! system deals in.

use crate::matcher::Matcher;

/// Check whether `candidate` covers `other`, i.e. whether every path
/// matched by `other` is also matched by `candidate`.
pub fn covers(candidate: &str, other: &str) -> bool {
    Matcher::compile(candidate).matches(other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_covers_literal() {
        assert!(covers("foo/*", "foo/bar"));
        assert!(covers("foo/*", "foo/bar/baz"));
    }

    #[test]
    fn test_literal_does_not_cover_wildcard() {
        assert!(!covers("foo/bar", "foo/*"));
    }

    #[test]
    fn test_rule_covers_itself() {
        assert!(covers("foo/bar", "foo/bar"));
        assert!(covers("foo/*", "foo/*"));
    }

    #[test]
    fn test_recursive_wildcard_covers_nested_literal() {
        assert!(covers("foo/**/bar", "foo/baz/boom/bar"));
    }

    #[test]
    fn test_broad_wildcard_covers_narrow_wildcard() {
        assert!(covers("foo/*", "foo/bar/*"));
        assert!(!covers("foo/bar/*", "foo/*"));
    }

    #[test]
    fn test_unrelated_rules_do_not_cover() {
        assert!(!covers("foo/bar", "goo/bat"));
        assert!(!covers("foo/*", "goo/bat"));
    }

    #[test]
    fn test_question_mark_covers_single_character_rule() {
        assert!(covers("foo/ba?", "foo/bar"));
        assert!(!covers("foo/ba?", "foo/barn"));
    }
}
