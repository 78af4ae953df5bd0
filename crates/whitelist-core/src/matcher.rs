//! Rule compilation and path matching
//!
//! Rules are glob-style strings over `/`-separated paths: `*` matches any
//! run of characters (including `/`, so a single `*` is effectively a
//! recursive wildcard), `?` matches exactly one character, and every other
//! character matches itself literally.

use regex::Regex;

/// Characters that carry meaning in a regular expression and must be
/// escaped so they match literally.
const REGEX_METACHARACTERS: &str = r".^$+{}[]|()\";

/// A compiled whitelist rule usable for repeated path matching.
#[derive(Debug, Clone)]
pub struct Matcher {
    rule: String,
    regex: Regex,
}

impl Matcher {
    /// Compile a rule string into a matcher.
    ///
    /// Compilation never fails: wildcards are translated and every other
    /// character, including unbalanced brackets, is matched literally.
    pub fn compile(rule: &str) -> Self {
        let pattern = translate(rule);
        // The translated pattern contains only escaped literals and dot
        // atoms, so it is always a valid regex.
        let regex = Regex::new(&pattern).expect("translated rule is a valid regex");
        Self {
            rule: rule.to_string(),
            regex,
        }
    }

    /// The rule text this matcher was compiled from.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Test whether a path satisfies this rule.
    ///
    /// The whole path must match; there are no substring matches. An empty
    /// rule matches only the empty path.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Translate a glob rule into an anchored regex pattern.
fn translate(rule: &str) -> String {
    let mut pattern = String::with_capacity(rule.len() + 2);
    pattern.push('^');

    let mut chars = rule.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                // A run of consecutive stars collapses into one wildcard.
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                pattern.push_str(".*");
            }
            '?' => pattern.push('.'),
            c if REGEX_METACHARACTERS.contains(c) => {
                pattern.push('\\');
                pattern.push(c);
            }
            c => pattern.push(c),
        }
    }

    pattern.push('$');
    pattern
}
