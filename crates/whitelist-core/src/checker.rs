//! Read-only access checking over a rule set snapshot

use std::path::Path;

use crate::matcher::Matcher;
use crate::store::{self, WhitelistError};

/// Answers whether paths are permitted by a whitelist.
///
/// An `AccessChecker` holds an immutable snapshot of compiled matchers
/// taken when it was built; later edits to the rule file are not observed.
/// It performs no I/O after construction, so queries are pure and the
/// checker can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct AccessChecker {
    matchers: Vec<Matcher>,
}

/// Build an access checker over the rule set currently persisted under
/// `root`.
pub fn checker(root: &Path) -> Result<AccessChecker, WhitelistError> {
    let rules = store::load_rules(&store::rule_file_path(root))?;
    Ok(AccessChecker::from_rules(&rules))
}

impl AccessChecker {
    /// Build a checker from an in-memory rule collection, compiling every
    /// rule once up front.
    pub fn from_rules<S>(rules: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        let matchers = rules
            .into_iter()
            .map(|rule| Matcher::compile(rule.as_ref()))
            .collect();
        Self { matchers }
    }

    /// Check whether a path is allowed by the snapshot.
    ///
    /// `\` separators are normalized to `/` and trailing separators are
    /// stripped before matching. A path is allowed when some rule matches
    /// it in full, or when some rule sits beneath it: access to a
    /// directory is implied by access to anything inside it.
    pub fn is_allowed(&self, path: &str) -> bool {
        let normalized = normalize_query(path);

        if self.matchers.iter().any(|m| m.matches(&normalized)) {
            return true;
        }
        if normalized.is_empty() {
            return false;
        }

        let child_prefix = format!("{normalized}/");
        self.matchers
            .iter()
            .any(|m| m.rule().starts_with(&child_prefix))
    }

    /// Check a filesystem path. Non-UTF-8 paths are never allowed.
    pub fn is_allowed_path(&self, path: &Path) -> bool {
        match path.to_str() {
            Some(path) => self.is_allowed(path),
            None => false,
        }
    }

    /// The rule texts captured in this snapshot.
    pub fn rules(&self) -> impl Iterator<Item = &str> + '_ {
        self.matchers.iter().map(Matcher::rule)
    }
}

/// Normalize a query path for matching.
fn normalize_query(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized.trim_end_matches('/').to_string()
}
