//! Rule set editing
//!
//! `add` and `remove` each perform one full load, an in-memory
//! transformation, and one full save against the root's rule file. The
//! persisted set stays minimal with respect to coverage: no stored rule
//! ever covers another.

use std::path::Path;

use tracing::{debug, trace};

use crate::cover::covers;
use crate::store::{self, WhitelistError};

/// Characters that make a rule a wildcard pattern rather than a literal
/// path.
const WILDCARD_CHARACTERS: &[char] = &['*', '?', '[', ']'];

/// Add rules to the whitelist under `root`.
///
/// Rules are processed in input order. A rule already covered by the
/// working set (persisted rules plus rules accepted earlier in the same
/// call) is skipped; an accepted rule prunes every working-set rule it
/// covers before being inserted.
pub fn add<S: AsRef<str>>(root: &Path, rules: &[S]) -> Result<(), WhitelistError> {
    let rule_file = store::rule_file_path(root);
    let mut working = store::load_rules(&rule_file)?;

    for rule in rules {
        let rule = rule.as_ref();
        if working.iter().any(|existing| covers(existing, rule)) {
            trace!(rule, "skipped rule covered by the working set");
            continue;
        }

        let absorbed: Vec<String> = working
            .iter()
            .filter(|existing| covers(rule, existing))
            .cloned()
            .collect();
        for existing in absorbed {
            trace!(rule, absorbed = existing.as_str(), "pruned covered rule");
            working.remove(&existing);
        }

        trace!(rule, "accepted rule");
        working.insert(rule.to_string());
    }

    debug!(root = %root.display(), count = working.len(), "added rules");
    store::save_rules(&rule_file, &working)
}

/// Remove rules from the whitelist under `root`.
///
/// Each rule removes itself if present. A rule without wildcard
/// characters is treated as a literal directory path and also removes
/// every persisted rule nested beneath it; wildcard rules only ever remove
/// themselves. Rules subsumed by a broader persisted rule do not delete
/// that broader rule.
pub fn remove<S: AsRef<str>>(root: &Path, rules: &[S]) -> Result<(), WhitelistError> {
    let rule_file = store::rule_file_path(root);
    let mut working = store::load_rules(&rule_file)?;

    for rule in rules {
        let rule = rule.as_ref();
        working.remove(rule);

        if !rule.contains(WILDCARD_CHARACTERS) {
            let prefix = format!("{}/", rule.trim_end_matches('/'));
            working.retain(|existing| !existing.starts_with(&prefix));
        }
    }

    debug!(root = %root.display(), count = working.len(), "removed rules");
    store::save_rules(&rule_file, &working)
}
