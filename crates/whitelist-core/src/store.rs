//! Rule file persistence
//!
//! Rules live in a plain UTF-8 text file, one rule per line. Reads trim
//! surrounding whitespace and drop blank lines; writes fully overwrite the
//! file, sorted lexicographically with a trailing newline per line.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Name of the rule file kept under a whitelist root.
pub const RULE_FILE_NAME: &str = ".whitelist.txt";

/// Errors that can occur while reading or writing a rule file.
#[derive(Debug, Error)]
pub enum WhitelistError {
    /// Failed to read the rule file.
    #[error("failed to read rule file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Failed to write the rule file.
    #[error("failed to write rule file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Path of the rule file for a whitelist root.
pub fn rule_file_path(root: &Path) -> PathBuf {
    root.join(RULE_FILE_NAME)
}

/// Load the rule set from a rule file.
///
/// A missing file is an empty rule set, not an error.
pub fn load_rules(rule_file: &Path) -> Result<BTreeSet<String>, WhitelistError> {
    let contents = match fs::read_to_string(rule_file) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => {
            return Err(WhitelistError::Read {
                path: rule_file.to_path_buf(),
                source: e,
            })
        }
    };

    let rules: BTreeSet<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!(file = %rule_file.display(), count = rules.len(), "loaded rules");
    Ok(rules)
}

/// Save a rule set to a rule file, fully overwriting prior contents.
///
/// The parent directory is created if it does not exist yet.
pub fn save_rules(rule_file: &Path, rules: &BTreeSet<String>) -> Result<(), WhitelistError> {
    let write_error = |source| WhitelistError::Write {
        path: rule_file.to_path_buf(),
        source,
    };

    if let Some(parent) = rule_file.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut contents = String::new();
    for rule in rules {
        contents.push_str(rule);
        contents.push('\n');
    }
    fs::write(rule_file, contents).map_err(write_error)?;

    debug!(file = %rule_file.display(), count = rules.len(), "saved rules");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rule_set(rules: &[&str]) -> BTreeSet<String> {
        rules.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_missing_file_loads_as_empty_set() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let file = rule_file_path(temp_dir.path());

        let rules = load_rules(&file).expect("Should load");
        assert!(rules.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let file = rule_file_path(temp_dir.path());

        let rules = rule_set(&["foo/bar", "goo/bat"]);
        save_rules(&file, &rules).expect("Should save");

        assert_eq!(load_rules(&file).expect("Should load"), rules);
    }

    #[test]
    fn test_saved_file_is_sorted_with_trailing_newlines() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let file = rule_file_path(temp_dir.path());

        save_rules(&file, &rule_set(&["zoo", "bar/baz", "foo/*"])).expect("Should save");

        let contents = fs::read_to_string(&file).expect("Should read back");
        assert_eq!(contents, "bar/baz\nfoo/*\nzoo\n");
    }

    #[test]
    fn test_load_trims_whitespace_and_skips_blank_lines() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let file = rule_file_path(temp_dir.path());

        fs::write(&file, "  foo/bar  \n\n\tgoo/bat\n   \n").expect("Should write");

        assert_eq!(
            load_rules(&file).expect("Should load"),
            rule_set(&["foo/bar", "goo/bat"])
        );
    }

    #[test]
    fn test_save_overwrites_prior_contents() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let file = rule_file_path(temp_dir.path());

        save_rules(&file, &rule_set(&["foo/bar", "goo/bat"])).expect("Should save");
        save_rules(&file, &rule_set(&["baz"])).expect("Should save again");

        assert_eq!(load_rules(&file).expect("Should load"), rule_set(&["baz"]));
    }

    #[test]
    fn test_save_creates_missing_parent_directory() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let root = temp_dir.path().join("nested").join("root");
        let file = rule_file_path(&root);

        save_rules(&file, &rule_set(&["foo"])).expect("Should save");
        assert_eq!(load_rules(&file).expect("Should load"), rule_set(&["foo"]));
    }

    #[test]
    fn test_save_failure_propagates_as_write_error() {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        // A regular file where a directory is needed makes the save fail.
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("Should write blocker");

        let file = rule_file_path(&blocker.join("root"));
        let err = save_rules(&file, &rule_set(&["foo"])).expect_err("Should fail");
        assert!(matches!(err, WhitelistError::Write { .. }));
    }
}
