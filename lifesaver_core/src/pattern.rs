//! Pattern file discovery.
//!
//! A pattern file is any regular file under the search root whose name ends
//! in `.txt` (ASCII case-insensitive). Symlinks are not followed. Entries are
//! visited in file-name order within each directory, so two walks over an
//! unchanged tree yield the same sequence.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extension that marks a pattern file.
pub const PATTERN_EXTENSION: &str = ".txt";

/// A discovered pattern file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFile {
    /// Path handed to the simulator (root joined with `relative`)
    pub path: PathBuf,

    /// Path relative to the search root
    pub relative: PathBuf,
}

impl PatternFile {
    /// Label used in logs and run summaries.
    pub fn label(&self) -> String {
        self.relative.to_string_lossy().into_owned()
    }
}

/// Returns true if a file name matches `*.txt`, ignoring ASCII case.
pub fn is_pattern_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    let suffix = PATTERN_EXTENSION.as_bytes();
    let bytes = name.as_bytes();
    bytes.len() >= suffix.len() && bytes[bytes.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Recursively collects pattern files under `root`.
///
/// # Errors
/// `CoreError::Discovery` if `root` does not exist, is not a directory, or
/// any entry below it cannot be read.
pub fn discover_patterns(root: &Path) -> Result<Vec<PatternFile>, CoreError> {
    let meta = std::fs::metadata(root).map_err(|e| CoreError::discovery(root, e))?;
    if !meta.is_dir() {
        return Err(CoreError::discovery(root, "not a directory"));
    }

    let mut patterns = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            CoreError::discovery(path, e)
        })?;

        if !entry.file_type().is_file() || !is_pattern_name(entry.file_name()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        patterns.push(PatternFile {
            path: entry.path().to_path_buf(),
            relative,
        });
    }

    debug!("Discovered {} pattern file(s) under {}", patterns.len(), root.display());
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#.#\n.#.\n").unwrap();
    }

    fn labels(patterns: &[PatternFile]) -> Vec<String> {
        patterns.iter().map(PatternFile::label).collect()
    }

    #[test]
    fn test_pattern_name_matching() {
        assert!(is_pattern_name(OsStr::new("glider.txt")));
        assert!(is_pattern_name(OsStr::new("GLIDER.TXT")));
        assert!(is_pattern_name(OsStr::new("b.TxT")));
        assert!(is_pattern_name(OsStr::new(".txt")));
        assert!(!is_pattern_name(OsStr::new("c.dat")));
        assert!(!is_pattern_name(OsStr::new("txt")));
        assert!(!is_pattern_name(OsStr::new("notes.txt.bak")));
    }

    #[test]
    fn test_discover_case_insensitive_recursive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.txt");
        touch(dir.path(), "sub/b.TXT");
        touch(dir.path(), "c.dat");

        let patterns = discover_patterns(dir.path()).unwrap();
        assert_eq!(labels(&patterns), vec!["a.txt", "sub/b.TXT"]);
        assert_eq!(patterns[1].path, dir.path().join("sub/b.TXT"));
    }

    #[test]
    fn test_discover_sorted_and_stable() {
        let dir = TempDir::new().unwrap();
        for name in ["zeta.txt", "alpha.txt", "mid/one.txt", "beta.txt"] {
            touch(dir.path(), name);
        }

        let first = discover_patterns(dir.path()).unwrap();
        let second = discover_patterns(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            labels(&first),
            vec!["alpha.txt", "beta.txt", "mid/one.txt", "zeta.txt"]
        );
    }

    #[test]
    fn test_directories_named_like_patterns_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("folder.txt")).unwrap();
        touch(dir.path(), "folder.txt/inner.txt");

        let patterns = discover_patterns(dir.path()).unwrap();
        assert_eq!(labels(&patterns), vec!["folder.txt/inner.txt"]);
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(discover_patterns(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = discover_patterns(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CoreError::Discovery { .. }));
    }

    #[test]
    fn test_root_is_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "single.txt");
        let err = discover_patterns(&dir.path().join("single.txt")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        touch(outside.path(), "hidden.txt");
        touch(dir.path(), "real.txt");
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("alias.txt"))
            .unwrap();

        let patterns = discover_patterns(dir.path()).unwrap();
        assert_eq!(labels(&patterns), vec!["real.txt"]);
    }
}
