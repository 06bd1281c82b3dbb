//! Scanner for discovering catalog fragment files

use crate::error::Result;
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Patterns picked up when none are given
pub const DEFAULT_PATTERNS: &[&str] = &["**/*.json", "**/*.yaml", "**/*.yml"];

/// Directories never descended into
const EXCLUDED_DIRS: &[&str] = &["node_modules", "target", "dist", "build", ".next"];

/// A discovered catalog file
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: String,
}

/// Scanner for catalog files matching patterns
pub struct Scanner {
    /// Root directory to scan
    root: PathBuf,
    /// Include patterns (glob)
    patterns: Vec<Pattern>,
    /// Exclude patterns (glob)
    exclude: Vec<Pattern>,
}

impl Scanner {
    /// Create a new scanner. Empty `patterns` means [`DEFAULT_PATTERNS`].
    pub fn new<P: AsRef<Path>>(root: P, patterns: &[&str], exclude: &[&str]) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let patterns = if patterns.is_empty() {
            DEFAULT_PATTERNS
        } else {
            patterns
        };

        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let exclude = exclude
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Scanner { root, patterns, exclude })
    }

    /// Scan for all matching files, in file-name order at every level so
    /// fragments always load in the same sequence.
    ///
    /// Walk failures are yielded as errors when they concern a directory or
    /// a file the patterns would have picked up (a dangling symlink named
    /// `*.json`, an unreadable subdirectory).
    pub fn scan(&self) -> impl Iterator<Item = std::result::Result<ScanResult, walkdir::Error>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()))
            .filter_map(move |entry| match entry {
                Ok(e) => {
                    if !e.file_type().is_file() || !self.matches(e.path()) {
                        return None;
                    }
                    let relative_path = e
                        .path()
                        .strip_prefix(&self.root)
                        .ok()?
                        .to_string_lossy()
                        .replace('\\', "/");

                    Some(Ok(ScanResult {
                        path: e.path().to_path_buf(),
                        relative_path,
                    }))
                }
                Err(err) => self.is_relevant_failure(&err).then_some(Err(err)),
            })
    }

    fn is_relevant_failure(&self, err: &walkdir::Error) -> bool {
        match err.path() {
            Some(path) => !self.is_excluded(path) && (path.is_dir() || self.matches(path)),
            None => true,
        }
    }

    /// Check if a path matches any include pattern
    fn matches(&self, path: &Path) -> bool {
        let relative = path
            .strip_prefix(&self.root)
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        let options = glob::MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };

        self.patterns.iter().any(|p| {
            // "**/*.json" should also match a file directly under the root
            if let Some(suffix) = p.as_str().strip_prefix("**/") {
                if let Ok(suffix_pattern) = Pattern::new(suffix) {
                    if suffix_pattern.matches_with(filename, options) {
                        return true;
                    }
                }
            }

            p.matches_with(&relative, options) || p.matches_with(filename, options)
        })
    }

    /// Check if a path should be excluded
    fn is_excluded(&self, path: &Path) -> bool {
        if path == self.root {
            return false;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with('.') {
            return true;
        }

        if path.is_dir() && EXCLUDED_DIRS.contains(&name) {
            return true;
        }

        let relative = path
            .strip_prefix(&self.root)
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();

        self.exclude.iter().any(|p| p.matches(&relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(path: &Path, content: &[u8]) {
        File::create(path).unwrap().write_all(content).unwrap();
    }

    #[test]
    fn test_scanner_default_patterns() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("services")).unwrap();

        touch(&dir.path().join("content.yaml"), b"content: []");
        touch(&dir.path().join("notes.md"), b"# not a catalog");
        touch(&dir.path().join("services/cloud.json"), b"{}");
        touch(&dir.path().join("services/ai.yml"), b"services: []");

        let scanner = Scanner::new(dir.path(), &[], &[]).unwrap();
        let results: Vec<_> = scanner.scan().map(|r| r.unwrap()).collect();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| !r.relative_path.ends_with(".md")));
    }

    #[test]
    fn test_scanner_sorted_order() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("b.json"), b"{}");
        touch(&dir.path().join("a.json"), b"{}");
        touch(&dir.path().join("c.json"), b"{}");

        let scanner = Scanner::new(dir.path(), &[], &[]).unwrap();
        let names: Vec<_> = scanner.scan().map(|r| r.unwrap().relative_path).collect();

        assert_eq!(names, vec!["a.json", "b.json", "c.json"]);
    }

    #[test]
    fn test_scanner_exclude() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::create_dir_all(dir.path().join("drafts")).unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();

        touch(&dir.path().join("catalog.json"), b"{}");
        touch(&dir.path().join("node_modules/package.json"), b"{}");
        touch(&dir.path().join("drafts/wip.json"), b"{}");
        touch(&dir.path().join(".cache/stale.json"), b"{}");

        let scanner = Scanner::new(dir.path(), &[], &["drafts"]).unwrap();
        let results: Vec<_> = scanner.scan().map(|r| r.unwrap()).collect();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relative_path, "catalog.json");
    }

    #[test]
    fn test_scanner_custom_patterns() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("portfolio.yaml"), b"portfolio: []");
        touch(&dir.path().join("services.json"), b"{}");

        let scanner = Scanner::new(dir.path(), &["*.yaml"], &[]).unwrap();
        let results: Vec<_> = scanner.scan().map(|r| r.unwrap()).collect();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relative_path, "portfolio.yaml");
    }

    #[cfg(unix)]
    #[test]
    fn test_scanner_reports_dangling_symlink() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.yaml"), b"services: []");
        std::os::unix::fs::symlink(dir.path().join("missing.json"), dir.path().join("b.json")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing.md"), dir.path().join("c.md")).unwrap();

        let scanner = Scanner::new(dir.path(), &[], &[]).unwrap();
        let results: Vec<_> = scanner.scan().collect();

        // the dangling .md link is not a catalog file and stays silent
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().relative_path, "a.yaml");
        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.path(), Some(dir.path().join("b.json").as_path()));
    }

    #[test]
    fn test_scanner_invalid_pattern() {
        let dir = tempdir().unwrap();
        assert!(Scanner::new(dir.path(), &["[unclosed"], &[]).is_err());
    }
}
