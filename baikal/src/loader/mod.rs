//! Catalog loader
//!
//! Loads a directory of catalog fragments into a [`Store`]. Each fragment
//! is all-or-nothing: a file that fails to parse, or that would duplicate
//! an id, is skipped whole and counted as an error.

use crate::error::{Error, Result};
use crate::parser::parse_catalog;
use crate::scanner::Scanner;
use crate::store::Store;
use std::path::Path;
use std::time::{Duration, Instant};

/// Statistics from a load
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Number of files found by the scanner, including unreadable ones
    pub files_scanned: usize,
    /// Number of files merged into the store
    pub files_loaded: usize,
    /// Number of records merged into the store
    pub records_loaded: usize,
    /// Number of files rejected
    pub errors: usize,
    /// Time taken
    pub duration: Duration,
}

/// Progress callback for loading
pub trait LoadProgress {
    /// Called when a file is processed
    fn on_file(&mut self, path: &Path, status: FileStatus);
    /// Called when loading is complete
    fn on_complete(&mut self, stats: &LoadStats);
}

/// Status of a file during loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// File was merged, with this many records
    Loaded(usize),
    /// File was rejected
    Error(String),
}

/// Catalog loader
pub struct Loader<'a> {
    store: &'a mut Store,
}

impl<'a> Loader<'a> {
    /// Create a new loader writing into `store`
    pub fn new(store: &'a mut Store) -> Self {
        Loader { store }
    }

    /// Load every catalog file under `root`
    pub fn load_dir(&mut self, root: &Path, patterns: &[&str], exclude: &[&str]) -> Result<LoadStats> {
        self.load_dir_with_progress(root, patterns, exclude, &mut NoopProgress)
    }

    /// Load every catalog file under `root`, reporting per-file progress
    pub fn load_dir_with_progress(
        &mut self,
        root: &Path,
        patterns: &[&str],
        exclude: &[&str],
        progress: &mut dyn LoadProgress,
    ) -> Result<LoadStats> {
        let start = Instant::now();
        let mut stats = LoadStats::default();

        let scanner = Scanner::new(root, patterns, exclude)?;

        for scanned in scanner.scan() {
            stats.files_scanned += 1;

            let scan_result = match scanned {
                Ok(scan_result) => scan_result,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    let e = Error::from(walk_err);
                    stats.errors += 1;
                    progress.on_file(&path, FileStatus::Error(e.to_string()));
                    tracing::warn!("Error reading {}: {}", path.display(), e);
                    continue;
                }
            };

            match self.load_file(&scan_result.path) {
                Ok(records) => {
                    stats.files_loaded += 1;
                    stats.records_loaded += records;
                    progress.on_file(&scan_result.path, FileStatus::Loaded(records));
                }
                Err(e) => {
                    stats.errors += 1;
                    progress.on_file(&scan_result.path, FileStatus::Error(e.to_string()));
                    tracing::warn!("Error loading {}: {}", scan_result.relative_path, e);
                }
            }
        }

        stats.duration = start.elapsed();
        progress.on_complete(&stats);

        Ok(stats)
    }

    /// Load a single catalog file, returning the number of records merged
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read(path)?;
        let catalog = parse_catalog(path, &content)?;
        let records = catalog.len();
        self.store.merge(catalog)?;
        tracing::debug!("Loaded {} records from {}", records, path.display());
        Ok(records)
    }
}

/// No-op progress reporter
struct NoopProgress;

impl LoadProgress for NoopProgress {
    fn on_file(&mut self, _path: &Path, _status: FileStatus) {}
    fn on_complete(&mut self, _stats: &LoadStats) {}
}
