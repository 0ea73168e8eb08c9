use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

/// Extension of Qt Linguist translation sources.
pub const CATALOG_EXTENSION: &str = "ts";

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning for catalog files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, so reports are stable across runs.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// Compiled `ignores` from the config file.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    pub fn new(base_dir: &Path, ignore_patterns: &[String]) -> Self {
        let mut set = Self::default();
        for p in ignore_patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => set.patterns.push(pattern),
                    Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
                }
            } else {
                set.literal_paths.push(base_dir.join(p));
            }
        }
        set
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        if self
            .literal_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Recursively collect `*.ts` files under `dir`, skipping ignored paths and
/// hidden directories.
pub fn scan_catalog_files(dir: &Path, ignores: &IgnoreSet) -> ScanResult {
    let mut result = ScanResult::default();

    let walker = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();

        if ignores.is_ignored(path) {
            tracing::debug!("Ignoring {}", path.display());
            continue;
        }

        if entry.file_type().is_file() && is_catalog_file(path) {
            result.files.insert(path.to_path_buf());
        }
    }

    result
}

pub fn is_catalog_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(CATALOG_EXTENSION)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
