//! Source file discovery.
//!
//! `includes` and `ignores` entries without `*` or `?` are literal paths
//! relative to the source root, so `app/[locale]` needs no escaping. Entries
//! with wildcards are glob patterns.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::{Config, TEST_FILE_PATTERNS};

const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "mts", "cts", "mjs", "cjs"];

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn warn(verbose: bool, message: impl std::fmt::Display) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

/// Files found under the source root, sorted by path.
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    pub files: BTreeSet<String>,
    /// Entries that could not be read (permissions, broken links).
    pub skipped_count: usize,
}

/// Paths excluded from discovery.
struct IgnoreSet {
    literal: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, ignores: &[String], ignore_test_files: bool, verbose: bool) -> Self {
        let mut literal = Vec::new();
        let mut globs = Vec::new();

        for entry in ignores {
            if !is_glob_pattern(entry) {
                literal.push(base_dir.join(entry));
                continue;
            }
            match Pattern::new(entry) {
                Ok(pattern) => globs.push(pattern),
                Err(e) => warn(verbose, format!("Invalid ignore pattern '{}': {}", entry, e)),
            }
        }

        if ignore_test_files {
            globs.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self { literal, globs }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.literal.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.globs.iter().any(|p| p.matches(&path_str))
    }
}

/// Directories to walk: the base dir itself when `includes` is empty.
fn include_roots(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for include in includes {
        let full = base_dir.join(include);
        if !is_glob_pattern(include) {
            if full.exists() {
                roots.push(full);
            } else {
                warn(
                    verbose,
                    format!("Include path does not exist: {}", full.display()),
                );
            }
            continue;
        }
        match glob(&full.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|p| p.is_dir())),
            Err(e) => warn(verbose, format!("Invalid glob pattern '{}': {}", include, e)),
        }
    }
    roots
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Walk the include roots under `base_dir` and collect source files.
///
/// Overlapping includes are deduplicated; ignored paths and, when enabled,
/// test files are skipped.
pub fn discover_source_files(base_dir: &Path, config: &Config, verbose: bool) -> DiscoveredFiles {
    let ignore_set = IgnoreSet::new(
        base_dir,
        &config.ignores,
        config.ignore_test_files,
        verbose,
    );
    let mut discovered = DiscoveredFiles::default();

    for root in include_roots(base_dir, &config.includes, verbose) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    discovered.skipped_count += 1;
                    warn(verbose, format!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && is_source_file(path) && !ignore_set.is_ignored(path)
            {
                discovered.files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    discovered
}
