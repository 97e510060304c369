//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use keysync::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("---"));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// First dotted segment of a key, used to group keys by namespace.
///
/// Keys without a dot belong to the root group (`""`).
///
/// ```
/// use keysync::utils::namespace_of;
///
/// assert_eq!(namespace_of("auth.login.title"), "auth");
/// assert_eq!(namespace_of("title"), "");
/// ```
pub fn namespace_of(key: &str) -> &str {
    match key.split_once('.') {
        Some((namespace, _)) => namespace,
        None => "",
    }
}

/// Join a namespace and a key with a dot, skipping empty parts.
pub fn join_key(namespace: Option<&str>, key: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() && !key.is_empty() => format!("{}.{}", ns, key),
        Some(ns) if key.is_empty() => ns.to_string(),
        _ => key.to_string(),
    }
}

/// Percentage helper that treats an empty denominator as full coverage.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Resolve a configured path against `root_dir`.
///
/// When the root is the current directory the configured path is kept as-is
/// so output shows `./messages` rather than `././messages`.
pub fn resolve_path(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let root_is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if root_is_cur_dir {
        p.to_path_buf()
    } else {
        root_dir.join(p.strip_prefix(".").unwrap_or(p))
    }
}
