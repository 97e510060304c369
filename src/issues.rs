//! Issue types produced by source analysis.
//!
//! Every issue is a located finding in one source file. Two severities exist:
//! - `Info`: a key (or bound namespace) reachable from code, consumed by the
//!   key comparison engine
//! - `Warning`: a hardcoded string that should be externalized
//!
//! Issues are immutable values; each file produces a flat `Vec<Issue>`.

use std::{cmp::Ordering, fmt};

use crate::core::BindingKind;
use crate::utils::join_key;

// ============================================================
// Severity
// ============================================================

/// Severity level of a source issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

// ============================================================
// Location
// ============================================================

/// Position in a source file (1-indexed line and column).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
    }
}

// ============================================================
// Issue
// ============================================================

/// The key carried by an info issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyRef {
    /// A literal key, relative to the issue's namespace when bound-scoped.
    Literal(String),
    /// A wildcard pattern built from a template key (`*` = one path segment).
    Pattern(String),
}

impl KeyRef {
    pub fn as_str(&self) -> &str {
        match self {
            KeyRef::Literal(key) | KeyRef::Pattern(key) => key,
        }
    }
}

/// A located finding in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Issue {
    pub location: SourceLocation,
    /// Source snippet (for key usages) or the hardcoded text itself.
    pub text: String,
    pub key: Option<KeyRef>,
    pub namespace: Option<String>,
    pub binding: BindingKind,
    pub severity: Severity,
}

impl Issue {
    /// A key reachable from code.
    pub fn key_usage(
        location: SourceLocation,
        text: impl Into<String>,
        key: KeyRef,
        namespace: Option<String>,
        binding: BindingKind,
    ) -> Self {
        Self {
            location,
            text: text.into(),
            key: Some(key),
            namespace,
            binding,
            severity: Severity::Info,
        }
    }

    /// A bound-scoped accessor declaration. Carries no key; it tells the
    /// comparison engine that the whole namespace is in use.
    pub fn namespace_usage(
        location: SourceLocation,
        text: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            location,
            text: text.into(),
            key: None,
            namespace: Some(namespace.into()),
            binding: BindingKind::Bound,
            severity: Severity::Info,
        }
    }

    /// A hardcoded string that should go through the translation function.
    pub fn hardcoded(location: SourceLocation, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
            key: None,
            namespace: None,
            binding: BindingKind::Unbound,
            severity: Severity::Warning,
        }
    }

    pub fn is_hardcoded(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Literal key as the comparison engine sees it.
    ///
    /// Bound-scoped keys are prefixed with their namespace. Unknown-scoped keys
    /// stay partial (the namespace, if any, is only a hint for reviewers).
    pub fn full_key(&self) -> Option<String> {
        match &self.key {
            Some(KeyRef::Literal(key)) => Some(self.qualify(key)),
            _ => None,
        }
    }

    /// Dynamic pattern as the comparison engine sees it.
    pub fn full_pattern(&self) -> Option<String> {
        match &self.key {
            Some(KeyRef::Pattern(pattern)) => Some(self.qualify(pattern)),
            _ => None,
        }
    }

    fn qualify(&self, key: &str) -> String {
        match self.binding {
            BindingKind::Bound => join_key(self.namespace.as_deref(), key),
            _ => key.to_string(),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location
            .cmp(&other.location)
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| {
                let a = self.key.as_ref().map(KeyRef::as_str);
                let b = other.key.as_ref().map(KeyRef::as_str);
                a.cmp(&b)
            })
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// File could not be parsed; it is skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}
