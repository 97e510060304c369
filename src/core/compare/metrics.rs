//! Comparison result between code-reachable keys and a remote key tree.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Result, ensure};

use crate::core::BindingKind;
use crate::utils::{namespace_of, percentage};

/// Keys grouped by first path segment (`""` for single-segment keys).
pub type GroupedKeys = BTreeMap<String, Vec<String>>;

/// Number of extracted keys and patterns per binding classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingCounts {
    pub root: usize,
    pub bound: usize,
    pub unknown: usize,
    pub unbound: usize,
}

impl BindingCounts {
    pub fn record(&mut self, kind: BindingKind) {
        match kind {
            BindingKind::Root => self.root += 1,
            BindingKind::Bound => self.bound += 1,
            BindingKind::Unknown => self.unknown += 1,
            BindingKind::Unbound => self.unbound += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.root + self.bound + self.unknown + self.unbound
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncMetrics {
    /// Keys reachable from code after container expansion and fuzzy matching.
    pub all_local: BTreeSet<String>,
    pub all_remote_leaves: BTreeSet<String>,
    pub intersection: BTreeSet<String>,
    /// In code, not in the catalog.
    pub missing: GroupedKeys,
    /// In the catalog, not reachable from code.
    pub unused: GroupedKeys,
    /// Catalog leaves reachable only through a dynamic pattern.
    pub dynamic_review_required: BTreeSet<String>,
    /// Every catalog leaf matched by a dynamic pattern.
    pub dynamic_matched: BTreeSet<String>,
    /// Partial key → every leaf adopted for it.
    pub ambiguous_matches: BTreeMap<String, Vec<String>>,
    pub binding_counts: BindingCounts,
    pub local_coverage: f64,
    pub remote_coverage: f64,
}

impl SyncMetrics {
    pub fn missing_count(&self) -> usize {
        self.missing.values().map(Vec::len).sum()
    }

    pub fn unused_count(&self) -> usize {
        self.unused.values().map(Vec::len).sum()
    }

    /// Keys that code can reach, dynamic matches included.
    pub fn code_keys(&self) -> BTreeSet<String> {
        self.all_local
            .union(&self.dynamic_matched)
            .cloned()
            .collect()
    }

    pub(crate) fn compute_coverage(&mut self) {
        let matched = self.intersection.len();
        self.local_coverage = percentage(matched, self.all_local.len());
        self.remote_coverage = percentage(matched, self.all_remote_leaves.len());
    }

    /// `local = ∩ + missing` and `remote = ∩ + unused + dynamic review`.
    ///
    /// A violation is a defect in the comparison, never a data condition.
    pub fn check_invariants(&self) -> Result<()> {
        let intersection = self.intersection.len();
        ensure!(
            self.all_local.len() == intersection + self.missing_count(),
            "local key count {} != intersection {} + missing {}",
            self.all_local.len(),
            intersection,
            self.missing_count()
        );
        ensure!(
            self.all_remote_leaves.len()
                == intersection + self.unused_count() + self.dynamic_review_required.len(),
            "remote key count {} != intersection {} + unused {} + dynamic review {}",
            self.all_remote_leaves.len(),
            intersection,
            self.unused_count(),
            self.dynamic_review_required.len()
        );
        Ok(())
    }
}

/// Group keys by their first segment, keeping each group sorted.
pub fn group_by_namespace<'a>(keys: impl IntoIterator<Item = &'a String>) -> GroupedKeys {
    let mut grouped = GroupedKeys::new();
    for key in keys {
        grouped
            .entry(namespace_of(key).to_string())
            .or_default()
            .push(key.clone());
    }
    for group in grouped.values_mut() {
        group.sort();
    }
    grouped
}
