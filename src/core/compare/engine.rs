//! Reconciles code-reachable keys with a remote key tree.
//!
//! Steps, in order:
//! 1. Leaves under every bound namespace that is a remote container become local.
//! 2. Fully-qualified keys go to the local set; a key naming a container expands
//!    to its leaves unless other extracted keys already address its children.
//! 3. Partial (unknown-scoped) keys are fuzzy-matched against remote leaves; a
//!    partial naming a container follows the same expansion rule as step 2.
//! 4. The intersection is computed from the static local set.
//! 5. Dynamic patterns claim remaining leaves for review instead of `unused`.
//! 6. Missing/unused are grouped by namespace and both invariants are checked.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::core::BindingKind;
use crate::core::compare::fuzzy::{FuzzyMatch, fuzzy_match};
use crate::core::compare::metrics::{SyncMetrics, group_by_namespace};
use crate::core::compare::pattern::KeyPattern;
use crate::core::parsers::json::KeyTree;
use crate::issues::Issue;

/// Compare the keys referenced by `issues` against `remote`.
///
/// Returns an error only if the result violates its own invariants.
pub fn compare_keys(issues: &[Issue], remote: &KeyTree) -> Result<SyncMetrics> {
    let mut metrics = SyncMetrics {
        all_remote_leaves: remote.leaves().keys().cloned().collect(),
        ..Default::default()
    };

    let mut qualified: BTreeSet<String> = BTreeSet::new();
    let mut partials: BTreeSet<String> = BTreeSet::new();
    let mut patterns: Vec<(KeyPattern, BindingKind)> = Vec::new();
    let mut bound_namespaces: BTreeSet<&str> = BTreeSet::new();

    for issue in issues.iter().filter(|issue| !issue.is_hardcoded()) {
        if issue.binding == BindingKind::Bound
            && let Some(namespace) = issue.namespace.as_deref()
        {
            bound_namespaces.insert(namespace);
        }
        if let Some(key) = issue.full_key() {
            metrics.binding_counts.record(issue.binding);
            if issue.binding.is_fully_qualified() {
                qualified.insert(key);
            } else {
                partials.insert(key);
            }
        } else if let Some(pattern) = issue.full_pattern() {
            metrics.binding_counts.record(issue.binding);
            patterns.push((KeyPattern::new(&pattern), issue.binding));
        }
    }

    let local = &mut metrics.all_local;

    for namespace in &bound_namespaces {
        if remote.is_container(namespace) {
            local.extend(remote.leaves_under(namespace).map(str::to_string));
        }
    }

    for key in &qualified {
        if remote.is_container(key) {
            if !has_extracted_children(key, &qualified) {
                local.extend(remote.leaves_under(key).map(str::to_string));
            }
        } else {
            local.insert(key.clone());
        }
    }

    for partial in &partials {
        if remote.is_container(partial) {
            if !has_extracted_children(partial, &partials)
                && !has_extracted_children(partial, &qualified)
            {
                local.extend(remote.leaves_under(partial).map(str::to_string));
            }
            continue;
        }
        match fuzzy_match(partial, remote) {
            FuzzyMatch::NoMatch => {
                local.insert(partial.clone());
            }
            FuzzyMatch::Unique(leaf) => {
                local.insert(leaf);
            }
            FuzzyMatch::Ambiguous(leaves) => {
                local.extend(leaves.iter().cloned());
                metrics.ambiguous_matches.insert(partial.clone(), leaves);
            }
        }
    }

    metrics.intersection = metrics
        .all_local
        .intersection(&metrics.all_remote_leaves)
        .cloned()
        .collect();

    for leaf in &metrics.all_remote_leaves {
        let matched = patterns.iter().any(|(pattern, kind)| match kind {
            BindingKind::Unknown => pattern.matches_suffix(leaf),
            _ => pattern.matches(leaf),
        });
        if matched {
            metrics.dynamic_matched.insert(leaf.clone());
        }
    }
    metrics.dynamic_review_required = metrics
        .dynamic_matched
        .difference(&metrics.all_local)
        .cloned()
        .collect();

    metrics.missing = group_by_namespace(metrics.all_local.difference(&metrics.all_remote_leaves));
    metrics.unused = group_by_namespace(
        metrics
            .all_remote_leaves
            .iter()
            .filter(|leaf| {
                !metrics.all_local.contains(*leaf)
                    && !metrics.dynamic_review_required.contains(*leaf)
            }),
    );

    metrics.compute_coverage();
    metrics.check_invariants()?;
    Ok(metrics)
}

/// Another extracted key lies under `container`.
fn has_extracted_children(container: &str, keys: &BTreeSet<String>) -> bool {
    let prefix = format!("{}.", container);
    keys.range(prefix.clone()..)
        .next()
        .is_some_and(|key| key.starts_with(&prefix))
}
