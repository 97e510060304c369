//! Resolution of partial keys from unknown-scoped bindings.

use crate::core::parsers::json::KeyTree;

/// Outcome of matching one partial key against the remote leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuzzyMatch {
    /// Nothing matched; the literal partial key is kept.
    NoMatch,
    Unique(String),
    /// Several leaves matched; every one is adopted.
    Ambiguous(Vec<String>),
}

/// A leaf matches `partial` if it equals it or ends with `.<partial>`.
pub fn fuzzy_match(partial: &str, remote: &KeyTree) -> FuzzyMatch {
    let suffix = format!(".{}", partial);
    let mut matches: Vec<String> = remote
        .leaves()
        .keys()
        .filter(|leaf| *leaf == partial || leaf.ends_with(&suffix))
        .cloned()
        .collect();

    match matches.len() {
        0 => FuzzyMatch::NoMatch,
        1 => FuzzyMatch::Unique(matches.remove(0)),
        _ => FuzzyMatch::Ambiguous(matches),
    }
}
