//! Key Comparison Engine.
//!
//! - `engine`: `compare_keys`, issues + remote tree → `SyncMetrics`
//! - `fuzzy`: partial key resolution for unknown-scoped keys
//! - `pattern`: `*` wildcard matching for dynamic keys
//! - `metrics`: result type, grouping and invariants

pub mod engine;
pub mod fuzzy;
pub mod metrics;
pub mod pattern;


pub use engine::compare_keys;
pub use fuzzy::{FuzzyMatch, fuzzy_match};
pub use metrics::{BindingCounts, GroupedKeys, SyncMetrics};
pub use pattern::KeyPattern;
