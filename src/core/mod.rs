//! Core analysis engine.
//!
//! - `binding`: translation accessor bindings and lexical scopes
//! - `extract`: per-file walk producing key usages and hardcoded text issues
//! - `compare`: reconciles extracted keys with a catalog key tree
//! - `catalog`: where locale key trees come from
//! - `context`: the pipeline, from file discovery to health rules
//! - `parsers`: swc source parsing and locale JSON flattening

pub mod binding;
pub mod catalog;
pub mod compare;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod parsers;

pub use binding::{Binding, BindingKind, FileNamespaces};
pub use catalog::{CatalogLoad, CatalogSource};
pub use compare::{SyncMetrics, compare_keys};
pub use context::{AnalysisContext, ScanOutput};
pub use parsers::json::{KeyTree, LocaleTrees};
