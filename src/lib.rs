//! keysync - translation key reconciliation for next-intl style projects
//!
//! keysync scans TS/TSX/JS/JSX sources for translation accessor bindings
//! (`useTranslations`, `getTranslations`), infers which keys code can reach,
//! reconciles them with a locale catalog and scores catalog health.
//!
//! ## Module Structure
//!
//! - `cli`: command-line interface (`scan`, `sync`, `health`, `init`)
//! - `config`: `.keysyncrc.json` loading and validation
//! - `core`: binding resolution, extraction, comparison and the pipeline
//! - `issues`: located findings produced by source analysis
//! - `rules`: health rules and scoring
//! - `utils`: shared helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
