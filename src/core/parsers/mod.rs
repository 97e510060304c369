//! File parsers for source code and locale files.
//!
//! - `json`: locale JSON → `KeyTree` (leaves and containers)
//! - `jsx`: TS/TSX/JS/JSX source → swc module

pub mod json;
pub mod jsx;
