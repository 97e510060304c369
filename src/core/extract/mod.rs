//! Per-file extraction: bindings, key usages, data-structure keys and
//! hardcoded text, all as a flat list of `Issue`s.
//!
//! Two passes per file:
//! 1. `FileNamespaces::collect` gathers the file's literal namespaces
//! 2. `FileAnalyzer` walks the module once with that list as context
//!
//! `@i18n-keys:` annotations are appended as root-scoped key usages.

pub mod annotations;
pub mod data_structure;
pub mod file_analyzer;
pub mod key_argument;
pub mod key_filter;


use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use swc_common::SourceMap;

pub use data_structure::ExtractorSettings;
pub use file_analyzer::{FileAnalysis, FileAnalyzer};

use crate::config::Config;
use crate::core::binding::{BindingKind, FileNamespaces};
use crate::core::parsers::jsx::{ParsedSource, parse_source};
use crate::issues::{Issue, KeyRef, SourceLocation};

/// Options that shape extraction, resolved once from the config.
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub checked_attributes: Vec<String>,
    pub ignore_texts: HashSet<String>,
    pub data_structures: ExtractorSettings,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AnalyzerSettings {
    pub fn from_config(config: &Config) -> Self {
        let options = &config.data_structures;
        let mut data_structures = ExtractorSettings::with_custom_names(&options.property_names);
        data_structures.enabled = options.enabled;
        data_structures.require_translation_scope = options.require_translation_scope;
        data_structures.max_depth = options.max_depth;

        Self {
            checked_attributes: config.checked_attributes.clone(),
            ignore_texts: config.ignore_texts.iter().cloned().collect(),
            data_structures,
        }
    }
}

/// Parse and analyze one source file. A parse failure is returned as an
/// error and produces no issues.
pub fn analyze_source(
    file_path: &str,
    code: String,
    source_map: Arc<SourceMap>,
    settings: &AnalyzerSettings,
) -> Result<FileAnalysis> {
    let parsed = parse_source(code, file_path, source_map)?;
    Ok(analyze_parsed(file_path, &parsed, settings))
}

pub fn analyze_parsed(
    file_path: &str,
    parsed: &ParsedSource,
    settings: &AnalyzerSettings,
) -> FileAnalysis {
    let file_namespaces = FileNamespaces::collect(&parsed.module);
    let analyzer = FileAnalyzer::new(file_path, &parsed.source_map, settings, file_namespaces);
    let mut analysis = analyzer.analyze(&parsed.module);

    for annotated in annotations::collect_annotated_keys(&parsed.comments, &parsed.source_map) {
        analysis.issues.push(Issue::key_usage(
            SourceLocation::new(file_path, annotated.line, annotated.col),
            annotated.text,
            KeyRef::Literal(annotated.key),
            None,
            BindingKind::Root,
        ));
    }

    analysis.issues.sort();
    analysis
}
