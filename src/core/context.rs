//! Analysis pipeline.
//!
//! 1. Config: CLI arguments > `.keysyncrc.json` > defaults
//! 2. Discovery: include/ignore globs, test-file exclusion
//! 3. Scan: every file parsed and analyzed in parallel (lazy, cached)
//! 4. Catalog: primary source with timeout, messages directory fallback
//! 5. Compare: scan issues against the source-locale tree
//! 6. Health: rules over all locale trees and the keys code reaches

use std::{
    cell::OnceCell,
    collections::BTreeSet,
    fs,
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        catalog::{CatalogLoad, catalog_from_config},
        compare::{SyncMetrics, compare_keys},
        extract::{AnalyzerSettings, FileAnalysis, analyze_source},
        file_scanner::discover_source_files,
        parsers::json::{KeyTree, MessageScanWarning},
    },
    issues::{Issue, ParseErrorIssue},
    rules::{HealthReport, I18nDiagnostic, RuleContext, compute_score, enabled_rules, run_rules},
    utils::resolve_path,
};

/// Result of analyzing every discovered source file.
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// All issues, sorted by (file, line, column).
    pub issues: Vec<Issue>,
    /// Files parsed and analyzed. Files that failed to parse are excluded.
    pub files_scanned: usize,
    pub parse_errors: Vec<ParseErrorIssue>,
    pub dynamic_namespace_count: usize,
}

impl ScanOutput {
    pub fn hardcoded(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_hardcoded())
    }
}

pub struct HealthOutcome {
    pub diagnostics: Vec<I18nDiagnostic>,
    pub report: HealthReport,
    pub target_locales: Vec<String>,
}

pub struct AnalysisContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,
    /// Directory the config search started from; relative config paths
    /// resolve against it.
    pub root_dir: PathBuf,
    /// Source files to analyze, sorted.
    pub files: BTreeSet<String>,
    pub verbose: bool,

    settings: AnalyzerSettings,
    scan: OnceCell<ScanOutput>,
}

impl AnalysisContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let loaded = load_config(&root_dir)?;
        match &loaded.path {
            Some(path) if verbose => eprintln!("Using config {}", path.display()),
            None if verbose => eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            ),
            _ => {}
        }

        let mut config = loaded.config;
        if let Some(source_locale) = &common_args.source_locale {
            config.source_locale = source_locale.clone();
        }
        if let Some(messages_root) = &common_args.messages_root {
            config.messages_root = messages_root.to_string_lossy().into_owned();
        }
        config.validate()?;

        let scan_dir = resolve_path(&root_dir, &config.source_root);
        let discovered = discover_source_files(&scan_dir, &config, verbose);
        if discovered.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                discovered.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            settings: AnalyzerSettings::from_config(&config),
            config,
            root_dir,
            files: discovered.files,
            verbose,
            scan: OnceCell::new(),
        })
    }

    /// Parse and analyze all files (computed once).
    ///
    /// Each worker gets its own `SourceMap`; results are merged in file
    /// order so the output does not depend on scheduling.
    pub fn scan(&self) -> &ScanOutput {
        self.scan.get_or_init(|| {
            let settings = &self.settings;
            let results: Vec<(&String, Result<FileAnalysis>)> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let analysis = fs::read_to_string(file_path)
                        .with_context(|| format!("Failed to read file: {}", file_path))
                        .and_then(|code| {
                            analyze_source(file_path, code, Arc::new(SourceMap::default()), settings)
                        });
                    (file_path, analysis)
                })
                .collect();

            let mut output = ScanOutput::default();
            for (file_path, result) in results {
                match result {
                    Ok(analysis) => {
                        output.files_scanned += 1;
                        output.dynamic_namespace_count += analysis.dynamic_namespace_count;
                        output.issues.extend(analysis.issues);
                    }
                    Err(e) => {
                        if self.verbose {
                            eprintln!("{} {} - {:#}", "warning:".bold().yellow(), file_path, e);
                        }
                        output.parse_errors.push(ParseErrorIssue {
                            file_path: file_path.clone(),
                            error: format!("{:#}", e),
                        });
                    }
                }
            }
            output.issues.sort();
            output
        })
    }

    /// Load locale trees from the configured catalog source.
    ///
    /// Fails only when the messages directory is the sole source and is
    /// missing; a configured catalog snapshot degrades instead. A catalog
    /// without the source locale is kept, with a warning.
    pub fn load_catalog(&self) -> Result<CatalogLoad> {
        let mut load = catalog_from_config(&self.config, &self.root_dir).load()?;
        if !load.locales.contains_key(&self.config.source_locale) {
            load.warnings.push(MessageScanWarning {
                file_path: load.source.clone(),
                error: format!(
                    "Source locale '{}' not found; using an empty key tree",
                    self.config.source_locale
                ),
            });
        }
        Ok(load)
    }

    /// Compare every scanned key against the source-locale tree.
    pub fn sync(&self, catalog: &CatalogLoad) -> Result<SyncMetrics> {
        let empty = KeyTree::default();
        let remote = catalog
            .locales
            .get(&self.config.source_locale)
            .unwrap_or(&empty);
        compare_keys(&self.scan().issues, remote)
    }

    /// Run the enabled health rules and score the result.
    pub fn health(
        &self,
        catalog: &CatalogLoad,
        metrics: &SyncMetrics,
        threshold: u32,
    ) -> HealthOutcome {
        let code_keys = metrics.code_keys();
        let ctx = RuleContext::new(
            &self.config.source_locale,
            &self.config.target_locales,
            &catalog.locales,
            &code_keys,
        );
        let diagnostics = run_rules(&enabled_rules(&self.config.rules), &ctx);
        let report = compute_score(
            &diagnostics,
            ctx.source_key_count(),
            ctx.target_locales.len(),
            threshold,
        );
        HealthOutcome {
            target_locales: ctx.target_locales.clone(),
            diagnostics,
            report,
        }
    }
}
