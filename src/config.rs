use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::data_structure::DEFAULT_MAX_DEPTH;

pub const CONFIG_FILE_NAME: &str = ".keysyncrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_true")]
    pub ignore_test_files: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_checked_attributes")]
    pub checked_attributes: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_messages_root")]
    pub messages_root: String,
    #[serde(default = "default_source_locale", alias = "primaryLocale")]
    pub source_locale: String,
    /// Locales checked against the source locale. Empty means every other
    /// locale found in the catalog.
    #[serde(default)]
    pub target_locales: Vec<String>,
    /// Snapshot file `{ "<locale>": tree }` used before the messages directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
    #[serde(default = "default_catalog_timeout_ms")]
    pub catalog_timeout_ms: u64,
    #[serde(default)]
    pub data_structures: DataStructureOptions,
    #[serde(default)]
    pub rules: RuleToggles,
    #[serde(default = "default_score_threshold")]
    pub score_threshold: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStructureOptions {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub require_translation_scope: bool,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Extra property names, merged with the built-in ones.
    #[serde(default)]
    pub property_names: Vec<String>,
}

impl Default for DataStructureOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            require_translation_scope: true,
            max_depth: DEFAULT_MAX_DEPTH,
            property_names: Vec::new(),
        }
    }
}

/// Health rules enabled per category.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleToggles {
    #[serde(default = "default_true")]
    pub coverage: bool,
    #[serde(default = "default_true")]
    pub performance: bool,
    #[serde(default = "default_true")]
    pub quality: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            coverage: true,
            performance: true,
            quality: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_includes() -> Vec<String> {
    ["src", "app", "components"].map(String::from).to_vec()
}

fn default_checked_attributes() -> Vec<String> {
    [
        "placeholder",
        "title",
        "alt",
        "aria-label",
        "aria-description",
        "aria-placeholder",
        "aria-roledescription",
        "aria-valuetext",
    ]
    .map(String::from)
    .to_vec()
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_catalog_timeout_ms() -> u64 {
    5000
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_score_threshold() -> u32 {
    70
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: true,
            source_root: default_source_root(),
            checked_attributes: default_checked_attributes(),
            ignore_texts: Vec::new(),
            messages_root: default_messages_root(),
            source_locale: default_source_locale(),
            target_locales: Vec::new(),
            catalog_path: None,
            catalog_timeout_ms: default_catalog_timeout_ms(),
            data_structures: DataStructureOptions::default(),
            rules: RuleToggles::default(),
            score_threshold: default_score_threshold(),
        }
    }
}

impl Config {
    /// Reject glob patterns that do not compile and out-of-range numbers.
    ///
    /// `includes`/`ignores` entries without `*` or `?` are literal paths and
    /// are not compiled, so `app/[locale]` is accepted as-is.
    pub fn validate(&self) -> Result<()> {
        for (field, patterns) in [("ignores", &self.ignores), ("includes", &self.includes)] {
            for pattern in patterns {
                if pattern.contains('*') || pattern.contains('?') {
                    Pattern::new(pattern).with_context(|| {
                        format!("Invalid glob pattern in '{}': \"{}\"", field, pattern)
                    })?;
                }
            }
        }

        ensure!(
            self.score_threshold <= 100,
            "'scoreThreshold' must be between 0 and 100, got {}",
            self.score_threshold
        );
        ensure!(
            !self.source_locale.is_empty(),
            "'sourceLocale' must not be empty"
        );
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::default()).context("Failed to generate default config.")
}

/// Search upward from `start_dir` for the config file, stopping at the
/// repository root (a directory containing `.git`).
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() || !current.pop() {
            return None;
        }
    }
}

pub struct ConfigLoadResult {
    pub config: Config,
    /// `None` when no config file was found and defaults are used.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(ConfigLoadResult {
        config,
        path: Some(path),
    })
}
