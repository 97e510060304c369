//! Locale JSON parsing into flattened key trees.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// A locale's keys: dotted leaf paths with their values, plus the interior
/// paths that only group other keys.
///
/// Both flat-dotted (`{"a.b": "x"}`) and nested (`{"a": {"b": "x"}}`) files
/// produce the same tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTree {
    leaves: BTreeMap<String, String>,
    containers: BTreeSet<String>,
}

/// Locale code → key tree, ordered by locale.
pub type LocaleTrees = BTreeMap<String, KeyTree>;

impl KeyTree {
    pub fn from_value(value: &Value) -> Self {
        let mut leaves = BTreeMap::new();
        flatten_json(value, String::new(), &mut leaves);
        Self::from_leaves(leaves)
    }

    pub fn from_leaves(leaves: BTreeMap<String, String>) -> Self {
        let mut containers = BTreeSet::new();
        for key in leaves.keys() {
            let mut end = 0;
            while let Some(pos) = key[end..].find('.') {
                end += pos;
                containers.insert(key[..end].to_string());
                end += 1;
            }
        }
        containers.retain(|path| !leaves.contains_key(path));
        Self { leaves, containers }
    }

    pub fn leaves(&self) -> &BTreeMap<String, String> {
        &self.leaves
    }

    pub fn containers(&self) -> &BTreeSet<String> {
        &self.containers
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.leaves.get(key).map(String::as_str)
    }

    pub fn contains_leaf(&self, key: &str) -> bool {
        self.leaves.contains_key(key)
    }

    pub fn is_container(&self, path: &str) -> bool {
        self.containers.contains(path)
    }

    /// Leaf paths strictly under `container`.
    pub fn leaves_under<'a>(&'a self, container: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        let prefix = format!("{}.", container);
        self.leaves
            .range(prefix.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// Flatten a JSON value into dotted leaf paths.
///
/// String arrays are one leaf (values joined for display); other arrays are
/// expanded by index. Numbers, booleans and nulls produce nothing.
fn flatten_json(value: &Value, prefix: String, result: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, result);
            }
        }
        Value::String(s) => {
            result.insert(prefix, s.clone());
        }
        Value::Array(arr) => {
            if arr.is_empty() {
                return;
            }
            let is_string_array = arr.iter().all(|v| matches!(v, Value::String(_)));
            if is_string_array && !prefix.is_empty() {
                let values: Vec<&str> = arr.iter().filter_map(|v| v.as_str()).collect();
                result.insert(prefix, values.join(", "));
            } else {
                for (index, val) in arr.iter().enumerate() {
                    let new_prefix = if prefix.is_empty() {
                        index.to_string()
                    } else {
                        format!("{}.{}", prefix, index)
                    };
                    flatten_json(val, new_prefix, result);
                }
            }
        }
        _ => {}
    }
}

pub fn parse_locale_json(content: &str) -> Result<KeyTree> {
    let json: Value = serde_json::from_str(content)?;
    Ok(KeyTree::from_value(&json))
}

pub fn parse_json_file(path: &Path) -> Result<KeyTree> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    parse_locale_json(&content).with_context(|| format!("Failed to parse JSON file: {:?}", path))
}

/// Parse a catalog snapshot: `{ "<locale>": <nested key tree>, ... }`.
pub fn parse_catalog_snapshot(content: &str) -> Result<LocaleTrees> {
    let json: Value = serde_json::from_str(content)?;
    let Value::Object(map) = json else {
        bail!("catalog snapshot must be an object keyed by locale");
    };
    Ok(map
        .iter()
        .map(|(locale, tree)| (locale.clone(), KeyTree::from_value(tree)))
        .collect())
}

/// A locale file that could not be read or parsed.
#[derive(Debug, Clone)]
pub struct MessageScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanMessagesResult {
    pub locales: LocaleTrees,
    pub warnings: Vec<MessageScanWarning>,
}

/// Extracts locale from filename: `zh-CN.json` → `zh-CN`.
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Load every `<locale>.json` in `message_dir`.
///
/// A malformed file degrades to an empty tree for its locale and a warning.
pub fn scan_message_files(message_dir: impl AsRef<Path>) -> Result<ScanMessagesResult> {
    let message_dir = message_dir.as_ref();
    let mut result = ScanMessagesResult::default();

    if !message_dir.exists() {
        bail!(
            "Messages directory '{}' does not exist.\n\
             Hint: Check your .keysyncrc.json 'messagesRoot' setting.",
            message_dir.display()
        );
    }

    if !message_dir.is_dir() {
        bail!("'{}' is not a directory.", message_dir.display());
    }

    for entry in fs::read_dir(message_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = extract_locale(&path)
        {
            let tree = match parse_json_file(&path) {
                Ok(tree) => tree,
                Err(e) => {
                    result.warnings.push(MessageScanWarning {
                        file_path: path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    });
                    KeyTree::default()
                }
            };
            result.locales.insert(locale, tree);
        }
    }

    Ok(result)
}
