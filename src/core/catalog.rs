//! Catalog sources: where locale key trees come from.
//!
//! - `LocalCatalog`: `<messagesRoot>/<locale>.json`
//! - `SnapshotCatalog`: one JSON file `{ "<locale>": tree }`, e.g. an export
//!   of a hosted catalog
//! - `TimeoutCatalog`: bounds how long a source may take
//! - `FallbackCatalog`: tries a primary source, then a fallback, then degrades
//!   to an empty catalog

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, mpsc},
    thread,
    time::Duration,
};

use anyhow::{Context, Result, anyhow};

use crate::config::Config;
use crate::core::parsers::json::{
    LocaleTrees, MessageScanWarning, parse_catalog_snapshot, scan_message_files,
};
use crate::utils::resolve_path;

/// Locale trees plus any non-fatal problems found while loading them.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub locales: LocaleTrees,
    pub warnings: Vec<MessageScanWarning>,
    /// Name of the source that produced `locales`.
    pub source: String,
}

pub trait CatalogSource: Send + Sync {
    fn name(&self) -> String;
    fn load(&self) -> Result<CatalogLoad>;
}

pub struct LocalCatalog {
    messages_root: PathBuf,
}

impl LocalCatalog {
    pub fn new(messages_root: impl Into<PathBuf>) -> Self {
        Self {
            messages_root: messages_root.into(),
        }
    }
}

impl CatalogSource for LocalCatalog {
    fn name(&self) -> String {
        self.messages_root.display().to_string()
    }

    fn load(&self) -> Result<CatalogLoad> {
        let scanned = scan_message_files(&self.messages_root)?;
        Ok(CatalogLoad {
            locales: scanned.locales,
            warnings: scanned.warnings,
            source: self.name(),
        })
    }
}

pub struct SnapshotCatalog {
    path: PathBuf,
}

impl SnapshotCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for SnapshotCatalog {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<CatalogLoad> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read catalog snapshot: {:?}", self.path))?;
        let locales = parse_catalog_snapshot(&content)
            .with_context(|| format!("Failed to parse catalog snapshot: {:?}", self.path))?;
        Ok(CatalogLoad {
            locales,
            warnings: Vec::new(),
            source: self.name(),
        })
    }
}

/// Runs the inner source on a worker thread and gives up after `timeout`.
///
/// A timed-out worker is detached; its result is discarded.
pub struct TimeoutCatalog {
    inner: Arc<dyn CatalogSource>,
    timeout: Duration,
}

impl TimeoutCatalog {
    pub fn new(inner: Arc<dyn CatalogSource>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl CatalogSource for TimeoutCatalog {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn load(&self) -> Result<CatalogLoad> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        thread::spawn(move || {
            let _ = tx.send(inner.load());
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(anyhow!(
                "catalog source '{}' timed out after {}ms",
                self.name(),
                self.timeout.as_millis()
            )),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(anyhow!(
                "catalog source '{}' stopped without a result",
                self.name()
            )),
        }
    }
}

/// Primary source first; on failure the fallback; if both fail, an empty
/// catalog. Every failure is kept as a warning, so `load` never errors.
pub struct FallbackCatalog {
    primary: Box<dyn CatalogSource>,
    fallback: Box<dyn CatalogSource>,
}

impl FallbackCatalog {
    pub fn new(primary: Box<dyn CatalogSource>, fallback: Box<dyn CatalogSource>) -> Self {
        Self { primary, fallback }
    }
}

impl CatalogSource for FallbackCatalog {
    fn name(&self) -> String {
        format!("{} (fallback: {})", self.primary.name(), self.fallback.name())
    }

    fn load(&self) -> Result<CatalogLoad> {
        let primary_error = match self.primary.load() {
            Ok(load) => return Ok(load),
            Err(e) => MessageScanWarning {
                file_path: self.primary.name(),
                error: format!("{:#}", e),
            },
        };

        match self.fallback.load() {
            Ok(mut load) => {
                load.warnings.insert(0, primary_error);
                Ok(load)
            }
            Err(e) => Ok(CatalogLoad {
                locales: LocaleTrees::new(),
                warnings: vec![
                    primary_error,
                    MessageScanWarning {
                        file_path: self.fallback.name(),
                        error: format!("{:#}", e),
                    },
                ],
                source: "empty catalog".to_string(),
            }),
        }
    }
}

/// Build the catalog source described by the config. Paths resolve against
/// `root_dir`.
///
/// Without `catalogPath` the messages directory is the only source and its
/// absence is an error. With it, the snapshot is primary (bounded by
/// `catalogTimeoutMs`) and the messages directory is the fallback.
pub fn catalog_from_config(config: &Config, root_dir: &Path) -> Box<dyn CatalogSource> {
    let local = LocalCatalog::new(resolve_path(root_dir, &config.messages_root));
    match &config.catalog_path {
        Some(path) => {
            let snapshot: Arc<dyn CatalogSource> =
                Arc::new(SnapshotCatalog::new(resolve_path(root_dir, path)));
            Box::new(FallbackCatalog::new(
                Box::new(TimeoutCatalog::new(
                    snapshot,
                    Duration::from_millis(config.catalog_timeout_ms),
                )),
                Box::new(local),
            ))
        }
        None => Box::new(local),
    }
}
