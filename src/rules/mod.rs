//! Health rules over reconciled key sets and locale value maps.
//!
//! Each rule is independent: it reads a `RuleContext` and returns
//! diagnostics. Rules never see source files, only catalog trees and the
//! set of keys code can reach.
//!
//! - `missing_translations`: source keys absent from a target locale
//! - `orphan_keys`: catalog keys no code reaches
//! - `placeholder_mismatch`: interpolation tokens that differ between locales
//! - `score`: weighted penalty score with per-category breakdown

pub mod missing_translations;
pub mod orphan_keys;
pub mod placeholder_mismatch;
pub mod placeholders;
pub mod score;

use std::{cmp::Ordering, collections::BTreeSet, fmt};

use enum_dispatch::enum_dispatch;

use crate::config::RuleToggles;
use crate::core::parsers::json::{KeyTree, LocaleTrees};

pub use missing_translations::MissingTranslationsRule;
pub use orphan_keys::OrphanKeysRule;
pub use placeholder_mismatch::PlaceholderMismatchRule;
pub use score::{CategoryScore, HealthReport, compute_score};

/// Stable rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    MissingTranslations,
    OrphanKeys,
    PlaceholderMismatch,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleId::MissingTranslations => write!(f, "missing-translations"),
            RuleId::OrphanKeys => write!(f, "orphan-keys"),
            RuleId::PlaceholderMismatch => write!(f, "placeholder-mismatch"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Coverage,
    Performance,
    Quality,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Coverage, Category::Performance, Category::Quality];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Coverage => write!(f, "coverage"),
            Category::Performance => write!(f, "performance"),
            Category::Quality => write!(f, "quality"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

impl DiagnosticSeverity {
    /// Score penalty per diagnostic.
    pub fn weight(self) -> u64 {
        match self {
            DiagnosticSeverity::Error => 5,
            DiagnosticSeverity::Warning => 1,
            DiagnosticSeverity::Info => 0,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Info => write!(f, "info"),
        }
    }
}

/// One health finding about a catalog key in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nDiagnostic {
    pub rule: RuleId,
    pub category: Category,
    pub severity: DiagnosticSeverity,
    pub key: String,
    pub language: String,
    pub message: String,
    pub help: String,
}

impl Ord for I18nDiagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rule
            .cmp(&other.rule)
            .then_with(|| self.language.cmp(&other.language))
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for I18nDiagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub source_locale: &'a str,
    /// Resolved target locales, source locale excluded.
    pub target_locales: Vec<String>,
    pub translations: &'a LocaleTrees,
    pub code_keys: &'a BTreeSet<String>,
}

impl<'a> RuleContext<'a> {
    /// Empty `configured_targets` means every catalog locale except the source.
    pub fn new(
        source_locale: &'a str,
        configured_targets: &[String],
        translations: &'a LocaleTrees,
        code_keys: &'a BTreeSet<String>,
    ) -> Self {
        let target_locales = if configured_targets.is_empty() {
            translations
                .keys()
                .filter(|locale| *locale != source_locale)
                .cloned()
                .collect()
        } else {
            let mut targets: Vec<String> = configured_targets
                .iter()
                .filter(|locale| *locale != source_locale)
                .cloned()
                .collect();
            targets.sort();
            targets.dedup();
            targets
        };

        Self {
            source_locale,
            target_locales,
            translations,
            code_keys,
        }
    }

    pub fn source_tree(&self) -> Option<&'a KeyTree> {
        self.translations.get(self.source_locale)
    }

    pub fn source_key_count(&self) -> usize {
        self.source_tree().map_or(0, KeyTree::len)
    }

    /// Target trees in locale order. A configured target with no catalog
    /// yields `None`.
    pub fn targets(&self) -> impl Iterator<Item = (&str, Option<&'a KeyTree>)> + '_ {
        self.target_locales
            .iter()
            .map(|locale| (locale.as_str(), self.translations.get(locale)))
    }
}

#[enum_dispatch]
pub trait HealthRule {
    fn id(&self) -> RuleId;
    fn category(&self) -> Category;
    fn run(&self, ctx: &RuleContext) -> Vec<I18nDiagnostic>;
}

#[enum_dispatch(HealthRule)]
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    MissingTranslations(MissingTranslationsRule),
    OrphanKeys(OrphanKeysRule),
    PlaceholderMismatch(PlaceholderMismatchRule),
}

/// Rules whose category is enabled, in a fixed order.
pub fn enabled_rules(toggles: &RuleToggles) -> Vec<Rule> {
    let mut rules = Vec::new();
    if toggles.coverage {
        rules.push(MissingTranslationsRule.into());
    }
    if toggles.performance {
        rules.push(OrphanKeysRule.into());
    }
    if toggles.quality {
        rules.push(PlaceholderMismatchRule.into());
    }
    rules
}

/// Run every rule and return their diagnostics in a stable order.
pub fn run_rules(rules: &[Rule], ctx: &RuleContext) -> Vec<I18nDiagnostic> {
    let mut diagnostics: Vec<I18nDiagnostic> = rules.iter().flat_map(|rule| rule.run(ctx)).collect();
    diagnostics.sort();
    diagnostics
}
