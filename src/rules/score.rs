//! Aggregate health score.
//!
//! `score = round(100 * (1 - min(1, penalty / (checked * 5))))` where the
//! penalty sums severity weights (error 5, warning 1, info 0) and
//! `checked = max(1, sourceKeys * max(1, targetCount))`. Each category is
//! scored with the same formula over its own diagnostics.

use std::collections::BTreeMap;

use crate::rules::{Category, DiagnosticSeverity, I18nDiagnostic};

const MAX_WEIGHT: u64 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryScore {
    pub score: u32,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub score: u32,
    pub threshold: u32,
    pub passed: bool,
    /// Number of (key, locale) pairs the score is normalized against.
    pub checked: u64,
    pub categories: BTreeMap<Category, CategoryScore>,
}

impl HealthReport {
    pub fn error_count(&self) -> usize {
        self.categories.values().map(|c| c.errors).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.categories.values().map(|c| c.warnings).sum()
    }
}

fn score_for<'a>(diagnostics: impl Iterator<Item = &'a I18nDiagnostic>, checked: u64) -> u32 {
    let penalty: u64 = diagnostics.map(|d| d.severity.weight()).sum();
    let ratio = (penalty as f64 / (checked * MAX_WEIGHT) as f64).min(1.0);
    (100.0 * (1.0 - ratio)).round() as u32
}

pub fn compute_score(
    diagnostics: &[I18nDiagnostic],
    source_key_count: usize,
    target_count: usize,
    threshold: u32,
) -> HealthReport {
    let checked = (source_key_count as u64 * target_count.max(1) as u64).max(1);

    let categories = Category::ALL
        .into_iter()
        .map(|category| {
            let in_category = || diagnostics.iter().filter(move |d| d.category == category);
            let count = |severity: DiagnosticSeverity| {
                in_category().filter(|d| d.severity == severity).count()
            };
            let breakdown = CategoryScore {
                score: score_for(in_category(), checked),
                errors: count(DiagnosticSeverity::Error),
                warnings: count(DiagnosticSeverity::Warning),
                infos: count(DiagnosticSeverity::Info),
            };
            (category, breakdown)
        })
        .collect();

    let score = score_for(diagnostics.iter(), checked);
    HealthReport {
        score,
        threshold,
        passed: score >= threshold,
        checked,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::rules::score::*;
    use crate::rules::RuleId;

    fn diagnostic(category: Category, severity: DiagnosticSeverity) -> I18nDiagnostic {
        let rule = match category {
            Category::Coverage => RuleId::MissingTranslations,
            Category::Performance => RuleId::OrphanKeys,
            Category::Quality => RuleId::PlaceholderMismatch,
        };
        I18nDiagnostic {
            rule,
            category,
            severity,
            key: "k".to_string(),
            language: "tr".to_string(),
            message: String::new(),
            help: String::new(),
        }
    }

    #[test]
    fn test_no_diagnostics_scores_100() {
        let report = compute_score(&[], 0, 0, 70);
        assert_eq!(report.score, 100);
        assert_eq!(report.checked, 1);
        assert!(report.passed);
        assert_eq!(report.categories.len(), 3);
    }

    #[test]
    fn test_weighted_penalty() {
        // 10 keys * 2 targets = 20 checked, max penalty 100.
        let diagnostics = vec![
            diagnostic(Category::Coverage, DiagnosticSeverity::Error),
            diagnostic(Category::Coverage, DiagnosticSeverity::Error),
            diagnostic(Category::Performance, DiagnosticSeverity::Warning),
            diagnostic(Category::Quality, DiagnosticSeverity::Info),
        ];
        let report = compute_score(&diagnostics, 10, 2, 70);

        assert_eq!(report.score, 89);
        assert_eq!(report.categories[&Category::Coverage].score, 90);
        assert_eq!(report.categories[&Category::Coverage].errors, 2);
        assert_eq!(report.categories[&Category::Performance].score, 99);
        assert_eq!(report.categories[&Category::Quality].score, 100);
        assert_eq!(report.categories[&Category::Quality].infos, 1);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_penalty_is_capped() {
        let diagnostics = vec![diagnostic(Category::Coverage, DiagnosticSeverity::Error); 3];
        let report = compute_score(&diagnostics, 1, 1, 70);
        assert_eq!(report.score, 0);
        assert!(!report.passed);
    }

    #[test]
    fn test_threshold_boundary() {
        // 1 error over 10 checked: 100 * (1 - 5/50) = 90.
        let diagnostics = vec![diagnostic(Category::Coverage, DiagnosticSeverity::Error)];
        assert!(compute_score(&diagnostics, 10, 1, 90).passed);
        assert!(!compute_score(&diagnostics, 10, 1, 91).passed);
    }

    #[test]
    fn test_missing_translation_scenario_score() {
        // One source key, one target, one error: full penalty.
        let diagnostics = vec![diagnostic(Category::Coverage, DiagnosticSeverity::Error)];
        let report = compute_score(&diagnostics, 1, 1, 70);
        assert_eq!(report.score, 0);
        assert_eq!(report.categories[&Category::Performance].score, 100);
    }
}
