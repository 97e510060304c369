//! Source-locale keys that a target locale does not define.

use crate::rules::{Category, DiagnosticSeverity, HealthRule, I18nDiagnostic, RuleContext, RuleId};

#[derive(Debug, Clone, Copy, Default)]
pub struct MissingTranslationsRule;

impl HealthRule for MissingTranslationsRule {
    fn id(&self) -> RuleId {
        RuleId::MissingTranslations
    }

    fn category(&self) -> Category {
        Category::Coverage
    }

    fn run(&self, ctx: &RuleContext) -> Vec<I18nDiagnostic> {
        let Some(source) = ctx.source_tree().filter(|tree| !tree.is_empty()) else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        for (locale, target) in ctx.targets() {
            for key in source.leaves().keys() {
                if target.is_some_and(|tree| tree.contains_leaf(key)) {
                    continue;
                }
                diagnostics.push(I18nDiagnostic {
                    rule: self.id(),
                    category: self.category(),
                    severity: DiagnosticSeverity::Error,
                    key: key.clone(),
                    language: locale.to_string(),
                    message: format!("\"{}\" has no '{}' translation", key, locale),
                    help: format!(
                        "Translate \"{}\" from '{}' into '{}'",
                        key, ctx.source_locale, locale
                    ),
                });
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use crate::core::parsers::json::{LocaleTrees, parse_locale_json};
    use crate::rules::missing_translations::*;

    fn run(locales: &[(&str, &str)], targets: &[&str]) -> Vec<I18nDiagnostic> {
        let translations: LocaleTrees = locales
            .iter()
            .map(|(l, json)| (l.to_string(), parse_locale_json(json).unwrap()))
            .collect();
        let targets: Vec<String> = targets.iter().map(|s| s.to_string()).collect();
        let code_keys = BTreeSet::new();
        MissingTranslationsRule.run(&RuleContext::new("en", &targets, &translations, &code_keys))
    }

    #[test]
    fn test_reports_each_missing_key_per_locale() {
        let diagnostics = run(
            &[
                ("en", r#"{"a": "A", "b": {"c": "C"}}"#),
                ("de", r#"{"a": "A"}"#),
                ("tr", r#"{"b": {"c": "C"}}"#),
            ],
            &[],
        );
        let found: Vec<(&str, &str)> = diagnostics
            .iter()
            .map(|d| (d.language.as_str(), d.key.as_str()))
            .collect();
        assert_eq!(found, vec![("de", "b.c"), ("tr", "a")]);
        assert!(
            diagnostics
                .iter()
                .all(|d| d.severity == DiagnosticSeverity::Error && d.category == Category::Coverage)
        );
    }

    #[test]
    fn test_configured_target_without_catalog() {
        let diagnostics = run(&[("en", r#"{"a": "A"}"#)], &["fr"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].language, "fr");
    }

    #[test]
    fn test_no_targets_or_empty_source() {
        assert!(run(&[("en", r#"{"a": "A"}"#)], &[]).is_empty());
        assert!(run(&[("en", "{}"), ("de", r#"{"x": "y"}"#)], &[]).is_empty());
        assert!(run(&[("de", r#"{"x": "y"}"#)], &[]).is_empty());
    }
}
