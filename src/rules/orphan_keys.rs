//! Catalog keys that no code reaches.
//!
//! Each key is reported once, attributed to the first locale that defines
//! it: the source locale first, then the rest in name order.

use std::collections::BTreeSet;

use crate::rules::{Category, DiagnosticSeverity, HealthRule, I18nDiagnostic, RuleContext, RuleId};

#[derive(Debug, Clone, Copy, Default)]
pub struct OrphanKeysRule;

impl HealthRule for OrphanKeysRule {
    fn id(&self) -> RuleId {
        RuleId::OrphanKeys
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn run(&self, ctx: &RuleContext) -> Vec<I18nDiagnostic> {
        // Without any code keys every catalog key would be an orphan.
        if ctx.code_keys.is_empty() {
            return Vec::new();
        }

        let source = ctx
            .source_tree()
            .map(|tree| (ctx.source_locale, tree))
            .into_iter();
        let others = ctx
            .translations
            .iter()
            .filter(|(locale, _)| *locale != ctx.source_locale)
            .map(|(locale, tree)| (locale.as_str(), tree));

        let mut reported: BTreeSet<&str> = BTreeSet::new();
        let mut diagnostics = Vec::new();
        for (locale, tree) in source.chain(others) {
            for key in tree.leaves().keys() {
                if ctx.code_keys.contains(key) || !reported.insert(key.as_str()) {
                    continue;
                }
                diagnostics.push(I18nDiagnostic {
                    rule: self.id(),
                    category: self.category(),
                    severity: DiagnosticSeverity::Warning,
                    key: key.clone(),
                    language: locale.to_string(),
                    message: format!("\"{}\" is not used in code", key),
                    help: "Remove the key from every locale, or reference it in code".to_string(),
                });
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::parsers::json::{LocaleTrees, parse_locale_json};
    use crate::rules::orphan_keys::*;

    fn run(locales: &[(&str, &str)], code_keys: &[&str]) -> Vec<I18nDiagnostic> {
        let translations: LocaleTrees = locales
            .iter()
            .map(|(l, json)| (l.to_string(), parse_locale_json(json).unwrap()))
            .collect();
        let code_keys: BTreeSet<String> = code_keys.iter().map(|s| s.to_string()).collect();
        OrphanKeysRule.run(&RuleContext::new("en", &[], &translations, &code_keys))
    }

    #[test]
    fn test_reports_once_attributed_to_source_first() {
        let diagnostics = run(
            &[
                ("de", r#"{"used": "x", "old": "y", "legacy": "z"}"#),
                ("en", r#"{"used": "x", "old": "y"}"#),
                ("tr", r#"{"legacy": "z"}"#),
            ],
            &["used"],
        );
        let found: Vec<(&str, &str)> = diagnostics
            .iter()
            .map(|d| (d.key.as_str(), d.language.as_str()))
            .collect();
        assert_eq!(found, vec![("old", "en"), ("legacy", "de")]);
        assert!(
            diagnostics
                .iter()
                .all(|d| d.severity == DiagnosticSeverity::Warning)
        );
    }

    #[test]
    fn test_no_code_keys_is_noop() {
        assert!(run(&[("en", r#"{"a": "x"}"#)], &[]).is_empty());
    }

    #[test]
    fn test_all_keys_used() {
        assert!(run(&[("en", r#"{"a": "x"}"#), ("tr", r#"{"a": "y"}"#)], &["a"]).is_empty());
    }
}
