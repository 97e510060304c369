//! Placeholders that differ between the source value and a translation.
//!
//! A placeholder missing from the translation is an error (the runtime value
//! is dropped); one only the translation has is a warning (it renders raw).
//! Keys the target does not define are left to `missing-translations`.

use std::collections::BTreeSet;

use crate::rules::placeholders::{Placeholder, extract_placeholders};
use crate::rules::{Category, DiagnosticSeverity, HealthRule, I18nDiagnostic, RuleContext, RuleId};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderMismatchRule;

fn join_tokens<'a>(placeholders: impl Iterator<Item = &'a Placeholder>) -> String {
    placeholders
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl PlaceholderMismatchRule {
    fn diagnostic(
        &self,
        severity: DiagnosticSeverity,
        key: &str,
        locale: &str,
        message: String,
        help: String,
    ) -> I18nDiagnostic {
        I18nDiagnostic {
            rule: self.id(),
            category: self.category(),
            severity,
            key: key.to_string(),
            language: locale.to_string(),
            message,
            help,
        }
    }
}

impl HealthRule for PlaceholderMismatchRule {
    fn id(&self) -> RuleId {
        RuleId::PlaceholderMismatch
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn run(&self, ctx: &RuleContext) -> Vec<I18nDiagnostic> {
        let Some(source) = ctx.source_tree() else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        for (locale, target) in ctx.targets() {
            let Some(target) = target else {
                continue;
            };
            for (key, source_value) in source.leaves() {
                let Some(target_value) = target.get(key) else {
                    continue;
                };
                let expected: BTreeSet<Placeholder> = extract_placeholders(source_value);
                let actual: BTreeSet<Placeholder> = extract_placeholders(target_value);

                if expected == actual {
                    continue;
                }

                let missing: Vec<&Placeholder> = expected.difference(&actual).collect();
                if !missing.is_empty() {
                    let tokens = join_tokens(missing.into_iter());
                    diagnostics.push(self.diagnostic(
                        DiagnosticSeverity::Error,
                        key,
                        locale,
                        format!("\"{}\" in '{}' is missing {}", key, locale, tokens),
                        format!(
                            "Keep {} in the '{}' value so the runtime value is rendered",
                            tokens, locale
                        ),
                    ));
                }

                let extra: Vec<&Placeholder> = actual.difference(&expected).collect();
                if !extra.is_empty() {
                    let tokens = join_tokens(extra.into_iter());
                    diagnostics.push(self.diagnostic(
                        DiagnosticSeverity::Warning,
                        key,
                        locale,
                        format!(
                            "\"{}\" in '{}' has {} not present in '{}'",
                            key, locale, tokens, ctx.source_locale
                        ),
                        format!(
                            "Remove {} or add it to the '{}' value",
                            tokens, ctx.source_locale
                        ),
                    ));
                }
            }
        }
        diagnostics
    }
}
