//! Key candidates inside object and array literals.
//!
//! Applies only where a translation function is in reach, so configuration
//! tables like the one below are picked up while unrelated literals are not:
//!
//! ```ignore
//! const t = useTranslations("nav");
//! const items = [
//!     { href: "/", label: "home" },        // "home" extracted
//!     { href: "/about", label: "about" },  // "about" extracted
//! ];
//! ```

use std::collections::HashSet;

use swc_common::Span;
use swc_ecma_ast::{ArrayLit, Expr, Lit, ObjectLit, Prop, PropOrSpread};

use crate::core::binding::{prop_name_is, prop_name_str};
use crate::core::extract::key_filter::{is_language_code, looks_like_translation_key};

/// Property names whose string values are treated as keys.
pub const DEFAULT_PROPERTY_NAMES: &[&str] = &[
    "message",
    "label",
    "title",
    "text",
    "description",
    "placeholder",
    "tooltip",
    "translationKey",
    "i18nKey",
    "errorMessage",
    "successMessage",
    "warningMessage",
    "infoMessage",
];

pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    pub enabled: bool,
    pub require_translation_scope: bool,
    /// Deepest nesting level inspected; the outermost literal is depth 0.
    pub max_depth: usize,
    pub property_names: HashSet<String>,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self::with_custom_names(&[])
    }
}

impl ExtractorSettings {
    /// Default settings with `custom` merged into the property names.
    pub fn with_custom_names(custom: &[String]) -> Self {
        let property_names = DEFAULT_PROPERTY_NAMES
            .iter()
            .map(|s| s.to_string())
            .chain(custom.iter().cloned())
            .collect();
        Self {
            enabled: true,
            require_translation_scope: true,
            max_depth: DEFAULT_MAX_DEPTH,
            property_names,
        }
    }
}

/// A string literal that passed the property-name and key filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCandidate {
    pub key: String,
    pub span: Span,
}

/// Recursive walker over one literal.
pub struct DataStructureExtractor<'a> {
    settings: &'a ExtractorSettings,
    candidates: Vec<KeyCandidate>,
}

impl<'a> DataStructureExtractor<'a> {
    pub fn new(settings: &'a ExtractorSettings) -> Self {
        Self {
            settings,
            candidates: Vec::new(),
        }
    }

    pub fn extract_object(mut self, obj: &ObjectLit) -> Vec<KeyCandidate> {
        self.walk_object(obj, 0);
        self.candidates
    }

    pub fn extract_array(mut self, arr: &ArrayLit) -> Vec<KeyCandidate> {
        self.walk_array(arr, None, 0);
        self.candidates
    }

    fn walk_object(&mut self, obj: &ObjectLit, depth: usize) {
        for prop in &obj.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            if let Prop::KeyValue(kv) = &**prop {
                self.walk_value(&kv.value, prop_name_str(&kv.key), depth);
            }
        }
    }

    fn walk_array(&mut self, arr: &ArrayLit, prop_name: Option<&str>, depth: usize) {
        if is_language_selector(arr) {
            return;
        }
        for elem in arr.elems.iter().flatten() {
            if elem.spread.is_none() {
                self.walk_value(&elem.expr, prop_name, depth);
            }
        }
    }

    /// `depth` is the nesting level of the literal that holds `expr`.
    fn walk_value(&mut self, expr: &Expr, prop_name: Option<&str>, depth: usize) {
        match expr {
            Expr::Lit(Lit::Str(s)) => {
                if let Some(value) = s.value.as_str() {
                    self.consider(value, prop_name, s.span);
                }
            }
            Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
                if let Some(value) = tpl
                    .quasis
                    .first()
                    .and_then(|q| q.cooked.as_ref())
                    .and_then(|cooked| cooked.as_str())
                {
                    self.consider(value, prop_name, tpl.span);
                }
            }
            Expr::Object(obj) if depth < self.settings.max_depth => {
                self.walk_object(obj, depth + 1);
            }
            Expr::Array(arr) if depth < self.settings.max_depth => {
                self.walk_array(arr, prop_name, depth + 1);
            }
            Expr::Paren(paren) => self.walk_value(&paren.expr, prop_name, depth),
            Expr::TsAs(ts_as) => self.walk_value(&ts_as.expr, prop_name, depth),
            Expr::TsConstAssertion(assertion) => {
                self.walk_value(&assertion.expr, prop_name, depth)
            }
            Expr::TsSatisfies(satisfies) => self.walk_value(&satisfies.expr, prop_name, depth),
            _ => {}
        }
    }

    fn consider(&mut self, value: &str, prop_name: Option<&str>, span: Span) {
        let Some(prop_name) = prop_name else {
            return;
        };
        if self.settings.property_names.contains(prop_name) && looks_like_translation_key(value)
        {
            self.candidates.push(KeyCandidate {
                key: value.to_string(),
                span,
            });
        }
    }
}

/// `[{ value: "en", label: "English" }, { value: "tr", label: "Türkçe" }]`
///
/// At least two elements, each an object with a language-code `value` and a
/// `label`.
pub fn is_language_selector(arr: &ArrayLit) -> bool {
    if arr.elems.len() < 2 {
        return false;
    }
    arr.elems.iter().all(|elem| {
        let Some(elem) = elem else {
            return false;
        };
        let Expr::Object(obj) = &*elem.expr else {
            return false;
        };
        let mut has_code = false;
        let mut has_label = false;
        for prop in &obj.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                continue;
            };
            if prop_name_is(&kv.key, "value") {
                if let Expr::Lit(Lit::Str(s)) = &*kv.value
                    && let Some(code) = s.value.as_str()
                {
                    has_code = is_language_code(code);
                }
            } else if prop_name_is(&kv.key, "label") {
                has_label = true;
            }
        }
        has_code && has_label
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swc_common::{FileName, SourceMap};
    use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

    use crate::core::extract::data_structure::*;

    fn extract_with(literal: &str, settings: &ExtractorSettings) -> Vec<String> {
        let source_map = SourceMap::default();
        let source_file = source_map
            .new_source_file(FileName::Custom("d.ts".into()).into(), format!("({})", literal));
        let mut parser = Parser::new(
            Syntax::Typescript(TsSyntax::default()),
            StringInput::from(&*source_file),
            None,
        );
        let expr = parser.parse_expr().unwrap();
        let Expr::Paren(paren) = &*expr else {
            panic!("expected parenthesized literal");
        };
        let extractor = DataStructureExtractor::new(settings);
        let candidates = match &*paren.expr {
            Expr::Object(obj) => extractor.extract_object(obj),
            Expr::Array(arr) => extractor.extract_array(arr),
            other => panic!("expected literal, got {:?}", other),
        };
        candidates.into_iter().map(|c| c.key).collect()
    }

    fn extract(literal: &str) -> Vec<String> {
        extract_with(literal, &ExtractorSettings::default())
    }

    #[test]
    fn test_extracts_matching_properties() {
        let keys = extract(r#"{ label: "nav.home", href: "/home", title: "nav.title" }"#);
        assert_eq!(keys, vec!["nav.home", "nav.title"]);
    }

    #[test]
    fn test_applies_key_filters() {
        let keys = extract(
            r##"{ label: "x", title: "https://a.b", text: "flex items-center", message: "#fff", description: "ok.fine" }"##,
        );
        assert_eq!(keys, vec!["ok.fine"]);
    }

    #[test]
    fn test_array_of_objects() {
        let keys = extract(r#"[{ label: "menu.a" }, { label: "menu.b" }]"#);
        assert_eq!(keys, vec!["menu.a", "menu.b"]);
    }

    #[test]
    fn test_array_elements_inherit_property_name() {
        let keys = extract(r#"{ message: ["errors.one", "errors.two"], other: ["skip.me"] }"#);
        assert_eq!(keys, vec!["errors.one", "errors.two"]);
    }

    #[test]
    fn test_language_selector_is_skipped() {
        let keys = extract(
            r#"[{ value: "en", label: "English" }, { value: "tr", label: "Türkçe" }]"#,
        );
        assert!(keys.is_empty());
    }

    #[test]
    fn test_non_language_values_are_not_skipped() {
        let keys = extract(
            r#"[{ value: "option1", label: "English" }, { value: "option2", label: "Türkçe" }]"#,
        );
        assert_eq!(keys, vec!["English", "Türkçe"]);
    }

    #[test]
    fn test_single_element_selector_is_not_exempt() {
        let keys = extract(r#"[{ value: "en", label: "English" }]"#);
        assert_eq!(keys, vec!["English"]);
    }

    #[test]
    fn test_depth_limit() {
        let literal = r#"{ a: { b: { c: { label: "deep.key" } } } }"#;

        let mut settings = ExtractorSettings::default();
        settings.max_depth = 2;
        assert!(extract_with(literal, &settings).is_empty());

        settings.max_depth = 3;
        assert_eq!(extract_with(literal, &settings), vec!["deep.key"]);
    }

    #[test]
    fn test_custom_property_names() {
        let settings = ExtractorSettings::with_custom_names(&["heading".to_string()]);
        let keys = extract_with(r#"{ heading: "page.heading", label: "page.label" }"#, &settings);
        assert_eq!(keys, vec!["page.heading", "page.label"]);
    }

    #[test]
    fn test_looks_through_as_const() {
        let keys = extract(r#"{ items: [{ label: "a.b" }] as const }"#);
        assert_eq!(keys, vec!["a.b"]);
    }
}
