//! Translation accessor bindings and their classification.
//!
//! Detection is name-based: any call to `useTranslations` / `getTranslations`
//! counts, whether it comes from the i18n library or a local function with the
//! same name. Import provenance is never resolved.

use std::fmt;

use swc_ecma_ast::{CallExpr, Callee, Expr, Lit, ObjectLit, Prop, PropName, PropOrSpread};

/// Accessor functions that produce a translation function.
pub const ACCESSOR_NAMES: &[&str] = &["useTranslations", "getTranslations"];

/// Conventional member name bound when destructuring an accessor result:
/// `const { t } = useTranslations("auth")`.
pub const ACCESSOR_ALIAS: &str = "t";

/// Returns true if `name` is one of the recognized accessor functions.
pub fn is_accessor_name(name: &str) -> bool {
    ACCESSOR_NAMES.contains(&name)
}

/// Returns true for parameter names that mark a function as translation-aware:
/// exactly `t`, or `t` followed by an uppercase letter (`tCommon`, `tErrors`).
pub fn is_translation_param(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('t'), None) => true,
        (Some('t'), Some(second)) => second.is_uppercase(),
        _ => false,
    }
}

/// How the namespace of a binding (or of an extracted key) was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BindingKind {
    /// Accessor called without a namespace: exposes the whole catalog.
    Root,
    /// Namespace known statically from a string literal.
    Bound,
    /// Namespace could not be determined statically; needs fuzzy resolution.
    Unknown,
    /// Key extracted with no namespace information at all.
    Unbound,
}

impl BindingKind {
    /// Keys of this kind are already fully qualified catalog paths.
    pub fn is_fully_qualified(self) -> bool {
        !matches!(self, BindingKind::Unknown)
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Root => write!(f, "root-scoped"),
            BindingKind::Bound => write!(f, "bound-scoped"),
            BindingKind::Unknown => write!(f, "unknown-scoped"),
            BindingKind::Unbound => write!(f, "unbound"),
        }
    }
}

/// A translation function binding registered in a scope frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub kind: BindingKind,
    pub namespace: Option<String>,
    /// The namespace argument was a non-literal expression.
    pub is_dynamic: bool,
}

impl Binding {
    pub fn root() -> Self {
        Self {
            kind: BindingKind::Root,
            namespace: None,
            is_dynamic: false,
        }
    }

    pub fn bound(namespace: impl Into<String>) -> Self {
        Self {
            kind: BindingKind::Bound,
            namespace: Some(namespace.into()),
            is_dynamic: false,
        }
    }

    pub fn unknown(is_dynamic: bool) -> Self {
        Self {
            kind: BindingKind::Unknown,
            namespace: None,
            is_dynamic,
        }
    }
}

/// Shape of the `namespace` property inside an options object argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceProp {
    Literal(String),
    Dynamic,
}

/// Normalized shape of an accessor's first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgShape {
    None,
    StringLiteral(String),
    /// `{ namespace: ... }`; `None` when the object has no namespace property.
    Object(Option<NamespaceProp>),
    /// Ternary, identifier, template or anything else.
    Other,
}

/// A call to a translation accessor, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorCall {
    pub callee: String,
    pub arg: ArgShape,
}

impl AccessorCall {
    /// Recognize `useTranslations(...)` or `await getTranslations(...)`,
    /// looking through parentheses.
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Await(await_expr) => Self::from_expr(&await_expr.arg),
            Expr::Paren(paren) => Self::from_expr(&paren.expr),
            Expr::Call(call) => Self::from_call(call),
            _ => None,
        }
    }

    pub fn from_call(call: &CallExpr) -> Option<Self> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let Expr::Ident(ident) = &**callee else {
            return None;
        };
        let name = ident.sym.as_str();
        if !is_accessor_name(name) {
            return None;
        }

        let arg = match call.args.first() {
            None => ArgShape::None,
            Some(first) => match &*first.expr {
                Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
                    Some(value) => ArgShape::StringLiteral(value.to_string()),
                    None => ArgShape::Other,
                },
                Expr::Object(obj) => ArgShape::Object(namespace_prop(obj)),
                _ => ArgShape::Other,
            },
        };

        Some(Self {
            callee: name.to_string(),
            arg,
        })
    }

    /// Classify the binding this call produces.
    pub fn classify(&self) -> Binding {
        match &self.arg {
            ArgShape::None | ArgShape::Object(None) => Binding::root(),
            ArgShape::StringLiteral(namespace) => Binding::bound(namespace.clone()),
            ArgShape::Object(Some(NamespaceProp::Literal(namespace))) => {
                Binding::bound(namespace.clone())
            }
            ArgShape::Object(Some(NamespaceProp::Dynamic)) | ArgShape::Other => {
                Binding::unknown(true)
            }
        }
    }

    /// Literal namespace for the file-level pre-pass. Object forms are ignored.
    pub fn literal_namespace(&self) -> Option<&str> {
        match &self.arg {
            ArgShape::StringLiteral(namespace) => Some(namespace),
            _ => None,
        }
    }
}

fn namespace_prop(obj: &ObjectLit) -> Option<NamespaceProp> {
    for prop in &obj.props {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        match &**prop {
            Prop::KeyValue(kv) if prop_name_is(&kv.key, "namespace") => {
                return Some(match &*kv.value {
                    Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
                        Some(value) => NamespaceProp::Literal(value.to_string()),
                        None => NamespaceProp::Dynamic,
                    },
                    _ => NamespaceProp::Dynamic,
                });
            }
            Prop::Shorthand(ident) if ident.sym == "namespace" => {
                return Some(NamespaceProp::Dynamic);
            }
            _ => {}
        }
    }
    None
}

/// Returns true if a property name (identifier or string key) equals `name`.
pub fn prop_name_is(key: &PropName, name: &str) -> bool {
    prop_name_str(key).is_some_and(|key| key == name)
}

/// Static text of a property name, if it has one.
pub fn prop_name_str(key: &PropName) -> Option<&str> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.as_str()),
        PropName::Str(s) => s.value.as_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swc_common::{FileName, SourceMap};
    use swc_ecma_ast::{Decl, ModuleItem, Stmt};
    use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

    use crate::core::binding::accessor::*;

    /// Parse `const x = <expr>;` and return the classified accessor call.
    fn accessor_of(init: &str) -> Option<AccessorCall> {
        let code = format!("async function f() {{ const x = {}; }}", init);
        let source_map = SourceMap::default();
        let source_file =
            source_map.new_source_file(FileName::Custom("test.ts".into()).into(), code);
        let syntax = Syntax::Typescript(TsSyntax::default());
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
        let module = parser.parse_module().unwrap();

        let ModuleItem::Stmt(Stmt::Decl(Decl::Fn(fn_decl))) = &module.body[0] else {
            panic!("expected function declaration");
        };
        let body = fn_decl.function.body.as_ref().unwrap();
        let Stmt::Decl(Decl::Var(var)) = &body.stmts[0] else {
            panic!("expected variable declaration");
        };
        let init = var.decls[0].init.as_ref().unwrap();
        AccessorCall::from_expr(init)
    }

    #[test]
    fn test_no_arguments_is_root() {
        let call = accessor_of("useTranslations()").unwrap();
        assert_eq!(call.classify(), Binding::root());
    }

    #[test]
    fn test_string_literal_is_bound() {
        let call = accessor_of("useTranslations(\"auth\")").unwrap();
        assert_eq!(call.classify(), Binding::bound("auth"));
        assert_eq!(call.literal_namespace(), Some("auth"));
    }

    #[test]
    fn test_awaited_call_is_recognized() {
        let call = accessor_of("await getTranslations(\"nav\")").unwrap();
        assert_eq!(call.callee, "getTranslations");
        assert_eq!(call.classify(), Binding::bound("nav"));
    }

    #[test]
    fn test_object_with_literal_namespace_is_bound() {
        let call = accessor_of("await getTranslations({ locale, namespace: \"home\" })").unwrap();
        assert_eq!(call.classify(), Binding::bound("home"));
        // Object forms never feed the file-level namespace list
        assert_eq!(call.literal_namespace(), None);
    }

    #[test]
    fn test_object_with_dynamic_namespace_is_unknown() {
        let call = accessor_of("await getTranslations({ locale, namespace: ns })").unwrap();
        let binding = call.classify();
        assert_eq!(binding.kind, BindingKind::Unknown);
        assert!(binding.is_dynamic);
    }

    #[test]
    fn test_object_without_namespace_is_root() {
        let call = accessor_of("await getTranslations({ locale })").unwrap();
        assert_eq!(call.classify(), Binding::root());
    }

    #[test]
    fn test_other_shapes_are_unknown() {
        for init in [
            "useTranslations(flag ? \"a\" : \"b\")",
            "useTranslations(ns)",
            "useTranslations(`ns`)",
        ] {
            let binding = accessor_of(init).unwrap().classify();
            assert_eq!(binding.kind, BindingKind::Unknown, "{}", init);
            assert!(binding.is_dynamic, "{}", init);
        }
    }

    #[test]
    fn test_non_accessor_is_ignored() {
        assert!(accessor_of("useState(\"auth\")").is_none());
        assert!(accessor_of("\"auth\"").is_none());
    }

    #[test]
    fn test_is_translation_param() {
        assert!(is_translation_param("t"));
        assert!(is_translation_param("tCommon"));
        assert!(is_translation_param("tErrors"));
        assert!(!is_translation_param("text"));
        assert!(!is_translation_param("translate"));
        assert!(!is_translation_param("T"));
        assert!(!is_translation_param(""));
    }

    #[test]
    fn test_binding_kind_display() {
        assert_eq!(BindingKind::Root.to_string(), "root-scoped");
        assert_eq!(BindingKind::Bound.to_string(), "bound-scoped");
        assert_eq!(BindingKind::Unknown.to_string(), "unknown-scoped");
        assert_eq!(BindingKind::Unbound.to_string(), "unbound");
    }
}
