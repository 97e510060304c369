//! Single-pass file analyzer (pass 2 of 2).
//!
//! One `Visit` walk per file that:
//! - tracks translation bindings through a lexical scope stack
//! - turns `t(...)` / `t.rich(...)` calls into key usages
//! - extracts key candidates from object/array literals in translation-aware scopes
//! - reports hardcoded JSX text and checked attribute values
//!
//! The file-level namespace list from pass 1 is read-only context here.

use swc_common::{BytePos, Loc, SourceMap, Spanned};
use swc_ecma_ast::{
    ArrayLit, ArrowExpr, AssignExpr, AssignOp, AssignTarget, BinaryOp, BlockStmt, CallExpr,
    Callee, CatchClause, Expr, ForInStmt, ForOfStmt, ForStmt, Function, JSXAttr, JSXAttrName, JSXAttrValue, JSXElement, JSXElementName,
    JSXExpr, JSXExprContainer, JSXFragment, JSXText, Lit, MemberProp, Module, ObjectLit,
    ObjectPatProp, Pat, SimpleAssignTarget, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::binding::{
    ACCESSOR_ALIAS, AccessorCall, Binding, BindingKind, FileNamespaces, ScopeStack,
    is_translation_param, prop_name_is,
};
use crate::core::extract::data_structure::{DataStructureExtractor, KeyCandidate};
use crate::core::extract::key_argument::KeyArgument;
use crate::core::extract::AnalyzerSettings;
use crate::issues::{Issue, KeyRef, SourceLocation};
use crate::utils::contains_alphabetic;

/// Methods on a translation function that take a key as first argument.
const TRANSLATION_METHODS: &[&str] = &["rich", "raw", "markup", "has"];

/// JSX traversal flags.
#[derive(Debug, Clone, Copy, Default)]
struct JsxState {
    /// Inside any JSX attribute.
    in_attr: bool,
    /// Inside an attribute listed in `checkedAttributes`.
    in_checked_attr: bool,
}

/// Result of analyzing one file.
#[derive(Debug, Default)]
pub struct FileAnalysis {
    pub issues: Vec<Issue>,
    /// Accessor calls whose namespace argument was not a literal.
    pub dynamic_namespace_count: usize,
    pub file_namespaces: FileNamespaces,
}

pub struct FileAnalyzer<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    settings: &'a AnalyzerSettings,
    file_namespaces: FileNamespaces,

    scopes: ScopeStack,
    jsx_state: JsxState,
    /// Nesting of object/array literals around the current node. Only the
    /// outermost literal is handed to the data-structure extractor.
    literal_depth: usize,

    issues: Vec<Issue>,
    dynamic_namespace_count: usize,
}

impl<'a> FileAnalyzer<'a> {
    pub fn new(
        file_path: &'a str,
        source_map: &'a SourceMap,
        settings: &'a AnalyzerSettings,
        file_namespaces: FileNamespaces,
    ) -> Self {
        Self {
            file_path,
            source_map,
            settings,
            file_namespaces,
            scopes: ScopeStack::new(),
            jsx_state: JsxState::default(),
            literal_depth: 0,
            issues: Vec::new(),
            dynamic_namespace_count: 0,
        }
    }

    pub fn analyze(mut self, module: &Module) -> FileAnalysis {
        self.visit_module(module);
        FileAnalysis {
            issues: self.issues,
            dynamic_namespace_count: self.dynamic_namespace_count,
            file_namespaces: self.file_namespaces,
        }
    }

    // ============================================================
    // Locations
    // ============================================================

    fn location(&self, loc: &Loc) -> SourceLocation {
        SourceLocation::new(self.file_path, loc.line, loc.col_display + 1)
    }

    fn source_line(loc: &Loc) -> String {
        loc.file
            .get_line(loc.line - 1)
            .map(|cow| cow.trim().to_string())
            .unwrap_or_default()
    }

    // ============================================================
    // Bindings
    // ============================================================

    /// Register the binding(s) produced by `<pat> = <accessor call>`.
    fn register_accessor(&mut self, pat: &Pat, call: &AccessorCall, pos: BytePos) {
        let binding = call.classify();
        if binding.is_dynamic {
            self.dynamic_namespace_count += 1;
        }

        match pat {
            Pat::Ident(ident) => {
                self.scopes
                    .insert_binding(ident.id.sym.to_string(), binding.clone());
            }
            Pat::Object(obj) => {
                for prop in &obj.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) if prop_name_is(&kv.key, ACCESSOR_ALIAS) => {
                            for name in binding_names(&kv.value) {
                                self.scopes.insert_binding(name, binding.clone());
                            }
                        }
                        ObjectPatProp::Assign(assign) if assign.key.sym == ACCESSOR_ALIAS => {
                            self.scopes
                                .insert_binding(ACCESSOR_ALIAS, binding.clone());
                        }
                        ObjectPatProp::KeyValue(kv) => self.declare_all(&kv.value),
                        ObjectPatProp::Assign(assign) => self.scopes.declare(&assign.key.sym),
                        ObjectPatProp::Rest(rest) => self.declare_all(&rest.arg),
                    }
                }
            }
            other => self.declare_all(other),
        }

        self.record_bound_namespace(&binding, pos);
    }

    fn record_bound_namespace(&mut self, binding: &Binding, pos: BytePos) {
        if binding.kind == BindingKind::Bound
            && let Some(namespace) = &binding.namespace
        {
            let loc = self.source_map.lookup_char_pos(pos);
            self.issues.push(Issue::namespace_usage(
                self.location(&loc),
                Self::source_line(&loc),
                namespace.clone(),
            ));
        }
    }

    fn declare_all(&mut self, pat: &Pat) {
        for name in binding_names(pat) {
            self.scopes.declare(&name);
        }
    }

    /// Parameters named `t` / `tXxx` are translation functions of unknown
    /// namespace; any other parameter hides an outer binding of the same name.
    fn register_params<'p>(&mut self, params: impl IntoIterator<Item = &'p Pat>) {
        for pat in params {
            for name in binding_names(pat) {
                if is_translation_param(&name) {
                    self.scopes.mark_translation_param();
                    self.scopes.insert_binding(name, Binding::unknown(false));
                } else {
                    self.scopes.declare(&name);
                }
            }
        }
    }

    /// The binding behind `t(...)` or `t.rich(...)`, if `callee` is one.
    fn translation_binding(&self, callee: &Callee) -> Option<Binding> {
        let Callee::Expr(expr) = callee else {
            return None;
        };
        match &**expr {
            Expr::Ident(ident) => self.scopes.get_binding(&ident.sym).cloned(),
            Expr::Member(member) => {
                let Expr::Ident(obj) = &*member.obj else {
                    return None;
                };
                let MemberProp::Ident(method) = &member.prop else {
                    return None;
                };
                if TRANSLATION_METHODS.contains(&method.sym.as_str()) {
                    self.scopes.get_binding(&obj.sym).cloned()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn collect_translation_call(&mut self, node: &CallExpr, binding: &Binding) {
        let Some(arg) = node.args.first() else {
            return;
        };
        if arg.spread.is_some() {
            return;
        }
        let candidates = KeyArgument::analyze(&arg.expr).candidates();
        if candidates.is_empty() {
            return;
        }
        let loc = self.source_map.lookup_char_pos(node.span.lo);
        let location = self.location(&loc);
        let text = Self::source_line(&loc);
        for key in candidates {
            self.issues.push(Issue::key_usage(
                location.clone(),
                text.clone(),
                key,
                binding.namespace.clone(),
                binding.kind,
            ));
        }
    }

    // ============================================================
    // Data structures
    // ============================================================

    fn should_extract_literal(&self) -> bool {
        let options = &self.settings.data_structures;
        self.literal_depth == 0
            && options.enabled
            && (!options.require_translation_scope || self.scopes.is_translation_aware())
    }

    /// Namespace for keys found in literals, by tier: nearest bound binding,
    /// the file's only namespace, the first of several (unknown-scoped), none.
    fn data_namespace(&self) -> (Option<String>, BindingKind) {
        if let Some(namespace) = self.scopes.nearest_bound_namespace() {
            return (Some(namespace.to_string()), BindingKind::Bound);
        }
        match self.file_namespaces.len() {
            0 => (None, BindingKind::Unbound),
            1 => (
                self.file_namespaces.first().map(str::to_string),
                BindingKind::Bound,
            ),
            _ => (
                self.file_namespaces.first().map(str::to_string),
                BindingKind::Unknown,
            ),
        }
    }

    fn collect_data_keys(&mut self, candidates: Vec<KeyCandidate>) {
        if candidates.is_empty() {
            return;
        }
        let (namespace, kind) = self.data_namespace();
        for candidate in candidates {
            let loc = self.source_map.lookup_char_pos(candidate.span.lo);
            self.issues.push(Issue::key_usage(
                self.location(&loc),
                Self::source_line(&loc),
                KeyRef::Literal(candidate.key),
                namespace.clone(),
                kind,
            ));
        }
    }

    /// Run `f` as a new function scope: fresh frame, literal nesting reset.
    fn with_function_scope<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let saved_depth = self.literal_depth;
        self.literal_depth = 0;
        self.scopes.enter_scope();
        f(self);
        self.scopes.exit_scope();
        self.literal_depth = saved_depth;
    }

    // ============================================================
    // Hardcoded text
    // ============================================================

    fn check_hardcoded(&mut self, value: &str, pos: BytePos) {
        let text = value.trim();
        if self.settings.ignore_texts.contains(text) || !contains_alphabetic(text) {
            return;
        }
        let loc = self.source_map.lookup_char_pos(pos);
        self.issues
            .push(Issue::hardcoded(self.location(&loc), text.to_string()));
    }

    /// String literals, templates, `cond && "x"` and ternary branches.
    fn check_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Lit(Lit::Str(s)) => {
                if let Some(value) = s.value.as_str() {
                    self.check_hardcoded(value, s.span.lo);
                }
            }
            Expr::Tpl(tpl) => {
                for quasi in &tpl.quasis {
                    if let Some(value) = quasi.cooked.as_ref().and_then(|c| c.as_str()) {
                        self.check_hardcoded(value, quasi.span.lo);
                    }
                }
            }
            Expr::Bin(bin) if bin.op == BinaryOp::LogicalAnd || bin.op == BinaryOp::LogicalOr => {
                self.check_expr(&bin.right)
            }
            Expr::Cond(cond) => {
                self.check_expr(&cond.cons);
                self.check_expr(&cond.alt);
            }
            Expr::Paren(paren) => self.check_expr(&paren.expr),
            _ => {}
        }
    }
}

/// Every identifier a pattern declares.
fn binding_names(pat: &Pat) -> Vec<String> {
    match pat {
        Pat::Ident(ident) => vec![ident.id.sym.to_string()],
        Pat::Object(obj) => obj
            .props
            .iter()
            .flat_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => binding_names(&kv.value),
                ObjectPatProp::Assign(assign) => vec![assign.key.sym.to_string()],
                ObjectPatProp::Rest(rest) => binding_names(&rest.arg),
            })
            .collect(),
        Pat::Array(arr) => arr.elems.iter().flatten().flat_map(binding_names).collect(),
        Pat::Assign(assign) => binding_names(&assign.left),
        Pat::Rest(rest) => binding_names(&rest.arg),
        _ => vec![],
    }
}

impl<'a> Visit for FileAnalyzer<'a> {
    fn visit_function(&mut self, node: &Function) {
        self.with_function_scope(|this| {
            this.register_params(node.params.iter().map(|p| &p.pat));
            node.visit_children_with(this);
        });
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.with_function_scope(|this| {
            this.register_params(node.params.iter());
            node.visit_children_with(this);
        });
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.scopes.enter_scope();
        node.visit_children_with(self);
        self.scopes.exit_scope();
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.scopes.enter_scope();
        node.visit_children_with(self);
        self.scopes.exit_scope();
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        self.scopes.enter_scope();
        node.visit_children_with(self);
        self.scopes.exit_scope();
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        self.scopes.enter_scope();
        node.visit_children_with(self);
        self.scopes.exit_scope();
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.scopes.enter_scope();
        if let Some(param) = &node.param {
            self.declare_all(param);
        }
        node.visit_children_with(self);
        self.scopes.exit_scope();
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(init) = &node.init
            && let Some(call) = AccessorCall::from_expr(init)
        {
            self.register_accessor(&node.name, &call, init.span().lo);
        } else {
            self.declare_all(&node.name);
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        if node.op == AssignOp::Assign
            && let AssignTarget::Simple(SimpleAssignTarget::Ident(ident)) = &node.left
            && let Some(call) = AccessorCall::from_expr(&node.right)
        {
            let binding = call.classify();
            if binding.is_dynamic {
                self.dynamic_namespace_count += 1;
            }
            self.scopes.assign_binding(&ident.id.sym, binding.clone());
            self.record_bound_namespace(&binding, node.span.lo);
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(binding) = self.translation_binding(&node.callee) {
            self.collect_translation_call(node, &binding);
        }
        node.visit_children_with(self);
    }

    fn visit_object_lit(&mut self, node: &ObjectLit) {
        if self.should_extract_literal() {
            let candidates =
                DataStructureExtractor::new(&self.settings.data_structures).extract_object(node);
            self.collect_data_keys(candidates);
        }
        self.literal_depth += 1;
        node.visit_children_with(self);
        self.literal_depth -= 1;
    }

    fn visit_array_lit(&mut self, node: &ArrayLit) {
        if self.should_extract_literal() {
            let candidates =
                DataStructureExtractor::new(&self.settings.data_structures).extract_array(node);
            self.collect_data_keys(candidates);
        }
        self.literal_depth += 1;
        node.visit_children_with(self);
        self.literal_depth -= 1;
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        node.opening.visit_with(self);

        let is_raw_text = matches!(
            &node.opening.name,
            JSXElementName::Ident(ident) if ident.sym == "style" || ident.sym == "script"
        );
        if is_raw_text {
            return;
        }

        let prev_state = self.jsx_state;
        self.jsx_state = JsxState::default();
        for child in &node.children {
            child.visit_with(self);
        }
        self.jsx_state = prev_state;
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        let prev_state = self.jsx_state;
        self.jsx_state = JsxState::default();
        for child in &node.children {
            child.visit_with(self);
        }
        self.jsx_state = prev_state;
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let raw_value = &node.value;
        if raw_value.trim().is_empty() {
            return;
        }
        let trim_start_offset = raw_value.len() - raw_value.trim_start().len();
        let pos = node.span.lo + BytePos(trim_start_offset as u32);
        self.check_hardcoded(raw_value, pos);
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        if (!self.jsx_state.in_attr || self.jsx_state.in_checked_attr)
            && let JSXExpr::Expr(expr) = &node.expr
        {
            self.check_expr(expr);
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let attr_name = match &node.name {
            JSXAttrName::Ident(ident) => ident.sym.to_string(),
            JSXAttrName::JSXNamespacedName(ns) => format!("{}-{}", ns.ns.sym, ns.name.sym),
        };

        let prev_state = self.jsx_state;
        self.jsx_state.in_attr = true;

        if self.settings.checked_attributes.contains(&attr_name) {
            self.jsx_state.in_checked_attr = true;
            if let Some(JSXAttrValue::Str(s)) = &node.value
                && let Some(value) = s.value.as_str()
            {
                self.check_hardcoded(value, s.span.lo);
            }
        }

        if let Some(value) = &node.value {
            value.visit_with(self);
        }

        self.jsx_state = prev_state;
    }
}
