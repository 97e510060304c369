//! File-level namespace pre-pass (pass 1 of 2).
//!
//! Collects every literal-string namespace passed to an accessor anywhere in
//! the file, in source order and without duplicates. Object forms such as
//! `getTranslations({ namespace: "x" })` are ignored here. The result is an
//! immutable list handed to the main traversal as read-only context.

use swc_ecma_ast::{CallExpr, Module};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::binding::AccessorCall;

/// Literal namespaces found in one file, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNamespaces(Vec<String>);

impl FileNamespaces {
    /// Run the pre-pass over a parsed module.
    pub fn collect(module: &Module) -> Self {
        let mut collector = NamespaceCollector::default();
        module.visit_with(&mut collector);
        Self(collector.namespaces)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FileNamespaces {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut namespaces: Vec<String> = Vec::new();
        for ns in iter {
            let ns = ns.into();
            if !namespaces.contains(&ns) {
                namespaces.push(ns);
            }
        }
        Self(namespaces)
    }
}

#[derive(Default)]
struct NamespaceCollector {
    namespaces: Vec<String>,
}

impl Visit for NamespaceCollector {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(call) = AccessorCall::from_call(node)
            && let Some(namespace) = call.literal_namespace()
            && !self.namespaces.iter().any(|ns| ns == namespace)
        {
            self.namespaces.push(namespace.to_string());
        }
        node.visit_children_with(self);
    }
}
