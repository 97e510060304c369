//! Binding Resolver: translation accessor bindings and lexical scopes.
//!
//! - `accessor`: recognizes accessor calls and classifies the binding they produce
//! - `scope`: scope stack with innermost-first lookup and shadowing
//! - `prepass`: file-level literal namespace list (pass 1)

pub mod accessor;
pub mod prepass;
pub mod scope;

pub use accessor::{
    ACCESSOR_ALIAS, ACCESSOR_NAMES, AccessorCall, ArgShape, Binding, BindingKind, NamespaceProp,
    is_accessor_name, is_translation_param, prop_name_is, prop_name_str,
};
pub use prepass::FileNamespaces;
pub use scope::ScopeStack;
