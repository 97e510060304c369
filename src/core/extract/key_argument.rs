//! Static analysis of the key argument of a translation call.
//!
//! ```ignore
//! t("home.title")              → Literal("home.title")
//! t(flag ? "a.on" : "a.off")   → Conditional → ["a.on", "a.off"]
//! t(`items.${id}.label`)       → Template → pattern "items.*.label"
//! t(key)                       → Unresolvable
//! ```

use swc_ecma_ast::{Expr, Lit, Tpl};

use crate::issues::KeyRef;

/// What a key argument can statically resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyArgument {
    Literal(String),
    /// Template literal with substitutions; holds the cooked text between them.
    Template { quasis: Vec<String> },
    Conditional {
        consequent: Box<KeyArgument>,
        alternate: Box<KeyArgument>,
    },
    Unresolvable,
}

impl KeyArgument {
    pub fn analyze(expr: &Expr) -> Self {
        match expr {
            Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
                Some(value) => KeyArgument::Literal(value.to_string()),
                None => KeyArgument::Unresolvable,
            },
            Expr::Tpl(tpl) => Self::from_template(tpl),
            Expr::Cond(cond) => KeyArgument::Conditional {
                consequent: Box::new(Self::analyze(&cond.cons)),
                alternate: Box::new(Self::analyze(&cond.alt)),
            },
            Expr::Paren(paren) => Self::analyze(&paren.expr),
            Expr::TsAs(ts_as) => Self::analyze(&ts_as.expr),
            Expr::TsConstAssertion(assertion) => Self::analyze(&assertion.expr),
            _ => KeyArgument::Unresolvable,
        }
    }

    fn from_template(tpl: &Tpl) -> Self {
        let mut quasis = Vec::with_capacity(tpl.quasis.len());
        for quasi in &tpl.quasis {
            match quasi.cooked.as_ref().and_then(|cooked| cooked.as_str()) {
                Some(text) => quasis.push(text.to_string()),
                None => return KeyArgument::Unresolvable,
            }
        }
        if tpl.exprs.is_empty() {
            KeyArgument::Literal(quasis.concat())
        } else {
            KeyArgument::Template { quasis }
        }
    }

    /// Keys (or wildcard patterns) this argument can produce.
    ///
    /// A template whose literal parts contain no alphanumeric character
    /// (`` `${a}` ``, `` `${a}.${b}` ``) produces nothing.
    pub fn candidates(&self) -> Vec<KeyRef> {
        match self {
            KeyArgument::Literal(key) if !key.is_empty() => vec![KeyRef::Literal(key.clone())],
            KeyArgument::Literal(_) | KeyArgument::Unresolvable => Vec::new(),
            KeyArgument::Template { quasis } => {
                let pattern = quasis.join("*");
                if pattern.chars().any(char::is_alphanumeric) {
                    vec![KeyRef::Pattern(pattern)]
                } else {
                    Vec::new()
                }
            }
            KeyArgument::Conditional {
                consequent,
                alternate,
            } => {
                let mut keys = consequent.candidates();
                for key in alternate.candidates() {
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                keys
            }
        }
    }
}
