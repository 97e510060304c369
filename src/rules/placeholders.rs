//! Interpolation placeholder extraction.
//!
//! Recognized notations:
//! - `{{name}}` double brace
//! - `{name}` and ICU arguments `{count, plural, ...}` (reported as `{count}`)
//! - `{0}` indexed
//! - `%s`, `%d`, `%i`, `%f`, `%@` and positional `%1$s` printf; `%%` is a literal

use std::{collections::BTreeSet, fmt, sync::LazyLock};

use regex::Regex;

static DOUBLE_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([\w.]+)\s*\}\}").unwrap());

static SINGLE_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\s*([\w.]+)\s*(?:,[^}]*)?\}").unwrap());

static PRINTF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%|%(?:(\d+)\$)?[sdif@]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    DoubleBrace(String),
    Named(String),
    Indexed(String),
    Printf(String),
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::DoubleBrace(name) => write!(f, "{{{{{}}}}}", name),
            Placeholder::Named(name) | Placeholder::Indexed(name) => write!(f, "{{{}}}", name),
            Placeholder::Printf(token) => write!(f, "{}", token),
        }
    }
}

/// Distinct placeholders in `value`. Double-brace tokens are not reported
/// again as single-brace ones.
pub fn extract_placeholders(value: &str) -> BTreeSet<Placeholder> {
    let mut found = BTreeSet::new();

    for caps in DOUBLE_BRACE.captures_iter(value) {
        found.insert(Placeholder::DoubleBrace(caps[1].to_string()));
    }
    let remaining = DOUBLE_BRACE.replace_all(value, "");

    for caps in SINGLE_BRACE.captures_iter(&remaining) {
        let name = caps[1].to_string();
        if name.chars().all(|c| c.is_ascii_digit()) {
            found.insert(Placeholder::Indexed(name));
        } else {
            found.insert(Placeholder::Named(name));
        }
    }

    for m in PRINTF.find_iter(&remaining) {
        if m.as_str() != "%%" {
            found.insert(Placeholder::Printf(m.as_str().to_string()));
        }
    }

    found
}
