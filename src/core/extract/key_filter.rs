//! Heuristics deciding whether a string literal can be a translation key.

use std::sync::LazyLock;

use regex::Regex;

static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});

static COLOR_FUNCTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:rgba?|hsla?)\s*\(").unwrap());

static NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9][0-9.,\s]*%?$").unwrap());

/// ISO-639-like language code, optionally with a region or script subtag.
static LANGUAGE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(?:[-_][A-Za-z0-9]{2,4})?$").unwrap());

/// Returns true if `value` could be a translation key.
///
/// Rejects strings shorter than two characters, URLs, filesystem paths,
/// CSS-class-like tokens, data URIs, colors, numbers and pure punctuation.
pub fn looks_like_translation_key(value: &str) -> bool {
    if value.chars().count() < 2 {
        return false;
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        return false;
    }
    if value.starts_with('/') || value.starts_with("./") || value.starts_with("../") {
        return false;
    }
    if value.contains(' ') && (value.contains('-') || value.contains('_')) {
        return false;
    }
    if value.starts_with("data:") {
        return false;
    }
    if HEX_COLOR_REGEX.is_match(value) || COLOR_FUNCTION_REGEX.is_match(value) {
        return false;
    }
    if NUMERIC_REGEX.is_match(value) {
        return false;
    }
    value.chars().any(char::is_alphanumeric)
}

/// Returns true if `value` looks like a language code (`en`, `tr`, `pt-BR`).
pub fn is_language_code(value: &str) -> bool {
    LANGUAGE_CODE_REGEX.is_match(value)
}
