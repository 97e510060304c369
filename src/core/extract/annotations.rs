//! `@i18n-keys:` comment annotations.
//!
//! Keys that are only ever built at runtime can be declared next to the code
//! that uses them:
//!
//! ```ignore
//! // @i18n-keys: status.active, status.paused
//! const label = t(`status.${state}`);
//! ```
//!
//! Each listed key is treated as a static, root-scoped key usage.

use std::sync::LazyLock;

use regex::Regex;
use swc_common::SourceMap;

use crate::core::parsers::jsx::ExtractedComments;

static ANNOTATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@i18n-keys:\s*(.*)").unwrap());

static KEY_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w][\w.\-]*$").unwrap());

/// A key declared by an annotation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedKey {
    pub key: String,
    pub line: usize,
    pub col: usize,
    /// The annotation line as written.
    pub text: String,
}

/// Parse the key list of one comment body. Returns an empty list if the
/// comment carries no annotation.
pub fn parse_annotation(comment: &str) -> Vec<String> {
    let mut keys = Vec::new();
    for line in comment.lines() {
        let Some(caps) = ANNOTATION_REGEX.captures(line) else {
            continue;
        };
        for token in caps[1].split(',') {
            let token = token.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`');
            if KEY_TOKEN_REGEX.is_match(token) && !keys.iter().any(|k| k == token) {
                keys.push(token.to_string());
            }
        }
    }
    keys
}

/// Collect annotated keys from every comment in a file, in source order.
pub fn collect_annotated_keys(
    comments: &ExtractedComments,
    source_map: &SourceMap,
) -> Vec<AnnotatedKey> {
    let mut result = Vec::new();
    for comment in comments.all_sorted() {
        let keys = parse_annotation(&comment.text);
        if keys.is_empty() {
            continue;
        }
        let loc = source_map.lookup_char_pos(comment.span.lo);
        let text = comment
            .text
            .lines()
            .find(|line| line.contains("@i18n-keys:"))
            .unwrap_or_default()
            .trim()
            .to_string();
        for key in keys {
            result.push(AnnotatedKey {
                key,
                line: loc.line,
                col: loc.col_display + 1,
                text: text.clone(),
            });
        }
    }
    result
}
