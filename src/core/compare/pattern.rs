//! Wildcard key patterns built from template-literal keys.
//!
//! `*` never crosses a `.` boundary:
//! - `errors.*` matches `errors.E001` but not `errors.network.timeout`
//! - `form.*.label` matches `form.email.label`
//! - `status_*` matches the single segment `status_active`

/// A dotted key pattern, split into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPattern {
    segments: Vec<String>,
}

impl KeyPattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            segments: pattern.split('.').map(str::to_string).collect(),
        }
    }

    /// The whole key matches segment for segment.
    pub fn matches(&self, key: &str) -> bool {
        let key_segments: Vec<&str> = key.split('.').collect();
        key_segments.len() == self.segments.len() && self.matches_tail(&key_segments)
    }

    /// The trailing segments of `key` match; any number of leading segments
    /// (a namespace that could not be resolved statically) may precede them.
    pub fn matches_suffix(&self, key: &str) -> bool {
        let key_segments: Vec<&str> = key.split('.').collect();
        key_segments.len() >= self.segments.len()
            && self.matches_tail(&key_segments[key_segments.len() - self.segments.len()..])
    }

    fn matches_tail(&self, key_segments: &[&str]) -> bool {
        self.segments
            .iter()
            .zip(key_segments)
            .all(|(pattern, text)| segment_matches(pattern, text))
    }
}

/// Match one segment; each `*` stands for zero or more characters.
fn segment_matches(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if !pattern.contains('*') {
        return pattern == text;
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let first = parts[0];
    let last = parts[parts.len() - 1];

    if !text.starts_with(first) || !text.ends_with(last) {
        return false;
    }
    if first.len() + last.len() > text.len() {
        return false;
    }

    let mut pos = first.len();
    let end = text.len() - last.len();
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match text[pos..end].find(part) {
            Some(found) => pos += found + part.len(),
            None => return false,
        }
    }
    true
}
