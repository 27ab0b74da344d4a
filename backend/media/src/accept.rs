//! The picker's `accept` hint (`image/*, .pdf`).
//!
//! Only narrows what the picker lists. Drops and typed paths bypass it.

use std::path::Path;

use crate::mime_detect::detect_mime_type;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    /// `image/*`
    TypeWildcard(String),
    /// `application/pdf`
    Exact(String),
    /// `.pdf`, stored without the dot, lowercase
    Extension(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    rules: Vec<Rule>,
}

impl AcceptFilter {
    /// Build from entries such as `["image/*", ".pdf"]`. Blank entries are
    /// skipped; an empty filter accepts everything.
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let rules = entries
            .iter()
            .filter_map(|entry| parse_rule(entry.as_ref()))
            .collect();
        Self { rules }
    }

    /// Parse the HTML-style comma separated form, e.g. `"image/*, .pdf"`.
    pub fn parse(list: &str) -> Self {
        let entries: Vec<&str> = list.split(',').collect();
        Self::new(&entries)
    }

    pub fn accepts(&self, path: &Path) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let mime = detect_mime_type(path);
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        self.rules.iter().any(|rule| match rule {
            Rule::TypeWildcard(top) => mime.split('/').next() == Some(top.as_str()),
            Rule::Exact(full) => mime == full,
            Rule::Extension(want) => ext == *want,
        })
    }
}

impl Default for AcceptFilter {
    fn default() -> Self {
        Self::new(&["image/*", ".pdf"])
    }
}

fn parse_rule(entry: &str) -> Option<Rule> {
    let entry = entry.trim().to_lowercase();
    if entry.is_empty() {
        return None;
    }
    if let Some(ext) = entry.strip_prefix('.') {
        return Some(Rule::Extension(ext.to_string()));
    }
    match entry.split_once('/') {
        Some((top, "*")) => Some(Rule::TypeWildcard(top.to_string())),
        Some(_) => Some(Rule::Exact(entry.clone())),
        None => None,
    }
}
