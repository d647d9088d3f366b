//! Extension-to-formatter dispatch for the beautifier.
//!
//! This module provides the fixed mapping from file extension to the
//! formatting pass responsible for that type. The table is built once at
//! startup and never changes afterwards.
//!
//! # Examples
//!
//! ```
//! use beautidir::dispatch::{Formatter, FormatterMap};
//!
//! let map = FormatterMap::new();
//! assert_eq!(map.for_extension("json"), Some(Formatter::Json));
//! assert_eq!(map.for_extension("rs"), None);
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::format::{FormatError, beautify_html, beautify_js, beautify_json};

/// A formatting pass for one supported file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formatter {
    /// JavaScript beautifier (token-based reprint, 4-space indentation).
    Js,
    /// JSON pretty-printer (2-space indentation).
    Json,
    /// HTML pretty-printer with the leading-whitespace doubling pass.
    Html,
}

impl Formatter {
    /// Returns a short human-readable name for this formatter.
    ///
    /// # Examples
    ///
    /// ```
    /// use beautidir::dispatch::Formatter;
    ///
    /// assert_eq!(Formatter::Js.name(), "javascript");
    /// assert_eq!(Formatter::Html.name(), "html");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Formatter::Js => "javascript",
            Formatter::Json => "json",
            Formatter::Html => "html",
        }
    }

    /// Applies this formatter to the given file content.
    ///
    /// Only the JSON formatter can fail (on invalid input); the JavaScript
    /// and HTML passes accept any text.
    pub fn apply(&self, content: &str) -> Result<String, FormatError> {
        match self {
            Formatter::Js => Ok(beautify_js(content)),
            Formatter::Json => beautify_json(content),
            Formatter::Html => Ok(beautify_html(content)),
        }
    }
}

/// The fixed dispatch table from lowercased extension to formatter.
#[derive(Debug, Clone)]
pub struct FormatterMap {
    by_extension: HashMap<String, Formatter>,
}

impl FormatterMap {
    /// Creates the standard dispatch table (`js`, `json`, `html`).
    pub fn new() -> Self {
        let mut by_extension = HashMap::new();
        by_extension.insert("js".to_string(), Formatter::Js);
        by_extension.insert("json".to_string(), Formatter::Json);
        by_extension.insert("html".to_string(), Formatter::Html);
        Self { by_extension }
    }

    /// Looks up the formatter for an extension, case-insensitively.
    pub fn for_extension(&self, ext: &str) -> Option<Formatter> {
        self.by_extension.get(&ext.to_lowercase()).copied()
    }

    /// Looks up the formatter for a path based on its extension.
    ///
    /// Paths without an extension, or with an extension outside the
    /// dispatch table, return `None` and are skipped by the caller.
    pub fn for_path(&self, path: &Path) -> Option<Formatter> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.for_extension(ext))
    }
}

impl Default for FormatterMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_extensions_are_mapped() {
        let map = FormatterMap::new();
        assert_eq!(map.for_extension("js"), Some(Formatter::Js));
        assert_eq!(map.for_extension("json"), Some(Formatter::Json));
        assert_eq!(map.for_extension("html"), Some(Formatter::Html));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let map = FormatterMap::new();
        assert_eq!(map.for_extension("JS"), Some(Formatter::Js));
        assert_eq!(map.for_extension("Html"), Some(Formatter::Html));
    }

    #[test]
    fn test_unknown_extensions_are_not_mapped() {
        let map = FormatterMap::new();
        assert_eq!(map.for_extension("rs"), None);
        assert_eq!(map.for_extension("txt"), None);
        assert_eq!(map.for_extension("htm"), None);
    }

    #[test]
    fn test_for_path_uses_final_extension() {
        let map = FormatterMap::new();
        assert_eq!(map.for_path(Path::new("a/b/app.js")), Some(Formatter::Js));
        assert_eq!(
            map.for_path(Path::new("settings.backup.json")),
            Some(Formatter::Json)
        );
        assert_eq!(map.for_path(Path::new("README")), None);
        assert_eq!(map.for_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_formatter_names() {
        assert_eq!(Formatter::Js.name(), "javascript");
        assert_eq!(Formatter::Json.name(), "json");
        assert_eq!(Formatter::Html.name(), "html");
    }

    #[test]
    fn test_apply_dispatches_to_json() {
        let out = Formatter::Json.apply("{\"a\":1}").expect("valid json");
        assert_eq!(out, "{\n  \"a\": 1\n}");
        assert!(Formatter::Json.apply("{ nope").is_err());
    }
}
