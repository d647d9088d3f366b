//! Formatting passes for the supported file types.
//!
//! Each submodule implements one beautification capability:
//! - [`js`]: token-based JavaScript reprint
//! - [`json`]: serde-backed JSON pretty-printing
//! - [`html`]: HTML pretty-printing with the indent-doubling pass

pub mod html;
pub mod js;
pub mod json;

pub use html::beautify_html;
pub use js::beautify_js;
pub use json::beautify_json;

/// Errors that can occur while formatting file content.
#[derive(Debug, Clone)]
pub enum FormatError {
    /// The input could not be parsed as JSON.
    InvalidJson {
        /// The parser's reason for rejecting the input.
        reason: String,
    },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::InvalidJson { reason } => write!(f, "invalid JSON: {}", reason),
        }
    }
}

impl std::error::Error for FormatError {}
