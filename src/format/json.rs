//! JSON pretty-printing.
//!
//! Parses the input into a `serde_json::Value` and re-serializes it with
//! 2-space indentation. The output is semantically equal to the input;
//! invalid input is an error and aborts the surrounding run.

use serde_json::Value;

use super::FormatError;

/// Pretty-prints a JSON document with 2-space indentation.
///
/// # Errors
///
/// Returns `FormatError::InvalidJson` if the input is not valid JSON.
pub fn beautify_json(content: &str) -> Result<String, FormatError> {
    let value: Value = serde_json::from_str(content).map_err(|e| FormatError::InvalidJson {
        reason: e.to_string(),
    })?;
    serde_json::to_string_pretty(&value).map_err(|e| FormatError::InvalidJson {
        reason: e.to_string(),
    })
}
