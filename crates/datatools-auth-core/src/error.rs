//! Error types for the settings wire format.

use thiserror::Error;

/// Errors that can occur while reading or writing datatools settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("datatools metadata must be an array, found {0}")]
    NotAList(&'static str),
}

impl SettingsError {
    pub(crate) fn decoding(e: serde_json::Error) -> Self {
        SettingsError::DecodingError(e.to_string())
    }

    pub(crate) fn encoding(e: serde_json::Error) -> Self {
        SettingsError::EncodingError(e.to_string())
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Short name of a JSON value's kind, used in diagnostics.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
