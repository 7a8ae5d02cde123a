//! Error types for manifest loading.

use crate::template::TemplateError;
use thiserror::Error;

/// Error type for manifest parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Label template error
    #[error("Template error in '{field}': {source}")]
    Template {
        /// Field holding the template
        field: &'static str,
        /// Underlying error
        source: TemplateError,
    },
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}
