//! Specification loading errors.

use thiserror::Error;

/// Error returned when a specification or configuration document cannot be
/// parsed.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The JSON document is malformed or does not match the expected shape.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    /// The YAML document is malformed or does not match the expected shape.
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
