//! Write-path error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// A select value is not among the store's configured options.
    #[error("'{value}' is not a configured option for {field} (allowed: {})", allowed.join(", "))]
    InvalidOption {
        field: &'static str,
        value: String,
        allowed: Vec<String>,
    },

    /// The draft itself is incomplete or inconsistent.
    #[error("invalid draft field '{field}': {reason}")]
    InvalidDraft { field: &'static str, reason: String },

    /// Generated text held no JSON object.
    #[error("generated metadata is not usable JSON: {0}")]
    Candidate(String),

    /// The JSON candidate did not match the metadata schema.
    #[error("generated metadata failed schema validation: {errors:?}")]
    Schema { errors: Vec<String> },

    /// The candidate matched the schema but broke a value bound.
    #[error("generated metadata out of bounds: {0}")]
    Bounds(String),

    /// The text generator failed.
    #[error("text generation failed: {0}")]
    Generator(#[source] anyhow::Error),

    /// The page writer failed.
    #[error("page creation failed: {0}")]
    Writer(#[source] anyhow::Error),
}
