//! Operation-level error type.

use folio_config::ConfigError;
use folio_core::errors::{ErrorContext, QueryError, RecordError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    /// A remote call failed; the whole operation has no result.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A single-record lookup found a record that could not be assembled.
    #[error("{operation}: {error}")]
    Record {
        operation: &'static str,
        #[source]
        error: RecordError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ContentError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Query(err) => err.message.clone(),
            Self::Record { error, .. } => error.to_string(),
            Self::Config(err) => err.to_string(),
        }
    }

    /// Everything known about the failure, for structured logging.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::Query(err) => err.context(),
            Self::Record { operation, error } => {
                let mut ctx = error.context();
                ctx.insert("operation", (*operation).to_string());
                ctx
            }
            Self::Config(_) => {
                let mut ctx = ErrorContext::new();
                ctx.insert("operation", "config".to_string());
                ctx
            }
        }
    }
}
