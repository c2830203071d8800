//! Error taxonomy shared by every Folio crate.
//!
//! Two families are kept apart at the type level:
//! - [`RecordError`] describes one record that could not be assembled. Batch
//!   operations recover from it by skipping the record.
//! - [`QueryError`] describes a failed remote call. It always fails the whole
//!   operation because no partial result exists.
//!
//! Crate-specific errors (`StoreError`, `ConfigError`) live in their crates and
//! converge in `folio-content::ContentError`.

use std::collections::BTreeMap;

use thiserror::Error;

/// Structured key/value context attached to errors for logging.
pub type ErrorContext = BTreeMap<&'static str, String>;

/// A single record failed to assemble.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required property is absent, malformed, or empty.
    #[error("required property '{property}' is missing on record {record_id}")]
    PropertyMissing { record_id: String, property: String },

    /// A property is present but carries a different kind than expected.
    #[error(
        "property '{property}' on record {record_id} has kind '{found}', expected '{expected}'"
    )]
    PropertyType {
        record_id: String,
        property: String,
        expected: &'static str,
        found: String,
    },

    /// Assembly failed after the property passed its guard (bad date, unknown enum name).
    #[error("failed to parse property '{property}' on record {record_id}: {message}")]
    Parsing {
        record_id: String,
        property: String,
        message: String,
    },

    /// A cross-field invariant does not hold.
    #[error("record {record_id} failed validation: {message}")]
    Validation { record_id: String, message: String },
}

impl RecordError {
    #[must_use]
    pub fn record_id(&self) -> &str {
        match self {
            Self::PropertyMissing { record_id, .. }
            | Self::PropertyType { record_id, .. }
            | Self::Parsing { record_id, .. }
            | Self::Validation { record_id, .. } => record_id,
        }
    }

    /// The property the failure is attributed to, if any.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::PropertyMissing { property, .. }
            | Self::PropertyType { property, .. }
            | Self::Parsing { property, .. } => Some(property),
            Self::Validation { .. } => None,
        }
    }

    /// Short classification used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PropertyMissing { .. } => "property_missing",
            Self::PropertyType { .. } => "property_type",
            Self::Parsing { .. } => "parsing",
            Self::Validation { .. } => "validation",
        }
    }

    #[must_use]
    pub fn context(&self) -> ErrorContext {
        let mut ctx = ErrorContext::new();
        ctx.insert("record_id", self.record_id().to_string());
        ctx.insert("kind", self.kind().to_string());
        if let Some(property) = self.property() {
            ctx.insert("property", property.to_string());
        }
        if let Self::PropertyType {
            expected, found, ..
        } = self
        {
            ctx.insert("expected", (*expected).to_string());
            ctx.insert("found", found.clone());
        }
        ctx
    }
}

/// A remote call failed.
#[derive(Debug, Error)]
#[error("query '{operation}' failed: {message}")]
pub struct QueryError {
    pub operation: String,
    pub message: String,
    pub context: ErrorContext,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl QueryError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
            context: ErrorContext::new(),
            source: None,
        }
    }

    /// Wrap a transport or store error, keeping it as the source.
    pub fn from_source<E>(operation: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            operation: operation.into(),
            message: source.to_string(),
            context: ErrorContext::new(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.insert(key, value.into());
        self
    }

    #[must_use]
    pub fn context(&self) -> ErrorContext {
        let mut ctx = self.context.clone();
        ctx.insert("operation", self.operation.clone());
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn property_missing_names_property_and_record() {
        let err = RecordError::PropertyMissing {
            record_id: "page-2".into(),
            property: "Name".into(),
        };
        assert_eq!(
            err.to_string(),
            "required property 'Name' is missing on record page-2"
        );
        assert_eq!(err.record_id(), "page-2");
        assert_eq!(err.property(), Some("Name"));
    }

    #[test]
    fn record_context_carries_type_details() {
        let err = RecordError::PropertyType {
            record_id: "p1".into(),
            property: "Slug".into(),
            expected: "rich_text",
            found: "number".into(),
        };
        let ctx = err.context();
        assert_eq!(ctx["kind"], "property_type");
        assert_eq!(ctx["property"], "Slug");
        assert_eq!(ctx["expected"], "rich_text");
        assert_eq!(ctx["found"], "number");
    }

    #[test]
    fn validation_has_no_property() {
        let err = RecordError::Validation {
            record_id: "p1".into(),
            message: "part without series".into(),
        };
        assert!(err.property().is_none());
        assert!(!err.context().contains_key("property"));
    }

    #[test]
    fn query_error_keeps_source_and_operation() {
        let io = std::io::Error::other("connection reset");
        let err = QueryError::from_source("posts", io).with_context("database_id", "db-1");
        assert_eq!(err.to_string(), "query 'posts' failed: connection reset");
        assert!(std::error::Error::source(&err).is_some());
        let ctx = err.context();
        assert_eq!(ctx["operation"], "posts");
        assert_eq!(ctx["database_id"], "db-1");
    }
}
