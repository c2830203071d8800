//! # folio-store
//!
//! Remote content store access for Folio.
//!
//! - [`property`]: closed tagged-union model of the store's property kinds
//! - [`extract`]: guards and never-failing property extractors
//! - [`record`]: raw records (property bags) and child blocks
//! - [`filter`]: typed query filters and sorts
//! - [`ContentSource`]: the query collaborator the orchestrator consumes,
//!   implemented over HTTP by [`HttpContentStore`]

pub mod extract;
pub mod filter;
pub mod property;
pub mod record;

mod error;
mod http;

pub use error::StoreError;
pub use filter::{Condition, Direction, Filter, Sort};
pub use http::{HttpContentStore, check_response};
pub use property::{Property, PropertyKind, PropertyValue};
pub use record::{RawBlock, RawRecord};

use std::future::Future;

/// A database query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub database_id: String,
    pub filter: Option<Filter>,
    pub sorts: Vec<Sort>,
    pub page_size: u32,
}

impl QueryRequest {
    pub fn new(database_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            database_id: database_id.into(),
            filter: None,
            sorts: Vec::new(),
            page_size,
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Request body in the store's JSON shape, resuming at `start_cursor`
    /// when one is given.
    #[must_use]
    pub fn body(&self, start_cursor: Option<&str>) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert("page_size".to_string(), self.page_size.into());
        if let Some(cursor) = start_cursor {
            body.insert("start_cursor".to_string(), cursor.into());
        }
        if let Some(filter) = &self.filter {
            body.insert("filter".to_string(), filter.to_json());
        }
        if !self.sorts.is_empty() {
            body.insert(
                "sorts".to_string(),
                self.sorts.iter().map(Sort::to_json).collect(),
            );
        }
        serde_json::Value::Object(body)
    }
}

/// One page of child blocks plus the cursor for the next page, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildPage {
    pub blocks: Vec<RawBlock>,
    pub next_cursor: Option<String>,
}

/// Read access to the remote content store.
pub trait ContentSource: Send + Sync {
    /// Run a database query and return the matching records across all
    /// result pages.
    fn query(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<Vec<RawRecord>, StoreError>> + Send;

    /// Fetch one page of a record's child blocks starting at `cursor`.
    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> impl Future<Output = Result<ChildPage, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn query_body_omits_empty_parts() {
        let request = QueryRequest::new("db", 25);
        assert_eq!(request.body(None), json!({"page_size": 25}));
    }

    #[test]
    fn query_body_carries_start_cursor() {
        let request = QueryRequest::new("db", 25);
        assert_eq!(
            request.body(Some("c-2")),
            json!({"page_size": 25, "start_cursor": "c-2"})
        );
    }

    #[test]
    fn query_body_includes_filter_and_sorts() {
        let request = QueryRequest::new("db", 100)
            .filter(Filter::property(
                "Slug",
                Condition::RichTextEquals("hello".into()),
            ))
            .sort(Sort::descending("Published"));
        assert_eq!(
            request.body(None),
            json!({
                "page_size": 100,
                "filter": {"property": "Slug", "rich_text": {"equals": "hello"}},
                "sorts": [{"property": "Published", "direction": "descending"}]
            })
        );
    }
}
