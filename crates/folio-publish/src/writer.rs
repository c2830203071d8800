//! Publishing a validated draft through a [`PageWriter`].
//!
//! The draft is checked and its select values are matched against the
//! database's options before any write is attempted.

use std::future::Future;

use serde_json::{Map, Value};

use crate::draft::{PostDraft, to_properties};
use crate::error::PublishError;
use crate::options::{DatabaseOptions, ensure_known_options};

/// An opaque "create page" operation against the store.
pub trait PageWriter: Send + Sync {
    /// Create a page in `database_id` and return its id.
    fn create_page(
        &self,
        database_id: &str,
        properties: Map<String, Value>,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

fn check_draft(draft: &PostDraft) -> Result<(), PublishError> {
    let blank = |field: &'static str| PublishError::InvalidDraft {
        field,
        reason: "must not be blank".to_string(),
    };
    if draft.title.trim().is_empty() {
        return Err(blank("title"));
    }
    if draft.slug.trim().is_empty() {
        return Err(blank("slug"));
    }
    if draft.part.is_some() && draft.series_id.is_none() {
        return Err(PublishError::InvalidDraft {
            field: "part",
            reason: "a part number needs a series".to_string(),
        });
    }
    if draft.part == Some(0) {
        return Err(PublishError::InvalidDraft {
            field: "part",
            reason: "parts are numbered from 1".to_string(),
        });
    }
    Ok(())
}

/// Validate `draft` and create it as a page in `database_id`.
///
/// Nothing is written unless the draft is complete and every select value is
/// among `options`.
///
/// # Errors
///
/// Returns [`PublishError::InvalidDraft`] or [`PublishError::InvalidOption`]
/// before any write, and [`PublishError::Writer`] if page creation fails.
pub async fn publish<W: PageWriter>(
    writer: &W,
    database_id: &str,
    options: &DatabaseOptions,
    draft: &PostDraft,
) -> Result<String, PublishError> {
    check_draft(draft)?;
    ensure_known_options(draft, options)?;

    let page_id = writer
        .create_page(database_id, to_properties(draft))
        .await
        .map_err(|e| {
            tracing::error!(slug = %draft.slug, database_id, error = %e, "page creation failed");
            PublishError::Writer(e)
        })?;
    tracing::info!(slug = %draft.slug, page_id = %page_id, "post published");
    Ok(page_id)
}
