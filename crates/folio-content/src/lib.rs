//! # folio-content
//!
//! The query orchestrator: issues store queries, normalizes the results, and
//! caches each operation under a deterministic key with a per-class TTL.
//!
//! Operations on [`ContentService`]:
//! - `posts`, `series`, `series_posts`: batch reads; unreadable records are
//!   skipped and logged
//! - `post_by_slug`: single lookup; `Ok(None)` means not found
//! - `featured_series`: concurrent per-series lookups projected into
//!   [`FeaturedSeries`](folio_core::entities::FeaturedSeries)
//! - `page_blocks`: all child blocks of a page, following cursors

mod error;
mod queries;
mod service;

pub use error::ContentError;
pub use service::ContentService;
