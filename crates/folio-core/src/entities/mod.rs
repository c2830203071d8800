//! Entity structs for the normalized content domain.
//!
//! Every entity is an immutable value assembled from a remote property bag.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so rendering
//! layers can consume them as JSON.

mod block;
mod featured;
mod post;
mod series;

pub use block::Block;
pub use featured::{FeaturedArticle, FeaturedSeries};
pub use post::{ExternalLinks, Post, SeriesLink};
pub use series::Series;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A multi-select option as shown on the site: name plus the store's color.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
    pub color: String,
}
