use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Post, Series};

/// A trimmed-down post shown inside a featured series card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeaturedArticle {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub published_on: NaiveDate,
    pub part: Option<u32>,
    pub read_time_minutes: u32,
    pub description: String,
}

impl From<&Post> for FeaturedArticle {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            date: post.date.clone(),
            published_on: post.published_on,
            part: post.series.as_ref().and_then(|s| s.part),
            read_time_minutes: post.read_time_minutes,
            description: post.description.clone(),
        }
    }
}

/// A series together with its published articles.
///
/// Only built for series with at least one published post, so `articles`
/// is never empty.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeaturedSeries {
    pub series: Series,
    pub articles: Vec<FeaturedArticle>,
    /// Number of published posts, before the article limit is applied.
    pub published_count: usize,
}
