use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Tag;
use crate::enums::{ContentType, FocusArea};

/// A published piece of writing.
///
/// `title` and `slug` are never empty on an assembled post.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Calendar date in UTC.
    pub published_on: NaiveDate,
    /// `published_on` formatted for display, e.g. `March 5, 2024`.
    pub date: String,
    pub content_type: ContentType,
    pub focus_area: Option<FocusArea>,
    pub description: String,
    pub tags: Vec<Tag>,
    pub read_time_minutes: u32,
    pub featured: bool,
    pub series: Option<SeriesLink>,
    pub links: ExternalLinks,
    pub curator_note: Option<String>,
    pub icon_url: Option<String>,
    pub cover_url: Option<String>,
    pub skills: Vec<String>,
    pub topics: Vec<String>,
}

impl Post {
    /// A post counts as published once its date is not in the future.
    #[must_use]
    pub fn is_published(&self, today: NaiveDate) -> bool {
        self.published_on <= today
    }
}

/// Position of a post inside a series.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SeriesLink {
    pub series_id: String,
    pub part: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExternalLinks {
    pub repository: Option<String>,
    pub demo: Option<String>,
    pub source: Option<String>,
}

impl ExternalLinks {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.repository.is_none() && self.demo.is_none() && self.source.is_none()
    }
}
