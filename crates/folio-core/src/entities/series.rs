use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Tag;
use crate::enums::{FocusArea, SeriesStatus};

/// An ordered collection of posts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub goal: String,
    pub status: SeriesStatus,
    pub focus_area: Option<FocusArea>,
    pub tags: Vec<Tag>,
    pub cover_light: Option<String>,
    pub cover_dark: Option<String>,
    pub post_count: u32,
    pub published_on: Option<NaiveDate>,
}
