//! Closed enums for the normalized content domain.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `as_str()` returns the display name configured in the remote content store,
//! which is also the value the write path sends back.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Kind of post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Article,
    Tutorial,
    Project,
    Note,
}

impl ContentType {
    pub const ALL: [Self; 4] = [Self::Article, Self::Tutorial, Self::Project, Self::Note];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Tutorial => "Tutorial",
            Self::Project => "Project",
            Self::Note => "Note",
        }
    }

    /// Match a store option name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FocusArea
// ---------------------------------------------------------------------------

/// Engineering area a post or series concentrates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Frontend,
    Backend,
    Infrastructure,
    Data,
    MachineLearning,
    Security,
}

impl FocusArea {
    pub const ALL: [Self; 6] = [
        Self::Frontend,
        Self::Backend,
        Self::Infrastructure,
        Self::Data,
        Self::MachineLearning,
        Self::Security,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Infrastructure => "Infrastructure",
            Self::Data => "Data",
            Self::MachineLearning => "Machine Learning",
            Self::Security => "Security",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SeriesStatus
// ---------------------------------------------------------------------------

/// Normalized status of a series.
///
/// The store encodes status either as a `status` property or as a plain
/// `select`, with several spellings. [`SeriesStatus::normalize`] folds all of
/// them into this closed set.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    Active,
    Completed,
    #[default]
    Draft,
}

impl SeriesStatus {
    /// Map a raw status name onto the closed set.
    ///
    /// ```text
    /// "active" | "in progress" | "not started" → Active
    /// "completed" | "done"                     → Completed
    /// anything else                            → Draft
    /// ```
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "active" | "in progress" | "not started" => Self::Active,
            "completed" | "done" => Self::Completed,
            _ => Self::Draft,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for SeriesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Active", SeriesStatus::Active)]
    #[case("In Progress", SeriesStatus::Active)]
    #[case("Not Started", SeriesStatus::Active)]
    #[case("  in progress ", SeriesStatus::Active)]
    #[case("Completed", SeriesStatus::Completed)]
    #[case("Done", SeriesStatus::Completed)]
    #[case("DONE", SeriesStatus::Completed)]
    #[case("Draft", SeriesStatus::Draft)]
    #[case("Archived", SeriesStatus::Draft)]
    #[case("", SeriesStatus::Draft)]
    fn status_synonyms(#[case] raw: &str, #[case] expected: SeriesStatus) {
        assert_eq!(SeriesStatus::normalize(raw), expected);
    }

    #[test]
    fn content_type_from_name_ignores_case() {
        assert_eq!(ContentType::from_name("tutorial"), Some(ContentType::Tutorial));
        assert_eq!(ContentType::from_name(" Note "), Some(ContentType::Note));
        assert_eq!(ContentType::from_name("Podcast"), None);
    }

    #[test]
    fn focus_area_multiword_name() {
        assert_eq!(
            FocusArea::from_name("machine learning"),
            Some(FocusArea::MachineLearning)
        );
        assert_eq!(FocusArea::MachineLearning.to_string(), "Machine Learning");
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&SeriesStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        assert_eq!(SeriesStatus::default(), SeriesStatus::Draft);
    }
}
