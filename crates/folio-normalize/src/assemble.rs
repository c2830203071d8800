//! Per-entity assemblers.
//!
//! An assembler first checks the entity's required fields against its
//! manifest, then extracts every field in turn. Required-field failures reject
//! the record; optional fields fall back to their documented defaults.

use folio_core::entities::{ExternalLinks, Post, Series, SeriesLink, Tag};
use folio_core::enums::{ContentType, FocusArea, SeriesStatus};
use folio_core::errors::RecordError;
use folio_store::RawRecord;
use folio_store::extract;
use folio_store::property::SelectOption;

use crate::assets::{AssetResolver, CoverSlots, Theme};
use crate::dates::{format_date, parse_date};
use crate::fields::{FieldSpec, check_required, optional, post, series};

/// Read time used when a post does not state one.
pub const DEFAULT_READ_TIME_MINUTES: u32 = 5;

/// Assemblers bound to one cover resolver.
#[derive(Debug, Clone)]
pub struct Assembler {
    assets: AssetResolver,
}

impl Assembler {
    #[must_use]
    pub const fn new(assets: AssetResolver) -> Self {
        Self { assets }
    }

    /// # Errors
    ///
    /// See [`assemble_post`].
    pub fn post(&self, record: &RawRecord) -> Result<Post, RecordError> {
        assemble_post(record, &self.assets)
    }

    /// # Errors
    ///
    /// See [`assemble_series`].
    pub fn series(&self, record: &RawRecord) -> Result<Series, RecordError> {
        assemble_series(record, &self.assets)
    }
}

/// Build a [`Post`] from a raw record.
///
/// # Errors
///
/// - [`RecordError::PropertyMissing`] / [`RecordError::PropertyType`] for a bad
///   `Name`, `Slug`, `Published` or `Type`
/// - [`RecordError::Parsing`] for an unparseable date or unknown content type
/// - [`RecordError::Validation`] for a part without a series, or a negative or
///   fractional read time or part
pub fn assemble_post(record: &RawRecord, assets: &AssetResolver) -> Result<Post, RecordError> {
    check_required(record, post::MANIFEST)?;

    let title = extract::title(record.property(post::NAME.name)).trim().to_string();
    let slug = extract::rich_text(record.property(post::SLUG.name)).trim().to_string();
    let published_on = required_date(record, &post::PUBLISHED)?;
    let content_type = content_type(record)?;

    let read_time_minutes = match extract::number(optional(record, &post::READ_TIME)) {
        Some(value) => whole_number(record, &post::READ_TIME, value, 0)?,
        None => DEFAULT_READ_TIME_MINUTES,
    };

    let series_id = extract::relation(optional(record, &post::SERIES))
        .into_iter()
        .next();
    let part = extract::number(optional(record, &post::PART))
        .map(|value| whole_number(record, &post::PART, value, 1))
        .transpose()?;
    let series = match (series_id, part) {
        (Some(series_id), part) => Some(SeriesLink { series_id, part }),
        (None, Some(part)) => {
            return Err(RecordError::Validation {
                record_id: record.id.clone(),
                message: format!("part {part} is set but the post is not linked to a series"),
            });
        }
        (None, None) => None,
    };

    let curator_note = non_empty(extract::rich_text(optional(record, &post::CURATOR_NOTE)));

    Ok(Post {
        id: record.id.clone(),
        title,
        slug,
        published_on,
        date: format_date(published_on),
        content_type,
        focus_area: focus_area(record, &post::FOCUS_AREA),
        description: extract::rich_text(optional(record, &post::DESCRIPTION))
            .trim()
            .to_string(),
        tags: tags(record, &post::TAGS),
        read_time_minutes,
        featured: extract::checkbox(optional(record, &post::FEATURED)),
        series,
        links: ExternalLinks {
            repository: extract::url(optional(record, &post::REPOSITORY)),
            demo: extract::url(optional(record, &post::DEMO)),
            source: extract::url(optional(record, &post::SOURCE)),
        },
        curator_note,
        icon_url: extract::url(optional(record, &post::ICON)),
        cover_url: assets.resolve(record, &CoverSlots::post()).map(|c| c.url),
        skills: option_names(record, &post::SKILLS),
        topics: option_names(record, &post::TOPICS),
    })
}

/// Build a [`Series`] from a raw record.
///
/// # Errors
///
/// [`RecordError::PropertyMissing`] / [`RecordError::PropertyType`] for a bad
/// `Name` or `Slug`. Every other field has a default.
pub fn assemble_series(record: &RawRecord, assets: &AssetResolver) -> Result<Series, RecordError> {
    check_required(record, series::MANIFEST)?;

    let published_on = extract::date(optional(record, &series::PUBLISHED)).and_then(|d| {
        let parsed = parse_date(&d.start);
        if parsed.is_none() {
            tracing::debug!(record_id = %record.id, raw = %d.start, "ignoring unparseable series date");
        }
        parsed
    });

    Ok(Series {
        id: record.id.clone(),
        name: extract::title(record.property(series::NAME.name))
            .trim()
            .to_string(),
        slug: extract::rich_text(record.property(series::SLUG.name))
            .trim()
            .to_string(),
        description: extract::rich_text(optional(record, &series::DESCRIPTION))
            .trim()
            .to_string(),
        goal: extract::rich_text(optional(record, &series::GOAL))
            .trim()
            .to_string(),
        status: series_status(record),
        focus_area: focus_area(record, &series::FOCUS_AREA),
        tags: tags(record, &series::TAGS),
        cover_light: assets
            .resolve(record, &CoverSlots::series(Theme::Light))
            .map(|c| c.url),
        cover_dark: assets
            .resolve(record, &CoverSlots::series(Theme::Dark))
            .map(|c| c.url),
        post_count: post_count(record),
        published_on,
    })
}

/// Status may be encoded as a `status` or a `select` property.
fn series_status(record: &RawRecord) -> SeriesStatus {
    let prop = record.property(series::STATUS.name);
    extract::status(prop)
        .or_else(|| extract::select(prop))
        .map_or(SeriesStatus::Draft, |option| {
            SeriesStatus::normalize(&option.name)
        })
}

/// Rollup count, then relation length, then zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn post_count(record: &RawRecord) -> u32 {
    extract::rollup_count(optional(record, &series::POST_COUNT))
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u32)
        .unwrap_or_else(|| {
            let related = extract::relation(optional(record, &series::POSTS)).len();
            u32::try_from(related).unwrap_or(u32::MAX)
        })
}

fn required_date(record: &RawRecord, spec: &FieldSpec) -> Result<chrono::NaiveDate, RecordError> {
    let raw = extract::date(record.property(spec.name))
        .map(|d| d.start)
        .unwrap_or_default();
    parse_date(&raw).ok_or_else(|| RecordError::Parsing {
        record_id: record.id.clone(),
        property: spec.name.to_string(),
        message: format!("unrecognized date '{raw}'"),
    })
}

fn content_type(record: &RawRecord) -> Result<ContentType, RecordError> {
    let name = extract::select(record.property(post::TYPE.name))
        .map(|o| o.name)
        .unwrap_or_default();
    ContentType::from_name(&name).ok_or_else(|| RecordError::Parsing {
        record_id: record.id.clone(),
        property: post::TYPE.name.to_string(),
        message: format!("unknown content type '{name}'"),
    })
}

fn focus_area(record: &RawRecord, spec: &FieldSpec) -> Option<FocusArea> {
    let name = extract::select(optional(record, spec))?.name;
    let area = FocusArea::from_name(&name);
    if area.is_none() {
        tracing::debug!(record_id = %record.id, value = %name, "unknown focus area, leaving unset");
    }
    area
}

fn tags(record: &RawRecord, spec: &FieldSpec) -> Vec<Tag> {
    extract::multi_select(optional(record, spec))
        .into_iter()
        .filter(|o| !o.name.trim().is_empty())
        .map(|SelectOption { name, color, .. }| Tag { name, color })
        .collect()
}

fn option_names(record: &RawRecord, spec: &FieldSpec) -> Vec<String> {
    tags(record, spec).into_iter().map(|t| t.name).collect()
}

/// Convert a store number into a non-negative whole number of at least `min`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(
    record: &RawRecord,
    spec: &FieldSpec,
    value: f64,
    min: u32,
) -> Result<u32, RecordError> {
    let in_range = value >= f64::from(min) && value <= f64::from(u32::MAX);
    if value.is_finite() && value.fract() == 0.0 && in_range {
        return Ok(value as u32);
    }
    Err(RecordError::Validation {
        record_id: record.id.clone(),
        message: format!(
            "'{}' must be a whole number of at least {min}, got {value}",
            spec.name
        ),
    })
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn resolver() -> AssetResolver {
        AssetResolver::new("/images/covers", Some("https://img.example.com/seed".into()))
    }

    fn text(kind: &str, value: &str) -> Value {
        json!({"type": kind, kind: [{"plain_text": value}]})
    }

    fn post_properties() -> serde_json::Map<String, Value> {
        let value = json!({
            "Name": text("title", "Ownership in practice"),
            "Slug": text("rich_text", "ownership-in-practice"),
            "Published": {"type": "date", "date": {"start": "2024-03-05"}},
            "Type": {"type": "select", "select": {"name": "Tutorial", "color": "blue"}}
        });
        let Value::Object(map) = value else {
            unreachable!()
        };
        map
    }

    fn post_record(properties: serde_json::Map<String, Value>) -> RawRecord {
        serde_json::from_value(json!({"id": "post-1", "properties": properties})).unwrap()
    }

    #[test]
    fn minimal_post_gets_documented_defaults() {
        let post = assemble_post(&post_record(post_properties()), &resolver()).unwrap();
        assert_eq!(post.title, "Ownership in practice");
        assert_eq!(post.slug, "ownership-in-practice");
        assert_eq!(post.published_on, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(post.date, "March 5, 2024");
        assert_eq!(post.content_type, ContentType::Tutorial);
        assert_eq!(post.focus_area, None);
        assert_eq!(post.description, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.read_time_minutes, DEFAULT_READ_TIME_MINUTES);
        assert!(!post.featured);
        assert_eq!(post.series, None);
        assert!(post.links.is_empty());
        assert_eq!(post.curator_note, None);
        assert_eq!(post.icon_url, None);
        assert_eq!(post.cover_url, None);
        assert!(post.skills.is_empty());
        assert!(post.topics.is_empty());
    }

    #[test]
    fn full_post() {
        let mut props = post_properties();
        props.insert("Focus Area".into(), json!({"type": "select", "select": {"name": "Backend"}}));
        props.insert("Description".into(), text("rich_text", " Borrowing without tears "));
        props.insert(
            "Tags".into(),
            json!({"type": "multi_select", "multi_select": [{"name": "rust", "color": "orange"}]}),
        );
        props.insert("Read Time".into(), json!({"type": "number", "number": 9}));
        props.insert("Featured".into(), json!({"type": "checkbox", "checkbox": true}));
        props.insert("Series".into(), json!({"type": "relation", "relation": [{"id": "s1"}]}));
        props.insert("Part".into(), json!({"type": "number", "number": 2}));
        props.insert("Repository".into(), json!({"type": "url", "url": "https://github.com/x/y"}));
        props.insert("Curator Note".into(), text("rich_text", "Start here"));
        props.insert("Cover Image".into(), text("rich_text", "ownership.png"));
        props.insert(
            "Skills".into(),
            json!({"type": "multi_select", "multi_select": [{"name": "lifetimes"}]}),
        );

        let post = assemble_post(&post_record(props), &resolver()).unwrap();
        assert_eq!(post.focus_area, Some(FocusArea::Backend));
        assert_eq!(post.description, "Borrowing without tears");
        assert_eq!(
            post.tags,
            vec![Tag {
                name: "rust".into(),
                color: "orange".into()
            }]
        );
        assert_eq!(post.read_time_minutes, 9);
        assert!(post.featured);
        assert_eq!(
            post.series,
            Some(SeriesLink {
                series_id: "s1".into(),
                part: Some(2)
            })
        );
        assert_eq!(post.links.repository.as_deref(), Some("https://github.com/x/y"));
        assert_eq!(post.curator_note.as_deref(), Some("Start here"));
        assert_eq!(post.cover_url.as_deref(), Some("/images/covers/ownership.png"));
        assert_eq!(post.skills, vec!["lifetimes"]);
    }

    #[test]
    fn missing_title_is_rejected_not_defaulted() {
        let mut props = post_properties();
        props.remove("Name");
        let err = assemble_post(&post_record(props), &resolver()).unwrap_err();
        assert_eq!(
            err,
            RecordError::PropertyMissing {
                record_id: "post-1".into(),
                property: "Name".into()
            }
        );
    }

    #[test]
    fn whitespace_slug_is_missing() {
        let mut props = post_properties();
        props.insert("Slug".into(), text("rich_text", "   "));
        let err = assemble_post(&post_record(props), &resolver()).unwrap_err();
        assert_eq!(err.property(), Some("Slug"));
        assert_eq!(err.kind(), "property_missing");
    }

    #[test]
    fn unknown_content_type_is_parsing_error() {
        let mut props = post_properties();
        props.insert("Type".into(), json!({"type": "select", "select": {"name": "Podcast"}}));
        let err = assemble_post(&post_record(props), &resolver()).unwrap_err();
        assert!(matches!(err, RecordError::Parsing { ref property, .. } if property == "Type"));
    }

    #[test]
    fn bad_date_is_parsing_error() {
        let mut props = post_properties();
        props.insert("Published".into(), json!({"type": "date", "date": {"start": "soon"}}));
        let err = assemble_post(&post_record(props), &resolver()).unwrap_err();
        assert!(matches!(err, RecordError::Parsing { ref property, .. } if property == "Published"));
    }

    #[test]
    fn part_without_series_fails_validation() {
        let mut props = post_properties();
        props.insert("Part".into(), json!({"type": "number", "number": 3}));
        let err = assemble_post(&post_record(props), &resolver()).unwrap_err();
        assert!(matches!(err, RecordError::Validation { .. }));
    }

    #[test]
    fn negative_read_time_fails_validation() {
        let mut props = post_properties();
        props.insert("Read Time".into(), json!({"type": "number", "number": -4}));
        let err = assemble_post(&post_record(props), &resolver()).unwrap_err();
        assert!(matches!(err, RecordError::Validation { .. }));
    }

    #[test]
    fn malformed_optional_fields_use_defaults() {
        let mut props = post_properties();
        props.insert("Read Time".into(), json!({"type": "number", "number": "ten"}));
        props.insert("Tags".into(), json!({"type": "select", "select": {"name": "rust"}}));
        props.insert("Featured".into(), json!({"type": "checkbox"}));
        props.insert("Focus Area".into(), json!({"type": "select", "select": {"name": "Gardening"}}));
        let post = assemble_post(&post_record(props), &resolver()).unwrap();
        assert_eq!(post.read_time_minutes, DEFAULT_READ_TIME_MINUTES);
        assert!(post.tags.is_empty());
        assert!(!post.featured);
        assert_eq!(post.focus_area, None);
    }

    fn series_record(properties: Value) -> RawRecord {
        serde_json::from_value(json!({"id": "series-1", "properties": properties})).unwrap()
    }

    #[test]
    fn series_with_status_property() {
        let rec = series_record(json!({
            "Name": text("title", "Rust from scratch"),
            "Slug": text("rich_text", "rust-from-scratch"),
            "Goal": text("rich_text", "Ship a CLI"),
            "Status": {"type": "status", "status": {"name": "In Progress"}},
            "Posts": {"type": "relation", "relation": [{"id": "a"}, {"id": "b"}]},
            "Published": {"type": "date", "date": {"start": "2024-01-10T08:00:00Z"}}
        }));
        let series = assemble_series(&rec, &resolver()).unwrap();
        assert_eq!(series.name, "Rust from scratch");
        assert_eq!(series.goal, "Ship a CLI");
        assert_eq!(series.status, SeriesStatus::Active);
        assert_eq!(series.post_count, 2);
        assert_eq!(
            series.published_on,
            Some(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
        );
        assert_eq!(
            series.cover_light.as_deref(),
            Some("https://img.example.com/seed/series-1/1200/630")
        );
    }

    #[test]
    fn series_status_from_select_encoding() {
        let rec = series_record(json!({
            "Name": text("title", "Done series"),
            "Slug": text("rich_text", "done-series"),
            "Status": {"type": "select", "select": {"name": "Done"}}
        }));
        assert_eq!(
            assemble_series(&rec, &resolver()).unwrap().status,
            SeriesStatus::Completed
        );
    }

    #[test]
    fn series_defaults() {
        let rec = series_record(json!({
            "Name": text("title", "Quiet"),
            "Slug": text("rich_text", "quiet"),
            "Status": {"type": "status", "status": {"name": "Paused"}},
            "Published": {"type": "date", "date": {"start": "whenever"}}
        }));
        let series = assemble_series(&rec, &resolver()).unwrap();
        assert_eq!(series.status, SeriesStatus::Draft);
        assert_eq!(series.post_count, 0);
        assert_eq!(series.published_on, None);
        assert_eq!(series.description, "");
        assert!(series.tags.is_empty());
    }

    #[test]
    fn series_rollup_beats_relation_length() {
        let rec = series_record(json!({
            "Name": text("title", "Counted"),
            "Slug": text("rich_text", "counted"),
            "Post Count": {"type": "rollup", "rollup": {"type": "number", "number": 7}},
            "Posts": {"type": "relation", "relation": [{"id": "a"}]}
        }));
        assert_eq!(assemble_series(&rec, &resolver()).unwrap().post_count, 7);
    }

    #[test]
    fn series_missing_slug_is_rejected() {
        let rec = series_record(json!({"Name": text("title", "No slug")}));
        let err = assemble_series(&rec, &resolver()).unwrap_err();
        assert_eq!(err.property(), Some("Slug"));
    }
}
