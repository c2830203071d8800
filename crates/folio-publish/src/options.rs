//! Select option sets configured on the store's posts database.

use folio_normalize::fields::post;
use serde_json::Value;

use crate::draft::PostDraft;
use crate::error::PublishError;

/// The option names a database currently offers for its select properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseOptions {
    pub content_types: Vec<String>,
    pub focus_areas: Vec<String>,
    pub tags: Vec<String>,
}

impl DatabaseOptions {
    /// Read option sets from a database object (`{"properties": {...}}`).
    ///
    /// Properties that are missing or not select-like yield an empty set.
    #[must_use]
    pub fn from_database(database: &Value) -> Self {
        let options = |name: &str| -> Vec<String> {
            let Some(prop) = database.get("properties").and_then(|p| p.get(name)) else {
                return Vec::new();
            };
            let kind = prop.get("type").and_then(Value::as_str).unwrap_or_default();
            prop.get(kind)
                .and_then(|config| config.get("options"))
                .and_then(Value::as_array)
                .map(|opts| {
                    opts.iter()
                        .filter_map(|o| o.get("name").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            content_types: options(post::TYPE.name),
            focus_areas: options(post::FOCUS_AREA.name),
            tags: options(post::TAGS.name),
        }
    }
}

fn check(field: &'static str, value: &str, allowed: &[String]) -> Result<(), PublishError> {
    if allowed.iter().any(|a| a == value) {
        return Ok(());
    }
    Err(PublishError::InvalidOption {
        field,
        value: value.to_string(),
        allowed: allowed.to_vec(),
    })
}

/// Fail on the first type, focus area or tag the store does not offer.
///
/// Matching is exact: the store treats option names as case-sensitive.
///
/// # Errors
///
/// Returns [`PublishError::InvalidOption`] naming the field, the offending
/// value, and the allowed set.
pub fn ensure_known_options(draft: &PostDraft, options: &DatabaseOptions) -> Result<(), PublishError> {
    check(post::TYPE.name, draft.content_type.as_str(), &options.content_types)?;
    if let Some(area) = draft.focus_area {
        check(post::FOCUS_AREA.name, area.as_str(), &options.focus_areas)?;
    }
    for tag in &draft.tags {
        check(post::TAGS.name, tag, &options.tags)?;
    }
    Ok(())
}
