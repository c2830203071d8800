//! Guards and property extractors.
//!
//! [`guard`] validates that a property exists and carries the expected kind.
//! Every extractor runs the guard for its kind and returns the unwrapped value,
//! or the kind's empty value (`""`, `vec![]`, `None`, `false`) when the guard
//! fails. Extractors never fail.
//!
//! An explicit `null` payload passes the guard and extracts to `None`; a
//! missing or malformed property is a guard failure. Both extract to `None`,
//! so callers that must tell them apart call [`guard`] first.

use crate::property::{
    DateValue, FileObject, Property, PropertyKind, PropertyValue, RichText, Rollup, SelectOption,
};

/// Why a guard rejected a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardFailure {
    /// The property is not in the bag.
    Absent,
    /// The property has the expected tag (or none) but an unreadable payload.
    Malformed,
    /// The property carries a different kind tag.
    WrongKind { found: String },
}

/// Check that `prop` is a well-formed property of `kind`.
///
/// # Errors
///
/// Returns the [`GuardFailure`] describing why the property was rejected.
pub fn guard(prop: Option<&Property>, kind: PropertyKind) -> Result<&PropertyValue, GuardFailure> {
    match prop {
        None => Err(GuardFailure::Absent),
        Some(Property::Known(value)) if value.kind() == kind => Ok(value),
        Some(Property::Known(value)) => Err(GuardFailure::WrongKind {
            found: value.kind().as_str().to_string(),
        }),
        Some(raw @ Property::Malformed(_)) => match raw.type_tag() {
            Some(tag) if tag != kind.as_str() => Err(GuardFailure::WrongKind {
                found: tag.to_string(),
            }),
            _ => Err(GuardFailure::Malformed),
        },
    }
}

/// Concatenate the plain text of every segment.
#[must_use]
pub fn join_plain_text(segments: &[RichText]) -> String {
    segments.iter().map(|s| s.plain_text.as_str()).collect()
}

#[must_use]
pub fn title(prop: Option<&Property>) -> String {
    match guard(prop, PropertyKind::Title) {
        Ok(PropertyValue::Title { title }) => join_plain_text(title),
        _ => String::new(),
    }
}

/// Rich text as a single string. An empty segment array is `""`.
#[must_use]
pub fn rich_text(prop: Option<&Property>) -> String {
    match guard(prop, PropertyKind::RichText) {
        Ok(PropertyValue::RichText { rich_text }) => join_plain_text(rich_text),
        _ => String::new(),
    }
}

#[must_use]
pub fn select(prop: Option<&Property>) -> Option<SelectOption> {
    match guard(prop, PropertyKind::Select) {
        Ok(PropertyValue::Select { select }) => select.clone(),
        _ => None,
    }
}

#[must_use]
pub fn status(prop: Option<&Property>) -> Option<SelectOption> {
    match guard(prop, PropertyKind::Status) {
        Ok(PropertyValue::Status { status }) => status.clone(),
        _ => None,
    }
}

#[must_use]
pub fn multi_select(prop: Option<&Property>) -> Vec<SelectOption> {
    match guard(prop, PropertyKind::MultiSelect) {
        Ok(PropertyValue::MultiSelect { multi_select }) => multi_select.clone(),
        _ => Vec::new(),
    }
}

#[must_use]
pub fn date(prop: Option<&Property>) -> Option<DateValue> {
    match guard(prop, PropertyKind::Date) {
        Ok(PropertyValue::Date { date }) => date.clone(),
        _ => None,
    }
}

#[must_use]
pub fn number(prop: Option<&Property>) -> Option<f64> {
    match guard(prop, PropertyKind::Number) {
        Ok(PropertyValue::Number { number }) => *number,
        _ => None,
    }
}

#[must_use]
pub fn checkbox(prop: Option<&Property>) -> bool {
    matches!(
        guard(prop, PropertyKind::Checkbox),
        Ok(PropertyValue::Checkbox { checkbox: true })
    )
}

/// Related record ids, in store order.
#[must_use]
pub fn relation(prop: Option<&Property>) -> Vec<String> {
    match guard(prop, PropertyKind::Relation) {
        Ok(PropertyValue::Relation { relation }) => {
            relation.iter().map(|r| r.id.clone()).collect()
        }
        _ => Vec::new(),
    }
}

/// Numeric value of a rollup: the number itself, or the array length.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rollup_count(prop: Option<&Property>) -> Option<f64> {
    match guard(prop, PropertyKind::Rollup) {
        Ok(PropertyValue::Rollup {
            rollup: Rollup::Number { number },
        }) => *number,
        Ok(PropertyValue::Rollup {
            rollup: Rollup::Array { array },
        }) => Some(array.len() as f64),
        _ => None,
    }
}

#[must_use]
pub fn files(prop: Option<&Property>) -> Vec<FileObject> {
    match guard(prop, PropertyKind::Files) {
        Ok(PropertyValue::Files { files }) => files.clone(),
        _ => Vec::new(),
    }
}

/// URL value. Blank strings are treated as empty.
#[must_use]
pub fn url(prop: Option<&Property>) -> Option<String> {
    match guard(prop, PropertyKind::Url) {
        Ok(PropertyValue::Url { url: Some(url) }) if !url.trim().is_empty() => {
            Some(url.trim().to_string())
        }
        _ => None,
    }
}
