//! Field manifests and the required/optional extraction policy.
//!
//! Each entity declares its properties as [`FieldSpec`]s. [`check_required`]
//! walks a manifest in order and reports the first required field that is
//! absent, malformed, of the wrong kind, or empty, so every rejection names
//! exactly one property.

use folio_core::errors::RecordError;
use folio_store::extract::{self, GuardFailure};
use folio_store::{Property, PropertyKind, PropertyValue, RawRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

pub mod post {
    use super::FieldSpec;
    use folio_store::PropertyKind;

    pub const NAME: FieldSpec = FieldSpec::required("Name", PropertyKind::Title);
    pub const SLUG: FieldSpec = FieldSpec::required("Slug", PropertyKind::RichText);
    pub const PUBLISHED: FieldSpec = FieldSpec::required("Published", PropertyKind::Date);
    pub const TYPE: FieldSpec = FieldSpec::required("Type", PropertyKind::Select);
    pub const FOCUS_AREA: FieldSpec = FieldSpec::optional("Focus Area", PropertyKind::Select);
    pub const DESCRIPTION: FieldSpec = FieldSpec::optional("Description", PropertyKind::RichText);
    pub const TAGS: FieldSpec = FieldSpec::optional("Tags", PropertyKind::MultiSelect);
    pub const READ_TIME: FieldSpec = FieldSpec::optional("Read Time", PropertyKind::Number);
    pub const FEATURED: FieldSpec = FieldSpec::optional("Featured", PropertyKind::Checkbox);
    pub const SERIES: FieldSpec = FieldSpec::optional("Series", PropertyKind::Relation);
    pub const PART: FieldSpec = FieldSpec::optional("Part", PropertyKind::Number);
    pub const REPOSITORY: FieldSpec = FieldSpec::optional("Repository", PropertyKind::Url);
    pub const DEMO: FieldSpec = FieldSpec::optional("Demo", PropertyKind::Url);
    pub const SOURCE: FieldSpec = FieldSpec::optional("Source", PropertyKind::Url);
    pub const CURATOR_NOTE: FieldSpec = FieldSpec::optional("Curator Note", PropertyKind::RichText);
    pub const ICON: FieldSpec = FieldSpec::optional("Icon", PropertyKind::Url);
    pub const COVER_IMAGE: FieldSpec = FieldSpec::optional("Cover Image", PropertyKind::RichText);
    pub const COVER: FieldSpec = FieldSpec::optional("Cover", PropertyKind::Files);
    pub const SKILLS: FieldSpec = FieldSpec::optional("Skills", PropertyKind::MultiSelect);
    pub const TOPICS: FieldSpec = FieldSpec::optional("Topics", PropertyKind::MultiSelect);

    pub const MANIFEST: &[FieldSpec] = &[
        NAME,
        SLUG,
        PUBLISHED,
        TYPE,
        FOCUS_AREA,
        DESCRIPTION,
        TAGS,
        READ_TIME,
        FEATURED,
        SERIES,
        PART,
        REPOSITORY,
        DEMO,
        SOURCE,
        CURATOR_NOTE,
        ICON,
        COVER_IMAGE,
        COVER,
        SKILLS,
        TOPICS,
    ];
}

pub mod series {
    use super::FieldSpec;
    use folio_store::PropertyKind;

    pub const NAME: FieldSpec = FieldSpec::required("Name", PropertyKind::Title);
    pub const SLUG: FieldSpec = FieldSpec::required("Slug", PropertyKind::RichText);
    pub const DESCRIPTION: FieldSpec = FieldSpec::optional("Description", PropertyKind::RichText);
    pub const GOAL: FieldSpec = FieldSpec::optional("Goal", PropertyKind::RichText);
    /// Read as a `status` property, falling back to a plain `select`.
    pub const STATUS: FieldSpec = FieldSpec::optional("Status", PropertyKind::Status);
    pub const FOCUS_AREA: FieldSpec = FieldSpec::optional("Focus Area", PropertyKind::Select);
    pub const TAGS: FieldSpec = FieldSpec::optional("Tags", PropertyKind::MultiSelect);
    pub const COVER_LIGHT: FieldSpec = FieldSpec::optional("Cover Light", PropertyKind::RichText);
    pub const COVER_DARK: FieldSpec = FieldSpec::optional("Cover Dark", PropertyKind::RichText);
    pub const COVER: FieldSpec = FieldSpec::optional("Cover", PropertyKind::Files);
    pub const POSTS: FieldSpec = FieldSpec::optional("Posts", PropertyKind::Relation);
    pub const POST_COUNT: FieldSpec = FieldSpec::optional("Post Count", PropertyKind::Rollup);
    pub const PUBLISHED: FieldSpec = FieldSpec::optional("Published", PropertyKind::Date);

    pub const MANIFEST: &[FieldSpec] = &[
        NAME,
        SLUG,
        DESCRIPTION,
        GOAL,
        STATUS,
        FOCUS_AREA,
        TAGS,
        COVER_LIGHT,
        COVER_DARK,
        COVER,
        POSTS,
        POST_COUNT,
        PUBLISHED,
    ];
}

/// Check every required field of `manifest`, in manifest order.
///
/// # Errors
///
/// - guard reports absent or malformed → [`RecordError::PropertyMissing`]
/// - guard reports another kind → [`RecordError::PropertyType`]
/// - guard passes but the value is empty → [`RecordError::PropertyMissing`]
pub fn check_required(record: &RawRecord, manifest: &[FieldSpec]) -> Result<(), RecordError> {
    for spec in manifest.iter().filter(|s| s.required) {
        require(record, spec)?;
    }
    Ok(())
}

/// Guard one required field and reject empty values.
///
/// # Errors
///
/// See [`check_required`].
pub fn require<'a>(
    record: &'a RawRecord,
    spec: &FieldSpec,
) -> Result<&'a PropertyValue, RecordError> {
    let missing = || RecordError::PropertyMissing {
        record_id: record.id.clone(),
        property: spec.name.to_string(),
    };
    let value = extract::guard(record.property(spec.name), spec.kind).map_err(|failure| {
        match failure {
            GuardFailure::Absent | GuardFailure::Malformed => missing(),
            GuardFailure::WrongKind { found } => RecordError::PropertyType {
                record_id: record.id.clone(),
                property: spec.name.to_string(),
                expected: spec.kind.as_str(),
                found,
            },
        }
    })?;
    if is_empty(value) {
        return Err(missing());
    }
    Ok(value)
}

/// Return the property for an optional field when it passes its guard.
///
/// A present-but-unreadable optional property is logged and treated as absent,
/// so the caller's extractor yields the documented default.
pub fn optional<'a>(record: &'a RawRecord, spec: &FieldSpec) -> Option<&'a Property> {
    let prop = record.property(spec.name)?;
    match extract::guard(Some(prop), spec.kind) {
        Ok(_) => Some(prop),
        Err(failure) => {
            tracing::debug!(
                record_id = %record.id,
                property = spec.name,
                expected = spec.kind.as_str(),
                ?failure,
                "optional property unreadable, using default"
            );
            None
        }
    }
}

/// Whether a guarded value carries nothing usable for a required field.
fn is_empty(value: &PropertyValue) -> bool {
    match value {
        PropertyValue::Title { title: segments }
        | PropertyValue::RichText {
            rich_text: segments,
        } => extract::join_plain_text(segments).trim().is_empty(),
        PropertyValue::Select { select: option } | PropertyValue::Status { status: option } => {
            option.as_ref().is_none_or(|o| o.name.trim().is_empty())
        }
        PropertyValue::Date { date } => date.as_ref().is_none_or(|d| d.start.trim().is_empty()),
        PropertyValue::Number { number } => number.is_none(),
        PropertyValue::Url { url } => url.as_ref().is_none_or(|u| u.trim().is_empty()),
        PropertyValue::MultiSelect { multi_select } => multi_select.is_empty(),
        PropertyValue::Relation { relation } => relation.is_empty(),
        PropertyValue::Files { files } => files.is_empty(),
        PropertyValue::Checkbox { .. } | PropertyValue::Rollup { .. } => false,
    }
}
