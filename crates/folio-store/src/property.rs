//! Tagged-union model of store properties.
//!
//! Every record field is a JSON object whose `type` tag selects the payload
//! key (`{"type": "select", "select": {...}}`). A field with a known tag and a
//! well-formed payload deserializes into [`PropertyValue`]. Anything else is
//! kept verbatim as [`Property::Malformed`], so one bad field never prevents
//! the rest of the record from loading.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// One entry of a record's property bag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Known(PropertyValue),
    Malformed(serde_json::Value),
}

impl Property {
    /// The raw `type` tag, when one is present.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Self::Known(value) => Some(value.kind().as_str()),
            Self::Malformed(raw) => raw.get("type").and_then(serde_json::Value::as_str),
        }
    }
}

/// A well-formed property payload.
///
/// Payloads that the store may send as explicit `null` are `Option`s. The
/// payload key itself must be present: `{"type": "number"}` is malformed,
/// `{"type": "number", "number": null}` is valid and empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichText>,
    },
    RichText {
        rich_text: Vec<RichText>,
    },
    Select {
        #[serde(deserialize_with = "nullable")]
        select: Option<SelectOption>,
    },
    Status {
        #[serde(deserialize_with = "nullable")]
        status: Option<SelectOption>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    Date {
        #[serde(deserialize_with = "nullable")]
        date: Option<DateValue>,
    },
    Number {
        #[serde(deserialize_with = "nullable")]
        number: Option<f64>,
    },
    Checkbox {
        checkbox: bool,
    },
    Relation {
        relation: Vec<RelationRef>,
    },
    Rollup {
        rollup: Rollup,
    },
    Files {
        files: Vec<FileObject>,
    },
    Url {
        #[serde(deserialize_with = "nullable")]
        url: Option<String>,
    },
}

impl PropertyValue {
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Title { .. } => PropertyKind::Title,
            Self::RichText { .. } => PropertyKind::RichText,
            Self::Select { .. } => PropertyKind::Select,
            Self::Status { .. } => PropertyKind::Status,
            Self::MultiSelect { .. } => PropertyKind::MultiSelect,
            Self::Date { .. } => PropertyKind::Date,
            Self::Number { .. } => PropertyKind::Number,
            Self::Checkbox { .. } => PropertyKind::Checkbox,
            Self::Relation { .. } => PropertyKind::Relation,
            Self::Rollup { .. } => PropertyKind::Rollup,
            Self::Files { .. } => PropertyKind::Files,
            Self::Url { .. } => PropertyKind::Url,
        }
    }
}

/// Discriminant of [`PropertyValue`], used by guards and field manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Title,
    RichText,
    Select,
    Status,
    MultiSelect,
    Date,
    Number,
    Checkbox,
    Relation,
    Rollup,
    Files,
    Url,
}

impl PropertyKind {
    /// The store's tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Select => "select",
            Self::Status => "status",
            Self::MultiSelect => "multi_select",
            Self::Date => "date",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Relation => "relation",
            Self::Rollup => "rollup",
            Self::Files => "files",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of a title or rich-text array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// A select, status, or multi-select option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateValue {
    /// ISO 8601 date or datetime.
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

/// Rollup payload. Only numeric and array rollups carry values the
/// assemblers use; every other rollup function lands in `Unsupported`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rollup {
    Number {
        #[serde(deserialize_with = "nullable")]
        number: Option<f64>,
    },
    Array {
        array: Vec<serde_json::Value>,
    },
    Date {
        #[serde(deserialize_with = "nullable")]
        date: Option<DateValue>,
    },
    #[serde(other)]
    Unsupported,
}

/// An uploaded (`file`) or linked (`external`) file reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    File {
        file: FileUrl,
        #[serde(default)]
        name: Option<String>,
    },
    External {
        external: FileUrl,
        #[serde(default)]
        name: Option<String>,
    },
}

impl FileObject {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::File { file, .. } => &file.url,
            Self::External { external, .. } => &external.url,
        }
    }

    #[must_use]
    pub const fn is_uploaded(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileUrl {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<String>,
}

/// Pick the first uploaded file URL, falling back to the first external one.
/// Blank URLs are ignored.
#[must_use]
pub fn preferred_file_url(files: &[FileObject]) -> Option<&str> {
    let usable = |f: &&FileObject| !f.url().trim().is_empty();
    files
        .iter()
        .filter(usable)
        .find(|f| f.is_uploaded())
        .or_else(|| files.iter().find(usable))
        .map(FileObject::url)
}

/// Require the key to be present while still accepting `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}
