//! Raw records and blocks as returned by the store.

use std::collections::BTreeMap;

use folio_core::entities::Block;
use serde::{Deserialize, Deserializer};

use crate::property::{FileObject, Property};

/// A page from a database query: an id plus a property bag keyed by the
/// property's display name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Property>,
    /// Page-level cover image. Unreadable covers are dropped, not errors.
    #[serde(default, deserialize_with = "lenient")]
    pub cover: Option<FileObject>,
}

impl RawRecord {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }
}

/// A child block of a page. The payload lives under the key named by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl From<RawBlock> for Block {
    fn from(mut raw: RawBlock) -> Self {
        let payload = raw
            .rest
            .remove(&raw.block_type)
            .unwrap_or(serde_json::Value::Null);
        Self {
            id: raw.id,
            block_type: raw.block_type,
            has_children: raw.has_children,
            payload,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
