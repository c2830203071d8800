use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One child block of a page. The payload is passed through untouched for
/// the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Block {
    pub id: String,
    pub block_type: String,
    pub has_children: bool,
    pub payload: serde_json::Value,
}
