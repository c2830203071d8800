//! AI-generated post metadata, validated before use.
//!
//! The generator's output is untrusted text. It is reduced to a JSON object
//! candidate, checked against the JSON Schema derived from
//! [`GeneratedMetadata`], and then checked against value bounds the schema
//! cannot express.

use std::future::Future;

use folio_core::enums::FocusArea;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::draft::PostDraft;
use crate::error::PublishError;

const MAX_DESCRIPTION_CHARS: usize = 300;
const MAX_TAGS: usize = 8;
const MAX_READ_TIME_MINUTES: u32 = 120;

/// An opaque text-generation backend.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        system_prompt: &str,
        user_block: &str,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeneratedMetadata {
    /// One or two sentences summarizing the post.
    pub description: String,
    pub tags: Vec<String>,
    pub read_time_minutes: u32,
    /// Display name of a focus area, when the model proposes one.
    #[serde(default)]
    pub focus_area: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Ask `generator` for metadata and validate the answer.
///
/// # Errors
///
/// Returns [`PublishError::Generator`] if the call fails, otherwise whatever
/// [`parse_generated_metadata`] reports.
pub async fn generate_metadata<G: TextGenerator>(
    generator: &G,
    system_prompt: &str,
    user_block: &str,
) -> Result<GeneratedMetadata, PublishError> {
    let raw = generator
        .generate(system_prompt, user_block)
        .await
        .map_err(PublishError::Generator)?;
    parse_generated_metadata(&raw)
}

/// Validate generator output as [`GeneratedMetadata`].
///
/// Prose or code fences around the object are tolerated; the candidate is
/// the span from the first `{` to the last `}`.
///
/// # Errors
///
/// - [`PublishError::Candidate`] when no JSON object can be parsed
/// - [`PublishError::Schema`] with every schema violation
/// - [`PublishError::Bounds`] for the first value outside its bounds
pub fn parse_generated_metadata(raw: &str) -> Result<GeneratedMetadata, PublishError> {
    let candidate = json_candidate(raw)
        .ok_or_else(|| PublishError::Candidate("no JSON object in output".to_string()))?;
    let value: serde_json::Value =
        serde_json::from_str(candidate).map_err(|e| PublishError::Candidate(e.to_string()))?;

    let schema = serde_json::to_value(schema_for!(GeneratedMetadata))
        .map_err(|e| PublishError::Candidate(format!("schema generation failed: {e}")))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| PublishError::Candidate(format!("schema compilation failed: {e}")))?;
    let errors: Vec<String> = validator
        .iter_errors(&value)
        .map(|e| format!("{e}"))
        .collect();
    if !errors.is_empty() {
        tracing::warn!(errors = errors.len(), "generated metadata rejected by schema");
        return Err(PublishError::Schema { errors });
    }

    let metadata: GeneratedMetadata =
        serde_json::from_value(value).map_err(|e| PublishError::Candidate(e.to_string()))?;
    check_bounds(&metadata)?;
    Ok(metadata)
}

fn json_candidate(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn check_bounds(meta: &GeneratedMetadata) -> Result<(), PublishError> {
    let description = meta.description.trim();
    if description.is_empty() {
        return Err(PublishError::Bounds("description is empty".into()));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(PublishError::Bounds(format!(
            "description exceeds {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    if meta.tags.is_empty() || meta.tags.len() > MAX_TAGS {
        return Err(PublishError::Bounds(format!(
            "expected 1 to {MAX_TAGS} tags, got {}",
            meta.tags.len()
        )));
    }
    if meta.tags.iter().any(|t| t.trim().is_empty()) {
        return Err(PublishError::Bounds("tags must not be blank".into()));
    }
    if !(1..=MAX_READ_TIME_MINUTES).contains(&meta.read_time_minutes) {
        return Err(PublishError::Bounds(format!(
            "read time {} is outside 1..={MAX_READ_TIME_MINUTES}",
            meta.read_time_minutes
        )));
    }
    if let Some(area) = &meta.focus_area {
        if FocusArea::from_name(area).is_none() {
            return Err(PublishError::Bounds(format!("unknown focus area '{area}'")));
        }
    }
    Ok(())
}

/// Fill the draft's empty fields from `meta`. Author-supplied values are
/// never replaced. Returns the names of the fields that were filled.
pub fn enrich_draft(draft: &mut PostDraft, meta: &GeneratedMetadata) -> Vec<&'static str> {
    let mut filled = Vec::new();
    if draft.description.trim().is_empty() {
        draft.description = meta.description.trim().to_string();
        filled.push("description");
    }
    if draft.tags.is_empty() {
        draft.tags.clone_from(&meta.tags);
        filled.push("tags");
    }
    if draft.read_time_minutes.is_none() {
        draft.read_time_minutes = Some(meta.read_time_minutes);
        filled.push("read_time_minutes");
    }
    if draft.focus_area.is_none() {
        if let Some(area) = meta.focus_area.as_deref().and_then(FocusArea::from_name) {
            draft.focus_area = Some(area);
            filled.push("focus_area");
        }
    }
    if draft.skills.is_empty() && !meta.skills.is_empty() {
        draft.skills.clone_from(&meta.skills);
        filled.push("skills");
    }
    if draft.topics.is_empty() && !meta.topics.is_empty() {
        draft.topics.clone_from(&meta.topics);
        filled.push("topics");
    }
    tracing::debug!(slug = %draft.slug, ?filled, "draft enriched from generated metadata");
    filled
}
