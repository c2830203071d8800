//! Draft posts and their property-bag rendering.

use chrono::NaiveDate;
use folio_core::entities::ExternalLinks;
use folio_core::enums::{ContentType, FocusArea};
use folio_normalize::fields::post;
use serde_json::{Map, Value, json};

/// A post as authored, before it exists in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub published_on: NaiveDate,
    pub content_type: ContentType,
    pub focus_area: Option<FocusArea>,
    pub description: String,
    pub tags: Vec<String>,
    pub read_time_minutes: Option<u32>,
    pub featured: bool,
    pub series_id: Option<String>,
    pub part: Option<u32>,
    pub links: ExternalLinks,
    pub skills: Vec<String>,
    pub topics: Vec<String>,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        published_on: NaiveDate,
        content_type: ContentType,
    ) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            published_on,
            content_type,
            focus_area: None,
            description: String::new(),
            tags: Vec::new(),
            read_time_minutes: None,
            featured: false,
            series_id: None,
            part: None,
            links: ExternalLinks::default(),
            skills: Vec::new(),
            topics: Vec::new(),
        }
    }
}

fn text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

fn names(values: &[String]) -> Value {
    values.iter().map(|name| json!({ "name": name })).collect()
}

/// Render `draft` as the property bag the store's create-page call expects.
///
/// Empty optional fields are left out, so the store applies its own defaults.
#[must_use]
pub fn to_properties(draft: &PostDraft) -> Map<String, Value> {
    let mut props = Map::new();
    let mut put = |name: &str, value: Value| {
        props.insert(name.to_string(), value);
    };

    put(post::NAME.name, json!({ "title": text(&draft.title) }));
    put(post::SLUG.name, json!({ "rich_text": text(&draft.slug) }));
    put(
        post::PUBLISHED.name,
        json!({ "date": { "start": draft.published_on.format("%Y-%m-%d").to_string() } }),
    );
    put(
        post::TYPE.name,
        json!({ "select": { "name": draft.content_type.as_str() } }),
    );
    put(post::FEATURED.name, json!({ "checkbox": draft.featured }));

    if let Some(area) = draft.focus_area {
        put(post::FOCUS_AREA.name, json!({ "select": { "name": area.as_str() } }));
    }
    if !draft.description.trim().is_empty() {
        put(post::DESCRIPTION.name, json!({ "rich_text": text(&draft.description) }));
    }
    if !draft.tags.is_empty() {
        put(post::TAGS.name, json!({ "multi_select": names(&draft.tags) }));
    }
    if let Some(minutes) = draft.read_time_minutes {
        put(post::READ_TIME.name, json!({ "number": minutes }));
    }
    if let Some(series_id) = &draft.series_id {
        put(post::SERIES.name, json!({ "relation": [{ "id": series_id }] }));
    }
    if let Some(part) = draft.part {
        put(post::PART.name, json!({ "number": part }));
    }
    let links = [
        (post::REPOSITORY.name, &draft.links.repository),
        (post::DEMO.name, &draft.links.demo),
        (post::SOURCE.name, &draft.links.source),
    ];
    for (name, url) in links {
        if let Some(url) = url {
            put(name, json!({ "url": url }));
        }
    }
    if !draft.skills.is_empty() {
        put(post::SKILLS.name, json!({ "multi_select": names(&draft.skills) }));
    }
    if !draft.topics.is_empty() {
        put(post::TOPICS.name, json!({ "multi_select": names(&draft.topics) }));
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft() -> PostDraft {
        PostDraft::new(
            "Async Rust",
            "async-rust",
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ContentType::Tutorial,
        )
    }

    #[test]
    fn minimal_draft_renders_required_fields() {
        let props = to_properties(&draft());
        let mut keys: Vec<&str> = props.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Featured", "Name", "Published", "Slug", "Type"]);
        assert_eq!(props["Type"], json!({"select": {"name": "Tutorial"}}));
        assert_eq!(props["Published"], json!({"date": {"start": "2024-03-05"}}));
        assert_eq!(
            props["Name"],
            json!({"title": [{"type": "text", "text": {"content": "Async Rust"}}]})
        );
    }

    #[test]
    fn optional_fields_render_when_set() {
        let mut d = draft();
        d.focus_area = Some(FocusArea::MachineLearning);
        d.tags = vec!["rust".into(), "async".into()];
        d.series_id = Some("series-1".into());
        d.part = Some(2);
        d.links.repository = Some("https://github.com/example/repo".into());

        let props = to_properties(&d);
        assert_eq!(props["Focus Area"], json!({"select": {"name": "Machine Learning"}}));
        assert_eq!(
            props["Tags"],
            json!({"multi_select": [{"name": "rust"}, {"name": "async"}]})
        );
        assert_eq!(props["Series"], json!({"relation": [{"id": "series-1"}]}));
        assert_eq!(props["Part"], json!({"number": 2}));
        assert_eq!(
            props["Repository"],
            json!({"url": "https://github.com/example/repo"})
        );
        assert!(!props.contains_key("Demo"));
    }
}
