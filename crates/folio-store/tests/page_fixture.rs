//! Extract every property kind from a realistic page payload.

use folio_store::RawRecord;
use folio_store::extract;
use folio_store::property::preferred_file_url;
use pretty_assertions::assert_eq;

const FIXTURE: &str = r#"{
    "object": "page",
    "id": "8a1f6b0e-post",
    "created_time": "2024-03-01T09:00:00.000Z",
    "last_edited_time": "2024-03-06T12:30:00.000Z",
    "archived": false,
    "cover": {"type": "external", "external": {"url": "https://images.example.com/cover.jpg"}},
    "properties": {
        "Name": {"id": "title", "type": "title", "title": [
            {"type": "text", "plain_text": "Async ", "href": null},
            {"type": "text", "plain_text": "Rust", "href": null}
        ]},
        "Slug": {"id": "a1", "type": "rich_text", "rich_text": [{"plain_text": "async-rust"}]},
        "Type": {"id": "a2", "type": "select", "select": {"id": "x", "name": "Tutorial", "color": "blue"}},
        "Status": {"id": "a3", "type": "status", "status": {"name": "Published", "color": "green"}},
        "Tags": {"id": "a4", "type": "multi_select", "multi_select": [
            {"name": "rust", "color": "orange"}, {"name": "tokio", "color": "purple"}
        ]},
        "Published": {"id": "a5", "type": "date", "date": {"start": "2024-03-05", "end": null, "time_zone": null}},
        "Read Time": {"id": "a6", "type": "number", "number": 12},
        "Featured": {"id": "a7", "type": "checkbox", "checkbox": true},
        "Series": {"id": "a8", "type": "relation", "relation": [{"id": "series-1"}], "has_more": false},
        "Post Count": {"id": "a9", "type": "rollup", "rollup": {"type": "number", "number": 4, "function": "count"}},
        "Cover": {"id": "b1", "type": "files", "files": [
            {"name": "cover.png", "type": "file", "file": {"url": "https://s3.example.com/cover.png", "expiry_time": "2024-03-06T13:30:00.000Z"}}
        ]},
        "Repository": {"id": "b2", "type": "url", "url": "https://github.com/example/async-rust"},
        "Score": {"id": "b3", "type": "formula", "formula": {"type": "number", "number": 3}}
    }
}"#;

fn record() -> RawRecord {
    serde_json::from_str(FIXTURE).expect("fixture parses")
}

#[test]
fn extracts_all_supported_kinds() {
    let page = record();

    assert_eq!(extract::title(page.property("Name")), "Async Rust");
    assert_eq!(extract::rich_text(page.property("Slug")), "async-rust");
    assert_eq!(
        extract::select(page.property("Type")).map(|o| o.name),
        Some("Tutorial".to_string())
    );
    assert_eq!(
        extract::status(page.property("Status")).map(|o| o.name),
        Some("Published".to_string())
    );
    assert_eq!(extract::multi_select(page.property("Tags")).len(), 2);
    assert_eq!(
        extract::date(page.property("Published")).map(|d| d.start),
        Some("2024-03-05".to_string())
    );
    assert_eq!(extract::number(page.property("Read Time")), Some(12.0));
    assert!(extract::checkbox(page.property("Featured")));
    assert_eq!(extract::relation(page.property("Series")), vec!["series-1"]);
    assert_eq!(extract::rollup_count(page.property("Post Count")), Some(4.0));
    assert_eq!(
        preferred_file_url(&extract::files(page.property("Cover"))),
        Some("https://s3.example.com/cover.png")
    );
    assert_eq!(
        extract::url(page.property("Repository")).as_deref(),
        Some("https://github.com/example/async-rust")
    );
}

#[test]
fn unsupported_kind_extracts_as_empty() {
    let page = record();
    assert_eq!(extract::number(page.property("Score")), None);
    assert!(extract::guard(
        page.property("Score"),
        folio_store::PropertyKind::Number
    )
    .is_err());
}

#[test]
fn page_level_fields() {
    let page = record();
    assert_eq!(page.id, "8a1f6b0e-post");
    assert_eq!(
        page.cover.as_ref().map(folio_store::property::FileObject::url),
        Some("https://images.example.com/cover.jpg")
    );
}
