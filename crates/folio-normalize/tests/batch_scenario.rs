//! Batch normalization over realistic post records.

use folio_core::errors::RecordError;
use folio_normalize::{Assembler, AssetResolver, normalize_batch};
use folio_store::RawRecord;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn post(id: &str, title: Option<&str>) -> RawRecord {
    let mut properties = json!({
        "Slug": {"type": "rich_text", "rich_text": [{"plain_text": id}]},
        "Published": {"type": "date", "date": {"start": "2024-04-02T23:30:00-05:00"}},
        "Type": {"type": "select", "select": {"name": "Tutorial"}},
        "Tags": {"type": "multi_select", "multi_select": [{"name": "rust", "color": "orange"}]}
    });
    if let Some(title) = title {
        properties["Name"] = json!({"type": "title", "title": [{"plain_text": title}]});
    }
    serde_json::from_value::<RawRecord>(json!({"id": id, "properties": properties})).unwrap()
}

fn assembler() -> Assembler {
    Assembler::new(AssetResolver::new("/images/covers", None))
}

#[test]
fn record_missing_title_is_the_only_failure() {
    let records = vec![post("rec-1", Some("One")), post("rec-2", None), post("rec-3", Some("Three"))];
    let assembler = assembler();

    let batch = normalize_batch("post", &records, |r| assembler.post(r));

    let ids: Vec<&str> = batch.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["rec-1", "rec-3"]);
    assert_eq!(batch.failure_count(), 1);
    assert_eq!(batch.failures[0].record_id, "rec-2");
    assert_eq!(
        batch.failures[0].error,
        RecordError::PropertyMissing {
            record_id: "rec-2".into(),
            property: "Name".into()
        }
    );
}

#[test]
fn assembled_posts_carry_utc_dates_and_defaults() {
    let assembler = assembler();
    let batch = normalize_batch("post", &[post("rec-1", Some("One"))], |r| assembler.post(r));
    let post = &batch.items[0];

    // 23:30 at UTC-5 is already the next day in UTC.
    assert_eq!(post.date, "April 3, 2024");
    assert_eq!(post.read_time_minutes, 5);
    assert!(!post.featured);
    assert_eq!(post.cover_url, None);
    assert_eq!(post.tags[0].name, "rust");
}

#[test]
fn unreadable_optional_fields_do_not_reject() {
    let mut raw: Value = json!({
        "id": "rec-9",
        "properties": {
            "Name": {"type": "title", "title": [{"plain_text": "Nine"}]},
            "Slug": {"type": "rich_text", "rich_text": [{"plain_text": "nine"}]},
            "Published": {"type": "date", "date": {"start": "2024-01-01"}},
            "Type": {"type": "select", "select": {"name": "Note"}}
        }
    });
    raw["properties"]["Tags"] = json!({"type": "multi_select", "multi_select": "oops"});
    raw["properties"]["Read Time"] = json!({"type": "url", "url": "https://x"});
    raw["properties"]["Description"] = json!({"type": "rich_text", "rich_text": []});
    let record: RawRecord = serde_json::from_value(raw).unwrap();

    let assembler = assembler();
    let batch = normalize_batch("post", &[record], |r| assembler.post(r));
    assert_eq!(batch.failure_count(), 0);
    let post = &batch.items[0];
    assert!(post.tags.is_empty());
    assert_eq!(post.read_time_minutes, 5);
    assert_eq!(post.description, "");
}
