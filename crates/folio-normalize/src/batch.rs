//! Partial-failure isolation across a list of raw records.

use folio_core::errors::RecordError;
use folio_store::RawRecord;

/// A record that was skipped during batch normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub record_id: String,
    pub error: RecordError,
}

/// Assembled entities in input order, plus the records that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub failures: Vec<ParseFailure>,
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> Batch<T> {
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Assemble every record, skipping the ones that fail.
///
/// Relative order of the successful records is preserved. A failing record
/// is logged with `outcome = "skip"` and recorded in [`Batch::failures`]; it
/// never aborts the batch.
pub fn normalize_batch<T, F>(entity: &'static str, records: &[RawRecord], mut assemble: F) -> Batch<T>
where
    F: FnMut(&RawRecord) -> Result<T, RecordError>,
{
    let mut batch = Batch {
        items: Vec::with_capacity(records.len()),
        failures: Vec::new(),
    };

    for record in records {
        match assemble(record) {
            Ok(item) => batch.items.push(item),
            Err(error) => {
                tracing::warn!(
                    entity,
                    record_id = %record.id,
                    property = error.property().unwrap_or(""),
                    kind = error.kind(),
                    outcome = "skip",
                    %error,
                    "skipping record that failed to assemble"
                );
                batch.failures.push(ParseFailure {
                    record_id: record.id.clone(),
                    error,
                });
            }
        }
    }

    if batch.failures.is_empty() {
        tracing::debug!(entity, assembled = batch.items.len(), "batch normalized");
    } else {
        tracing::warn!(
            entity,
            assembled = batch.items.len(),
            skipped = batch.failures.len(),
            "batch normalized with skipped records"
        );
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn records(ids: &[&str]) -> Vec<RawRecord> {
        ids.iter()
            .map(|id| serde_json::from_value(json!({"id": id})).unwrap())
            .collect()
    }

    fn fail_on(bad: &'static [&'static str]) -> impl FnMut(&RawRecord) -> Result<String, RecordError> {
        move |record| {
            if bad.contains(&record.id.as_str()) {
                Err(RecordError::Validation {
                    record_id: record.id.clone(),
                    message: "bad".into(),
                })
            } else {
                Ok(record.id.clone())
            }
        }
    }

    #[test]
    fn empty_input_is_empty_batch() {
        let batch = normalize_batch("post", &[], fail_on(&[]));
        assert_eq!(batch, Batch::<String>::default());
        assert_eq!(batch.failure_count(), 0);
    }

    #[test]
    fn keeps_order_and_counts_failures() {
        let input = records(&["a", "b", "c", "d", "e"]);
        let batch = normalize_batch("post", &input, fail_on(&["b", "d"]));
        assert_eq!(batch.items, vec!["a", "c", "e"]);
        assert_eq!(batch.failure_count(), 2);
        let failed: Vec<&str> = batch.failures.iter().map(|f| f.record_id.as_str()).collect();
        assert_eq!(failed, vec!["b", "d"]);
    }

    #[test]
    fn no_failures_when_all_assemble() {
        let input = records(&["a", "b"]);
        let batch = normalize_batch("series", &input, fail_on(&[]));
        assert_eq!(batch.items.len(), 2);
        assert_eq!(batch.failure_count(), 0);
    }

    #[test]
    fn all_failing_is_still_a_batch() {
        let input = records(&["a"]);
        let batch = normalize_batch("series", &input, fail_on(&["a"]));
        assert!(batch.items.is_empty());
        assert_eq!(batch.failure_count(), 1);
    }
}
