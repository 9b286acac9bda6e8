//! In-memory record store.

use super::source::{RecordSource, RecordStream};
use super::types::{Record, RecordError};
use super::updater::RecordUpdater;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A stored row: either a decodable record or a malformed entry.
#[derive(Debug, Clone)]
enum Entry {
    Record(Record),
    Malformed(String),
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<Entry>,
    updates: HashMap<String, usize>,
}

/// Record store held in memory.
///
/// Implements both [`RecordSource`] and [`RecordUpdater`] with the same
/// semantics as the MongoDB store: pending means an empty result list, and
/// an update replaces only the result list of the matching record. Clones
/// share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&self, record: Record) {
        self.lock().entries.push(Entry::Record(record));
    }

    /// Inserts a row that fails to decode when enumerated.
    pub fn insert_malformed(&self, reason: impl Into<String>) {
        self.lock().entries.push(Entry::Malformed(reason.into()));
    }

    /// Returns the record with the given id, if present.
    pub fn get(&self, id: &str) -> Option<Record> {
        self.lock().entries.iter().find_map(|entry| match entry {
            Entry::Record(record) if record.id == id => Some(record.clone()),
            _ => None,
        })
    }

    /// Returns all decodable records in insertion order.
    pub fn records(&self) -> Vec<Record> {
        self.lock()
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Record(record) => Some(record.clone()),
                Entry::Malformed(_) => None,
            })
            .collect()
    }

    /// Number of successful updates applied to a record.
    pub fn update_count(&self, id: &str) -> usize {
        self.lock().updates.get(id).copied().unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave `Inner` half-written.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordSource for InMemoryRecordStore {
    async fn pending_records(&self, limit: u64) -> Result<RecordStream, RecordError> {
        let items: Vec<Result<Record, RecordError>> = self
            .lock()
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Record(record) if record.result_references.is_empty() => {
                    Some(Ok(record.clone()))
                }
                Entry::Record(_) => None,
                Entry::Malformed(reason) => Some(Err(RecordError::Decode(reason.clone()))),
            })
            .take(limit as usize)
            .collect();

        Ok(stream::iter(items).boxed())
    }
}

impl RecordUpdater for InMemoryRecordStore {
    async fn apply(&self, record_id: &str, result_urls: &[String]) -> Result<(), RecordError> {
        if record_id.trim().is_empty() {
            return Err(RecordError::InvalidId {
                id: record_id.to_string(),
                reason: "empty identifier".to_string(),
            });
        }

        let mut inner = self.lock();
        let record = inner
            .entries
            .iter_mut()
            .find_map(|entry| match entry {
                Entry::Record(record) if record.id == record_id => Some(record),
                _ => None,
            })
            .ok_or_else(|| RecordError::NotFound(record_id.to_string()))?;

        record.result_references = result_urls.to_vec();
        *inner.updates.entry(record_id.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_pending_records_enumerated() {
        let store = InMemoryRecordStore::with_records([
            Record::pending("a", "u1"),
            Record {
                id: "b".to_string(),
                source_reference: "u2".to_string(),
                result_references: vec!["https://done".to_string()],
            },
        ]);
        store.insert_malformed("bad row");

        let items: Vec<_> = store.pending_records(10).await.unwrap().collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().id, "a");
        assert!(matches!(items[1], Err(RecordError::Decode(_))));
    }

    #[tokio::test]
    async fn test_apply_sets_result_field_only() {
        let store = InMemoryRecordStore::with_records([Record::pending("a", "u1")]);
        store
            .apply("a", &["https://x/images/1".to_string()])
            .await
            .unwrap();

        let record = store.get("a").unwrap();
        assert_eq!(record.source_reference, "u1");
        assert_eq!(record.result_references, vec!["https://x/images/1"]);
        assert_eq!(store.update_count("a"), 1);
    }

    #[tokio::test]
    async fn test_apply_unknown_record() {
        let store = InMemoryRecordStore::new();
        assert_eq!(
            store.apply("zzz", &[]).await,
            Err(RecordError::NotFound("zzz".to_string()))
        );
    }

    #[tokio::test]
    async fn test_apply_empty_id() {
        let store = InMemoryRecordStore::new();
        assert!(matches!(
            store.apply("", &[]).await,
            Err(RecordError::InvalidId { .. })
        ));
    }
}
