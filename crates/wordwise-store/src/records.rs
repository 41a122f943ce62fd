use serde::Serialize;
use serde::de::DeserializeOwned;
use wordwise_types::{LearnerProgress, VocabularyEntry};

use crate::{Document, Store, StoreError};

pub const ENTRY_PREFIX: &str = "vocab:";
pub const PROGRESS_KEY: &str = "progress";

pub fn entry_key(word: &str) -> String {
    format!("{}{}", ENTRY_PREFIX, word.to_lowercase())
}

/// Deserialize `key` out of a document read from a store
pub fn decode<T: DeserializeOwned>(document: &Document, key: &str) -> Result<Option<T>, StoreError> {
    match document.get(key) {
        None => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
    }
}

/// Serialize `value` into `document` under `key`
pub fn encode<T: Serialize>(
    document: &mut Document,
    key: impl Into<String>,
    value: &T,
) -> Result<(), StoreError> {
    document.insert(key.into(), serde_json::to_value(value)?);
    Ok(())
}

pub async fn load_entry(
    store: &dyn Store,
    word: &str,
) -> Result<Option<VocabularyEntry>, StoreError> {
    let key = entry_key(word);
    let document = store.get(std::slice::from_ref(&key)).await?;
    decode(&document, &key)
}

/// Progress record, or a fresh one on first use
pub async fn load_progress(store: &dyn Store) -> Result<LearnerProgress, StoreError> {
    let key = PROGRESS_KEY.to_string();
    let document = store.get(std::slice::from_ref(&key)).await?;
    Ok(decode(&document, &key)?.unwrap_or_default())
}

/// Every stored entry, ordered by key.
///
/// Records that fail to decode are logged and left out.
pub async fn load_entries(store: &dyn Store) -> Result<Vec<VocabularyEntry>, StoreError> {
    let keys = store.keys(ENTRY_PREFIX).await?;
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let document = store.get(&keys).await?;
    let mut entries = Vec::with_capacity(keys.len());
    for key in &keys {
        match decode::<VocabularyEntry>(&document, key) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping unreadable record: {e}"),
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn test_typed_round_trip_through_store() {
        let store = MemoryStore::new();

        let mut entry = VocabularyEntry::new("Serendipity", Utc::now());
        entry.lookup_count = 3;
        let progress = LearnerProgress {
            total_lookups: 3,
            ..Default::default()
        };

        let mut doc = Document::new();
        encode(&mut doc, entry_key(&entry.word), &entry).unwrap();
        encode(&mut doc, PROGRESS_KEY, &progress).unwrap();
        store.set(doc).await.unwrap();

        let loaded = load_entry(&store, "SERENDIPITY").await.unwrap().unwrap();
        assert_eq!(loaded.lookup_count, 3);
        assert_eq!(load_progress(&store).await.unwrap().total_lookups, 3);
        assert_eq!(load_entries(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_progress_defaults_and_bad_entry_is_corrupt() {
        let store = MemoryStore::new();
        assert_eq!(load_progress(&store).await.unwrap().total_lookups, 0);

        let mut doc = Document::new();
        doc.insert(entry_key("broken"), json!("not an entry"));
        store.set(doc).await.unwrap();

        assert!(matches!(
            load_entry(&store, "broken").await,
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreadable_entry_does_not_hide_the_rest() {
        let store = MemoryStore::new();

        let mut doc = Document::new();
        doc.insert(entry_key("broken"), json!({ "word": 42 }));
        encode(&mut doc, entry_key("intact"), &VocabularyEntry::new("intact", Utc::now())).unwrap();
        store.set(doc).await.unwrap();

        let entries = load_entries(&store).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "intact");
    }
}
