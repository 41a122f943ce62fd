use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Document, Store, StoreError};

/// Whole-document JSON file.
///
/// Every write serializes the full document to a sibling temp file and
/// renames it over the target. The in-memory image is only replaced after
/// the rename succeeds, so a failed write leaves both untouched.
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Document>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let data = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Document::new(),
            Ok(content) => match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => map,
                other => {
                    return Err(StoreError::Corrupt {
                        key: path.display().to_string(),
                        reason: format!("expected an object, found {}", type_name(&other)),
                    });
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Document::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Opened store {} ({} keys)", path.display(), data.len());

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, document: &Document) -> Result<(), StoreError> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".to_string());
        let tmp_path = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        let json = serde_json::to_vec_pretty(document)?;

        if let Err(e) = fs::write(&tmp_path, json).await {
            tracing::error!("Failed to write {}: {}", tmp_path.display(), e);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            tracing::error!("Failed to replace {}: {}", self.path.display(), e);
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn get(&self, keys: &[String]) -> Result<Document, StoreError> {
        let data = self.data.read().await;
        Ok(keys
            .iter()
            .filter_map(|k| data.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    async fn set(&self, document: Document) -> Result<(), StoreError> {
        let mut data = self.data.write().await;

        let mut next = data.clone();
        next.extend(document);

        self.persist(&next).await?;
        *data = next;
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let data = self.data.read().await;
        let mut keys: Vec<String> = data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let empty = Document::new();
        self.persist(&empty).await?;
        *data = empty;
        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("wordwise-store-{}", Uuid::new_v4()))
    }

    fn doc(key: &str, value: Value) -> Document {
        let mut doc = Document::new();
        doc.insert(key.to_string(), value);
        doc
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = scratch_dir();
        let path = dir.join("store.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set(doc("vocab:word", json!({ "word": "word" }))).await.unwrap();
        store.set(doc("progress", json!({ "totalLookups": 1 }))).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let got = reopened
            .get(&["vocab:word".to_string(), "progress".to_string()])
            .await
            .unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got["progress"], json!({ "totalLookups": 1 }));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_state() {
        let dir = scratch_dir();
        let path = dir.join("store.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set(doc("progress", json!({ "totalLookups": 1 }))).await.unwrap();

        // Removing the directory makes the temp file write fail
        std::fs::remove_dir_all(&dir).unwrap();

        let mut update = doc("progress", json!({ "totalLookups": 2 }));
        update.insert("vocab:new".to_string(), json!({}));
        assert!(store.set(update).await.is_err());

        let got = store
            .get(&["progress".to_string(), "vocab:new".to_string()])
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got["progress"], json!({ "totalLookups": 1 }));
    }

    #[tokio::test]
    async fn test_non_object_file_is_corrupt() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path).await,
            Err(StoreError::Corrupt { .. })
        ));

        let _ = std::fs::remove_dir_all(dir);
    }
}
