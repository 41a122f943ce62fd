use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Document, Store, StoreError};

/// Volatile store, used for tests and `--memory` runs
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            data: RwLock::new(document),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, keys: &[String]) -> Result<Document, StoreError> {
        let data = self.data.read().await;
        Ok(keys
            .iter()
            .filter_map(|k| data.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    async fn set(&self, document: Document) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.extend(document);
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
        self.data.write().await.clear();
        Ok(())
    }
}
