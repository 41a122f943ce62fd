use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use wordwise_types::WordData;

use crate::{DictionaryLookup, DictionaryMetadata, LookupError};

/// Fixed-capacity map that evicts the oldest insertion first
pub struct BoundedCache<V> {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, V>,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keeps recent successful lookups in memory in front of another dictionary
pub struct CachedDictionary<D> {
    inner: D,
    cache: Mutex<BoundedCache<WordData>>,
}

impl<D: DictionaryLookup> CachedDictionary<D> {
    pub fn new(inner: D, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(BoundedCache::new(capacity)),
        }
    }

    fn cached(&self, word: &str) -> Option<WordData> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(word)
    }
}

#[async_trait]
impl<D: DictionaryLookup> DictionaryLookup for CachedDictionary<D> {
    async fn lookup(&self, word: &str) -> Result<WordData, LookupError> {
        if let Some(hit) = self.cached(word) {
            tracing::debug!("Dictionary cache hit: {}", word);
            return Ok(hit);
        }

        let data = self.inner.lookup(word).await?;

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(word.to_string(), data.clone());

        Ok(data)
    }

    fn metadata(&self) -> DictionaryMetadata {
        self.inner.metadata()
    }
}
