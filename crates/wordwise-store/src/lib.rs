mod file;
mod memory;
mod records;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use records::{
    ENTRY_PREFIX, PROGRESS_KEY, decode, encode, entry_key, load_entries, load_entry,
    load_progress,
};

use serde_json::{Map, Value};

/// A set of key -> JSON value pairs read from or written to a store
pub type Document = Map<String, Value>;

/// Durable string-keyed JSON storage.
///
/// Neither `get` nor `set` spans a transaction: callers that need
/// read-modify-write consistency serialize access themselves. A `set`
/// either applies every key of the document or none of them.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Values for the requested keys; absent keys are omitted
    async fn get(&self, keys: &[String]) -> Result<Document, StoreError>;

    /// Insert or replace every key in `document`
    async fn set(&self, document: Document) -> Result<(), StoreError>;

    /// All keys starting with `prefix`, sorted
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Remove everything
    async fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored value for \"{key}\" is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}
