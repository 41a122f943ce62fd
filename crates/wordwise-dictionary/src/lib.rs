mod cache;
mod difficulty;
mod free_dictionary;

pub use cache::{BoundedCache, CachedDictionary};
pub use difficulty::WordFrequency;
pub use free_dictionary::{FreeDictionary, parse_response};

use wordwise_types::WordData;

/// Word -> definition service
#[async_trait::async_trait]
pub trait DictionaryLookup: Send + Sync {
    /// Look up a normalized (lowercase) word
    async fn lookup(&self, word: &str) -> Result<WordData, LookupError>;

    /// Provider metadata
    fn metadata(&self) -> DictionaryMetadata;
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub language: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("No definition found for \"{0}\".")]
    NotFound(String),

    #[error("Dictionary service is temporarily unavailable (HTTP {0}).")]
    ServiceUnavailable(u16),

    #[error("Network error. Please check your connection.")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unexpected dictionary response: {0}")]
    ParseError(String),

    #[error("Invalid dictionary URL: {0}")]
    InvalidUrl(String),
}
