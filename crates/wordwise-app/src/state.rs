use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;
use wordwise_config::Config;
use wordwise_dictionary::{
    CachedDictionary, DictionaryLookup, DictionaryMetadata, FreeDictionary, LookupError,
};
use wordwise_store::{JsonFileStore, MemoryStore, Store};
use wordwise_translator::MyMemoryTranslator;
use wordwise_types::WordData;

use crate::profile;
use crate::session::{Session, SessionSettings};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: Arc<Session>,
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: Arc::new(session),
        }
    }

    /// Wire the store and HTTP collaborators described by `config`
    pub async fn from_config(config: Config, in_memory: bool) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let store: Arc<dyn Store> = if in_memory {
            tracing::info!("Using in-memory store");
            Arc::new(MemoryStore::new())
        } else {
            let path = config
                .store
                .path
                .clone()
                .map(Into::into)
                .unwrap_or_else(profile::default_store_path);
            let store = JsonFileStore::open(&path)
                .await
                .with_context(|| format!("failed to open store {}", path.display()))?;
            Arc::new(store)
        };

        let dictionary: Arc<dyn DictionaryLookup> = if config.dictionary.enabled {
            let client = FreeDictionary::new(config.dictionary.api_url.clone(), timeout)?;
            Arc::new(CachedDictionary::new(client, config.dictionary.cache_capacity))
        } else {
            tracing::warn!("Dictionary disabled, lookups will find nothing");
            Arc::new(DisabledDictionary)
        };

        let mut session =
            Session::new(store, dictionary).with_settings(SessionSettings::from(&config));

        if config.translator.enabled {
            let translator = MyMemoryTranslator::new(config.translator.api_url.clone(), timeout)?;
            session = session.with_translator(Arc::new(translator));
        }

        Ok(Self::new(config, session))
    }
}

struct DisabledDictionary;

#[async_trait]
impl DictionaryLookup for DisabledDictionary {
    async fn lookup(&self, word: &str) -> Result<WordData, LookupError> {
        Err(LookupError::NotFound(word.to_string()))
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "disabled".to_string(),
            language: String::new(),
        }
    }
}
