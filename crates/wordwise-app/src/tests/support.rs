use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use wordwise_dictionary::{DictionaryLookup, DictionaryMetadata, LookupError};
use wordwise_store::{Document, MemoryStore, Store, StoreError};
use wordwise_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};
use wordwise_types::{Difficulty, WordData};

use crate::clock::FixedClock;
use crate::session::Session;

pub fn word_data(word: &str, definition: &str, example: Option<&str>) -> WordData {
    WordData {
        word: word.to_string(),
        phonetic: format!("/{word}/"),
        audio_ref: None,
        part_of_speech: "noun".to_string(),
        definition: definition.to_string(),
        examples: example.map(|e| vec![e.to_string()]).unwrap_or_default(),
        meanings: vec![],
        synonyms: vec![],
        antonyms: vec![],
        source_ref: None,
        difficulty: Difficulty::Advanced,
        etymology: None,
    }
}

/// Canned dictionary; anything not registered is not found
pub struct StubDictionary {
    words: HashMap<String, WordData>,
    pub calls: AtomicUsize,
}

impl StubDictionary {
    pub fn new() -> Self {
        let mut words = HashMap::new();
        for (word, definition) in [
            ("alpha", "first letter"),
            ("beta", "second letter"),
            ("gamma", "third letter"),
            ("delta", "fourth letter"),
            ("epsilon", "fifth letter"),
            ("abstruse", "difficult to understand"),
        ] {
            words.insert(
                word.to_string(),
                word_data(word, definition, Some(&format!("The {word} came first."))),
            );
        }

        let mut serendipity = word_data("serendipity", "a happy accident", None);
        serendipity.etymology = Some("coined by Horace Walpole".to_string());
        words.insert("serendipity".to_string(), serendipity);

        // Headword comes back in its display form
        words.insert(
            "zeitgeist".to_string(),
            word_data("Zeitgeist", "the spirit of the times", None),
        );

        Self {
            words,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DictionaryLookup for StubDictionary {
    async fn lookup(&self, word: &str) -> Result<WordData, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent lookups interleave
        tokio::task::yield_now().await;
        self.words
            .get(word)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(word.to_string()))
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "stub".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Memory store whose writes can be switched to fail and reads to stall
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_writes: AtomicBool,
    pub slow_reads: AtomicBool,
}

#[async_trait]
impl Store for FlakyStore {
    async fn get(&self, keys: &[String]) -> Result<Document, StoreError> {
        if self.slow_reads.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.inner.get(keys).await
    }

    async fn set(&self, document: Document) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set(document).await
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.inner.keys(prefix).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.inner.clear().await
    }
}

/// Reverses the word, or fails every call
pub struct StubTranslator {
    pub fail: bool,
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.fail {
            return Err(TranslateError::Unavailable(text.to_string()));
        }
        Ok(Translation {
            text: text.chars().rev().collect(),
            from,
            to,
            provider: "stub".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "stub".to_string(),
            requires_api_key: false,
        }
    }
}

pub struct Fixture {
    pub session: Arc<Session>,
    pub store: Arc<FlakyStore>,
    pub dictionary: Arc<StubDictionary>,
    pub clock: Arc<FixedClock>,
}

/// Session over stubs at 2024-06-15 10:00 UTC with a seeded rng
pub fn fixture() -> Fixture {
    let store = Arc::new(FlakyStore::default());
    let dictionary = Arc::new(StubDictionary::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(),
    ));

    let session = Session::new(store.clone(), dictionary.clone())
        .with_clock(clock.clone())
        .with_seed(7);

    Fixture {
        session: Arc::new(session),
        store,
        dictionary,
        clock,
    }
}
