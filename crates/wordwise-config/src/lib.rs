use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::store::StoreConfig;
use self::study::StudyConfig;
use self::translator::TranslatorConfig;

pub mod dictionary;
pub mod store;
pub mod study;
pub mod translator;

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub study: StudyConfig,

    /// Used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Upper bound for a single collaborator call
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            dictionary: DictionaryConfig::default(),
            translator: TranslatorConfig::default(),
            study: StudyConfig::default(),
            log_filter: default_log_filter(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(path) = env::var("WORDWISE_STORE_PATH") {
            self.store.path = Some(path);
        }

        if let Ok(url) = env::var("DICTIONARY_API_URL") {
            self.dictionary.api_url = url;
        }

        if let Ok(lang) = env::var("TRANSLATE_TO") {
            self.translator.to_lang = lang;
        }

        if let Some(goal) = env::var("DAILY_GOAL").ok().and_then(|v| v.parse().ok()) {
            self.study.daily_goal = goal;
        }

        if let Some(timeout) = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }

        if let Ok(filter) = env::var("LOG_FILTER") {
            self.log_filter = filter;
        }
    }
}
