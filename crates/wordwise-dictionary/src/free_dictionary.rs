use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use wordwise_types::vocabulary::{MAX_ANTONYMS, MAX_EXAMPLES, MAX_SYNONYMS};
use wordwise_types::{Meaning, MeaningDefinition, WordData};

use crate::difficulty::WordFrequency;
use crate::{DictionaryLookup, DictionaryMetadata, LookupError};

const NO_DEFINITION: &str = "No definition available.";

// JSON structures of the free dictionary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEntry {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
    #[serde(default)]
    source_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeaning {
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

/// Client for dictionaryapi.dev style endpoints
#[derive(Clone)]
pub struct FreeDictionary {
    client: reqwest::Client,
    api_url: String,
    frequency: WordFrequency,
}

impl FreeDictionary {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url,
            frequency: WordFrequency::with_defaults(),
        })
    }

    fn entry_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|e| LookupError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .push(word);

        Ok(url)
    }
}

#[async_trait]
impl DictionaryLookup for FreeDictionary {
    async fn lookup(&self, word: &str) -> Result<WordData, LookupError> {
        let url = self.entry_url(word)?;
        tracing::debug!("Dictionary request: {}", url);

        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(word.to_string()));
        }

        if !response.status().is_success() {
            return Err(LookupError::ServiceUnavailable(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body, word, &self.frequency)
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "Free Dictionary API".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Turn an API response body into [`WordData`], using the first entry
pub fn parse_response(
    body: &str,
    word: &str,
    frequency: &WordFrequency,
) -> Result<WordData, LookupError> {
    let entries: Vec<ApiEntry> =
        serde_json::from_str(body).map_err(|e| LookupError::ParseError(e.to_string()))?;

    let entry = entries
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NotFound(word.to_string()))?;

    // Prefer a phonetic that carries audio
    let mut phonetic = entry.phonetic.clone().unwrap_or_default();
    let mut audio_ref = None;
    if let Some(with_audio) = entry
        .phonetics
        .iter()
        .find(|p| p.audio.as_deref().is_some_and(|a| !a.is_empty()))
    {
        if let Some(text) = with_audio.text.as_deref().filter(|t| !t.is_empty()) {
            phonetic = text.to_string();
        }
        audio_ref = with_audio.audio.clone();
    } else if let Some(text) = entry
        .phonetics
        .first()
        .and_then(|p| p.text.as_deref())
        .filter(|t| !t.is_empty())
    {
        phonetic = text.to_string();
    }

    let mut meanings = Vec::new();
    let mut examples = Vec::new();
    let mut synonyms: Vec<String> = Vec::new();
    let mut antonyms: Vec<String> = Vec::new();

    for meaning in &entry.meanings {
        let mut definitions = Vec::new();
        for def in &meaning.definitions {
            let example = def.example.clone().filter(|e| !e.is_empty());
            if let Some(example) = &example {
                examples.push(example.clone());
            }
            definitions.push(MeaningDefinition {
                definition: def.definition.clone().unwrap_or_default(),
                example,
            });
        }

        push_unique(&mut synonyms, &meaning.synonyms);
        push_unique(&mut antonyms, &meaning.antonyms);
        for def in &meaning.definitions {
            push_unique(&mut synonyms, &def.synonyms);
            push_unique(&mut antonyms, &def.antonyms);
        }

        meanings.push(Meaning {
            part_of_speech: meaning.part_of_speech.clone().unwrap_or_default(),
            definitions,
        });
    }

    let (part_of_speech, definition) = match meanings.first() {
        Some(primary) => (
            primary.part_of_speech.clone(),
            primary
                .definitions
                .first()
                .map(|d| d.definition.clone())
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DEFINITION.to_string()),
        ),
        None => (String::new(), NO_DEFINITION.to_string()),
    };

    let display = entry.word.clone().unwrap_or_else(|| word.to_string());
    examples.truncate(MAX_EXAMPLES);
    synonyms.truncate(MAX_SYNONYMS);
    antonyms.truncate(MAX_ANTONYMS);

    Ok(WordData {
        difficulty: frequency.classify(&display),
        word: display,
        phonetic,
        audio_ref,
        part_of_speech,
        definition,
        examples,
        meanings,
        synonyms,
        antonyms,
        source_ref: entry.source_urls.into_iter().next(),
        etymology: entry.origin.filter(|o| !o.trim().is_empty()),
    })
}

fn push_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}
