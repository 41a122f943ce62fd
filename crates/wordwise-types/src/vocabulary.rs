use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Starting ease of a fresh entry
pub const DEFAULT_EASE: f64 = 2.5;
/// Ease never drops below this
pub const MIN_EASE: f64 = 1.3;

pub const MAX_EXAMPLES: usize = 2;
pub const MAX_SYNONYMS: usize = 5;
pub const MAX_ANTONYMS: usize = 3;
pub const MAX_CONTEXTS: usize = 3;

fn default_ease() -> f64 {
    DEFAULT_EASE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Common,
    Intermediate,
    #[default]
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Common => "common",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentence the word was captured in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnippet {
    pub sentence: String,
    pub source_url: String,
    pub captured_at: DateTime<Utc>,
}

/// Context supplied alongside a lookup request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupContext {
    pub sentence: String,
    #[serde(default)]
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeaningDefinition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<MeaningDefinition>,
}

/// Result of a successful dictionary lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordData {
    pub word: String,
    pub phonetic: String,
    pub audio_ref: Option<String>,
    pub part_of_speech: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub meanings: Vec<Meaning>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub source_ref: Option<String>,
    pub difficulty: Difficulty,
    pub etymology: Option<String>,
}

/// The canonical record of one known word.
///
/// Stored under its lowercase key. Scheduler fields follow the SM-2 variant:
/// `ease` stays at or above [`MIN_EASE`], `interval_minutes` is the gap until
/// the next review and `next_due_at == None` means the entry is due now and has
/// never been reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    pub lookup_count: u32,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,

    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub etymology: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub audio_ref: Option<String>,
    #[serde(default)]
    pub source_ref: Option<String>,

    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub learned: bool,
    #[serde(default)]
    pub quiz_correct_count: u32,

    #[serde(default = "default_ease")]
    pub ease: f64,
    #[serde(default)]
    pub interval_minutes: u32,
    #[serde(default)]
    pub next_due_at: Option<DateTime<Utc>>,

    /// Most recent first
    #[serde(default)]
    pub contexts: Vec<ContextSnippet>,
}

impl VocabularyEntry {
    /// Fresh entry for a word seen for the first time
    pub fn new(word: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            lookup_count: 0,
            first_seen: now,
            last_seen: now,
            phonetic: String::new(),
            part_of_speech: String::new(),
            definition: String::new(),
            examples: Vec::new(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            etymology: None,
            difficulty: Difficulty::default(),
            audio_ref: None,
            source_ref: None,
            favorite: false,
            learned: false,
            quiz_correct_count: 0,
            ease: DEFAULT_EASE,
            interval_minutes: 0,
            next_due_at: None,
            contexts: Vec::new(),
        }
    }

    /// Lowercase storage key
    pub fn key(&self) -> String {
        self.word.to_lowercase()
    }

    /// Whether the scheduler has graded this entry at least once
    pub fn has_been_reviewed(&self) -> bool {
        self.next_due_at.is_some()
    }

    pub fn has_etymology(&self) -> bool {
        self.etymology.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

/// Row of the recent-lookups list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub word: String,
    pub phonetic: String,
    pub part_of_speech: String,
    pub definition: String,
    pub difficulty: Difficulty,
    pub lookup_count: u32,
    pub favorite: bool,
    pub mastery: u8,
    pub last_seen: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scheduler_fields_take_defaults() {
        let json = r#"{
            "word": "Serendipity",
            "lookupCount": 3,
            "firstSeen": "2024-01-01T00:00:00Z",
            "lastSeen": "2024-01-02T00:00:00Z"
        }"#;

        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.ease, DEFAULT_EASE);
        assert_eq!(entry.interval_minutes, 0);
        assert!(entry.next_due_at.is_none());
        assert_eq!(entry.difficulty, Difficulty::Advanced);
        assert_eq!(entry.key(), "serendipity");
    }

    #[test]
    fn test_blank_etymology_does_not_count() {
        let mut entry = VocabularyEntry::new("word", Utc::now());
        entry.etymology = Some("  ".to_string());
        assert!(!entry.has_etymology());
        entry.etymology = Some("Old English".to_string());
        assert!(entry.has_etymology());
    }
}
