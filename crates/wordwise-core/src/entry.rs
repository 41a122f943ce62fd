use chrono::{DateTime, Utc};
use wordwise_types::vocabulary::{
    DEFAULT_EASE, MAX_ANTONYMS, MAX_CONTEXTS, MAX_EXAMPLES, MAX_SYNONYMS,
};
use wordwise_types::{ContextSnippet, LookupContext, VocabularyEntry, WordData};

/// Captured sentences are cut to this many chars
pub const MAX_CONTEXT_CHARS: usize = 200;

/// Fold one successful lookup into the entry, creating it on first sight.
///
/// The content snapshot is taken on creation only; later lookups bump the
/// counters, fill a missing etymology and push the context sentence.
pub fn record_lookup(
    existing: Option<VocabularyEntry>,
    data: &WordData,
    context: Option<&LookupContext>,
    now: DateTime<Utc>,
) -> VocabularyEntry {
    let mut entry = match existing {
        Some(mut entry) => {
            if !entry.has_etymology() && data.etymology.is_some() {
                entry.etymology = data.etymology.clone();
            }
            entry
        }
        None => snapshot(data, now),
    };

    entry.lookup_count = entry.lookup_count.saturating_add(1);
    entry.last_seen = now;

    if let Some(snippet) = context.and_then(|ctx| capture_context(ctx, now)) {
        entry.contexts.insert(0, snippet);
        entry.contexts.truncate(MAX_CONTEXTS);
    }

    entry
}

/// Clear the learned flag and scheduler state so the entry is scheduled again
pub fn reset_schedule(entry: &VocabularyEntry) -> VocabularyEntry {
    VocabularyEntry {
        learned: false,
        ease: DEFAULT_EASE,
        interval_minutes: 0,
        next_due_at: None,
        ..entry.clone()
    }
}

fn snapshot(data: &WordData, now: DateTime<Utc>) -> VocabularyEntry {
    let mut entry = VocabularyEntry::new(data.word.clone(), now);
    entry.phonetic = data.phonetic.clone();
    entry.part_of_speech = data.part_of_speech.clone();
    entry.definition = data.definition.clone();
    entry.examples = data.examples.iter().take(MAX_EXAMPLES).cloned().collect();
    entry.synonyms = data.synonyms.iter().take(MAX_SYNONYMS).cloned().collect();
    entry.antonyms = data.antonyms.iter().take(MAX_ANTONYMS).cloned().collect();
    entry.etymology = data.etymology.clone().filter(|e| !e.trim().is_empty());
    entry.difficulty = data.difficulty;
    entry.audio_ref = data.audio_ref.clone();
    entry.source_ref = data.source_ref.clone();
    entry
}

fn capture_context(ctx: &LookupContext, now: DateTime<Utc>) -> Option<ContextSnippet> {
    let sentence = ctx.sentence.trim();
    if sentence.is_empty() {
        return None;
    }

    let sentence = if sentence.chars().count() > MAX_CONTEXT_CHARS {
        let cut: String = sentence.chars().take(MAX_CONTEXT_CHARS).collect();
        format!("{cut}...")
    } else {
        sentence.to_string()
    };

    Some(ContextSnippet {
        sentence,
        source_url: ctx.source_url.clone(),
        captured_at: now,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use wordwise_types::Difficulty;

    use super::*;

    fn word_data() -> WordData {
        WordData {
            word: "Laconic".to_string(),
            phonetic: "/ləˈkɒnɪk/".to_string(),
            audio_ref: None,
            part_of_speech: "adjective".to_string(),
            definition: "Using very few words.".to_string(),
            examples: vec!["a laconic reply".to_string()],
            meanings: vec![],
            synonyms: vec!["terse".to_string(), "brief".to_string()],
            antonyms: vec![],
            source_ref: None,
            difficulty: Difficulty::Advanced,
            etymology: None,
        }
    }

    fn ctx(sentence: &str) -> LookupContext {
        LookupContext {
            sentence: sentence.to_string(),
            source_url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn test_first_lookup_creates_entry() {
        let now = Utc::now();
        let entry = record_lookup(None, &word_data(), None, now);

        assert_eq!(entry.word, "Laconic");
        assert_eq!(entry.lookup_count, 1);
        assert_eq!(entry.first_seen, now);
        assert_eq!(entry.definition, "Using very few words.");
        assert!(entry.contexts.is_empty());
        assert!(!entry.has_been_reviewed());
    }

    #[test]
    fn test_repeat_lookup_keeps_first_seen_and_fills_etymology() {
        let start = Utc::now();
        let entry = record_lookup(None, &word_data(), None, start);

        let mut data = word_data();
        data.etymology = Some("From Greek Lakōnikos".to_string());
        let later = start + Duration::hours(3);
        let entry = record_lookup(Some(entry), &data, None, later);

        assert_eq!(entry.lookup_count, 2);
        assert_eq!(entry.first_seen, start);
        assert_eq!(entry.last_seen, later);
        assert_eq!(entry.etymology.as_deref(), Some("From Greek Lakōnikos"));
    }

    #[test]
    fn test_contexts_are_capped_most_recent_first() {
        let now = Utc::now();
        let mut entry = None;
        for i in 0..5 {
            let sentence = format!("sentence {i}");
            entry = Some(record_lookup(entry, &word_data(), Some(&ctx(&sentence)), now));
        }
        let entry = entry.unwrap();

        assert_eq!(entry.contexts.len(), MAX_CONTEXTS);
        assert_eq!(entry.contexts[0].sentence, "sentence 4");
        assert_eq!(entry.contexts[2].sentence, "sentence 2");
    }

    #[test]
    fn test_long_context_is_truncated_and_blank_ignored() {
        let now = Utc::now();
        let long = "x".repeat(MAX_CONTEXT_CHARS + 40);
        let entry = record_lookup(None, &word_data(), Some(&ctx(&long)), now);
        assert_eq!(entry.contexts[0].sentence.chars().count(), MAX_CONTEXT_CHARS + 3);
        assert!(entry.contexts[0].sentence.ends_with("..."));

        let entry = record_lookup(Some(entry), &word_data(), Some(&ctx("   ")), now);
        assert_eq!(entry.contexts.len(), 1);
    }

    #[test]
    fn test_reset_schedule_readmits_learned_entry() {
        let mut entry = record_lookup(None, &word_data(), None, Utc::now());
        entry.learned = true;
        entry.ease = 1.9;
        entry.interval_minutes = 120;
        entry.next_due_at = Some(Utc::now());

        let reset = reset_schedule(&entry);
        assert!(!reset.learned);
        assert_eq!(reset.ease, DEFAULT_EASE);
        assert_eq!(reset.interval_minutes, 0);
        assert!(reset.next_due_at.is_none());
        assert_eq!(reset.lookup_count, entry.lookup_count);
    }
}
