use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{OwnedMutexGuard, RwLockReadGuard};
use wordwise_config::Config;
use wordwise_core::preprocess::normalize_word;
use wordwise_core::progression::{self, EventKind};
use wordwise_core::{CoreError, badges, entry, mastery, quiz, scheduler, strength, word_of_day};
use wordwise_dictionary::{DictionaryLookup, LookupError};
use wordwise_store::{
    Document, ENTRY_PREFIX, PROGRESS_KEY, Store, StoreError, decode, encode, entry_key,
    load_entries, load_entry, load_progress,
};
use wordwise_translator::{TranslateError, Translator};
use wordwise_types::{
    DailyGoal, ExperienceAward, Grade, HistoryItem, LearnerProgress, LookupContext, LookupOutcome,
    ProgressSnapshot, Question, QuizTotals, QuizType, ReviewCard, VocabularyEntry,
    VocabularyStrength, WordData,
};

use crate::clock::{Clock, SystemClock};
use crate::export;
use crate::locks::KeyLocks;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Could not save your progress. {0}")]
    Store(#[from] StoreError),

    #[error("Translation failed. {0}")]
    Translate(#[from] TranslateError),

    #[error("Translation is disabled.")]
    TranslationDisabled,

    #[error("\"{0}\" is not in your vocabulary yet.")]
    UnknownWord(String),

    #[error("\"{0}\" is already learned. Reset it to review it again.")]
    AlreadyLearned(String),

    #[error("Export failed: {0}")]
    Export(#[from] csv::Error),
}

impl SessionError {
    /// Nothing eligible to study or quiz; an empty state rather than a failure
    pub fn is_empty_pool(&self) -> bool {
        matches!(
            self,
            SessionError::Core(CoreError::EmptyPool | CoreError::InsufficientPool { .. })
        )
    }
}

type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub daily_goal: u32,
    pub history_limit: usize,
    pub from_lang: String,
    pub to_lang: String,
    pub translate_on_lookup: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            daily_goal: config.study.daily_goal,
            history_limit: config.study.history_limit,
            from_lang: config.translator.from_lang.clone(),
            to_lang: config.translator.to_lang.clone(),
            translate_on_lookup: config.translator.translates_on_lookup(),
        }
    }
}

/// Coordinates the engine against the store and the lookup collaborators.
///
/// Every mutation reads the records it touches, applies the pure transition
/// and writes the result back in one `Store::set`. Per-key locks serialize
/// those sequences: the entry key is always taken before `progress`. A full
/// reset excludes all of them at once.
pub struct Session {
    store: Arc<dyn Store>,
    dictionary: Arc<dyn DictionaryLookup>,
    translator: Option<Arc<dyn Translator>>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
    locks: KeyLocks,
    settings: SessionSettings,
}

impl Session {
    pub fn new(store: Arc<dyn Store>, dictionary: Arc<dyn DictionaryLookup>) -> Self {
        Self {
            store,
            dictionary,
            translator: None,
            clock: Arc::new(SystemClock),
            rng: Mutex::new(StdRng::from_os_rng()),
            locks: KeyLocks::new(),
            settings: SessionSettings::default(),
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Look a word up and fold it into the vocabulary and progress.
    ///
    /// Dictionary failures return before anything is locked or written.
    pub async fn lookup(&self, raw: &str, context: Option<LookupContext>) -> Result<LookupOutcome> {
        let word = normalize_word(raw)?;

        let mut data = match self.dictionary.lookup(&word).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Lookup failed for {:?}: {}", word, e);
                return Err(e.into());
            }
        };
        if data.word.trim().is_empty() {
            data.word = word.clone();
        }

        let translation = self.translation_for(&word).await;

        let key = entry_key(&word);
        let _guards = self.lock_entry_and_progress(&key).await;
        let (existing, progress) = self.read_pair(&key).await?;

        let is_new = existing.is_none();
        let had_etymology = existing.as_ref().is_some_and(VocabularyEntry::has_etymology);
        let entry = entry::record_lookup(existing, &data, context.as_ref(), self.clock.now());

        let mut progress = progression::record_lookup(&progress, self.clock.today());
        let stored = self.store.keys(ENTRY_PREFIX).await?.len();
        progress.unique_word_count = u32::try_from(stored + usize::from(is_new)).unwrap_or(u32::MAX);
        if entry.has_etymology() && !had_etymology {
            progress.etymology_count = progress.etymology_count.saturating_add(1);
        }

        let (mut progress, award) = progression::apply_event(&progress, EventKind::Lookup);
        let new_badges = badges::evaluate(&mut progress)
            .into_iter()
            .map(|b| b.info(true))
            .collect::<Vec<_>>();

        self.write_pair(key, &entry, &progress).await?;

        tracing::info!(
            "Looked up {:?} (count {}, +{} XP){}",
            word,
            entry.lookup_count,
            award.gained,
            if award.leveled_up { ", level up" } else { "" }
        );
        for badge in &new_badges {
            tracing::info!("Badge unlocked: {}", badge.name);
        }

        Ok(LookupOutcome {
            mastery: mastery::score(&entry),
            data,
            entry,
            translation,
            award,
            new_badges,
        })
    }

    /// Most overdue card, or a random extra one when nothing is due
    pub async fn due_review(&self) -> Result<ReviewCard> {
        let entries = load_entries(self.store.as_ref()).await?;
        let now = self.clock.now();

        let selection = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            scheduler::select_next(&entries, now, &mut *rng)?
        };

        Ok(review_card(selection.entry, selection.extra_review))
    }

    pub async fn submit_review_grade(&self, word: &str, grade: Grade) -> Result<ExperienceAward> {
        let word = normalize_word(word)?;
        let key = entry_key(&word);
        let _guards = self.lock_entry_and_progress(&key).await;

        let (existing, progress) = self.read_pair(&key).await?;
        let existing = existing.ok_or_else(|| SessionError::UnknownWord(word.clone()))?;
        if existing.learned {
            return Err(SessionError::AlreadyLearned(word));
        }

        let entry = scheduler::schedule(&existing, grade, self.clock.now());
        let (mut progress, award) = progression::apply_event(&progress, EventKind::FlashcardReview);
        badges::evaluate(&mut progress);

        self.write_pair(key, &entry, &progress).await?;

        tracing::debug!(
            "Graded {:?} {:?}: interval {}m, ease {:.2}{}",
            word,
            grade,
            entry.interval_minutes,
            entry.ease,
            if entry.learned { ", learned" } else { "" }
        );

        Ok(award)
    }

    pub async fn generate_quiz(&self, quiz_type: QuizType) -> Result<Question> {
        let entries = load_entries(self.store.as_ref()).await?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(quiz::generate(&entries, quiz_type, &mut *rng)?)
    }

    pub async fn submit_quiz_answer(
        &self,
        word: &str,
        correct: bool,
    ) -> Result<(QuizTotals, ExperienceAward)> {
        let word = normalize_word(word)?;
        let key = entry_key(&word);
        let _guards = self.lock_entry_and_progress(&key).await;

        let (existing, progress) = self.read_pair(&key).await?;
        let mut entry = existing.ok_or_else(|| SessionError::UnknownWord(word.clone()))?;

        if correct {
            entry.quiz_correct_count = entry.quiz_correct_count.saturating_add(1);
        }

        let progress = progression::record_quiz_answer(&progress, correct);
        let kind = if correct {
            EventKind::QuizCorrect
        } else {
            EventKind::QuizWrong
        };
        let (mut progress, award) = progression::apply_event(&progress, kind);
        badges::evaluate(&mut progress);

        self.write_pair(key, &entry, &progress).await?;

        Ok((progress.quiz_totals, award))
    }

    pub async fn mastery(&self, word: &str) -> Result<u8> {
        let entry = self.require_entry(word).await?;
        Ok(mastery::score(&entry))
    }

    pub async fn progress(&self) -> Result<ProgressSnapshot> {
        let progress = load_progress(self.store.as_ref()).await?;
        let entries = load_entries(self.store.as_ref()).await?;

        Ok(ProgressSnapshot {
            level: progression::level_progress(progress.experience_total),
            badges: badges::catalogue(&progress),
            favorites: entries.iter().filter(|e| e.favorite).count() as u32,
            learned: entries.iter().filter(|e| e.learned).count() as u32,
            progress,
        })
    }

    pub async fn export_all(&self) -> Result<String> {
        let entries = load_entries(self.store.as_ref()).await?;
        Ok(export::to_csv(&entries)?)
    }

    /// Flip the favorite flag, returning the new value
    pub async fn toggle_favorite(&self, word: &str) -> Result<bool> {
        let word = normalize_word(word)?;
        let key = entry_key(&word);
        let _shared = self.locks.shared().await;
        let _guard = self.locks.lock(&key).await;

        let mut entry = load_entry(self.store.as_ref(), &word)
            .await?
            .ok_or_else(|| SessionError::UnknownWord(word.clone()))?;
        entry.favorite = !entry.favorite;

        let mut document = Document::new();
        encode(&mut document, key, &entry)?;
        self.store.set(document).await?;

        Ok(entry.favorite)
    }

    pub async fn favorites(&self) -> Result<Vec<HistoryItem>> {
        let mut entries = load_entries(self.store.as_ref()).await?;
        entries.retain(|e| e.favorite);
        Ok(recent_first(entries, usize::MAX))
    }

    pub async fn history(&self) -> Result<Vec<HistoryItem>> {
        let entries = load_entries(self.store.as_ref()).await?;
        Ok(recent_first(entries, self.settings.history_limit))
    }

    /// Drop every entry and the progress record
    pub async fn reset(&self) -> Result<()> {
        let _exclusive = self.locks.exclusive().await;
        self.store.clear().await?;
        tracing::info!("Vocabulary and progress reset");
        Ok(())
    }

    /// Clear one entry's learned flag and scheduling so it is reviewed again
    pub async fn reset_word(&self, word: &str) -> Result<()> {
        let word = normalize_word(word)?;
        let key = entry_key(&word);
        let _shared = self.locks.shared().await;
        let _guard = self.locks.lock(&key).await;

        let existing = load_entry(self.store.as_ref(), &word)
            .await?
            .ok_or_else(|| SessionError::UnknownWord(word.clone()))?;

        let mut document = Document::new();
        encode(&mut document, key, &entry::reset_schedule(&existing))?;
        self.store.set(document).await?;

        Ok(())
    }

    pub async fn word_of_day(&self) -> Result<WordData> {
        let word = word_of_day::word_of_day(self.clock.today());
        Ok(self.dictionary.lookup(word).await?)
    }

    pub async fn daily_goal(&self) -> Result<DailyGoal> {
        let progress = load_progress(self.store.as_ref()).await?;
        Ok(progression::daily_goal(
            &progress,
            self.settings.daily_goal,
            self.clock.today(),
        ))
    }

    pub async fn strength(&self) -> Result<VocabularyStrength> {
        let progress = load_progress(self.store.as_ref()).await?;
        let entries = load_entries(self.store.as_ref()).await?;
        Ok(strength::vocabulary_strength(&entries, &progress))
    }

    pub async fn translate(&self, word: &str, lang: &str) -> Result<String> {
        let translator = self
            .translator
            .as_ref()
            .ok_or(SessionError::TranslationDisabled)?;
        let word = normalize_word(word)?;

        let translation = translator
            .translate(&word, self.settings.from_lang.clone(), lang.to_string())
            .await?;

        Ok(translation.text)
    }

    async fn translation_for(&self, word: &str) -> Option<String> {
        if !self.settings.translate_on_lookup {
            return None;
        }
        let translator = self.translator.as_ref()?;

        match translator
            .translate(
                word,
                self.settings.from_lang.clone(),
                self.settings.to_lang.clone(),
            )
            .await
        {
            Ok(translation) => Some(translation.text),
            Err(e) => {
                tracing::warn!("No translation for {:?}: {}", word, e);
                None
            }
        }
    }

    async fn require_entry(&self, word: &str) -> Result<VocabularyEntry> {
        let word = normalize_word(word)?;
        load_entry(self.store.as_ref(), &word)
            .await?
            .ok_or(SessionError::UnknownWord(word))
    }

    async fn lock_entry_and_progress(
        &self,
        key: &str,
    ) -> (RwLockReadGuard<'_, ()>, OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        let shared = self.locks.shared().await;
        let entry = self.locks.lock(key).await;
        let progress = self.locks.lock(PROGRESS_KEY).await;
        (shared, entry, progress)
    }

    async fn read_pair(&self, key: &str) -> Result<(Option<VocabularyEntry>, LearnerProgress)> {
        let keys = [key.to_string(), PROGRESS_KEY.to_string()];
        let document = self.store.get(&keys).await?;

        let entry = decode(&document, key)?;
        let progress = decode(&document, PROGRESS_KEY)?.unwrap_or_default();
        Ok((entry, progress))
    }

    async fn write_pair(
        &self,
        key: String,
        entry: &VocabularyEntry,
        progress: &LearnerProgress,
    ) -> Result<()> {
        let mut document = Document::new();
        encode(&mut document, key.clone(), entry)?;
        encode(&mut document, PROGRESS_KEY, progress)?;

        if let Err(e) = self.store.set(document).await {
            tracing::error!("Discarded update of {}: {}", key, e);
            return Err(e.into());
        }

        Ok(())
    }
}

fn review_card(entry: &VocabularyEntry, extra_review: bool) -> ReviewCard {
    ReviewCard {
        word: entry.word.clone(),
        phonetic: entry.phonetic.clone(),
        part_of_speech: entry.part_of_speech.clone(),
        definition: entry.definition.clone(),
        examples: entry.examples.clone(),
        difficulty: entry.difficulty,
        lookup_count: entry.lookup_count,
        favorite: entry.favorite,
        etymology: entry.etymology.clone(),
        ease: entry.ease,
        interval_minutes: entry.interval_minutes,
        mastery: mastery::score(entry),
        extra_review,
    }
}

fn recent_first(mut entries: Vec<VocabularyEntry>, limit: usize) -> Vec<HistoryItem> {
    entries.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    entries
        .iter()
        .take(limit)
        .map(|e| HistoryItem {
            word: e.word.clone(),
            phonetic: e.phonetic.clone(),
            part_of_speech: e.part_of_speech.clone(),
            definition: e.definition.clone(),
            difficulty: e.difficulty,
            lookup_count: e.lookup_count,
            favorite: e.favorite,
            mastery: mastery::score(e),
            last_seen: e.last_seen,
        })
        .collect()
}
