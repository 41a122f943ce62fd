//! SM-2 variant scheduler working in minutes.
//!
//! | grade | interval'                                | ease'            |
//! |-------|------------------------------------------|------------------|
//! | Again | 1                                        | max(1.3, e-0.2)  |
//! | Hard  | max(1, round(i * 1.2))                   | max(1.3, e-0.15) |
//! | Good  | 0 -> 1, 1 -> 6, else round(i * e)        | e                |
//! | Easy  | 0 -> 4, else round(i * e * 1.3)          | e + 0.15         |
//!
//! An Easy grade that lands on an interval of 60 minutes or more graduates the
//! entry (`learned = true`), which removes it from selection.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use wordwise_types::vocabulary::MIN_EASE;
use wordwise_types::{Grade, VocabularyEntry};

use crate::error::CoreError;

const AGAIN_EASE_PENALTY: f64 = 0.2;
const HARD_EASE_PENALTY: f64 = 0.15;
const EASY_EASE_BONUS: f64 = 0.15;
const HARD_MULTIPLIER: f64 = 1.2;
const EASY_MULTIPLIER: f64 = 1.3;
const EASY_FIRST_INTERVAL: u32 = 4;
/// Easy reviews reaching this interval graduate the entry
pub const GRADUATION_MINUTES: u32 = 60;

/// Apply one review grade. Pure: the same `(entry, grade, now)` always yields the same entry.
pub fn schedule(entry: &VocabularyEntry, grade: Grade, now: DateTime<Utc>) -> VocabularyEntry {
    let ease = entry.ease.max(MIN_EASE);
    let interval = entry.interval_minutes;

    let (next_interval, next_ease) = match grade {
        Grade::Again => (1, (ease - AGAIN_EASE_PENALTY).max(MIN_EASE)),
        Grade::Hard => (
            scale(interval, HARD_MULTIPLIER).max(1),
            (ease - HARD_EASE_PENALTY).max(MIN_EASE),
        ),
        Grade::Good => {
            let next = match interval {
                0 => 1,
                1 => 6,
                i => scale(i, ease),
            };
            (next, ease)
        }
        Grade::Easy => {
            let next = match interval {
                0 => EASY_FIRST_INTERVAL,
                i => scale(i, ease * EASY_MULTIPLIER),
            };
            (next, ease + EASY_EASE_BONUS)
        }
    };

    let graduated = grade == Grade::Easy && next_interval >= GRADUATION_MINUTES;

    VocabularyEntry {
        ease: next_ease,
        interval_minutes: next_interval,
        next_due_at: Some(now + Duration::minutes(next_interval as i64)),
        learned: entry.learned || graduated,
        ..entry.clone()
    }
}

fn scale(interval: u32, factor: f64) -> u32 {
    (interval as f64 * factor).round().min(u32::MAX as f64) as u32
}

/// Whether the entry belongs to the due queue
pub fn is_due(entry: &VocabularyEntry, now: DateTime<Utc>) -> bool {
    !entry.learned && entry.next_due_at.is_none_or(|due| due <= now)
}

#[derive(Debug, Clone, Copy)]
pub struct ReviewSelection<'a> {
    pub entry: &'a VocabularyEntry,
    /// Nothing was due; the entry was picked at random for extra practice
    pub extra_review: bool,
}

/// Pick the most overdue unlearned entry.
///
/// Never-reviewed entries count as infinitely overdue and ties are broken with
/// `rng`. When nothing is due a random unlearned entry is returned as an extra
/// review; with no unlearned entries at all the pool is empty.
pub fn select_next<'a, R>(
    entries: &'a [VocabularyEntry],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<ReviewSelection<'a>, CoreError>
where
    R: Rng + ?Sized,
{
    let due: Vec<&VocabularyEntry> = entries.iter().filter(|e| is_due(e, now)).collect();

    if let Some(most_overdue) = due.iter().map(|e| overdue_millis(e, now)).max() {
        let tied: Vec<&VocabularyEntry> = due
            .into_iter()
            .filter(|e| overdue_millis(e, now) == most_overdue)
            .collect();
        let entry = tied.choose(rng).copied().ok_or(CoreError::EmptyPool)?;
        return Ok(ReviewSelection {
            entry,
            extra_review: false,
        });
    }

    let unlearned: Vec<&VocabularyEntry> = entries.iter().filter(|e| !e.learned).collect();
    let entry = unlearned.choose(rng).copied().ok_or(CoreError::EmptyPool)?;

    Ok(ReviewSelection {
        entry,
        extra_review: true,
    })
}

fn overdue_millis(entry: &VocabularyEntry, now: DateTime<Utc>) -> i64 {
    match entry.next_due_at {
        Some(due) => (now - due).num_milliseconds(),
        None => i64::MAX,
    }
}
