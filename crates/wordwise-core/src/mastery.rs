use wordwise_types::VocabularyEntry;
use wordwise_types::vocabulary::MIN_EASE;

const LOOKUP_CAP: u32 = 20;
const EASE_CAP: f64 = 30.0;
const INTERVAL_CAP: f64 = 30.0;
const QUIZ_CAP: u32 = 20;
/// Ease span mapped onto the ease term (1.3..=3.0)
const EASE_SPAN: f64 = 1.7;
/// Interval at which the interval term saturates
const INTERVAL_SATURATION_MINUTES: f64 = 60.0;
/// Floor for graduated entries
pub const LEARNED_FLOOR: u8 = 80;

/// Mastery score in `0..=100` derived from lookups, review state and quiz history
pub fn score(entry: &VocabularyEntry) -> u8 {
    let lookups = entry.lookup_count.saturating_mul(5).min(LOOKUP_CAP);

    let ease = if entry.has_been_reviewed() {
        ((entry.ease - MIN_EASE).max(0.0) / EASE_SPAN * EASE_CAP)
            .round()
            .min(EASE_CAP) as u32
    } else {
        0
    };

    let interval = (entry.interval_minutes as f64 / INTERVAL_SATURATION_MINUTES * INTERVAL_CAP)
        .round()
        .min(INTERVAL_CAP) as u32;

    let quiz = entry.quiz_correct_count.saturating_mul(10).min(QUIZ_CAP);

    let total = (lookups + ease + interval + quiz).min(100) as u8;

    if entry.learned {
        total.max(LEARNED_FLOOR)
    } else {
        total
    }
}
