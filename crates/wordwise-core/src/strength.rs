use wordwise_types::{LearnerProgress, VocabularyEntry, VocabularyStrength};

use crate::mastery::{self, LEARNED_FLOOR};

const STREAK_SATURATION_DAYS: f64 = 30.0;
const VOLUME_SATURATION_WORDS: f64 = 200.0;

const GRADES: [(u8, &str); 6] = [
    (90, "Legendary"),
    (75, "Outstanding"),
    (60, "Strong"),
    (40, "Growing"),
    (20, "Building"),
    (0, "Getting Started"),
];

/// Overall vocabulary score: mastery 40%, streak 20%, volume 20%, mastered share 20%
pub fn vocabulary_strength(
    entries: &[VocabularyEntry],
    progress: &LearnerProgress,
) -> VocabularyStrength {
    let total = entries.len();
    if total == 0 {
        return VocabularyStrength {
            score: 0,
            grade: "Start Learning!".to_string(),
            total_words: 0,
            mastered_words: 0,
            avg_mastery: 0,
            streak: progress.current_streak_days,
            experience: progress.experience_total,
        };
    }

    let scores: Vec<u8> = entries.iter().map(mastery::score).collect();
    let mastered = scores.iter().filter(|s| **s >= LEARNED_FLOOR).count();
    let avg = scores.iter().map(|s| *s as f64).sum::<f64>() / total as f64;

    let streak_factor =
        (progress.current_streak_days as f64).min(STREAK_SATURATION_DAYS) / STREAK_SATURATION_DAYS;
    let volume_factor = (total as f64 / VOLUME_SATURATION_WORDS).min(1.0);
    let mastered_factor = mastered as f64 / total as f64;

    let score = (avg * 0.4 + streak_factor * 20.0 + volume_factor * 20.0 + mastered_factor * 20.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    VocabularyStrength {
        score,
        grade: grade_for(score).to_string(),
        total_words: total as u32,
        mastered_words: mastered as u32,
        avg_mastery: avg.round() as u8,
        streak: progress.current_streak_days,
        experience: progress.experience_total,
    }
}

fn grade_for(score: u8) -> &'static str {
    GRADES
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or("Getting Started")
}
