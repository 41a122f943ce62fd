use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizTotals {
    pub attempts: u32,
    pub correct: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Process-wide learner statistics, one record per store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnerProgress {
    pub total_lookups: u64,
    /// Mirrors the entry count at the last update
    pub unique_word_count: u32,
    pub current_streak_days: u32,
    pub best_streak_days: u32,
    pub last_active_date: Option<NaiveDate>,
    /// Rolling 30-day window
    pub daily_lookup_counts: BTreeMap<NaiveDate, u32>,
    pub unlocked_badge_ids: BTreeSet<String>,
    pub experience_total: u64,
    pub quiz_totals: QuizTotals,
    /// Entries carrying a non-empty etymology at the last update
    pub etymology_count: u32,
}

/// Outcome of awarding experience for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAward {
    pub gained: u64,
    pub total: u64,
    pub level: u8,
    pub leveled_up: bool,
    /// Percent toward the next threshold, 100 at max level
    pub progress_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u8,
    pub title: String,
    pub experience: u64,
    pub current_threshold: u64,
    pub next_threshold: Option<u64>,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoal {
    pub goal: u32,
    pub progress: u32,
    pub completed: bool,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyStrength {
    pub score: u8,
    pub grade: String,
    pub total_words: u32,
    pub mastered_words: u32,
    pub avg_mastery: u8,
    pub streak: u32,
    pub experience: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub earned: bool,
}
