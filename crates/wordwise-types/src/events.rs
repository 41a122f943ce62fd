use serde::{Deserialize, Serialize};

use crate::progress::{
    BadgeInfo, DailyGoal, ExperienceAward, LearnerProgress, LevelProgress, QuizTotals,
    VocabularyStrength,
};
use crate::quiz::{Grade, Question, QuizType, ReviewCard};
use crate::vocabulary::{HistoryItem, LookupContext, VocabularyEntry, WordData};

/// Requests from the presentation layer
#[derive(Debug, Clone)]
pub enum AppEvent {
    Lookup {
        word: String,
        context: Option<LookupContext>,
    },
    GetDueReview,
    SubmitReviewGrade {
        word: String,
        grade: Grade,
    },
    GenerateQuiz(QuizType),
    SubmitQuizAnswer {
        word: String,
        correct: bool,
    },
    GetMastery(String),
    GetProgress,
    ExportAll,
    ToggleFavorite(String),
    GetFavorites,
    GetHistory,
    GetWordOfDay,
    GetDailyGoal,
    GetStrength,
    Translate {
        word: String,
        lang: String,
    },
    ResetWord(String),
    Reset,
}

/// Replies sent back to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum AppResponse {
    Lookup(Box<LookupOutcome>),
    Review(ReviewCard),
    GradeRecorded(ExperienceAward),
    Quiz(Question),
    QuizAnswered {
        totals: QuizTotals,
        award: ExperienceAward,
    },
    Mastery {
        word: String,
        score: u8,
    },
    Progress(Box<ProgressSnapshot>),
    Export(String),
    Favorite {
        word: String,
        favorite: bool,
    },
    Favorites(Vec<HistoryItem>),
    History(Vec<HistoryItem>),
    WordOfDay(WordData),
    DailyGoal(DailyGoal),
    Strength(VocabularyStrength),
    Translation {
        word: String,
        lang: String,
        text: String,
    },
    Reset,
    /// Nothing eligible to study or quiz; not a failure
    Empty(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupOutcome {
    pub data: WordData,
    pub entry: VocabularyEntry,
    pub mastery: u8,
    pub translation: Option<String>,
    pub award: ExperienceAward,
    pub new_badges: Vec<BadgeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub progress: LearnerProgress,
    pub level: LevelProgress,
    pub badges: Vec<BadgeInfo>,
    pub favorites: u32,
    pub learned: u32,
}
