pub mod events;
pub mod progress;
pub mod quiz;
pub mod vocabulary;

pub use events::{AppEvent, AppResponse, LookupOutcome, ProgressSnapshot};
pub use progress::{
    BadgeInfo, DailyGoal, ExperienceAward, LearnerProgress, LevelProgress, QuizTotals,
    VocabularyStrength,
};
pub use quiz::{Answer, Grade, Question, QuizOption, QuizType, ReviewCard};
pub use vocabulary::{
    ContextSnippet, Difficulty, HistoryItem, LookupContext, Meaning, MeaningDefinition,
    VocabularyEntry, WordData,
};
