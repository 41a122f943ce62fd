use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wordwise_types::{AppEvent, Grade, LookupContext, QuizType};

#[derive(Parser)]
#[command(name = "wordwise")]
#[command(about = "Look words up, review them on a spaced schedule and track your progress")]
pub struct Cli {
    /// Profile JSON (default: <config dir>/wordwise/config.json)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Keep the vocabulary in memory for this run only
    #[arg(long)]
    pub memory: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Look up a word and record it
    Lookup {
        word: String,
        /// Sentence the word was found in
        #[arg(long)]
        sentence: Option<String>,
        /// Page the sentence came from
        #[arg(long)]
        source_url: Option<String>,
    },
    /// Look up several words concurrently
    Batch {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Next flashcard to review
    Review,
    /// Grade a flashcard: again, hard, good, easy (or 0-3)
    Grade { word: String, grade: String },
    /// Generate a quiz question: definition, reverse, fillblank, spelling
    Quiz {
        #[arg(default_value = "definition")]
        quiz_type: String,
    },
    /// Record a quiz answer
    Answer {
        word: String,
        #[arg(long)]
        correct: bool,
    },
    /// Mastery score of a word
    Mastery { word: String },
    /// Experience, level, streaks and badges
    Progress,
    /// Export the vocabulary as CSV
    Export {
        /// Write to a file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Toggle a word's favorite flag
    Favorite { word: String },
    /// Favorite words
    Favorites,
    /// Recently looked up words
    History,
    /// Today's featured word
    WordOfDay,
    /// Progress toward today's lookup goal
    Goal,
    /// Overall vocabulary strength
    Strength,
    /// Translate a word
    Translate {
        word: String,
        /// Target language (default: configured language)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Clear all vocabulary and progress
    Reset,
    /// Put a learned word back into review
    ResetWord { word: String },
}

impl Command {
    pub fn export_path(&self) -> Option<PathBuf> {
        match self {
            Command::Export { output } => output.clone(),
            _ => None,
        }
    }

    /// Events to send for this command; `batch` yields one per word
    pub fn into_events(self, default_lang: &str) -> Vec<AppEvent> {
        let event = match self {
            Command::Lookup {
                word,
                sentence,
                source_url,
            } => AppEvent::Lookup {
                word,
                context: sentence.map(|sentence| LookupContext {
                    sentence,
                    source_url: source_url.unwrap_or_default(),
                }),
            },
            Command::Batch { words } => {
                return words
                    .into_iter()
                    .map(|word| AppEvent::Lookup {
                        word,
                        context: None,
                    })
                    .collect();
            }
            Command::Review => AppEvent::GetDueReview,
            Command::Grade { word, grade } => AppEvent::SubmitReviewGrade {
                word,
                grade: Grade::from_name(&grade),
            },
            Command::Quiz { quiz_type } => AppEvent::GenerateQuiz(QuizType::from_name(&quiz_type)),
            Command::Answer { word, correct } => AppEvent::SubmitQuizAnswer { word, correct },
            Command::Mastery { word } => AppEvent::GetMastery(word),
            Command::Progress => AppEvent::GetProgress,
            Command::Export { .. } => AppEvent::ExportAll,
            Command::Favorite { word } => AppEvent::ToggleFavorite(word),
            Command::Favorites => AppEvent::GetFavorites,
            Command::History => AppEvent::GetHistory,
            Command::WordOfDay => AppEvent::GetWordOfDay,
            Command::Goal => AppEvent::GetDailyGoal,
            Command::Strength => AppEvent::GetStrength,
            Command::Translate { word, lang } => AppEvent::Translate {
                word,
                lang: lang.unwrap_or_else(|| default_lang.to_string()),
            },
            Command::Reset => AppEvent::Reset,
            Command::ResetWord { word } => AppEvent::ResetWord(word),
        };

        vec![event]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_and_lenient_parsing() {
        let cli = Cli::parse_from(["wordwise", "batch", "alpha", "beta", "gamma"]);
        assert_eq!(cli.command.into_events("hi").len(), 3);

        let cli = Cli::parse_from(["wordwise", "grade", "alpha", "banana"]);
        match cli.command.into_events("hi").as_slice() {
            [AppEvent::SubmitReviewGrade { grade, .. }] => assert_eq!(*grade, Grade::Good),
            other => panic!("unexpected events: {:?}", other),
        }

        let cli = Cli::parse_from(["wordwise", "quiz", "nonsense"]);
        assert!(matches!(
            cli.command.into_events("hi").as_slice(),
            [AppEvent::GenerateQuiz(QuizType::Definition)]
        ));
    }

    #[test]
    fn test_translate_uses_default_language() {
        let cli = Cli::parse_from(["wordwise", "--memory", "translate", "water"]);
        assert!(cli.memory);
        match cli.command.into_events("de").as_slice() {
            [AppEvent::Translate { lang, .. }] => assert_eq!(lang, "de"),
            other => panic!("unexpected events: {:?}", other),
        }
    }
}
