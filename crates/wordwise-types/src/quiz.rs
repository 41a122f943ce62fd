use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocabulary::Difficulty;

/// Self-reported quality of a flashcard review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again = 0,
    Hard = 1,
    Good = 2,
    Easy = 3,
}

impl Grade {
    /// Unknown values fall back to `Good`
    pub fn from_value(value: i64) -> Self {
        match value {
            0 => Grade::Again,
            1 => Grade::Hard,
            2 => Grade::Good,
            3 => Grade::Easy,
            _ => Grade::Good,
        }
    }

    /// Accepts a grade name or its numeric value, defaulting to `Good`
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if let Ok(value) = name.parse::<i64>() {
            return Self::from_value(value);
        }
        match name.to_lowercase().as_str() {
            "again" => Grade::Again,
            "hard" => Grade::Hard,
            "easy" => Grade::Easy,
            _ => Grade::Good,
        }
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    #[default]
    Definition,
    Reverse,
    #[serde(rename = "fillblank")]
    FillBlank,
    Spelling,
}

impl QuizType {
    /// Unknown names fall back to `Definition`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "reverse" => QuizType::Reverse,
            "fillblank" | "fill-blank" | "fill_blank" => QuizType::FillBlank,
            "spelling" => QuizType::Spelling,
            _ => QuizType::Definition,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::Definition => "definition",
            QuizType::Reverse => "reverse",
            QuizType::FillBlank => "fillblank",
            QuizType::Spelling => "spelling",
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub quiz_type: QuizType,
    pub prompt: String,
    /// Word, definition or blanked sentence depending on the type
    pub clue: String,
    /// The word being tested
    pub word: String,
    pub phonetic: Option<String>,
    pub audio_ref: Option<String>,
    pub difficulty: Difficulty,
    /// Empty for spelling questions
    pub options: Vec<QuizOption>,
    pub answer: String,
}

/// A learner's reply to a [`Question`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Answer {
    Option(usize),
    Spelling(String),
}

/// Flashcard handed to the learner for review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    pub word: String,
    pub phonetic: String,
    pub part_of_speech: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub difficulty: Difficulty,
    pub lookup_count: u32,
    pub favorite: bool,
    pub etymology: Option<String>,
    pub ease: f64,
    pub interval_minutes: u32,
    pub mastery: u8,
    /// Nothing was due; this card is bonus practice
    pub extra_review: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parsing_defaults_to_good() {
        assert_eq!(Grade::from_value(0), Grade::Again);
        assert_eq!(Grade::from_value(3), Grade::Easy);
        assert_eq!(Grade::from_value(7), Grade::Good);
        assert_eq!(Grade::from_value(-1), Grade::Good);
        assert_eq!(Grade::from_name("Hard"), Grade::Hard);
        assert_eq!(Grade::from_name("1"), Grade::Hard);
        assert_eq!(Grade::from_name("perfect"), Grade::Good);
    }

    #[test]
    fn test_quiz_type_parsing_defaults_to_definition() {
        assert_eq!(QuizType::from_name("reverse"), QuizType::Reverse);
        assert_eq!(QuizType::from_name("FillBlank"), QuizType::FillBlank);
        assert_eq!(QuizType::from_name("spelling"), QuizType::Spelling);
        assert_eq!(QuizType::from_name("crossword"), QuizType::Definition);
    }

    #[test]
    fn test_quiz_type_wire_name() {
        let json = serde_json::to_string(&QuizType::FillBlank).unwrap();
        assert_eq!(json, "\"fillblank\"");
    }
}
