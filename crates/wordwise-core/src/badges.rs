use wordwise_types::{BadgeInfo, LearnerProgress};

/// Condition a badge waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    TotalLookups(u64),
    UniqueWords(u32),
    StreakDays(u32),
    QuizCorrect(u32),
    QuizBestStreak(u32),
    Etymologies(u32),
}

impl Requirement {
    pub fn is_met(&self, progress: &LearnerProgress) -> bool {
        match *self {
            Requirement::TotalLookups(n) => progress.total_lookups >= n,
            Requirement::UniqueWords(n) => progress.unique_word_count >= n,
            Requirement::StreakDays(n) => progress.current_streak_days >= n,
            Requirement::QuizCorrect(n) => progress.quiz_totals.correct >= n,
            Requirement::QuizBestStreak(n) => progress.quiz_totals.best_streak >= n,
            Requirement::Etymologies(n) => progress.etymology_count >= n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: Requirement,
}

impl Badge {
    pub fn info(&self, earned: bool) -> BadgeInfo {
        BadgeInfo {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            earned,
        }
    }
}

pub const BADGES: &[Badge] = &[
    Badge {
        id: "first-lookup",
        name: "First Steps",
        description: "Looked up your first word",
        requirement: Requirement::TotalLookups(1),
    },
    Badge {
        id: "word-collector",
        name: "Word Collector",
        description: "Looked up 50 words",
        requirement: Requirement::TotalLookups(50),
    },
    Badge {
        id: "vocabulary-builder",
        name: "Vocabulary Builder",
        description: "100 unique words",
        requirement: Requirement::UniqueWords(100),
    },
    Badge {
        id: "polyglot",
        name: "Polyglot",
        description: "250 unique words",
        requirement: Requirement::UniqueWords(250),
    },
    Badge {
        id: "scholar",
        name: "Scholar",
        description: "500 unique words",
        requirement: Requirement::UniqueWords(500),
    },
    Badge {
        id: "streak-3",
        name: "On Fire",
        description: "3-day streak",
        requirement: Requirement::StreakDays(3),
    },
    Badge {
        id: "streak-7",
        name: "Streak Master",
        description: "7-day streak",
        requirement: Requirement::StreakDays(7),
    },
    Badge {
        id: "streak-30",
        name: "Unstoppable",
        description: "30-day streak",
        requirement: Requirement::StreakDays(30),
    },
    Badge {
        id: "bookworm",
        name: "Bookworm",
        description: "1000 total lookups",
        requirement: Requirement::TotalLookups(1000),
    },
    Badge {
        id: "quiz-master",
        name: "Quiz Master",
        description: "50 correct quiz answers",
        requirement: Requirement::QuizCorrect(50),
    },
    Badge {
        id: "perfectionist",
        name: "Perfectionist",
        description: "10 quiz streak",
        requirement: Requirement::QuizBestStreak(10),
    },
    Badge {
        id: "etymologist",
        name: "Etymologist",
        description: "Discovered 20 word origins",
        requirement: Requirement::Etymologies(20),
    },
];

pub fn find(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

/// Unlock every badge whose requirement is newly met.
///
/// Already unlocked ids are skipped and never removed, so running this twice
/// on the same state changes nothing the second time.
pub fn evaluate(progress: &mut LearnerProgress) -> Vec<&'static Badge> {
    let mut unlocked = Vec::new();

    for badge in BADGES {
        if progress.unlocked_badge_ids.contains(badge.id) {
            continue;
        }
        if badge.requirement.is_met(progress) {
            progress.unlocked_badge_ids.insert(badge.id.to_string());
            unlocked.push(badge);
        }
    }

    unlocked
}

/// Whole registry with earned flags, in registry order
pub fn catalogue(progress: &LearnerProgress) -> Vec<BadgeInfo> {
    BADGES
        .iter()
        .map(|b| b.info(progress.unlocked_badge_ids.contains(b.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_lookup_unlocks_once() {
        let mut progress = LearnerProgress {
            total_lookups: 1,
            ..Default::default()
        };

        let first = evaluate(&mut progress);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "first-lookup");

        let snapshot = progress.unlocked_badge_ids.clone();
        assert!(evaluate(&mut progress).is_empty());
        assert_eq!(progress.unlocked_badge_ids, snapshot);
    }

    #[test]
    fn test_unlocked_badges_survive_regression() {
        let mut progress = LearnerProgress {
            current_streak_days: 7,
            ..Default::default()
        };
        evaluate(&mut progress);
        assert!(progress.unlocked_badge_ids.contains("streak-3"));
        assert!(progress.unlocked_badge_ids.contains("streak-7"));

        progress.current_streak_days = 1;
        evaluate(&mut progress);
        assert!(progress.unlocked_badge_ids.contains("streak-7"));
    }

    #[test]
    fn test_quiz_and_etymology_badges() {
        let mut progress = LearnerProgress::default();
        progress.quiz_totals.correct = 50;
        progress.quiz_totals.best_streak = 10;
        progress.etymology_count = 20;

        let ids: Vec<&str> = evaluate(&mut progress).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["quiz-master", "perfectionist", "etymologist"]);
    }

    #[test]
    fn test_catalogue_marks_earned() {
        let mut progress = LearnerProgress {
            unique_word_count: 120,
            ..Default::default()
        };
        evaluate(&mut progress);

        let catalogue = catalogue(&progress);
        assert_eq!(catalogue.len(), BADGES.len());
        let builder = catalogue.iter().find(|b| b.id == "vocabulary-builder").unwrap();
        assert!(builder.earned);
        let polyglot = catalogue.iter().find(|b| b.id == "polyglot").unwrap();
        assert!(!polyglot.earned);
        assert_eq!(find("polyglot").map(|b| b.name), Some("Polyglot"));
    }
}
