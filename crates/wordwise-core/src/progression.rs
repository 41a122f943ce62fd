use chrono::{Duration, NaiveDate};
use wordwise_types::{DailyGoal, ExperienceAward, LearnerProgress, LevelProgress};

/// Daily counts older than this are pruned
pub const DAILY_WINDOW_DAYS: i64 = 30;

/// Learning events that earn experience
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Lookup,
    QuizCorrect,
    QuizWrong,
    FlashcardReview,
    /// Per streak day; callers decide when to grant it
    StreakBonus,
}

impl EventKind {
    pub fn experience(self) -> u64 {
        match self {
            EventKind::Lookup => 10,
            EventKind::QuizCorrect => 25,
            EventKind::QuizWrong => 5,
            EventKind::FlashcardReview => 15,
            EventKind::StreakBonus => 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub level: u8,
    pub title: &'static str,
    pub threshold: u64,
}

pub const LEVELS: [Level; 10] = [
    Level { level: 1, title: "Novice", threshold: 0 },
    Level { level: 2, title: "Curious", threshold: 100 },
    Level { level: 3, title: "Learner", threshold: 300 },
    Level { level: 4, title: "Explorer", threshold: 600 },
    Level { level: 5, title: "Word Smith", threshold: 1000 },
    Level { level: 6, title: "Linguist", threshold: 1500 },
    Level { level: 7, title: "Scholar", threshold: 2500 },
    Level { level: 8, title: "Polyglot", threshold: 4000 },
    Level { level: 9, title: "Lexicon Master", threshold: 6000 },
    Level { level: 10, title: "Word Wizard", threshold: 10000 },
];

/// Highest level whose threshold is reached
pub fn level_for(experience: u64) -> &'static Level {
    LEVELS
        .iter()
        .rev()
        .find(|l| experience >= l.threshold)
        .unwrap_or(&LEVELS[0])
}

pub fn level_progress(experience: u64) -> LevelProgress {
    let current = level_for(experience);
    let next = LEVELS.iter().find(|l| l.level == current.level + 1);

    let percent = match next {
        Some(next) => {
            let span = (next.threshold - current.threshold) as f64;
            let done = (experience - current.threshold) as f64;
            (done / span * 100.0).round().clamp(0.0, 100.0) as u8
        }
        None => 100,
    };

    LevelProgress {
        level: current.level,
        title: current.title.to_string(),
        experience,
        current_threshold: current.threshold,
        next_threshold: next.map(|l| l.threshold),
        percent,
    }
}

/// Award the experience for one event
pub fn apply_event(progress: &LearnerProgress, kind: EventKind) -> (LearnerProgress, ExperienceAward) {
    let before = level_for(progress.experience_total).level;
    let gained = kind.experience();

    let mut next = progress.clone();
    next.experience_total = progress.experience_total.saturating_add(gained);

    let level = level_progress(next.experience_total);
    let award = ExperienceAward {
        gained,
        total: next.experience_total,
        level: level.level,
        leveled_up: level.level > before,
        progress_percent: level.percent,
    };

    (next, award)
}

/// Count one lookup: totals, today's bucket, window pruning and the day streak
pub fn record_lookup(progress: &LearnerProgress, today: NaiveDate) -> LearnerProgress {
    let mut next = progress.clone();
    next.total_lookups = next.total_lookups.saturating_add(1);
    *next.daily_lookup_counts.entry(today).or_insert(0) += 1;

    let cutoff = today - Duration::days(DAILY_WINDOW_DAYS);
    next.daily_lookup_counts.retain(|date, _| *date >= cutoff);

    update_streak(&mut next, today);
    next
}

/// Yesterday extends the streak, today leaves it alone, anything else restarts at 1
pub fn update_streak(progress: &mut LearnerProgress, today: NaiveDate) {
    match progress.last_active_date {
        Some(last) if last == today => {}
        Some(last) if today.pred_opt() == Some(last) => {
            progress.current_streak_days = progress.current_streak_days.saturating_add(1);
        }
        _ => progress.current_streak_days = 1,
    }

    progress.last_active_date = Some(today);
    progress.best_streak_days = progress.best_streak_days.max(progress.current_streak_days);
}

/// Quiz totals after one answer
pub fn record_quiz_answer(progress: &LearnerProgress, correct: bool) -> LearnerProgress {
    let mut next = progress.clone();
    let totals = &mut next.quiz_totals;

    totals.attempts = totals.attempts.saturating_add(1);
    if correct {
        totals.correct = totals.correct.saturating_add(1);
        totals.current_streak = totals.current_streak.saturating_add(1);
        totals.best_streak = totals.best_streak.max(totals.current_streak);
    } else {
        totals.current_streak = 0;
    }

    next
}

pub fn daily_goal(progress: &LearnerProgress, goal: u32, today: NaiveDate) -> DailyGoal {
    let goal = goal.max(1);
    let done = progress.daily_lookup_counts.get(&today).copied().unwrap_or(0);
    let percentage = (done as f64 / goal as f64 * 100.0).round().min(100.0) as u8;

    DailyGoal {
        goal,
        progress: done,
        completed: done >= goal,
        percentage,
    }
}
