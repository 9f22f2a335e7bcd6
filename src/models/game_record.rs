use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one completed quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub correct: u32,
    pub total: u32,
    pub date: DateTime<Utc>,
}

impl GameRecord {
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Self {
        Self {
            correct,
            total,
            date,
        }
    }

    /// Zero-valued record returned when nothing has been stored yet.
    pub fn empty() -> Self {
        Self::new(0, 0, Utc::now())
    }

    /// Records rank by `correct` alone; `total` never breaks a tie.
    pub fn is_better_than(&self, other: &GameRecord) -> bool {
        self.correct > other.correct
    }

    /// `dd.mm.yy HH:MM` in the local timezone.
    pub fn date_prompt(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%d.%m.%y %H:%M")
            .to_string()
    }
}

/// Lifetime statistics across all completed quizzes.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStatistics {
    pub games_count: u32,
    /// Percentage in `0.0..=100.0`.
    pub total_accuracy: f64,
    pub best_game: GameRecord,
}
