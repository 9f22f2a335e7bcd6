//! Lifetime statistics: games played, average accuracy and the best game.

use std::{str::FromStr, sync::Arc};

use chrono::Utc;
use log::{error, warn};

use crate::models::{AggregateStatistics, GameRecord};
use crate::storage::KeyValueBackend;

/// Statistics the presenter records into and reads back from.
pub trait StatisticService: Send + Sync {
    /// Record one finished game and return the updated totals.
    ///
    /// Persistence failures are logged, never returned.
    fn store(&self, correct: u32, total: u32) -> AggregateStatistics;
    fn total_accuracy(&self) -> f64;
    fn games_count(&self) -> u32;
    fn best_game(&self) -> GameRecord;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Correct,
    Total,
    BestGame,
    GamesCount,
}

impl Key {
    fn as_str(&self) -> &'static str {
        match self {
            Key::Correct => "correct",
            Key::Total => "total",
            Key::BestGame => "bestGame",
            Key::GamesCount => "gamesCount",
        }
    }
}

/// `StatisticService` over any key/value backend.
pub struct StatisticsStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl StatisticsStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Running sum of correct answers across every recorded game.
    fn correct_answers(&self) -> u64 {
        self.read_parsed(Key::Correct).unwrap_or(0)
    }

    fn read_parsed<T: FromStr>(&self, key: Key) -> Option<T> {
        let raw = self.read_raw(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring malformed value {raw:?} for {}", key.as_str());
                None
            }
        }
    }

    fn read_raw(&self, key: Key) -> Option<String> {
        match self.backend.get(key.as_str()) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to read {}: {err:#}", key.as_str());
                None
            }
        }
    }

    fn write(&self, key: Key, value: &str) {
        if let Err(err) = self.backend.set(key.as_str(), value) {
            error!("failed to persist {}: {err:#}", key.as_str());
        }
    }
}

impl StatisticService for StatisticsStore {
    fn store(&self, correct: u32, total: u32) -> AggregateStatistics {
        let current = GameRecord::new(correct, total, Utc::now());

        let mut best_game = self.best_game();
        if current.is_better_than(&best_game) {
            match serde_json::to_string(&current) {
                Ok(json) => self.write(Key::BestGame, &json),
                Err(err) => error!("failed to encode best game record: {err}"),
            }
            best_game = current;
        }

        let correct_answers = self.correct_answers() + u64::from(correct);
        self.write(Key::Correct, &correct_answers.to_string());

        let games_count = self.games_count() + 1;
        self.write(Key::GamesCount, &games_count.to_string());

        let asked = u64::from(games_count) * u64::from(total);
        let total_accuracy = if asked == 0 {
            0.0
        } else {
            100.0 * correct_answers as f64 / asked as f64
        };
        self.write(Key::Total, &total_accuracy.to_string());

        AggregateStatistics {
            games_count,
            total_accuracy,
            best_game,
        }
    }

    fn total_accuracy(&self) -> f64 {
        self.read_parsed(Key::Total).unwrap_or(0.0)
    }

    fn games_count(&self) -> u32 {
        self.read_parsed(Key::GamesCount).unwrap_or(0)
    }

    fn best_game(&self) -> GameRecord {
        self.read_raw(Key::BestGame)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("ignoring malformed best game record: {err}");
                    None
                }
            })
            .unwrap_or_else(GameRecord::empty)
    }
}
