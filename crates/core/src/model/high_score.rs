use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, GameMode};

/// Best score recorded for a (mode, difficulty) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    mode: GameMode,
    difficulty: Difficulty,
    value: u32,
    recorded_at: DateTime<Utc>,
}

impl HighScore {
    #[must_use]
    pub fn new(
        mode: GameMode,
        difficulty: Difficulty,
        value: u32,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            mode,
            difficulty,
            value,
            recorded_at,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// How a finished game's score interacts with the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighScorePolicy {
    /// Every finished game replaces the stored record, even with a lower score.
    #[default]
    OverwriteAlways,
    /// Only a strictly greater score replaces the stored record.
    KeepMax,
}

impl HighScorePolicy {
    /// Whether `candidate` should be written given the currently stored record.
    #[must_use]
    pub fn should_replace(self, existing: Option<&HighScore>, candidate: u32) -> bool {
        match (self, existing) {
            (HighScorePolicy::OverwriteAlways, _) | (HighScorePolicy::KeepMax, None) => true,
            (HighScorePolicy::KeepMax, Some(record)) => candidate > record.value(),
        }
    }

    /// Whether deciding requires reading the stored record first.
    #[must_use]
    pub fn needs_existing(self) -> bool {
        matches!(self, HighScorePolicy::KeepMax)
    }
}
