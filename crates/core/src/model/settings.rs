use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::mode::GameMode;

/// Smallest question count a player may request.
pub const MIN_QUESTION_COUNT: u32 = 5;
/// Largest question count a player may request.
pub const MAX_QUESTION_COUNT: u32 = 30;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be between 5 and 30, got {0}")]
    QuestionCountOutOfRange(u32),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty filter applied when loading questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::All,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    /// Stable key used for persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::All => "all",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Difficulty::All => "All",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Whether a question labelled `label` passes this filter.
    ///
    /// `All` accepts everything; other variants compare case-insensitively.
    #[must_use]
    pub fn matches(self, label: &str) -> bool {
        match self {
            Difficulty::All => true,
            other => label.trim().eq_ignore_ascii_case(other.as_str()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Difficulty {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownDifficulty(s.to_owned()))
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Settings for one game, fixed for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameSettings {
    mode: GameMode,
    difficulty: Difficulty,
    requested_question_count: Option<u32>,
}

/// Player-entered settings awaiting validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameSettingsDraft {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub requested_question_count: Option<u32>,
}

impl GameSettingsDraft {
    #[must_use]
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            requested_question_count: None,
        }
    }

    #[must_use]
    pub fn with_question_count(mut self, count: u32) -> Self {
        self.requested_question_count = Some(count);
        self
    }

    /// Validate the draft into settings usable by a session.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::QuestionCountOutOfRange` if a requested count
    /// falls outside `MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT`.
    pub fn validate(self) -> Result<GameSettings, SettingsError> {
        if let Some(count) = self.requested_question_count {
            if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&count) {
                return Err(SettingsError::QuestionCountOutOfRange(count));
            }
        }

        Ok(GameSettings {
            mode: self.mode,
            difficulty: self.difficulty,
            requested_question_count: self.requested_question_count,
        })
    }
}

impl GameSettings {
    /// Settings using the mode's default question count.
    #[must_use]
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            requested_question_count: None,
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
    pub fn requested_question_count(&self) -> Option<u32> {
        self.requested_question_count
    }

    /// Number of questions a session plays: the requested count, else the mode default.
    #[must_use]
    pub fn effective_question_count(&self) -> u32 {
        self.requested_question_count
            .unwrap_or_else(|| self.mode.default_question_count())
    }
}
