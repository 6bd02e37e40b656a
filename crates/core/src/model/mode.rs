use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown game mode: {0}")]
pub struct ParseModeError(pub String);

//
// ─── MODE POLICY ───────────────────────────────────────────────────────────────
//

/// Fixed rules attached to a game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModePolicy {
    /// Questions per session when the player does not request a count.
    pub default_question_count: u32,
    /// Countdown per question in seconds; `None` means untimed.
    pub time_per_question_secs: Option<u32>,
    pub starting_lives: u32,
}

//
// ─── GAME MODE ─────────────────────────────────────────────────────────────────
//

/// Game mode selected on the home screen.
///
/// - `Classic`: three lives, no clock
/// - `Timed`: three lives, 15 seconds per question; running out counts as a miss
/// - `SuddenDeath`: one wrong answer ends the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Classic,
    Timed,
    SuddenDeath,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Timed, GameMode::SuddenDeath];

    #[must_use]
    pub fn policy(self) -> ModePolicy {
        match self {
            GameMode::Classic => ModePolicy {
                default_question_count: 10,
                time_per_question_secs: None,
                starting_lives: 3,
            },
            GameMode::Timed => ModePolicy {
                default_question_count: 10,
                time_per_question_secs: Some(15),
                starting_lives: 3,
            },
            GameMode::SuddenDeath => ModePolicy {
                default_question_count: 15,
                time_per_question_secs: None,
                starting_lives: 1,
            },
        }
    }

    #[must_use]
    pub fn default_question_count(self) -> u32 {
        self.policy().default_question_count
    }

    #[must_use]
    pub fn time_per_question_secs(self) -> Option<u32> {
        self.policy().time_per_question_secs
    }

    #[must_use]
    pub fn starting_lives(self) -> u32 {
        self.policy().starting_lives
    }

    /// Stable key used for persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Timed => "timed",
            GameMode::SuddenDeath => "sudden_death",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Timed => "Timed",
            GameMode::SuddenDeath => "Sudden Death",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseModeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table_matches_modes() {
        assert_eq!(GameMode::Classic.default_question_count(), 10);
        assert_eq!(GameMode::Classic.time_per_question_secs(), None);
        assert_eq!(GameMode::Classic.starting_lives(), 3);

        assert_eq!(GameMode::Timed.default_question_count(), 10);
        assert_eq!(GameMode::Timed.time_per_question_secs(), Some(15));
        assert_eq!(GameMode::Timed.starting_lives(), 3);

        assert_eq!(GameMode::SuddenDeath.default_question_count(), 15);
        assert_eq!(GameMode::SuddenDeath.time_per_question_secs(), None);
        assert_eq!(GameMode::SuddenDeath.starting_lives(), 1);
    }

    #[test]
    fn storage_keys_parse_back() {
        for mode in GameMode::ALL {
            assert_eq!(mode.as_str().parse::<GameMode>().unwrap(), mode);
        }
        assert!("arcade".parse::<GameMode>().is_err());
    }

    #[test]
    fn titles_are_human_readable() {
        assert_eq!(GameMode::SuddenDeath.to_string(), "Sudden Death");
    }
}
