mod high_score;
mod ids;
mod mode;
mod question;
mod settings;

pub use ids::{ParseIdError, QuestionId};

pub use high_score::{HighScore, HighScorePolicy};
pub use mode::{GameMode, ModePolicy, ParseModeError};
pub use question::{Question, QuestionDraft, QuestionError};
pub use settings::{
    Difficulty, GameSettings, GameSettingsDraft, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT,
    SettingsError,
};
