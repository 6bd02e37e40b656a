use std::sync::Arc;

use storage::repository::{HighScoreRepository, Storage};
use storage::QuestionSource;
use tracing::info;
use trivia_core::model::{
    Difficulty, GameMode, GameSettings, GameSettingsDraft, HighScore, HighScorePolicy,
};
use trivia_core::GameSession;

use crate::error::GameServiceError;
use crate::sessions::{GameActor, GameHandle, load_plan};
use crate::Clock;

/// Entry point for starting games and reading best scores.
#[derive(Clone)]
pub struct GameService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    high_scores: Arc<dyn HighScoreRepository>,
    policy: HighScorePolicy,
    shuffle: bool,
}

impl GameService {
    #[must_use]
    pub fn new(
        source: Arc<dyn QuestionSource>,
        high_scores: Arc<dyn HighScoreRepository>,
    ) -> Self {
        Self {
            clock: Clock::default(),
            source,
            high_scores,
            policy: HighScorePolicy::default(),
            shuffle: true,
        }
    }

    /// Build a service whose high scores live in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Sqlite` if the database cannot be opened or migrated.
    pub async fn sqlite(
        source: Arc<dyn QuestionSource>,
        database_url: &str,
    ) -> Result<Self, GameServiceError> {
        let storage = Storage::sqlite(database_url).await?;
        Ok(Self::new(source, storage.high_scores))
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Choose how finished games update the stored best score.
    #[must_use]
    pub fn with_policy(mut self, policy: HighScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable shuffling the pool before each game.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Load questions and start a game with `settings`.
    ///
    /// A source that yields nothing produces a game that is already over.
    /// Must be called from within a tokio runtime.
    pub async fn start_game(&self, settings: GameSettings) -> GameHandle {
        let plan = load_plan(self.source.as_ref(), &settings, self.shuffle).await;
        info!(
            mode = %settings.mode(),
            difficulty = %settings.difficulty(),
            selected = plan.total(),
            available = plan.available,
            "starting game"
        );

        let mut session = GameSession::new(settings);
        let events = session.start(plan.questions);

        GameActor::new(session, Arc::clone(&self.source), Arc::clone(&self.high_scores))
            .with_policy(self.policy)
            .with_clock(self.clock)
            .with_shuffle(self.shuffle)
            .spawn(events)
    }

    /// Validate player-entered settings and start a game.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Settings` if the draft is invalid.
    pub async fn start_game_from_draft(
        &self,
        draft: GameSettingsDraft,
    ) -> Result<GameHandle, GameServiceError> {
        let settings = draft.validate()?;
        Ok(self.start_game(settings).await)
    }

    /// Stored best score for a (mode, difficulty) pair.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Storage` if the store cannot be read.
    pub async fn high_score(
        &self,
        mode: GameMode,
        difficulty: Difficulty,
    ) -> Result<Option<HighScore>, GameServiceError> {
        Ok(self.high_scores.get_high_score(mode, difficulty).await?)
    }
}
