use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::model::{Difficulty, GameMode, HighScore};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for best scores, keyed by (mode, difficulty).
#[async_trait]
pub trait HighScoreRepository: Send + Sync {
    /// Fetch the stored record for a key, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_high_score(
        &self,
        mode: GameMode,
        difficulty: Difficulty,
    ) -> Result<Option<HighScore>, StorageError>;

    /// Store a record, replacing whatever was stored for its key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_high_score(&self, score: &HighScore) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    high_scores: Arc<Mutex<HashMap<(GameMode, Difficulty), HighScore>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            high_scores: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl HighScoreRepository for InMemoryRepository {
    async fn get_high_score(
        &self,
        mode: GameMode,
        difficulty: Difficulty,
    ) -> Result<Option<HighScore>, StorageError> {
        let guard = self
            .high_scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&(mode, difficulty)).cloned())
    }

    async fn save_high_score(&self, score: &HighScore) -> Result<(), StorageError> {
        let mut guard = self
            .high_scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert((score.mode(), score.difficulty()), score.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub high_scores: Arc<dyn HighScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let high_scores: Arc<dyn HighScoreRepository> = Arc::new(InMemoryRepository::new());
        Self { high_scores }
    }
}
