use async_trait::async_trait;
use trivia_core::model::{Difficulty, GameMode, HighScore};

use super::SqliteRepository;
use super::mapping::map_high_score_row;
use crate::repository::{HighScoreRepository, StorageError};

#[async_trait]
impl HighScoreRepository for SqliteRepository {
    async fn get_high_score(
        &self,
        mode: GameMode,
        difficulty: Difficulty,
    ) -> Result<Option<HighScore>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT mode, difficulty, value, recorded_at
                FROM high_scores
                WHERE mode = ?1 AND difficulty = ?2
            ",
        )
        .bind(mode.as_str())
        .bind(difficulty.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_high_score_row).transpose()
    }

    async fn save_high_score(&self, score: &HighScore) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO high_scores (mode, difficulty, value, recorded_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(mode, difficulty) DO UPDATE SET
                    value = excluded.value,
                    recorded_at = excluded.recorded_at
            ",
        )
        .bind(score.mode().as_str())
        .bind(score.difficulty().as_str())
        .bind(i64::from(score.value()))
        .bind(score.recorded_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
