use sqlx::Row;
use trivia_core::model::{Difficulty, GameMode, HighScore};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn parse_mode(s: &str) -> Result<GameMode, StorageError> {
    s.parse::<GameMode>().map_err(ser)
}

pub(crate) fn parse_difficulty(s: &str) -> Result<Difficulty, StorageError> {
    s.parse::<Difficulty>().map_err(ser)
}

pub(crate) fn value_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid score value: {v}")))
}

pub(crate) fn map_high_score_row(row: &sqlx::sqlite::SqliteRow) -> Result<HighScore, StorageError> {
    let mode = parse_mode(&row.try_get::<String, _>("mode").map_err(ser)?)?;
    let difficulty = parse_difficulty(&row.try_get::<String, _>("difficulty").map_err(ser)?)?;
    let value = value_from_i64(row.try_get::<i64, _>("value").map_err(ser)?)?;
    let recorded_at = row.try_get("recorded_at").map_err(ser)?;

    Ok(HighScore::new(mode, difficulty, value, recorded_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            parse_mode("arcade"),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            parse_difficulty("extreme"),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(parse_mode("sudden_death").unwrap(), GameMode::SuddenDeath);
    }

    #[test]
    fn rejects_negative_values() {
        assert!(value_from_i64(-1).is_err());
        assert_eq!(value_from_i64(12).unwrap(), 12);
    }
}
