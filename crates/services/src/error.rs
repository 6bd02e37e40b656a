//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trivia_core::model::SettingsError;

/// Errors emitted by `GameService` and `GameHandle`.
///
/// Gameplay itself never fails; these cover lookups and a handle whose game
/// task has already stopped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameServiceError {
    #[error("game session has shut down")]
    Closed,
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
