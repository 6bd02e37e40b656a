#![forbid(unsafe_code)]

pub mod question_bank;
pub mod repository;
pub mod sqlite;

pub use question_bank::{BankError, OpenTdbQuestionBank, QuestionSource};
pub use repository::{HighScoreRepository, InMemoryRepository, Storage, StorageError};
