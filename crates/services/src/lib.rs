#![forbid(unsafe_code)]

pub mod error;
pub mod game_service;
pub mod sessions;

pub use trivia_core::Clock;
pub use sessions as session;

pub use error::GameServiceError;
pub use game_service::GameService;

pub use sessions::{GameHandle, SessionBuilder, SessionPlan};
