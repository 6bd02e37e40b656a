#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use session::{GameSession, SessionEvent, SessionPhase, SessionSnapshot};
pub use time::Clock;
