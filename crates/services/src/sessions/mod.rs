mod actor;
mod plan;

// Public API of the session subsystem.
pub use actor::GameHandle;
pub use plan::{SessionBuilder, SessionPlan};

pub(crate) use actor::GameActor;
pub(crate) use plan::load_plan;
