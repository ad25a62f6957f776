//! Workspace session: the single owned container for the live file set,
//! the simulated git state, and the signed-in profile.

mod file;
mod session;

pub use file::{FileData, Language};
pub use session::{Profile, PullOutcome, Session, SessionState, SessionStorage};
