//! Simulated version control core
//!
//! Owns the per-session `GitState` and the pure change classifier that
//! compares the live file set against the last-committed snapshots. Push
//! and pull live on the session, since they need the whole
//! (profile, files, git) tuple.

mod changes;
mod remote;
mod state;

pub use changes::{compute_changes, diff_view, ChangeType, DiffView, FileChange};
pub use remote::expand_remote_url;
pub use state::{Commit, GitState};
