//! User store: the persistence collaborator behind push/pull/auto-sync.
//!
//! One JSON-file backend for real use and an in-memory backend serving
//! as the read-only-filesystem fallback and as the test double.

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{level_for_points, UserRecord, UserStore};
