use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::git::GitState;
use crate::workspace::FileData;

/// The persisted user record: profile plus the cloud-saved
/// (files, gitState) tuple. CamelCase keys for compatibility with the
/// playground's stored blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub name: String,
    pub level: String,
    pub points: u32,
    #[serde(default)]
    pub completed_topics: Vec<String>,
    #[serde(default)]
    pub files: Vec<FileData>,
    #[serde(default)]
    pub git_state: Option<GitState>,
}

/// Level earned at a points threshold, if any. Below the lowest
/// threshold the stored level is left as-is.
pub fn level_for_points(points: u32) -> Option<&'static str> {
    if points >= 1500 {
        Some("Architect")
    } else if points >= 800 {
        Some("Engineer")
    } else if points >= 300 {
        Some("Coder")
    } else if points >= 100 {
        Some("Apprentice")
    } else {
        None
    }
}

/// Contract for the user-sync service.
///
/// `sync` is an idempotent upsert keyed by email with no concurrency
/// token: concurrent writers silently overwrite each other, last write
/// wins.
pub trait UserStore {
    /// Create a new record. Fails if the email is already taken.
    fn signup(&self, name: &str, email: &str) -> Result<UserRecord>;

    /// Look up a record by email. `None` means no such user.
    fn login(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Upsert the full record and return the stored form (the level is
    /// recomputed from points on every sync).
    fn sync(&self, record: &UserRecord) -> Result<UserRecord>;

    /// Latest stored record for an identity, used by pull. Defaults to
    /// the login lookup, which is the same query.
    fn fetch_latest(&self, email: &str) -> Result<Option<UserRecord>> {
        self.login(email)
    }
}

/// Fold an incoming record into the stored one, recomputing the level.
pub(super) fn apply_sync(stored: &mut UserRecord, incoming: &UserRecord) {
    stored.name = incoming.name.clone();
    stored.points = incoming.points;
    stored.completed_topics = incoming.completed_topics.clone();
    stored.files = incoming.files.clone();
    stored.git_state = incoming.git_state.clone();
    if let Some(level) = level_for_points(stored.points) {
        stored.level = level.to_string();
    }
}

pub(super) fn new_record(name: &str, email: &str) -> UserRecord {
    UserRecord {
        email: email.to_string(),
        name: name.to_string(),
        level: "Novice".to_string(),
        points: 0,
        completed_topics: Vec::new(),
        files: Vec::new(),
        git_state: None,
    }
}
