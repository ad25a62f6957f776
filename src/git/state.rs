use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::workspace::FileData;

/// Immutable historical record appended by `commit`.
///
/// Serialized shape matches the playground's persisted blobs:
/// camelCase keys, epoch-millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Short random token. Deliberately not content-addressed: two
    /// commits with identical trees get different ids.
    pub id: String,
    pub message: String,
    pub author: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub changes_count: usize,
}

/// The entire simulated repository state for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitState {
    pub is_initialized: bool,
    pub remote_url: Option<String>,
    #[serde(default = "default_branch")]
    pub current_branch: String,
    /// Append-only; insertion order is chronological order.
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// File ids marked for the next commit. Insertion-ordered with set
    /// semantics enforced on stage.
    #[serde(default)]
    pub staged_files: Vec<String>,
    /// Content of each file as of the most recent commit that included it.
    #[serde(default)]
    pub last_committed_content: HashMap<String, String>,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for GitState {
    fn default() -> Self {
        GitState {
            is_initialized: false,
            remote_url: None,
            current_branch: default_branch(),
            commits: Vec::new(),
            staged_files: Vec::new(),
            last_committed_content: HashMap::new(),
        }
    }
}

impl GitState {
    /// Mark the repository as initialized and reset the snapshot map.
    /// Re-init leaves commits and the staged set untouched.
    pub fn initialize(&mut self) {
        self.is_initialized = true;
        self.last_committed_content.clear();
    }

    /// Add a file id to the staged set. Returns false if it was already
    /// staged (silent no-op).
    pub fn stage(&mut self, file_id: &str) -> bool {
        if self.staged_files.iter().any(|id| id == file_id) {
            return false;
        }
        self.staged_files.push(file_id.to_string());
        true
    }

    /// Remove a file id from the staged set. No-ops if absent.
    pub fn unstage(&mut self, file_id: &str) -> bool {
        let before = self.staged_files.len();
        self.staged_files.retain(|id| id != file_id);
        self.staged_files.len() != before
    }

    pub fn is_staged(&self, file_id: &str) -> bool {
        self.staged_files.iter().any(|id| id == file_id)
    }

    /// Unconditionally overwrite the remote identifier. Shorthand
    /// expansion happens in the calling layer, not here.
    pub fn set_remote(&mut self, url: String) {
        self.remote_url = Some(url);
    }

    /// Snapshot every staged file's current content, append a commit
    /// record, and clear the staged set.
    ///
    /// Atomic from the caller's view: on an empty message or empty
    /// staged set nothing happens. A staged id with no live file is
    /// skipped when snapshotting but still counted in `changes_count`.
    pub fn commit(
        &mut self,
        message: &str,
        author: &str,
        files: &[FileData],
    ) -> Result<Commit, Error> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyCommitMessage);
        }
        if self.staged_files.is_empty() {
            return Err(Error::NothingStaged);
        }

        for staged_id in &self.staged_files {
            if let Some(file) = files.iter().find(|f| &f.id == staged_id) {
                self.last_committed_content
                    .insert(staged_id.clone(), file.content.clone());
            }
        }

        let commit = Commit {
            id: short_token(),
            message: message.to_string(),
            author: author.to_string(),
            timestamp: Utc::now(),
            changes_count: self.staged_files.len(),
        };
        self.commits.push(commit.clone());
        self.staged_files.clear();
        Ok(commit)
    }

    /// Drop all tracking state for a deleted file: its staged entry and
    /// its snapshot key. Keeps the staged set free of dangling ids.
    pub fn forget_file(&mut self, file_id: &str) {
        self.staged_files.retain(|id| id != file_id);
        self.last_committed_content.remove(file_id);
    }
}

/// Seven-hex-char random token, the same shape the playground used for
/// commit ids.
fn short_token() -> String {
    let bytes: [u8; 4] = rand::random();
    let mut token = hex::encode(bytes);
    token.truncate(7);
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::{FileData, Language};

    fn file(id: &str, content: &str) -> FileData {
        FileData {
            id: id.to_string(),
            name: format!("{id}.js"),
            language: Language::Javascript,
            content: content.to_string(),
        }
    }

    #[test]
    fn stage_then_unstage_restores_prior_set() {
        let mut git = GitState::default();
        git.initialize();
        assert!(git.stage("1"));
        let before = git.staged_files.clone();
        assert!(git.stage("2"));
        assert!(git.unstage("2"));
        assert_eq!(git.staged_files, before);
    }

    #[test]
    fn stage_is_idempotent() {
        let mut git = GitState::default();
        git.initialize();
        assert!(git.stage("1"));
        assert!(!git.stage("1"));
        assert_eq!(git.staged_files, vec!["1".to_string()]);
    }

    #[test]
    fn commit_snapshots_staged_files_and_clears_stage() {
        let mut git = GitState::default();
        git.initialize();
        git.stage("1");
        git.stage("2");

        let files = vec![file("1", "A"), file("2", "B")];
        let commit = git.commit("init", "alice", &files).unwrap();

        assert_eq!(commit.changes_count, 2);
        assert_eq!(git.commits.len(), 1);
        assert!(git.staged_files.is_empty());
        assert_eq!(git.last_committed_content.get("1"), Some(&"A".to_string()));
        assert_eq!(git.last_committed_content.get("2"), Some(&"B".to_string()));
    }

    #[test]
    fn commit_with_empty_stage_is_a_no_op() {
        let mut git = GitState::default();
        git.initialize();
        let before = git.clone();

        assert!(matches!(
            git.commit("msg", "alice", &[]),
            Err(Error::NothingStaged)
        ));
        assert_eq!(git, before);
    }

    #[test]
    fn commit_with_blank_message_is_a_no_op() {
        let mut git = GitState::default();
        git.initialize();
        git.stage("1");
        let before = git.clone();

        assert!(matches!(
            git.commit("   ", "alice", &[file("1", "A")]),
            Err(Error::EmptyCommitMessage)
        ));
        assert_eq!(git, before);
    }

    #[test]
    fn commit_counts_dangling_staged_ids_but_skips_their_snapshot() {
        let mut git = GitState::default();
        git.initialize();
        git.stage("1");
        git.stage("gone");

        let commit = git.commit("msg", "alice", &[file("1", "A")]).unwrap();
        assert_eq!(commit.changes_count, 2);
        assert!(!git.last_committed_content.contains_key("gone"));
    }

    #[test]
    fn reinit_resets_snapshots_but_keeps_history() {
        let mut git = GitState::default();
        git.initialize();
        git.stage("1");
        git.commit("init", "alice", &[file("1", "A")]).unwrap();
        git.stage("1");

        git.initialize();
        assert_eq!(git.commits.len(), 1);
        assert_eq!(git.staged_files, vec!["1".to_string()]);
        assert!(git.last_committed_content.is_empty());
    }

    #[test]
    fn forget_file_purges_stage_and_snapshot() {
        let mut git = GitState::default();
        git.initialize();
        git.stage("1");
        git.commit("init", "alice", &[file("1", "A")]).unwrap();
        git.stage("1");

        git.forget_file("1");
        assert!(git.staged_files.is_empty());
        assert!(!git.last_committed_content.contains_key("1"));
    }

    #[test]
    fn commit_serializes_with_camel_case_and_epoch_millis() {
        let mut git = GitState::default();
        git.initialize();
        git.stage("1");
        let commit = git.commit("init", "alice", &[file("1", "A")]).unwrap();

        let json: serde_json::Value = serde_json::from_str(
            &serde_json::to_string(&commit).unwrap(),
        )
        .unwrap();
        assert_eq!(json["changesCount"], 1);
        assert!(json["timestamp"].is_i64());
        assert_eq!(json["id"].as_str().unwrap().len(), 7);
    }
}
