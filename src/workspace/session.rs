use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::git::{
    compute_changes, diff_view, expand_remote_url, Commit, DiffView, FileChange, GitState,
};
use crate::store::{UserRecord, UserStore};

use super::FileData;

/// The signed-in user, minus the synced files/git payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: String,
    pub name: String,
    pub level: String,
    pub points: u32,
    #[serde(default)]
    pub completed_topics: Vec<String>,
}

impl From<&UserRecord> for Profile {
    fn from(record: &UserRecord) -> Self {
        Profile {
            email: record.email.clone(),
            name: record.name.clone(),
            level: record.level.clone(),
            points: record.points,
            completed_topics: record.completed_topics.clone(),
        }
    }
}

/// The session tuple persisted to `session.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub user: Option<Profile>,
    #[serde(default)]
    pub files: Vec<FileData>,
    #[serde(default)]
    pub git: GitState,
}

/// Atomic on-disk persistence for the session tuple.
pub struct SessionStorage {
    base_path: PathBuf,
}

impl SessionStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)
            .with_context(|| format!("Failed to create workspace directory: {:?}", base_path))?;
        Ok(SessionStorage { base_path })
    }

    fn state_path(&self) -> PathBuf {
        self.base_path.join("session.json")
    }

    /// Read the current session state. Returns the default state if none
    /// has been written yet.
    pub fn read_state(&self) -> Result<SessionState> {
        let state_path = self.state_path();
        if state_path.exists() {
            let content = fs::read_to_string(&state_path)
                .with_context(|| format!("Failed to read session state: {:?}", state_path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse session state: {:?}", state_path))
        } else {
            Ok(SessionState::default())
        }
    }

    /// Atomically write the session state (temp file + rename).
    pub fn write_state(&self, state: &SessionState) -> Result<()> {
        let state_path = self.state_path();
        let temp_path = self.base_path.join(".session.json.tmp");

        let json = serde_json::to_string_pretty(state).context("Failed to serialize session")?;
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write session state: {:?}", temp_path))?;
        fs::rename(&temp_path, &state_path)
            .with_context(|| format!("Failed to replace session state: {:?}", state_path))?;
        Ok(())
    }
}

/// Result of a pull against the user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// Local files and git state were replaced by the stored record.
    Updated,
    /// No stored record (or none with a git state): nothing to apply.
    UpToDate,
}

/// The one writer for session state. All mutations run to completion and
/// persist before returning; there is no background mutation.
pub struct Session {
    storage: SessionStorage,
    state: SessionState,
}

impl Session {
    pub fn open(storage: SessionStorage) -> Result<Self> {
        let state = storage.read_state()?;
        Ok(Session { storage, state })
    }

    pub fn files(&self) -> &[FileData] {
        &self.state.files
    }

    pub fn git(&self) -> &GitState {
        &self.state.git
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.user.as_ref()
    }

    fn persist(&self) -> Result<()> {
        self.storage.write_state(&self.state)
    }

    fn require_initialized(&self) -> Result<(), Error> {
        if self.state.git.is_initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn require_profile(&self) -> Result<&Profile, Error> {
        self.state.user.as_ref().ok_or(Error::NotSignedIn)
    }

    fn adopt_profile(&mut self, record: &UserRecord) {
        self.state.user = Some(Profile::from(record));
    }

    /// Snapshot of the full synced record, if signed in.
    fn record(&self) -> Option<UserRecord> {
        self.state.user.as_ref().map(|profile| UserRecord {
            email: profile.email.clone(),
            name: profile.name.clone(),
            level: profile.level.clone(),
            points: profile.points,
            completed_topics: profile.completed_topics.clone(),
            files: self.state.files.clone(),
            git_state: Some(self.state.git.clone()),
        })
    }

    // --- auth ---

    pub fn signup<S: UserStore>(&mut self, store: &S, name: &str, email: &str) -> Result<()> {
        let record = store.signup(name, email)?;
        self.adopt_profile(&record);
        self.persist()
    }

    /// Sign in and, when the stored record carries cloud state, adopt it
    /// into the session (the playground restores cloud files at login).
    pub fn login<S: UserStore>(&mut self, store: &S, email: &str) -> Result<()> {
        let record = store
            .login(email)?
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;
        self.adopt_profile(&record);
        if !record.files.is_empty() {
            self.state.files = record.files;
        }
        if let Some(git) = record.git_state {
            self.state.git = git;
        }
        self.persist()
    }

    /// Signing out resets the whole session to its initial value.
    pub fn logout(&mut self) -> Result<()> {
        self.state = SessionState::default();
        self.persist()
    }

    // --- working tree ---

    pub fn upsert_file(&mut self, file: FileData) -> Result<()> {
        match self.state.files.iter_mut().find(|f| f.id == file.id) {
            Some(existing) => *existing = file,
            None => self.state.files.push(file),
        }
        self.persist()
    }

    /// Remove a file and purge its staged entry and snapshot key, so no
    /// dangling ids survive deletion.
    pub fn delete_file(&mut self, file_id: &str) -> Result<()> {
        let before = self.state.files.len();
        self.state.files.retain(|f| f.id != file_id);
        if self.state.files.len() == before {
            return Err(Error::UnknownFile(file_id.to_string()).into());
        }
        self.state.git.forget_file(file_id);
        self.persist()
    }

    // --- simulator operations ---

    pub fn init_repository(&mut self) -> Result<()> {
        self.state.git.initialize();
        self.persist()
    }

    pub fn changes(&self) -> Result<Vec<FileChange<'_>>> {
        self.require_initialized()?;
        Ok(compute_changes(
            &self.state.files,
            &self.state.git.last_committed_content,
        ))
    }

    pub fn stage(&mut self, file_id: &str) -> Result<()> {
        self.require_initialized()?;
        if !self.state.files.iter().any(|f| f.id == file_id) {
            return Err(Error::UnknownFile(file_id.to_string()).into());
        }
        self.state.git.stage(file_id);
        self.persist()
    }

    pub fn unstage(&mut self, file_id: &str) -> Result<()> {
        self.require_initialized()?;
        self.state.git.unstage(file_id);
        self.persist()
    }

    pub fn commit(&mut self, message: &str) -> Result<Commit> {
        self.require_initialized()?;
        let author = self.require_profile()?.name.clone();
        let commit = self.state.git.commit(message, &author, &self.state.files)?;
        self.persist()?;
        Ok(commit)
    }

    pub fn diff(&self, file_id: &str) -> Result<DiffView> {
        self.require_initialized()?;
        let file = self
            .state
            .files
            .iter()
            .find(|f| f.id == file_id)
            .ok_or_else(|| Error::UnknownFile(file_id.to_string()))?;
        Ok(diff_view(file, &self.state.git.last_committed_content))
    }

    /// Store the remote identifier, expanding `owner/repo` shorthand
    /// against the configured host. Returns the stored form.
    pub fn set_remote(&mut self, input: &str, host: &str) -> Result<String> {
        self.require_initialized()?;
        let url = expand_remote_url(input, host);
        self.state.git.set_remote(url.clone());
        self.persist()?;
        Ok(url)
    }

    /// Hand the full record to the store. Local git state is never
    /// modified by a push; a failed sync leaves everything untouched.
    pub fn push<S: UserStore>(&mut self, store: &S) -> Result<()> {
        self.require_initialized()?;
        self.require_profile()?;
        if self.state.git.remote_url.is_none() {
            return Err(Error::NoRemote.into());
        }

        let record = self.record().ok_or(Error::NotSignedIn)?;
        let saved = store.sync(&record)?;
        self.adopt_profile(&saved);
        self.persist()
    }

    /// Fetch the latest stored record and, if it carries a git state,
    /// replace local files and git state wholesale. No merge, no
    /// conflict detection. Failure leaves local state untouched.
    pub fn pull<S: UserStore>(&mut self, store: &S) -> Result<PullOutcome> {
        self.require_initialized()?;
        let email = self.require_profile()?.email.clone();
        if self.state.git.remote_url.is_none() {
            return Err(Error::NoRemote.into());
        }

        let Some(record) = store.fetch_latest(&email)? else {
            return Ok(PullOutcome::UpToDate);
        };
        let Some(git) = record.git_state.clone() else {
            return Ok(PullOutcome::UpToDate);
        };

        self.adopt_profile(&record);
        self.state.files = record.files;
        self.state.git = git;
        self.persist()?;
        Ok(PullOutcome::Updated)
    }

    /// Best-effort sync after a mutation while signed in. Failures are
    /// logged and never surfaced, matching the playground's silent
    /// auto-save. Races with an explicit push are last-write-wins.
    pub fn autosync<S: UserStore>(&mut self, store: &S) {
        let Some(record) = self.record() else {
            return;
        };
        match store.sync(&record) {
            Ok(saved) => {
                self.adopt_profile(&saved);
                if let Err(e) = self.persist() {
                    tracing::warn!("failed to persist session after auto-sync: {e:#}");
                }
            }
            Err(e) => tracing::warn!("auto-sync failed: {e:#}"),
        }
    }
}
