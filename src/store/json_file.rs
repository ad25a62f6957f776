use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::traits::{apply_sync, new_record};
use super::{UserRecord, UserStore};
use crate::error::Error;

/// User store over a single `users.json` file: a JSON array of records,
/// pretty-printed so it stays hand-inspectable, rewritten atomically
/// (temp file + rename) on every mutation.
///
/// No locking and no concurrency token: concurrent writers silently
/// overwrite each other, which is the documented store contract.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (and if necessary create) the store file.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {:?}", parent))?;
        }
        let store = JsonFileStore { path };
        if !store.path.exists() {
            store.write_users(&[])?;
        }
        Ok(store)
    }

    fn read_users(&self) -> Result<Vec<UserRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read user store: {:?}", self.path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse user store: {:?}", self.path))
    }

    fn write_users(&self, users: &[UserRecord]) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(users).context("Failed to serialize user store")?;
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write user store: {:?}", temp_path))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace user store: {:?}", self.path))?;
        Ok(())
    }
}

impl UserStore for JsonFileStore {
    fn signup(&self, name: &str, email: &str) -> Result<UserRecord> {
        let mut users = self.read_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(Error::UserExists(email.to_string()).into());
        }
        let record = new_record(name, email);
        users.push(record.clone());
        self.write_users(&users)?;
        Ok(record)
    }

    fn login(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.read_users()?.into_iter().find(|u| u.email == email))
    }

    fn sync(&self, record: &UserRecord) -> Result<UserRecord> {
        let mut users = self.read_users()?;
        let stored = match users.iter_mut().find(|u| u.email == record.email) {
            Some(stored) => {
                apply_sync(stored, record);
                stored.clone()
            }
            None => {
                // Upsert contract: an unknown identity gets inserted.
                let mut fresh = record.clone();
                if let Some(level) = super::level_for_points(fresh.points) {
                    fresh.level = level.to_string();
                }
                users.push(fresh.clone());
                fresh
            }
        };
        self.write_users(&users)?;
        Ok(stored)
    }
}
