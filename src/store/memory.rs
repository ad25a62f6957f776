use std::sync::Mutex;

use anyhow::{anyhow, Result};

use super::traits::{apply_sync, new_record};
use super::{level_for_points, UserRecord, UserStore};
use crate::error::Error;

/// In-memory user store. Nothing survives the process; useful on
/// read-only filesystems and for tests.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn with_users<T>(&self, f: impl FnOnce(&mut Vec<UserRecord>) -> T) -> Result<T> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| anyhow!("user store mutex poisoned"))?;
        Ok(f(&mut users))
    }
}

impl UserStore for MemoryStore {
    fn signup(&self, name: &str, email: &str) -> Result<UserRecord> {
        self.with_users(|users| {
            if users.iter().any(|u| u.email == email) {
                return Err(Error::UserExists(email.to_string()).into());
            }
            let record = new_record(name, email);
            users.push(record.clone());
            Ok(record)
        })?
    }

    fn login(&self, email: &str) -> Result<Option<UserRecord>> {
        self.with_users(|users| users.iter().find(|u| u.email == email).cloned())
    }

    fn sync(&self, record: &UserRecord) -> Result<UserRecord> {
        self.with_users(|users| match users.iter_mut().find(|u| u.email == record.email) {
            Some(stored) => {
                apply_sync(stored, record);
                stored.clone()
            }
            None => {
                let mut fresh = record.clone();
                if let Some(level) = level_for_points(fresh.points) {
                    fresh.level = level.to_string();
                }
                users.push(fresh.clone());
                fresh
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_the_file_store() {
        let store = MemoryStore::new();
        let mut record = store.signup("Alice", "alice@example.com").unwrap();
        assert!(store.signup("Dup", "alice@example.com").is_err());

        record.points = 400;
        let saved = store.sync(&record).unwrap();
        assert_eq!(saved.level, "Coder");
        assert_eq!(
            store.fetch_latest("alice@example.com").unwrap().unwrap(),
            saved
        );
    }
}
