use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::types::UserRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Backend(String),
}

/// Point reads and writes against the user table, keyed by first name.
#[async_trait]
pub trait NicknameStore: Send + Sync {
    /// Absence of a record is `Ok(None)`, not an error.
    async fn fetch(&self, first_name: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Sets the nickname, creating the record when it does not exist.
    async fn upsert(&self, first_name: &str, nickname: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record as-is, including one with no nickname.
    pub fn seed(&self, record: UserRecord) -> Result<(), StoreError> {
        self.lock()?.insert(record.first_name.clone(), record);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, UserRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl NicknameStore for MemoryStore {
    async fn fetch(&self, first_name: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.lock()?.get(first_name).cloned())
    }

    async fn upsert(&self, first_name: &str, nickname: &str) -> Result<(), StoreError> {
        self.lock()?
            .entry(first_name.to_string())
            .or_insert_with(|| UserRecord {
                first_name: first_name.to_string(),
                nickname: None,
            })
            .nickname = Some(nickname.to_string());
        Ok(())
    }
}
