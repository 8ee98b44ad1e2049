use async_trait::async_trait;
use chrono::{DateTime, Utc};
use energy_core::model::{ModuleId, ModuleProgress, ProgressState, SessionKey};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of one session's progress.
///
/// Mirrors `ProgressState` so adapters can store it without reaching into the
/// domain type's invariants; `into_state` re-validates on the way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub session_key: SessionKey,
    pub modules: Vec<(ModuleId, ModuleProgress)>,
    /// Completed modules in completion order.
    pub completed: Vec<ModuleId>,
    pub total_score: u32,
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(key: &SessionKey, state: &ProgressState, updated_at: DateTime<Utc>) -> Self {
        Self {
            session_key: key.clone(),
            modules: state.modules().collect(),
            completed: state.completed_modules().to_vec(),
            total_score: state.total_score(),
            updated_at,
        }
    }

    /// Convert the record back into a domain `ProgressState`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored values break a
    /// progress invariant.
    pub fn into_state(self) -> Result<ProgressState, StorageError> {
        ProgressState::from_persisted(&self.modules, self.completed, self.total_score)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

/// Session store contract: per-session progress, last write wins.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the progress for a session.
    ///
    /// Unknown sessions yield a fresh `ProgressState`, never `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or holds corrupt data.
    async fn load(&self, key: &SessionKey) -> Result<ProgressState, StorageError>;

    /// Persist the full progress for a session, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be stored. Nothing is
    /// partially written on failure.
    async fn save(
        &self,
        key: &SessionKey,
        state: &ProgressState,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Delete sessions last saved before `cutoff`. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    async fn purge_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionKey, ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self, key: &SessionKey) -> Result<ProgressState, StorageError> {
        let record = {
            let guard = self
                .sessions
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            guard.get(key).cloned()
        };
        match record {
            Some(record) => record.into_state(),
            None => Ok(ProgressState::new()),
        }
    }

    async fn save(
        &self,
        key: &SessionKey,
        state: &ProgressState,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.clone(), ProgressRecord::from_state(key, state, saved_at));
        Ok(())
    }

    async fn purge_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let before = guard.len();
        guard.retain(|_, record| record.updated_at >= cutoff);
        Ok(u64::try_from(before - guard.len()).unwrap_or(u64::MAX))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
