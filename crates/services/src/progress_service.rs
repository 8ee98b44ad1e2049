use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use energy_core::{
    ModuleRegistry,
    model::{Difficulty, MAX_TOTAL_SCORE, ModuleId, ProgressState, Rank, SessionKey},
    time::Clock,
};
use storage::repository::ProgressRepository;

use crate::error::ProgressServiceError;

/// Per-module row of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    pub id: ModuleId,
    pub title: String,
    pub icon: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub completed: bool,
}

/// Session-wide summary shown on the dashboard and by `app progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressOverview {
    pub session: String,
    pub total_score: u32,
    pub max_score: u32,
    pub completed_count: usize,
    pub module_count: usize,
    /// 0..=100.
    pub completion_rate: u32,
    pub rank: Option<Rank>,
    pub modules: Vec<ModuleStatus>,
}

impl ProgressOverview {
    #[must_use]
    pub fn from_state(session: &SessionKey, registry: &ModuleRegistry, state: &ProgressState) -> Self {
        let modules = registry
            .modules()
            .iter()
            .map(|module| {
                let progress = state.module(module.id());
                ModuleStatus {
                    id: module.id(),
                    title: module.title().to_string(),
                    icon: module.icon().to_string(),
                    difficulty: module.difficulty(),
                    score: progress.score,
                    completed: progress.completed,
                }
            })
            .collect::<Vec<_>>();

        Self {
            session: session.to_string(),
            total_score: state.total_score(),
            max_score: MAX_TOTAL_SCORE,
            completed_count: state.completed_count(),
            module_count: modules.len(),
            completion_rate: state.completion_rate(),
            rank: state.rank(),
            modules,
        }
    }

    /// Pretty JSON for the command line.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ProgressServiceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Read-side of session progress plus expiry housekeeping.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    registry: Arc<ModuleRegistry>,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        registry: Arc<ModuleRegistry>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            registry,
            progress,
        }
    }

    /// Current progress of a session; fresh when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store fails.
    pub async fn state(&self, session: &SessionKey) -> Result<ProgressState, ProgressServiceError> {
        Ok(self.progress.load(session).await?)
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store fails.
    pub async fn overview(
        &self,
        session: &SessionKey,
    ) -> Result<ProgressOverview, ProgressServiceError> {
        let state = self.state(session).await?;
        Ok(ProgressOverview::from_state(session, &self.registry, &state))
    }

    /// Delete sessions untouched for longer than `ttl`. Returns how many went.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::TtlOutOfRange` if `ttl` reaches past the
    /// representable date range, or `ProgressServiceError::Storage` if the
    /// store fails.
    pub async fn purge_expired(&self, ttl: Duration) -> Result<u64, ProgressServiceError> {
        let cutoff = self
            .clock
            .cutoff(ttl)
            .ok_or(ProgressServiceError::TtlOutOfRange(ttl))?;
        let removed = self.progress.purge_stale(cutoff).await?;
        if removed > 0 {
            tracing::info!(removed, %cutoff, "expired sessions removed");
        }
        Ok(removed)
    }
}
