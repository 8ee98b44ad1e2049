use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ModuleId;

/// Points awarded for completing one module.
pub const MODULE_POINTS: u32 = 100;

/// Highest reachable total score.
pub const MAX_TOTAL_SCORE: u32 = MODULE_POINTS * ModuleId::ALL.len() as u32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("score for {module} must be 0 or {MODULE_POINTS}, got {score}")]
    InvalidScore { module: ModuleId, score: u32 },

    #[error("{module} is listed as completed more than once")]
    DuplicateCompletion { module: ModuleId },

    #[error("{module} completion flag disagrees with its score")]
    FlagMismatch { module: ModuleId },

    #[error("total score {total} does not match {completed} completed modules")]
    TotalMismatch { total: u32, completed: usize },
}

/// Per-module slice of the progress state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProgress {
    pub score: u32,
    pub completed: bool,
}

/// Badge earned from the number of completed modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rank {
    CleanEnergyExplorer,
    RenewableEnergySpecialist,
    AdvancedEnergyEngineer,
    EnergySystemsExpert,
}

impl Rank {
    #[must_use]
    pub fn for_completed(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Rank::CleanEnergyExplorer),
            2 => Some(Rank::RenewableEnergySpecialist),
            3 => Some(Rank::AdvancedEnergyEngineer),
            _ => Some(Rank::EnergySystemsExpert),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Rank::CleanEnergyExplorer => "Clean Energy Explorer",
            Rank::RenewableEnergySpecialist => "Renewable Energy Specialist",
            Rank::AdvancedEnergyEngineer => "Advanced Energy Engineer",
            Rank::EnergySystemsExpert => "Energy Systems Expert",
        }
    }
}

/// Scores and completion flags of one session.
///
/// Invariants:
/// - a module's score is `MODULE_POINTS` iff it is completed, else 0;
/// - `completed_modules` holds each completed module once, in completion order;
/// - `total_score == MODULE_POINTS * completed_modules.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    modules: BTreeMap<ModuleId, ModuleProgress>,
    completed_modules: Vec<ModuleId>,
    total_score: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    /// Fresh state: every module at 0 and not completed.
    #[must_use]
    pub fn new() -> Self {
        let modules = ModuleId::ALL
            .iter()
            .map(|id| (*id, ModuleProgress::default()))
            .collect();
        Self {
            modules,
            completed_modules: Vec::new(),
            total_score: 0,
        }
    }

    /// Rehydrate a state from persisted storage.
    ///
    /// Modules absent from `modules` are treated as not started.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if scores, flags, the completed list, or the
    /// total disagree with each other.
    pub fn from_persisted(
        modules: &[(ModuleId, ModuleProgress)],
        completed_modules: Vec<ModuleId>,
        total_score: u32,
    ) -> Result<Self, ProgressError> {
        let mut state = Self::new();
        for (id, progress) in modules {
            if progress.score != 0 && progress.score != MODULE_POINTS {
                return Err(ProgressError::InvalidScore {
                    module: *id,
                    score: progress.score,
                });
            }
            if progress.completed != (progress.score == MODULE_POINTS) {
                return Err(ProgressError::FlagMismatch { module: *id });
            }
            state.modules.insert(*id, *progress);
        }

        for (idx, id) in completed_modules.iter().enumerate() {
            if completed_modules[..idx].contains(id) {
                return Err(ProgressError::DuplicateCompletion { module: *id });
            }
            if !state.is_completed(*id) {
                return Err(ProgressError::FlagMismatch { module: *id });
            }
        }
        let flagged = state.modules.values().filter(|p| p.completed).count();
        if let Some((id, _)) = state
            .modules
            .iter()
            .find(|(id, p)| p.completed && !completed_modules.contains(*id))
        {
            return Err(ProgressError::FlagMismatch { module: *id });
        }

        let expected = points_for(flagged);
        if total_score != expected {
            return Err(ProgressError::TotalMismatch {
                total: total_score,
                completed: flagged,
            });
        }

        state.completed_modules = completed_modules;
        state.total_score = total_score;
        Ok(state)
    }

    #[must_use]
    pub fn module(&self, id: ModuleId) -> ModuleProgress {
        self.modules.get(&id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn score(&self, id: ModuleId) -> u32 {
        self.module(id).score
    }

    #[must_use]
    pub fn is_completed(&self, id: ModuleId) -> bool {
        self.module(id).completed
    }

    /// Per-module entries in curriculum order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, ModuleProgress)> + '_ {
        self.modules.iter().map(|(id, p)| (*id, *p))
    }

    /// Completed modules in the order they were completed.
    #[must_use]
    pub fn completed_modules(&self) -> &[ModuleId] {
        &self.completed_modules
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_modules.len()
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.completed_count() == ModuleId::ALL.len()
    }

    /// Share of completed modules, 0..=100.
    #[must_use]
    pub fn completion_rate(&self) -> u32 {
        points_for(self.completed_count()) * 100 / MAX_TOTAL_SCORE
    }

    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        Rank::for_completed(self.completed_count())
    }

    /// Marks a module completed. Returns `false` (and changes nothing) if it
    /// already was.
    pub(crate) fn complete(&mut self, id: ModuleId) -> bool {
        if self.is_completed(id) {
            return false;
        }
        self.modules.insert(
            id,
            ModuleProgress {
                score: MODULE_POINTS,
                completed: true,
            },
        );
        self.completed_modules.push(id);
        self.total_score = self.total_score.saturating_add(MODULE_POINTS);
        true
    }
}

fn points_for(completed: usize) -> u32 {
    u32::try_from(completed)
        .unwrap_or(u32::MAX)
        .saturating_mul(MODULE_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_empty() {
        let state = ProgressState::new();
        assert_eq!(state.total_score(), 0);
        assert!(state.completed_modules().is_empty());
        for id in ModuleId::ALL {
            assert_eq!(state.score(id), 0);
            assert!(!state.is_completed(id));
        }
        assert_eq!(state.rank(), None);
        assert_eq!(state.completion_rate(), 0);
    }

    #[test]
    fn complete_is_idempotent() {
        let mut state = ProgressState::new();
        assert!(state.complete(ModuleId::Hydro));
        assert!(!state.complete(ModuleId::Hydro));
        assert_eq!(state.total_score(), 100);
        assert_eq!(state.completed_modules(), [ModuleId::Hydro]);
        assert_eq!(state.completion_rate(), 25);
    }

    #[test]
    fn rank_follows_completed_count() {
        assert_eq!(Rank::for_completed(0), None);
        assert_eq!(Rank::for_completed(1), Some(Rank::CleanEnergyExplorer));
        assert_eq!(Rank::for_completed(2), Some(Rank::RenewableEnergySpecialist));
        assert_eq!(Rank::for_completed(3), Some(Rank::AdvancedEnergyEngineer));
        assert_eq!(Rank::for_completed(4), Some(Rank::EnergySystemsExpert));
    }

    #[test]
    fn from_persisted_round_trips() {
        let mut state = ProgressState::new();
        state.complete(ModuleId::Wind);
        state.complete(ModuleId::Solar);

        let modules: Vec<_> = state.modules().collect();
        let restored = ProgressState::from_persisted(
            &modules,
            state.completed_modules().to_vec(),
            state.total_score(),
        )
        .unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn from_persisted_rejects_total_mismatch() {
        let done = ModuleProgress {
            score: 100,
            completed: true,
        };
        let err =
            ProgressState::from_persisted(&[(ModuleId::Wind, done)], vec![ModuleId::Wind], 200)
                .unwrap_err();
        assert_eq!(
            err,
            ProgressError::TotalMismatch {
                total: 200,
                completed: 1
            }
        );
    }

    #[test]
    fn from_persisted_rejects_partial_score() {
        let half = ModuleProgress {
            score: 50,
            completed: false,
        };
        let err = ProgressState::from_persisted(&[(ModuleId::Solar, half)], vec![], 0).unwrap_err();
        assert_eq!(
            err,
            ProgressError::InvalidScore {
                module: ModuleId::Solar,
                score: 50
            }
        );
    }

    #[test]
    fn from_persisted_rejects_unlisted_completion() {
        let done = ModuleProgress {
            score: 100,
            completed: true,
        };
        let err =
            ProgressState::from_persisted(&[(ModuleId::Biomass, done)], vec![], 100).unwrap_err();
        assert_eq!(
            err,
            ProgressError::FlagMismatch {
                module: ModuleId::Biomass
            }
        );
    }

    #[test]
    fn from_persisted_rejects_duplicate_completion() {
        let done = ModuleProgress {
            score: 100,
            completed: true,
        };
        let err = ProgressState::from_persisted(
            &[(ModuleId::Wind, done)],
            vec![ModuleId::Wind, ModuleId::Wind],
            200,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProgressError::DuplicateCompletion {
                module: ModuleId::Wind
            }
        );
    }
}
