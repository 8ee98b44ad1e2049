use std::sync::Arc;

use serde::Serialize;

use energy_core::{
    ModuleRegistry,
    model::{AssemblyHint, Module, ProgressState, SessionKey},
    scoring::submit_order,
    time::Clock,
};
use storage::repository::ProgressRepository;

use crate::error::AssemblyError;

/// Separator used when echoing a submitted order back to the learner.
pub const ORDER_SEPARATOR: &str = " → ";

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// One line of the post-success walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationStep {
    /// 1-based position in the reference order.
    pub position: usize,
    pub component: String,
    pub rationale: String,
}

/// What the learner sees after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    Correct {
        steps: Vec<ExplanationStep>,
        /// Every module is complete; the session reached the maximum score.
        all_mastered: bool,
    },
    Incorrect {
        submitted: String,
        hint: AssemblyHint,
    },
}

/// Outcome of `AssemblyService::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyResult {
    pub correct: bool,
    pub newly_completed: bool,
    pub progress: ProgressState,
    pub feedback: Feedback,
}

/// Joins a candidate order the way wrong-answer feedback displays it.
#[must_use]
pub fn format_order<S: AsRef<str>>(candidate: &[S]) -> String {
    candidate
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ORDER_SEPARATOR)
}

fn explanation(module: &Module) -> Vec<ExplanationStep> {
    module
        .explanation_steps()
        .enumerate()
        .map(|(idx, (component, rationale))| ExplanationStep {
            position: idx + 1,
            component: component.to_string(),
            rationale: rationale.to_string(),
        })
        .collect()
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Handles one assembly attempt: load progress, score, persist, build feedback.
#[derive(Clone)]
pub struct AssemblyService {
    clock: Clock,
    registry: Arc<ModuleRegistry>,
    progress: Arc<dyn ProgressRepository>,
}

impl AssemblyService {
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

    #[must_use]
    pub fn registry(&self) -> Arc<ModuleRegistry> {
        Arc::clone(&self.registry)
    }

    /// Look up a module by its string id.
    ///
    /// # Errors
    ///
    /// Returns `AssemblyError::UnknownModule` for ids outside the registry.
    pub fn module(&self, module_id: &str) -> Result<&Module, AssemblyError> {
        Ok(self.registry.get_module(module_id)?)
    }

    /// Guidance for a module, available whether or not it has been attempted.
    ///
    /// # Errors
    ///
    /// Returns `AssemblyError::UnknownModule` for ids outside the registry.
    pub fn hint(&self, module_id: &str) -> Result<&AssemblyHint, AssemblyError> {
        Ok(self.module(module_id)?.hint())
    }

    /// Score `candidate` for `module_id` within `session`.
    ///
    /// Progress is written back only when the submission completed the module,
    /// so wrong answers and repeat successes never touch the store.
    ///
    /// # Errors
    ///
    /// Returns `AssemblyError::UnknownModule` for ids outside the registry and
    /// `AssemblyError::Storage` if progress cannot be loaded or saved.
    pub async fn submit<S: AsRef<str> + Sync>(
        &self,
        session: &SessionKey,
        module_id: &str,
        candidate: &[S],
    ) -> Result<AssemblyResult, AssemblyError> {
        let module = self.module(module_id)?;
        let state = self.progress.load(session).await?;
        let outcome = submit_order(module, candidate, state);

        if outcome.newly_completed {
            self.progress
                .save(session, &outcome.state, self.clock.now())
                .await?;
            tracing::info!(
                session = %session,
                module = %module.id(),
                total = outcome.state.total_score(),
                "module completed"
            );
        } else {
            tracing::debug!(
                session = %session,
                module = %module.id(),
                correct = outcome.correct,
                "submission left progress unchanged"
            );
        }

        let feedback = if outcome.correct {
            Feedback::Correct {
                steps: explanation(module),
                all_mastered: outcome.state.all_completed(),
            }
        } else {
            Feedback::Incorrect {
                submitted: format_order(candidate),
                hint: module.hint().clone(),
            }
        };

        Ok(AssemblyResult {
            correct: outcome.correct,
            newly_completed: outcome.newly_completed,
            progress: outcome.state,
            feedback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_order_joins_with_arrows() {
        assert_eq!(format_order(&["Gearbox", "Main Shaft"]), "Gearbox → Main Shaft");
        let empty: [&str; 0] = [];
        assert_eq!(format_order(&empty), "");
    }

    #[test]
    fn explanation_is_numbered_in_reference_order() {
        let registry = ModuleRegistry::builtin().unwrap();
        let wind = registry.get_module("wind").unwrap();
        let steps = explanation(wind);
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0].position, 1);
        assert_eq!(steps[0].component, "Aerodynamic Blades");
        assert_eq!(steps[7].component, "Transformer");
    }
}
