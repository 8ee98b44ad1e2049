//! Assembly scoring.
//!
//! A submission is correct only when it equals the module's reference order
//! element for element: same length, same names, same positions. There is no
//! partial credit and no normalisation of names.

use crate::model::{Module, ProgressState};

/// Result of evaluating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub correct: bool,
    /// True only when this submission moved the module into `Completed`.
    pub newly_completed: bool,
    pub state: ProgressState,
}

/// Exact sequence equality between a candidate and a reference order.
#[must_use]
pub fn is_exact_match<S: AsRef<str>>(reference: &[String], candidate: &[S]) -> bool {
    reference.len() == candidate.len()
        && reference
            .iter()
            .zip(candidate)
            .all(|(expected, got)| expected.as_str() == got.as_ref())
}

/// Scores `candidate` against `module` and returns the resulting state.
///
/// A correct order completes the module the first time and leaves the state
/// untouched afterwards; a wrong order never changes the state. Wrong answers
/// are a normal outcome, not an error.
#[must_use]
pub fn submit_order<S: AsRef<str>>(
    module: &Module,
    candidate: &[S],
    state: ProgressState,
) -> Submission {
    if !is_exact_match(module.reference_order(), candidate) {
        return Submission {
            correct: false,
            newly_completed: false,
            state,
        };
    }

    let mut state = state;
    let newly_completed = state.complete(module.id());
    Submission {
        correct: true,
        newly_completed,
        state,
    }
}
