use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::model::component::ComponentRecord;
use crate::model::ids::ModuleId;
use crate::model::image::ImageRef;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("module has no components")]
    NoComponents,

    #[error("component name cannot be empty")]
    EmptyComponentName,

    #[error("duplicate component name: {0}")]
    DuplicateComponent(String),

    #[error("duplicate component key: {0}")]
    DuplicateKey(String),

    #[error("reference order lists {0} more than once")]
    OrderDuplicate(String),

    #[error("reference order lists unknown component: {0}")]
    OrderUnknown(String),

    #[error("reference order is missing component: {0}")]
    OrderMissing(String),

    #[error("explanation has {actual} steps, reference order has {expected}")]
    ExplanationLength { expected: usize, actual: usize },
}

//
// ─── SUPPORTING TYPES ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    #[must_use]
    pub fn stars(&self) -> u8 {
        match self {
            Difficulty::Intermediate => 3,
            Difficulty::Advanced => 4,
            Difficulty::Expert => 5,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

/// A label/value row of the system specification box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintStage {
    pub stage: String,
    pub question: String,
}

/// Guidance offered on request and after a wrong submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyHint {
    pub stages: Vec<HintStage>,
    /// One-line mnemonic of the energy flow, e.g. "Wind → Rotation → ...".
    pub flow: String,
    pub retry_tips: Vec<String>,
    pub key_principle: String,
}

/// Unlocked once the module is completed. `body` is markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSection {
    pub title: String,
    pub body: String,
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// Unvalidated module definition.
#[derive(Debug, Clone)]
pub struct ModuleDraft {
    pub id: ModuleId,
    pub title: String,
    pub icon: String,
    pub difficulty: Difficulty,
    pub task: String,
    pub system_specs: Vec<SpecLine>,
    pub overview_image: ImageRef,
    pub components: Vec<ComponentRecord>,
    pub reference_order: Vec<String>,
    /// Rationale for each reference-order step, same length and order.
    pub explanation: Vec<String>,
    pub hint: AssemblyHint,
    pub analysis: Vec<AnalysisSection>,
}

impl ModuleDraft {
    /// Checks the module invariants and freezes the definition.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError` when components are missing or duplicated, or when
    /// the reference order is not a permutation of the component names.
    pub fn validate(self) -> Result<Module, ModuleError> {
        if self.title.trim().is_empty() {
            return Err(ModuleError::EmptyTitle);
        }
        if self.components.is_empty() {
            return Err(ModuleError::NoComponents);
        }

        let mut names = HashSet::with_capacity(self.components.len());
        let mut keys = HashSet::with_capacity(self.components.len());
        for component in &self.components {
            if component.name.trim().is_empty() {
                return Err(ModuleError::EmptyComponentName);
            }
            if !names.insert(component.name.as_str()) {
                return Err(ModuleError::DuplicateComponent(component.name.clone()));
            }
            if !keys.insert(component.key.as_str()) {
                return Err(ModuleError::DuplicateKey(component.key.clone()));
            }
        }

        let mut seen = HashSet::with_capacity(self.reference_order.len());
        for name in &self.reference_order {
            if !names.contains(name.as_str()) {
                return Err(ModuleError::OrderUnknown(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ModuleError::OrderDuplicate(name.clone()));
            }
        }
        if let Some(missing) = self
            .components
            .iter()
            .find(|c| !seen.contains(c.name.as_str()))
        {
            return Err(ModuleError::OrderMissing(missing.name.clone()));
        }

        if self.explanation.len() != self.reference_order.len() {
            return Err(ModuleError::ExplanationLength {
                expected: self.reference_order.len(),
                actual: self.explanation.len(),
            });
        }

        Ok(Module {
            id: self.id,
            title: self.title,
            icon: self.icon,
            difficulty: self.difficulty,
            task: self.task,
            system_specs: self.system_specs,
            overview_image: self.overview_image,
            components: self.components,
            reference_order: self.reference_order,
            explanation: self.explanation,
            hint: self.hint,
            analysis: self.analysis,
        })
    }
}

/// Immutable energy-system module: components plus the one correct assembly order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    id: ModuleId,
    title: String,
    icon: String,
    difficulty: Difficulty,
    task: String,
    system_specs: Vec<SpecLine>,
    overview_image: ImageRef,
    components: Vec<ComponentRecord>,
    reference_order: Vec<String>,
    explanation: Vec<String>,
    hint: AssemblyHint,
    analysis: Vec<AnalysisSection>,
}

impl Module {
    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    #[must_use]
    pub fn system_specs(&self) -> &[SpecLine] {
        &self.system_specs
    }

    #[must_use]
    pub fn overview_image(&self) -> &ImageRef {
        &self.overview_image
    }

    /// Components in palette order (declaration order, not the assembly order).
    #[must_use]
    pub fn components(&self) -> &[ComponentRecord] {
        &self.components
    }

    #[must_use]
    pub fn component(&self, name: &str) -> Option<&ComponentRecord> {
        self.components.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn reference_order(&self) -> &[String] {
        &self.reference_order
    }

    /// Reference order expressed as component keys.
    #[must_use]
    pub fn reference_keys(&self) -> Vec<&str> {
        self.reference_order
            .iter()
            .filter_map(|name| self.component(name))
            .map(|c| c.key.as_str())
            .collect()
    }

    /// `(component name, rationale)` pairs in reference order.
    pub fn explanation_steps(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reference_order
            .iter()
            .map(String::as_str)
            .zip(self.explanation.iter().map(String::as_str))
    }

    #[must_use]
    pub fn hint(&self) -> &AssemblyHint {
        &self.hint
    }

    #[must_use]
    pub fn analysis(&self) -> &[AnalysisSection] {
        &self.analysis
    }
}
