use energy_core::model::{
    AssemblyHint, ComponentRecord, MODULE_POINTS, Module, ModuleId, ModuleProgress, SpecLine,
};
use services::assembly_service::format_order;
use services::{AssetResolver, AssetStatus, Feedback};

use crate::vm::home_vm::stars;
use crate::vm::markdown_vm::markdown_to_html;

/// Either a resolved picture or the notice shown in its place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageVm {
    Picture { src: String, alt: String },
    Placeholder(String),
}

impl ImageVm {
    fn from_status(status: AssetStatus, alt: String) -> Self {
        match status {
            AssetStatus::Available(path) => ImageVm::Picture {
                src: path.display().to_string(),
                alt,
            },
            AssetStatus::Missing { placeholder, .. } => ImageVm::Placeholder(placeholder),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentVm {
    pub name: String,
    pub description: String,
    pub specs: String,
    pub function: String,
    pub image: ImageVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintVm {
    pub stages: Vec<(String, String)>,
    pub flow: String,
    pub retry_tips: Vec<String>,
    pub key_principle: String,
}

impl From<&AssemblyHint> for HintVm {
    fn from(hint: &AssemblyHint) -> Self {
        Self {
            stages: hint
                .stages
                .iter()
                .map(|s| (s.stage.clone(), s.question.clone()))
                .collect(),
            flow: hint.flow.clone(),
            retry_tips: hint.retry_tips.clone(),
            key_principle: hint.key_principle.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisVm {
    pub title: String,
    pub html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavVm {
    pub id: ModuleId,
    pub label: String,
}

/// Everything the module page renders apart from the live assembly draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulePageVm {
    pub id: ModuleId,
    pub heading: String,
    pub task: String,
    pub difficulty_label: String,
    pub score_label: String,
    pub status_label: &'static str,
    pub completed: bool,
    pub specs: Vec<SpecLine>,
    pub overview_image: ImageVm,
    pub components: Vec<ComponentVm>,
    pub hint: HintVm,
    /// Empty until the module is completed.
    pub analysis: Vec<AnalysisVm>,
    pub previous: Option<NavVm>,
    pub next: Option<NavVm>,
}

#[must_use]
pub fn short_name(id: ModuleId) -> &'static str {
    match id {
        ModuleId::Solar => "Solar",
        ModuleId::Wind => "Wind",
        ModuleId::Hydro => "Hydro",
        ModuleId::Biomass => "Biomass",
    }
}

fn component_vm(component: &ComponentRecord, assets: &AssetResolver) -> ComponentVm {
    ComponentVm {
        name: component.name.clone(),
        description: component.description.clone(),
        specs: component.specs.clone(),
        function: component.function.clone(),
        image: ImageVm::from_status(
            assets.component_image(&component.image),
            format!("{} - Technical Diagram", component.name),
        ),
    }
}

#[must_use]
pub fn map_module_page(
    module: &Module,
    progress: ModuleProgress,
    assets: &AssetResolver,
) -> ModulePageVm {
    let id = module.id();
    let analysis = if progress.completed {
        module
            .analysis()
            .iter()
            .map(|section| AnalysisVm {
                title: section.title.clone(),
                html: markdown_to_html(&section.body),
            })
            .collect()
    } else {
        Vec::new()
    };

    ModulePageVm {
        id,
        heading: format!("{} {}", module.icon(), module.title()),
        task: module.task().to_string(),
        difficulty_label: format!(
            "{} {}",
            module.difficulty().label(),
            stars(module.difficulty().stars())
        ),
        score_label: format!("{}/{MODULE_POINTS}", progress.score),
        status_label: if progress.completed {
            "✅ Mastered"
        } else {
            "🎯 Complete assembly to proceed"
        },
        completed: progress.completed,
        specs: module.system_specs().to_vec(),
        overview_image: ImageVm::from_status(
            assets.system_diagram(module.overview_image()),
            format!("{} Overview", module.title()),
        ),
        components: module
            .components()
            .iter()
            .map(|c| component_vm(c, assets))
            .collect(),
        hint: HintVm::from(module.hint()),
        analysis,
        previous: id.previous().map(|prev| NavVm {
            id: prev,
            label: format!("⬅️ Back: {}", short_name(prev)),
        }),
        next: id.next().map(|next| NavVm {
            id: next,
            label: format!("➡️ Next: {}", short_name(next)),
        }),
    }
}

/// Render model of a submission outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackVm {
    Success {
        headline: String,
        steps: Vec<String>,
        mastered: bool,
    },
    Retry {
        submitted: String,
        tips: Vec<String>,
        key_principle: String,
    },
}

#[must_use]
pub fn map_feedback(feedback: &Feedback, module_title: &str) -> FeedbackVm {
    match feedback {
        Feedback::Correct {
            steps,
            all_mastered,
        } => FeedbackVm::Success {
            headline: format!("🎉 Perfect Assembly! You've correctly built the {module_title}!"),
            steps: steps
                .iter()
                .map(|s| format!("{}. {} - {}", s.position, s.component, s.rationale))
                .collect(),
            mastered: *all_mastered,
        },
        Feedback::Incorrect { submitted, hint } => FeedbackVm::Retry {
            submitted: if submitted.is_empty() {
                "(nothing selected)".to_string()
            } else {
                submitted.clone()
            },
            tips: hint.retry_tips.clone(),
            key_principle: hint.key_principle.clone(),
        },
    }
}

/// Ordered selection built from the component palette.
///
/// A component can be picked once; the order of picks is the submitted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssemblyDraft {
    selected: Vec<String>,
}

impl AssemblyDraft {
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.selected.iter().any(|n| n == name)
    }

    /// Append `name` unless it is already part of the draft.
    pub fn pick(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.selected.push(name.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.selected.len() {
            self.selected.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn order_label(&self) -> String {
        if self.selected.is_empty() {
            "No components selected yet".to_string()
        } else {
            format_order(&self.selected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_core::ModuleRegistry;
    use services::{ExplanationStep, assembly_service::ORDER_SEPARATOR};

    fn assets() -> AssetResolver {
        AssetResolver::new("/nonexistent-energy-assets")
    }

    #[test]
    fn fresh_module_page_hides_analysis() {
        let registry = ModuleRegistry::builtin().unwrap();
        let solar = registry.module(ModuleId::Solar);
        let vm = map_module_page(solar, ModuleProgress::default(), &assets());

        assert_eq!(vm.heading, "🔆 Solar PV System");
        assert_eq!(vm.score_label, "0/100");
        assert_eq!(vm.difficulty_label, "Intermediate ⭐⭐⭐");
        assert!(!vm.completed);
        assert!(vm.analysis.is_empty());
        assert_eq!(vm.components.len(), 7);
        assert_eq!(vm.previous, None);
        assert_eq!(vm.next.as_ref().map(|n| n.label.as_str()), Some("➡️ Next: Wind"));
        assert_eq!(
            vm.overview_image,
            ImageVm::Placeholder("Place your diagram here: `images/solar_system.png`".into())
        );
    }

    #[test]
    fn completed_module_unlocks_analysis() {
        let registry = ModuleRegistry::builtin().unwrap();
        let wind = registry.module(ModuleId::Wind);
        let done = ModuleProgress {
            score: 100,
            completed: true,
        };
        let vm = map_module_page(wind, done, &assets());

        assert_eq!(vm.score_label, "100/100");
        assert_eq!(vm.status_label, "✅ Mastered");
        assert_eq!(vm.analysis.len(), 2);
        assert!(vm.analysis[0].html.contains("<h3>"));
        assert_eq!(vm.previous.as_ref().map(|n| n.id), Some(ModuleId::Solar));
        assert_eq!(vm.next.as_ref().map(|n| n.id), Some(ModuleId::Hydro));
    }

    #[test]
    fn component_without_image_shows_notice() {
        let registry = ModuleRegistry::builtin().unwrap();
        let hydro = registry.module(ModuleId::Hydro);
        let vm = map_module_page(hydro, ModuleProgress::default(), &assets());
        let penstock = vm.components.iter().find(|c| c.name == "Penstock").unwrap();
        assert_eq!(
            penstock.image,
            ImageVm::Placeholder("Component image: `images/components/penstock.png`".into())
        );
        assert_eq!(
            vm.next,
            Some(NavVm {
                id: ModuleId::Biomass,
                label: "➡️ Next: Biomass".into()
            })
        );
    }

    #[test]
    fn success_feedback_numbers_steps() {
        let feedback = Feedback::Correct {
            steps: vec![ExplanationStep {
                position: 1,
                component: "Gearbox".into(),
                rationale: "Speed multiplication".into(),
            }],
            all_mastered: true,
        };
        match map_feedback(&feedback, "Wind Energy System") {
            FeedbackVm::Success {
                headline,
                steps,
                mastered,
            } => {
                assert!(headline.contains("Wind Energy System"));
                assert_eq!(steps, vec!["1. Gearbox - Speed multiplication".to_string()]);
                assert!(mastered);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn retry_feedback_marks_empty_submission() {
        let registry = ModuleRegistry::builtin().unwrap();
        let hint = registry.module(ModuleId::Biomass).hint().clone();
        let feedback = Feedback::Incorrect {
            submitted: String::new(),
            hint,
        };
        match map_feedback(&feedback, "Biomass Energy System") {
            FeedbackVm::Retry {
                submitted, tips, ..
            } => {
                assert_eq!(submitted, "(nothing selected)");
                assert_eq!(tips.len(), 4);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn draft_keeps_pick_order_without_duplicates() {
        let mut draft = AssemblyDraft::default();
        assert_eq!(draft.order_label(), "No components selected yet");
        assert!(draft.pick("Main Shaft"));
        assert!(draft.pick("Gearbox"));
        assert!(!draft.pick("Main Shaft"));
        assert_eq!(draft.selected(), ["Main Shaft", "Gearbox"]);
        assert_eq!(
            draft.order_label(),
            format!("Main Shaft{ORDER_SEPARATOR}Gearbox")
        );

        draft.remove(0);
        assert_eq!(draft.selected(), ["Gearbox"]);
        draft.remove(5);
        assert_eq!(draft.selected(), ["Gearbox"]);
        draft.clear();
        assert!(draft.selected().is_empty());
    }
}
