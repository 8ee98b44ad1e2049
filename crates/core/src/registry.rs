use thiserror::Error;

use crate::catalog;
use crate::model::{ImageRefError, Module, ModuleDraft, ModuleError, ModuleId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("module not found: {0}")]
    NotFound(String),

    #[error("module {0} is defined more than once")]
    DuplicateModule(ModuleId),

    #[error("module {0} is not defined")]
    MissingModule(ModuleId),

    #[error("invalid module {id}: {source}")]
    InvalidModule {
        id: ModuleId,
        #[source]
        source: ModuleError,
    },

    #[error(transparent)]
    Image(#[from] ImageRefError),
}

/// Read-only set of the four energy-system modules.
///
/// Every module is validated when the registry is built, so lookups never
/// re-check the reference order.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    // Indexed by `ModuleId::position`.
    modules: Vec<Module>,
}

impl ModuleRegistry {
    /// Registry with the built-in solar, wind, hydro and biomass modules.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the built-in tables violate a module invariant.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_drafts(catalog::builtin_drafts()?)
    }

    /// Validates drafts and builds a registry holding exactly one module per id.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidModule` for a draft that fails validation,
    /// `DuplicateModule` / `MissingModule` if the id set is not exactly the four
    /// known modules.
    pub fn from_drafts(drafts: Vec<ModuleDraft>) -> Result<Self, RegistryError> {
        let mut slots: Vec<Option<Module>> = vec![None; ModuleId::ALL.len()];
        for draft in drafts {
            let id = draft.id;
            let module = draft
                .validate()
                .map_err(|source| RegistryError::InvalidModule { id, source })?;
            let slot = &mut slots[id.position()];
            if slot.is_some() {
                return Err(RegistryError::DuplicateModule(id));
            }
            *slot = Some(module);
        }

        let mut modules = Vec::with_capacity(slots.len());
        for (id, slot) in ModuleId::ALL.into_iter().zip(slots) {
            modules.push(slot.ok_or(RegistryError::MissingModule(id))?);
        }
        Ok(Self { modules })
    }

    /// Looks a module up by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if `id` is not one of the four known ids.
    pub fn get_module(&self, id: &str) -> Result<&Module, RegistryError> {
        let id: ModuleId = id
            .parse()
            .map_err(|_| RegistryError::NotFound(id.to_string()))?;
        Ok(self.module(id))
    }

    #[must_use]
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.position()]
    }

    /// Modules in curriculum order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registry() -> ModuleRegistry {
        ModuleRegistry::builtin().expect("built-in modules are valid")
    }

    #[test]
    fn builtin_has_four_modules_in_order() {
        let ids: Vec<_> = registry().modules().iter().map(Module::id).collect();
        assert_eq!(ids, ModuleId::ALL.to_vec());
    }

    #[test]
    fn reference_order_is_permutation_of_components() {
        let registry = registry();
        for module in registry.modules() {
            let names: HashSet<_> = module.components().iter().map(|c| c.name.as_str()).collect();
            let order: HashSet<_> = module.reference_order().iter().map(String::as_str).collect();
            assert_eq!(module.reference_order().len(), module.components().len());
            assert_eq!(names, order, "module {}", module.id());
        }
    }

    #[test]
    fn reference_keys_match_curriculum() {
        let registry = registry();
        assert_eq!(
            registry.module(ModuleId::Solar).reference_keys(),
            vec![
                "AntiReflectiveCoating",
                "FrontContactGrid",
                "PNJunction",
                "BackSurfaceField",
                "MPPTController",
                "BatteryStorage",
                "DCACInverter",
            ]
        );
        assert_eq!(
            registry.module(ModuleId::Wind).reference_keys(),
            vec![
                "AerodynamicBlades",
                "HubPitchSystem",
                "MainShaft",
                "Gearbox",
                "DFIGGenerator",
                "PowerElectronics",
                "ControlSystem",
                "Transformer",
            ]
        );
        assert_eq!(
            registry.module(ModuleId::Hydro).reference_keys(),
            vec![
                "DamReservoir",
                "IntakeStructure",
                "Penstock",
                "HydraulicTurbine",
                "SynchronousGenerator",
                "GovernorSystem",
                "ExcitationSystem",
                "StepUpTransformer",
                "ProtectionControl",
            ]
        );
        assert_eq!(
            registry.module(ModuleId::Biomass).reference_keys(),
            vec![
                "FeedstockPreparation",
                "MixingHeating",
                "AnaerobicDigester",
                "GasProcessing",
                "GasEngine",
                "SynchronousGenerator",
                "PLCControlSystem",
                "PowerConditioning",
            ]
        );
    }

    #[test]
    fn get_module_by_string_id() {
        let registry = registry();
        let module = registry.get_module("hydro").unwrap();
        assert_eq!(module.id(), ModuleId::Hydro);
        assert_eq!(module.components().len(), 9);
    }

    #[test]
    fn get_module_unknown_is_not_found() {
        let err = registry().get_module("geothermal").unwrap_err();
        assert_eq!(err, RegistryError::NotFound("geothermal".into()));
    }

    #[test]
    fn from_drafts_rejects_duplicates_and_gaps() {
        let mut drafts = catalog::builtin_drafts().unwrap();
        let extra = drafts[0].clone();
        drafts.push(extra);
        assert_eq!(
            ModuleRegistry::from_drafts(drafts).unwrap_err(),
            RegistryError::DuplicateModule(ModuleId::Solar)
        );

        let mut drafts = catalog::builtin_drafts().unwrap();
        drafts.pop();
        assert_eq!(
            ModuleRegistry::from_drafts(drafts).unwrap_err(),
            RegistryError::MissingModule(ModuleId::Biomass)
        );
    }

    #[test]
    fn from_drafts_reports_invalid_module() {
        let mut drafts = catalog::builtin_drafts().unwrap();
        drafts[1].reference_order.swap_remove(0);
        let err = ModuleRegistry::from_drafts(drafts).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidModule {
                id: ModuleId::Wind,
                source: ModuleError::ExplanationLength { .. } | ModuleError::OrderMissing(_)
            }
        ));
    }
}
