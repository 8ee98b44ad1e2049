use std::path::PathBuf;
use std::sync::Arc;

use energy_core::ModuleRegistry;
use storage::repository::Storage;

use crate::Clock;
use crate::assembly_service::AssemblyService;
use crate::asset_service::AssetResolver;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one store and the built-in registry.
#[derive(Clone)]
pub struct AppServices {
    registry: Arc<ModuleRegistry>,
    assembly: Arc<AssemblyService>,
    progress: Arc<ProgressService>,
    assets: Arc<AssetResolver>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// built-in modules are invalid.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        assets_root: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, assets_root)
    }

    /// Build services over an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Registry` if the built-in modules are invalid.
    pub fn in_memory(clock: Clock, assets_root: impl Into<PathBuf>) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, assets_root)
    }

    /// # Errors
    ///
    /// Returns `AppServicesError::Registry` if the built-in modules are invalid.
    pub fn from_storage(
        storage: Storage,
        clock: Clock,
        assets_root: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let registry = Arc::new(ModuleRegistry::builtin()?);
        let assembly = Arc::new(AssemblyService::new(
            clock,
            Arc::clone(&registry),
            Arc::clone(&storage.progress),
        ));
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&registry),
            Arc::clone(&storage.progress),
        ));
        let assets = Arc::new(AssetResolver::new(assets_root));

        Ok(Self {
            registry,
            assembly,
            progress,
            assets,
        })
    }

    #[must_use]
    pub fn registry(&self) -> Arc<ModuleRegistry> {
        Arc::clone(&self.registry)
    }

    #[must_use]
    pub fn assembly(&self) -> Arc<AssemblyService> {
        Arc::clone(&self.assembly)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn assets(&self) -> Arc<AssetResolver> {
        Arc::clone(&self.assets)
    }
}
