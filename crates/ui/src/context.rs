use std::sync::Arc;

use energy_core::model::SessionKey;
use services::{AssemblyService, AssetResolver, ProgressService};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn session_key(&self) -> SessionKey;

    fn assembly(&self) -> Arc<AssemblyService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn assets(&self) -> Arc<AssetResolver>;
}

#[derive(Clone)]
pub struct AppContext {
    session_key: SessionKey,

    assembly: Arc<AssemblyService>,
    progress: Arc<ProgressService>,
    assets: Arc<AssetResolver>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session_key: app.session_key(),
            assembly: app.assembly(),
            progress: app.progress(),
            assets: app.assets(),
        }
    }

    #[must_use]
    pub fn session_key(&self) -> SessionKey {
        self.session_key.clone()
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

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
