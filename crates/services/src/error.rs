//! Shared error types for the services crate.

use thiserror::Error;

use energy_core::RegistryError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AssemblyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssemblyError {
    #[error("unknown module: {0}")]
    UnknownModule(String),
    #[error(transparent)]
    Registry(RegistryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<RegistryError> for AssemblyError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::UnknownModule(id),
            other => Self::Registry(other),
        }
    }
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("time-to-live {0} reaches before the earliest representable date")]
    TtlOutOfRange(chrono::Duration),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_core::model::ModuleId;

    #[test]
    fn only_not_found_becomes_unknown_module() {
        let err = AssemblyError::from(RegistryError::NotFound("tidal".into()));
        assert!(matches!(err, AssemblyError::UnknownModule(ref id) if id == "tidal"));

        let err = AssemblyError::from(RegistryError::MissingModule(ModuleId::Wind));
        assert!(matches!(
            err,
            AssemblyError::Registry(RegistryError::MissingModule(ModuleId::Wind))
        ));
        assert_eq!(err.to_string(), "module wind is not defined");
    }
}
