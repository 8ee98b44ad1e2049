use thiserror::Error;

use crate::model::{ImageRefError, ModuleError, ProgressError, SessionKeyError};
use crate::registry::RegistryError;

/// Umbrella error for callers that do not care which core check failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    SessionKey(#[from] SessionKeyError),
    #[error(transparent)]
    Image(#[from] ImageRefError),
}
