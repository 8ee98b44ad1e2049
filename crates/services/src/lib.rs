#![forbid(unsafe_code)]

pub mod app_services;
pub mod assembly_service;
pub mod asset_service;
pub mod error;
pub mod progress_service;

pub use energy_core::Clock;

pub use app_services::AppServices;
pub use assembly_service::{AssemblyResult, AssemblyService, ExplanationStep, Feedback};
pub use asset_service::{AssetResolver, AssetStatus};
pub use error::{AppServicesError, AssemblyError, ProgressServiceError};
pub use progress_service::{ModuleStatus, ProgressOverview, ProgressService};
