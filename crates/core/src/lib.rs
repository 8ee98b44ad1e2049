#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod registry;
pub mod scoring;
pub mod time;

pub use error::Error;
pub use registry::{ModuleRegistry, RegistryError};
pub use scoring::{Submission, is_exact_match, submit_order};
pub use time::Clock;
