mod component;
mod ids;
mod image;
mod module;
mod progress;

pub use component::ComponentRecord;
pub use ids::{ModuleId, ParseModuleIdError, SESSION_KEY_MAX_LEN, SessionKey, SessionKeyError};
pub use image::{ImageRef, ImageRefError};
pub use module::{
    AnalysisSection, AssemblyHint, Difficulty, HintStage, Module, ModuleDraft, ModuleError,
    SpecLine,
};
pub use progress::{
    MAX_TOTAL_SCORE, MODULE_POINTS, ModuleProgress, ProgressError, ProgressState, Rank,
};
