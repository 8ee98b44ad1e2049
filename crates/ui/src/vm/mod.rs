mod home_vm;
mod markdown_vm;
mod module_vm;

pub use home_vm::{
    HomeVm, ModuleCardVm, RankBadgeVm, TechSummaryRow, map_home, status_label, technical_summary,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use module_vm::{
    AnalysisVm, AssemblyDraft, ComponentVm, FeedbackVm, HintVm, ImageVm, ModulePageVm, NavVm,
    map_feedback, map_module_page, short_name,
};
