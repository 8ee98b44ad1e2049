mod home;
mod module;
mod not_found;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use module::ModuleView;
pub use not_found::NotFoundView;
pub use state::{ViewError, ViewState, view_state_from_resource};
