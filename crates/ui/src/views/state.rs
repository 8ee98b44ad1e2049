use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Progress could not be loaded or saved.
    Storage,
    UnknownModule,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Storage => "Your progress could not be loaded. Please try again.",
            ViewError::UnknownModule => "This energy system does not exist.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.value().read().as_ref() {
        Some(Ok(data)) => ViewState::Ready(data.clone()),
        Some(Err(err)) => ViewState::Error(*err),
        None => ViewState::Loading,
    }
}
