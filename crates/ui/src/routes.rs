use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use energy_core::model::ModuleId;

use crate::views::{HomeView, ModuleView, NotFoundView};
use crate::vm::short_name;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/module/:id", ModuleView)] Module { id: String },
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

impl Route {
    #[must_use]
    pub fn module(id: ModuleId) -> Self {
        Route::Module {
            id: id.as_str().to_string(),
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "♻️ Energy Builder" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                for id in ModuleId::ALL {
                    li { key: "{id}", Link { to: Route::module(id), {short_name(id)} } }
                }
            }
        }
    }
}
