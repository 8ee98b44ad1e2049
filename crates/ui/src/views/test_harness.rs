use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use energy_core::model::SessionKey;
use energy_core::time::fixed_now;
use services::{AppServices, AssemblyService, AssetResolver, Clock, ProgressService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, ModuleView};

#[derive(Clone)]
struct TestApp {
    session: SessionKey,
    services: AppServices,
}

impl UiApp for TestApp {
    fn session_key(&self) -> SessionKey {
        self.session.clone()
    }

    fn assembly(&self) -> Arc<AssemblyService> {
        self.services.assembly()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn assets(&self) -> Arc<AssetResolver> {
        self.services.assets()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Module(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Module(id) => rsx! { ModuleView { id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub session: SessionKey,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and poll until pending resources have resolved.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let services = AppServices::from_storage(
        Storage::in_memory(),
        Clock::fixed(fixed_now()),
        "/nonexistent-energy-assets",
    )
    .expect("built-in modules");
    let session = SessionKey::new("ui-test").expect("session key");

    let app = Arc::new(TestApp {
        session: session.clone(),
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        session,
        services,
    }
}
