use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HomeVm, ModuleCardVm, map_home, technical_summary};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let session = ctx.session_key();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let session = session.clone();
        async move {
            let overview = progress
                .overview(&session)
                .await
                .map_err(|_| ViewError::Storage)?;
            Ok::<HomeVm, ViewError>(map_home(&overview))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page home",
            h1 { class: "main-header", "♻️ Sustainable Energy Builder" }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    Dashboard { vm }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            details { class: "tech-summary",
                summary { "📊 Technical Specifications Summary" }
                table {
                    thead {
                        tr {
                            th { "System" }
                            th { "Typical Power" }
                            th { "Efficiency" }
                            th { "Capacity Factor" }
                            th { "LCOE ($/MWh)" }
                        }
                    }
                    tbody {
                        for row in technical_summary() {
                            tr { key: "{row.system}",
                                td { "{row.system}" }
                                td { "{row.typical_power}" }
                                td { "{row.efficiency}" }
                                td { "{row.capacity_factor}" }
                                td { "{row.lcoe}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Dashboard(vm: HomeVm) -> Element {
    rsx! {
        section { class: "stats-box",
            p { "Total Score: {vm.score_label}" }
            p { "Systems Completed: {vm.systems_label}" }
            p { "Progress: {vm.progress_label}" }
            progress { max: "100", value: "{vm.progress_percent}" }
            if let Some(rank) = vm.rank {
                p { class: "rank-badge", "{rank.icon} {rank.title}!" }
            }
        }

        h2 { "🔋 Available Energy Systems" }
        div { class: "module-grid",
            for card in vm.cards {
                ModuleCard { key: "{card.id}", card }
            }
        }
    }
}

#[component]
fn ModuleCard(card: ModuleCardVm) -> Element {
    let class = if card.completed { "energy-option completed" } else { "energy-option" };
    rsx! {
        Link { class: "{class}", to: Route::module(card.id),
            h3 { "{card.icon} {card.title}" }
            p { class: "stars", "{card.stars}" }
            p { strong { "{card.status_label}" } }
        }
    }
}
