use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AssemblyDraft, ComponentVm, FeedbackVm, HintVm, ImageVm, ModulePageVm, map_feedback,
    map_module_page,
};

#[component]
pub fn ModuleView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    if ctx.assembly().module(&id).is_err() {
        return rsx! {
            div { class: "page",
                p { class: "error", "{ViewError::UnknownModule.message()}" }
                Link { to: Route::Home {}, "Back to the dashboard" }
            }
        };
    }

    // Keyed so that switching modules starts from a clean draft.
    rsx! {
        ModuleScreen { key: "{id}", id: id.clone() }
    }
}

#[component]
fn ModuleScreen(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let assembly = ctx.assembly();
    let session = ctx.session_key();

    let mut draft = use_signal(AssemblyDraft::default);
    let mut show_hint = use_signal(|| false);
    let mut feedback = use_signal(|| None::<FeedbackVm>);
    let mut focused = use_signal(|| 0_usize);
    let mut submitting = use_signal(|| false);
    let mut submit_error = use_signal(|| None::<ViewError>);

    let mut page = {
        let assembly = assembly.clone();
        let progress = ctx.progress();
        let assets = ctx.assets();
        let session = session.clone();
        let id = id.clone();
        use_resource(move || {
            let assembly = assembly.clone();
            let progress = progress.clone();
            let assets = assets.clone();
            let session = session.clone();
            let id = id.clone();
            async move {
                let module = assembly
                    .module(&id)
                    .map_err(|_| ViewError::UnknownModule)?;
                let state = progress
                    .state(&session)
                    .await
                    .map_err(|_| ViewError::Storage)?;
                Ok::<ModulePageVm, ViewError>(map_module_page(
                    module,
                    state.module(module.id()),
                    &assets,
                ))
            }
        })
    };

    let on_submit = move |_| {
        if submitting() {
            return;
        }
        let assembly = assembly.clone();
        let session = session.clone();
        let id = id.clone();
        let candidate = draft.read().selected().to_vec();
        spawn(async move {
            submitting.set(true);
            submit_error.set(None);
            match assembly.submit(&session, &id, &candidate).await {
                Ok(result) => {
                    let title = assembly
                        .module(&id)
                        .map(|m| m.title().to_string())
                        .unwrap_or_default();
                    feedback.set(Some(map_feedback(&result.feedback, &title)));
                    if result.newly_completed {
                        page.restart();
                    }
                }
                Err(_) => submit_error.set(Some(ViewError::Storage)),
            }
            submitting.set(false);
        });
    };

    let state = view_state_from_resource(page);

    match state {
        ViewState::Loading => rsx! {
            div { class: "page", p { "Loading..." } }
        },
        ViewState::Error(err) => rsx! {
            div { class: "page", p { class: "error", "{err.message()}" } }
        },
        ViewState::Ready(vm) => {
            let component = vm
                .components
                .get(focused())
                .or_else(|| vm.components.first())
                .cloned();
            let order_label = draft.read().order_label();
            let selected = draft.read().selected().to_vec();

            rsx! {
                div { class: "page module",
                    header { class: "module-header",
                        h1 { "{vm.heading}" }
                        div { class: "module-stats",
                            span { "Score: {vm.score_label}" }
                            span { "{vm.status_label}" }
                            span { "Difficulty: {vm.difficulty_label}" }
                        }
                    }

                    section { class: "overview",
                        Picture { image: vm.overview_image.clone() }
                        div { class: "specs",
                            h3 { "🔧 System Specifications" }
                            ul {
                                for line in vm.specs.iter() {
                                    li { key: "{line.label}",
                                        strong { "{line.label}: " }
                                        "{line.value}"
                                    }
                                }
                            }
                        }
                    }

                    section { class: "components",
                        h2 { "🧩 Component Analysis" }
                        label { r#for: "component-select", "🔍 Select Component for Detailed Analysis:" }
                        select {
                            id: "component-select",
                            onchange: move |evt: Event<FormData>| {
                                if let Ok(idx) = evt.value().parse::<usize>() {
                                    focused.set(idx);
                                }
                            },
                            for (idx, c) in vm.components.iter().enumerate() {
                                option {
                                    key: "{c.name}",
                                    value: "{idx}",
                                    selected: idx == focused(),
                                    "{c.name}"
                                }
                            }
                        }
                        if let Some(component) = component {
                            ComponentCard { component }
                        }
                    }

                    section { class: "assembly-area",
                        h2 { "🎮 Assembly Challenge" }
                        p { strong { "Task: " } "{vm.task}" }

                        div { class: "palette",
                            for c in vm.components.iter() {
                                button {
                                    key: "{c.name}",
                                    class: "palette-item",
                                    disabled: selected.contains(&c.name),
                                    onclick: {
                                        let name = c.name.clone();
                                        move |_| {
                                            draft.write().pick(&name);
                                        }
                                    },
                                    "{c.name}"
                                }
                            }
                        }

                        ol { class: "selection",
                            for (idx, name) in selected.iter().enumerate() {
                                li { key: "{name}",
                                    "{name} "
                                    button {
                                        class: "remove",
                                        onclick: move |_| draft.write().remove(idx),
                                        "✕"
                                    }
                                }
                            }
                        }
                        p { class: "order", "{order_label}" }

                        div { class: "actions",
                            button {
                                class: "primary",
                                disabled: submitting(),
                                onclick: on_submit,
                                "🚀 Submit Assembly"
                            }
                            button { onclick: move |_| draft.write().clear(), "Clear" }
                            button {
                                onclick: move |_| show_hint.toggle(),
                                if show_hint() { "Hide Hint" } else { "💡 Get Hint" }
                            }
                        }

                        if let Some(err) = submit_error() {
                            p { class: "error", "{err.message()}" }
                        }
                        if show_hint() {
                            HintPanel { hint: vm.hint.clone() }
                        }
                        if let Some(outcome) = feedback() {
                            FeedbackPanel { outcome }
                        }
                    }

                    if !vm.analysis.is_empty() {
                        section { class: "analysis",
                            h2 { "🔬 Advanced Engineering Analysis" }
                            for section in vm.analysis.iter() {
                                details { key: "{section.title}",
                                    summary { "{section.title}" }
                                    div { dangerous_inner_html: "{section.html}" }
                                }
                            }
                        }
                    }

                    nav { class: "module-nav",
                        if let Some(prev) = vm.previous.clone() {
                            Link { to: Route::module(prev.id), "{prev.label}" }
                        }
                        if let Some(next) = vm.next.clone() {
                            Link { to: Route::module(next.id), "{next.label}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Picture(image: ImageVm) -> Element {
    match image {
        ImageVm::Picture { src, alt } => rsx! {
            img { class: "diagram", src: "{src}", alt: "{alt}" }
        },
        ImageVm::Placeholder(notice) => rsx! {
            p { class: "placeholder", "📸 {notice}" }
        },
    }
}

#[component]
fn ComponentCard(component: ComponentVm) -> Element {
    rsx! {
        div { class: "component-card",
            div {
                h3 { "{component.name}" }
                p { strong { "Description: " } "{component.description}" }
                p { strong { "Technical Specs: " } "{component.specs}" }
                p { strong { "Function: " } "{component.function}" }
            }
            Picture { image: component.image.clone() }
        }
    }
}

#[component]
fn HintPanel(hint: HintVm) -> Element {
    rsx! {
        div { class: "hint",
            h3 { "🔍 Assembly Hint" }
            ul {
                for (stage, question) in hint.stages.iter() {
                    li { key: "{stage}", strong { "{stage}: " } "{question}" }
                }
            }
            p { "Think: " strong { "{hint.flow}" } }
        }
    }
}

#[component]
fn FeedbackPanel(outcome: FeedbackVm) -> Element {
    match outcome {
        FeedbackVm::Success {
            headline,
            steps,
            mastered,
        } => rsx! {
            div { class: "correct-answer",
                p { strong { "{headline}" } }
                p { "Explanation:" }
                ul {
                    for step in steps {
                        li { key: "{step}", "{step}" }
                    }
                }
                if mastered {
                    p { class: "celebration",
                        "🏆 Congratulations! You've mastered all renewable energy systems. Total score: 400/400."
                    }
                }
            }
        },
        FeedbackVm::Retry {
            submitted,
            tips,
            key_principle,
        } => rsx! {
            div { class: "wrong-answer",
                p { strong { "❌ Assembly needs adjustment!" } }
                p { strong { "Your order: " } "{submitted}" }
                p { "Hint: Think about the energy conversion chain:" }
                ul {
                    for tip in tips {
                        li { key: "{tip}", "{tip}" }
                    }
                }
                p { strong { "Key principle: " } "{key_principle}" }
            }
        },
    }
}
