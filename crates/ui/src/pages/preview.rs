//! # Preview Page
//!
//! Renders the designer form exactly as a filler would see it. Submitting
//! validates the values and shows them as JSON; nothing is stored.

use dioxus::prelude::*;
use formwright_schema::FormData;

use crate::components::renderer::DynamicForm;
use crate::state::{APP_STATE, Page, StatusLevel};

/// Preview page component
#[component]
pub fn PreviewPage() -> Element {
    let form = APP_STATE.read().form.clone();
    let mut submitted = use_signal(|| None::<String>);

    if form.is_empty() {
        return rsx! {
            div {
                class: "flex flex-col items-center justify-center h-full text-slate-400 gap-4",
                p { class: "text-4xl", "👁️" }
                p { "The form has no fields yet." }
                button {
                    class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 rounded text-white transition-colors",
                    onclick: move |_| APP_STATE.write().ui.navigate(Page::Designer),
                    "Back to Designer"
                }
            }
        };
    }

    // A changed form starts a fresh session
    let form_key = serde_json::to_string(&form).unwrap_or_default();

    let handle_submit = move |data: FormData| {
        match serde_json::to_string_pretty(&data) {
            Ok(json) => submitted.set(Some(json)),
            Err(e) => tracing::warn!("Could not display submitted values: {}", e),
        }
        APP_STATE
            .write()
            .ui
            .set_status("Preview submitted, all fields valid", StatusLevel::Success);
    };

    rsx! {
        div {
            class: "preview-page h-full overflow-auto p-8",

            div {
                class: "max-w-3xl mx-auto",

                div {
                    class: "flex items-center justify-between mb-4",
                    span { class: "text-xs uppercase tracking-wider text-slate-500", "Preview" }
                    button {
                        class: "px-3 py-1 rounded text-sm text-slate-300 hover:bg-slate-700",
                        onclick: move |_| APP_STATE.write().ui.navigate(Page::Designer),
                        "← Back to Designer"
                    }
                }

                div {
                    class: "rounded-xl bg-white text-slate-800 shadow-xl p-8",
                    h1 { class: "text-2xl font-semibold text-center mb-8", "{form.title}" }
                    DynamicForm {
                        key: "{form_key}",
                        config: form.clone(),
                        on_submit: handle_submit,
                        on_invalid: move |_| submitted.set(None),
                    }
                }

                if let Some(json) = submitted.read().as_ref() {
                    div {
                        class: "mt-6 rounded-lg bg-slate-800 border border-slate-700 p-4",
                        h3 { class: "text-sm font-medium text-slate-300 mb-2", "Submitted values" }
                        pre { class: "text-xs font-mono text-emerald-300 whitespace-pre-wrap", "{json}" }
                    }
                }
            }
        }
    }
}
