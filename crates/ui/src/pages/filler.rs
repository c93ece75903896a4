//! # Filler Page
//!
//! Opens a published form by id or share link and lets the user fill it in.
//!
//! - **Lookup**: paste an id or link, or pick one of the active forms
//! - **Fill**: the form rendered with the dynamic renderer; submitting
//!   stores a submission and shows a thank-you screen
//! - **Edit**: the designer tools applied to the published layout, saved
//!   back in place or as a new configuration

use dioxus::prelude::*;
use formwright_schema::{FormData, PublishedForm};

use crate::components::canvas::Canvas;
use crate::components::inputs::TextInput;
use crate::components::palette::ComponentPalette;
use crate::components::properties::PropertiesPanel;
use crate::components::renderer::DynamicForm;
use crate::state::{APP_STATE, Dialog, StatusLevel};

/// Filler page component
#[component]
pub fn FillerPage() -> Element {
    let state = APP_STATE.read();
    let form = state.filler.form.clone();
    let edit_mode = state.filler.edit_mode;
    let submitted = state.filler.is_submitted();
    drop(state);

    match form {
        None => rsx! { FormLookup {} },
        Some(_) if edit_mode => rsx! { FillerEditor {} },
        Some(form) if submitted => rsx! { ThankYou { title: form.title.clone() } },
        Some(form) => rsx! { FillForm { form } },
    }
}

/// Open the form a reference points at
fn open_reference(reference: &str) {
    let mut state = APP_STATE.write();
    match state.open_published(reference) {
        Ok(()) => {
            let title = state
                .filler
                .form
                .as_ref()
                .map(|f| f.title.clone())
                .unwrap_or_default();
            state.ui.set_status(format!("Opened {}", title), StatusLevel::Info);
        }
        Err(e) => {
            tracing::warn!("Could not open form '{}': {}", reference, e);
            state.ui.set_error(&e);
        }
    }
}

// ============================================================================
// Lookup
// ============================================================================

#[component]
fn FormLookup() -> Element {
    let initial = APP_STATE.read().filler.reference.clone();
    let mut reference = use_signal(|| initial);
    let active: Vec<PublishedForm> = APP_STATE
        .read()
        .repository
        .published_forms()
        .unwrap_or_default()
        .into_iter()
        .filter(|f| f.is_active)
        .collect();

    rsx! {
        div {
            class: "h-full overflow-auto p-8",
            div {
                class: "max-w-xl mx-auto",

                h2 { class: "text-xl font-semibold mb-2", "Fill a Form" }
                p { class: "text-sm text-slate-400 mb-6", "Paste a share link or form id." }

                div {
                    class: "flex items-end gap-2",
                    div {
                        class: "flex-1",
                        TextInput {
                            value: reference.read().clone(),
                            placeholder: Some("http://localhost:8080/form/published_…".to_string()),
                            on_change: move |v| reference.set(v),
                            on_enter: move |v: String| open_reference(&v),
                        }
                    }
                    button {
                        class: "px-4 py-2 rounded bg-indigo-600 hover:bg-indigo-700 text-white text-sm",
                        onclick: move |_| open_reference(&reference.read()),
                        "Open"
                    }
                }

                if !active.is_empty() {
                    h3 { class: "text-sm font-medium text-slate-400 mt-10 mb-3", "Active forms" }
                    div {
                        class: "space-y-2",
                        for form in active {
                            button {
                                key: "{form.id}",
                                class: "w-full text-left px-4 py-3 rounded-lg bg-slate-800 hover:bg-slate-700 border border-slate-700",
                                onclick: {
                                    let id = form.id.clone();
                                    move |_| open_reference(&id)
                                },
                                p { class: "font-medium", "{form.name}" }
                                p { class: "text-xs text-slate-400", "{form.title}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Filling
// ============================================================================

#[component]
fn FillForm(form: PublishedForm) -> Element {
    let handle_submit = move |data: FormData| {
        let mut state = APP_STATE.write();
        match state.submit_filler(data) {
            Ok(submission) => {
                tracing::debug!("Submitted {}", submission.id);
                state.ui.set_status("提交成功", StatusLevel::Success);
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                state.ui.set_error(&e);
            }
        }
    };

    let handle_edit = move |_| {
        let mut state = APP_STATE.write();
        if let Err(e) = state.begin_filler_edit() {
            state.ui.set_error(&e);
        }
    };

    rsx! {
        div {
            class: "h-full overflow-auto p-8",
            div {
                class: "max-w-3xl mx-auto",

                div {
                    class: "flex items-center gap-2 mb-4",
                    span { class: "text-xs text-slate-500 truncate flex-1", "{form.share_url}" }
                    button {
                        class: "px-3 py-1 rounded text-sm text-slate-300 hover:bg-slate-700",
                        onclick: handle_edit,
                        "✏️ Edit layout"
                    }
                    button {
                        class: "px-3 py-1 rounded text-sm text-slate-300 hover:bg-slate-700",
                        onclick: move |_| APP_STATE.write().filler.form = None,
                        "Close"
                    }
                }

                div {
                    class: "rounded-xl bg-white text-slate-800 shadow-xl p-8",
                    h1 { class: "text-2xl font-semibold text-center mb-8", "{form.title}" }

                    if form.is_active {
                        DynamicForm {
                            key: "{form.id}",
                            config: form.config.clone(),
                            on_submit: handle_submit,
                        }
                    } else {
                        p { class: "text-center text-slate-500 py-12", "该表单已停止收集" }
                    }
                }
            }
        }
    }
}

#[component]
fn ThankYou(title: String) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center h-full gap-4",
            p { class: "text-5xl", "✅" }
            h2 { class: "text-xl font-semibold", "提交成功" }
            p { class: "text-slate-400", "感谢您填写《{title}》" }
            div {
                class: "flex gap-3 mt-4",
                button {
                    class: "px-4 py-2 rounded bg-indigo-600 hover:bg-indigo-700 text-white text-sm",
                    onclick: move |_| APP_STATE.write().refill(),
                    "再填一份"
                }
                button {
                    class: "px-4 py-2 rounded bg-slate-700 hover:bg-slate-600 text-sm",
                    onclick: move |_| APP_STATE.write().filler.form = None,
                    "Close"
                }
            }
        }
    }
}

// ============================================================================
// Editing
// ============================================================================

#[component]
fn FillerEditor() -> Element {
    let title = APP_STATE
        .read()
        .filler
        .form
        .as_ref()
        .map(|f| f.name.clone())
        .unwrap_or_default();

    let handle_save = move |_| {
        let mut state = APP_STATE.write();
        match state.save_filler_edit() {
            Ok(form) => state
                .ui
                .set_status(format!("Saved changes to {}", form.name), StatusLevel::Success),
            Err(e) => {
                tracing::warn!("Could not save published form: {}", e);
                state.ui.set_error(&e);
            }
        }
    };

    rsx! {
        div {
            class: "flex flex-col h-full",

            div {
                class: "h-10 flex items-center gap-3 px-4 bg-amber-500/10 border-b border-amber-500/30 text-sm shrink-0",
                span { class: "text-amber-300", "Editing published form: {title}" }
                div { class: "flex-1" }
                button {
                    class: "px-3 py-1 rounded bg-indigo-600 hover:bg-indigo-700 text-white",
                    onclick: handle_save,
                    "Save"
                }
                button {
                    class: "px-3 py-1 rounded bg-slate-700 hover:bg-slate-600",
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::SaveAs),
                    "Save as…"
                }
                button {
                    class: "px-3 py-1 rounded text-slate-300 hover:bg-slate-700",
                    onclick: move |_| APP_STATE.write().cancel_filler_edit(),
                    "Cancel"
                }
            }

            div {
                class: "flex flex-1 overflow-hidden",
                ComponentPalette {}
                Canvas {}
                PropertiesPanel {}
            }
        }
    }
}
