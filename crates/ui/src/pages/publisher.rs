//! # Publisher Page
//!
//! Manages saved configurations and the forms published from them.
//!
//! ## Layout
//!
//! ```text
//! ┌───────────────────────────────┬─────────────────────────────┐
//! │ Saved Configurations          │ Publish                     │
//! │  name · fields · updated      │  [config ▾] [name] Publish  │
//! │  [Load] [Delete]              ├─────────────────────────────┤
//! │                               │ Published Forms             │
//! │                               │  share link · counts        │
//! │                               │  [Copy] [Open] [Delete]     │
//! └───────────────────────────────┴─────────────────────────────┘
//! ```

use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;
use formwright_schema::{PublishedForm, SavedConfig, Submission};

use crate::components::inputs::{Select, SelectOption, TextInput, Toggle};
use crate::state::{APP_STATE, DeleteTarget, Dialog, StatusLevel};

/// Format a stored timestamp for display
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Copy text to the system clipboard through the webview
pub fn copy_to_clipboard(text: String) {
    let literal = match serde_json::to_string(&text) {
        Ok(literal) => literal,
        Err(e) => {
            tracing::warn!("Could not quote clipboard text: {}", e);
            return;
        }
    };
    spawn(async move {
        let script = format!("await navigator.clipboard.writeText({literal}); return true;");
        match document::eval(&script).await {
            Ok(_) => APP_STATE
                .write()
                .ui
                .set_status("Link copied to clipboard", StatusLevel::Success),
            Err(e) => {
                tracing::warn!("Clipboard write failed: {:?}", e);
                APP_STATE
                    .write()
                    .ui
                    .set_status(format!("Could not copy, link: {}", text), StatusLevel::Warning);
            }
        }
    });
}

/// Publisher page component
#[component]
pub fn PublisherPage() -> Element {
    let state = APP_STATE.read();
    let configs = state.repository.configs();
    let published = state.repository.published_forms();
    let submissions = state.repository.submissions();
    drop(state);

    let (configs, published, submissions) = match (configs, published, submissions) {
        (Ok(c), Ok(p), Ok(s)) => (c, p, s),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            tracing::error!("Could not read storage: {}", e);
            return rsx! {
                div {
                    class: "p-8 text-red-300",
                    "Could not read saved forms: {e}"
                }
            };
        }
    };

    rsx! {
        div {
            class: "publisher-page h-full overflow-auto p-6",

            div {
                class: "grid grid-cols-1 xl:grid-cols-2 gap-6 max-w-7xl mx-auto",

                section {
                    h2 { class: "text-lg font-semibold mb-4", "Saved Configurations" }
                    if configs.is_empty() {
                        EmptyNotice { text: "No saved configurations. Save the designer form to see it here." }
                    }
                    div {
                        class: "space-y-3",
                        for config in configs.iter() {
                            SavedConfigRow { key: "{config.id}", config: config.clone() }
                        }
                    }
                }

                section {
                    PublishForm { configs: configs.clone() }

                    h2 { class: "text-lg font-semibold mt-8 mb-4", "Published Forms" }
                    if published.is_empty() {
                        EmptyNotice { text: "Nothing published yet." }
                    }
                    div {
                        class: "space-y-3",
                        for form in published.iter() {
                            PublishedRow {
                                key: "{form.id}",
                                form: form.clone(),
                                submissions: submissions
                                    .iter()
                                    .filter(|s| s.form_id == form.id)
                                    .cloned()
                                    .collect::<Vec<_>>(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EmptyNotice(text: &'static str) -> Element {
    rsx! {
        p {
            class: "p-6 rounded-lg border border-dashed border-slate-700 text-sm text-slate-500 text-center",
            "{text}"
        }
    }
}

// ============================================================================
// Saved configurations
// ============================================================================

#[component]
fn SavedConfigRow(config: SavedConfig) -> Element {
    let load_id = config.id.clone();
    let delete_id = config.id.clone();
    let updated = format_time(&config.update_time);
    let field_count = config.field_count();

    rsx! {
        div {
            class: "flex items-center gap-4 p-4 rounded-lg bg-slate-800 border border-slate-700",

            div {
                class: "flex-1 min-w-0",
                p { class: "font-medium truncate", "{config.name}" }
                p { class: "text-xs text-slate-400 mt-1", "{config.config.title} · {field_count} fields · updated {updated}" }
            }

            button {
                class: "px-3 py-1.5 rounded text-sm bg-slate-700 hover:bg-slate-600",
                onclick: move |_| {
                    let mut state = APP_STATE.write();
                    match state.load_config(&load_id) {
                        Ok(()) => state.ui.set_status("Configuration loaded", StatusLevel::Success),
                        Err(e) => state.ui.set_error(&e),
                    }
                },
                "Load"
            }
            button {
                class: "px-3 py-1.5 rounded text-sm text-rose-300 hover:bg-rose-500/20",
                onclick: move |_| {
                    APP_STATE.write().ui.show_dialog(Dialog::ConfirmDelete(
                        DeleteTarget::SavedConfig(delete_id.clone()),
                    ));
                },
                "Delete"
            }
        }
    }
}

// ============================================================================
// Publishing
// ============================================================================

#[component]
fn PublishForm(configs: Vec<SavedConfig>) -> Element {
    let mut config_id = use_signal(String::new);
    let mut name = use_signal(String::new);

    let options: Vec<SelectOption> = configs
        .iter()
        .map(|c| SelectOption::new(c.id.clone(), c.name.clone()))
        .collect();

    let handle_publish = move |_| {
        let id = config_id.read().clone();
        let publish_name = name.read().clone();
        let mut state = APP_STATE.write();
        match state.publish_config(&publish_name, Some(id.as_str())) {
            Ok(form) => {
                state
                    .ui
                    .set_status(format!("Published at {}", form.share_url), StatusLevel::Success);
                drop(state);
                name.set(String::new());
            }
            Err(e) => {
                tracing::warn!("Publish failed: {}", e);
                state.ui.set_error(&e);
            }
        }
    };

    rsx! {
        div {
            class: "p-4 rounded-lg bg-slate-800 border border-slate-700",
            h2 { class: "text-lg font-semibold mb-3", "Publish" }
            div {
                class: "space-y-3",
                Select {
                    value: config_id.read().clone(),
                    options,
                    label: Some("Configuration".to_string()),
                    placeholder: Some("Choose a saved configuration".to_string()),
                    on_change: move |v| config_id.set(v),
                }
                TextInput {
                    value: name.read().clone(),
                    label: Some("Publish name".to_string()),
                    placeholder: Some("e.g. 2024 报名表".to_string()),
                    on_change: move |v| name.set(v),
                }
                button {
                    class: "w-full px-4 py-2 rounded bg-indigo-600 hover:bg-indigo-700 text-white text-sm font-medium",
                    onclick: handle_publish,
                    "🚀 Publish"
                }
            }
        }
    }
}

#[component]
fn PublishedRow(form: PublishedForm, submissions: Vec<Submission>) -> Element {
    let mut show_submissions = use_signal(|| false);
    let published = format_time(&form.publish_time);
    let share_url = form.share_url.clone();
    let open_id = form.id.clone();
    let toggle_id = form.id.clone();
    let delete_id = form.id.clone();

    rsx! {
        div {
            class: "p-4 rounded-lg bg-slate-800 border border-slate-700",
            class: if !form.is_active { "opacity-60" },

            div {
                class: "flex items-start gap-4",
                div {
                    class: "flex-1 min-w-0",
                    p { class: "font-medium truncate", "{form.name}" }
                    p { class: "text-xs text-slate-400 mt-1", "{form.title} · published {published}" }
                    p { class: "text-xs text-slate-400 mt-1", "👁️ {form.access_count} visits · 📨 {form.submit_count} submissions" }
                }
                Toggle {
                    checked: form.is_active,
                    label: Some("Active".to_string()),
                    on_change: move |active: bool| {
                        let mut state = APP_STATE.write();
                        if let Err(e) = state.repository.set_published_active(&toggle_id, active) {
                            state.ui.set_error(&e);
                        }
                    },
                }
            }

            div {
                class: "flex items-center gap-2 mt-3",
                code {
                    class: "flex-1 px-2 py-1 rounded bg-slate-900 text-xs text-indigo-300 truncate",
                    "{form.share_url}"
                }
                button {
                    class: "px-3 py-1 rounded text-xs bg-slate-700 hover:bg-slate-600",
                    onclick: move |_| copy_to_clipboard(share_url.clone()),
                    "Copy"
                }
                button {
                    class: "px-3 py-1 rounded text-xs bg-slate-700 hover:bg-slate-600",
                    onclick: move |_| {
                        let mut state = APP_STATE.write();
                        if let Err(e) = state.open_published(&open_id) {
                            state.ui.set_error(&e);
                        }
                    },
                    "Open"
                }
                button {
                    class: "px-3 py-1 rounded text-xs bg-slate-700 hover:bg-slate-600 disabled:opacity-40",
                    disabled: submissions.is_empty(),
                    onclick: move |_| show_submissions.toggle(),
                    if show_submissions() { "Hide data" } else { "Data" }
                }
                button {
                    class: "px-3 py-1 rounded text-xs text-rose-300 hover:bg-rose-500/20",
                    onclick: move |_| {
                        APP_STATE.write().ui.show_dialog(Dialog::ConfirmDelete(
                            DeleteTarget::PublishedForm(delete_id.clone()),
                        ));
                    },
                    "Delete"
                }
            }

            if show_submissions() {
                div {
                    class: "mt-3 space-y-2",
                    for submission in submissions.iter() {
                        SubmissionEntry { key: "{submission.id}", submission: submission.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn SubmissionEntry(submission: Submission) -> Element {
    let time = format_time(&submission.submit_time);
    let json = serde_json::to_string_pretty(&submission.data).unwrap_or_default();

    rsx! {
        details {
            class: "rounded bg-slate-900 px-3 py-2",
            summary { class: "text-xs text-slate-400 cursor-pointer", "{submission.id} · {time}" }
            pre { class: "mt-2 text-xs font-mono text-emerald-300 whitespace-pre-wrap", "{json}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap();
        let formatted = format_time(&time);
        assert_eq!(formatted.len(), "2024-03-09 12:30".len());
        assert!(formatted.starts_with("2024-03-0"));
    }
}
