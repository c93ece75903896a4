//! Main Application Component for Formwright
//!
//! This module contains the root Dioxus component that renders the entire application.
//! It provides the main layout structure including toolbar, navigation sidebar,
//! content area, status bar and the modal dialogs.

use dioxus::prelude::*;
use formwright_core::FormResult;
use formwright_schema::{FormBuilder, FormConfig};

use crate::components::inputs::TextInput;
use crate::file_ops;
use crate::pages::{DesignerPage, FillerPage, PreviewPage, PublisherPage};
use crate::state::{APP_STATE, AppState, DeleteTarget, Dialog, Page, StatusLevel};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("Formwright UI initialized");
    });

    // Keep the window title in step with the form
    use_effect(|| {
        let title = APP_STATE.read().window_title();
        dioxus::desktop::window().set_title(&title);
    });

    let handle_key_down = move |e: KeyboardEvent| {
        let modifiers = e.modifiers();
        if !modifiers.ctrl() && !modifiers.meta() {
            return;
        }
        match e.key() {
            Key::Character(c) if c.eq_ignore_ascii_case("z") && modifiers.shift() => {
                e.prevent_default();
                APP_STATE.write().redo();
            }
            Key::Character(c) if c.eq_ignore_ascii_case("z") => {
                e.prevent_default();
                APP_STATE.write().undo();
            }
            Key::Character(c) if c.eq_ignore_ascii_case("y") => {
                e.prevent_default();
                APP_STATE.write().redo();
            }
            Key::Character(c) if c.eq_ignore_ascii_case("s") => {
                e.prevent_default();
                APP_STATE.write().ui.show_dialog(Dialog::SaveConfig);
            }
            _ => {}
        }
    };

    rsx! {
        div {
            class: "app-container h-screen w-screen flex flex-col bg-slate-900 text-slate-100 overflow-hidden",
            onkeydown: handle_key_down,

            Toolbar {}

            div {
                class: "flex flex-1 overflow-hidden",
                Sidebar {}
                MainContent {}
            }

            StatusBar {}

            DialogOverlay {}
        }
    }
}

// ============================================================================
// Toolbar Component
// ============================================================================

/// Export the designer form through a save dialog
fn export_current_form() {
    let form = APP_STATE.read().form.clone();
    spawn(async move {
        match file_ops::export_form(&form, None).await {
            Ok(path) => APP_STATE.write().ui.set_status(
                format!("Exported to {}", path.display()),
                StatusLevel::Success,
            ),
            Err(e) => {
                if file_ops::log_failure("Export", &e) {
                    APP_STATE.write().ui.set_error(&e);
                }
            }
        }
    });
}

/// Replace the designer form with one picked from disk
fn import_form_from_file() {
    spawn(async move {
        match file_ops::import_form(None).await {
            Ok((config, path)) => {
                let mut state = APP_STATE.write();
                state.replace_form(config, "Import form");
                state.ui.navigate(Page::Designer);
                state.ui.set_status(
                    format!("Imported {}", file_ops::display_name(&path)),
                    StatusLevel::Success,
                );
            }
            Err(e) => {
                if file_ops::log_failure("Import", &e) {
                    let mut state = APP_STATE.write();
                    state.ui.set_error(&e);
                    state.ui.show_dialog(Dialog::Error(e.to_string()));
                }
            }
        }
    });
}

/// Lint the designer form and report the outcome
fn check_problems() {
    let mut state = APP_STATE.write();
    let result = state.lint();
    let level = if result.has_errors() {
        StatusLevel::Error
    } else if result.has_warnings() {
        StatusLevel::Warning
    } else {
        StatusLevel::Success
    };
    state.ui.set_status(result.summary(), level);
    if result.has_errors() || result.has_warnings() {
        state.ui.show_dialog(Dialog::Problems);
    }
}

/// Top toolbar with actions and form info
#[component]
fn Toolbar() -> Element {
    let state = APP_STATE.read();
    let is_dirty = state.is_dirty;
    let title = state.form.title.clone();
    let can_undo = state.history.can_undo();
    let can_redo = state.history.can_redo();
    let is_empty = state.form.is_empty();
    drop(state);

    rsx! {
        header {
            class: "toolbar h-12 bg-slate-800 border-b border-slate-700 flex items-center px-4 gap-2 shrink-0",

            div {
                class: "flex items-center gap-2 mr-4",
                span { class: "text-xl", "📝" }
                span { class: "font-semibold text-sm hidden sm:inline", "Formwright" }
            }

            // File actions
            div {
                class: "flex items-center gap-1",

                ToolbarButton {
                    icon: "💾",
                    label: "Save",
                    shortcut: "Ctrl+S",
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::SaveConfig),
                }
                ToolbarButton {
                    icon: "📂",
                    label: "Load",
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::LoadConfig),
                }
                ToolbarButton {
                    icon: "📤",
                    label: "Export",
                    disabled: is_empty,
                    onclick: move |_| export_current_form(),
                }
                ToolbarButton {
                    icon: "📥",
                    label: "Import",
                    onclick: move |_| import_form_from_file(),
                }
            }

            div { class: "w-px h-6 bg-slate-700 mx-2" }

            // Edit actions
            div {
                class: "flex items-center gap-1",

                ToolbarButton {
                    icon: "↩️",
                    label: "Undo",
                    shortcut: "Ctrl+Z",
                    disabled: !can_undo,
                    onclick: move |_| {
                        APP_STATE.write().undo();
                    },
                }
                ToolbarButton {
                    icon: "↪️",
                    label: "Redo",
                    shortcut: "Ctrl+Y",
                    disabled: !can_redo,
                    onclick: move |_| {
                        APP_STATE.write().redo();
                    },
                }
                ToolbarButton {
                    icon: "🩺",
                    label: "Check",
                    onclick: move |_| check_problems(),
                }
            }

            div { class: "flex-1" }

            div {
                class: "flex items-center gap-2 text-sm",
                span { class: "text-slate-400", "Form:" }
                span { class: "font-medium", "{title}" }
                if is_dirty {
                    span { class: "text-amber-400", title: "Unsaved changes", "•" }
                }
            }

            div { class: "flex-1" }

            ToolbarButton {
                icon: "ℹ️",
                label: "About",
                onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::About),
            }
        }
    }
}

/// Toolbar button component
#[component]
fn ToolbarButton(
    icon: &'static str,
    label: &'static str,
    #[props(default)] shortcut: &'static str,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let base_class = "px-2 py-1 rounded text-sm flex items-center gap-1 transition-colors";
    let state_class = if disabled {
        "opacity-50 cursor-not-allowed"
    } else {
        "hover:bg-slate-700 cursor-pointer"
    };

    rsx! {
        button {
            class: "{base_class} {state_class}",
            disabled: disabled,
            title: if shortcut.is_empty() { label.to_string() } else { format!("{} ({})", label, shortcut) },
            onclick: move |e| {
                if !disabled {
                    onclick.call(e);
                }
            },
            span { "{icon}" }
            span { class: "hidden lg:inline", "{label}" }
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

/// Left sidebar with page navigation
#[component]
fn Sidebar() -> Element {
    let current = APP_STATE.read().ui.active_page;

    rsx! {
        nav {
            class: "sidebar w-16 bg-slate-800 border-r border-slate-700 flex flex-col items-center py-3 gap-1 shrink-0",
            for page in Page::all().iter().copied() {
                SidebarItem { key: "{page.display_name()}", page, current }
            }
        }
    }
}

/// Sidebar navigation item
#[component]
fn SidebarItem(page: Page, current: Page) -> Element {
    let is_active = page == current;
    let name = page.display_name();

    rsx! {
        button {
            class: "w-12 h-12 flex flex-col items-center justify-center rounded-lg transition-colors",
            class: if is_active { "bg-indigo-600 text-white" } else { "text-slate-300 hover:bg-slate-700" },
            title: "{name}",
            onclick: move |_| APP_STATE.write().ui.navigate(page),
            span { class: "text-lg leading-none", "{page.icon()}" }
            span { class: "text-[10px] mt-1", "{name}" }
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Main content area that renders the active page
#[component]
fn MainContent() -> Element {
    let current_page = APP_STATE.read().ui.active_page;

    rsx! {
        main {
            class: "flex-1 overflow-hidden bg-slate-900",

            match current_page {
                Page::Designer => rsx! { DesignerPage {} },
                Page::Preview => rsx! { PreviewPage {} },
                Page::Publisher => rsx! { PublisherPage {} },
                Page::Filler => rsx! { FillerPage {} },
            }
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

/// Bottom status bar
#[component]
fn StatusBar() -> Element {
    let state = APP_STATE.read();
    let status = state.ui.status_message.clone();
    let field_count = state.form.field_count();
    let undo_action = state.history.undo_action().map(str::to_string);
    drop(state);

    rsx! {
        footer {
            class: "status-bar h-6 bg-slate-800 border-t border-slate-700 flex items-center px-4 text-xs text-slate-400 shrink-0",

            if let Some(msg) = status {
                span {
                    class: match msg.level {
                        StatusLevel::Info => "text-slate-400",
                        StatusLevel::Success => "text-green-400",
                        StatusLevel::Warning => "text-amber-400",
                        StatusLevel::Error => "text-red-400",
                    },
                    "{msg.text}"
                }
            } else {
                span { "Ready" }
            }

            div { class: "flex-1" }

            div {
                class: "flex items-center gap-4",
                if let Some(action) = undo_action {
                    span { "Last: {action}" }
                }
                span { "Fields: {field_count}" }
            }
        }
    }
}

// ============================================================================
// Dialog Overlay Component
// ============================================================================

/// Modal dialog overlay
#[component]
fn DialogOverlay() -> Element {
    let dialog = APP_STATE.read().ui.active_dialog.clone();

    let Some(dialog) = dialog else {
        return rsx! {};
    };
    let width = if matches!(dialog, Dialog::Problems | Dialog::LoadConfig) {
        "max-w-2xl"
    } else {
        "max-w-lg"
    };

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center",

            div {
                class: "absolute inset-0 bg-black/50",
                onclick: move |_| APP_STATE.write().ui.close_dialog(),
            }

            div {
                class: "relative bg-slate-800 rounded-lg shadow-xl border border-slate-700 mx-4 w-full {width}",
                onclick: move |e| e.stop_propagation(),

                match dialog {
                    Dialog::SaveConfig => rsx! { NameDialog { action: NameAction::SaveConfig } },
                    Dialog::Publish => rsx! { NameDialog { action: NameAction::Publish } },
                    Dialog::SaveAs => rsx! { NameDialog { action: NameAction::SaveAs } },
                    Dialog::LoadConfig => rsx! { LoadConfigDialog {} },
                    Dialog::ConfirmDelete(target) => rsx! { ConfirmDeleteDialog { target } },
                    Dialog::Problems => rsx! { ProblemsDialog {} },
                    Dialog::About => rsx! { AboutDialog {} },
                    Dialog::Error(message) => rsx! { ErrorDialog { message } },
                }
            }
        }
    }
}

// ============================================================================
// Name Dialogs
// ============================================================================

/// Actions that ask for a name first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameAction {
    /// Save the designer form as a configuration
    SaveConfig,
    /// Save and publish the designer form
    Publish,
    /// Save the form edited in the filler as a new configuration
    SaveAs,
}

impl NameAction {
    pub fn title(&self) -> &'static str {
        match self {
            NameAction::SaveConfig => "Save Configuration",
            NameAction::Publish => "Publish Form",
            NameAction::SaveAs => "Save As New Configuration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NameAction::SaveConfig | NameAction::SaveAs => "Configuration name",
            NameAction::Publish => "Publish name",
        }
    }

    pub fn confirm_text(&self) -> &'static str {
        match self {
            NameAction::SaveConfig | NameAction::SaveAs => "Save",
            NameAction::Publish => "Publish",
        }
    }

    /// Name suggested when the dialog opens
    pub fn initial_name(&self, state: &AppState) -> String {
        match self {
            NameAction::SaveAs => state
                .filler
                .form
                .as_ref()
                .map(|f| format!("{} 副本", f.name))
                .unwrap_or_default(),
            _ => state.form.title.clone(),
        }
    }

    /// Carry out the action; returns the status message
    pub fn run(&self, state: &mut AppState, name: &str) -> FormResult<String> {
        match self {
            NameAction::SaveConfig => {
                let saved = state.save_config(name)?;
                Ok(format!("Saved '{}'", saved.name))
            }
            NameAction::Publish => {
                let published = state.publish_current(name)?;
                Ok(format!("Published at {}", published.share_url))
            }
            NameAction::SaveAs => {
                let saved = state.save_filler_as(name)?;
                Ok(format!("Saved '{}' as a new configuration", saved.name))
            }
        }
    }
}

/// Dialog asking for a name, then running the action
#[component]
fn NameDialog(action: NameAction) -> Element {
    let mut name = use_signal(|| action.initial_name(&APP_STATE.read()));
    let mut error = use_signal(|| None::<String>);

    let mut confirm = move || {
        let value = name.read().clone();
        let mut state = APP_STATE.write();
        match action.run(&mut state, &value) {
            Ok(message) => {
                state.ui.set_status(message, StatusLevel::Success);
                state.ui.close_dialog();
            }
            Err(e) => {
                tracing::warn!("{} failed: {}", action.title(), e);
                drop(state);
                error.set(Some(e.to_string()));
            }
        }
    };

    rsx! {
        form {
            onsubmit: move |e| {
                e.prevent_default();
                confirm();
            },

            div {
                class: "p-6",
                h2 { class: "text-xl font-bold mb-4", "{action.title()}" }

                TextInput {
                    value: name.read().clone(),
                    label: Some(action.label().to_string()),
                    error: error.read().clone(),
                    on_change: move |v| {
                        name.set(v);
                        error.set(None);
                    },
                }

                div {
                    class: "flex justify-end gap-2 mt-6",
                    button {
                        class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded transition-colors",
                        r#type: "button",
                        onclick: move |_| APP_STATE.write().ui.close_dialog(),
                        "Cancel"
                    }
                    button {
                        class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 rounded transition-colors",
                        r#type: "submit",
                        "{action.confirm_text()}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Other Dialogs
// ============================================================================

/// Pick a saved configuration to load into the designer
#[component]
fn LoadConfigDialog() -> Element {
    let configs = APP_STATE.read().repository.configs();

    rsx! {
        div {
            class: "p-6",
            h2 { class: "text-xl font-bold mb-4", "Load Configuration" }

            match configs {
                Err(e) => rsx! {
                    p { class: "text-red-300 text-sm", "Could not read configurations: {e}" }
                },
                Ok(configs) if configs.is_empty() => rsx! {
                    p { class: "text-slate-400 text-sm", "No saved configurations yet." }
                },
                Ok(configs) => rsx! {
                    div {
                        class: "max-h-96 overflow-y-auto space-y-2",
                        for config in configs {
                            button {
                                key: "{config.id}",
                                class: "w-full text-left px-4 py-3 rounded bg-slate-700/50 hover:bg-slate-700",
                                onclick: {
                                    let id = config.id.clone();
                                    move |_| {
                                        let mut state = APP_STATE.write();
                                        match state.load_config(&id) {
                                            Ok(()) => {
                                                state.ui.close_dialog();
                                                state.ui.set_status("Configuration loaded", StatusLevel::Success);
                                            }
                                            Err(e) => state.ui.set_error(&e),
                                        }
                                    }
                                },
                                p { class: "font-medium", "{config.name}" }
                                p { class: "text-xs text-slate-400", "{config.config.title} · {config.field_count()} fields" }
                            }
                        }
                    }
                },
            }

            h3 { class: "text-sm font-medium text-slate-400 mt-6 mb-2", "Start from a template" }
            div {
                class: "flex gap-2",
                for template in FormTemplate::all().iter().copied() {
                    button {
                        key: "{template.label()}",
                        class: "px-3 py-2 rounded bg-slate-700/50 hover:bg-slate-700 text-sm",
                        onclick: move |_| load_template(template),
                        "{template.label()}"
                    }
                }
            }

            div {
                class: "flex justify-end mt-6",
                button {
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded transition-colors",
                    onclick: move |_| APP_STATE.write().ui.close_dialog(),
                    "Close"
                }
            }
        }
    }
}

/// Canned forms offered when loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTemplate {
    UserInfo,
    Contact,
}

impl FormTemplate {
    pub fn all() -> &'static [FormTemplate] {
        &[FormTemplate::UserInfo, FormTemplate::Contact]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormTemplate::UserInfo => "用户信息",
            FormTemplate::Contact => "联系方式",
        }
    }

    pub fn build(&self) -> FormResult<FormConfig> {
        match self {
            FormTemplate::UserInfo => FormBuilder::create_user_info_form(),
            FormTemplate::Contact => FormBuilder::create_contact_form(),
        }
    }
}

/// Replace the designer form with a canned one
fn load_template(template: FormTemplate) {
    let mut state = APP_STATE.write();
    match template.build() {
        Ok(form) => {
            state.replace_form(form, "Load template");
            state.ui.close_dialog();
            state.ui.navigate(Page::Designer);
            state
                .ui
                .set_status(format!("Loaded template {}", template.label()), StatusLevel::Success);
        }
        Err(e) => {
            tracing::error!("Template {} is invalid: {}", template.label(), e);
            state.ui.set_error(&e);
        }
    }
}

/// Delete confirmation
#[component]
fn ConfirmDeleteDialog(target: DeleteTarget) -> Element {
    let what = match &target {
        DeleteTarget::SavedConfig(_) => "this saved configuration",
        DeleteTarget::PublishedForm(_) => "this published form? Its submissions are kept",
    };

    let handle_delete = move |_| {
        let mut state = APP_STATE.write();
        match state.delete(&target) {
            Ok(true) => state.ui.set_status("Deleted", StatusLevel::Success),
            Ok(false) => state.ui.set_status("Already deleted", StatusLevel::Warning),
            Err(e) => state.ui.set_error(&e),
        }
        state.ui.close_dialog();
    };

    rsx! {
        div {
            class: "p-6",
            div {
                class: "flex items-start gap-3 mb-6",
                span { class: "text-2xl", "🗑️" }
                div {
                    h2 { class: "text-xl font-bold", "Confirm Delete" }
                    p { class: "text-slate-300 mt-1", "Delete {what}" }
                }
            }
            div {
                class: "flex justify-end gap-2",
                button {
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded transition-colors",
                    onclick: move |_| APP_STATE.write().ui.close_dialog(),
                    "Cancel"
                }
                button {
                    class: "px-4 py-2 bg-rose-600 hover:bg-rose-700 rounded transition-colors",
                    onclick: handle_delete,
                    "Delete"
                }
            }
        }
    }
}

/// Lint results for the designer form
#[component]
fn ProblemsDialog() -> Element {
    let result = APP_STATE.read().lint();

    rsx! {
        div {
            class: "p-6",
            h2 { class: "text-xl font-bold mb-1", "Problems" }
            p { class: "text-sm text-slate-400 mb-4", "{result.summary()}" }

            div {
                class: "max-h-96 overflow-y-auto space-y-2",
                for (index, error) in result.errors.iter().enumerate() {
                    div {
                        key: "e{index}",
                        class: "p-3 rounded bg-red-500/10 border border-red-500/30 text-sm",
                        p { class: "text-red-300", "{error}" }
                        if let Some(suggestion) = &error.suggestion {
                            p { class: "text-xs text-slate-400 mt-1", "💡 {suggestion}" }
                        }
                    }
                }
                for (index, warning) in result.warnings.iter().enumerate() {
                    div {
                        key: "w{index}",
                        class: "p-3 rounded bg-amber-500/10 border border-amber-500/30 text-sm text-amber-200",
                        "{warning}"
                    }
                }
            }

            div {
                class: "flex justify-end mt-6",
                button {
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded transition-colors",
                    onclick: move |_| APP_STATE.write().ui.close_dialog(),
                    "Close"
                }
            }
        }
    }
}

/// About dialog
#[component]
fn AboutDialog() -> Element {
    let storage = APP_STATE.read().settings.storage_dir.display().to_string();

    rsx! {
        div {
            class: "p-6 text-center",
            p { class: "text-4xl mb-4", "📝" }
            h2 { class: "text-xl font-bold mb-2", "{crate::NAME}" }
            p { class: "text-slate-400 mb-4", "Version {crate::VERSION}" }
            p { class: "text-sm text-slate-500 mb-2", "Drag-and-drop visual form designer" }
            p { class: "text-xs text-slate-500 mb-4 font-mono", "{storage}" }

            button {
                class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded transition-colors",
                onclick: move |_| APP_STATE.write().ui.close_dialog(),
                "Close"
            }
        }
    }
}

/// Error dialog
#[component]
fn ErrorDialog(message: String) -> Element {
    rsx! {
        div {
            class: "p-6",
            div {
                class: "flex items-start gap-3 mb-4",
                span { class: "text-2xl", "❌" }
                div {
                    h2 { class: "text-xl font-bold text-red-400", "Error" }
                    p { class: "text-slate-300 mt-1", "{message}" }
                }
            }
            div {
                class: "flex justify-end",
                button {
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded transition-colors",
                    onclick: move |_| APP_STATE.write().ui.close_dialog(),
                    "Close"
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_icon() {
        assert_eq!(Page::Designer.icon(), "🎨");
        assert_eq!(Page::Filler.icon(), "📝");
    }

    #[test]
    fn test_name_action_save_config() {
        let mut state = AppState::default();
        state.add_component("input").unwrap();
        assert_eq!(NameAction::SaveConfig.initial_name(&state), "我的表单");

        let err = NameAction::SaveConfig.run(&mut state, "").unwrap_err();
        assert_eq!(err.to_string(), "请输入配置名称");

        let message = NameAction::SaveConfig.run(&mut state, "草稿").unwrap();
        assert_eq!(message, "Saved '草稿'");
        assert_eq!(state.repository.configs().unwrap().len(), 1);
    }

    #[test]
    fn test_name_action_publish() {
        let mut state = AppState::default();
        state.add_component("input").unwrap();
        let message = NameAction::Publish.run(&mut state, "报名表").unwrap();
        assert!(message.starts_with("Published at http://localhost:8080/form/published_"));
    }

    #[test]
    fn test_templates_build() {
        for template in FormTemplate::all() {
            let form = template.build().unwrap();
            assert!(!form.is_empty(), "{} has no fields", template.label());
        }
    }

    #[test]
    fn test_name_action_save_as_needs_open_form() {
        let state = AppState::default();
        assert_eq!(NameAction::SaveAs.initial_name(&state), "");
        assert_eq!(NameAction::SaveAs.confirm_text(), "Save");
        assert_eq!(NameAction::Publish.label(), "Publish name");
    }
}
