//! # Formwright UI
//!
//! Dioxus Desktop UI for Formwright.
//!
//! This crate provides the form designer and the screens for previewing,
//! publishing and filling in forms.
//!
//! ## Features
//!
//! - Component palette with drag-and-drop onto a 24-column canvas
//! - Property panel for layout, validation and options
//! - Forms rendered from their configuration with live validation
//! - Saved configurations, publishing with share links, submissions
//! - JSON export and import
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod pages;
pub mod settings;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use formwright_core;
pub use formwright_schema;

pub use app::App;
pub use file_ops::{UploadedFile, export_form, import_form};
pub use pages::{DesignerPage, FillerPage, PreviewPage, PublisherPage};
pub use settings::Settings;
pub use state::{
    APP_STATE, AppState, DeleteTarget, Dialog, DragItem, DragState, History, HistorySnapshot,
    Page, StatusLevel, StatusMessage, UiState, init_app_state,
};

pub use components::{
    Canvas, ComponentPalette, DynamicForm, FormSession, NumberInput, PropertiesPanel, Select,
    SelectOption, TextArea, TextInput, Toggle,
};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Formwright";

/// Application display title
pub const TITLE: &str = "Formwright - Visual Form Designer";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

/// Tailwind utility classes, generated in the webview from the class names in use
const TAILWIND_SCRIPT: &str = "https://cdn.tailwindcss.com";

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Formwright desktop application
///
/// # Example
///
/// ```rust,ignore
/// fn main() {
///     let (settings, _) = formwright_ui::Settings::load_or_default();
///     formwright_ui::launch(settings);
/// }
/// ```
pub fn launch(settings: Settings) {
    tracing::info!("Starting {} v{}", NAME, VERSION);
    tracing::debug!("Storage directory: {}", settings.storage_dir.display());

    init_app_state(settings);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1400.0, 900.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(800.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head()),
        )
        .launch(App);
}

/// `<head>` content injected into the webview
fn custom_head() -> String {
    format!(
        r#"<script src="{}"></script><style type="text/css">{}</style>"#,
        TAILWIND_SCRIPT, STYLES
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.contains(NAME));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!STYLES.is_empty());
        assert!(STYLES.contains(".canvas-grid"));
        assert!(STYLES.contains(".dynamic-form"));
    }

    #[test]
    fn test_custom_head() {
        let head = custom_head();
        assert!(head.starts_with("<script"));
        assert!(head.contains("<style"));
    }
}
