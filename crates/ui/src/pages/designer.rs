//! # Designer Page
//!
//! The main editing page for composing a form.
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ DesignerBar (field count, Preview, Publish, Clear)          │
//! ├──────────┬──────────────────────────────────────┬───────────┤
//! │          │                                      │           │
//! │ Palette  │               Canvas                 │ Properties│
//! │          │   (title, field cards, 24 columns)   │   Panel   │
//! │          │                                      │           │
//! └──────────┴──────────────────────────────────────┴───────────┘
//! ```

use dioxus::prelude::*;

use crate::components::canvas::Canvas;
use crate::components::palette::ComponentPalette;
use crate::components::properties::PropertiesPanel;
use crate::state::{APP_STATE, Dialog, Page, StatusLevel};

/// Main designer page component
#[component]
pub fn DesignerPage() -> Element {
    rsx! {
        div {
            class: "designer-page flex flex-col h-full",

            DesignerBar {}

            div {
                class: "flex flex-1 overflow-hidden",
                ComponentPalette {}
                Canvas {}
                PropertiesPanel {}
            }
        }
    }
}

/// Strip above the canvas with form-level actions
#[component]
fn DesignerBar() -> Element {
    let state = APP_STATE.read();
    let field_count = state.form.field_count();
    let is_empty = state.form.is_empty();
    drop(state);

    let handle_clear = move |_| {
        let mut state = APP_STATE.write();
        state.clear_form();
        state.ui.set_status("Canvas cleared", StatusLevel::Info);
    };

    rsx! {
        div {
            class: "h-10 flex items-center gap-3 px-4 bg-slate-800/60 border-b border-slate-700 text-sm shrink-0",

            span {
                class: "text-slate-400",
                if field_count == 1 { "1 field" } else { "{field_count} fields" }
            }

            div { class: "flex-1" }

            button {
                class: "px-3 py-1 rounded text-slate-300 hover:bg-slate-700 disabled:opacity-40",
                disabled: is_empty,
                onclick: move |_| APP_STATE.write().ui.navigate(Page::Preview),
                "👁️ Preview"
            }
            button {
                class: "px-3 py-1 rounded text-slate-300 hover:bg-slate-700 disabled:opacity-40",
                disabled: is_empty,
                onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::Publish),
                "🚀 Publish"
            }
            button {
                class: "px-3 py-1 rounded text-rose-300 hover:bg-rose-500/20 disabled:opacity-40",
                disabled: is_empty,
                onclick: handle_clear,
                "🗑️ Clear"
            }
        }
    }
}
