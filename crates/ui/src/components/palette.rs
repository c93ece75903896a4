//! # Component Palette
//!
//! Left-hand list of the component library, grouped by category. Entries
//! are dragged onto the canvas, or clicked to append a field.

use dioxus::prelude::*;
use formwright_core::ComponentCategory;
use formwright_schema::{ComponentItem, library};

use crate::state::{APP_STATE, DragItem, StatusLevel};

/// Add a component to the end of the designer form
pub fn add_component_to_form(component_id: &str) {
    let mut state = APP_STATE.write();
    match state.add_component(component_id) {
        Ok(_) => {
            let label = state
                .selected_field()
                .map(|f| f.label.clone())
                .unwrap_or_default();
            state.ui.set_status(format!("Added {}", label), StatusLevel::Info);
        }
        Err(e) => {
            tracing::warn!("Could not add component: {}", e);
            state.ui.set_error(&e);
        }
    }
}

/// Palette listing every library component
#[component]
pub fn ComponentPalette() -> Element {
    let collapsed = APP_STATE.read().ui.palette_collapsed;

    rsx! {
        aside {
            class: "palette flex flex-col bg-slate-800 border-r border-slate-700 overflow-y-auto",
            class: if collapsed { "w-12" } else { "w-60" },

            div {
                class: "flex items-center justify-between px-3 py-2 border-b border-slate-700",
                if !collapsed {
                    h2 { class: "text-xs font-semibold uppercase tracking-wider text-slate-400", "Components" }
                }
                button {
                    class: "p-1 text-slate-400 hover:text-white rounded",
                    title: if collapsed { "Expand" } else { "Collapse" },
                    onclick: move |_| APP_STATE.write().ui.toggle_palette(),
                    if collapsed { "»" } else { "«" }
                }
            }

            if !collapsed {
                for category in ComponentCategory::all().iter().copied() {
                    PaletteGroup { key: "{category.display_name()}", category }
                }
            }
        }
    }
}

#[component]
fn PaletteGroup(category: ComponentCategory) -> Element {
    let items = library::by_category(category);
    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        section {
            class: "px-3 py-3",
            h3 { class: "text-xs font-medium text-slate-500 mb-2", "{category.display_name()}" }
            div {
                class: "grid grid-cols-2 gap-2",
                for item in items {
                    PaletteItem { key: "{item.id}", item: item.clone() }
                }
            }
        }
    }
}

#[component]
fn PaletteItem(item: ComponentItem) -> Element {
    let drag_id = item.id.to_string();
    let click_id = item.id.to_string();

    rsx! {
        div {
            class: "palette-item flex flex-col items-center gap-1 p-2 rounded-lg bg-slate-700/50 border border-slate-600/50 text-slate-200 cursor-grab hover:border-indigo-500 hover:bg-slate-700 select-none",
            draggable: "true",
            title: "{item.field_type.display_name()}",
            ondragstart: move |_| APP_STATE.write().start_drag(DragItem::Component(drag_id.clone())),
            ondragend: move |_| APP_STATE.write().cancel_drag(),
            onclick: move |_| add_component_to_form(&click_id),
            span { class: "text-lg", "{item.icon}" }
            span { class: "text-xs text-center", "{item.name}" }
        }
    }
}
