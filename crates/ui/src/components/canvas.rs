//! # Canvas Component
//!
//! The designer canvas: the form title and one card per field, laid out on
//! a 24-column grid.
//!
//! ## Features
//!
//! - **Drop**: Palette components dropped on the canvas are appended
//! - **Reorder**: Cards dragged onto another card take its position
//! - **Selection**: Click a card to edit it in the property panel
//! - **Keys**: Delete removes the selected field, Escape clears the selection

use dioxus::prelude::*;
use formwright_core::FieldType;
use formwright_schema::FieldConfig;

use crate::state::{APP_STATE, DragItem, StatusLevel};

// ============================================================================
// Constants
// ============================================================================

/// Maximum canvas width in pixels
pub const CANVAS_MAX_WIDTH: u32 = 960;

/// Column guide background drawn behind the cards
pub const COLUMN_GUIDE_STYLE: &str = "background-image: repeating-linear-gradient(90deg, rgba(99, 102, 241, 0.06) 0, rgba(99, 102, 241, 0.06) calc(100% / 24 - 2px), transparent calc(100% / 24 - 2px), transparent calc(100% / 24));";

/// Maximum number of options listed on a card
const PREVIEW_OPTION_COUNT: usize = 3;

// ============================================================================
// Canvas Component
// ============================================================================

/// Main canvas component
#[component]
pub fn Canvas() -> Element {
    let state = APP_STATE.read();
    let title = state.form.title.clone();
    let fields = state.form.fields.clone();
    let selected = state.selected.clone();
    let drag = state.drag.clone();
    drop(state);

    let handle_canvas_drop = move |e: DragEvent| {
        e.prevent_default();
        let mut state = APP_STATE.write();
        if let Err(e) = state.drop_on_canvas() {
            state.ui.set_error(&e);
        }
    };

    let handle_key_down = move |e: KeyboardEvent| match e.key() {
        Key::Delete => {
            e.prevent_default();
            delete_selected_field();
        }
        Key::Escape => {
            APP_STATE.write().clear_selection();
        }
        _ => {}
    };

    rsx! {
        div {
            class: "canvas-container flex-1 overflow-auto bg-slate-900 p-6 focus:outline-none",
            tabindex: "0",
            onkeydown: handle_key_down,
            ondragover: move |e: DragEvent| e.prevent_default(),
            ondrop: handle_canvas_drop,
            onclick: move |_| APP_STATE.write().clear_selection(),

            div {
                class: "canvas mx-auto rounded-xl bg-white text-slate-800 shadow-xl p-6 min-h-full",
                style: "max-width: {CANVAS_MAX_WIDTH}px;",

                input {
                    class: "w-full text-xl font-semibold text-center mb-6 bg-transparent border-b border-transparent hover:border-slate-300 focus:border-indigo-500 focus:outline-none",
                    value: "{title}",
                    onclick: move |e| e.stop_propagation(),
                    onchange: move |e| APP_STATE.write().set_title(e.value()),
                }

                if fields.is_empty() {
                    div {
                        class: "flex flex-col items-center justify-center h-64 border-2 border-dashed border-slate-300 rounded-lg text-slate-400",
                        span { class: "text-4xl mb-2", "📋" }
                        p { "Drag components here, or click one in the palette" }
                    }
                } else {
                    div {
                        class: "canvas-grid flex flex-wrap -mx-2",
                        style: "{COLUMN_GUIDE_STYLE}",

                        for (index, field) in fields.iter().enumerate() {
                            FieldCard {
                                key: "{field.id}",
                                field: field.clone(),
                                index,
                                selected: selected.as_deref() == Some(field.id.as_str()),
                                drop_target: drag.over_index == Some(index) && drag.is_dragging(),
                                dragged: drag.is_dragging_field(index),
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Field Card
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct FieldCardProps {
    pub field: FieldConfig,
    /// Position in the form
    pub index: usize,
    #[props(default = false)]
    pub selected: bool,
    /// Whether a dragged item hovers this card
    #[props(default = false)]
    pub drop_target: bool,
    /// Whether this card is the one being dragged
    #[props(default = false)]
    pub dragged: bool,
}

/// One field on the canvas
#[component]
pub fn FieldCard(props: FieldCardProps) -> Element {
    let index = props.index;
    let select_id = props.field.id.clone();
    let delete_id = props.field.id.clone();
    let percent = props.field.column_percent();
    let heading = props.field.canvas_heading();
    let hint = preview_hint(&props.field);
    let required = props.field.is_required();

    let border = if props.selected {
        "border-indigo-500 ring-2 ring-indigo-500/30"
    } else if props.drop_target {
        "border-emerald-500 border-dashed"
    } else {
        "border-slate-200 hover:border-indigo-300"
    };

    let opacity = if props.dragged { "opacity-50" } else { "" };

    rsx! {
        div {
            class: "px-2 mb-4 {opacity}",
            style: "flex: 0 0 {percent}%; max-width: {percent}%;",

            div {
                class: "field-card relative rounded-lg border bg-white p-3 cursor-move transition-colors {border}",
                draggable: "true",
                ondragstart: move |_| APP_STATE.write().start_drag(DragItem::Field(index)),
                ondragend: move |_| APP_STATE.write().cancel_drag(),
                ondragover: move |e: DragEvent| {
                    e.prevent_default();
                    e.stop_propagation();
                    // dragover fires continuously; write only on change
                    if APP_STATE.read().drag.over_index != Some(index) {
                        APP_STATE.write().drag.over_index = Some(index);
                    }
                },
                ondrop: move |e: DragEvent| {
                    e.prevent_default();
                    e.stop_propagation();
                    let mut state = APP_STATE.write();
                    if let Err(e) = state.drop_on_field(index) {
                        state.ui.set_error(&e);
                    }
                },
                onclick: move |e| {
                    e.stop_propagation();
                    APP_STATE.write().select_field(&select_id);
                },

                div {
                    class: "flex items-start justify-between gap-2 mb-2",
                    span {
                        class: "text-sm font-medium text-slate-700",
                        if required {
                            span { class: "text-rose-500 mr-0.5", "*" }
                        }
                        "{heading}"
                    }
                    if props.selected {
                        button {
                            class: "text-xs px-2 py-0.5 rounded bg-rose-50 text-rose-600 hover:bg-rose-100",
                            title: "Remove field",
                            onclick: move |e| {
                                e.stop_propagation();
                                let mut state = APP_STATE.write();
                                if state.remove_field(&delete_id) {
                                    state.ui.set_status("Field removed", StatusLevel::Info);
                                }
                            },
                            "Delete"
                        }
                    }
                }

                div {
                    class: "rounded border border-slate-200 bg-slate-50 px-2 py-1.5 text-xs text-slate-400 truncate pointer-events-none",
                    "{hint}"
                }
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Remove the selected field, if any
pub fn delete_selected_field() {
    let mut state = APP_STATE.write();
    let Some(id) = state.selected.clone() else {
        return;
    };
    if state.remove_field(&id) {
        state.ui.set_status("Field removed", StatusLevel::Info);
    }
}

/// Short text shown inside a card in place of the real widget
pub fn preview_hint(field: &FieldConfig) -> String {
    match &field.field_type {
        FieldType::Rating => {
            let count = field.rating_config.clone().unwrap_or_default().count();
            "☆".repeat(count as usize)
        }
        FieldType::Upload => {
            let upload = field.upload_config.clone().unwrap_or_default();
            format!("Upload ({}, max {})", upload.accept(), upload.max_count())
        }
        FieldType::Date => "yyyy-mm-dd".to_string(),
        FieldType::Time => "hh:mm:ss".to_string(),
        FieldType::Cascader => field
            .display_placeholder()
            .unwrap_or_else(|| "请选择".to_string()),
        t if t.is_choice() => {
            let options = field.resolved_options();
            let mut labels: Vec<&str> = options
                .iter()
                .take(PREVIEW_OPTION_COUNT)
                .map(|o| o.label.as_str())
                .collect();
            if options.len() > PREVIEW_OPTION_COUNT {
                labels.push("…");
            }
            if labels.is_empty() {
                "No options".to_string()
            } else {
                labels.join(" / ")
            }
        }
        _ => field.display_placeholder().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::{OptionItem, OptionsPreset};
    use formwright_schema::RatingConfig;

    #[test]
    fn test_preview_hint_choice() {
        let field = FieldConfig::new(FieldType::Radio, "pick", "Pick").with_options(vec![
            OptionItem::same("A"),
            OptionItem::same("B"),
            OptionItem::same("C"),
            OptionItem::same("D"),
        ]);
        assert_eq!(preview_hint(&field), "A / B / C / …");
    }

    #[test]
    fn test_preview_hint_preset_and_empty() {
        let gender =
            FieldConfig::new(FieldType::Radio, "gender", "性别").with_preset(OptionsPreset::Gender);
        assert_eq!(preview_hint(&gender), "男 / 女");

        let empty = FieldConfig::new(FieldType::Select, "s", "S");
        assert_eq!(preview_hint(&empty), "No options");
    }

    #[test]
    fn test_preview_hint_rating() {
        let mut field = FieldConfig::new(FieldType::Rating, "score", "评分");
        field.rating_config = Some(RatingConfig {
            max: Some(3),
            allow_half: None,
        });
        assert_eq!(preview_hint(&field), "☆☆☆");
    }

    #[test]
    fn test_preview_hint_fixed_placeholder() {
        let field = FieldConfig::new(FieldType::Phone, "phone", "手机号");
        assert_eq!(preview_hint(&field), "请输入手机号");
    }
}
