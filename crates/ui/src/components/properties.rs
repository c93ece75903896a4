//! # Properties Panel Component
//!
//! Right-hand panel editing the selected field. Every edit is sent as a
//! [`FieldUpdate`] merged into the field, so one undo step reverts it.
//!
//! ## Sections
//!
//! 1. **Basic**: label, name, placeholder, span, input width, disabled
//! 2. **Validation**: required, common validation, length limits, message, trigger
//! 3. **Options**: custom rows or a preset table, for choice fields
//! 4. **Type settings**: textarea rows, rating stars, upload limits

use dioxus::prelude::*;
use formwright_core::{
    CommonValidation, FieldType, GRID_COLUMNS, OptionItem, OptionValue, OptionsPreset,
    ValidationTrigger,
};
use formwright_schema::field::{MAX_RATING, MAX_WIDTH_PERCENT, MIN_RATING, MIN_WIDTH_PERCENT};
use formwright_schema::{FieldConfig, FieldUpdate, InputConfig, RatingConfig, UploadConfig, ValidationRule};

use crate::components::inputs::{
    ButtonGroup, NumberInput, Select, SelectOption, TextArea, TextInput, Toggle,
};
use crate::state::{APP_STATE, StatusLevel};

// ============================================================================
// Constants
// ============================================================================

/// Default panel width
pub const PANEL_WIDTH: &str = "320px";

/// Textarea row range
pub const MIN_TEXTAREA_ROWS: u32 = 1;
pub const MAX_TEXTAREA_ROWS: u32 = 10;

const OPTIONS_SOURCE_CUSTOM: &str = "custom";
const OPTIONS_SOURCE_PRESET: &str = "preset";

// ============================================================================
// Properties Panel Component
// ============================================================================

/// Main properties panel component
#[component]
pub fn PropertiesPanel() -> Element {
    let state = APP_STATE.read();
    let collapsed = state.ui.properties_collapsed;
    let field = state.selected_field().cloned();
    drop(state);

    if collapsed {
        return rsx! {
            aside {
                class: "w-10 bg-slate-800 border-l border-slate-700 flex flex-col items-center pt-2",
                button {
                    class: "p-1 text-slate-400 hover:text-white rounded",
                    title: "Show properties",
                    onclick: move |_| APP_STATE.write().ui.toggle_properties(),
                    "«"
                }
            }
        };
    }

    rsx! {
        aside {
            class: "properties-panel flex flex-col bg-slate-800 border-l border-slate-700 overflow-y-auto",
            style: "width: {PANEL_WIDTH};",

            div {
                class: "flex items-center justify-between px-4 py-2 border-b border-slate-700",
                h2 { class: "text-xs font-semibold uppercase tracking-wider text-slate-400", "Properties" }
                button {
                    class: "p-1 text-slate-400 hover:text-white rounded",
                    title: "Hide properties",
                    onclick: move |_| APP_STATE.write().ui.toggle_properties(),
                    "»"
                }
            }

            match field {
                Some(field) => rsx! {
                    FieldProperties { key: "{field.id}", field }
                },
                None => rsx! {
                    div {
                        class: "flex-1 flex flex-col items-center justify-center p-6 text-center text-slate-500",
                        span { class: "text-3xl mb-3", "🖱️" }
                        p { class: "text-sm", "Select a field on the canvas to edit its properties" }
                    }
                },
            }
        }
    }
}

// ============================================================================
// Field Properties
// ============================================================================

#[component]
fn FieldProperties(field: FieldConfig) -> Element {
    let type_name = field.field_type.display_name().to_string();
    let type_key = field.field_type.as_str().to_string();
    let delete_id = field.id.clone();

    rsx! {
        div {
            class: "flex-1 p-4 space-y-6",

            div {
                class: "flex items-center justify-between",
                span { class: "text-sm font-medium text-slate-200", "{type_name}" }
                span { class: "text-xs font-mono text-slate-500", "{type_key}" }
            }

            BasicSection { field: field.clone() }
            ValidationSection { field: field.clone() }

            if has_editable_options(&field) {
                OptionsSection { field: field.clone() }
            }

            TypeSection { field: field.clone() }

            button {
                class: "w-full py-2 rounded-lg bg-rose-600/10 border border-rose-500/40 text-rose-400 text-sm hover:bg-rose-600/20",
                onclick: move |_| {
                    let mut state = APP_STATE.write();
                    if state.remove_field(&delete_id) {
                        state.ui.set_status("Field removed", StatusLevel::Info);
                    }
                },
                "Delete field"
            }
        }
    }
}

#[component]
fn Section(title: String, children: Element) -> Element {
    rsx! {
        section {
            class: "space-y-3",
            h3 { class: "text-xs font-semibold uppercase tracking-wider text-slate-500 border-b border-slate-700 pb-1", "{title}" }
            {children}
        }
    }
}

// ============================================================================
// Basic
// ============================================================================

#[component]
fn BasicSection(field: FieldConfig) -> Element {
    let show_width = !field.field_type.is_choice()
        && !matches!(field.field_type, FieldType::Rating | FieldType::Upload);

    rsx! {
        Section {
            title: "Basic".to_string(),

            TextInput {
                label: Some("Label".to_string()),
                value: field.label.clone(),
                on_commit: move |v: String| apply(FieldUpdate::label(v)),
            }

            TextInput {
                label: Some("Name".to_string()),
                value: field.name.clone(),
                help_text: Some("Key the value is submitted under".to_string()),
                class: Some("font-mono".to_string()),
                on_commit: move |v: String| apply(FieldUpdate { name: Some(v), ..FieldUpdate::default() }),
            }

            TextArea {
                label: Some("Placeholder".to_string()),
                value: field.placeholder.clone().unwrap_or_default(),
                rows: 2,
                resizable: false,
                on_commit: move |v: String| apply(FieldUpdate {
                    placeholder: Some(none_if_blank(&v)),
                    ..FieldUpdate::default()
                }),
            }

            NumberInput {
                label: Some("Span".to_string()),
                value: f64::from(field.effective_span()),
                min: Some(1.0),
                max: Some(f64::from(GRID_COLUMNS)),
                help_text: Some(format!("Columns out of {}", GRID_COLUMNS)),
                on_change: move |v: f64| apply(FieldUpdate::span(v.round() as i32)),
            }

            if show_width {
                NumberInput {
                    label: Some("Input width".to_string()),
                    value: f64::from(field.width_percent()),
                    min: Some(f64::from(MIN_WIDTH_PERCENT)),
                    max: Some(f64::from(MAX_WIDTH_PERCENT)),
                    step: 5.0,
                    unit: Some("%".to_string()),
                    on_change: move |v: f64| apply(FieldUpdate {
                        input_config: Some(InputConfig { width_percent: Some(v.round() as u32) }),
                        ..FieldUpdate::default()
                    }),
                }
            }

            Toggle {
                label: Some("Disabled".to_string()),
                checked: field.is_disabled(),
                on_change: move |v: bool| apply(FieldUpdate { disabled: Some(v), ..FieldUpdate::default() }),
            }
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

#[component]
fn ValidationSection(field: FieldConfig) -> Element {
    let rule = field.validation.clone().unwrap_or_default();
    let common = rule.common();
    let limits_apply = length_limits_apply(&rule);

    let common_options: Vec<SelectOption> = CommonValidation::all()
        .iter()
        .map(|c| SelectOption::new(c.key(), c.display_name()))
        .collect();
    let trigger_options: Vec<SelectOption> = ValidationTrigger::all()
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.display_name()))
        .collect();
    let trigger = field.effective_trigger().as_str().to_string();

    let (f1, f2, f3, f4, f5, f6) = (
        field.clone(),
        field.clone(),
        field.clone(),
        field.clone(),
        field.clone(),
        field.clone(),
    );

    rsx! {
        Section {
            title: "Validation".to_string(),

            Toggle {
                label: Some("Required".to_string()),
                checked: rule.is_required(),
                on_change: move |v: bool| apply(merge_validation(&f1, |r| r.required = Some(v))),
            }

            Select {
                label: Some("Common validation".to_string()),
                value: common.key().to_string(),
                options: common_options,
                on_change: move |key: String| {
                    let current = f2.validation.clone().unwrap_or_default();
                    apply(FieldUpdate::validation(current.with_common(CommonValidation::from_key(&key))));
                },
            }

            div {
                class: "grid grid-cols-2 gap-2",
                TextInput {
                    label: Some("Min length".to_string()),
                    value: rule.min.map(|m| m.to_string()).unwrap_or_default(),
                    input_type: "number".to_string(),
                    disabled: !limits_apply,
                    on_commit: move |v: String| apply(merge_validation(&f3, |r| r.min = parse_limit(&v))),
                }
                TextInput {
                    label: Some("Max length".to_string()),
                    value: rule.max.map(|m| m.to_string()).unwrap_or_default(),
                    input_type: "number".to_string(),
                    disabled: !limits_apply,
                    on_commit: move |v: String| apply(merge_validation(&f4, |r| r.max = parse_limit(&v))),
                }
            }

            TextArea {
                label: Some("Error message".to_string()),
                value: rule.message.clone().unwrap_or_default(),
                placeholder: Some("Shown instead of the generated messages".to_string()),
                rows: 2,
                show_count: true,
                on_commit: move |v: String| apply(merge_validation(&f5, |r| r.message = none_if_blank(&v))),
            }

            Select {
                label: Some("Validate on".to_string()),
                value: trigger,
                options: trigger_options,
                on_change: move |key: String| {
                    let trigger = ValidationTrigger::from_str_opt(&key);
                    apply(merge_validation(&f6, |r| r.trigger = trigger));
                },
            }

            if let Some(pattern) = rule.pattern_str() {
                p { class: "text-xs font-mono text-slate-500 break-all", "{pattern}" }
            }
        }
    }
}

// ============================================================================
// Options
// ============================================================================

#[component]
fn OptionsSection(field: FieldConfig) -> Element {
    let source = if field.uses_preset() {
        OPTIONS_SOURCE_PRESET
    } else {
        OPTIONS_SOURCE_CUSTOM
    };
    let preset_options: Vec<SelectOption> = OptionsPreset::all()
        .iter()
        .map(|p| SelectOption::new(p.key(), p.label()))
        .collect();
    let preset_key = field
        .options_preset
        .map(|p| p.key().to_string())
        .unwrap_or_default();
    let options = field.options.clone().unwrap_or_default();
    let switch_field = field.clone();

    rsx! {
        Section {
            title: "Options".to_string(),

            ButtonGroup {
                value: source.to_string(),
                options: vec![
                    SelectOption::new(OPTIONS_SOURCE_CUSTOM, "Custom"),
                    SelectOption::new(OPTIONS_SOURCE_PRESET, "Preset"),
                ],
                on_change: move |choice: String| {
                    if choice == OPTIONS_SOURCE_CUSTOM && switch_field.uses_preset() {
                        apply(FieldUpdate::custom_options(options_for_custom(&switch_field)));
                    } else if choice == OPTIONS_SOURCE_PRESET && !switch_field.uses_preset() {
                        apply(FieldUpdate::preset(OptionsPreset::Education));
                    }
                },
            }

            if field.uses_preset() {
                Select {
                    label: Some("Preset".to_string()),
                    value: preset_key,
                    options: preset_options,
                    on_change: move |key: String| {
                        if let Some(preset) = OptionsPreset::from_key(&key) {
                            apply(FieldUpdate::preset(preset));
                        }
                    },
                }
                p {
                    class: "text-xs text-slate-500",
                    "{field.resolved_options().len()} options"
                }
            } else {
                div {
                    class: "space-y-2",
                    for (index, option) in options.iter().enumerate() {
                        OptionRow {
                            key: "{index}",
                            options: options.clone(),
                            index,
                            label: option.label.clone(),
                            value: option.value.to_string(),
                        }
                    }
                    button {
                        class: "w-full py-1.5 rounded-lg border border-dashed border-slate-600 text-slate-400 text-sm hover:border-indigo-500 hover:text-indigo-400",
                        onclick: {
                            let options = options.clone();
                            move |_| {
                                let mut next = options.clone();
                                next.push(new_option(&next));
                                apply(FieldUpdate::custom_options(next));
                            }
                        },
                        "+ Add option"
                    }
                }
            }
        }
    }
}

#[component]
fn OptionRow(options: Vec<OptionItem>, index: usize, label: String, value: String) -> Element {
    let (for_label, for_value, for_remove) = (options.clone(), options.clone(), options);

    rsx! {
        div {
            class: "flex items-center gap-2",
            input {
                class: "flex-1 min-w-0 px-2 py-1 bg-slate-800 border border-slate-700 rounded text-sm text-slate-100",
                value: "{label}",
                placeholder: "Label",
                onchange: move |e| apply(FieldUpdate::custom_options(edit_option(&for_label, index, Some(e.value()), None))),
            }
            input {
                class: "flex-1 min-w-0 px-2 py-1 bg-slate-800 border border-slate-700 rounded text-sm font-mono text-slate-100",
                value: "{value}",
                placeholder: "Value",
                onchange: move |e| apply(FieldUpdate::custom_options(edit_option(&for_value, index, None, Some(e.value())))),
            }
            button {
                class: "px-2 text-slate-500 hover:text-rose-400",
                title: "Remove option",
                onclick: move |_| {
                    let mut next = for_remove.clone();
                    if index < next.len() {
                        next.remove(index);
                    }
                    apply(FieldUpdate::custom_options(next));
                },
                "✕"
            }
        }
    }
}

// ============================================================================
// Type-specific settings
// ============================================================================

#[component]
fn TypeSection(field: FieldConfig) -> Element {
    match field.field_type {
        FieldType::Textarea => rsx! {
            Section {
                title: "Text area".to_string(),
                NumberInput {
                    label: Some("Rows".to_string()),
                    value: f64::from(field.textarea_rows()),
                    min: Some(f64::from(MIN_TEXTAREA_ROWS)),
                    max: Some(f64::from(MAX_TEXTAREA_ROWS)),
                    on_change: move |v: f64| apply(FieldUpdate { height: Some(v.round() as u32), ..FieldUpdate::default() }),
                }
            }
        },
        FieldType::Rating => {
            let rating = field.rating_config.clone().unwrap_or_default();
            let for_max = rating.clone();
            let for_half = rating.clone();
            rsx! {
                Section {
                    title: "Rating".to_string(),
                    NumberInput {
                        label: Some("Stars".to_string()),
                        value: f64::from(rating.count()),
                        min: Some(f64::from(MIN_RATING)),
                        max: Some(f64::from(MAX_RATING)),
                        on_change: move |v: f64| apply(FieldUpdate {
                            rating_config: Some(RatingConfig { max: Some(v.round() as u32), ..for_max.clone() }),
                            ..FieldUpdate::default()
                        }),
                    }
                    Toggle {
                        label: Some("Allow half stars".to_string()),
                        checked: rating.allows_half(),
                        on_change: move |v: bool| apply(FieldUpdate {
                            rating_config: Some(RatingConfig { allow_half: Some(v), ..for_half.clone() }),
                            ..FieldUpdate::default()
                        }),
                    }
                }
            }
        }
        FieldType::Upload => {
            let upload = field.upload_config.clone().unwrap_or_default();
            let (for_accept, for_size, for_count) = (upload.clone(), upload.clone(), upload.clone());
            rsx! {
                Section {
                    title: "Upload".to_string(),
                    TextInput {
                        label: Some("Accepted types".to_string()),
                        value: upload.accept().to_string(),
                        help_text: Some("e.g. image/*, .pdf".to_string()),
                        on_commit: move |v: String| apply(FieldUpdate {
                            upload_config: Some(UploadConfig { accept: none_if_blank(&v), ..for_accept.clone() }),
                            ..FieldUpdate::default()
                        }),
                    }
                    NumberInput {
                        label: Some("Max size".to_string()),
                        value: f64::from(upload.max_size.unwrap_or(3)),
                        min: Some(1.0),
                        unit: Some("MB".to_string()),
                        on_change: move |v: f64| apply(FieldUpdate {
                            upload_config: Some(UploadConfig { max_size: Some(v.round().max(1.0) as u32), ..for_size.clone() }),
                            ..FieldUpdate::default()
                        }),
                    }
                    NumberInput {
                        label: Some("Max files".to_string()),
                        value: f64::from(upload.max_count()),
                        min: Some(1.0),
                        on_change: move |v: f64| apply(FieldUpdate {
                            upload_config: Some(UploadConfig { max_count: Some(v.round().max(1.0) as u32), ..for_count.clone() }),
                            ..FieldUpdate::default()
                        }),
                    }
                }
            }
        }
        FieldType::Other(ref name) => rsx! {
            Section {
                title: "Unknown type".to_string(),
                p { class: "text-xs text-amber-400", "“{name}” has no dedicated widget and renders as a text input." }
            }
        },
        _ => rsx! {},
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Send an update for the selected field, reporting failures in the status bar
fn apply(update: FieldUpdate) {
    let mut state = APP_STATE.write();
    if let Err(e) = state.update_selected(update) {
        tracing::warn!("Field update rejected: {}", e);
        state.ui.set_error(&e);
    }
}

/// Update that edits the field's validation, keeping the rest of the rule
pub fn merge_validation(field: &FieldConfig, edit: impl FnOnce(&mut ValidationRule)) -> FieldUpdate {
    let mut rule = field.validation.clone().unwrap_or_default();
    edit(&mut rule);
    FieldUpdate::validation(rule)
}

/// Whether min/max length take effect
///
/// Any custom validator replaces the length limits, whether or not it is
/// one of the common validations.
pub fn length_limits_apply(rule: &ValidationRule) -> bool {
    rule.custom_key().is_none()
}

/// Whether the panel offers option editing for this field
///
/// Province, ethnicity and political fields carry fixed tables.
pub fn has_editable_options(field: &FieldConfig) -> bool {
    field.field_type.is_choice()
}

/// Next numbered option for a custom list
pub fn new_option(existing: &[OptionItem]) -> OptionItem {
    let n = existing.len() + 1;
    OptionItem::new(format!("选项{}", n), format!("option{}", n))
}

/// Option list with one row's label and/or value replaced
pub fn edit_option(
    options: &[OptionItem],
    index: usize,
    label: Option<String>,
    value: Option<String>,
) -> Vec<OptionItem> {
    let mut next = options.to_vec();
    if let Some(option) = next.get_mut(index) {
        if let Some(label) = label {
            option.label = label;
        }
        if let Some(value) = value {
            option.value = parse_option_value(&value, &option.value);
        }
    }
    next
}

/// Options kept when switching from a preset back to a custom list
pub fn options_for_custom(field: &FieldConfig) -> Vec<OptionItem> {
    match &field.options {
        Some(options) if !options.is_empty() => options.clone(),
        _ => vec![new_option(&[]), new_option(&[OptionItem::same("")])],
    }
}

/// Numeric option values stay numeric when edited to another number
fn parse_option_value(text: &str, previous: &OptionValue) -> OptionValue {
    if let OptionValue::Number(_) = previous {
        if let Ok(n) = text.trim().parse::<i64>() {
            return OptionValue::from(n);
        }
    }
    OptionValue::from(text)
}

/// Length limit from a text box; blank or invalid clears the limit
pub fn parse_limit(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

fn none_if_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
