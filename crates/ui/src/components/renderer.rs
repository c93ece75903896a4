//! # Dynamic Form Renderer
//!
//! Renders a [`FormConfig`] as a fillable form: one widget per field type,
//! laid out with the same 24-column grid the canvas uses.
//!
//! Values and error messages live in a [`FormSession`], which knows when to
//! validate a field (on change, on blur, or on submit) and is independent
//! of the widgets drawing it.

use dioxus::prelude::*;
use formwright_core::{FieldType, FormLayout, OptionItem, ValidationTrigger};
use formwright_schema::presets::{children_at, path_labels};
use formwright_schema::rules::{strip_whitespace, validate_field_value};
use formwright_schema::{FieldConfig, FormConfig, FormData, FormValidation, validate_form};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::file_ops::{self, UploadedFile};

// ============================================================================
// Form Session
// ============================================================================

/// Values and errors of one form being filled in
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    config: FormConfig,
    initial: FormData,
    values: FormData,
    /// First error message per field name
    errors: BTreeMap<String, String>,
}

impl FormSession {
    /// Start from field defaults overlaid with `initial_values`
    pub fn new(config: FormConfig, initial_values: &FormData) -> Self {
        let initial = config.initial_values(initial_values);
        Self {
            values: initial.clone(),
            initial,
            config,
            errors: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn values(&self) -> &FormData {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Store a new value for a field
    ///
    /// The field is validated when it validates on change, or when it is
    /// already showing an error so the message clears once fixed.
    pub fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
        let Some(field) = self.config.field_by_name(name) else {
            return;
        };
        if field.effective_trigger() == ValidationTrigger::OnChange
            || self.errors.contains_key(name)
        {
            self.validate_field(name);
        }
    }

    /// Store text typed into a text-entry widget
    pub fn set_text(&mut self, name: &str, text: &str) {
        let strips = self
            .config
            .field_by_name(name)
            .is_some_and(|f| f.field_type.strips_whitespace());
        let text = if strips {
            strip_whitespace(text)
        } else {
            text.to_string()
        };
        self.set_value(name, Value::String(text));
    }

    /// A widget lost focus
    pub fn blur(&mut self, name: &str) {
        let validates = self
            .config
            .field_by_name(name)
            .is_some_and(|f| f.effective_trigger() == ValidationTrigger::OnBlur);
        if validates {
            self.validate_field(name);
        }
    }

    /// Validate one field and update its error
    pub fn validate_field(&mut self, name: &str) -> bool {
        let Some(field) = self.config.field_by_name(name) else {
            return true;
        };
        let errors = validate_field_value(field, self.values.get(name));
        match errors.into_iter().next() {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
                false
            }
            None => {
                self.errors.remove(name);
                true
            }
        }
    }

    /// Validate every field
    ///
    /// Returns the submitted values when the form is valid.
    pub fn submit(&mut self) -> Result<FormData, FormValidation> {
        let validation = validate_form(&self.config, &self.values);
        self.errors = validation
            .errors
            .iter()
            .filter_map(|(name, messages)| messages.first().map(|m| (name.clone(), m.clone())))
            .collect();
        if validation.is_valid() {
            Ok(self.values.clone())
        } else {
            Err(validation)
        }
    }

    /// Back to the initial values with no errors
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
    }
}

// ============================================================================
// Value helpers
// ============================================================================

/// Text shown for a scalar value
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Segments of a list value, as text
pub fn value_path(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| value_text(Some(v))).collect(),
        _ => Vec::new(),
    }
}

/// JSON value of the option whose text form is `key`
pub fn option_json(options: &[OptionItem], key: &str) -> Option<Value> {
    options
        .iter()
        .find(|o| o.value.to_string() == key)
        .map(|o| o.value.to_json())
}

/// Whether a checkbox group value contains `option`
pub fn is_checked(value: Option<&Value>, option: &OptionItem) -> bool {
    match value {
        Some(Value::Array(items)) => items.iter().any(|v| option.value.matches(v)),
        _ => false,
    }
}

/// Checkbox group value after toggling `option`
pub fn toggle_choice(value: Option<&Value>, option: &OptionItem) -> Value {
    let mut items = match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };
    if let Some(pos) = items.iter().position(|v| option.value.matches(v)) {
        items.remove(pos);
    } else {
        items.push(option.value.to_json());
    }
    Value::Array(items)
}

/// Cascader value after choosing `key` at `depth`; deeper choices are dropped
pub fn cascade_select(
    options: &[OptionItem],
    value: Option<&Value>,
    depth: usize,
    key: &str,
) -> Value {
    let mut path = value_path(value);
    path.truncate(depth);
    if !key.is_empty() {
        path.push(key.to_string());
    }

    let mut level = options;
    let mut selected = Vec::with_capacity(path.len());
    for segment in &path {
        let Some(option) = level.iter().find(|o| o.value.to_string() == *segment) else {
            break;
        };
        selected.push(option.value.to_json());
        level = &option.children;
    }
    Value::Array(selected)
}

/// Rating value as a number of stars
pub fn rating_value(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

/// JSON value for a star rating; whole stars stay integers
pub fn rating_json(stars: f64) -> Value {
    if stars.fract() == 0.0 {
        Value::from(stars as u64)
    } else {
        Value::from(stars)
    }
}

/// Files attached to an upload field
pub fn uploaded_files(value: Option<&Value>) -> Vec<UploadedFile> {
    match value {
        Some(v @ Value::Array(_)) => serde_json::from_value(v.clone()).unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn files_json(files: &[UploadedFile]) -> Value {
    serde_json::to_value(files).unwrap_or(Value::Array(Vec::new()))
}

/// Element keys for the rendered fields, one per field and all distinct
///
/// Stored configurations carry no field ids, so fields without an id (or
/// repeating one) are keyed by position and name instead.
pub fn item_keys(fields: &[FieldConfig]) -> Vec<String> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            if !field.id.is_empty() && seen.insert(field.id.clone()) {
                field.id.clone()
            } else {
                format!("#{}:{}", index, field.name)
            }
        })
        .collect()
}

// ============================================================================
// Dynamic Form Component
// ============================================================================

/// Properties for the DynamicForm component
#[derive(Props, Clone, PartialEq)]
pub struct DynamicFormProps {
    /// Form to render
    pub config: FormConfig,

    /// Values overriding the fields' defaults
    #[props(default)]
    pub initial_values: FormData,

    #[props(default = "提交".to_string())]
    pub submit_text: String,

    #[props(default = true)]
    pub show_reset: bool,

    #[props(default = false)]
    pub show_cancel: bool,

    /// Called with the values once every field passes validation
    #[props(default)]
    pub on_submit: EventHandler<FormData>,

    /// Called when submitting finds errors
    #[props(default)]
    pub on_invalid: EventHandler<FormValidation>,

    #[props(default)]
    pub on_cancel: EventHandler<()>,
}

/// Form rendered from a configuration
///
/// Values live for as long as the component does; key it by form to start
/// over when a different form is shown.
#[component]
pub fn DynamicForm(props: DynamicFormProps) -> Element {
    let mut session = use_signal(|| FormSession::new(props.config.clone(), &props.initial_values));

    let layout = props.config.layout;
    let fields = props.config.fields.clone();
    let keys = item_keys(&fields);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let result = session.write().submit();
        match result {
            Ok(data) => props.on_submit.call(data),
            Err(validation) => {
                tracing::debug!("Form has {} error(s)", validation.error_count());
                props.on_invalid.call(validation);
            }
        }
    };

    rsx! {
        form {
            class: "dynamic-form",
            onsubmit: handle_submit,

            div {
                class: "flex flex-wrap -mx-2",
                for (key, field) in keys.into_iter().zip(fields) {
                    FormItem { key: "{key}", field, layout, session }
                }
            }

            div {
                class: "flex justify-center gap-3 mt-6",
                button {
                    class: "px-6 py-2 rounded-lg bg-indigo-600 text-white text-sm font-medium hover:bg-indigo-500",
                    r#type: "submit",
                    "{props.submit_text}"
                }
                if props.show_reset {
                    button {
                        class: "px-6 py-2 rounded-lg border border-slate-300 text-slate-600 text-sm hover:bg-slate-50",
                        r#type: "button",
                        onclick: move |_| session.write().reset(),
                        "重置"
                    }
                }
                if props.show_cancel {
                    button {
                        class: "px-6 py-2 rounded-lg text-slate-500 text-sm hover:text-slate-700",
                        r#type: "button",
                        onclick: move |_| props.on_cancel.call(()),
                        "取消"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Form Item
// ============================================================================

#[component]
fn FormItem(field: FieldConfig, layout: FormLayout, session: Signal<FormSession>) -> Element {
    let percent = field.column_percent();
    let error = session.read().error(&field.name).map(str::to_string);
    let required = field.is_required();

    let item_class = match layout {
        FormLayout::Horizontal => "flex items-start gap-3",
        FormLayout::Vertical => "flex flex-col gap-1.5",
        FormLayout::Inline => "inline-flex items-center gap-2",
    };
    let label_class = match layout {
        FormLayout::Horizontal => "w-28 flex-shrink-0 pt-2 text-right text-sm text-slate-600",
        _ => "text-sm text-slate-600",
    };
    let column_style = if layout == FormLayout::Inline {
        String::from("flex: 0 0 auto;")
    } else {
        format!("flex: 0 0 {percent}%; max-width: {percent}%;")
    };

    rsx! {
        div {
            class: "px-2 mb-5",
            style: "{column_style}",

            div {
                class: "{item_class}",
                label {
                    class: "{label_class}",
                    if required {
                        span { class: "text-rose-500 mr-0.5", "*" }
                    }
                    "{field.label}"
                }
                div {
                    class: "flex-1 min-w-0",
                    FieldWidget { field: field.clone(), session }
                    if let Some(error) = error {
                        p { class: "mt-1 text-xs text-rose-500", "{error}" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Widgets
// ============================================================================

const WIDGET_CLASS: &str = "w-full px-3 py-2 rounded-md border border-slate-300 bg-white text-sm text-slate-800 focus:outline-none focus:ring-2 focus:ring-indigo-500/30 focus:border-indigo-500 disabled:bg-slate-100 disabled:cursor-not-allowed";

#[component]
fn FieldWidget(field: FieldConfig, session: Signal<FormSession>) -> Element {
    match field.field_type {
        FieldType::Textarea => rsx! { TextAreaWidget { field, session } },
        FieldType::Radio => rsx! { RadioWidget { field, session } },
        FieldType::Checkbox => rsx! { CheckboxWidget { field, session } },
        FieldType::Select
        | FieldType::Province
        | FieldType::Ethnicity
        | FieldType::Political => rsx! { SelectWidget { field, session } },
        FieldType::Cascader => rsx! { CascaderWidget { field, session } },
        FieldType::Date => rsx! { TextWidget { field, session, input_type: "date" } },
        FieldType::Time => rsx! { TextWidget { field, session, input_type: "time" } },
        FieldType::Rating => rsx! { RatingWidget { field, session } },
        FieldType::Upload => rsx! { UploadWidget { field, session } },
        FieldType::Phone => rsx! { TextWidget { field, session, input_type: "tel" } },
        // Input, id card, name, age, wechat, company, position and unknown types
        _ => rsx! { TextWidget { field, session, input_type: "text" } },
    }
}

#[component]
fn TextWidget(field: FieldConfig, mut session: Signal<FormSession>, input_type: &'static str) -> Element {
    let value = value_text(session.read().value(&field.name));
    let width = field.width_percent();
    let (input_name, blur_name) = (field.name.clone(), field.name.clone());

    rsx! {
        input {
            class: WIDGET_CLASS,
            style: "width: {width}%;",
            r#type: input_type,
            step: if input_type == "time" { "1" } else { "" },
            value: "{value}",
            placeholder: field.display_placeholder().unwrap_or_default(),
            disabled: field.is_disabled(),
            oninput: move |e| session.write().set_text(&input_name, &e.value()),
            onblur: move |_| session.write().blur(&blur_name),
        }
    }
}

#[component]
fn TextAreaWidget(field: FieldConfig, mut session: Signal<FormSession>) -> Element {
    let value = value_text(session.read().value(&field.name));
    let width = field.width_percent();
    let rows = field.textarea_rows();
    let (input_name, blur_name) = (field.name.clone(), field.name.clone());

    rsx! {
        textarea {
            class: "{WIDGET_CLASS} resize-y",
            style: "width: {width}%;",
            rows: "{rows}",
            placeholder: field.display_placeholder().unwrap_or_default(),
            disabled: field.is_disabled(),
            value: "{value}",
            oninput: move |e| session.write().set_text(&input_name, &e.value()),
            onblur: move |_| session.write().blur(&blur_name),
        }
    }
}

#[component]
fn RadioWidget(field: FieldConfig, mut session: Signal<FormSession>) -> Element {
    let options = field.resolved_options();
    let current = session.read().value(&field.name).cloned();
    let disabled = field.is_disabled();

    rsx! {
        div {
            class: "flex flex-wrap gap-x-5 gap-y-2 py-1.5",
            for option in options {
                label {
                    key: "{option.value}",
                    class: "inline-flex items-center gap-1.5 text-sm text-slate-700 cursor-pointer",
                    input {
                        r#type: "radio",
                        name: "{field.name}",
                        checked: current.as_ref().is_some_and(|v| option.value.matches(v)),
                        disabled,
                        onchange: {
                            let name = field.name.clone();
                            let value = option.value.to_json();
                            move |_| {
                                let mut s = session.write();
                                s.set_value(&name, value.clone());
                                s.blur(&name);
                            }
                        },
                    }
                    "{option.label}"
                }
            }
        }
    }
}

#[component]
fn CheckboxWidget(field: FieldConfig, mut session: Signal<FormSession>) -> Element {
    let options = field.resolved_options();
    let current = session.read().value(&field.name).cloned();
    let disabled = field.is_disabled();

    rsx! {
        div {
            class: "flex flex-wrap gap-x-5 gap-y-2 py-1.5",
            for option in options {
                label {
                    key: "{option.value}",
                    class: "inline-flex items-center gap-1.5 text-sm text-slate-700 cursor-pointer",
                    input {
                        r#type: "checkbox",
                        checked: is_checked(current.as_ref(), &option),
                        disabled,
                        onchange: {
                            let name = field.name.clone();
                            let option = option.clone();
                            move |_| {
                                let mut s = session.write();
                                let next = toggle_choice(s.value(&name), &option);
                                s.set_value(&name, next);
                                s.blur(&name);
                            }
                        },
                    }
                    "{option.label}"
                }
            }
        }
    }
}

#[component]
fn SelectWidget(field: FieldConfig, mut session: Signal<FormSession>) -> Element {
    let options = field.resolved_options();
    let current = value_text(session.read().value(&field.name));
    let width = field.width_percent();
    let placeholder = field
        .display_placeholder()
        .unwrap_or_else(|| "请选择".to_string());
    let name = field.name.clone();
    let lookup = options.clone();

    rsx! {
        select {
            class: WIDGET_CLASS,
            style: "width: {width}%;",
            disabled: field.is_disabled(),
            onchange: move |e| {
                let value = option_json(&lookup, &e.value()).unwrap_or(Value::Null);
                let mut s = session.write();
                s.set_value(&name, value);
                s.blur(&name);
            },
            option { value: "", selected: current.is_empty(), "{placeholder}" }
            for option in options {
                option {
                    key: "{option.value}",
                    value: "{option.value}",
                    selected: option.value.to_string() == current,
                    "{option.label}"
                }
            }
        }
    }
}

#[component]
fn CascaderWidget(field: FieldConfig, mut session: Signal<FormSession>) -> Element {
    let options = field.resolved_options();
    let path = value_path(session.read().value(&field.name));
    let labels = path_labels(&options, &path);
    let disabled = field.is_disabled();

    // One select per level, plus the next level while one exists
    let mut levels: Vec<(usize, Vec<OptionItem>, String)> = Vec::new();
    for depth in 0..=path.len() {
        let level = children_at(&options, &path[..depth]);
        if level.is_empty() {
            break;
        }
        let selected = path.get(depth).cloned().unwrap_or_default();
        levels.push((depth, level.to_vec(), selected));
    }

    rsx! {
        div {
            class: "flex flex-wrap gap-2",
            for (depth, level, selected) in levels {
                select {
                    key: "{depth}",
                    class: "{WIDGET_CLASS} flex-1 min-w-[8rem]",
                    disabled,
                    onchange: {
                        let name = field.name.clone();
                        let all = options.clone();
                        move |e: FormEvent| {
                            let mut s = session.write();
                            let next = cascade_select(&all, s.value(&name), depth, &e.value());
                            s.set_value(&name, next);
                            s.blur(&name);
                        }
                    },
                    option { value: "", selected: selected.is_empty(), "请选择" }
                    for option in level {
                        option {
                            key: "{option.value}",
                            value: "{option.value}",
                            selected: option.value.to_string() == selected,
                            "{option.label}"
                        }
                    }
                }
            }
        }
        if !labels.is_empty() {
            p { class: "mt-1 text-xs text-slate-500", "{labels.join(\" / \")}" }
        }
    }
}

#[component]
fn RatingWidget(field: FieldConfig, session: Signal<FormSession>) -> Element {
    let rating = field.rating_config.clone().unwrap_or_default();
    let count = rating.count();
    let half = rating.allows_half();
    let current = rating_value(session.read().value(&field.name));
    let disabled = field.is_disabled();

    rsx! {
        div {
            class: "flex items-center gap-1 py-1",
            for star in 1..=count {
                StarButton {
                    key: "{star}",
                    star: f64::from(star),
                    current,
                    half,
                    disabled,
                    name: field.name.clone(),
                    session,
                }
            }
            if current > 0.0 {
                span { class: "ml-2 text-sm text-slate-500", "{current}" }
            }
        }
    }
}

#[component]
fn StarButton(
    star: f64,
    current: f64,
    half: bool,
    disabled: bool,
    name: String,
    mut session: Signal<FormSession>,
) -> Element {
    let glyph = if current >= star {
        "★"
    } else if half && current >= star - 0.5 {
        "⯪"
    } else {
        "☆"
    };
    let pick = Callback::new(move |stars: f64| {
        if disabled {
            return;
        }
        let mut s = session.write();
        s.set_value(&name, rating_json(stars));
        s.blur(&name);
    });

    rsx! {
        span {
            class: "relative text-2xl leading-none text-amber-400 select-none",
            class: if disabled { "opacity-50" } else { "cursor-pointer" },
            "{glyph}"
            if half {
                span {
                    class: "absolute inset-y-0 left-0 w-1/2",
                    onclick: move |_| pick.call(star - 0.5),
                }
                span {
                    class: "absolute inset-y-0 right-0 w-1/2",
                    onclick: move |_| pick.call(star),
                }
            } else {
                span {
                    class: "absolute inset-0",
                    onclick: move |_| pick.call(star),
                }
            }
        }
    }
}

#[component]
fn UploadWidget(field: FieldConfig, mut session: Signal<FormSession>) -> Element {
    let upload = field.upload_config.clone().unwrap_or_default();
    let files = uploaded_files(session.read().value(&field.name));
    let mut notices = use_signal(Vec::<String>::new);
    let can_add = !field.is_disabled() && files.len() < upload.max_count() as usize;
    let accept = upload.accept().to_string();
    let max_count = upload.max_count();

    let pick_name = field.name.clone();
    let pick_config = upload.clone();
    let existing = files.len();
    let handle_pick = move |_| {
        let name = pick_name.clone();
        let config = pick_config.clone();
        spawn(async move {
            match file_ops::pick_upload_files(&config, existing).await {
                Ok(selection) => {
                    let mut s = session.write();
                    let mut all = uploaded_files(s.value(&name));
                    all.extend(selection.accepted);
                    s.set_value(&name, files_json(&all));
                    s.blur(&name);
                    notices.set(selection.rejected);
                }
                Err(e) => {
                    if file_ops::log_failure("Upload", &e) {
                        notices.set(vec![e.to_string()]);
                    }
                }
            }
        });
    };

    rsx! {
        div {
            class: "space-y-2",
            button {
                class: "px-4 py-2 rounded-md border border-dashed border-slate-300 text-sm text-slate-600 hover:border-indigo-400 hover:text-indigo-600 disabled:opacity-50",
                r#type: "button",
                disabled: !can_add,
                onclick: handle_pick,
                "选择文件"
            }
            span { class: "ml-2 text-xs text-slate-400", "{accept}，最多 {max_count} 个" }

            for (index, file) in files.iter().enumerate() {
                div {
                    key: "{index}",
                    class: "flex items-center justify-between px-3 py-1.5 rounded bg-slate-50 text-sm text-slate-700",
                    span { class: "truncate", "📎 {file.name}" }
                    button {
                        class: "text-slate-400 hover:text-rose-500",
                        r#type: "button",
                        onclick: {
                            let name = field.name.clone();
                            move |_| {
                                let mut s = session.write();
                                let mut all = uploaded_files(s.value(&name));
                                if index < all.len() {
                                    all.remove(index);
                                }
                                s.set_value(&name, files_json(&all));
                            }
                        },
                        "✕"
                    }
                }
            }

            for notice in notices.read().iter() {
                p { class: "text-xs text-amber-600", "{notice}" }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
