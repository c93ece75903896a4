//! # Input Components
//!
//! Styled controls used by the property panel and the designer chrome:
//! - **TextInput**: Single-line text input
//! - **TextArea**: Multi-line text input
//! - **NumberInput**: Numeric input with optional min/max and steppers
//! - **Select**: Dropdown selection
//! - **Toggle**: Clickable on/off card
//! - **ButtonGroup**: Mutually exclusive choices
//!
//! The renderer draws the filled-in form with its own widgets; these are
//! the designer's controls.

use dioxus::prelude::*;

// ============================================================================
// Text Input Component
// ============================================================================

/// Properties for TextInput component
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    /// Input value
    pub value: String,

    /// Label text (optional)
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder text
    #[props(default)]
    pub placeholder: Option<String>,

    /// Help text shown below input
    #[props(default)]
    pub help_text: Option<String>,

    /// Error message (shows error state)
    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// Input type (text, url, ...)
    #[props(default = "text".to_string())]
    pub input_type: String,

    /// Additional CSS classes
    #[props(default)]
    pub class: Option<String>,

    /// Change handler, on every keystroke
    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Commit handler, when the input loses focus after an edit
    #[props(default)]
    pub on_commit: EventHandler<String>,

    /// Enter key handler
    #[props(default)]
    pub on_enter: EventHandler<String>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled, &props.class);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                    if props.required {
                        span { class: "text-rose-400 ml-0.5", "*" }
                    }
                }
            }

            input {
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onchange: move |e| props.on_commit.call(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        props.on_enter.call(props.value.clone());
                    }
                },
            }

            HelpOrError { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

/// Properties for TextArea component
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    /// Number of visible rows
    #[props(default = 3)]
    pub rows: usize,

    #[props(default = false)]
    pub disabled: bool,

    /// Whether to show character count
    #[props(default = false)]
    pub show_count: bool,

    #[props(default = true)]
    pub resizable: bool,

    #[props(default)]
    pub class: Option<String>,

    #[props(default)]
    pub on_change: EventHandler<String>,

    #[props(default)]
    pub on_commit: EventHandler<String>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let char_count = props.value.chars().count();
    let textarea_class = build_textarea_class(
        props.error.is_some(),
        props.disabled,
        props.resizable,
        &props.class,
    );

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                }
            }

            textarea {
                class: "{textarea_class}",
                rows: "{props.rows}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onchange: move |e| props.on_commit.call(e.value()),
                "{props.value}"
            }

            div {
                class: "flex justify-between items-center",

                HelpOrError { error: props.error.clone(), help_text: props.help_text.clone() }

                if props.show_count {
                    span { class: "text-xs text-slate-500 mt-1", "{char_count}" }
                }
            }
        }
    }
}

// ============================================================================
// Number Input Component
// ============================================================================

/// Properties for NumberInput component
#[derive(Props, Clone, PartialEq)]
pub struct NumberInputProps {
    pub value: f64,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub min: Option<f64>,

    #[props(default)]
    pub max: Option<f64>,

    #[props(default = 1.0)]
    pub step: f64,

    #[props(default = false)]
    pub disabled: bool,

    /// Unit suffix (e.g., "px", "%")
    #[props(default)]
    pub unit: Option<String>,

    #[props(default)]
    pub on_change: EventHandler<f64>,
}

/// Numeric input with increment/decrement buttons
#[component]
pub fn NumberInput(props: NumberInputProps) -> Element {
    let input_class = build_input_class(false, props.disabled, &None);
    let (min, max, step, current) = (props.min, props.max, props.step, props.value);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                }
            }

            div {
                class: "relative flex items-center",

                button {
                    class: "absolute left-0 h-full px-3 text-slate-400 hover:text-slate-200 rounded-l-lg disabled:opacity-50",
                    r#type: "button",
                    disabled: props.disabled || min.is_some_and(|m| current <= m),
                    onclick: move |_| props.on_change.call(clamp_value(current - step, min, max)),
                    "−"
                }

                input {
                    class: "{input_class} text-center px-10",
                    r#type: "number",
                    value: "{current}",
                    disabled: props.disabled,
                    min: min.map(|v| v.to_string()),
                    max: max.map(|v| v.to_string()),
                    step: "{step}",
                    onchange: move |e| {
                        if let Ok(v) = e.value().parse::<f64>() {
                            props.on_change.call(clamp_value(v, min, max));
                        }
                    },
                }

                if let Some(unit) = &props.unit {
                    span {
                        class: "absolute right-10 text-slate-400 text-sm pointer-events-none",
                        "{unit}"
                    }
                }

                button {
                    class: "absolute right-0 h-full px-3 text-slate-400 hover:text-slate-200 rounded-r-lg disabled:opacity-50",
                    r#type: "button",
                    disabled: props.disabled || max.is_some_and(|m| current >= m),
                    onclick: move |_| props.on_change.call(clamp_value(current + step, min, max)),
                    "+"
                }
            }

            HelpOrError { error: None, help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// A single option for the Select component
#[derive(Clone, PartialEq, Debug)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Properties for Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default)]
    pub label: Option<String>,

    /// Placeholder (shown when no selection)
    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let select_class = build_select_class(props.disabled);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                }
            }

            select {
                class: "{select_class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                if let Some(placeholder) = &props.placeholder {
                    option {
                        value: "",
                        selected: props.value.is_empty(),
                        "{placeholder}"
                    }
                }

                for option in &props.options {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }

            HelpOrError { error: None, help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Toggle Component
// ============================================================================

/// Properties for Toggle component
#[derive(Props, Clone, PartialEq)]
pub struct ToggleProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Toggle styled as a clickable card
#[component]
pub fn Toggle(props: ToggleProps) -> Element {
    let card_class = toggle_card_class(props.checked, props.disabled);

    let handle_click = move |_| {
        if !props.disabled {
            props.on_change.call(!props.checked);
        }
    };

    rsx! {
        div {
            class: "{card_class}",
            onclick: handle_click,

            div {
                class: "flex-shrink-0 w-5 h-5 rounded border-2 flex items-center justify-center transition-colors",
                class: if props.checked { "bg-indigo-600 border-indigo-600" } else { "bg-transparent border-slate-500" },

                if props.checked {
                    svg {
                        class: "w-3 h-3 text-white",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "3",
                        view_box: "0 0 24 24",
                        path { d: "M5 13l4 4L19 7" }
                    }
                }
            }

            if props.label.is_some() || props.help_text.is_some() {
                div {
                    class: "flex flex-col min-w-0 flex-1",

                    if let Some(label) = &props.label {
                        span { class: "text-sm font-medium text-slate-200 leading-tight", "{label}" }
                    }

                    if let Some(help) = &props.help_text {
                        span { class: "text-xs text-slate-400 mt-0.5 leading-tight", "{help}" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Button Group Component
// ============================================================================

/// Properties for ButtonGroup component
#[derive(Props, Clone, PartialEq)]
pub struct ButtonGroupProps {
    pub value: String,

    pub options: Vec<SelectOption>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Button group for mutually exclusive options
#[component]
pub fn ButtonGroup(props: ButtonGroupProps) -> Element {
    rsx! {
        div {
            class: "button-group inline-flex rounded-lg overflow-hidden border border-slate-700",

            for (i, option) in props.options.iter().enumerate() {
                button {
                    key: "{option.value}",
                    class: "px-3 py-1.5 text-sm transition-colors",
                    class: if props.value == option.value {
                        "bg-indigo-600 text-white"
                    } else {
                        "bg-slate-800 text-slate-300 hover:bg-slate-700"
                    },
                    class: if i > 0 { "border-l border-slate-700" } else { "" },
                    disabled: props.disabled,
                    onclick: {
                        let value = option.value.clone();
                        move |_| props.on_change.call(value.clone())
                    },
                    "{option.label}"
                }
            }
        }
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

#[component]
fn HelpOrError(error: Option<String>, help_text: Option<String>) -> Element {
    rsx! {
        if let Some(error) = error {
            p { class: "mt-1 text-xs text-rose-400", "{error}" }
        } else if let Some(help) = help_text {
            p { class: "mt-1 text-xs text-slate-500", "{help}" }
        }
    }
}

/// Build input class string
fn build_input_class(has_error: bool, disabled: bool, extra: &Option<String>) -> String {
    let mut classes = vec![
        "w-full",
        "px-3",
        "py-2",
        "bg-slate-800",
        "border",
        "rounded-lg",
        "text-sm",
        "text-slate-100",
        "placeholder-slate-500",
        "transition-colors",
        "focus:outline-none",
        "focus:ring-2",
    ];

    if has_error {
        classes.extend(["border-rose-500", "focus:ring-rose-500/30"]);
    } else {
        classes.extend(["border-slate-700", "focus:ring-indigo-500/30"]);
    }

    if disabled {
        classes.extend(["opacity-50", "cursor-not-allowed"]);
    }

    let mut result = classes.join(" ");
    if let Some(extra) = extra {
        result.push(' ');
        result.push_str(extra);
    }
    result
}

fn build_textarea_class(
    has_error: bool,
    disabled: bool,
    resizable: bool,
    extra: &Option<String>,
) -> String {
    let mut class = build_input_class(has_error, disabled, extra);
    class.push_str(if resizable { " resize-y" } else { " resize-none" });
    class
}

fn build_select_class(disabled: bool) -> String {
    let mut class = build_input_class(false, disabled, &None);
    class.push_str(" appearance-none pr-10");
    if !disabled {
        class.push_str(" cursor-pointer");
    }
    class
}

fn toggle_card_class(checked: bool, disabled: bool) -> String {
    let mut class = String::from(
        "toggle-card flex items-center gap-3 p-3 rounded-lg border cursor-pointer transition-all select-none",
    );
    class.push_str(if checked {
        " bg-indigo-600/10 border-indigo-500/50"
    } else {
        " bg-slate-800/50 border-slate-600/50"
    });
    if disabled {
        class.push_str(" opacity-50 cursor-not-allowed");
    } else {
        class.push_str(" hover:bg-slate-700/50");
    }
    class
}

/// Clamp a value between optional min and max
fn clamp_value(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut result = value;
    if let Some(min) = min {
        result = result.max(min);
    }
    if let Some(max) = max {
        result = result.min(max);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_input_class() {
        let class = build_input_class(false, false, &None);
        assert!(class.contains("border-slate-700"));
        assert!(!class.contains("border-rose-500"));
        assert!(!class.contains("opacity-50"));
    }

    #[test]
    fn test_build_input_class_error_and_extra() {
        let class = build_input_class(true, false, &Some("font-mono".to_string()));
        assert!(class.contains("border-rose-500"));
        assert!(class.ends_with("font-mono"));
    }

    #[test]
    fn test_build_input_class_disabled() {
        let class = build_input_class(false, true, &None);
        assert!(class.contains("cursor-not-allowed"));
    }

    #[test]
    fn test_textarea_resize() {
        assert!(build_textarea_class(false, false, true, &None).contains("resize-y"));
        assert!(build_textarea_class(false, false, false, &None).contains("resize-none"));
    }

    #[test]
    fn test_select_class() {
        assert!(build_select_class(false).contains("cursor-pointer"));
        assert!(!build_select_class(true).contains("cursor-pointer"));
    }

    #[test]
    fn test_toggle_card_class() {
        assert!(toggle_card_class(true, false).contains("border-indigo-500/50"));
        assert!(toggle_card_class(false, true).contains("opacity-50"));
    }

    #[test]
    fn test_clamp_value() {
        assert_eq!(clamp_value(5.0, Some(1.0), Some(24.0)), 5.0);
        assert_eq!(clamp_value(-5.0, Some(1.0), Some(24.0)), 1.0);
        assert_eq!(clamp_value(30.0, Some(1.0), Some(24.0)), 24.0);
        assert_eq!(clamp_value(5.0, None, None), 5.0);
    }
}
