//! Field configuration
//!
//! This module contains `FieldConfig`, the serializable description of one
//! form input with its layout and validation settings, together with the
//! partial-update type the property panel edits it through.

use crate::presets;
use formwright_core::{
    CommonValidation, FieldId, FieldType, FormError, FormResult, OptionItem, OptionsPreset,
    Validatable, ValidationTrigger, clamp_span, column_percent, generate_id,
};
use serde::{Deserialize, Serialize};

/// Width given to fields that don't specify one
pub const DEFAULT_FIELD_WIDTH: u32 = 300;

/// Height given to fields that don't specify one
pub const DEFAULT_FIELD_HEIGHT: u32 = 32;

/// Default number of textarea rows
pub const DEFAULT_TEXTAREA_ROWS: u32 = 4;

/// Allowed input width percentages
pub const MIN_WIDTH_PERCENT: u32 = 50;
pub const MAX_WIDTH_PERCENT: u32 = 100;

/// Allowed rating star counts
pub const MIN_RATING: u32 = 1;
pub const MAX_RATING: u32 = 10;
pub const DEFAULT_RATING: u32 = 5;

/// Prefix of generated field ids
pub const FIELD_ID_PREFIX: &str = "field";

// ============================================================================
// FieldConfig
// ============================================================================

/// One input on a form
///
/// `id` only lives in the designer; stored and exported configurations
/// omit it and fresh ids are generated when they are loaded again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: FieldId,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Key the value is submitted under
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Grid columns occupied; out-of-range values are clamped at layout time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height, or row count for textareas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_config: Option<InputConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_config: Option<RatingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_config: Option<UploadConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionItem>>,

    /// Unrecognised preset keys read as no preset, leaving `options` in use
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_preset"
    )]
    pub options_preset: Option<OptionsPreset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl FieldConfig {
    /// Create a new field with a freshly generated id
    pub fn new(field_type: FieldType, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: generate_field_id(),
            field_type,
            name: name.into(),
            label: label.into(),
            placeholder: None,
            span: None,
            width: None,
            height: None,
            disabled: None,
            validation: None,
            input_config: None,
            rating_config: None,
            upload_config: None,
            options: None,
            options_preset: None,
            default_value: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the grid span
    pub fn with_span(mut self, span: i32) -> Self {
        self.span = Some(span);
        self
    }

    /// Set the designer width and height
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the validation rule
    pub fn with_validation(mut self, validation: ValidationRule) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Mark the field as required, keeping any other rule settings
    pub fn required(mut self) -> Self {
        self.validation.get_or_insert_with(ValidationRule::default).required = Some(true);
        self
    }

    /// Set the input width percentage
    pub fn with_width_percent(mut self, percent: u32) -> Self {
        self.input_config = Some(InputConfig {
            width_percent: Some(percent),
        });
        self
    }

    /// Set the rating configuration
    pub fn with_rating(mut self, max: u32, allow_half: bool) -> Self {
        self.rating_config = Some(RatingConfig {
            max: Some(max),
            allow_half: Some(allow_half),
        });
        self
    }

    /// Set the upload configuration
    pub fn with_upload(mut self, accept: impl Into<String>, max_size: u32, max_count: u32) -> Self {
        self.upload_config = Some(UploadConfig {
            accept: Some(accept.into()),
            max_size: Some(max_size),
            max_count: Some(max_count),
        });
        self
    }

    /// Set custom options
    pub fn with_options(mut self, options: Vec<OptionItem>) -> Self {
        self.options = Some(options);
        self
    }

    /// Use a preset option list instead of custom options
    pub fn with_preset(mut self, preset: OptionsPreset) -> Self {
        self.options_preset = Some(preset);
        self.options = None;
        self
    }

    /// Set the initial value shown when the form is rendered
    pub fn with_default_value(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Mark the field as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = Some(true);
        self
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Span clamped into the grid
    pub fn effective_span(&self) -> i32 {
        clamp_span(self.span)
    }

    /// Column width as a percentage of the row
    pub fn column_percent(&self) -> f64 {
        column_percent(self.span)
    }

    /// Heading shown on designer cards
    pub fn canvas_heading(&self) -> String {
        format!("{} (span: {})", self.label, self.effective_span())
    }

    pub fn is_required(&self) -> bool {
        self.validation.as_ref().is_some_and(|v| v.is_required())
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// Trigger the renderer listens on
    pub fn effective_trigger(&self) -> ValidationTrigger {
        self.validation
            .as_ref()
            .and_then(|v| v.trigger)
            .unwrap_or_default()
            .effective()
    }

    /// Input width percentage clamped into the allowed range; 100 when unset
    pub fn width_percent(&self) -> u32 {
        self.input_config
            .as_ref()
            .and_then(|c| c.width_percent)
            .map(|p| p.clamp(MIN_WIDTH_PERCENT, MAX_WIDTH_PERCENT))
            .unwrap_or(MAX_WIDTH_PERCENT)
    }

    /// Rows shown by a textarea
    pub fn textarea_rows(&self) -> u32 {
        self.height.unwrap_or(DEFAULT_TEXTAREA_ROWS)
    }

    /// Whether options come from a preset table
    pub fn uses_preset(&self) -> bool {
        self.options_preset.is_some()
    }

    /// Options the renderer shows
    ///
    /// Pre-labelled select types always use their fixed tables, a preset
    /// wins over custom options, and choice fields fall back to the custom
    /// list.
    pub fn resolved_options(&self) -> Vec<OptionItem> {
        match self.field_type {
            FieldType::Province => return presets::preset_options(OptionsPreset::Province),
            FieldType::Ethnicity => return presets::preset_options(OptionsPreset::Ethnicity),
            FieldType::Political => return presets::preset_options(OptionsPreset::Political),
            _ => {}
        }
        if let Some(preset) = self.options_preset {
            return presets::preset_options(preset);
        }
        self.options.clone().unwrap_or_default()
    }

    /// Placeholder the renderer shows, with per-type fallbacks
    pub fn display_placeholder(&self) -> Option<String> {
        let fixed = match self.field_type {
            FieldType::IdCard => Some("请输入身份证号"),
            FieldType::Phone => Some("请输入手机号"),
            FieldType::Province => Some("请选择省份"),
            FieldType::Name => Some("请输入姓名"),
            FieldType::Age => Some("请输入年龄"),
            FieldType::Ethnicity => Some("请选择民族"),
            FieldType::Political => Some("请选择政治面貌"),
            FieldType::Wechat => Some("请输入微信号"),
            FieldType::Company => Some("请输入公司名称"),
            FieldType::Position => Some("请输入职位"),
            _ => None,
        };
        if let Some(text) = fixed {
            return Some(text.to_string());
        }
        match (&self.placeholder, &self.field_type) {
            (Some(p), _) => Some(p.clone()),
            (None, FieldType::Select | FieldType::Cascader) => Some("请选择".to_string()),
            (None, _) => None,
        }
    }

    /// Apply a partial update; fields left as `None` are unchanged
    pub fn apply_update(&mut self, update: FieldUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(placeholder) = update.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(span) = update.span {
            self.span = Some(clamp_span(Some(span)));
        }
        if let Some(width) = update.width {
            self.width = Some(width);
        }
        if let Some(height) = update.height {
            self.height = Some(height);
        }
        if let Some(disabled) = update.disabled {
            self.disabled = Some(disabled);
        }
        if let Some(validation) = update.validation {
            self.validation = validation;
        }
        if let Some(input_config) = update.input_config {
            self.input_config = Some(input_config);
        }
        if let Some(rating_config) = update.rating_config {
            self.rating_config = Some(rating_config);
        }
        if let Some(upload_config) = update.upload_config {
            self.upload_config = Some(upload_config);
        }
        if let Some(options) = update.options {
            self.options = options;
        }
        if let Some(preset) = update.options_preset {
            self.options_preset = preset;
        }
        if let Some(default_value) = update.default_value {
            self.default_value = default_value;
        }
    }

    /// Copy suitable for saving or exporting
    ///
    /// The id is dropped, and custom options are dropped when a preset
    /// supplies them.
    pub fn for_storage(&self) -> Self {
        let mut field = self.clone();
        field.id.clear();
        if field.options_preset.is_some() {
            field.options = None;
        }
        field
    }

    /// Copy with a new id and designer size defaults filled in
    ///
    /// A zero width or height counts as unset.
    pub fn instantiate(&self) -> Self {
        let mut field = self.clone();
        field.id = generate_field_id();
        field.width = Some(field.width.filter(|w| *w > 0).unwrap_or(DEFAULT_FIELD_WIDTH));
        field.height = Some(field.height.filter(|h| *h > 0).unwrap_or(DEFAULT_FIELD_HEIGHT));
        field
    }
}

impl Validatable for FieldConfig {
    fn validate(&self) -> FormResult<()> {
        if self.name.trim().is_empty() {
            return Err(FormError::field_validation(
                &self.label,
                "Field name cannot be empty",
            ));
        }

        if let Some(pattern) = self.validation.as_ref().and_then(|v| v.pattern_str()) {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(FormError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                });
            }
        }

        if let Some(v) = &self.validation {
            if let (Some(min), Some(max)) = (v.min, v.max) {
                if min > max {
                    return Err(FormError::field_validation(
                        &self.name,
                        format!("Minimum length {} exceeds maximum length {}", min, max),
                    ));
                }
            }
        }

        if let Some(max) = self.rating_config.as_ref().and_then(|r| r.max) {
            if !(MIN_RATING..=MAX_RATING).contains(&max) {
                return Err(FormError::field_validation(
                    &self.name,
                    format!(
                        "Rating maximum must be between {} and {}",
                        MIN_RATING, MAX_RATING
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn lenient_preset<'de, D>(deserializer: D) -> Result<Option<OptionsPreset>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let preset = raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(OptionsPreset::from_key);
    if preset.is_none() {
        if let Some(raw) = raw.filter(|v| !v.is_null()) {
            tracing::debug!("Ignoring unknown options preset {}", raw);
        }
    }
    Ok(preset)
}

/// Generate an id for a new designer field
pub fn generate_field_id() -> FieldId {
    generate_id(FIELD_ID_PREFIX)
}

// ============================================================================
// ValidationRule
// ============================================================================

/// Validation settings attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Minimum character count, ignored when a common validation is chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,

    /// Maximum character count, ignored when a common validation is chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Overrides every generated error message when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Common validation key (`chinese_name`, `phone`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<ValidationTrigger>,
}

impl ValidationRule {
    /// A rule that only marks the field required
    pub fn required() -> Self {
        Self {
            required: Some(true),
            ..Self::default()
        }
    }

    /// Required with a character length range
    pub fn length(min: u32, max: u32) -> Self {
        Self {
            required: Some(true),
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    /// Required with a custom validator key and message
    pub fn custom(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            required: Some(true),
            custom: Some(key.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Set the pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the trigger
    pub fn with_trigger(mut self, trigger: ValidationTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Non-empty custom validator key
    pub fn custom_key(&self) -> Option<&str> {
        self.custom.as_deref().filter(|c| !c.is_empty())
    }

    /// Non-empty pattern
    pub fn pattern_str(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// Non-empty message override
    pub fn message_str(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// Common validation currently selected
    pub fn common(&self) -> CommonValidation {
        CommonValidation::from_key(self.custom.as_deref().unwrap_or_default())
    }

    /// Rule after choosing a common validation in the property panel
    ///
    /// A choice writes custom, pattern and message and drops the length
    /// limits; choosing none clears custom, pattern and the limits.
    pub fn with_common(&self, common: CommonValidation) -> Self {
        let mut rule = self.clone();
        rule.min = None;
        rule.max = None;
        match common {
            CommonValidation::None => {
                rule.custom = None;
                rule.pattern = None;
            }
            other => {
                rule.custom = Some(other.key().to_string());
                rule.pattern = Some(other.pattern().to_string());
                rule.message = Some(other.message().to_string());
            }
        }
        rule
    }
}

// ============================================================================
// Type-specific configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InputConfig {
    /// Input width as a percentage of its column (50-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_percent: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_half: Option<bool>,
}

impl RatingConfig {
    /// Number of stars shown
    pub fn count(&self) -> u32 {
        self.max
            .unwrap_or(DEFAULT_RATING)
            .clamp(MIN_RATING, MAX_RATING)
    }

    pub fn allows_half(&self) -> bool {
        self.allow_half.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,

    /// Maximum file size in megabytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
}

impl UploadConfig {
    pub fn accept(&self) -> &str {
        self.accept.as_deref().unwrap_or("image/*")
    }

    pub fn max_count(&self) -> u32 {
        self.max_count.unwrap_or(1).max(1)
    }

    pub fn max_size_bytes(&self) -> u64 {
        u64::from(self.max_size.unwrap_or(3).max(1)) * 1024 * 1024
    }
}

// ============================================================================
// FieldUpdate
// ============================================================================

/// A partial update to a field
///
/// `None` leaves a property untouched. Properties that can be removed use a
/// nested option, where `Some(None)` clears them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldUpdate {
    pub name: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<Option<String>>,
    pub span: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub disabled: Option<bool>,
    pub validation: Option<Option<ValidationRule>>,
    pub input_config: Option<InputConfig>,
    pub rating_config: Option<RatingConfig>,
    pub upload_config: Option<UploadConfig>,
    pub options: Option<Option<Vec<OptionItem>>>,
    pub options_preset: Option<Option<OptionsPreset>>,
    pub default_value: Option<Option<serde_json::Value>>,
}

impl FieldUpdate {
    /// Switch a field to a preset option list
    ///
    /// Custom options are cleared and the label and name follow the preset.
    pub fn preset(preset: OptionsPreset) -> Self {
        Self {
            name: Some(preset.key().to_string()),
            label: Some(preset.label().to_string()),
            options: Some(None),
            options_preset: Some(Some(preset)),
            ..Self::default()
        }
    }

    /// Switch a field back to custom options, keeping whatever it has
    pub fn custom_options(options: Vec<OptionItem>) -> Self {
        Self {
            options: Some(Some(options)),
            options_preset: Some(None),
            ..Self::default()
        }
    }

    /// Replace the whole validation rule
    pub fn validation(rule: ValidationRule) -> Self {
        Self {
            validation: Some(Some(rule)),
            ..Self::default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn span(span: i32) -> Self {
        Self {
            span: Some(span),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::OptionValue;

    fn select_field() -> FieldConfig {
        FieldConfig::new(FieldType::Select, "city", "城市").with_options(vec![
            OptionItem::new("选项1", "option1"),
            OptionItem::new("选项2", "option2"),
        ])
    }

    #[test]
    fn test_field_new() {
        let field = FieldConfig::new(FieldType::Input, "nickname", "昵称");
        assert!(field.id.starts_with("field_"));
        assert_eq!(field.name, "nickname");
        assert_eq!(field.effective_span(), 24);
        assert!(!field.is_required());
        assert!(!field.is_disabled());
    }

    #[test]
    fn test_builder_required_keeps_other_settings() {
        let field = FieldConfig::new(FieldType::Input, "n", "N")
            .with_validation(ValidationRule::default().with_trigger(ValidationTrigger::OnInput))
            .required();
        assert!(field.is_required());
        assert_eq!(field.effective_trigger(), ValidationTrigger::OnChange);
    }

    #[test]
    fn test_serde_uses_camel_case_and_type_key() {
        let field = FieldConfig::new(FieldType::Rating, "score", "评分").with_rating(5, true);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "rating");
        assert_eq!(json["ratingConfig"]["allowHalf"], true);
        assert!(json.get("placeholder").is_none());
    }

    #[test]
    fn test_deserialize_without_id() {
        let field: FieldConfig =
            serde_json::from_str(r#"{"type":"phone","name":"phone","label":"手机号"}"#).unwrap();
        assert!(field.id.is_empty());
        assert_eq!(field.field_type, FieldType::Phone);
    }

    #[test]
    fn test_canvas_heading_clamps_span() {
        let field = FieldConfig::new(FieldType::Input, "a", "姓名").with_span(40);
        assert_eq!(field.canvas_heading(), "姓名 (span: 24)");
        assert_eq!(field.column_percent(), 100.0);
    }

    #[test]
    fn test_width_percent_clamped() {
        let field = FieldConfig::new(FieldType::Input, "a", "A").with_width_percent(20);
        assert_eq!(field.width_percent(), 50);
        let field = FieldConfig::new(FieldType::Input, "a", "A");
        assert_eq!(field.width_percent(), 100);
    }

    #[test]
    fn test_resolved_options_prefers_preset() {
        let field = select_field();
        assert_eq!(field.resolved_options().len(), 2);

        let mut preset = select_field();
        preset.options_preset = Some(OptionsPreset::Gender);
        let options = preset.resolved_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, OptionValue::from("男"));
    }

    #[test]
    fn test_resolved_options_fixed_types() {
        let field = FieldConfig::new(FieldType::Province, "province", "所在省份");
        assert_eq!(field.resolved_options().len(), 34);
        let field = FieldConfig::new(FieldType::Ethnicity, "ethnicity", "民族");
        assert_eq!(field.resolved_options().len(), 57);
    }

    #[test]
    fn test_display_placeholder_fallbacks() {
        let field = FieldConfig::new(FieldType::Select, "s", "S");
        assert_eq!(field.display_placeholder().as_deref(), Some("请选择"));
        let field = FieldConfig::new(FieldType::Phone, "p", "P").with_placeholder("自定义");
        assert_eq!(field.display_placeholder().as_deref(), Some("请输入手机号"));
        let field = FieldConfig::new(FieldType::Date, "d", "D");
        assert_eq!(field.display_placeholder(), None);
    }

    #[test]
    fn test_apply_update_merges() {
        let mut field = FieldConfig::new(FieldType::Input, "a", "A").with_placeholder("请输入");
        field.apply_update(FieldUpdate {
            label: Some("新标签".to_string()),
            span: Some(30),
            ..FieldUpdate::default()
        });
        assert_eq!(field.label, "新标签");
        assert_eq!(field.span, Some(24));
        assert_eq!(field.placeholder.as_deref(), Some("请输入"));
        assert_eq!(field.name, "a");

        field.apply_update(FieldUpdate {
            placeholder: Some(None),
            ..FieldUpdate::default()
        });
        assert_eq!(field.placeholder, None);
    }

    #[test]
    fn test_preset_update() {
        let mut field = select_field();
        field.apply_update(FieldUpdate::preset(OptionsPreset::Education));
        assert_eq!(field.options_preset, Some(OptionsPreset::Education));
        assert_eq!(field.options, None);
        assert_eq!(field.label, "学历");
        assert_eq!(field.name, "education");
    }

    #[test]
    fn test_for_storage_strips_id_and_preset_options() {
        let mut field = select_field();
        field.options_preset = Some(OptionsPreset::Province);
        let stored = field.for_storage();
        assert!(stored.id.is_empty());
        assert_eq!(stored.options, None);

        let plain = select_field().for_storage();
        assert_eq!(plain.options.map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_instantiate_fills_size() {
        let template = FieldConfig::new(FieldType::Textarea, "t", "T");
        let mut sized = template.clone();
        sized.height = Some(4);
        let field = template.instantiate();
        assert_ne!(field.id, template.id);
        assert_eq!(field.width, Some(DEFAULT_FIELD_WIDTH));
        assert_eq!(field.height, Some(DEFAULT_FIELD_HEIGHT));
        assert_eq!(sized.instantiate().height, Some(4));
    }

    #[test]
    fn test_instantiate_replaces_zero_size() {
        let mut field = FieldConfig::new(FieldType::Input, "a", "A");
        field.width = Some(0);
        field.height = Some(0);
        let field = field.instantiate();
        assert_eq!(field.width, Some(DEFAULT_FIELD_WIDTH));
        assert_eq!(field.height, Some(DEFAULT_FIELD_HEIGHT));
    }

    #[test]
    fn test_unknown_preset_reads_as_none() {
        let json = r#"{"type":"radio","name":"r","label":"R","optionsPreset":"zodiac"}"#;
        let field: FieldConfig = serde_json::from_str(json).unwrap();
        assert!(field.options_preset.is_none());

        let json = r#"{"type":"radio","name":"r","label":"R","optionsPreset":"gender"}"#;
        let field: FieldConfig = serde_json::from_str(json).unwrap();
        assert_eq!(field.options_preset, Some(OptionsPreset::Gender));
    }

    #[test]
    fn test_common_validation_choice() {
        let rule = ValidationRule::length(1, 10);
        let phone = rule.with_common(CommonValidation::Phone);
        assert_eq!(phone.custom.as_deref(), Some("phone"));
        assert_eq!(phone.message.as_deref(), Some("请输入正确的手机号"));
        assert_eq!(phone.min, None);
        assert_eq!(phone.max, None);
        assert!(phone.is_required());

        let none = phone.with_common(CommonValidation::None);
        assert_eq!(none.custom, None);
        assert_eq!(none.pattern, None);
        assert_eq!(none.common(), CommonValidation::None);
    }

    #[test]
    fn test_field_validate() {
        assert!(select_field().validate().is_ok());

        let mut field = select_field();
        field.name = "  ".to_string();
        assert!(field.validate().is_err());

        let field = select_field()
            .with_validation(ValidationRule::required().with_pattern("([a-z"));
        let err = field.validate().unwrap_err();
        assert!(matches!(err, FormError::InvalidPattern { .. }));

        let field = select_field().with_validation(ValidationRule::length(10, 2));
        assert!(field.validate().is_err());

        let field = FieldConfig::new(FieldType::Rating, "r", "R").with_rating(20, false);
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_rating_and_upload_defaults() {
        assert_eq!(RatingConfig::default().count(), 5);
        let rating = RatingConfig {
            max: Some(0),
            allow_half: None,
        };
        assert_eq!(rating.count(), 1);
        let upload = UploadConfig::default();
        assert_eq!(upload.accept(), "image/*");
        assert_eq!(upload.max_count(), 1);
        assert_eq!(upload.max_size_bytes(), 3 * 1024 * 1024);
    }

    #[test]
    fn test_field_update_is_empty() {
        assert!(FieldUpdate::default().is_empty());
        assert!(!FieldUpdate::label("x").is_empty());
    }
}
