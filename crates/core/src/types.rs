//! Core types used throughout Formwright
//!
//! This module contains the closed vocabularies shared by the form model,
//! the renderer and the designer: field types, validation triggers, option
//! values, preset option lists, common validations and grid math.

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Type alias for designer field identifiers (`field_{millis}_{rand}`)
pub type FieldId = String;

/// Type alias for stored record identifiers (`config_…`, `published_…`)
pub type RecordId = String;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of random characters appended to generated identifiers
pub const ID_RANDOM_LEN: usize = 9;

/// Generate a prefixed identifier of the form `{prefix}_{millis}_{rand}`
///
/// The random suffix is nine lowercase base-36 characters drawn from a
/// fresh v4 UUID.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut bits = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_RANDOM_LEN);
    for _ in 0..ID_RANDOM_LEN {
        suffix.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    format!("{}_{}_{}", prefix, millis, suffix)
}

// ============================================================================
// Grid Layout
// ============================================================================

/// Number of columns in the layout grid
pub const GRID_COLUMNS: i32 = 24;

/// Clamp a field span into `[1, GRID_COLUMNS]`; an absent span fills the row
pub fn clamp_span(span: Option<i32>) -> i32 {
    span.unwrap_or(GRID_COLUMNS).clamp(1, GRID_COLUMNS)
}

/// Column width as a percentage of the row for the given span
pub fn column_percent(span: Option<i32>) -> f64 {
    f64::from(clamp_span(span)) / f64::from(GRID_COLUMNS) * 100.0
}

// ============================================================================
// Field Types
// ============================================================================

/// The widget a field renders as
///
/// Unknown type strings are preserved in [`FieldType::Other`] so imported
/// configurations round-trip unchanged; they render as a plain text input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Input,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Cascader,
    Date,
    Time,
    Rating,
    Upload,
    IdCard,
    Phone,
    Province,
    Name,
    Age,
    Ethnicity,
    Political,
    Wechat,
    Company,
    Position,
    Other(String),
}

impl FieldType {
    /// Wire name of the type
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Input => "input",
            FieldType::Textarea => "textarea",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Select => "select",
            FieldType::Cascader => "cascader",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Rating => "rating",
            FieldType::Upload => "upload",
            FieldType::IdCard => "idcard",
            FieldType::Phone => "phone",
            FieldType::Province => "province",
            FieldType::Name => "name",
            FieldType::Age => "age",
            FieldType::Ethnicity => "ethnicity",
            FieldType::Political => "political",
            FieldType::Wechat => "wechat",
            FieldType::Company => "company",
            FieldType::Position => "position",
            FieldType::Other(s) => s,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            FieldType::Input => "输入框",
            FieldType::Textarea => "多行输入框",
            FieldType::Radio => "单选框",
            FieldType::Checkbox => "多选框",
            FieldType::Select => "下拉选择",
            FieldType::Cascader => "级联选择",
            FieldType::Date => "日期选择",
            FieldType::Time => "时间选择",
            FieldType::Rating => "评分",
            FieldType::Upload => "图片上传",
            FieldType::IdCard => "身份证",
            FieldType::Phone => "手机号",
            FieldType::Province => "省份",
            FieldType::Name => "姓名",
            FieldType::Age => "年龄",
            FieldType::Ethnicity => "民族",
            FieldType::Political => "政治面貌",
            FieldType::Wechat => "微信号",
            FieldType::Company => "公司",
            FieldType::Position => "职位",
            FieldType::Other(s) => s,
        }
    }

    /// Types whose options are edited in the property panel
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldType::Radio | FieldType::Checkbox | FieldType::Select | FieldType::Cascader
        )
    }

    /// Types whose entered text has all whitespace removed
    pub fn strips_whitespace(&self) -> bool {
        matches!(self, FieldType::Input | FieldType::Textarea)
    }

    /// Types whose value is a list rather than a scalar
    pub fn is_multi_value(&self) -> bool {
        matches!(self, FieldType::Checkbox | FieldType::Cascader | FieldType::Upload)
    }

    /// All types with a dedicated renderer
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Input,
            FieldType::Textarea,
            FieldType::Radio,
            FieldType::Checkbox,
            FieldType::Select,
            FieldType::Cascader,
            FieldType::Date,
            FieldType::Time,
            FieldType::Rating,
            FieldType::Upload,
            FieldType::IdCard,
            FieldType::Phone,
            FieldType::Province,
            FieldType::Name,
            FieldType::Age,
            FieldType::Ethnicity,
            FieldType::Political,
            FieldType::Wechat,
            FieldType::Company,
            FieldType::Position,
        ]
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        FieldType::all()
            .iter()
            .find(|t| t.as_str() == s)
            .cloned()
            .unwrap_or(FieldType::Other(s))
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        FieldType::from(s.to_string())
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Validation Trigger
// ============================================================================

/// When a field's rules run while the form is being filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ValidationTrigger {
    #[default]
    OnBlur,
    OnChange,
    OnInput,
}

impl ValidationTrigger {
    /// Trigger the renderer actually listens on; input events are change events
    pub fn effective(self) -> Self {
        match self {
            ValidationTrigger::OnInput => ValidationTrigger::OnChange,
            other => other,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationTrigger::OnBlur => "onBlur",
            ValidationTrigger::OnChange => "onChange",
            ValidationTrigger::OnInput => "onInput",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ValidationTrigger::OnBlur => "失去焦点时",
            ValidationTrigger::OnChange => "值改变时",
            ValidationTrigger::OnInput => "输入时",
        }
    }

    /// Parse a wire name
    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }

    /// Get all triggers
    pub fn all() -> &'static [ValidationTrigger] {
        &[
            ValidationTrigger::OnBlur,
            ValidationTrigger::OnChange,
            ValidationTrigger::OnInput,
        ]
    }
}

// ============================================================================
// Form Layout
// ============================================================================

/// Label placement for a rendered form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormLayout {
    Horizontal,
    #[default]
    Vertical,
    Inline,
}

impl FormLayout {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FormLayout::Horizontal => "Horizontal",
            FormLayout::Vertical => "Vertical",
            FormLayout::Inline => "Inline",
        }
    }
}

// ============================================================================
// Component Category
// ============================================================================

/// Palette group a library component belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Basic,
    Advanced,
    Custom,
}

impl ComponentCategory {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentCategory::Basic => "基础组件",
            ComponentCategory::Advanced => "高级组件",
            ComponentCategory::Custom => "自定义组件",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [ComponentCategory] {
        &[
            ComponentCategory::Basic,
            ComponentCategory::Advanced,
            ComponentCategory::Custom,
        ]
    }
}

// ============================================================================
// Options
// ============================================================================

/// Value carried by a choice option; either a string or a JSON number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(serde_json::Number),
    Text(String),
}

impl OptionValue {
    /// The value as a JSON value, as it appears in submitted data
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OptionValue::Number(n) => serde_json::Value::Number(n.clone()),
            OptionValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Check whether a submitted JSON value selects this option
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match (self, value) {
            (OptionValue::Number(n), serde_json::Value::Number(v)) => n == v,
            (OptionValue::Text(s), serde_json::Value::String(v)) => s == v,
            _ => false,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Number(n.into())
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A selectable option; `children` is only populated for cascading selects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    pub value: OptionValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OptionItem>,
}

impl OptionItem {
    /// Create an option
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Option whose label and value are the same text
    pub fn same(text: &str) -> Self {
        Self::new(text, text)
    }

    /// Attach nested options
    pub fn with_children(mut self, children: Vec<OptionItem>) -> Self {
        self.children = children;
        self
    }

    /// Whether this option has a nested level
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

// ============================================================================
// Preset Option Lists
// ============================================================================

/// Named, statically defined option lists substituted for custom options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionsPreset {
    Ethnicity,
    Political,
    Education,
    Gender,
    Province,
    Cascader,
    MaritalStatus,
}

impl OptionsPreset {
    /// Wire key of the preset
    pub fn key(&self) -> &'static str {
        match self {
            OptionsPreset::Ethnicity => "ethnicity",
            OptionsPreset::Political => "political",
            OptionsPreset::Education => "education",
            OptionsPreset::Gender => "gender",
            OptionsPreset::Province => "province",
            OptionsPreset::Cascader => "cascader",
            OptionsPreset::MaritalStatus => "maritalStatus",
        }
    }

    /// Label a field takes when the preset is chosen
    pub fn label(&self) -> &'static str {
        match self {
            OptionsPreset::Ethnicity => "民族",
            OptionsPreset::Political => "政治面貌",
            OptionsPreset::Education => "学历",
            OptionsPreset::Gender => "性别",
            OptionsPreset::Province => "省份",
            OptionsPreset::Cascader => "省市区",
            OptionsPreset::MaritalStatus => "婚姻状况",
        }
    }

    /// Parse a wire key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.key() == key)
    }

    /// Get all presets
    pub fn all() -> &'static [OptionsPreset] {
        &[
            OptionsPreset::Ethnicity,
            OptionsPreset::Political,
            OptionsPreset::Education,
            OptionsPreset::Gender,
            OptionsPreset::Province,
            OptionsPreset::Cascader,
            OptionsPreset::MaritalStatus,
        ]
    }
}

impl std::fmt::Display for OptionsPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Common Validations
// ============================================================================

/// Ready-made pattern validations offered by the property panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommonValidation {
    #[default]
    None,
    ChineseName,
    Phone,
    Email,
    Age,
}

impl CommonValidation {
    /// Value stored in `validation.custom`; empty for `None`
    pub fn key(&self) -> &'static str {
        match self {
            CommonValidation::None => "",
            CommonValidation::ChineseName => "chinese_name",
            CommonValidation::Phone => "phone",
            CommonValidation::Email => "email",
            CommonValidation::Age => "age",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CommonValidation::None => "无",
            CommonValidation::ChineseName => "姓名（只支持中文）",
            CommonValidation::Phone => "手机号",
            CommonValidation::Email => "邮箱",
            CommonValidation::Age => "年龄",
        }
    }

    /// Regular expression written into `validation.pattern`
    pub fn pattern(&self) -> &'static str {
        match self {
            CommonValidation::None => "",
            CommonValidation::ChineseName => r"^[\x{4e00}-\x{9fa5}]{2,4}$",
            CommonValidation::Phone => {
                r"^(13[0-9]|14[579]|15[0-3,5-9]|16[6]|17[0135678]|18[0-9]|19[89])[0-9]{8}$"
            }
            CommonValidation::Email => r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$",
            CommonValidation::Age => r"^(?:1[01][0-9]|120|[1-9]?[0-9])$",
        }
    }

    /// Error message written into `validation.message`
    pub fn message(&self) -> &'static str {
        match self {
            CommonValidation::None => "",
            CommonValidation::ChineseName => "请输入2-4位中文姓名",
            CommonValidation::Phone => "请输入正确的手机号",
            CommonValidation::Email => "请输入正确的邮箱格式",
            CommonValidation::Age => "请输入0-120之间的年龄",
        }
    }

    /// Parse a `validation.custom` key; unknown keys map to `None`
    pub fn from_key(key: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.key() == key)
            .unwrap_or_default()
    }

    /// Get all common validations
    pub fn all() -> &'static [CommonValidation] {
        &[
            CommonValidation::None,
            CommonValidation::ChineseName,
            CommonValidation::Phone,
            CommonValidation::Email,
            CommonValidation::Age,
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("field");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "field");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), ID_RANDOM_LEN);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_generate_id_unique() {
        assert_ne!(generate_id("field"), generate_id("field"));
    }

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(None), 24);
        assert_eq!(clamp_span(Some(0)), 1);
        assert_eq!(clamp_span(Some(-5)), 1);
        assert_eq!(clamp_span(Some(12)), 12);
        assert_eq!(clamp_span(Some(99)), 24);
    }

    #[test]
    fn test_column_percent() {
        assert_eq!(column_percent(None), 100.0);
        assert_eq!(column_percent(Some(12)), 50.0);
        assert_eq!(column_percent(Some(6)), 25.0);
        assert_eq!(column_percent(Some(48)), 100.0);
    }

    #[test]
    fn test_field_type_serde() {
        let json = serde_json::to_string(&FieldType::IdCard).unwrap();
        assert_eq!(json, "\"idcard\"");
        let parsed: FieldType = serde_json::from_str("\"rating\"").unwrap();
        assert_eq!(parsed, FieldType::Rating);
    }

    #[test]
    fn test_field_type_unknown_round_trips() {
        let parsed: FieldType = serde_json::from_str("\"signature\"").unwrap();
        assert_eq!(parsed, FieldType::Other("signature".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"signature\"");
    }

    #[test]
    fn test_field_type_classification() {
        assert!(FieldType::Radio.is_choice());
        assert!(FieldType::Cascader.is_choice());
        assert!(!FieldType::Province.is_choice());
        assert!(FieldType::Textarea.strips_whitespace());
        assert!(!FieldType::Phone.strips_whitespace());
        assert!(FieldType::Checkbox.is_multi_value());
    }

    #[test]
    fn test_trigger_serde_and_effective() {
        assert_eq!(
            serde_json::to_string(&ValidationTrigger::OnInput).unwrap(),
            "\"onInput\""
        );
        assert_eq!(
            ValidationTrigger::OnInput.effective(),
            ValidationTrigger::OnChange
        );
        assert_eq!(ValidationTrigger::OnBlur.effective(), ValidationTrigger::OnBlur);
        assert_eq!(ValidationTrigger::default(), ValidationTrigger::OnBlur);
        assert_eq!(
            ValidationTrigger::from_str_opt("onChange"),
            Some(ValidationTrigger::OnChange)
        );
    }

    #[test]
    fn test_option_value_untagged() {
        let item: OptionItem = serde_json::from_str(r#"{"label":"一","value":1}"#).unwrap();
        assert_eq!(item.value, OptionValue::from(1i64));
        let item: OptionItem = serde_json::from_str(r#"{"label":"男","value":"男"}"#).unwrap();
        assert_eq!(item.value, OptionValue::from("男"));
        assert!(item.value.matches(&serde_json::json!("男")));
        assert!(!item.value.matches(&serde_json::json!(1)));
    }

    #[test]
    fn test_option_children_skipped_when_empty() {
        let json = serde_json::to_string(&OptionItem::same("北京市")).unwrap();
        assert!(!json.contains("children"));
    }

    #[test]
    fn test_preset_keys() {
        assert_eq!(
            serde_json::to_string(&OptionsPreset::MaritalStatus).unwrap(),
            "\"maritalStatus\""
        );
        assert_eq!(
            OptionsPreset::from_key("cascader"),
            Some(OptionsPreset::Cascader)
        );
        assert_eq!(OptionsPreset::Cascader.label(), "省市区");
        assert_eq!(OptionsPreset::from_key("unknown"), None);
    }

    #[test]
    fn test_common_validation_from_key() {
        assert_eq!(CommonValidation::from_key("phone"), CommonValidation::Phone);
        assert_eq!(CommonValidation::from_key(""), CommonValidation::None);
        assert_eq!(CommonValidation::from_key("idcard"), CommonValidation::None);
        assert_eq!(CommonValidation::Age.message(), "请输入0-120之间的年龄");
    }
}
