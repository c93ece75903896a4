//! Form configuration
//!
//! `FormConfig` is an ordered, titled collection of fields. Field order is
//! significant: it is both render order and grid position.

use crate::field::{FieldConfig, FieldUpdate};
use formwright_core::{FieldId, FormError, FormLayout, FormResult, Persistable, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Title of a brand new designer form
pub const DEFAULT_FORM_TITLE: &str = "我的表单";

/// Title of a form started from the builder without one
pub const BUILDER_FORM_TITLE: &str = "动态表单";

/// Title used when an imported document has none
pub const IMPORTED_FORM_TITLE: &str = "导入的表单";

/// Submitted or initial values keyed by field name
pub type FormData = BTreeMap<String, serde_json::Value>;

// ============================================================================
// FormConfig
// ============================================================================

/// A complete form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    #[serde(default)]
    pub layout: FormLayout,

    #[serde(default = "default_responsive")]
    pub responsive: bool,
}

fn default_responsive() -> bool {
    true
}

impl FormConfig {
    /// Create an empty vertical, responsive form
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            layout: FormLayout::Vertical,
            responsive: true,
        }
    }

    // ========================================================================
    // Field Management
    // ========================================================================

    /// Append a field and return its id
    pub fn add_field(&mut self, field: FieldConfig) -> FieldId {
        let id = field.id.clone();
        self.fields.push(field);
        id
    }

    /// Get a field by id
    pub fn field(&self, id: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Get a mutable field by id
    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldConfig> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Get a field by submitted name
    pub fn field_by_name(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field in render order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Merge a partial update into a field
    pub fn update_field(&mut self, id: &str, update: FieldUpdate) -> FormResult<()> {
        let field = self
            .field_mut(id)
            .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;
        field.apply_update(update);
        Ok(())
    }

    /// Remove a field by id
    pub fn remove_field(&mut self, id: &str) -> Option<FieldConfig> {
        let index = self.index_of(id)?;
        Some(self.fields.remove(index))
    }

    /// Move the field at `from` so it ends up at `to`
    ///
    /// Returns `false` without changing anything when the indices are equal
    /// or out of range.
    pub fn move_field(&mut self, from: usize, to: usize) -> bool {
        let len = self.fields.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        true
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    // ========================================================================
    // Persistence helpers
    // ========================================================================

    /// Copy suitable for saving or exporting
    ///
    /// Field ids and preset-backed options are dropped, and the layout is
    /// written as vertical and responsive.
    pub fn for_storage(&self) -> Self {
        Self {
            title: self.title.clone(),
            fields: self.fields.iter().map(FieldConfig::for_storage).collect(),
            layout: FormLayout::Vertical,
            responsive: true,
        }
    }

    /// Copy ready for the designer: every field gets a fresh id and size defaults
    pub fn instantiate(&self) -> Self {
        Self {
            title: self.title.clone(),
            fields: self.fields.iter().map(FieldConfig::instantiate).collect(),
            layout: self.layout,
            responsive: self.responsive,
        }
    }

    /// Default values declared by fields, overlaid with caller values
    pub fn initial_values(&self, overrides: &FormData) -> FormData {
        let mut values: FormData = self
            .fields
            .iter()
            .filter_map(|f| f.default_value.clone().map(|v| (f.name.clone(), v)))
            .collect();
        values.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        values
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_TITLE)
    }
}

impl Validatable for FormConfig {
    fn validate(&self) -> FormResult<()> {
        if self.title.trim().is_empty() {
            return Err(FormError::validation("Form title cannot be empty"));
        }
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }

    fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Form title cannot be empty".to_string());
        }
        for field in &self.fields {
            errors.extend(field.validation_errors());
        }
        errors
    }
}

impl Persistable for FormConfig {
    fn file_extension() -> &'static str {
        crate::CONFIG_FILE_EXTENSION
    }

    /// Parse a configuration document; anything without a `fields` array
    /// is rejected as a malformed configuration
    fn from_json(json: &str) -> FormResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| FormError::InvalidConfigFormat(e.to_string()))?;

        if !value.get("fields").is_some_and(serde_json::Value::is_array) {
            return Err(FormError::InvalidConfigFormat(
                "missing fields array".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| FormError::InvalidConfigFormat(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::{FieldType, OptionItem, OptionsPreset};

    fn form_with(names: &[&str]) -> FormConfig {
        let mut form = FormConfig::new("测试表单");
        for name in names {
            form.add_field(FieldConfig::new(FieldType::Input, *name, *name));
        }
        form
    }

    fn names(form: &FormConfig) -> Vec<&str> {
        form.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_new_form_defaults() {
        let form = FormConfig::default();
        assert_eq!(form.title, "我的表单");
        assert_eq!(form.layout, FormLayout::Vertical);
        assert!(form.responsive);
        assert!(form.is_empty());
    }

    #[test]
    fn test_add_and_find() {
        let mut form = FormConfig::new("t");
        let id = form.add_field(FieldConfig::new(FieldType::Input, "a", "A"));
        assert_eq!(form.field(&id).map(|f| f.name.as_str()), Some("a"));
        assert_eq!(form.field_by_name("a").map(|f| f.id.clone()), Some(id.clone()));
        assert_eq!(form.index_of(&id), Some(0));
    }

    #[test]
    fn test_update_field() {
        let mut form = form_with(&["a"]);
        let id = form.fields[0].id.clone();
        form.update_field(&id, FieldUpdate::label("改名")).unwrap();
        assert_eq!(form.fields[0].label, "改名");

        let err = form.update_field("missing", FieldUpdate::label("x")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_field() {
        let mut form = form_with(&["a", "b"]);
        let id = form.fields[0].id.clone();
        assert!(form.remove_field(&id).is_some());
        assert_eq!(names(&form), vec!["b"]);
        assert!(form.remove_field(&id).is_none());
    }

    #[test]
    fn test_move_field_forward_and_back() {
        let mut form = form_with(&["a", "b", "c", "d"]);
        assert!(form.move_field(0, 2));
        assert_eq!(names(&form), vec!["b", "c", "a", "d"]);
        assert!(form.move_field(3, 0));
        assert_eq!(names(&form), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_field_noops() {
        let mut form = form_with(&["a", "b"]);
        assert!(!form.move_field(1, 1));
        assert!(!form.move_field(0, 5));
        assert!(!form.move_field(7, 0));
        assert_eq!(names(&form), vec!["a", "b"]);
    }

    #[test]
    fn test_for_storage() {
        let mut form = form_with(&["a"]);
        form.layout = FormLayout::Inline;
        form.responsive = false;
        form.add_field(
            FieldConfig::new(FieldType::Radio, "gender", "性别")
                .with_options(vec![OptionItem::same("男")])
                .with_preset(OptionsPreset::Gender),
        );
        form.fields[1].options = Some(vec![OptionItem::same("男")]);

        let stored = form.for_storage();
        assert_eq!(stored.layout, FormLayout::Vertical);
        assert!(stored.responsive);
        assert!(stored.fields.iter().all(|f| f.id.is_empty()));
        assert_eq!(stored.fields[1].options, None);

        let json = serde_json::to_string(&stored).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_instantiate_assigns_ids() {
        let stored = form_with(&["a", "b"]).for_storage();
        let form = stored.instantiate();
        assert!(form.fields.iter().all(|f| f.id.starts_with("field_")));
        assert_ne!(form.fields[0].id, form.fields[1].id);
        assert!(form.fields.iter().all(|f| f.width == Some(300)));
    }

    #[test]
    fn test_initial_values_overlay() {
        let mut form = FormConfig::new("t");
        form.add_field(
            FieldConfig::new(FieldType::Input, "city", "城市")
                .with_default_value(serde_json::json!("杭州")),
        );
        form.add_field(
            FieldConfig::new(FieldType::Rating, "score", "评分")
                .with_default_value(serde_json::json!(3)),
        );
        let mut overrides = FormData::new();
        overrides.insert("score".to_string(), serde_json::json!(5));
        overrides.insert("extra".to_string(), serde_json::json!(true));

        let values = form.initial_values(&overrides);
        assert_eq!(values["city"], serde_json::json!("杭州"));
        assert_eq!(values["score"], serde_json::json!(5));
        assert_eq!(values["extra"], serde_json::json!(true));
    }

    #[test]
    fn test_deserialize_minimal_document() {
        let form: FormConfig = serde_json::from_str(r#"{"fields":[]}"#).unwrap();
        assert_eq!(form.title, "");
        assert!(form.responsive);
        assert_eq!(form.layout, FormLayout::Vertical);
    }

    #[test]
    fn test_validate() {
        assert!(form_with(&["a"]).validate().is_ok());
        let mut form = form_with(&["a"]);
        form.title = " ".to_string();
        form.fields[0].name.clear();
        assert!(form.validate().is_err());
        assert_eq!(form.validation_errors().len(), 2);
    }
}
