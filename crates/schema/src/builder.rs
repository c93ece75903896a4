//! Programmatic form construction
//!
//! `FormBuilder` assembles a `FormConfig` from named field templates,
//! for canned forms and for tests.
//!
//! ```rust,ignore
//! use formwright_schema::FormBuilder;
//!
//! let form = FormBuilder::new("报名表")
//!     .add_field("name")?
//!     .add_field("phone")?
//!     .build();
//! ```

use crate::field::{FieldConfig, ValidationRule};
use crate::form::{BUILDER_FORM_TITLE, FormConfig};
use crate::presets;
use formwright_core::{FieldType, FormError, FormResult, OptionsPreset};

/// Template names understood by [`FormBuilder::add_field`]
pub const TEMPLATE_NAMES: [&str; 6] = ["name", "phone", "email", "age", "gender", "education"];

/// Field for a named template, or `None` for unknown names
///
/// The field's submitted name is the template name.
pub fn field_template(template: &str) -> Option<FieldConfig> {
    let field = match template {
        "name" => FieldConfig::new(FieldType::Name, template, "姓名")
            .with_placeholder("请输入姓名")
            .with_size(300, 32)
            .with_validation(ValidationRule::custom("chinese_name", "请输入2-4位中文姓名")),
        "phone" => FieldConfig::new(FieldType::Phone, template, "手机号")
            .with_placeholder("请输入手机号")
            .with_size(300, 32)
            .with_validation(ValidationRule::custom("phone", "请输入正确的手机号")),
        "email" => FieldConfig::new(FieldType::Input, template, "邮箱")
            .with_placeholder("请输入邮箱")
            .with_size(300, 32)
            .with_validation(ValidationRule::custom("email", "请输入正确的邮箱格式")),
        "age" => FieldConfig::new(FieldType::Age, template, "年龄")
            .with_placeholder("请输入年龄")
            .with_size(300, 32)
            .with_validation(ValidationRule::custom("age", "请输入有效年龄（0-150）")),
        "gender" => FieldConfig::new(FieldType::Radio, template, "性别")
            .with_options(presets::preset_options(OptionsPreset::Gender))
            .required(),
        "education" => FieldConfig::new(FieldType::Radio, template, "学历")
            .with_options(presets::preset_options(OptionsPreset::Education))
            .required(),
        _ => return None,
    };
    Some(field)
}

/// Fluent builder for `FormConfig`
#[derive(Debug, Clone)]
pub struct FormBuilder {
    config: FormConfig,
}

impl FormBuilder {
    /// Start an empty vertical, responsive form
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            config: FormConfig::new(title),
        }
    }

    /// Append the field for a named template
    pub fn add_field(self, template: &str) -> FormResult<Self> {
        self.add_field_with(template, |_| {})
    }

    /// Append a template field after adjusting it
    pub fn add_field_with<F>(mut self, template: &str, customize: F) -> FormResult<Self>
    where
        F: FnOnce(&mut FieldConfig),
    {
        let mut field = field_template(template)
            .ok_or_else(|| FormError::UnknownTemplate(template.to_string()))?;
        customize(&mut field);
        self.config.add_field(field);
        Ok(self)
    }

    /// Append a fully specified field
    pub fn add_custom_field(mut self, field: FieldConfig) -> Self {
        self.config.add_field(field);
        self
    }

    pub fn build(self) -> FormConfig {
        self.config
    }

    /// Personal details form
    pub fn create_user_info_form() -> FormResult<FormConfig> {
        Ok(Self::new("用户信息表单")
            .add_field("name")?
            .add_field("age")?
            .add_field("gender")?
            .add_field("education")?
            .add_field("phone")?
            .build())
    }

    /// Contact details form
    pub fn create_contact_form() -> FormResult<FormConfig> {
        Ok(Self::new("联系表单")
            .add_field("name")?
            .add_field("phone")?
            .add_field("email")?
            .build())
    }
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self {
            config: FormConfig::new(BUILDER_FORM_TITLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::validate_form;
    use crate::form::FormData;
    use formwright_core::Validatable;

    #[test]
    fn test_all_templates_exist() {
        for name in TEMPLATE_NAMES {
            let field = field_template(name).unwrap();
            assert_eq!(field.name, name);
            assert!(field.is_required(), "{}", name);
            assert!(field.is_valid());
        }
        assert!(field_template("wechat").is_none());
    }

    #[test]
    fn test_unknown_template() {
        let err = FormBuilder::new("t").add_field("signature").unwrap_err();
        assert_eq!(err.to_string(), "未知的字段模板: signature");
    }

    #[test]
    fn test_builder_defaults() {
        let form = FormBuilder::default().build();
        assert_eq!(form.title, "动态表单");
        assert!(form.responsive);
        assert!(form.is_empty());
    }

    #[test]
    fn test_customize_template() {
        let form = FormBuilder::new("t")
            .add_field_with("phone", |f| f.label = "联系电话".to_string())
            .unwrap()
            .add_custom_field(FieldConfig::new(FieldType::Textarea, "remark", "备注"))
            .build();
        assert_eq!(form.fields[0].label, "联系电话");
        assert_eq!(form.fields[1].name, "remark");
    }

    #[test]
    fn test_canned_forms() {
        let user = FormBuilder::create_user_info_form().unwrap();
        assert_eq!(user.title, "用户信息表单");
        assert_eq!(user.field_count(), 5);
        assert_eq!(user.field_by_name("gender").unwrap().resolved_options().len(), 2);

        let contact = FormBuilder::create_contact_form().unwrap();
        assert_eq!(contact.title, "联系表单");
        let names: Vec<&str> = contact.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "phone", "email"]);
    }

    #[test]
    fn test_contact_form_validates_values() {
        let form = FormBuilder::create_contact_form().unwrap();
        let mut data = FormData::new();
        data.insert("name".to_string(), serde_json::json!("张三"));
        data.insert("phone".to_string(), serde_json::json!("13800138000"));
        data.insert("email".to_string(), serde_json::json!("not-an-email"));

        let result = validate_form(&form, &data);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.first_error("email"), Some("请输入正确的邮箱格式"));
    }
}
