//! Component library
//!
//! The palette of field templates the designer offers, grouped into basic
//! and advanced components. Each component carries the default
//! configuration a dropped field starts from.

use crate::field::{FieldConfig, ValidationRule};
use formwright_core::{ComponentCategory, FieldType, OptionItem};
use std::sync::LazyLock;

/// A palette entry
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentItem {
    /// Unique palette id
    pub id: &'static str,
    pub field_type: FieldType,
    /// Name shown in the palette
    pub name: &'static str,
    pub icon: &'static str,
    pub category: ComponentCategory,
    /// Template without an id
    pub default_config: FieldConfig,
}

impl ComponentItem {
    fn new(
        id: &'static str,
        name: &'static str,
        icon: &'static str,
        category: ComponentCategory,
        default_config: FieldConfig,
    ) -> Self {
        Self {
            id,
            field_type: default_config.field_type.clone(),
            name,
            icon,
            category,
            default_config,
        }
    }

    /// Create a designer field from this component
    pub fn instantiate(&self) -> FieldConfig {
        self.default_config.instantiate()
    }
}

static LIBRARY: LazyLock<Vec<ComponentItem>> = LazyLock::new(build_library);

/// Every component in palette order
pub fn all() -> &'static [ComponentItem] {
    &LIBRARY
}

/// Components in one palette group
pub fn by_category(category: ComponentCategory) -> Vec<&'static ComponentItem> {
    LIBRARY.iter().filter(|c| c.category == category).collect()
}

/// Look up a component by palette id
pub fn by_id(id: &str) -> Option<&'static ComponentItem> {
    LIBRARY.iter().find(|c| c.id == id)
}

fn template(field_type: FieldType, name: &str, label: &str) -> FieldConfig {
    let mut field = FieldConfig::new(field_type, name, label).with_width_percent(100);
    field.id.clear();
    field
}

fn three_options() -> Vec<OptionItem> {
    vec![
        OptionItem::new("选项1", "option1"),
        OptionItem::new("选项2", "option2"),
        OptionItem::new("选项3", "option3"),
    ]
}

fn build_library() -> Vec<ComponentItem> {
    use ComponentCategory::{Advanced, Basic};

    vec![
        // Basic
        ComponentItem::new(
            "input",
            "输入框",
            "📝",
            Basic,
            template(FieldType::Input, "input", "输入框")
                .with_placeholder("请输入")
                .with_span(24)
                .with_validation(ValidationRule::length(1, 10)),
        ),
        ComponentItem::new("textarea", "多行输入框", "📄", Basic, {
            let mut field = template(FieldType::Textarea, "textarea", "多行输入框")
                .with_placeholder("请输入")
                .with_span(24)
                .with_validation(ValidationRule::length(1, 300));
            field.height = Some(4);
            field
        }),
        ComponentItem::new(
            "radio",
            "单选框",
            "🔘",
            Basic,
            template(FieldType::Radio, "radio", "单选框")
                .with_options(three_options())
                .required(),
        ),
        ComponentItem::new(
            "checkbox",
            "多选框",
            "☑️",
            Basic,
            template(FieldType::Checkbox, "checkbox", "多选框")
                .with_options(three_options())
                .required(),
        ),
        ComponentItem::new(
            "select",
            "下拉选择",
            "📋",
            Basic,
            template(FieldType::Select, "select", "下拉选择")
                .with_placeholder("请选择")
                .with_span(24)
                .with_options(three_options())
                .required(),
        ),
        ComponentItem::new(
            "cascader",
            "级联选择",
            "🏢",
            Basic,
            template(FieldType::Cascader, "cascader", "级联选择")
                .with_placeholder("请选择")
                .with_span(24)
                .required(),
        ),
        ComponentItem::new(
            "date",
            "日期选择",
            "📅",
            Basic,
            template(FieldType::Date, "date", "日期选择")
                .with_span(24)
                .required(),
        ),
        ComponentItem::new(
            "time",
            "时间选择",
            "⏰",
            Basic,
            template(FieldType::Time, "time", "时间选择")
                .with_span(24)
                .required(),
        ),
        ComponentItem::new(
            "rating",
            "评分",
            "⭐",
            Basic,
            template(FieldType::Rating, "rating", "评分")
                .with_span(24)
                .with_rating(5, true)
                .required(),
        ),
        ComponentItem::new(
            "upload",
            "图片上传",
            "📁",
            Basic,
            template(FieldType::Upload, "upload", "图片上传")
                .with_upload("image/*", 3, 1)
                .required(),
        ),
        // Advanced
        ComponentItem::new(
            "name",
            "姓名",
            "👤",
            Advanced,
            template(FieldType::Input, "input", "姓名")
                .with_placeholder("请输入姓名")
                .with_validation(
                    ValidationRule::custom("chinese_name", "请输入2-4位中文姓名")
                        .with_pattern(r"^[\x{4e00}-\x{9fa5}]{2,4}$"),
                ),
        ),
        ComponentItem::new(
            "phone",
            "手机号",
            "📱",
            Advanced,
            template(FieldType::Phone, "phone", "手机号")
                .with_placeholder("请输入手机号")
                .with_validation(
                    ValidationRule::custom("phone", "请输入正确的手机号")
                        .with_pattern(r"^1[3-9][0-9]{9}$"),
                ),
        ),
        ComponentItem::new(
            "idcard",
            "身份证",
            "🆔",
            Advanced,
            template(FieldType::IdCard, "idcard", "身份证号")
                .with_placeholder("请输入身份证号")
                .with_validation(ValidationRule::custom("idcard", "请输入正确的身份证号")),
        ),
        ComponentItem::new(
            "email",
            "邮箱",
            "📧",
            Advanced,
            template(FieldType::Input, "email", "邮箱")
                .with_placeholder("请输入邮箱")
                .with_validation(ValidationRule::custom("email", "请输入正确的邮箱格式")),
        ),
        ComponentItem::new(
            "age",
            "年龄",
            "🎂",
            Advanced,
            template(FieldType::Age, "age", "年龄")
                .with_placeholder("请输入年龄")
                .with_validation(ValidationRule::custom("age", "请输入有效年龄（0-150）")),
        ),
        ComponentItem::new(
            "province",
            "省份",
            "🗺️",
            Advanced,
            template(FieldType::Province, "province", "所在省份").required(),
        ),
        ComponentItem::new(
            "ethnicity",
            "民族",
            "👥",
            Advanced,
            template(FieldType::Ethnicity, "ethnicity", "民族").required(),
        ),
        ComponentItem::new(
            "political",
            "政治面貌",
            "🏛️",
            Advanced,
            template(FieldType::Political, "political", "政治面貌").required(),
        ),
        ComponentItem::new(
            "cascader-address",
            "地址",
            "🏢",
            Advanced,
            template(FieldType::Cascader, "address", "地址")
                .with_placeholder("请选择地址")
                .required(),
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::Validatable;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = all().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_categories() {
        assert_eq!(by_category(ComponentCategory::Basic).len(), 10);
        assert_eq!(by_category(ComponentCategory::Advanced).len(), 9);
        assert!(by_category(ComponentCategory::Custom).is_empty());
    }

    #[test]
    fn test_templates_have_no_id() {
        assert!(all().iter().all(|c| c.default_config.id.is_empty()));
    }

    #[test]
    fn test_templates_are_valid() {
        for component in all() {
            assert!(
                component.default_config.is_valid(),
                "{} template invalid: {:?}",
                component.id,
                component.default_config.validation_errors()
            );
        }
    }

    #[test]
    fn test_input_defaults() {
        let input = by_id("input").unwrap();
        let config = &input.default_config;
        assert_eq!(config.placeholder.as_deref(), Some("请输入"));
        assert_eq!(config.span, Some(24));
        assert_eq!(config.width_percent(), 100);
        let rule = config.validation.as_ref().unwrap();
        assert_eq!((rule.min, rule.max), (Some(1), Some(10)));
        assert!(rule.is_required());
    }

    #[test]
    fn test_textarea_rows() {
        let textarea = by_id("textarea").unwrap();
        assert_eq!(textarea.default_config.textarea_rows(), 4);
        assert_eq!(
            textarea.default_config.validation.as_ref().unwrap().max,
            Some(300)
        );
    }

    #[test]
    fn test_choice_components_have_three_options() {
        for id in ["radio", "checkbox", "select"] {
            let options = by_id(id).unwrap().default_config.options.clone().unwrap();
            assert_eq!(options.len(), 3, "{}", id);
        }
    }

    #[test]
    fn test_rating_and_upload_defaults() {
        let rating = by_id("rating").unwrap().default_config.rating_config.clone().unwrap();
        assert_eq!(rating.count(), 5);
        assert!(rating.allows_half());

        let upload = by_id("upload").unwrap().default_config.upload_config.clone().unwrap();
        assert_eq!(upload.accept(), "image/*");
        assert_eq!(upload.max_size, Some(3));
        assert_eq!(upload.max_count(), 1);
    }

    #[test]
    fn test_email_component_is_input_type() {
        let email = by_id("email").unwrap();
        assert_eq!(email.field_type, FieldType::Input);
        assert_eq!(email.default_config.name, "email");
        assert_eq!(
            email.default_config.validation.as_ref().unwrap().custom.as_deref(),
            Some("email")
        );
    }

    #[test]
    fn test_instantiate() {
        let field = by_id("textarea").unwrap().instantiate();
        assert!(field.id.starts_with("field_"));
        assert_eq!(field.width, Some(300));
        assert_eq!(field.height, Some(4));

        let field = by_id("input").unwrap().instantiate();
        assert_eq!(field.height, Some(32));
    }

    #[test]
    fn test_unknown_id() {
        assert!(by_id("signature").is_none());
    }
}
