//! Field value rules
//!
//! Translates a field's validation settings into concrete rules and checks
//! entered values against them. Rules are derived as follows:
//!
//! 1. `required` fails on missing, empty-string and empty-list values.
//! 2. A common validation with a pattern adds a regex rule.
//! 3. Without a common validation, `min` and `max` bound the character
//!    count (or the number of selected items for list values).
//! 4. A common validation without a pattern falls back to the built-in
//!    validator of the same key.
//!
//! A configured `message` replaces every generated message.

use crate::field::FieldConfig;
use crate::form::{FormConfig, FormData};
use formwright_core::{FormError, FormResult};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Generic message for a failed pattern
pub const PATTERN_MESSAGE: &str = "格式不正确";

// ============================================================================
// Built-in validators
// ============================================================================

/// Format checks selectable by `validation.custom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomValidator {
    IdCard,
    Phone,
    Email,
    ChineseName,
    Integer,
    Age,
}

impl CustomValidator {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "idcard" => Some(CustomValidator::IdCard),
            "phone" => Some(CustomValidator::Phone),
            "email" => Some(CustomValidator::Email),
            "chinese_name" => Some(CustomValidator::ChineseName),
            "integer" => Some(CustomValidator::Integer),
            "age" => Some(CustomValidator::Age),
            _ => None,
        }
    }

    fn pattern(&self) -> Option<&'static str> {
        match self {
            CustomValidator::IdCard => Some(r"(^[0-9]{15}$)|(^[0-9]{18}$)|(^[0-9]{17}([0-9]|X|x)$)"),
            CustomValidator::Phone => Some(r"^1[3-9][0-9]{9}$"),
            CustomValidator::Email => Some(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
            CustomValidator::ChineseName => Some(r"^[\x{4e00}-\x{9fa5}]{2,4}$"),
            CustomValidator::Integer | CustomValidator::Age => None,
        }
    }

    /// Check a text value
    pub fn check(&self, value: &str) -> bool {
        match self {
            CustomValidator::Integer => {
                !value.is_empty()
                    && value.chars().all(|c| c.is_ascii_digit())
                    && leading_integer(value).is_some_and(|n| n > 0)
            }
            CustomValidator::Age => leading_integer(value).is_some_and(|n| (0..=150).contains(&n)),
            other => other
                .pattern()
                .and_then(|p| Regex::new(p).ok())
                .is_some_and(|re| re.is_match(value)),
        }
    }
}

/// Parse the integer at the start of a string, ignoring what follows
fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}

// ============================================================================
// FieldRule
// ============================================================================

/// A single check applied to a field value
#[derive(Debug, Clone)]
pub enum FieldRule {
    Required { message: String },
    Pattern { regex: Regex, message: String },
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
    Custom { validator: CustomValidator, message: String },
}

impl FieldRule {
    pub fn message(&self) -> &str {
        match self {
            FieldRule::Required { message }
            | FieldRule::Pattern { message, .. }
            | FieldRule::MinLength { message, .. }
            | FieldRule::MaxLength { message, .. }
            | FieldRule::Custom { message, .. } => message,
        }
    }

    /// Check a value; `None` means the field has no value yet
    pub fn check(&self, value: Option<&Value>) -> Result<(), String> {
        let ok = match self {
            FieldRule::Required { .. } => !is_empty_value(value),
            // Remaining rules only look at values that are present
            _ if is_empty_value(value) => true,
            FieldRule::Pattern { regex, .. } => {
                value_text(value).is_none_or(|text| regex.is_match(&text))
            }
            FieldRule::MinLength { min, .. } => value_len(value).is_none_or(|len| len >= *min),
            FieldRule::MaxLength { max, .. } => value_len(value).is_none_or(|len| len <= *max),
            FieldRule::Custom { validator, .. } => {
                value_text(value).is_none_or(|text| validator.check(&text))
            }
        };
        if ok {
            Ok(())
        } else {
            Err(self.message().to_string())
        }
    }
}

/// Missing, null, empty string and empty list all count as "no value"
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_len(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Remove every whitespace character from entered text
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

// ============================================================================
// Rule derivation
// ============================================================================

/// Derive the rules for a field
///
/// Fails when the configured pattern does not compile.
pub fn rules_for(field: &FieldConfig) -> FormResult<Vec<FieldRule>> {
    let mut rules = Vec::new();
    let Some(validation) = &field.validation else {
        return Ok(rules);
    };
    let custom_message = validation.message_str();
    let message_or = |fallback: String| custom_message.map(str::to_string).unwrap_or(fallback);

    if validation.is_required() {
        rules.push(FieldRule::Required {
            message: message_or(format!("{}为必填项", field.label)),
        });
    }

    match (validation.custom_key(), validation.pattern_str()) {
        (Some(_), Some(pattern)) => {
            let regex = Regex::new(pattern).map_err(|e| FormError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            rules.push(FieldRule::Pattern {
                regex,
                message: message_or(PATTERN_MESSAGE.to_string()),
            });
        }
        (Some(key), None) => {
            if let Some(validator) = CustomValidator::from_key(key) {
                rules.push(FieldRule::Custom {
                    validator,
                    message: message_or(PATTERN_MESSAGE.to_string()),
                });
            }
        }
        (None, _) => {
            if let Some(min) = validation.min.filter(|m| *m > 0) {
                rules.push(FieldRule::MinLength {
                    min: min as usize,
                    message: message_or(format!("最少{}个字符", min)),
                });
            }
            if let Some(max) = validation.max.filter(|m| *m > 0) {
                rules.push(FieldRule::MaxLength {
                    max: max as usize,
                    message: message_or(format!("最多{}个字符", max)),
                });
            }
        }
    }

    Ok(rules)
}

/// Derive rules, dropping a pattern that does not compile
///
/// Used by the renderer so one broken pattern never blocks filling the
/// rest of the form.
pub fn rules_for_lossy(field: &FieldConfig) -> Vec<FieldRule> {
    match rules_for(field) {
        Ok(rules) => rules,
        Err(e) => {
            tracing::warn!("Ignoring pattern on field '{}': {}", field.name, e);
            let mut stripped = field.clone();
            if let Some(v) = stripped.validation.as_mut() {
                v.pattern = None;
            }
            rules_for(&stripped).unwrap_or_default()
        }
    }
}

/// Check one value against a set of rules, collecting every failure
pub fn check_rules(rules: &[FieldRule], value: Option<&Value>) -> Vec<String> {
    rules.iter().filter_map(|r| r.check(value).err()).collect()
}

/// Check one field's value
pub fn validate_field_value(field: &FieldConfig, value: Option<&Value>) -> Vec<String> {
    check_rules(&rules_for_lossy(field), value)
}

// ============================================================================
// Whole-form validation
// ============================================================================

/// Outcome of validating submitted data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidation {
    /// Failure messages keyed by field name
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message for a field, as shown under its widget
    pub fn first_error(&self, name: &str) -> Option<&str> {
        self.errors
            .get(name)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }
}

/// Validate every field of a form against submitted values
pub fn validate_form(config: &FormConfig, data: &FormData) -> FormValidation {
    let mut result = FormValidation::default();
    for field in &config.fields {
        let errors = validate_field_value(field, data.get(&field.name));
        if !errors.is_empty() {
            result.errors.insert(field.name.clone(), errors);
        }
    }
    result
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ValidationRule;
    use formwright_core::{CommonValidation, FieldType};
    use serde_json::json;

    fn input(rule: ValidationRule) -> FieldConfig {
        FieldConfig::new(FieldType::Input, "nickname", "昵称").with_validation(rule)
    }

    #[test]
    fn test_no_validation_no_rules() {
        let field = FieldConfig::new(FieldType::Input, "a", "A");
        assert!(rules_for(&field).unwrap().is_empty());
    }

    #[test]
    fn test_required_default_message() {
        let errors = validate_field_value(&input(ValidationRule::required()), None);
        assert_eq!(errors, vec!["昵称为必填项".to_string()]);
        let errors = validate_field_value(&input(ValidationRule::required()), Some(&json!("")));
        assert_eq!(errors.len(), 1);
        let errors = validate_field_value(&input(ValidationRule::required()), Some(&json!([])));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_custom_message_overrides_everything() {
        let mut rule = ValidationRule::length(2, 4);
        rule.message = Some("请正确填写".to_string());
        let field = input(rule);
        assert_eq!(validate_field_value(&field, None), vec!["请正确填写"]);
        assert_eq!(
            validate_field_value(&field, Some(&json!("a"))),
            vec!["请正确填写"]
        );
    }

    #[test]
    fn test_length_messages() {
        let field = input(ValidationRule::length(2, 4));
        assert_eq!(
            validate_field_value(&field, Some(&json!("a"))),
            vec!["最少2个字符"]
        );
        assert_eq!(
            validate_field_value(&field, Some(&json!("abcde"))),
            vec!["最多4个字符"]
        );
        assert!(validate_field_value(&field, Some(&json!("张三丰"))).is_empty());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let field = input(ValidationRule::length(1, 2));
        assert!(validate_field_value(&field, Some(&json!("张三"))).is_empty());
    }

    #[test]
    fn test_length_ignored_with_common_validation() {
        let rule = ValidationRule::length(1, 3).with_common(CommonValidation::Phone);
        let mut with_limits = rule.clone();
        with_limits.min = Some(1);
        with_limits.max = Some(3);
        let rules = rules_for(&input(with_limits)).unwrap();
        assert!(rules.iter().all(|r| !matches!(
            r,
            FieldRule::MinLength { .. } | FieldRule::MaxLength { .. }
        )));
    }

    #[test]
    fn test_pattern_rule() {
        let rule = ValidationRule::required().with_common(CommonValidation::Phone);
        let field = input(rule);
        assert!(validate_field_value(&field, Some(&json!("13812345678"))).is_empty());
        assert_eq!(
            validate_field_value(&field, Some(&json!("12345"))),
            vec!["请输入正确的手机号"]
        );
    }

    #[test]
    fn test_pattern_default_message() {
        let mut rule = ValidationRule::required().with_pattern(r"^\d+$");
        rule.custom = Some("digits".to_string());
        let errors = validate_field_value(&input(rule), Some(&json!("abc")));
        assert_eq!(errors, vec![PATTERN_MESSAGE]);
    }

    #[test]
    fn test_pattern_without_custom_is_ignored() {
        let rule = ValidationRule::default().with_pattern(r"^\d+$");
        assert!(rules_for(&input(rule)).unwrap().is_empty());
    }

    #[test]
    fn test_chinese_name_common_validation() {
        let field = input(ValidationRule::required().with_common(CommonValidation::ChineseName));
        assert!(validate_field_value(&field, Some(&json!("张三"))).is_empty());
        assert!(!validate_field_value(&field, Some(&json!("张"))).is_empty());
        assert!(!validate_field_value(&field, Some(&json!("Tom"))).is_empty());
    }

    #[test]
    fn test_age_common_validation() {
        let field = input(ValidationRule::required().with_common(CommonValidation::Age));
        assert!(validate_field_value(&field, Some(&json!("120"))).is_empty());
        assert!(validate_field_value(&field, Some(&json!(35))).is_empty());
        assert!(!validate_field_value(&field, Some(&json!("121"))).is_empty());
    }

    #[test]
    fn test_digit_checks_reject_fullwidth_digits() {
        assert!(CustomValidator::Phone.check("13812345678"));
        assert!(!CustomValidator::Phone.check("１３８１２３４５６７８"));
        assert!(!CustomValidator::IdCard.check("１１０１０５１９４９１２３１００２X"));
        assert!(!CustomValidator::IdCard.check("１２３４５６７８９０１２３４５"));

        let field = input(ValidationRule::required().with_common(CommonValidation::Phone));
        assert!(validate_field_value(&field, Some(&json!("13812345678"))).is_empty());
        assert!(!validate_field_value(&field, Some(&json!("１３８１２３４５６７８"))).is_empty());
    }

    #[test]
    fn test_custom_validator_fallback() {
        let field = FieldConfig::new(FieldType::IdCard, "idcard", "身份证号")
            .with_validation(ValidationRule::custom("idcard", "请输入正确的身份证号"));
        assert!(validate_field_value(&field, Some(&json!("11010519491231002X"))).is_empty());
        assert_eq!(
            validate_field_value(&field, Some(&json!("123"))),
            vec!["请输入正确的身份证号"]
        );
    }

    #[test]
    fn test_custom_validators() {
        assert!(CustomValidator::IdCard.check("123456789012345"));
        assert!(!CustomValidator::IdCard.check("12345678901234"));
        assert!(CustomValidator::Phone.check("19912345678"));
        assert!(!CustomValidator::Phone.check("12912345678"));
        assert!(CustomValidator::Email.check("a@b.cn"));
        assert!(!CustomValidator::Email.check("a@b"));
        assert!(CustomValidator::ChineseName.check("欧阳娜娜"));
        assert!(!CustomValidator::ChineseName.check("欧阳娜娜娜"));
        assert!(CustomValidator::Integer.check("42"));
        assert!(!CustomValidator::Integer.check("0"));
        assert!(!CustomValidator::Integer.check("4.2"));
        assert!(CustomValidator::Age.check("0"));
        assert!(CustomValidator::Age.check("150"));
        assert!(CustomValidator::Age.check("30岁"));
        assert!(!CustomValidator::Age.check("151"));
        assert!(!CustomValidator::Age.check("abc"));
        assert_eq!(CustomValidator::from_key("wechat"), None);
    }

    #[test]
    fn test_optional_empty_value_skips_format_rules() {
        let rule = ValidationRule::default().with_common(CommonValidation::Email);
        let field = input(rule);
        assert!(validate_field_value(&field, None).is_empty());
        assert!(validate_field_value(&field, Some(&json!(""))).is_empty());
    }

    #[test]
    fn test_checkbox_length_counts_items() {
        let field = FieldConfig::new(FieldType::Checkbox, "hobby", "爱好")
            .with_validation(ValidationRule::length(2, 3));
        assert_eq!(
            validate_field_value(&field, Some(&json!(["a"]))),
            vec!["最少2个字符"]
        );
        assert!(validate_field_value(&field, Some(&json!(["a", "b"]))).is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let mut rule = ValidationRule::required().with_pattern("([");
        rule.custom = Some("x".to_string());
        let field = input(rule);
        assert!(matches!(
            rules_for(&field),
            Err(FormError::InvalidPattern { .. })
        ));
        // The lossy variant keeps the required rule
        let rules = rules_for_lossy(&field);
        assert_eq!(rules.len(), 1);
        assert!(matches!(rules[0], FieldRule::Required { .. }));
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace(" 张 三\t\n"), "张三");
    }

    #[test]
    fn test_validate_form() {
        let mut form = FormConfig::new("t");
        form.add_field(input(ValidationRule::required()));
        form.add_field(
            FieldConfig::new(FieldType::Input, "email", "邮箱")
                .with_validation(ValidationRule::default().with_common(CommonValidation::Email)),
        );

        let mut data = FormData::new();
        data.insert("email".to_string(), json!("not-an-email"));
        let result = validate_form(&form, &data);
        assert!(!result.is_valid());
        assert_eq!(result.first_error("nickname"), Some("昵称为必填项"));
        assert_eq!(result.first_error("email"), Some("请输入正确的邮箱格式"));
        assert_eq!(result.error_count(), 2);

        data.insert("nickname".to_string(), json!("小明"));
        data.insert("email".to_string(), json!("ming@example.com"));
        assert!(validate_form(&form, &data).is_valid());
    }
}
