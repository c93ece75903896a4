//! Form configuration linting
//!
//! This module checks a whole `FormConfig` for problems a designer should
//! fix before publishing: missing names, patterns that don't compile,
//! choice fields without options and similar. Errors block publishing;
//! warnings are informational.

use crate::form::FormConfig;
use formwright_core::{FieldType, FormError, FormResult, GRID_COLUMNS};
use std::collections::HashSet;

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed validation result with an error
    pub fn error(error: ValidationError) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match (self.errors.len(), self.warnings.len()) {
            (0, 0) => "No problems found".to_string(),
            (0, w) => format!("{} warning(s)", w),
            (e, 0) => format!("{} error(s)", e),
            (e, w) => format!("{} error(s), {} warning(s)", e, w),
        }
    }

    /// Convert to FormResult (fails if any errors)
    pub fn to_result(self) -> FormResult<()> {
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(FormError::validation(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "fields[2].validation.pattern")
    pub path: Option<String>,

    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            suggestion: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a suggestion to the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    EmptyTitle,
    EmptyFieldName,
    InvalidPattern,
    InvalidLengthRange,
    InvalidRating,
    Custom,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub code: ValidationWarningCode,
    pub message: String,
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    NoFields,
    DuplicateFieldName,
    SpanOutOfRange,
    NoOptions,
    UnknownFieldType,
    Custom,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Get the rule description
    fn description(&self) -> &'static str;

    /// Validate a form and return the result
    fn validate(&self, form: &FormConfig) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Form validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with default rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(FormTitleRule));
        validator.add_rule(Box::new(FieldNamesRule));
        validator.add_rule(Box::new(FieldRulesRule));
        validator.add_rule(Box::new(LayoutRule));
        validator.add_rule(Box::new(OptionsRule));
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the installed rules
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validate a form with all rules
    pub fn validate(&self, form: &FormConfig) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for rule in &self.rules {
            result.merge(rule.validate(form));
        }
        result
    }

    /// Validate and return Result
    pub fn validate_result(&self, form: &FormConfig) -> FormResult<()> {
        self.validate(form).to_result()
    }
}

/// Lint a form with the default rules
pub fn lint_form(form: &FormConfig) -> ValidationResult {
    Validator::with_default_rules().validate(form)
}

fn field_path(index: usize) -> String {
    format!("fields[{}]", index)
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: the form has a title and at least one field
pub struct FormTitleRule;

impl ValidationRule for FormTitleRule {
    fn name(&self) -> &'static str {
        "form_title"
    }

    fn description(&self) -> &'static str {
        "Validates that the form has a title and fields"
    }

    fn validate(&self, form: &FormConfig) -> ValidationResult {
        let mut result = ValidationResult::ok();
        if form.title.trim().is_empty() {
            result.add_error(
                ValidationError::new(ValidationErrorCode::EmptyTitle, "Form title cannot be empty")
                    .with_path("title"),
            );
        }
        if form.fields.is_empty() {
            result.add_warning(ValidationWarning::new(
                ValidationWarningCode::NoFields,
                "Form has no fields",
            ));
        }
        result
    }
}

/// Rule: every field has a name, and names don't collide
pub struct FieldNamesRule;

impl ValidationRule for FieldNamesRule {
    fn name(&self) -> &'static str {
        "field_names"
    }

    fn description(&self) -> &'static str {
        "Validates that field names are present and unique"
    }

    fn validate(&self, form: &FormConfig) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut seen: HashSet<&str> = HashSet::new();

        for (index, field) in form.fields.iter().enumerate() {
            let path = field_path(index);
            let name = field.name.trim();
            if name.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::EmptyFieldName,
                        format!("Field '{}' has no name", field.label),
                    )
                    .with_path(path)
                    .with_suggestion("Values are submitted under the field name"),
                );
                continue;
            }
            if !seen.insert(name) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::DuplicateFieldName,
                        format!("Field name '{}' is used more than once", name),
                    )
                    .with_path(path),
                );
            }
        }

        result
    }
}

/// Rule: validation settings are usable
pub struct FieldRulesRule;

impl ValidationRule for FieldRulesRule {
    fn name(&self) -> &'static str {
        "field_rules"
    }

    fn description(&self) -> &'static str {
        "Validates patterns, length ranges and rating limits"
    }

    fn validate(&self, form: &FormConfig) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (index, field) in form.fields.iter().enumerate() {
            let path = field_path(index);

            if let Some(validation) = &field.validation {
                if let Some(pattern) = validation.pattern_str() {
                    if let Err(e) = regex::Regex::new(pattern) {
                        result.add_error(
                            ValidationError::new(
                                ValidationErrorCode::InvalidPattern,
                                format!("Pattern on '{}' does not compile: {}", field.name, e),
                            )
                            .with_path(format!("{}.validation.pattern", path)),
                        );
                    }
                }
                if let (Some(min), Some(max)) = (validation.min, validation.max) {
                    if min > max {
                        result.add_error(
                            ValidationError::new(
                                ValidationErrorCode::InvalidLengthRange,
                                format!(
                                    "'{}' requires at least {} but at most {} characters",
                                    field.name, min, max
                                ),
                            )
                            .with_path(format!("{}.validation", path)),
                        );
                    }
                }
            }

            if let Some(max) = field.rating_config.as_ref().and_then(|r| r.max) {
                if !(crate::field::MIN_RATING..=crate::field::MAX_RATING).contains(&max) {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::InvalidRating,
                            format!("Rating '{}' allows {} stars", field.name, max),
                        )
                        .with_path(format!("{}.ratingConfig.max", path))
                        .with_suggestion("Use between 1 and 10 stars"),
                    );
                }
            }
        }

        result
    }
}

/// Rule: spans fit the grid and types are known
pub struct LayoutRule;

impl ValidationRule for LayoutRule {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn description(&self) -> &'static str {
        "Warns about spans outside the grid and unknown field types"
    }

    fn validate(&self, form: &FormConfig) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (index, field) in form.fields.iter().enumerate() {
            if let Some(span) = field.span {
                if !(1..=GRID_COLUMNS).contains(&span) {
                    result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::SpanOutOfRange,
                            format!(
                                "Span {} on '{}' will be shown as {}",
                                span,
                                field.name,
                                field.effective_span()
                            ),
                        )
                        .with_path(format!("{}.span", field_path(index))),
                    );
                }
            }
            if let FieldType::Other(kind) = &field.field_type {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::UnknownFieldType,
                        format!("'{}' has unknown type '{}', shown as text input", field.name, kind),
                    )
                    .with_path(format!("{}.type", field_path(index))),
                );
            }
        }

        result
    }
}

/// Rule: choice fields have something to choose from
pub struct OptionsRule;

impl ValidationRule for OptionsRule {
    fn name(&self) -> &'static str {
        "options"
    }

    fn description(&self) -> &'static str {
        "Warns about choice fields without options"
    }

    fn validate(&self, form: &FormConfig) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (index, field) in form.fields.iter().enumerate() {
            if field.field_type.is_choice() && field.resolved_options().is_empty() {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::NoOptions,
                        format!("'{}' has no options to choose from", field.label),
                    )
                    .with_path(format!("{}.options", field_path(index))),
                );
            }
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldConfig, ValidationRule as FieldValidation};
    use formwright_core::{OptionItem, OptionsPreset};

    fn valid_form() -> FormConfig {
        let mut form = FormConfig::new("报名表");
        form.add_field(FieldConfig::new(FieldType::Input, "name", "姓名").required());
        form.add_field(
            FieldConfig::new(FieldType::Radio, "gender", "性别").with_preset(OptionsPreset::Gender),
        );
        form
    }

    #[test]
    fn test_validation_result_ok() {
        let result = ValidationResult::ok();
        assert!(result.valid);
        assert!(!result.has_errors());
        assert_eq!(result.summary(), "No problems found");
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::error(ValidationError::new(
            ValidationErrorCode::Custom,
            "boom",
        )));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.to_result().is_err());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ValidationErrorCode::EmptyFieldName, "no name")
            .with_path("fields[0]");
        assert_eq!(err.to_string(), "[fields[0]] no name");
        let warning = ValidationWarning::new(ValidationWarningCode::NoFields, "empty");
        assert_eq!(warning.to_string(), "Warning: empty");
    }

    #[test]
    fn test_valid_form_passes() {
        let result = lint_form(&valid_form());
        assert!(result.valid, "{:?}", result.errors);
        assert!(!result.has_warnings(), "{:?}", result.warnings);
    }

    #[test]
    fn test_empty_form_warns() {
        let result = lint_form(&FormConfig::new("空表单"));
        assert!(result.valid);
        assert_eq!(result.warnings[0].code, ValidationWarningCode::NoFields);
    }

    #[test]
    fn test_empty_title_and_name_are_errors() {
        let mut form = valid_form();
        form.title = String::new();
        form.fields[0].name = String::new();
        let result = lint_form(&form);
        let codes: Vec<_> = result.errors.iter().map(|e| e.code).collect();
        assert!(codes.contains(&ValidationErrorCode::EmptyTitle));
        assert!(codes.contains(&ValidationErrorCode::EmptyFieldName));
        assert_eq!(result.summary(), "2 error(s)");
    }

    #[test]
    fn test_duplicate_names_warn() {
        let mut form = valid_form();
        form.add_field(FieldConfig::new(FieldType::Input, "name", "另一个姓名"));
        let result = lint_form(&form);
        assert!(result.valid);
        assert_eq!(
            result.warnings[0].code,
            ValidationWarningCode::DuplicateFieldName
        );
        assert_eq!(result.warnings[0].path.as_deref(), Some("fields[2]"));
    }

    #[test]
    fn test_bad_pattern_and_range() {
        let mut form = valid_form();
        form.add_field(
            FieldConfig::new(FieldType::Input, "code", "编号")
                .with_validation(FieldValidation::length(5, 1).with_pattern("[")),
        );
        let result = lint_form(&form);
        let codes: Vec<_> = result.errors.iter().map(|e| e.code).collect();
        assert!(codes.contains(&ValidationErrorCode::InvalidPattern));
        assert!(codes.contains(&ValidationErrorCode::InvalidLengthRange));
    }

    #[test]
    fn test_span_and_unknown_type_warnings() {
        let mut form = valid_form();
        form.add_field(FieldConfig::new(FieldType::from("signature"), "sig", "签名").with_span(0));
        let result = lint_form(&form);
        let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&ValidationWarningCode::SpanOutOfRange));
        assert!(codes.contains(&ValidationWarningCode::UnknownFieldType));
    }

    #[test]
    fn test_choice_without_options_warns() {
        let mut form = valid_form();
        form.add_field(FieldConfig::new(FieldType::Select, "city", "城市"));
        form.add_field(
            FieldConfig::new(FieldType::Checkbox, "tags", "标签")
                .with_options(vec![OptionItem::same("a")]),
        );
        let result = lint_form(&form);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, ValidationWarningCode::NoOptions);
    }

    #[test]
    fn test_custom_rule() {
        struct NoAgeRule;
        impl ValidationRule for NoAgeRule {
            fn name(&self) -> &'static str {
                "no_age"
            }
            fn description(&self) -> &'static str {
                "Forbids age fields"
            }
            fn validate(&self, form: &FormConfig) -> ValidationResult {
                if form.fields.iter().any(|f| f.field_type == FieldType::Age) {
                    ValidationResult::error(ValidationError::new(
                        ValidationErrorCode::Custom,
                        "age not allowed",
                    ))
                } else {
                    ValidationResult::ok()
                }
            }
        }

        let mut validator = Validator::new();
        validator.add_rule(Box::new(NoAgeRule));
        assert_eq!(validator.rule_names(), vec!["no_age"]);

        let mut form = valid_form();
        assert!(validator.validate_result(&form).is_ok());
        form.add_field(FieldConfig::new(FieldType::Age, "age", "年龄"));
        assert!(validator.validate_result(&form).is_err());
    }
}
