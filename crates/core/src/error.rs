//! Error types for Formwright
//!
//! This module provides unified error handling across the designer,
//! including validation errors, storage errors, serialization errors and
//! cancelled file dialogs.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Formwright
#[derive(Debug, Error)]
pub enum FormError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field validation failed
    #[error("Field validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// A name that must be provided was blank
    #[error("{0}")]
    MissingName(String),

    /// A regular expression in a field rule does not compile
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Field not found on the current form
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Library component not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Saved configuration not found
    #[error("Saved configuration not found: {0}")]
    ConfigNotFound(String),

    /// Published form not found
    #[error("Published form not found: {0}")]
    PublishedFormNotFound(String),

    /// Form builder template not found
    #[error("未知的字段模板: {0}")]
    UnknownTemplate(String),

    /// Nothing selected for an operation that needs a selection
    #[error("{0}")]
    NothingSelected(String),

    // ========================================================================
    // IO / Storage Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Key/value storage failure
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Imported configuration could not be understood
    #[error("配置文件格式错误: {0}")]
    InvalidConfigFormat(String),

    // ========================================================================
    // Settings Errors
    // ========================================================================
    /// Invalid settings file
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl FormError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        FormError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        FormError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a storage error
    pub fn storage(key: impl Into<String>, msg: impl Into<String>) -> Self {
        FormError::Storage {
            key: key.into(),
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        FormError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        FormError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FormError::Validation(_)
                | FormError::FieldValidation { .. }
                | FormError::MissingName(_)
                | FormError::InvalidPattern { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FormError::FieldNotFound(_)
                | FormError::ComponentNotFound(_)
                | FormError::ConfigNotFound(_)
                | FormError::PublishedFormNotFound(_)
                | FormError::UnknownTemplate(_)
        )
    }

    /// Check if this error is an IO or storage error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            FormError::Io(_)
                | FormError::FileRead { .. }
                | FormError::FileWrite { .. }
                | FormError::Storage { .. }
        )
    }

    /// Check if the user backed out of the operation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FormError::Cancelled)
    }
}

/// Result type alias using FormError
pub type FormResult<T> = Result<T, FormError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> FormResult<T>;
}

impl<T, E: Into<FormError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> FormResult<T> {
        self.map_err(|e| {
            let err: FormError = e.into();
            FormError::with_context(context, err.to_string())
        })
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
    fn test_validation_error() {
        let err = FormError::validation("Title is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation error: Title is required");
    }

    #[test]
    fn test_field_validation_error() {
        let err = FormError::field_validation("phone", "Pattern does not compile");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'phone': Pattern does not compile"
        );
    }

    #[test]
    fn test_missing_name_displays_message_verbatim() {
        let err = FormError::MissingName("请输入配置名称".to_string());
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "请输入配置名称");
    }

    #[test]
    fn test_not_found_errors() {
        let err = FormError::PublishedFormNotFound("published_1".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Published form not found: published_1");
    }

    #[test]
    fn test_unknown_template() {
        let err = FormError::UnknownTemplate("wechat".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "未知的字段模板: wechat");
    }

    #[test]
    fn test_error_with_context() {
        let err = FormError::with_context("Saving config", "Permission denied");
        assert_eq!(err.to_string(), "Saving config: Permission denied");
    }

    #[test]
    fn test_result_ext_wraps_message() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.with_context("Writing store").unwrap_err();
        assert_eq!(err.to_string(), "Writing store: IO error: denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FormError = io_err.into();
        assert!(err.is_io());
        assert!(FormError::storage("formConfigs", "corrupt").is_io());
    }

    #[test]
    fn test_cancelled() {
        assert!(FormError::Cancelled.is_cancelled());
        assert_eq!(FormError::Cancelled.to_string(), "Operation cancelled");
    }
}
