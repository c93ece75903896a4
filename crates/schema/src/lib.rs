//! # Formwright Schema
//!
//! The form model and everything that operates on it without a UI.
//!
//! ## Core Concepts
//!
//! - **FieldConfig**: One input, with layout, options and validation settings
//! - **FormConfig**: An ordered, titled list of fields
//! - **Component library**: The palette templates fields are created from
//! - **Rules**: Value validation derived from a field's settings
//! - **Repository**: Saved configurations, published forms and submissions
//!   on top of a key/value store
//!

// Module declarations
pub mod builder;
pub mod field;
pub mod form;
pub mod library;
pub mod presets;
pub mod records;
pub mod repository;
pub mod rules;
pub mod serialization;
pub mod storage;
pub mod validation;

// Re-export commonly used types at crate root
pub use builder::FormBuilder;
pub use field::{
    FieldConfig, FieldUpdate, InputConfig, RatingConfig, UploadConfig, ValidationRule,
    generate_field_id,
};
pub use form::{
    BUILDER_FORM_TITLE, DEFAULT_FORM_TITLE, FormConfig, FormData, IMPORTED_FORM_TITLE,
};
pub use library::ComponentItem;
pub use records::{PublishedForm, SavedConfig, Submission};
pub use repository::FormRepository;
pub use rules::{CustomValidator, FieldRule, FormValidation, rules_for, validate_form};
pub use serialization::{export_config_string, import_config};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use validation::{ValidationResult, Validator, lint_form};

// Re-export core types that are commonly used with the schema
pub use formwright_core::{
    CommonValidation, ComponentCategory, FieldType, FormError, FormLayout, FormResult,
    OptionItem, OptionValue, OptionsPreset, ValidationTrigger,
};

/// File extension for exported configurations
pub const CONFIG_FILE_EXTENSION: &str = "json";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        ComponentCategory,
        ComponentItem,
        // Model
        FieldConfig,
        FieldType,
        FieldUpdate,
        FormConfig,
        FormData,
        // Re-exported from core
        FormError,
        // Persistence
        FormRepository,
        FormResult,
        OptionItem,
        OptionsPreset,
        PublishedForm,
        SavedConfig,
        Submission,
        ValidationRule,
        // Rules
        validate_form,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(CONFIG_FILE_EXTENSION, "json");
    }
}
