//! # Formwright Core
//!
//! Core types, traits, and error handling for Formwright.
//!
//! This crate provides the foundational building blocks used throughout
//! the designer, including:
//!
//! - **Types**: Field types, triggers, option values, presets, grid math
//! - **Traits**: Common behaviors like `Validatable` and `Persistable`
//! - **Errors**: Unified error handling with `FormError` and `FormResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{FormError, FormResult, ResultExt};
pub use traits::{Identifiable, Named, Persistable, Timestamped, Validatable};
pub use types::{
    CommonValidation, ComponentCategory, FieldId, FieldType, FormLayout, GRID_COLUMNS,
    OptionItem, OptionValue, OptionsPreset, RecordId, ValidationTrigger, clamp_span,
    column_percent, generate_id,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
