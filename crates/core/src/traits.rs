//! Core traits for Formwright
//!
//! This module defines the traits that the form model and the stored
//! records implement to provide consistent behavior for validation,
//! persistence and lookup.

use crate::error::{FormError, FormResult};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use formwright_core::{Validatable, FormResult, FormError};
///
/// struct Option {
///     label: String,
/// }
///
/// impl Validatable for Option {
///     fn validate(&self) -> FormResult<()> {
///         if self.label.trim().is_empty() {
///             return Err(FormError::validation("Option label cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `FormError` describing the problem.
    fn validate(&self) -> FormResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for types that can be serialized to and deserialized from files
///
/// Exported form configurations are plain pretty-printed JSON documents.
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Get the file extension for this type (without the dot)
    fn file_extension() -> &'static str;

    /// Save to a JSON string
    fn to_json(&self) -> FormResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> FormResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Save to a file, creating missing parent directories
    fn save_to_file(&self, path: &Path) -> FormResult<()> {
        let json = self.to_json()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| FormError::FileWrite {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }

        std::fs::write(path, json).map_err(|e| FormError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from a file
    fn load_from_file(path: &Path) -> FormResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| FormError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for records addressed by a string identifier
pub trait Identifiable {
    /// Get the identifier
    fn id(&self) -> &str;

    /// Check whether this record carries the given id
    fn matches_id(&self, id: &str) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Named Trait
// ============================================================================

/// Trait for types that have a human-readable name
pub trait Named {
    /// Get the name
    fn name(&self) -> &str;

    /// Set the name
    fn set_name(&mut self, name: String);

    /// Case-insensitive name comparison
    fn name_matches(&self, other: &str) -> bool {
        self.name().eq_ignore_ascii_case(other)
    }
}

// ============================================================================
// Timestamped Trait
// ============================================================================

/// Trait for types that track creation and modification times
pub trait Timestamped {
    /// Get the creation timestamp
    fn created_at(&self) -> chrono::DateTime<chrono::Utc>;

    /// Get the last modification timestamp
    fn modified_at(&self) -> chrono::DateTime<chrono::Utc>;

    /// Update the modification timestamp to now
    fn touch(&mut self);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    struct TestValidatable {
        valid: bool,
    }

    impl Validatable for TestValidatable {
        fn validate(&self) -> FormResult<()> {
            if self.valid {
                Ok(())
            } else {
                Err(FormError::validation("Invalid state"))
            }
        }
    }

    #[test]
    fn test_validatable_trait() {
        let valid = TestValidatable { valid: true };
        assert!(valid.is_valid());
        assert!(valid.validation_errors().is_empty());

        let invalid = TestValidatable { valid: false };
        assert!(!invalid.is_valid());
        assert_eq!(
            invalid.validation_errors(),
            vec!["Validation error: Invalid state".to_string()]
        );
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        title: String,
    }

    impl Persistable for Doc {
        fn file_extension() -> &'static str {
            "json"
        }
    }

    #[test]
    fn test_persistable_json_round_trip() {
        let doc = Doc {
            title: "报名表".to_string(),
        };
        let json = doc.to_json().unwrap();
        assert!(json.contains("报名表"));
        assert_eq!(Doc::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_persistable_missing_file() {
        let err = Doc::load_from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.is_io());
    }

    struct Record(String);

    impl Identifiable for Record {
        fn id(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_identifiable_matches() {
        let r = Record("config_1".to_string());
        assert!(r.matches_id("config_1"));
        assert!(!r.matches_id("config_2"));
    }
}
