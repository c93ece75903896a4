//! Import and export of form configurations
//!
//! Exported documents are the stripped `FormConfig` as pretty JSON: no
//! field ids, no preset-backed options, vertical layout. Importing accepts
//! any JSON object with a `fields` array and prepares it for the designer.

use crate::CONFIG_FILE_EXTENSION;
use crate::form::{FormConfig, IMPORTED_FORM_TITLE};
use formwright_core::{FormError, FormResult, Persistable};
use std::path::{Path, PathBuf};

// ============================================================================
// Export
// ============================================================================

/// Serialize a designer form into an export document
pub fn export_config_string(config: &FormConfig) -> FormResult<String> {
    config.for_storage().to_json()
}

/// Export a designer form to a file
pub fn export_config(config: &FormConfig, path: impl AsRef<Path>) -> FormResult<()> {
    let path = path.as_ref();
    config.for_storage().save_to_file(path)?;
    tracing::info!("Exported form to {}", path.display());
    Ok(())
}

// ============================================================================
// Import
// ============================================================================

/// Parse an export document into a designer-ready form
///
/// A missing or empty title becomes the imported-form title, every field
/// gets a fresh id, and missing sizes get their defaults.
pub fn import_config(json: &str) -> FormResult<FormConfig> {
    FormConfig::from_json(json).map(prepare_import)
}

/// Import a form from a file
pub fn import_config_file(path: impl AsRef<Path>) -> FormResult<FormConfig> {
    FormConfig::load_from_file(path.as_ref()).map(prepare_import)
}

/// Import from raw bytes, as read by the file dialog
pub fn import_config_bytes(bytes: &[u8]) -> FormResult<FormConfig> {
    let json = std::str::from_utf8(bytes)
        .map_err(|e| FormError::InvalidConfigFormat(format!("Invalid UTF-8: {}", e)))?;
    import_config(json)
}

fn prepare_import(mut config: FormConfig) -> FormConfig {
    if config.title.is_empty() {
        config.title = IMPORTED_FORM_TITLE.to_string();
    }
    config.instantiate()
}

// ============================================================================
// Utility Functions
// ============================================================================

/// File name offered when exporting a form
///
/// Path separators and other characters file systems reject are replaced;
/// everything else, including CJK, is kept.
pub fn default_file_name(title: &str) -> String {
    let safe: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let stem = if safe.is_empty() {
        IMPORTED_FORM_TITLE
    } else {
        safe.as_str()
    };
    format!("{}.{}", stem, CONFIG_FILE_EXTENSION)
}

/// Ensure a path has the configuration extension
pub fn ensure_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if path.extension().is_none_or(|e| e != CONFIG_FILE_EXTENSION) {
        let mut new_path = path.to_path_buf();
        new_path.set_extension(CONFIG_FILE_EXTENSION);
        new_path
    } else {
        path.to_path_buf()
    }
}

// ============================================================================
// Tests
// ============================================================================
