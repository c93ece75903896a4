//! File Operations for Formwright
//!
//! Native file dialogs (via `rfd`) and async file IO (via `tokio::fs`) for
//! exporting and importing form configurations, and for picking the files
//! an upload field submits.

use formwright_core::{FormError, FormResult, ResultExt};
use formwright_schema::serialization::{
    default_file_name, ensure_extension, export_config_string, import_config_bytes,
};
use formwright_schema::{CONFIG_FILE_EXTENSION, FormConfig, UploadConfig};
use rfd::AsyncFileDialog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// File Filter Constants
// ============================================================================

/// Display name for the configuration file filter
pub const FILE_TYPE_NAME: &str = "Form Configuration";

/// Extensions matched by an `image/*` accept pattern
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"];

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Open a file dialog to select a configuration to import
///
/// Returns the selected file path, or None if the dialog was cancelled.
pub async fn show_import_dialog() -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Import Form")
        .add_filter(FILE_TYPE_NAME, &[CONFIG_FILE_EXTENSION])
        .add_filter("All Files", &["*"])
        .pick_file()
        .await?;

    Some(file.path().to_path_buf())
}

/// Open a file dialog to choose where to export a form
///
/// The suggested name is derived from the form title; the returned path
/// always has the `.json` extension.
pub async fn show_export_dialog(title: &str) -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Export Form")
        .add_filter(FILE_TYPE_NAME, &[CONFIG_FILE_EXTENSION])
        .set_file_name(default_file_name(title))
        .save_file()
        .await?;

    Some(ensure_extension(file.path()))
}

// ============================================================================
// Import / Export
// ============================================================================

/// Import a configuration from a file
///
/// Opens a file dialog if no path is provided.
pub async fn import_form(path: Option<PathBuf>) -> FormResult<(FormConfig, PathBuf)> {
    let file_path = match path {
        Some(p) => p,
        None => show_import_dialog().await.ok_or(FormError::Cancelled)?,
    };

    let bytes = tokio::fs::read(&file_path)
        .await
        .map_err(|e| FormError::FileRead {
            path: file_path.clone(),
            message: e.to_string(),
        })?;
    let config = import_config_bytes(&bytes)?;

    tracing::info!(
        "Imported '{}' ({} fields) from {:?}",
        config.title,
        config.field_count(),
        file_path
    );
    Ok((config, file_path))
}

/// Export a configuration as pretty JSON
///
/// If `path` is `None`, a save dialog is shown first.
pub async fn export_form(config: &FormConfig, path: Option<PathBuf>) -> FormResult<PathBuf> {
    let file_path = match path {
        Some(p) => ensure_extension(p),
        None => show_export_dialog(&config.title)
            .await
            .ok_or(FormError::Cancelled)?,
    };

    let json = export_config_string(config)?;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(format!("Creating {}", parent.display()))?;
        }
    }
    tokio::fs::write(&file_path, json)
        .await
        .map_err(|e| FormError::FileWrite {
            path: file_path.clone(),
            message: e.to_string(),
        })?;

    tracing::info!("Exported '{}' to {:?}", config.title, file_path);
    Ok(file_path)
}

/// Log a failed file operation
///
/// Returns `false` for a cancelled dialog, which is not worth reporting to
/// the user.
pub fn log_failure(action: &str, error: &FormError) -> bool {
    if error.is_cancelled() {
        tracing::debug!("{} cancelled", action);
        false
    } else {
        tracing::error!("{} failed: {}", action, error);
        true
    }
}

// ============================================================================
// Uploads
// ============================================================================

/// A file picked for an upload field, as stored in the submitted data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

impl UploadedFile {
    /// Describe a file on disk
    pub async fn from_path(path: &Path) -> FormResult<Self> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FormError::FileRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            name: display_name(path),
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }
}

/// Outcome of picking files for an upload field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSelection {
    pub accepted: Vec<UploadedFile>,
    /// One message per rejected file
    pub rejected: Vec<String>,
}

/// File extensions matching an HTML-style accept list
///
/// `image/*` expands to common image types, `.pdf` style entries are taken
/// as-is, and anything else (`*/*`, other MIME types) places no limit.
pub fn accept_extensions(accept: &str) -> Vec<String> {
    let mut extensions = Vec::new();
    for entry in accept.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        if entry == "image/*" {
            extensions.extend(IMAGE_EXTENSIONS.iter().map(|e| e.to_string()));
        } else if let Some(ext) = entry.strip_prefix('.') {
            extensions.push(ext.to_lowercase());
        } else {
            return Vec::new();
        }
    }
    extensions.dedup();
    extensions
}

/// Apply the size and count limits of an upload field
///
/// `existing` is the number of files already attached.
pub fn select_uploads(
    candidates: Vec<UploadedFile>,
    config: &UploadConfig,
    existing: usize,
) -> UploadSelection {
    let max_bytes = config.max_size_bytes();
    let max_mb = max_bytes / (1024 * 1024);
    let mut remaining = (config.max_count() as usize).saturating_sub(existing);
    let mut selection = UploadSelection::default();

    for file in candidates {
        if file.size > max_bytes {
            selection
                .rejected
                .push(format!("{} 超过 {}MB 大小限制", file.name, max_mb));
        } else if remaining == 0 {
            selection.rejected.push(format!(
                "{} 未添加，最多上传 {} 个文件",
                file.name,
                config.max_count()
            ));
        } else {
            remaining -= 1;
            selection.accepted.push(file);
        }
    }
    selection
}

/// Pick files for an upload field
pub async fn pick_upload_files(config: &UploadConfig, existing: usize) -> FormResult<UploadSelection> {
    let extensions = accept_extensions(config.accept());
    let mut dialog = AsyncFileDialog::new().set_title("Choose Files");
    if !extensions.is_empty() {
        dialog = dialog.add_filter("Accepted Files", extensions.as_slice());
    }

    let handles = if config.max_count() > 1 {
        dialog.pick_files().await
    } else {
        dialog.pick_file().await.map(|f| vec![f])
    }
    .ok_or(FormError::Cancelled)?;

    let mut candidates = Vec::with_capacity(handles.len());
    for handle in handles {
        candidates.push(UploadedFile::from_path(handle.path()).await?);
    }
    Ok(select_uploads(candidates, config, existing))
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Get a display name for a file path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::FieldType;
    use formwright_schema::FieldConfig;
    use tempfile::TempDir;

    fn file(name: &str, size: u64) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            size,
        }
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = FormConfig::new("报名表");
        config.add_field(FieldConfig::new(FieldType::Input, "name", "姓名"));

        let target = temp_dir.path().join("nested").join("signup");
        let written = tokio_test::block_on(export_form(&config, Some(target))).unwrap();
        assert_eq!(written.extension().and_then(|e| e.to_str()), Some("json"));

        let (imported, path) = tokio_test::block_on(import_form(Some(written.clone()))).unwrap();
        assert_eq!(path, written);
        assert_eq!(imported.title, "报名表");
        assert_eq!(imported.fields.len(), 1);
        assert!(!imported.fields[0].id.is_empty());
        assert_ne!(imported.fields[0].id, config.fields[0].id);
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = tokio_test::block_on(import_form(Some(temp_dir.path().join("none.json"))))
            .unwrap_err();
        assert!(matches!(err, FormError::FileRead { .. }));
    }

    #[test]
    fn test_import_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = tokio_test::block_on(import_form(Some(path))).unwrap_err();
        assert!(err.to_string().contains("配置文件格式错误"));
    }

    #[test]
    fn test_uploaded_file_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.png");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let uploaded = tokio_test::block_on(UploadedFile::from_path(&path)).unwrap();
        assert_eq!(uploaded.name, "photo.png");
        assert_eq!(uploaded.size, 16);
    }

    #[test]
    fn test_accept_extensions() {
        assert!(accept_extensions("image/*").contains(&"png".to_string()));
        assert_eq!(accept_extensions(".PDF, .doc"), vec!["pdf", "doc"]);
        assert!(accept_extensions("*/*").is_empty());
        assert!(accept_extensions("").is_empty());
    }

    #[test]
    fn test_select_uploads_limits() {
        let config = UploadConfig {
            accept: None,
            max_size: Some(1),
            max_count: Some(2),
        };
        let selection = select_uploads(
            vec![
                file("a.png", 10),
                file("huge.png", 2 * 1024 * 1024),
                file("b.png", 10),
                file("c.png", 10),
            ],
            &config,
            0,
        );
        assert_eq!(selection.accepted.len(), 2);
        assert_eq!(selection.rejected.len(), 2);
        assert!(selection.rejected[0].contains("1MB"));
        assert!(selection.rejected[1].starts_with("c.png"));

        let none_left = select_uploads(vec![file("d.png", 1)], &config, 2);
        assert!(none_left.accepted.is_empty());
    }

    #[test]
    fn test_log_failure() {
        assert!(!log_failure("Import", &FormError::Cancelled));
        assert!(log_failure("Import", &FormError::internal("boom")));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/form.json")), "form.json");
        assert_eq!(display_name(Path::new("/")), "Untitled");
    }
}
