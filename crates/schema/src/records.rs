//! Stored records
//!
//! Saved designer configurations, published forms and the submissions
//! collected through them. These are the documents kept under the
//! `formConfigs`, `publishedForms` and `formSubmissions` storage keys.

use crate::form::{FormConfig, FormData};
use chrono::{DateTime, Utc};
use formwright_core::{Identifiable, Named, RecordId, Timestamped, generate_id};
use serde::{Deserialize, Serialize};

/// Id prefix of saved configurations
pub const CONFIG_ID_PREFIX: &str = "config";

/// Id prefix of published forms
pub const PUBLISHED_ID_PREFIX: &str = "published";

/// Id prefix of submissions
pub const SUBMISSION_ID_PREFIX: &str = "submission";

/// Form title recorded when a submission's form has none
pub const UNKNOWN_FORM_TITLE: &str = "未知表单";

/// Path segment of share links
pub const SHARE_PATH: &str = "/form/";

/// Build the share link for a published form
pub fn share_url(origin: &str, id: &str) -> String {
    format!("{}{}{}", origin.trim_end_matches('/'), SHARE_PATH, id)
}

// ============================================================================
// SavedConfig
// ============================================================================

/// A named designer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfig {
    pub id: RecordId,
    pub name: String,
    pub config: FormConfig,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl SavedConfig {
    /// Wrap a configuration under a new id; the stored copy is stripped
    pub fn new(name: impl Into<String>, config: &FormConfig) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(CONFIG_ID_PREFIX),
            name: name.into(),
            config: config.for_storage(),
            create_time: now,
            update_time: now,
        }
    }

    pub fn field_count(&self) -> usize {
        self.config.field_count()
    }
}

impl Identifiable for SavedConfig {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for SavedConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
        self.touch();
    }
}

impl Timestamped for SavedConfig {
    fn created_at(&self) -> DateTime<Utc> {
        self.create_time
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.update_time
    }

    fn touch(&mut self) {
        self.update_time = Utc::now();
    }
}

// ============================================================================
// PublishedForm
// ============================================================================

/// A configuration made available for filling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedForm {
    pub id: RecordId,
    /// Saved configuration this was published from
    pub config_id: RecordId,
    pub name: String,
    pub title: String,
    pub config: FormConfig,
    pub publish_time: DateTime<Utc>,
    #[serde(default)]
    pub access_count: u64,
    #[serde(default)]
    pub submit_count: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub share_url: String,
}

fn default_active() -> bool {
    true
}

impl PublishedForm {
    /// Publish a saved configuration under `name`
    pub fn new(name: impl Into<String>, source: &SavedConfig, origin: &str) -> Self {
        let id = generate_id(PUBLISHED_ID_PREFIX);
        Self {
            share_url: share_url(origin, &id),
            id,
            config_id: source.id.clone(),
            name: name.into(),
            title: source.config.title.clone(),
            config: source.config.clone(),
            publish_time: Utc::now(),
            access_count: 0,
            submit_count: 0,
            is_active: true,
        }
    }

    /// Whether `reference` is this form's id or a link that contains it
    pub fn matches_reference(&self, reference: &str) -> bool {
        let reference = reference.trim();
        !reference.is_empty() && (self.id == reference || reference.contains(&self.id))
    }
}

impl Identifiable for PublishedForm {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for PublishedForm {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

// ============================================================================
// Submission
// ============================================================================

/// Values submitted through a published form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: RecordId,
    pub form_id: RecordId,
    #[serde(default = "default_form_title")]
    pub form_title: String,
    pub data: FormData,
    pub submit_time: DateTime<Utc>,
}

fn default_form_title() -> String {
    UNKNOWN_FORM_TITLE.to_string()
}

impl Submission {
    pub fn new(form_id: impl Into<String>, form_title: Option<&str>, data: FormData) -> Self {
        let form_title = form_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_FORM_TITLE)
            .to_string();
        Self {
            id: generate_id(SUBMISSION_ID_PREFIX),
            form_id: form_id.into(),
            form_title,
            data,
            submit_time: Utc::now(),
        }
    }
}

impl Identifiable for Submission {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Tests
// ============================================================================
