//! Form repository
//!
//! High-level persistence operations for the designer, publisher and
//! filler, on top of any `KeyValueStore`.

use crate::form::{FormConfig, FormData};
use crate::records::{PublishedForm, SavedConfig, Submission};
use crate::storage::{
    FORM_CONFIGS_KEY, FORM_SUBMISSIONS_KEY, KeyValueStore, MemoryStore, PUBLISHED_FORMS_KEY,
    read_list, write_list,
};
use formwright_core::{FormError, FormResult, Identifiable, Timestamped};
use std::sync::Arc;

/// Error shown when a configuration is saved without a name
pub const MISSING_CONFIG_NAME: &str = "请输入配置名称";

/// Error shown when a form is published without a name
pub const MISSING_PUBLISH_NAME: &str = "请输入发布名称";

/// Error shown when publishing without choosing a configuration
pub const MISSING_PUBLISH_CONFIG: &str = "请选择要发布的配置";

/// Origin used in share links when none is configured
pub const DEFAULT_SHARE_ORIGIN: &str = "http://localhost:8080";

/// Saved configurations, published forms and submissions
#[derive(Debug, Clone)]
pub struct FormRepository {
    store: Arc<dyn KeyValueStore>,
    share_origin: String,
}

impl FormRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, share_origin: impl Into<String>) -> Self {
        Self {
            store,
            share_origin: share_origin.into(),
        }
    }

    /// Repository backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), DEFAULT_SHARE_ORIGIN)
    }

    pub fn share_origin(&self) -> &str {
        &self.share_origin
    }

    // ========================================================================
    // Saved configurations
    // ========================================================================

    /// All saved configurations in save order
    pub fn configs(&self) -> FormResult<Vec<SavedConfig>> {
        read_list(self.store.as_ref(), FORM_CONFIGS_KEY)
    }

    /// Save a designer form under `name`
    ///
    /// The stored copy has no field ids, no preset-backed options, and a
    /// vertical responsive layout.
    pub fn save_config(&self, name: &str, config: &FormConfig) -> FormResult<SavedConfig> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName(MISSING_CONFIG_NAME.to_string()));
        }

        let record = SavedConfig::new(name, config);
        let mut configs = self.configs()?;
        configs.push(record.clone());
        write_list(self.store.as_ref(), FORM_CONFIGS_KEY, &configs)?;

        tracing::info!("Saved configuration '{}' as {}", record.name, record.id);
        Ok(record)
    }

    /// Look up a saved configuration
    pub fn config(&self, id: &str) -> FormResult<SavedConfig> {
        self.configs()?
            .into_iter()
            .find(|c| c.matches_id(id))
            .ok_or_else(|| FormError::ConfigNotFound(id.to_string()))
    }

    /// A saved configuration prepared for the designer, with fresh field ids
    pub fn load_config(&self, id: &str) -> FormResult<FormConfig> {
        let record = self.config(id)?;
        tracing::debug!("Loading configuration '{}'", record.name);
        Ok(record.config.instantiate())
    }

    /// Rename a saved configuration
    pub fn rename_config(&self, id: &str, name: &str) -> FormResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName(MISSING_CONFIG_NAME.to_string()));
        }
        let mut configs = self.configs()?;
        let record = configs
            .iter_mut()
            .find(|c| c.matches_id(id))
            .ok_or_else(|| FormError::ConfigNotFound(id.to_string()))?;
        record.name = name.to_string();
        record.touch();
        write_list(self.store.as_ref(), FORM_CONFIGS_KEY, &configs)
    }

    /// Delete a saved configuration; returns whether it existed
    pub fn delete_config(&self, id: &str) -> FormResult<bool> {
        let mut configs = self.configs()?;
        let before = configs.len();
        configs.retain(|c| !c.matches_id(id));
        if configs.len() == before {
            return Ok(false);
        }
        write_list(self.store.as_ref(), FORM_CONFIGS_KEY, &configs)?;
        tracing::info!("Deleted configuration {}", id);
        Ok(true)
    }

    // ========================================================================
    // Published forms
    // ========================================================================

    /// All published forms in publish order
    pub fn published_forms(&self) -> FormResult<Vec<PublishedForm>> {
        read_list(self.store.as_ref(), PUBLISHED_FORMS_KEY)
    }

    /// Publish the saved configuration `config_id` under `name`
    pub fn publish(&self, name: &str, config_id: Option<&str>) -> FormResult<PublishedForm> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName(MISSING_PUBLISH_NAME.to_string()));
        }
        let config_id = config_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| FormError::NothingSelected(MISSING_PUBLISH_CONFIG.to_string()))?;

        let source = self.config(config_id)?;
        let published = PublishedForm::new(name, &source, &self.share_origin);

        let mut forms = self.published_forms()?;
        forms.push(published.clone());
        write_list(self.store.as_ref(), PUBLISHED_FORMS_KEY, &forms)?;

        tracing::info!("Published '{}' at {}", published.name, published.share_url);
        Ok(published)
    }

    /// Delete a published form; returns whether it existed
    pub fn delete_published(&self, id: &str) -> FormResult<bool> {
        let mut forms = self.published_forms()?;
        let before = forms.len();
        forms.retain(|f| !f.matches_id(id));
        if forms.len() == before {
            return Ok(false);
        }
        write_list(self.store.as_ref(), PUBLISHED_FORMS_KEY, &forms)?;
        tracing::info!("Deleted published form {}", id);
        Ok(true)
    }

    /// Find a published form by id or by a share link containing its id
    pub fn find_published(&self, reference: &str) -> FormResult<PublishedForm> {
        self.published_forms()?
            .into_iter()
            .find(|f| f.matches_reference(reference))
            .ok_or_else(|| FormError::PublishedFormNotFound(reference.trim().to_string()))
    }

    /// Open a published form for filling, counting the visit
    pub fn open_published(&self, reference: &str) -> FormResult<PublishedForm> {
        let form = self.find_published(reference)?;
        self.record_access(&form.id)
    }

    /// Increment the access count of a published form
    pub fn record_access(&self, id: &str) -> FormResult<PublishedForm> {
        self.modify_published(id, |form| form.access_count += 1)
    }

    /// Store a submission and increment the form's submit count
    ///
    /// The submission is kept even when the form has since been deleted.
    pub fn record_submission(&self, form_id: &str, data: FormData) -> FormResult<Submission> {
        let title = self
            .published_forms()?
            .into_iter()
            .find(|f| f.matches_id(form_id))
            .map(|f| f.config.title);
        let submission = Submission::new(form_id, title.as_deref(), data);

        let mut submissions = self.submissions()?;
        submissions.push(submission.clone());
        write_list(self.store.as_ref(), FORM_SUBMISSIONS_KEY, &submissions)?;

        match self.modify_published(form_id, |form| form.submit_count += 1) {
            Ok(_) => {}
            Err(FormError::PublishedFormNotFound(_)) => {
                tracing::warn!("Submission {} is for a missing form {}", submission.id, form_id);
            }
            Err(e) => return Err(e),
        }

        tracing::info!("Recorded submission {} for {}", submission.id, form_id);
        Ok(submission)
    }

    /// Replace the configuration of a published form in place
    pub fn update_published_config(
        &self,
        id: &str,
        config: &FormConfig,
    ) -> FormResult<PublishedForm> {
        let stored = config.for_storage();
        self.modify_published(id, |form| {
            form.title = stored.title.clone();
            form.config = stored;
        })
    }

    /// Take a published form offline or bring it back
    pub fn set_published_active(&self, id: &str, active: bool) -> FormResult<PublishedForm> {
        self.modify_published(id, |form| form.is_active = active)
    }

    fn modify_published<F>(&self, id: &str, change: F) -> FormResult<PublishedForm>
    where
        F: FnOnce(&mut PublishedForm),
    {
        let mut forms = self.published_forms()?;
        let form = forms
            .iter_mut()
            .find(|f| f.matches_id(id))
            .ok_or_else(|| FormError::PublishedFormNotFound(id.to_string()))?;
        change(form);
        let updated = form.clone();
        write_list(self.store.as_ref(), PUBLISHED_FORMS_KEY, &forms)?;
        Ok(updated)
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    /// All submissions in submit order
    pub fn submissions(&self) -> FormResult<Vec<Submission>> {
        read_list(self.store.as_ref(), FORM_SUBMISSIONS_KEY)
    }

    /// Submissions made through one published form
    pub fn submissions_for(&self, form_id: &str) -> FormResult<Vec<Submission>> {
        Ok(self
            .submissions()?
            .into_iter()
            .filter(|s| s.form_id == form_id)
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;
    use crate::storage::FileStore;
    use formwright_core::{FieldType, OptionItem, OptionsPreset};
    use tempfile::TempDir;

    fn designer_form() -> FormConfig {
        let mut form = FormConfig::new("报名表");
        form.add_field(FieldConfig::new(FieldType::Input, "name", "姓名").required());
        let mut edu = FieldConfig::new(FieldType::Select, "education", "学历")
            .with_preset(OptionsPreset::Education);
        edu.options = Some(vec![OptionItem::same("本科")]);
        form.add_field(edu);
        form
    }

    fn published(repo: &FormRepository) -> PublishedForm {
        let saved = repo.save_config("报名", &designer_form()).unwrap();
        repo.publish("春季报名", Some(saved.id.as_str())).unwrap()
    }

    #[test]
    fn test_save_config_requires_name() {
        let repo = FormRepository::in_memory();
        let err = repo.save_config("   ", &designer_form()).unwrap_err();
        assert_eq!(err.to_string(), MISSING_CONFIG_NAME);
        assert!(repo.configs().unwrap().is_empty());
    }

    #[test]
    fn test_save_config_strips() {
        let repo = FormRepository::in_memory();
        let saved = repo.save_config(" 报名 ", &designer_form()).unwrap();
        assert_eq!(saved.name, "报名");
        assert!(saved.id.starts_with("config_"));

        let stored = repo.config(&saved.id).unwrap();
        assert!(stored.config.fields.iter().all(|f| f.id.is_empty()));
        assert_eq!(stored.config.fields[1].options, None);
    }

    #[test]
    fn test_configs_keep_save_order() {
        let repo = FormRepository::in_memory();
        repo.save_config("a", &designer_form()).unwrap();
        repo.save_config("b", &designer_form()).unwrap();
        let names: Vec<String> = repo.configs().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_load_config_assigns_fresh_ids() {
        let repo = FormRepository::in_memory();
        let saved = repo.save_config("报名", &designer_form()).unwrap();
        let loaded = repo.load_config(&saved.id).unwrap();
        assert!(loaded.fields.iter().all(|f| f.id.starts_with("field_")));
        assert_eq!(loaded.title, "报名表");

        assert!(repo.load_config("config_missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rename_and_delete_config() {
        let repo = FormRepository::in_memory();
        let saved = repo.save_config("报名", &designer_form()).unwrap();
        repo.rename_config(&saved.id, "新名称").unwrap();
        assert_eq!(repo.config(&saved.id).unwrap().name, "新名称");
        assert!(repo.rename_config(&saved.id, "").is_err());

        assert!(repo.delete_config(&saved.id).unwrap());
        assert!(!repo.delete_config(&saved.id).unwrap());
        assert!(repo.configs().unwrap().is_empty());
    }

    #[test]
    fn test_publish_requires_name_and_config() {
        let repo = FormRepository::in_memory();
        let saved = repo.save_config("报名", &designer_form()).unwrap();

        let err = repo.publish("", Some(saved.id.as_str())).unwrap_err();
        assert_eq!(err.to_string(), MISSING_PUBLISH_NAME);

        let err = repo.publish("春季报名", None).unwrap_err();
        assert_eq!(err.to_string(), MISSING_PUBLISH_CONFIG);

        assert!(repo.publish("春季报名", Some("config_gone")).unwrap_err().is_not_found());
        assert!(repo.published_forms().unwrap().is_empty());
    }

    #[test]
    fn test_publish() {
        let repo = FormRepository::in_memory();
        let form = published(&repo);
        assert_eq!(form.title, "报名表");
        assert_eq!(form.access_count, 0);
        assert!(form.share_url.starts_with("http://localhost:8080/form/published_"));
        assert_eq!(repo.published_forms().unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_id_or_url() {
        let repo = FormRepository::in_memory();
        let form = published(&repo);
        assert_eq!(repo.find_published(&form.id).unwrap().id, form.id);
        assert_eq!(repo.find_published(&form.share_url).unwrap().id, form.id);
        assert!(repo.find_published("published_nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_open_counts_access() {
        let repo = FormRepository::in_memory();
        let form = published(&repo);
        repo.open_published(&form.id).unwrap();
        let opened = repo.open_published(&form.share_url).unwrap();
        assert_eq!(opened.access_count, 2);
        assert_eq!(repo.find_published(&form.id).unwrap().access_count, 2);
    }

    #[test]
    fn test_record_submission() {
        let repo = FormRepository::in_memory();
        let form = published(&repo);

        let mut data = FormData::new();
        data.insert("name".to_string(), serde_json::json!("张三"));
        let submission = repo.record_submission(&form.id, data).unwrap();

        assert!(submission.id.starts_with("submission_"));
        assert_eq!(submission.form_title, "报名表");
        assert_eq!(repo.find_published(&form.id).unwrap().submit_count, 1);
        assert_eq!(repo.submissions_for(&form.id).unwrap().len(), 1);
    }

    #[test]
    fn test_submission_for_deleted_form_is_kept() {
        let repo = FormRepository::in_memory();
        let submission = repo
            .record_submission("published_gone", FormData::new())
            .unwrap();
        assert_eq!(submission.form_title, "未知表单");
        assert_eq!(repo.submissions().unwrap().len(), 1);
    }

    #[test]
    fn test_update_published_config() {
        let repo = FormRepository::in_memory();
        let form = published(&repo);

        let mut edited = form.config.instantiate();
        edited.title = "秋季报名".to_string();
        edited.add_field(FieldConfig::new(FieldType::Phone, "phone", "手机号"));
        let updated = repo.update_published_config(&form.id, &edited).unwrap();

        assert_eq!(updated.config.field_count(), 3);
        assert_eq!(updated.title, "秋季报名");
        assert_eq!(updated.id, form.id);
        assert!(updated.config.fields.iter().all(|f| f.id.is_empty()));
        assert_eq!(repo.published_forms().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_published_and_deactivate() {
        let repo = FormRepository::in_memory();
        let form = published(&repo);
        assert!(!repo.set_published_active(&form.id, false).unwrap().is_active);
        assert!(repo.delete_published(&form.id).unwrap());
        assert!(!repo.delete_published(&form.id).unwrap());
    }

    #[test]
    fn test_file_backed_repository() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
        let repo = FormRepository::new(store, "https://forms.example.com");
        let form = published(&repo);
        assert!(form.share_url.starts_with("https://forms.example.com/form/"));

        let reopened = FormRepository::new(
            Arc::new(FileStore::open(temp_dir.path()).unwrap()),
            "https://forms.example.com",
        );
        assert_eq!(reopened.configs().unwrap().len(), 1);
        assert_eq!(reopened.find_published(&form.id).unwrap().name, "春季报名");
        assert!(temp_dir.path().join("publishedForms.json").exists());
    }
}
