//! Application State Management for Formwright
//!
//! This module provides centralized state management using Dioxus 0.7 Signals.
//! It holds the form being designed, the selection, drag state, undo/redo
//! history, dialogs and the filler session, and exposes the designer
//! operations the components call.

use dioxus::prelude::*;
use formwright_core::{FieldId, FormError, FormResult};
use formwright_schema::repository::MISSING_PUBLISH_NAME;
use formwright_schema::validation::ValidationResult;
use formwright_schema::{
    FieldConfig, FieldUpdate, FormConfig, FormData, FormRepository, PublishedForm, SavedConfig,
    Submission, library, validation,
};
use std::sync::{Arc, OnceLock};

use crate::settings::Settings;

// ============================================================================
// Page Navigation
// ============================================================================

/// Application pages/views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Palette, canvas and property panel
    #[default]
    Designer,
    /// The designer form rendered for filling
    Preview,
    /// Saved configurations and published forms
    Publisher,
    /// Fill in a published form
    Filler,
}

impl Page {
    pub fn display_name(&self) -> &'static str {
        match self {
            Page::Designer => "Design",
            Page::Preview => "Preview",
            Page::Publisher => "Publish",
            Page::Filler => "Fill",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Designer => "🎨",
            Page::Preview => "👁️",
            Page::Publisher => "🚀",
            Page::Filler => "📝",
        }
    }

    pub fn all() -> &'static [Page] {
        &[Page::Designer, Page::Preview, Page::Publisher, Page::Filler]
    }
}

// ============================================================================
// Drag State
// ============================================================================

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    /// A palette component, by library id
    Component(String),
    /// A canvas card, by its index in the form
    Field(usize),
}

/// State for drag and drop on the canvas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    /// Item being dragged (if any)
    pub item: Option<DragItem>,
    /// Card index currently hovered as a drop target
    pub over_index: Option<usize>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, item: DragItem) {
        self.item = Some(item);
        self.over_index = None;
    }

    /// Stop dragging and hand back what was dragged
    pub fn take(&mut self) -> Option<DragItem> {
        self.over_index = None;
        self.item.take()
    }

    pub fn is_dragging(&self) -> bool {
        self.item.is_some()
    }

    pub fn is_dragging_field(&self, index: usize) -> bool {
        self.item == Some(DragItem::Field(index))
    }
}

// ============================================================================
// UI State
// ============================================================================

/// General UI state (dialogs, panels, etc.)
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Whether the component palette is collapsed
    pub palette_collapsed: bool,
    /// Whether the properties panel is collapsed
    pub properties_collapsed: bool,
    /// Currently active page
    pub active_page: Page,
    /// Active dialog (if any)
    pub active_dialog: Option<Dialog>,
    /// Status bar message
    pub status_message: Option<StatusMessage>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            palette_collapsed: false,
            properties_collapsed: false,
            active_page: Page::Designer,
            active_dialog: None,
            status_message: None,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to a page
    pub fn navigate(&mut self, page: Page) {
        self.active_page = page;
    }

    /// Show a dialog
    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = None;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: message.into(),
            level,
        });
    }

    /// Report an error in the status bar
    pub fn set_error(&mut self, error: &FormError) {
        self.set_status(error.to_string(), StatusLevel::Error);
    }

    pub fn toggle_palette(&mut self) {
        self.palette_collapsed = !self.palette_collapsed;
    }

    pub fn toggle_properties(&mut self) {
        self.properties_collapsed = !self.properties_collapsed;
    }
}

/// Dialog types
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Name and save the designer form
    SaveConfig,
    /// Pick a saved configuration to load into the designer
    LoadConfig,
    /// Name and publish a saved configuration
    Publish,
    /// Save the form being edited in the filler as a new configuration
    SaveAs,
    /// Delete confirmation
    ConfirmDelete(DeleteTarget),
    /// Lint results for the designer form
    Problems,
    /// About dialog
    About,
    /// Error dialog
    Error(String),
}

/// Target for delete confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    SavedConfig(String),
    PublishedForm(String),
}

/// Status message for the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

// ============================================================================
// History (Undo/Redo)
// ============================================================================

/// History state for undo/redo operations
#[derive(Debug, Clone)]
pub struct History {
    /// Past states (for undo)
    past: Vec<HistorySnapshot>,
    /// Future states (for redo)
    future: Vec<HistorySnapshot>,
    /// Maximum history size
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_size: crate::settings::DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create history with custom max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size: max_size.max(1),
            ..Default::default()
        }
    }

    /// Push a new snapshot (clears redo stack)
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.past.push(snapshot);
        self.future.clear();

        if self.past.len() > self.max_size {
            self.past.remove(0);
        }
    }

    /// Undo: pop from past, push current to future
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Redo: pop from future, push current to past
    pub fn redo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Action the next undo reverts
    pub fn undo_action(&self) -> Option<&str> {
        self.past.last().map(|s| s.action.as_str())
    }
}

/// A snapshot of the designer form for history
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    /// Description of the action
    pub action: String,
    /// Serialized form state
    pub form_json: String,
}

impl HistorySnapshot {
    pub fn new(action: impl Into<String>, form: &FormConfig) -> FormResult<Self> {
        let form_json = serde_json::to_string(form)
            .map_err(|e| FormError::Internal(format!("Failed to serialize form: {}", e)))?;

        Ok(Self {
            action: action.into(),
            form_json,
        })
    }

    /// Restore form from snapshot
    pub fn restore(&self) -> FormResult<FormConfig> {
        serde_json::from_str(&self.form_json)
            .map_err(|e| FormError::Internal(format!("Failed to deserialize form: {}", e)))
    }
}

// ============================================================================
// Filler Session
// ============================================================================

/// State of the published form being filled in
#[derive(Debug, Clone, Default)]
pub struct FillerState {
    /// Id or share link typed by the user
    pub reference: String,
    /// Form opened for filling
    pub form: Option<PublishedForm>,
    /// Whether the form's layout is being edited
    pub edit_mode: bool,
    /// Designer work put aside while editing
    designer_backup: Option<DesignerBackup>,
    /// Last successful submission, shown on the thank-you screen
    pub last_submission: Option<Submission>,
}

/// Designer form, dirty flag and undo history saved during filler edit mode
#[derive(Debug, Clone)]
struct DesignerBackup {
    form: FormConfig,
    dirty: bool,
    history: History,
}

impl FillerState {
    pub fn is_submitted(&self) -> bool {
        self.last_submission.is_some()
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone)]
pub struct AppState {
    /// Form on the designer canvas
    pub form: FormConfig,
    /// Whether the form has changes that were not saved
    pub is_dirty: bool,
    /// Selected field id
    pub selected: Option<FieldId>,
    /// Drag and drop state
    pub drag: DragState,
    /// UI state
    pub ui: UiState,
    /// History for undo/redo
    pub history: History,
    /// Storage for configurations, published forms and submissions
    pub repository: FormRepository,
    /// Filler session
    pub filler: FillerState,
    pub settings: Arc<Settings>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_repository(FormRepository::in_memory(), Settings::default())
    }
}

impl AppState {
    /// State built from the settings given to [`init_app_state`]
    pub fn new() -> Self {
        let settings = SETTINGS.get().cloned().unwrap_or_default();
        Self::from_settings(settings)
    }

    /// Open the storage directory named by `settings`
    ///
    /// Falls back to in-memory storage when the directory cannot be used.
    pub fn from_settings(settings: Settings) -> Self {
        match formwright_schema::FileStore::open(&settings.storage_dir) {
            Ok(store) => {
                let repository = FormRepository::new(Arc::new(store), settings.share_origin.clone());
                Self::with_repository(repository, settings)
            }
            Err(e) => {
                tracing::warn!("Storage unavailable, changes will not be kept: {}", e);
                let repository = FormRepository::new(
                    Arc::new(formwright_schema::MemoryStore::new()),
                    settings.share_origin.clone(),
                );
                let mut state = Self::with_repository(repository, settings);
                state
                    .ui
                    .set_status(format!("Storage unavailable: {}", e), StatusLevel::Warning);
                state
            }
        }
    }

    pub fn with_repository(repository: FormRepository, settings: Settings) -> Self {
        Self {
            form: FormConfig::default(),
            is_dirty: false,
            selected: None,
            drag: DragState::new(),
            ui: UiState::new(),
            history: History::with_max_size(settings.effective_history_limit()),
            repository,
            filler: FillerState::default(),
            settings: Arc::new(settings),
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_field(&mut self, id: &str) {
        if self.form.field(id).is_some() {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// The selected field, if it still exists
    pub fn selected_field(&self) -> Option<&FieldConfig> {
        self.selected.as_deref().and_then(|id| self.form.field(id))
    }

    // ========================================================================
    // Designer operations
    // ========================================================================

    /// Save current state to history before making changes
    pub fn save_to_history(&mut self, action: impl Into<String>) {
        match HistorySnapshot::new(action, &self.form) {
            Ok(snapshot) => self.history.push(snapshot),
            Err(e) => tracing::warn!("Could not record history: {}", e),
        }
    }

    /// Append a field created from a palette component and select it
    pub fn add_component(&mut self, component_id: &str) -> FormResult<FieldId> {
        let component = library::by_id(component_id)
            .ok_or_else(|| FormError::ComponentNotFound(component_id.to_string()))?;

        self.save_to_history(format!("Add {}", component.name));
        let id = self.form.add_field(component.instantiate());
        self.selected = Some(id.clone());
        self.is_dirty = true;
        tracing::debug!("Added {} field {}", component.id, id);
        Ok(id)
    }

    /// Merge an update into a field
    pub fn update_field(&mut self, id: &str, update: FieldUpdate) -> FormResult<()> {
        if update.is_empty() {
            return Ok(());
        }
        if self.form.field(id).is_none() {
            return Err(FormError::FieldNotFound(id.to_string()));
        }
        self.save_to_history("Edit field");
        self.form.update_field(id, update)?;
        self.is_dirty = true;
        Ok(())
    }

    /// Merge an update into the selected field
    pub fn update_selected(&mut self, update: FieldUpdate) -> FormResult<()> {
        let id = self
            .selected_field()
            .map(|f| f.id.clone())
            .ok_or_else(|| FormError::NothingSelected("No field selected".to_string()))?;
        self.update_field(&id, update)
    }

    /// Remove a field; the selection is cleared if it pointed at it
    pub fn remove_field(&mut self, id: &str) -> bool {
        if self.form.field(id).is_none() {
            return false;
        }
        self.save_to_history("Delete field");
        self.form.remove_field(id);
        if self.is_selected(id) {
            self.selected = None;
        }
        self.is_dirty = true;
        true
    }

    /// Move the field at `from` to `to`
    pub fn move_field(&mut self, from: usize, to: usize) -> bool {
        let snapshot = HistorySnapshot::new("Move field", &self.form);
        if !self.form.move_field(from, to) {
            return false;
        }
        if let Ok(snapshot) = snapshot {
            self.history.push(snapshot);
        }
        self.is_dirty = true;
        true
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if title == self.form.title {
            return;
        }
        self.save_to_history("Rename form");
        self.form.title = title;
        self.is_dirty = true;
    }

    /// Remove every field
    pub fn clear_form(&mut self) {
        if self.form.is_empty() {
            return;
        }
        self.save_to_history("Clear form");
        self.form.clear();
        self.selected = None;
        self.is_dirty = true;
    }

    /// Replace the designer form, e.g. after an import
    pub fn replace_form(&mut self, form: FormConfig, action: &str) {
        self.save_to_history(action);
        self.form = form;
        self.selected = None;
        self.is_dirty = true;
    }

    pub fn undo(&mut self) -> bool {
        let Ok(current) = HistorySnapshot::new("current", &self.form) else {
            return false;
        };
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.restore(previous)
    }

    pub fn redo(&mut self) -> bool {
        let Ok(current) = HistorySnapshot::new("current", &self.form) else {
            return false;
        };
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(next)
    }

    fn restore(&mut self, snapshot: HistorySnapshot) -> bool {
        match snapshot.restore() {
            Ok(form) => {
                self.form = form;
                if self.selected_field().is_none() {
                    self.selected = None;
                }
                self.is_dirty = true;
                true
            }
            Err(e) => {
                tracing::error!("Could not restore history: {}", e);
                false
            }
        }
    }

    /// Lint the designer form
    pub fn lint(&self) -> ValidationResult {
        validation::lint_form(&self.form)
    }

    // ========================================================================
    // Drag and drop
    // ========================================================================

    pub fn start_drag(&mut self, item: DragItem) {
        self.drag.start(item);
    }

    pub fn cancel_drag(&mut self) {
        self.drag = DragState::new();
    }

    /// Drop on the empty canvas area: components are appended
    pub fn drop_on_canvas(&mut self) -> FormResult<Option<FieldId>> {
        match self.drag.take() {
            Some(DragItem::Component(id)) => self.add_component(&id).map(Some),
            _ => Ok(None),
        }
    }

    /// Drop on the card at `target`: cards are reordered, components appended
    pub fn drop_on_field(&mut self, target: usize) -> FormResult<Option<FieldId>> {
        match self.drag.take() {
            Some(DragItem::Field(from)) => {
                self.move_field(from, target);
                Ok(None)
            }
            Some(DragItem::Component(id)) => self.add_component(&id).map(Some),
            None => Ok(None),
        }
    }

    // ========================================================================
    // Saved configurations
    // ========================================================================

    /// Save the designer form under `name`
    pub fn save_config(&mut self, name: &str) -> FormResult<SavedConfig> {
        let saved = self.repository.save_config(name, &self.form)?;
        self.is_dirty = false;
        Ok(saved)
    }

    /// Load a saved configuration into the designer
    pub fn load_config(&mut self, id: &str) -> FormResult<()> {
        let form = self.repository.load_config(id)?;
        self.form = form;
        self.selected = None;
        self.history.clear();
        self.is_dirty = false;
        self.ui.navigate(Page::Designer);
        Ok(())
    }

    // ========================================================================
    // Publishing
    // ========================================================================

    /// Publish a saved configuration under `name`
    ///
    /// Lint errors in the configuration block publishing.
    pub fn publish_config(&mut self, name: &str, config_id: Option<&str>) -> FormResult<PublishedForm> {
        if let Some(id) = config_id.filter(|id| !id.is_empty()) {
            let form = self.repository.load_config(id)?;
            validation::lint_form(&form).to_result()?;
        }
        self.repository.publish(name, config_id)
    }

    /// Save the designer form under `name` and publish it
    pub fn publish_current(&mut self, name: &str) -> FormResult<PublishedForm> {
        if name.trim().is_empty() {
            return Err(FormError::MissingName(MISSING_PUBLISH_NAME.to_string()));
        }
        self.lint().to_result()?;
        let saved = self.save_config(name)?;
        self.repository.publish(name, Some(&saved.id))
    }

    /// Delete a saved configuration or a published form
    pub fn delete(&mut self, target: &DeleteTarget) -> FormResult<bool> {
        match target {
            DeleteTarget::SavedConfig(id) => self.repository.delete_config(id),
            DeleteTarget::PublishedForm(id) => {
                let deleted = self.repository.delete_published(id)?;
                if self.filler.form.as_ref().is_some_and(|f| f.id == *id) {
                    if self.filler.edit_mode {
                        self.end_filler_edit();
                    }
                    self.filler.form = None;
                    self.filler.last_submission = None;
                }
                Ok(deleted)
            }
        }
    }

    // ========================================================================
    // Filler
    // ========================================================================

    /// Open a published form by id or share link, counting the visit
    pub fn open_published(&mut self, reference: &str) -> FormResult<()> {
        let form = self.repository.open_published(reference)?;
        self.filler.reference = reference.trim().to_string();
        self.filler.form = Some(form);
        self.filler.last_submission = None;
        self.filler.edit_mode = false;
        self.ui.navigate(Page::Filler);
        Ok(())
    }

    /// Submit values for the open form
    pub fn submit_filler(&mut self, data: FormData) -> FormResult<Submission> {
        let form_id = self
            .filler
            .form
            .as_ref()
            .map(|f| f.id.clone())
            .ok_or_else(|| FormError::NothingSelected("No form is open".to_string()))?;
        let submission = self.repository.record_submission(&form_id, data)?;
        if let Some(form) = self.filler.form.as_mut() {
            form.submit_count += 1;
        }
        self.filler.last_submission = Some(submission.clone());
        Ok(submission)
    }

    /// Fill the open form again
    pub fn refill(&mut self) {
        self.filler.last_submission = None;
    }

    /// Edit the open form's layout with the designer tools
    pub fn begin_filler_edit(&mut self) -> FormResult<()> {
        let config = self
            .filler
            .form
            .as_ref()
            .map(|f| f.config.instantiate())
            .ok_or_else(|| FormError::NothingSelected("No form is open".to_string()))?;
        if !self.filler.edit_mode {
            let form = std::mem::replace(&mut self.form, config);
            self.filler.designer_backup = Some(DesignerBackup {
                form,
                dirty: self.is_dirty,
                history: self.history.clone(),
            });
        } else {
            self.form = config;
        }
        self.filler.edit_mode = true;
        self.selected = None;
        self.history.clear();
        Ok(())
    }

    /// Leave edit mode without saving
    pub fn cancel_filler_edit(&mut self) {
        self.end_filler_edit();
    }

    /// Save the edited layout back into the published form
    pub fn save_filler_edit(&mut self) -> FormResult<PublishedForm> {
        let form_id = self
            .filler
            .form
            .as_ref()
            .map(|f| f.id.clone())
            .ok_or_else(|| FormError::NothingSelected("No form is open".to_string()))?;
        let updated = self.repository.update_published_config(&form_id, &self.form)?;
        self.filler.form = Some(updated.clone());
        self.end_filler_edit();
        Ok(updated)
    }

    /// Save the edited layout as a new configuration
    pub fn save_filler_as(&mut self, name: &str) -> FormResult<SavedConfig> {
        let saved = self.repository.save_config(name, &self.form)?;
        self.end_filler_edit();
        Ok(saved)
    }

    fn end_filler_edit(&mut self) {
        match self.filler.designer_backup.take() {
            Some(backup) => {
                self.form = backup.form;
                self.is_dirty = backup.dirty;
                self.history = backup.history;
            }
            None => self.history.clear(),
        }
        self.filler.edit_mode = false;
        self.selected = None;
    }

    /// Form the renderer shows on the filler page
    pub fn filler_config(&self) -> Option<&FormConfig> {
        if self.filler.edit_mode {
            Some(&self.form)
        } else {
            self.filler.form.as_ref().map(|f| &f.config)
        }
    }

    /// Get window title
    pub fn window_title(&self) -> String {
        let dirty = if self.is_dirty { " •" } else { "" };
        format!("{}{} - Formwright", self.form.title, dirty)
    }
}

// ============================================================================
// Global State Context
// ============================================================================

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Global application state signal
/// Use this in components to access and modify app state
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

/// Record the settings the global state is built from
///
/// Call once before launching; later calls are ignored.
pub fn init_app_state(settings: Settings) {
    if SETTINGS.set(settings).is_err() {
        tracing::debug!("Application settings already initialised");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::FieldType;

    fn state() -> AppState {
        AppState::default()
    }

    fn names(state: &AppState) -> Vec<String> {
        state.form.fields.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_ui_state() {
        let mut ui = UiState::new();
        assert_eq!(ui.active_page, Page::Designer);

        ui.navigate(Page::Publisher);
        assert_eq!(ui.active_page, Page::Publisher);

        ui.show_dialog(Dialog::SaveConfig);
        assert!(ui.active_dialog.is_some());

        ui.close_dialog();
        assert!(ui.active_dialog.is_none());
    }

    #[test]
    fn test_history_limit() {
        let mut history = History::with_max_size(2);
        let form = FormConfig::default();
        for action in ["a", "b", "c"] {
            history.push(HistorySnapshot::new(action, &form).unwrap());
        }
        assert_eq!(history.undo_count(), 2);
        assert_eq!(history.undo_action(), Some("c"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_add_component_selects() {
        let mut state = state();
        let id = state.add_component("input").unwrap();
        assert!(state.is_selected(&id));
        assert_eq!(state.form.field_count(), 1);
        assert!(state.is_dirty);
        assert!(state.history.can_undo());

        let err = state.add_component("signature").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_selected() {
        let mut state = state();
        let err = state.update_selected(FieldUpdate::label("x")).unwrap_err();
        assert!(matches!(err, FormError::NothingSelected(_)));

        state.add_component("input").unwrap();
        state.update_selected(FieldUpdate::span(40)).unwrap();
        assert_eq!(state.selected_field().unwrap().span, Some(24));
        state.update_selected(FieldUpdate::span(12)).unwrap();
        assert_eq!(state.selected_field().unwrap().canvas_heading(), "输入框 (span: 12)");
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut state = state();
        let first = state.add_component("input").unwrap();
        let second = state.add_component("textarea").unwrap();

        assert!(state.remove_field(&first));
        assert!(state.is_selected(&second));

        assert!(state.remove_field(&second));
        assert!(state.selected.is_none());
        assert!(!state.remove_field(&second));
    }

    #[test]
    fn test_drag_and_drop() {
        let mut state = state();
        state.start_drag(DragItem::Component("radio".to_string()));
        assert!(state.drop_on_canvas().unwrap().is_some());
        state.start_drag(DragItem::Component("select".to_string()));
        state.drop_on_canvas().unwrap();
        state.start_drag(DragItem::Component("date".to_string()));
        state.drop_on_field(0).unwrap();
        assert_eq!(names(&state), vec!["radio", "select", "date"]);

        state.start_drag(DragItem::Field(2));
        assert!(state.drag.is_dragging_field(2));
        state.drop_on_field(0).unwrap();
        assert_eq!(names(&state), vec!["date", "radio", "select"]);
        assert!(!state.drag.is_dragging());

        // Dropping a card on itself changes nothing
        let undo_before = state.history.undo_count();
        state.start_drag(DragItem::Field(1));
        state.drop_on_field(1).unwrap();
        assert_eq!(state.history.undo_count(), undo_before);
    }

    #[test]
    fn test_undo_redo() {
        let mut state = state();
        state.add_component("input").unwrap();
        state.add_component("rating").unwrap();
        state.set_title("问卷");

        assert!(state.undo());
        assert_eq!(state.form.title, "我的表单");
        assert!(state.undo());
        assert_eq!(state.form.field_count(), 1);
        assert!(state.selected.is_none());

        assert!(state.redo());
        assert_eq!(state.form.field_count(), 2);
        assert!(state.redo());
        assert_eq!(state.form.title, "问卷");
        assert!(!state.redo());
    }

    #[test]
    fn test_save_and_load_config() {
        let mut state = state();
        state.add_component("input").unwrap();
        assert!(state.save_config("").is_err());
        let saved = state.save_config("我的表单").unwrap();
        assert!(!state.is_dirty);

        state.clear_form();
        state.load_config(&saved.id).unwrap();
        assert_eq!(state.form.field_count(), 1);
        assert!(!state.history.can_undo());
        assert!(state.form.fields[0].id.starts_with("field_"));
    }

    #[test]
    fn test_filler_flow() {
        let mut state = state();
        state.add_component("input").unwrap();
        let saved = state.save_config("报名").unwrap();
        let published = state
            .repository
            .publish("报名表", Some(saved.id.as_str()))
            .unwrap();

        state.open_published(&published.share_url).unwrap();
        assert_eq!(state.ui.active_page, Page::Filler);
        assert_eq!(state.filler.form.as_ref().unwrap().access_count, 1);

        let mut data = FormData::new();
        data.insert("input".to_string(), serde_json::json!("你好"));
        state.submit_filler(data).unwrap();
        assert!(state.filler.is_submitted());
        assert_eq!(state.filler.form.as_ref().unwrap().submit_count, 1);

        state.refill();
        assert!(!state.filler.is_submitted());
    }

    #[test]
    fn test_filler_edit_keeps_designer_form() {
        let mut state = state();
        state.add_component("input").unwrap();
        let saved = state.save_config("报名").unwrap();
        let published = state
            .repository
            .publish("报名表", Some(saved.id.as_str()))
            .unwrap();
        state.set_title("设计中");
        state.open_published(&published.id).unwrap();

        state.begin_filler_edit().unwrap();
        assert_eq!(state.filler_config().unwrap().title, "我的表单");
        state.add_component("phone").unwrap();
        let updated = state.save_filler_edit().unwrap();

        assert_eq!(updated.config.field_count(), 2);
        assert_eq!(state.form.title, "设计中");
        assert!(!state.filler.edit_mode);
        assert_eq!(state.filler_config().unwrap().field_count(), 2);
    }

    #[test]
    fn test_filler_edit_keeps_designer_history() {
        let mut state = state();
        state.add_component("input").unwrap();
        let saved = state.save_config("报名").unwrap();
        let published = state
            .repository
            .publish("报名表", Some(saved.id.as_str()))
            .unwrap();
        state.add_component("rating").unwrap();
        let undo_before = state.history.undo_count();
        assert!(undo_before >= 2);

        state.open_published(&published.id).unwrap();
        state.begin_filler_edit().unwrap();
        assert!(!state.history.can_undo());
        state.add_component("phone").unwrap();
        state.cancel_filler_edit();

        assert_eq!(state.history.undo_count(), undo_before);
        assert!(state.undo());
        assert_eq!(state.form.field_count(), 1);
    }

    #[test]
    fn test_filler_save_as_and_cancel() {
        let mut state = state();
        state.add_component("input").unwrap();
        let saved = state.save_config("报名").unwrap();
        let published = state
            .repository
            .publish("报名表", Some(saved.id.as_str()))
            .unwrap();
        state.open_published(&published.id).unwrap();

        state.begin_filler_edit().unwrap();
        state.form.add_field(FieldConfig::new(FieldType::Input, "extra", "额外"));
        state.cancel_filler_edit();
        assert_eq!(state.filler_config().unwrap().field_count(), 1);

        state.begin_filler_edit().unwrap();
        assert!(state.save_filler_as(" ").is_err());
        let copy = state.save_filler_as("副本").unwrap();
        assert!(copy.id.starts_with("config_"));
        assert_eq!(state.repository.configs().unwrap().len(), 2);
    }

    #[test]
    fn test_publish_current() {
        let mut state = state();
        state.add_component("input").unwrap();
        let err = state.publish_current("  ").unwrap_err();
        assert_eq!(err.to_string(), MISSING_PUBLISH_NAME);

        let published = state.publish_current("报名表").unwrap();
        assert!(!state.is_dirty);
        assert_eq!(published.config.field_count(), 1);
        assert_eq!(state.repository.configs().unwrap().len(), 1);
        assert_eq!(state.repository.published_forms().unwrap().len(), 1);
    }

    #[test]
    fn test_publish_blocked_by_lint_errors() {
        let mut state = state();
        state.form.add_field(FieldConfig::new(FieldType::Input, "", "无名"));
        assert!(state.publish_current("无名").is_err());

        let saved = state.save_config("无名").unwrap();
        assert!(state.publish_config("无名", Some(saved.id.as_str())).is_err());
        assert!(state.repository.published_forms().unwrap().is_empty());
    }

    #[test]
    fn test_delete_open_published_form() {
        let mut state = state();
        state.add_component("input").unwrap();
        let published = state.publish_current("报名表").unwrap();
        state.open_published(&published.id).unwrap();

        let target = DeleteTarget::PublishedForm(published.id.clone());
        assert!(state.delete(&target).unwrap());
        assert!(state.filler.form.is_none());
        assert!(!state.delete(&target).unwrap());

        let configs = state.repository.configs().unwrap();
        assert!(state.delete(&DeleteTarget::SavedConfig(configs[0].id.clone())).unwrap());
        assert!(state.repository.configs().unwrap().is_empty());
    }

    #[test]
    fn test_window_title() {
        let mut state = state();
        assert_eq!(state.window_title(), "我的表单 - Formwright");
        state.add_component("input").unwrap();
        assert_eq!(state.window_title(), "我的表单 • - Formwright");
    }

    #[test]
    fn test_page_properties() {
        assert_eq!(Page::all().len(), 4);
        assert_eq!(Page::default(), Page::Designer);
        assert_eq!(Page::Publisher.display_name(), "Publish");
    }
}
