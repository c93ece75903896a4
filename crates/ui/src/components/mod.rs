//! # UI Components
//!
//! Reusable Dioxus components for the Formwright form designer.
//!
//! - **Palette**: Draggable component library grouped by category
//! - **Canvas**: Designer canvas with drop and reorder support
//! - **Properties Panel**: Editing panel for the selected field
//! - **Renderer**: Fillable form rendered from a configuration
//! - **Inputs**: Form input components used by the panels
//!
//! ## Component Hierarchy
//!
//! ```text
//! ComponentPalette
//! └── PaletteGroup (per category)
//!     └── PaletteItem (draggable)
//!
//! Canvas
//! └── FieldCard (multiple)
//!
//! PropertiesPanel
//! └── FieldProperties
//!     ├── BasicSection
//!     ├── ValidationSection
//!     ├── OptionsSection
//!     └── TypeSection
//!
//! DynamicForm
//! └── FormItem (multiple)
//!     └── FieldWidget
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod canvas;
pub mod inputs;
pub mod palette;
pub mod properties;
pub mod renderer;

// ============================================================================
// Re-exports
// ============================================================================

pub use canvas::{Canvas, FieldCard, delete_selected_field};
pub use inputs::{ButtonGroup, NumberInput, Select, SelectOption, TextArea, TextInput, Toggle};
pub use palette::{ComponentPalette, add_component_to_form};
pub use properties::PropertiesPanel;
pub use renderer::{DynamicForm, FormSession};
