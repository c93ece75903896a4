//! Page Components for Formwright
//!
//! Each page represents a distinct screen in the application.
//!
//! ## Available Pages
//!
//! - **DesignerPage**: Palette, canvas and property panel
//! - **PreviewPage**: The designer form rendered for filling
//! - **PublisherPage**: Saved configurations and published forms
//! - **FillerPage**: Fill in, or edit, a published form
//!

pub mod designer;
pub mod filler;
pub mod preview;
pub mod publisher;

pub use designer::DesignerPage;
pub use filler::FillerPage;
pub use preview::PreviewPage;
pub use publisher::PublisherPage;
