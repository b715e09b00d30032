//! UI components and rendering
//!
//! Widgets for the main window. Each component draws from and writes to
//! [`crate::state`] and reports button presses as actions for the
//! application to carry out.

pub mod build_form;
pub mod colors;
pub mod log_view;
pub mod resource_list;

// Re-exports for convenience
pub use build_form::{BuildFormView, FormAction};
pub use colors::{visuals, UiColors};
pub use log_view::{LogAction, LogView};
pub use resource_list::{ResourceAction, ResourceListView};
