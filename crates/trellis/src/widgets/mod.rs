//! Built-in widgets.

/// Plain control with no behavior.
pub mod base;
/// Text label.
pub mod label;
/// Background panel.
pub mod panel;

pub use base::Base;
pub use label::Label;
pub use panel::Panel;
