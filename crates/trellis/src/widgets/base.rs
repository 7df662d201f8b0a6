//! The plain control.

use crate::widget::Widget;

/// A control with no behavior of its own: a container, a spacer, or the
/// canvas root.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base;

impl Widget for Base {}
