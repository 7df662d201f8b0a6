//! Background panel.

use crate::{core::paint::Paint, widget::Widget};

/// Container that draws the skin's panel chrome behind its children.
#[derive(Debug, Default, Clone, Copy)]
pub struct Panel;

impl Panel {
    /// Construct a panel.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Panel {
    fn kind(&self) -> &'static str {
        "Panel"
    }

    fn render(&mut self, p: &mut Paint<'_>) {
        if p.node().draw_background() {
            p.draw_widget("Panel");
        }
    }
}
