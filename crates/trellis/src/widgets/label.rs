//! Text label.

use crate::{
    core::{paint::Paint, skin::{Color, Skin}},
    geom::{Point, Size},
    widget::Widget,
};

/// A single line of text drawn inside the node's padding.
#[derive(Debug, Clone, Default)]
pub struct Label {
    /// Text to draw.
    text: String,
    /// Text colour; the palette text colour when unset.
    color: Option<Color>,
    /// Skin chrome drawn behind the text.
    background: Option<&'static str>,
}

impl Label {
    /// Construct a label.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    /// Use an explicit text colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Draw a skin chrome kind behind the text.
    pub fn with_background(mut self, kind: &'static str) -> Self {
        self.background = Some(kind);
        self
    }

    /// The label's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The node needs invalidating for the new size to
    /// take effect.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Explicit text colour, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Widget for Label {
    fn kind(&self) -> &'static str {
        "Label"
    }

    fn measure(&mut self, skin: &mut dyn Skin) -> Option<Size> {
        Some(skin.renderer().measure_text(&self.text))
    }

    fn render(&mut self, p: &mut Paint<'_>) {
        if let Some(kind) = self.background
            && p.node().draw_background()
        {
            p.draw_widget(kind);
        }
        let color = self.color.unwrap_or(p.palette().text);
        let pad = p.node().padding();
        let r = p.renderer();
        r.set_draw_color(color);
        r.draw_text(Point::new(pad.left, pad.top), &self.text);
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.set_text(value);
    }
}
