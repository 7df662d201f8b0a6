use crate::{
    core::{
        render::Renderer,
        skin::{DrawState, Palette, Skin},
        testing::backend::GridRenderer,
    },
    geom::Rect,
};

/// A recorded `draw_widget` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    /// Widget kind.
    pub kind: String,
    /// Interaction state.
    pub state: DrawState,
    /// Local rectangle.
    pub rect: Rect,
}

/// A skin over a [`GridRenderer`] that fills each widget with a palette
/// colour and records what it drew.
pub struct TestSkin {
    /// Pixel backend.
    grid: GridRenderer,
    /// Colours.
    palette: Palette,
    /// Recorded widget draws.
    calls: Vec<DrawCall>,
}

impl TestSkin {
    /// A skin with a screen of the given size and no texture caching.
    pub fn new(w: i32, h: i32) -> Self {
        Self::with_renderer(GridRenderer::new(w, h))
    }

    /// A skin whose renderer supports cache-to-texture.
    pub fn cached(w: i32, h: i32) -> Self {
        Self::with_renderer(GridRenderer::new(w, h).with_caching())
    }

    /// A skin over an existing renderer.
    pub fn with_renderer(grid: GridRenderer) -> Self {
        Self {
            grid,
            palette: Palette::default(),
            calls: Vec::new(),
        }
    }

    /// The pixel backend.
    pub fn grid(&self) -> &GridRenderer {
        &self.grid
    }

    /// The pixel backend, mutably.
    pub fn grid_mut(&mut self) -> &mut GridRenderer {
        &mut self.grid
    }

    /// Recorded widget draws.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drop recorded draws.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Skin for TestSkin {
    fn renderer(&mut self) -> &mut dyn Renderer {
        &mut self.grid
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }

    fn draw_widget(&mut self, kind: &str, state: DrawState, rect: Rect) {
        self.calls.push(DrawCall {
            kind: kind.to_string(),
            state,
            rect,
        });
        let color = match kind {
            "Tooltip" => self.palette.tooltip_background,
            _ if state.disabled => self.palette.background_disabled,
            _ if state.draw_hover => self.palette.background_hover,
            _ => self.palette.background,
        };
        self.grid.set_draw_color(color);
        self.grid.draw_filled_rect(rect);
    }
}
