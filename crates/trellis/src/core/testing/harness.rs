use crate::{
    core::{
        canvas::Canvas,
        config::Config,
        error::Result,
        id::SkinId,
        skin::Color,
        testing::{backend::GridRenderer, skin::TestSkin},
    },
    geom::Rect,
};

/// A canvas with a [`TestSkin`] installed on the root and the root sized to
/// the skin's screen. Tests build a tree under `root()`, run frames, and
/// inspect pixels and recorded draws.
pub struct Harness {
    /// The canvas under test.
    pub canvas: Canvas,
    /// The installed skin.
    pub skin: SkinId,
}

impl Harness {
    /// A harness with a `w`×`h` screen and no texture caching.
    pub fn new(w: i32, h: i32) -> Result<Self> {
        Self::build(Config::default(), TestSkin::new(w, h), w, h)
    }

    /// A harness whose renderer supports cache-to-texture.
    pub fn cached(w: i32, h: i32) -> Result<Self> {
        Self::build(Config::default(), TestSkin::cached(w, h), w, h)
    }

    /// A harness with an explicit configuration.
    pub fn with_config(config: Config, w: i32, h: i32) -> Result<Self> {
        Self::build(config, TestSkin::new(w, h), w, h)
    }

    /// Assemble the harness.
    fn build(config: Config, skin: TestSkin, w: i32, h: i32) -> Result<Self> {
        let mut canvas = Canvas::with_config(config);
        let skin = canvas.install_skin(skin);
        let root = canvas.root();
        canvas.set_bounds(root, Rect::new(0, 0, w, h))?;
        Ok(Self { canvas, skin })
    }

    /// Run one think-and-render frame onto a cleared screen.
    pub fn frame(&mut self) -> Result<()> {
        if let Some(s) = self.canvas.skin_as_mut::<TestSkin>(self.skin) {
            s.grid_mut().clear();
            s.grid_mut().clear_ops();
            s.clear_calls();
        }
        self.canvas.frame()
    }

    /// The test skin.
    pub fn skin(&self) -> Option<&TestSkin> {
        self.canvas.skin_as::<TestSkin>(self.skin)
    }

    /// The pixel backend.
    pub fn grid(&self) -> Option<&GridRenderer> {
        self.skin().map(TestSkin::grid)
    }

    /// A screen pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.grid()?.pixel(x, y)
    }
}
