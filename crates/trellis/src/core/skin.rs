use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::{core::render::Renderer, geom::Rect};

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. Zero is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Construct an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Construct a colour with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Is the colour fully transparent?
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// Named colours supplied by a skin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Default control background.
    pub background: Color,
    /// Background of hovered controls.
    pub background_hover: Color,
    /// Background of disabled controls.
    pub background_disabled: Color,
    /// Default text.
    pub text: Color,
    /// Text inside tooltips.
    pub tooltip_text: Color,
    /// Tooltip background.
    pub tooltip_background: Color,
    /// Keyboard focus highlight.
    pub highlight: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xdd, 0xdd, 0xdd),
            background_hover: Color::rgb(0xee, 0xee, 0xee),
            background_disabled: Color::rgb(0xaa, 0xaa, 0xaa),
            text: Color::BLACK,
            tooltip_text: Color::rgb(0x20, 0x20, 0x20),
            tooltip_background: Color::rgb(0xff, 0xff, 0xe1),
            highlight: Color::rgb(0x33, 0x66, 0xcc),
        }
    }
}

/// Interaction state passed to skins when drawing a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawState {
    /// The mouse is over the control.
    pub hovered: bool,
    /// The control holds keyboard focus.
    pub focused: bool,
    /// The control is disabled.
    pub disabled: bool,
    /// The control should show a hover highlight.
    pub draw_hover: bool,
}

/// A skin turns control kinds into drawing calls on its renderer.
pub trait Skin: Any {
    /// The renderer this skin draws with.
    fn renderer(&mut self) -> &mut dyn Renderer;

    /// Colours used by controls.
    fn palette(&self) -> &Palette;

    /// Draw the chrome for a control kind at a local rectangle.
    fn draw_widget(&mut self, kind: &str, state: DrawState, rect: Rect);

    /// Draw the keyboard focus highlight, inset from the control's local
    /// bounds.
    fn draw_keyboard_highlight(&mut self, rect: Rect, inset: i32) {
        let color = self.palette().highlight;
        let r = self.renderer();
        r.set_draw_color(color);
        r.draw_lined_rect(Rect::new(
            rect.x + inset,
            rect.y + inset,
            rect.w - inset * 2,
            rect.h - inset * 2,
        ));
    }
}

/// A skin that draws every control as a flat filled rectangle.
pub struct SimpleSkin<R: Renderer> {
    /// Backend renderer.
    renderer: R,
    /// Colours.
    palette: Palette,
}

impl<R: Renderer> SimpleSkin<R> {
    /// Construct a skin over a renderer with the default palette.
    pub fn new(renderer: R) -> Self {
        Self::with_palette(renderer, Palette::default())
    }

    /// Construct a skin with an explicit palette.
    pub fn with_palette(renderer: R, palette: Palette) -> Self {
        Self { renderer, palette }
    }

    /// Borrow the concrete renderer.
    pub fn backend(&self) -> &R {
        &self.renderer
    }

    /// Mutably borrow the concrete renderer.
    pub fn backend_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

impl<R: Renderer + 'static> Skin for SimpleSkin<R> {
    fn renderer(&mut self) -> &mut dyn Renderer {
        &mut self.renderer
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }

    fn draw_widget(&mut self, kind: &str, state: DrawState, rect: Rect) {
        let color = match kind {
            "Tooltip" => self.palette.tooltip_background,
            _ if state.disabled => self.palette.background_disabled,
            _ if state.draw_hover => self.palette.background_hover,
            _ => self.palette.background,
        };
        self.renderer.set_draw_color(color);
        self.renderer.draw_filled_rect(rect);
    }
}
