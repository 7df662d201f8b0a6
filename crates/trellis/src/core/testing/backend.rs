//! In-memory renderer for tests.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    core::{
        id::NodeId,
        render::{CacheToTexture, Renderer},
        skin::Color,
    },
    geom::{Point, Rect, Size},
};

/// A renderer operation, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `start_clip` with the clip region at the time.
    StartClip(Rect),
    /// `end_clip`.
    EndClip,
    /// Filled rectangle in target space, before clipping.
    Fill(Rect),
    /// Text at a target-space position.
    Text(Point, String),
    /// Drawing redirected into a node's texture.
    Setup(NodeId),
    /// Drawing restored from a node's texture.
    Finish(NodeId),
    /// A node's texture composited at a target-space rectangle.
    Composite(NodeId, Rect),
}

/// Pixel storage for the screen or a cache texture.
#[derive(Debug, Clone)]
struct Surface {
    /// Dimensions.
    size: Size,
    /// Row-major pixels.
    pixels: Vec<Color>,
}

impl Surface {
    /// A transparent surface.
    fn new(size: Size) -> Self {
        let n = (size.w.max(0) * size.h.max(0)) as usize;
        Self {
            size,
            pixels: vec![Color::TRANSPARENT; n],
        }
    }

    /// Read a pixel.
    fn get(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.size.w || y >= self.size.h {
            return None;
        }
        self.pixels.get((y * self.size.w + x) as usize).copied()
    }

    /// Write a pixel inside a clip.
    fn put(&mut self, x: i32, y: i32, clip: Rect, color: Color) {
        if !clip.contains(Point::new(x, y)) || x < 0 || y < 0 || x >= self.size.w || y >= self.size.h {
            return;
        }
        let i = (y * self.size.w + x) as usize;
        if let Some(p) = self.pixels.get_mut(i) {
            *p = color;
        }
    }
}

/// A renderer that draws into a grid of pixels, one cell per unit. Text is
/// one pixel per character. With caching enabled it also implements
/// cache-to-texture, keeping one surface per node.
#[derive(Debug)]
pub struct GridRenderer {
    /// The screen.
    screen: Surface,
    /// Current render offset.
    offset: Point,
    /// Current clip region.
    clip: Rect,
    /// Current draw colour.
    color: Color,
    /// Nesting depth of active clips.
    clip_depth: usize,
    /// Cache textures by node.
    textures: HashMap<NodeId, Surface>,
    /// Texture targets, innermost last.
    targets: Vec<NodeId>,
    /// Whether cache-to-texture is offered.
    caching: bool,
    /// Operation log.
    ops: Vec<Op>,
}

impl GridRenderer {
    /// A renderer with a transparent screen of the given size.
    pub fn new(w: i32, h: i32) -> Self {
        let size = Size::new(w, h);
        Self {
            screen: Surface::new(size),
            offset: Point::zero(),
            clip: size.rect(),
            color: Color::BLACK,
            clip_depth: 0,
            textures: HashMap::new(),
            targets: Vec::new(),
            caching: false,
            ops: Vec::new(),
        }
    }

    /// Offer cache-to-texture.
    pub fn with_caching(mut self) -> Self {
        self.caching = true;
        self
    }

    /// Screen pixel, `None` outside the screen.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.screen.get(x, y)
    }

    /// Every screen pixel, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.screen.pixels
    }

    /// Clear the screen to transparent.
    pub fn clear(&mut self) {
        self.screen = Surface::new(self.screen.size);
    }

    /// Recorded operations.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Drop the operation log.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Nesting depth of active clips; zero between frames.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Does the node have a cache texture?
    pub fn has_texture(&self, node: NodeId) -> bool {
        self.textures.contains_key(&node)
    }

    /// Size of a node's cache texture.
    pub fn texture_size(&self, node: NodeId) -> Option<Size> {
        self.textures.get(&node).map(|t| t.size)
    }

    /// Pixel of a node's cache texture.
    pub fn texture_pixel(&self, node: NodeId, x: i32, y: i32) -> Option<Color> {
        self.textures.get(&node)?.get(x, y)
    }

    /// The clip applied to drawing: the clip region while a clip is active,
    /// otherwise everything.
    fn effective_clip(&self) -> Rect {
        if self.clip_depth > 0 {
            self.clip
        } else {
            Rect::new(i32::MIN / 2, i32::MIN / 2, i32::MAX, i32::MAX)
        }
    }

    /// The surface being drawn into.
    fn target(&mut self) -> Option<&mut Surface> {
        match self.targets.last() {
            Some(node) => self.textures.get_mut(node),
            None => Some(&mut self.screen),
        }
    }

    /// Fill a target-space rectangle.
    fn fill(&mut self, r: Rect) {
        let (clip, color) = (self.effective_clip(), self.color);
        let Some(surface) = self.target() else {
            return;
        };
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                surface.put(x, y, clip, color);
            }
        }
    }
}

impl Renderer for GridRenderer {
    fn render_offset(&self) -> Point {
        self.offset
    }

    fn set_render_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn clip_region(&self) -> Rect {
        self.clip
    }

    fn set_clip_region(&mut self, rect: Rect) {
        self.clip = rect;
    }

    fn start_clip(&mut self) {
        self.clip_depth += 1;
        self.ops.push(Op::StartClip(self.clip));
    }

    fn end_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.ops.push(Op::EndClip);
    }

    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_filled_rect(&mut self, rect: Rect) {
        let r = self.translate(rect);
        self.ops.push(Op::Fill(r));
        self.fill(r);
    }

    fn draw_text(&mut self, pos: Point, text: &str) {
        let p = pos + self.offset;
        self.ops.push(Op::Text(p, text.to_string()));
        let n = text.chars().count() as i32;
        self.fill(Rect::new(p.x, p.y, n, 1));
    }

    fn measure_text(&mut self, text: &str) -> Size {
        Size::new(text.chars().count() as i32, 1)
    }

    fn cache_to_texture(&mut self) -> Option<&mut dyn CacheToTexture> {
        if self.caching { Some(self) } else { None }
    }
}

impl CacheToTexture for GridRenderer {
    fn create_control_cache_texture(&mut self, node: NodeId, size: Size) {
        if self.textures.get(&node).is_some_and(|t| t.size == size) {
            return;
        }
        trace!(?node, ?size, "allocate texture");
        self.textures.insert(node, Surface::new(size));
    }

    fn setup_cache_texture(&mut self, node: NodeId) {
        self.ops.push(Op::Setup(node));
        if let Some(t) = self.textures.get_mut(&node) {
            *t = Surface::new(t.size);
        }
        self.targets.push(node);
    }

    fn finish_cache_texture(&mut self, node: NodeId) {
        self.ops.push(Op::Finish(node));
        if self.targets.last() == Some(&node) {
            self.targets.pop();
        }
    }

    fn draw_cached_control_texture(&mut self, node: NodeId, dest: Rect) {
        let d = self.translate(dest);
        self.ops.push(Op::Composite(node, d));
        let Some(texture) = self.textures.get(&node).cloned() else {
            return;
        };
        let clip = self.effective_clip();
        let Some(surface) = self.target() else {
            return;
        };
        for y in 0..texture.size.h.min(d.h) {
            for x in 0..texture.size.w.min(d.w) {
                if let Some(c) = texture.get(x, y)
                    && !c.is_transparent()
                {
                    surface.put(d.x + x, d.y + y, clip, c);
                }
            }
        }
    }

    fn initialize(&mut self) {
        self.textures.clear();
        self.targets.clear();
    }

    fn release(&mut self, node: NodeId) {
        self.textures.remove(&node);
    }
}
