//! Renderer interfaces. A renderer draws primitives in screen space after
//! applying the current render offset and clip region; the core keeps both
//! in step with the tree as it walks it.

use crate::{
    core::{id::NodeId, skin::Color},
    geom::{Point, Rect, Size},
};

/// Drawing backend used by skins and the render traversal.
pub trait Renderer {
    /// Current translation applied to every primitive.
    fn render_offset(&self) -> Point;

    /// Replace the render offset.
    fn set_render_offset(&mut self, offset: Point);

    /// Current clip region in screen space.
    fn clip_region(&self) -> Rect;

    /// Replace the clip region.
    fn set_clip_region(&mut self, rect: Rect);

    /// Begin clipping to the current clip region. Calls nest and must be
    /// balanced by [`Renderer::end_clip`].
    fn start_clip(&mut self);

    /// End the innermost clip.
    fn end_clip(&mut self);

    /// Set the colour for subsequent fills and text.
    fn set_draw_color(&mut self, color: Color);

    /// Fill a rectangle given in local coordinates.
    fn draw_filled_rect(&mut self, rect: Rect);

    /// Draw text with its top-left corner at a local position.
    fn draw_text(&mut self, pos: Point, text: &str);

    /// Measure rendered text.
    fn measure_text(&mut self, text: &str) -> Size;

    /// Cache-to-texture capability, when the backend supports it.
    fn cache_to_texture(&mut self) -> Option<&mut dyn CacheToTexture> {
        None
    }

    /// Shift the render offset by a rectangle's origin.
    fn add_render_offset(&mut self, rect: Rect) {
        let offset = self.render_offset();
        self.set_render_offset(offset + rect.origin());
    }

    /// Narrow the clip region to a rectangle placed at the current render
    /// offset. The rectangle's own origin is ignored.
    fn add_clip_region(&mut self, rect: Rect) {
        let offset = self.render_offset();
        let placed = Rect::new(offset.x, offset.y, rect.w, rect.h);
        let clip = self.clip_region();
        self.set_clip_region(placed.intersect(&clip));
    }

    /// Whether anything drawn now could be visible.
    fn clip_region_visible(&self) -> bool {
        let clip = self.clip_region();
        clip.w > 0 && clip.h > 0
    }

    /// Translate a local rectangle to screen space.
    fn translate(&self, rect: Rect) -> Rect {
        rect.translate(self.render_offset())
    }

    /// Draw a one-unit outline inside a rectangle.
    fn draw_lined_rect(&mut self, rect: Rect) {
        self.draw_filled_rect(Rect::new(rect.x, rect.y, rect.w, 1));
        self.draw_filled_rect(Rect::new(rect.x, rect.bottom() - 1, rect.w, 1));
        self.draw_filled_rect(Rect::new(rect.x, rect.y, 1, rect.h));
        self.draw_filled_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.h));
    }
}

/// Offscreen caching of a control subtree. Textures are keyed by node id;
/// between `setup_cache_texture` and `finish_cache_texture` all drawing is
/// captured into the node's texture in texture-local coordinates.
pub trait CacheToTexture {
    /// Allocate or resize the texture for a node.
    fn create_control_cache_texture(&mut self, node: NodeId, size: Size);

    /// Redirect drawing into the node's texture.
    fn setup_cache_texture(&mut self, node: NodeId);

    /// Restore the previous draw target.
    fn finish_cache_texture(&mut self, node: NodeId);

    /// Composite the node's texture at a local destination rectangle.
    fn draw_cached_control_texture(&mut self, node: NodeId, dest: Rect);

    /// Release every cached texture.
    fn initialize(&mut self) {}

    /// Release the texture for a node.
    fn release(&mut self, _node: NodeId) {}
}
