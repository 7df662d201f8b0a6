//! Render traversal and hit-testing.
//!
//! Rendering walks the tree with a single shared render offset and clip
//! region held by the renderer. Every step that changes either restores it
//! before returning, on early exits too, so nested calls see the state their
//! caller set up.

use tracing::trace;

use crate::{
    core::{
        canvas::Canvas,
        error::{Error, Result},
        focus::FocusManager,
        id::{NodeId, SkinId},
        node::Node,
        render::Renderer,
        skin::{DrawState, Palette, Skin},
    },
    geom::{Point, Rect},
    widget::Widget,
};

/// Drawing access handed to widget render hooks.
pub struct Paint<'a> {
    /// Node being drawn.
    id: NodeId,
    /// Node data.
    node: &'a Node,
    /// Skin in effect for the node.
    skin: &'a mut dyn Skin,
    /// Interaction state.
    state: DrawState,
}

impl Paint<'_> {
    /// The node being drawn.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's data.
    pub fn node(&self) -> &Node {
        self.node
    }

    /// Bounds at the local origin, the rectangle a widget normally fills.
    pub fn render_bounds(&self) -> Rect {
        self.node.render_bounds
    }

    /// Interaction state of the node.
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// The skin in effect.
    pub fn skin(&mut self) -> &mut dyn Skin {
        self.skin
    }

    /// The skin's renderer.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.skin.renderer()
    }

    /// The skin's palette.
    pub fn palette(&self) -> &Palette {
        self.skin.palette()
    }

    /// Draw the skin's chrome for a widget kind over the render bounds.
    pub fn draw_widget(&mut self, kind: &str) {
        let (state, rect) = (self.state, self.node.render_bounds);
        self.skin.draw_widget(kind, state, rect);
    }
}

/// Which render hook to run.
#[derive(Debug, Clone, Copy)]
enum Hook {
    /// Before clipping.
    Under,
    /// The node itself.
    Render,
    /// After the children.
    Over,
}

impl Canvas {
    /// Interaction state of a node for skins.
    fn draw_state(&self, id: NodeId) -> DrawState {
        DrawState {
            hovered: self.is_hovered(id),
            focused: self.has_focus(id),
            disabled: self.is_disabled(id),
            draw_hover: self.is_hovered(id) && self.should_draw_hover(id),
        }
    }

    /// Run a closure against a skin's renderer.
    fn with_renderer<R>(&mut self, skin: SkinId, f: impl FnOnce(&mut dyn Renderer) -> R) -> Result<R> {
        let s = self.skins.get_mut(skin).ok_or(Error::SkinNotFound(skin))?;
        Ok(f(s.renderer()))
    }

    /// Run one of a widget's render hooks.
    fn paint_hook(&mut self, id: NodeId, skin: SkinId, hook: Hook) {
        let state = self.draw_state(id);
        let Some(mut widget) = self.nodes.get_mut(id).and_then(|n| n.widget.take()) else {
            return;
        };
        if let (Some(node), Some(skin)) = (self.nodes.get(id), self.skins.get_mut(skin)) {
            let mut p = Paint {
                id,
                node,
                skin: skin.as_mut(),
                state,
            };
            run_hook(widget.as_mut(), &mut p, hook);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
    }

    /// Does the node's widget clip to its bounds?
    fn should_clip(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .is_none_or(|w| w.should_clip())
    }

    /// Does the skin's renderer support cache-to-texture?
    fn renderer_caches(&mut self, skin: SkinId) -> bool {
        self.skins
            .get_mut(skin)
            .is_some_and(|s| s.renderer().cache_to_texture().is_some())
    }

    /// Opt a node into cache-to-texture rendering.
    pub fn enable_cache_to_texture(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.cache_to_texture {
            node.cache_to_texture = true;
            self.invalidate(id);
            self.redraw(id);
        }
        Ok(())
    }

    /// Is the node rendered through a cache texture?
    pub fn is_cached_to_texture(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.cache_to_texture)
    }

    /// Render a node and its visible children with an inherited skin. The
    /// node's own skin override applies to its subtree.
    pub fn do_render(&mut self, id: NodeId, skin: SkinId) -> Result<()> {
        let skin = self.node(id)?.skin.unwrap_or(skin);
        self.notify(id, |w, ctx| w.think(ctx));
        let node = self.node(id)?;
        let (cached, bounds) = (node.cache_to_texture, node.bounds);
        if cached && self.renderer_caches(skin) {
            return self.do_cache_render(id, skin, id);
        }
        self.render_recursive(id, skin, bounds)
    }

    /// Uncached traversal: offset into the node, draw the under layer, clip
    /// to the node, draw it and its children, then draw the over layer and
    /// focus highlight against the pre-clip region.
    pub fn render_recursive(&mut self, id: NodeId, skin: SkinId, cliprect: Rect) -> Result<()> {
        let old_offset = self.with_renderer(skin, |r| {
            let old = r.render_offset();
            r.add_render_offset(cliprect);
            old
        })?;
        self.paint_hook(id, skin, Hook::Under);

        let clip = self.should_clip(id);
        let (old_region, visible) = self.with_renderer(skin, |r| {
            let old = r.clip_region();
            if clip {
                r.add_clip_region(cliprect);
            }
            (old, !clip || r.clip_region_visible())
        })?;
        if !visible {
            self.with_renderer(skin, |r| {
                r.set_render_offset(old_offset);
                r.set_clip_region(old_region);
            })?;
            return Ok(());
        }

        self.with_renderer(skin, |r| r.start_clip())?;
        self.paint_hook(id, skin, Hook::Render);
        let children = self.render_children(id, skin);
        self.with_renderer(skin, |r| {
            r.end_clip();
            r.set_clip_region(old_region);
            r.start_clip();
        })?;
        self.paint_hook(id, skin, Hook::Over);
        self.render_focus(id, skin);
        self.with_renderer(skin, |r| {
            r.end_clip();
            r.set_render_offset(old_offset);
        })?;
        children
    }

    /// Render every visible literal child, continuing past failures so the
    /// caller can still unwind its clip state. Returns the first error.
    fn render_children(&mut self, id: NodeId, skin: SkinId) -> Result<()> {
        let mut first_err = None;
        for child in self.direct_children(id).to_vec() {
            if self.nodes.get(child).is_none_or(|c| c.hidden) {
                continue;
            }
            if let Err(e) = self.do_render(child, skin)
                && first_err.is_none()
            {
                first_err = Some(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Draw the keyboard highlight if the node holds focus and is tabable.
    fn render_focus(&mut self, id: NodeId, skin: SkinId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if self.keyboard_focus != Some(id) || !node.tabable {
            return;
        }
        let (rect, inset) = (node.render_bounds, self.config.keyboard_highlight_inset);
        if let Some(s) = self.skins.get_mut(skin) {
            s.draw_keyboard_highlight(rect, inset);
        }
    }

    /// Cached traversal. `master` owns the texture being drawn into: it
    /// renders in texture space from its own origin, while descendants
    /// accumulate offsets inside it. A dirty cache is regenerated by drawing
    /// the node and its visible children through [`Canvas::do_render`];
    /// then the texture is composited at the node's bounds against the
    /// caller's clip region.
    pub fn do_cache_render(&mut self, id: NodeId, skin: SkinId, master: NodeId) -> Result<()> {
        let node = self.node(id)?;
        let (bounds, dirty, cached) = (node.bounds, node.cache_dirty, node.cache_to_texture);
        let (old_offset, old_region, visible) = self.with_renderer(skin, |r| {
            let old = (r.render_offset(), r.clip_region());
            if id == master {
                r.set_render_offset(Point::zero());
                r.set_clip_region(Rect::new(0, 0, bounds.w, bounds.h));
            } else {
                r.add_render_offset(bounds);
                r.add_clip_region(bounds);
            }
            (old.0, old.1, r.clip_region_visible())
        })?;

        let mut result = Ok(());
        if dirty && visible {
            trace!(?id, "regenerate cache texture");
            self.with_renderer(skin, |r| {
                r.start_clip();
                if cached && let Some(ctt) = r.cache_to_texture() {
                    ctt.setup_cache_texture(id);
                }
            })?;
            self.paint_hook(id, skin, Hook::Render);
            result = self.render_children(id, skin);
            self.with_renderer(skin, |r| {
                if cached && let Some(ctt) = r.cache_to_texture() {
                    ctt.finish_cache_texture(id);
                }
                r.end_clip();
            })?;
            if cached && let Some(node) = self.nodes.get_mut(id) {
                node.cache_dirty = false;
            }
        }

        self.with_renderer(skin, |r| {
            r.set_clip_region(old_region);
            r.start_clip();
            r.set_render_offset(old_offset);
            if let Some(ctt) = r.cache_to_texture() {
                ctt.draw_cached_control_texture(id, bounds);
            }
            r.end_clip();
        })?;
        result
    }

    /// Per-frame update: destroy queued nodes, lay out the tree from the
    /// root, and rebuild the tab chain.
    pub fn do_think(&mut self) -> Result<()> {
        self.process_delayed_deletes()?;
        self.reset_tab_chain();
        let root = self.root;
        self.recurse_layout(root)?;
        self.wrap_tab_chain();
        Ok(())
    }

    /// Think, then render.
    pub fn frame(&mut self) -> Result<()> {
        self.do_think()?;
        self.render_frame()
    }

    /// Render a frame from the root: reset the renderer's offset and clip to
    /// the root bounds, draw the tree, then the tooltip overlay.
    pub fn render_frame(&mut self) -> Result<()> {
        let root = self.root;
        let skin = self.resolve_skin(root)?;
        let bounds = self.node(root)?.bounds;
        self.with_renderer(skin, |r| {
            r.set_clip_region(bounds);
            r.set_render_offset(Point::zero());
        })?;
        self.do_render(root, skin)?;
        self.render_tooltip(skin)
    }

    /// Draw the active tooltip near the mouse, kept inside the root bounds.
    fn render_tooltip(&mut self, skin: SkinId) -> Result<()> {
        let Some(owner) = self.tooltip.active() else {
            return Ok(());
        };
        let Some(tip) = self.nodes.get(owner).and_then(|n| n.tooltip) else {
            return Ok(());
        };
        let root_bounds = self.node(self.root)?.bounds;
        let b = self.node(tip)?.bounds;
        let mouse = self.mouse_pos;
        let x = (mouse.x - b.w / 2).clamp(root_bounds.x, (root_bounds.right() - b.w).max(root_bounds.x));
        let y = (mouse.y - b.h - 10).clamp(root_bounds.y, (root_bounds.bottom() - b.h).max(root_bounds.y));
        let skin = self.node(tip)?.skin.unwrap_or(skin);
        let old = self.with_renderer(skin, |r| {
            let old = (r.render_offset(), r.clip_region());
            r.set_render_offset(Point::zero());
            r.set_clip_region(root_bounds);
            old
        })?;
        let placed = Rect::new(x, y, b.w, b.h);
        let result = self.render_recursive(tip, skin, placed);
        self.with_renderer(skin, |r| {
            r.set_render_offset(old.0);
            r.set_clip_region(old.1);
        })?;
        result
    }

    /// Topmost node at a point in the node's local coordinates. Hidden nodes
    /// and points outside the node's own bounds never hit; children are
    /// tested front to back.
    pub fn control_at(&self, id: NodeId, p: Point, only_if_mouse_enabled: bool) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if node.hidden || !Rect::new(0, 0, node.bounds.w, node.bounds.h).contains(p) {
            return None;
        }
        for child in node.children.iter().rev() {
            let Some(c) = self.nodes.get(*child) else {
                continue;
            };
            if node.tooltip == Some(*child) {
                continue;
            }
            if let Some(found) = self.control_at(*child, p - c.bounds.origin(), only_if_mouse_enabled) {
                return Some(found);
            }
        }
        if only_if_mouse_enabled && !node.mouse_input {
            return None;
        }
        Some(id)
    }
}

/// Dispatch a render hook to a widget.
fn run_hook(widget: &mut dyn Widget, p: &mut Paint<'_>, hook: Hook) {
    match hook {
        Hook::Under => widget.render_under(p),
        Hook::Render => widget.render(p),
        Hook::Over => widget.render_over(p),
    }
}
