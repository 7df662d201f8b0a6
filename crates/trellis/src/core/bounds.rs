use crate::{
    core::{canvas::Canvas, error::Result, id::NodeId, layout::Dock},
    geom::{Dim, Margin, Padding, Point, Rect, Size, SizeFlag},
};

impl Canvas {
    /// Install new bounds. Returns `false` without side effects when the
    /// bounds are unchanged.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<bool> {
        let node = self.node_mut(id)?;
        if node.bounds == bounds {
            return Ok(false);
        }
        let old = node.bounds;
        node.bounds = bounds;
        self.bounds_changed(id, old);
        Ok(true)
    }

    /// Propagate a bounds change: tell the parent, invalidate on resize,
    /// repaint, refresh render bounds, then run the node's own hook.
    fn bounds_changed(&mut self, id: NodeId, old: Rect) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let (parent, bounds) = (node.parent, node.bounds);
        if let Some(p) = parent {
            self.notify(p, |w, ctx| w.on_child_bounds_changed(id, old, ctx));
        }
        if bounds.w != old.w || bounds.h != old.h {
            self.invalidate(id);
        }
        self.redraw(id);
        if let Some(node) = self.nodes.get_mut(id) {
            node.render_bounds = Rect::new(0, 0, node.bounds.w, node.bounds.h);
        }
        self.notify(id, |w, ctx| w.on_bounds_changed(old, ctx));
    }

    /// Move without clamping.
    pub fn set_pos(&mut self, id: NodeId, x: i32, y: i32) -> Result<bool> {
        let b = self.node(id)?.bounds;
        self.set_bounds(id, Rect::new(x, y, b.w, b.h))
    }

    /// Resize, keeping the position.
    pub fn set_size(&mut self, id: NodeId, w: i32, h: i32) -> Result<bool> {
        let b = self.node(id)?.bounds;
        self.set_bounds(id, Rect::new(b.x, b.y, w, h))
    }

    /// Resize horizontally.
    pub fn set_width(&mut self, id: NodeId, w: i32) -> Result<bool> {
        let b = self.node(id)?.bounds;
        self.set_size(id, w, b.h)
    }

    /// Resize vertically.
    pub fn set_height(&mut self, id: NodeId, h: i32) -> Result<bool> {
        let b = self.node(id)?.bounds;
        self.set_size(id, b.w, h)
    }

    /// Move to a position. With restrict-to-parent set, the node's padded
    /// box is clamped inside the logical parent's margin.
    pub fn move_to(&mut self, id: NodeId, mut x: i32, mut y: i32) -> Result<bool> {
        let node = self.node(id)?;
        let (b, pad) = (node.bounds, node.padding);
        if node.restrict_to_parent
            && let Some(parent) = node.parent.and_then(|p| self.nodes.get(p))
        {
            let (pm, pb) = (parent.margin, parent.bounds);
            if x - pad.left < pm.left {
                x = pm.left + pad.left;
            }
            if y - pad.top < pm.top {
                y = pm.top + pad.top;
            }
            if x + b.w + pad.right > pb.w - pm.right {
                x = pb.w - pm.right - b.w - pad.right;
            }
            if y + b.h + pad.bottom > pb.h - pm.bottom {
                y = pb.h - pm.bottom - b.h - pad.bottom;
            }
        }
        self.set_bounds(id, Rect::new(x, y, b.w, b.h))
    }

    /// Move by a delta, honoring restrict-to-parent.
    pub fn move_by(&mut self, id: NodeId, dx: i32, dy: i32) -> Result<bool> {
        let b = self.node(id)?.bounds;
        self.move_to(id, b.x + dx, b.y + dy)
    }

    /// Set inner spacing. Invalidates the node and its parent on change.
    pub fn set_padding(&mut self, id: NodeId, padding: Padding) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.padding == padding {
            return Ok(());
        }
        node.padding = padding;
        self.invalidate(id);
        self.invalidate_parent(id);
        Ok(())
    }

    /// Set outer spacing. Invalidates the node and its parent on change.
    pub fn set_margin(&mut self, id: NodeId, margin: Margin) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.margin == margin {
            return Ok(());
        }
        node.margin = margin;
        self.invalidate(id);
        self.invalidate_parent(id);
        Ok(())
    }

    /// Place the node inside its logical parent's inner bounds according to
    /// edge and centre flags, with extra padding from the chosen edges.
    /// Positions are clamped at zero.
    pub fn position(&mut self, id: NodeId, pos: Dock, xpad: i32, ypad: i32) -> Result<bool> {
        let node = self.node(id)?;
        let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) else {
            return Ok(false);
        };
        let inner = parent.inner_bounds;
        let (b, m) = (node.bounds, node.margin);
        let (mut x, mut y) = (b.x, b.y);
        if pos.contains(Dock::LEFT) {
            x = inner.x + xpad + m.left;
        }
        if pos.contains(Dock::RIGHT) {
            x = inner.x + (inner.w - b.w - xpad - m.right);
        }
        if pos.contains(Dock::CENTER_H) {
            x = inner.x + (inner.w - b.w) / 2;
        }
        if pos.contains(Dock::TOP) {
            y = inner.y + ypad;
        }
        if pos.contains(Dock::BOTTOM) {
            y = inner.y + (inner.h - b.h - ypad);
        }
        if pos.contains(Dock::CENTER_V) {
            y = inner.y + (inner.h - b.h) / 2 + ypad;
        }
        self.set_pos(id, x.max(0), y.max(0))
    }

    /// Offset of a node's local origin from the top of its tree: the sum of
    /// the positions of the node and every container above it, excluding
    /// the topmost node itself.
    fn canvas_offset(&self, id: NodeId) -> Point {
        let mut offset = Point::zero();
        let mut current = id;
        while let Some(node) = self.nodes.get(current) {
            let Some(container) = node.actual_parent else {
                break;
            };
            offset += node.bounds.origin();
            current = container;
        }
        offset
    }

    /// Convert a point in the node's local space to canvas space. Inner
    /// panels between the node and its logical ancestors contribute their
    /// own offsets.
    pub fn local_pos_to_canvas(&self, id: NodeId, p: Point) -> Point {
        p + self.canvas_offset(id)
    }

    /// Convert a canvas point to the node's local space.
    pub fn canvas_pos_to_local(&self, id: NodeId, p: Point) -> Point {
        p - self.canvas_offset(id)
    }

    /// Right edge including the right margin.
    pub fn right(&self, id: NodeId) -> i32 {
        self.nodes
            .get(id)
            .map(|n| n.bounds.right() + n.margin.right)
            .unwrap_or(0)
    }

    /// Bottom edge including the bottom margin.
    pub fn bottom(&self, id: NodeId) -> i32 {
        self.nodes
            .get(id)
            .map(|n| n.bounds.bottom() + n.margin.bottom)
            .unwrap_or(0)
    }

    /// Set the configured minimum size.
    pub fn set_minimum_size(&mut self, id: NodeId, size: Size) -> Result<()> {
        self.node_mut(id)?.min_size = size;
        Ok(())
    }

    /// Set the configured maximum size.
    pub fn set_maximum_size(&mut self, id: NodeId, size: Size) -> Result<()> {
        self.node_mut(id)?.max_size = size;
        Ok(())
    }

    /// Effective minimum size under the node's size flags: the bound size on
    /// Fixed axes, at least the preferred size on Expand and Bloat axes.
    pub fn minimum_size(&self, id: NodeId) -> Result<Size> {
        let node = self.node(id)?;
        let mut out = node.min_size;
        for dim in [Dim::X, Dim::Y] {
            match node.size_flags.get(dim) {
                SizeFlag::Fixed => out.set(dim, node.bounds.extent(dim)),
                SizeFlag::Expand | SizeFlag::Bloat => {
                    out.set(dim, out.get(dim).max(node.preferred.get(dim)))
                }
                SizeFlag::Shrink | SizeFlag::Elastic => {}
            }
        }
        Ok(out)
    }

    /// Effective maximum size under the node's size flags: the bound size on
    /// Fixed axes, at least the preferred size on Shrink axes. Each axis
    /// consults its own flag.
    pub fn maximum_size(&self, id: NodeId) -> Result<Size> {
        let node = self.node(id)?;
        let mut out = node.max_size;
        for dim in [Dim::X, Dim::Y] {
            match node.size_flags.get(dim) {
                SizeFlag::Fixed => out.set(dim, node.bounds.extent(dim)),
                SizeFlag::Shrink => out.set(dim, out.get(dim).max(node.preferred.get(dim))),
                SizeFlag::Expand | SizeFlag::Bloat | SizeFlag::Elastic => {}
            }
        }
        Ok(out)
    }

    /// Size computed by the last sizing pass.
    pub fn preferred_size(&self, id: NodeId) -> Result<Size> {
        Ok(self.node(id)?.preferred)
    }
}
