//! Docking layout.
//!
//! Layout runs per axis, horizontal first. For each axis a post-order sizing
//! pass computes every visible node's preferred extent from its children,
//! then a top-down arrangement pass docks children into the shrinking inner
//! rectangle of their container. Fill and centre docks are resolved last,
//! against whatever inner rectangle remains.

use bitflags::bitflags;
use tracing::{Level, trace};

use crate::{
    core::{
        canvas::Canvas,
        dump,
        error::Result,
        id::{NodeId, SkinId},
    },
    geom::{Dim, Rect, Size, SizeFlag, SizeFlags},
};

bitflags! {
    /// Docking edges and placement flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Dock: u32 {
        /// Not docked: the node keeps its own bounds.
        const NONE = 0;
        /// Claim space from the left edge.
        const LEFT = 1 << 1;
        /// Claim space from the right edge.
        const RIGHT = 1 << 2;
        /// Claim space from the top edge.
        const TOP = 1 << 3;
        /// Claim space from the bottom edge.
        const BOTTOM = 1 << 4;
        /// Centre vertically in the remaining space.
        const CENTER_V = 1 << 5;
        /// Centre horizontally in the remaining space.
        const CENTER_H = 1 << 6;
        /// Stretch over the remaining space.
        const FILL = 1 << 7;
        /// Centre on both axes.
        const CENTER = Self::CENTER_V.bits() | Self::CENTER_H.bits();
    }
}

/// How a docked child behaves along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// Claims its preferred extent from the leading edge.
    Leading,
    /// Claims its preferred extent from the trailing edge.
    Trailing,
    /// Spans the remaining extent without consuming it.
    Cross,
    /// Keeps its own bounds.
    Free,
}

/// Resolve the role of a dock on an axis. When several edges are set the
/// first of top, left, right, bottom wins.
fn role(dock: Dock, dim: Dim) -> Role {
    let edge = [Dock::TOP, Dock::LEFT, Dock::RIGHT, Dock::BOTTOM]
        .into_iter()
        .find(|e| dock.contains(*e));
    let Some(edge) = edge else {
        return Role::Free;
    };
    let (leading, trailing) = match dim {
        Dim::X => (Dock::LEFT, Dock::RIGHT),
        Dim::Y => (Dock::TOP, Dock::BOTTOM),
    };
    if edge == leading {
        Role::Leading
    } else if edge == trailing {
        Role::Trailing
    } else {
        Role::Cross
    }
}

/// Centre flag for an axis.
fn center_flag(dim: Dim) -> Dock {
    match dim {
        Dim::X => Dock::CENTER_H,
        Dim::Y => Dock::CENTER_V,
    }
}

/// Replace one axis of a rectangle.
fn with_axis(mut r: Rect, dim: Dim, pos: i32, len: i32) -> Rect {
    match dim {
        Dim::X => {
            r.x = pos;
            r.w = len;
        }
        Dim::Y => {
            r.y = pos;
            r.h = len;
        }
    }
    r
}

/// The steps of one layout run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPhase {
    /// Compute preferred widths.
    SizingX,
    /// Dock children horizontally.
    ArrangingX,
    /// Compute preferred heights.
    SizingY,
    /// Dock children vertically.
    ArrangingY,
    /// Post-layout hooks and tab-chain capture.
    PostLayout,
}

impl LayoutPhase {
    /// Every phase of a run.
    pub const SEQUENCE: [Self; 5] = [
        Self::SizingX,
        Self::ArrangingX,
        Self::SizingY,
        Self::ArrangingY,
        Self::PostLayout,
    ];
}

impl Canvas {
    /// Set the docking flags. Invalidates the node and its parent on change.
    pub fn set_dock(&mut self, id: NodeId, dock: Dock) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.dock == dock {
            return Ok(());
        }
        node.dock = dock;
        self.invalidate(id);
        self.invalidate_parent(id);
        Ok(())
    }

    /// Set the sizing policies. Invalidates the node and its parent on change.
    pub fn set_size_flags(&mut self, id: NodeId, flags: SizeFlags) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.size_flags == flags {
            return Ok(());
        }
        node.size_flags = flags;
        self.invalidate(id);
        self.invalidate_parent(id);
        Ok(())
    }

    /// Exclude undocked children's positions from this node's computed size.
    pub fn set_strict_alignment(&mut self, id: NodeId, strict: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.strict_alignment != strict {
            node.strict_alignment = strict;
            self.invalidate(id);
        }
        Ok(())
    }

    /// Is the child laid out by its container? Hidden children and the
    /// container's tooltip are not.
    fn participates(&self, container: NodeId, child: NodeId) -> bool {
        let tooltip = self.nodes.get(container).and_then(|n| n.tooltip);
        self.nodes
            .get(child)
            .is_some_and(|c| !c.hidden && tooltip != Some(child))
    }

    /// Ask the widget for its intrinsic size.
    fn measure(&mut self, id: NodeId, skin: SkinId) -> Option<Size> {
        let mut widget = self.nodes.get_mut(id)?.widget.take()?;
        let out = self
            .skins
            .get_mut(skin)
            .and_then(|s| widget.measure(s.as_mut()));
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        out
    }

    /// Compute the preferred extent on one axis for a node and its visible
    /// descendants.
    pub fn calculate_size(&mut self, id: NodeId, dim: Dim) -> Result<()> {
        let skin = self.resolve_skin(id)?;
        self.size_pass(id, skin, dim)
    }

    /// Post-order sizing pass.
    fn size_pass(&mut self, id: NodeId, skin: SkinId, dim: Dim) -> Result<()> {
        let skin = self.node(id)?.skin.unwrap_or(skin);
        let children = self.node(id)?.children.clone();

        let mut extent = 0;
        let mut dock_extent = 0;
        let mut inner_extent = 0;
        for child in children {
            if !self.participates(id, child) {
                continue;
            }
            self.size_pass(child, skin, dim)?;
            let c = self.node(child)?;
            let mut child_extent = c.preferred.get(dim) + c.margin.sum(dim);
            if c.dock.intersects(Dock::TOP | Dock::BOTTOM) {
                match dim {
                    Dim::X => extent = extent.max(child_extent),
                    Dim::Y => dock_extent += child_extent,
                }
            } else if c.dock.intersects(Dock::LEFT | Dock::RIGHT) {
                match dim {
                    Dim::X => dock_extent += child_extent,
                    Dim::Y => extent = extent.max(child_extent),
                }
            } else if c.dock.contains(Dock::FILL) {
                inner_extent += child_extent;
            } else {
                if !self.node(id)?.strict_alignment {
                    child_extent += c.bounds.pos(dim);
                }
                extent = extent.max(child_extent);
            }
        }
        if let Some(content) = self.measure(id, skin) {
            extent = extent.max(content.get(dim));
        }

        let node = self.node_mut(id)?;
        dock_extent += inner_extent;
        let raw = extent.max(dock_extent) + node.padding.sum(dim);
        let preferred = match node.size_flags.get(dim) {
            SizeFlag::Fixed => node.bounds.extent(dim),
            SizeFlag::Shrink => raw.min(node.max_size.get(dim)),
            SizeFlag::Expand | SizeFlag::Bloat => raw.max(node.min_size.get(dim)),
            SizeFlag::Elastic => raw,
        };
        node.preferred.set(dim, preferred);
        Ok(())
    }

    /// Dock a node's children on one axis, then recurse into them.
    pub fn arrange(&mut self, id: NodeId, dim: Dim) -> Result<()> {
        let skin = self.resolve_skin(id)?;
        self.arrange_pass(id, skin, dim)
    }

    /// Top-down arrangement pass.
    fn arrange_pass(&mut self, id: NodeId, skin: SkinId, dim: Dim) -> Result<()> {
        let skin = self.node(id)?.skin.unwrap_or(skin);
        if self.node(id)?.needs_layout {
            self.node_mut(id)?.needs_layout = false;
            self.run_layout_hook(id, skin);
        }
        if self.node(id)?.hidden {
            return Ok(());
        }
        self.arrange_axis(id, dim)?;
        for child in self.node(id)?.children.clone() {
            if self.participates(id, child) {
                self.arrange_pass(child, skin, dim)?;
            }
        }
        Ok(())
    }

    /// One-time layout setup for a node: size its cache texture, then run
    /// the widget's layout hook.
    fn run_layout_hook(&mut self, id: NodeId, skin: SkinId) {
        if let Some(node) = self.nodes.get(id)
            && node.cache_to_texture
        {
            let size = node.bounds.size();
            if let Some(ctt) = self
                .skins
                .get_mut(skin)
                .and_then(|s| s.renderer().cache_to_texture())
            {
                trace!(?id, ?size, "create cache texture");
                ctt.create_control_cache_texture(id, size);
            }
        }
        self.notify(id, |w, ctx| w.layout(ctx));
    }

    /// Place the direct children of a node along one axis.
    fn arrange_axis(&mut self, id: NodeId, dim: Dim) -> Result<()> {
        let node = self.node(id)?;
        let children = node.children.clone();
        let mut pos = node.padding.leading(dim);
        let mut len = node.bounds.extent(dim) - node.padding.sum(dim);

        for &child in &children {
            if !self.participates(id, child) {
                continue;
            }
            let c = self.node(child)?;
            let (m, pref, b) = (c.margin, c.preferred.get(dim), c.bounds);
            let fixed = c.size_flags.get(dim) == SizeFlag::Fixed;
            let placed = match role(c.dock, dim) {
                Role::Leading => {
                    let r = with_axis(b, dim, pos + m.leading(dim), pref);
                    pos += m.sum(dim) + pref;
                    len -= m.sum(dim) + pref;
                    r
                }
                Role::Trailing => {
                    let r = with_axis(b, dim, pos + len - pref - m.trailing(dim), pref);
                    len -= m.sum(dim) + pref;
                    r
                }
                Role::Cross if fixed => with_axis(b, dim, pos + m.leading(dim), b.extent(dim)),
                Role::Cross => with_axis(b, dim, pos + m.leading(dim), len - m.sum(dim)),
                Role::Free => continue,
            };
            self.set_bounds(child, placed)?;
        }

        let node = self.node_mut(id)?;
        node.inner_bounds = with_axis(node.inner_bounds, dim, pos, len);

        for &child in &children {
            if !self.participates(id, child) {
                continue;
            }
            let c = self.node(child)?;
            let (m, b) = (c.margin, c.bounds);
            let placed = if c.dock.contains(Dock::FILL) {
                with_axis(b, dim, pos + m.leading(dim), len - m.sum(dim))
            } else if role(c.dock, dim) == Role::Free && c.dock.contains(center_flag(dim)) {
                with_axis(b, dim, pos + (len - b.extent(dim)) / 2, b.extent(dim))
            } else {
                continue;
            };
            self.set_bounds(child, placed)?;
        }
        Ok(())
    }

    /// Run a full layout over a subtree: both axes, then post-layout hooks
    /// and tab-chain capture for every visible node in pre-order.
    pub fn recurse_layout(&mut self, id: NodeId) -> Result<()> {
        let skin = self.resolve_skin(id)?;
        if self.node(id)?.hidden {
            return Ok(());
        }
        for phase in LayoutPhase::SEQUENCE {
            trace!(?id, ?phase, "layout phase");
            match phase {
                LayoutPhase::SizingX => self.size_pass(id, skin, Dim::X)?,
                LayoutPhase::ArrangingX => self.arrange_pass(id, skin, Dim::X)?,
                LayoutPhase::SizingY => self.size_pass(id, skin, Dim::Y)?,
                LayoutPhase::ArrangingY => self.arrange_pass(id, skin, Dim::Y)?,
                LayoutPhase::PostLayout => self.post_layout_pass(id),
            }
        }
        if tracing::enabled!(Level::TRACE) {
            trace!("layout complete\n{}", dump::dump(self, id));
        }
        Ok(())
    }

    /// Pre-order pass over visible nodes after both axes settle.
    fn post_layout_pass(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if self.nodes.get(n).is_none_or(|node| node.hidden) {
                continue;
            }
            self.notify(n, |w, ctx| w.post_layout(ctx));
            self.capture_tab(n);
            if let Some(node) = self.nodes.get(n) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// Union of the visible, size-counted literal children's far edges,
    /// margins included.
    pub fn children_size(&self, id: NodeId) -> Size {
        let mut size = Size::default();
        for child in self.direct_children(id) {
            let Some(c) = self.nodes.get(*child) else {
                continue;
            };
            if c.hidden || !c.include_in_size {
                continue;
            }
            size.w = size.w.max(self.right(*child));
            size.h = size.h.max(self.bottom(*child));
        }
        size
    }

    /// Resize to enclose the children plus trailing padding on the chosen
    /// axes.
    pub fn size_to_children(&mut self, id: NodeId, w: bool, h: bool) -> Result<bool> {
        let mut size = self.children_size(id);
        let node = self.node(id)?;
        size.w += node.padding.right;
        size.h += node.padding.bottom;
        let b = node.bounds;
        self.set_size(id, if w { size.w } else { b.w }, if h { size.h } else { b.h })
    }

    /// Resize to the widget's measured content plus padding. Widgets that
    /// report no content size keep their bounds.
    pub fn size_to_contents(&mut self, id: NodeId) -> Result<bool> {
        let skin = self.resolve_skin(id)?;
        let Some(content) = self.measure(id, skin) else {
            return Ok(false);
        };
        let padding = self.node(id)?.padding;
        self.set_size(
            id,
            content.w + padding.horizontal(),
            content.h + padding.vertical(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_follow_edge_precedence() {
        assert_eq!(role(Dock::LEFT, Dim::X), Role::Leading);
        assert_eq!(role(Dock::LEFT, Dim::Y), Role::Cross);
        assert_eq!(role(Dock::BOTTOM, Dim::Y), Role::Trailing);
        assert_eq!(role(Dock::TOP | Dock::LEFT, Dim::X), Role::Cross);
        assert_eq!(role(Dock::TOP | Dock::LEFT, Dim::Y), Role::Leading);
        assert_eq!(role(Dock::FILL, Dim::X), Role::Free);
        assert_eq!(role(Dock::CENTER, Dim::Y), Role::Free);
    }

    #[test]
    fn phases_run_axis_by_axis() {
        assert_eq!(LayoutPhase::SEQUENCE[0], LayoutPhase::SizingX);
        assert_eq!(LayoutPhase::SEQUENCE[4], LayoutPhase::PostLayout);
    }

    #[test]
    fn with_axis_replaces_one_axis() {
        let r = Rect::new(1, 2, 3, 4);
        assert_eq!(with_axis(r, Dim::X, 9, 8), Rect::new(9, 2, 8, 4));
        assert_eq!(with_axis(r, Dim::Y, 9, 8), Rect::new(1, 9, 3, 8));
    }
}
