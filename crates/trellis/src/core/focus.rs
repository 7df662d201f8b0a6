use tracing::debug;

use crate::{
    core::{
        canvas::Canvas,
        event::{HOVER_ENTER, HOVER_LEAVE, Key},
        id::NodeId,
    },
    geom::Point,
};

/// Keyboard focus, hover and mouse capture, plus the input entry points that
/// move them.
pub trait FocusManager {
    /// The node receiving keyboard input.
    fn keyboard_focus(&self) -> Option<NodeId>;

    /// Does the node hold keyboard focus?
    fn has_focus(&self, node: NodeId) -> bool;

    /// Give a node keyboard focus. The previous holder gets its lost-focus
    /// hook first. Returns `true` if focus changed.
    fn focus(&mut self, node: NodeId) -> bool;

    /// Drop keyboard focus if the node holds it. Returns `true` if it did.
    fn blur(&mut self, node: NodeId) -> bool;

    /// The node under the mouse.
    fn hovered(&self) -> Option<NodeId>;

    /// Is the node under the mouse?
    fn is_hovered(&self, node: NodeId) -> bool;

    /// The node capturing the mouse.
    fn mouse_focus(&self) -> Option<NodeId>;

    /// Capture the mouse for a node, or release it.
    fn set_mouse_focus(&mut self, node: Option<NodeId>);

    /// Should the node show a hover highlight? Only when nothing else has
    /// captured the mouse.
    fn should_draw_hover(&self, node: NodeId) -> bool;

    /// First node of the tab chain captured by the last layout.
    fn first_tab(&self) -> Option<NodeId>;

    /// Node that the next tab press focuses.
    fn next_tab(&self) -> Option<NodeId>;

    /// Track the mouse at a canvas position, updating the hovered node.
    /// Returns the new hovered node.
    fn mouse_moved(&mut self, pos: Point) -> Option<NodeId>;

    /// Dispatch a key to the keyboard focus, or the root when nothing has
    /// focus. Unhandled keys bubble to logical parents. Returns `true` if a
    /// node handled the key.
    fn key_press(&mut self, key: Key, down: bool) -> bool;

    /// Dispatch a key release.
    fn key_release(&mut self, key: Key) -> bool;

    /// Dispatch a wheel movement to the hovered node, bubbling through
    /// containers until handled.
    fn mouse_wheeled(&mut self, delta: i32) -> bool;
}

impl FocusManager for Canvas {
    fn keyboard_focus(&self) -> Option<NodeId> {
        self.keyboard_focus
    }

    fn has_focus(&self, node: NodeId) -> bool {
        self.keyboard_focus == Some(node)
    }

    fn focus(&mut self, node: NodeId) -> bool {
        if self.keyboard_focus == Some(node) || !self.contains(node) {
            return false;
        }
        debug!(?node, from = ?self.keyboard_focus, "focus");
        if let Some(prev) = self.keyboard_focus {
            self.notify(prev, |w, ctx| w.on_lost_keyboard_focus(ctx));
            self.redraw(prev);
        }
        self.keyboard_focus = Some(node);
        self.notify(node, |w, ctx| w.on_keyboard_focus(ctx));
        self.redraw(node);
        true
    }

    fn blur(&mut self, node: NodeId) -> bool {
        if self.keyboard_focus != Some(node) {
            return false;
        }
        debug!(?node, "blur");
        self.keyboard_focus = None;
        self.notify(node, |w, ctx| w.on_lost_keyboard_focus(ctx));
        self.redraw(node);
        true
    }

    fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    fn is_hovered(&self, node: NodeId) -> bool {
        self.hovered == Some(node)
    }

    fn mouse_focus(&self) -> Option<NodeId> {
        self.mouse_focus
    }

    fn set_mouse_focus(&mut self, node: Option<NodeId>) {
        self.mouse_focus = node.filter(|n| self.contains(*n));
    }

    fn should_draw_hover(&self, node: NodeId) -> bool {
        self.mouse_focus.is_none() || self.mouse_focus == Some(node)
    }

    fn first_tab(&self) -> Option<NodeId> {
        self.first_tab
    }

    fn next_tab(&self) -> Option<NodeId> {
        self.next_tab
    }

    fn mouse_moved(&mut self, pos: Point) -> Option<NodeId> {
        self.mouse_pos = pos;
        let target = match self.mouse_focus {
            Some(captured) => Some(captured),
            None => {
                let root = self.root;
                let origin = self.nodes.get(root).map(|n| n.bounds.origin());
                self.control_at(root, pos - origin.unwrap_or_default(), true)
            }
        };
        self.drag_hover(target);
        if target == self.hovered {
            return target;
        }
        if let Some(old) = self.hovered {
            self.mouse_leave(old);
        }
        self.hovered = target;
        if let Some(new) = target {
            self.mouse_enter(new);
            self.update_cursor(new);
        }
        target
    }

    fn key_press(&mut self, key: Key, down: bool) -> bool {
        let start = self.keyboard_focus.unwrap_or(self.root);
        let mut current = Some(start);
        while let Some(n) = current {
            if self.key_on(n, key, down) {
                return true;
            }
            current = self.nodes.get(n).and_then(|node| node.parent);
        }
        false
    }

    fn key_release(&mut self, key: Key) -> bool {
        self.key_press(key, false)
    }

    fn mouse_wheeled(&mut self, delta: i32) -> bool {
        let mut current = self.hovered;
        while let Some(n) = current {
            if self.notify(n, |w, ctx| w.on_mouse_wheel(delta, ctx)) == Some(true) {
                return true;
            }
            current = self.nodes.get(n).and_then(|node| node.actual_parent);
        }
        false
    }
}

impl Canvas {
    /// Offer a key to one node: the widget first, then the built-in tab
    /// handling.
    fn key_on(&mut self, node: NodeId, key: Key, down: bool) -> bool {
        if self.notify(node, |w, ctx| w.on_key(key, down, ctx)) == Some(true) {
            return true;
        }
        if key == Key::Tab {
            if down && let Some(next) = self.next_tab {
                self.focus(next);
                self.redraw(node);
            }
            return true;
        }
        false
    }

    /// Hover-enter handling for a node.
    fn mouse_enter(&mut self, node: NodeId) {
        self.emit(node, HOVER_ENTER);
        self.notify(node, |w, ctx| w.on_mouse_enter(ctx));
        let Some(n) = self.nodes.get(node) else {
            return;
        };
        if n.tooltip.is_some() {
            self.tooltip.enable(node);
        } else if let Some(parent) = n.parent
            && self.nodes.get(parent).is_some_and(|p| p.tooltip.is_some())
        {
            self.tooltip.enable(parent);
        }
        self.redraw(node);
    }

    /// Hover-leave handling for a node.
    fn mouse_leave(&mut self, node: NodeId) {
        self.emit(node, HOVER_LEAVE);
        self.notify(node, |w, ctx| w.on_mouse_leave(ctx));
        if self.nodes.get(node).is_some_and(|n| n.tooltip.is_some()) {
            self.tooltip.disable(node);
        }
        self.redraw(node);
    }

    /// Clear the tab chain before a layout run.
    pub(crate) fn reset_tab_chain(&mut self) {
        self.first_tab = None;
        self.next_tab = None;
    }

    /// Record a node in the tab chain during the post-layout pass. The
    /// focused node clears the next slot so the next tabable node after it
    /// claims it.
    pub(crate) fn capture_tab(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.get(node)
            && n.tabable
            && !n.disabled
        {
            if self.first_tab.is_none() {
                self.first_tab = Some(node);
            }
            if self.next_tab.is_none() {
                self.next_tab = Some(node);
            }
        }
        if self.keyboard_focus == Some(node) {
            self.next_tab = None;
        }
    }

    /// Wrap the tab chain to its start when nothing follows the focus.
    pub(crate) fn wrap_tab_chain(&mut self) {
        if self.next_tab.is_none() && self.config.tab_wraps {
            self.next_tab = self.first_tab;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::error::Result, geom::Rect};

    #[test]
    fn focus_moves_and_blurs() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "a")?;
        let b = c.create(Some(root), "b")?;

        assert!(c.focus(a));
        assert!(!c.focus(a));
        assert!(c.focus(b));
        assert!(c.has_focus(b));
        assert!(!c.blur(a));
        assert!(c.blur(b));
        assert_eq!(c.keyboard_focus(), None);
        Ok(())
    }

    #[test]
    fn hover_draw_respects_capture() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "a")?;
        let b = c.create(Some(root), "b")?;
        assert!(c.should_draw_hover(a));
        c.set_mouse_focus(Some(b));
        assert!(!c.should_draw_hover(a));
        assert!(c.should_draw_hover(b));
        Ok(())
    }

    #[test]
    fn mouse_moved_tracks_topmost() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        c.set_bounds(root, Rect::new(0, 0, 100, 100))?;
        let a = c.create(Some(root), "a")?;
        c.set_bounds(a, Rect::new(0, 0, 50, 50))?;
        let b = c.create(Some(root), "b")?;
        c.set_bounds(b, Rect::new(25, 25, 50, 50))?;

        assert_eq!(c.mouse_moved(Point::new(30, 30)), Some(b));
        assert_eq!(c.mouse_moved(Point::new(10, 10)), Some(a));
        assert!(c.is_hovered(a));
        assert_eq!(c.mouse_moved(Point::new(90, 10)), Some(root));
        Ok(())
    }
}
