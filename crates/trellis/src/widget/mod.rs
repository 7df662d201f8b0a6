//! Widget trait: the per-kind behavior attached to nodes in the Canvas arena.

use std::any::Any;

use crate::{
    core::{
        context::Context, dnd::DragPackage, event::Key, id::NodeId, paint::Paint, skin::Skin,
    },
    geom::{Rect, Size},
};

/// Widgets supply the kind-specific behavior of a control. Tree structure,
/// geometry, layout and traversal live in the [`Canvas`](crate::Canvas); every
/// hook has a no-op default so a widget overrides only what it needs.
///
/// Hooks are called with the widget taken out of its node, so a hook that
/// triggers another hook on the same node is skipped rather than re-entered.
pub trait Widget: Any {
    /// Kind name passed to the skin when drawing.
    fn kind(&self) -> &'static str {
        "Base"
    }

    /// Per-frame update, called before the node renders.
    fn think(&mut self, _ctx: &mut Context<'_>) {}

    /// Intrinsic content size, combined with the children's size by taking
    /// the maximum on each axis. The skin provides text metrics.
    fn measure(&mut self, _skin: &mut dyn Skin) -> Option<Size> {
        None
    }

    /// Layout hook, run when the node's layout was invalidated.
    fn layout(&mut self, _ctx: &mut Context<'_>) {}

    /// Post-layout hook, run once per layout pass after both axes settle.
    fn post_layout(&mut self, _ctx: &mut Context<'_>) {}

    /// Draw beneath the node's clip region.
    fn render_under(&mut self, _p: &mut Paint<'_>) {}

    /// Draw the node itself, clipped to its bounds.
    fn render(&mut self, _p: &mut Paint<'_>) {}

    /// Draw over the node and its children.
    fn render_over(&mut self, _p: &mut Paint<'_>) {}

    /// Whether rendering clips to the node's bounds.
    fn should_clip(&self) -> bool {
        true
    }

    /// The node's bounds changed.
    fn on_bounds_changed(&mut self, _old: Rect, _ctx: &mut Context<'_>) {}

    /// A child's bounds changed.
    fn on_child_bounds_changed(&mut self, _child: NodeId, _old: Rect, _ctx: &mut Context<'_>) {}

    /// A child was attached.
    fn on_child_added(&mut self, _child: NodeId, _ctx: &mut Context<'_>) {}

    /// A child was detached.
    fn on_child_removed(&mut self, _child: NodeId, _ctx: &mut Context<'_>) {}

    /// A descendant was touched.
    fn on_child_touched(&mut self, _child: NodeId, _ctx: &mut Context<'_>) {}

    /// The node's effective skin changed.
    fn on_skin_changed(&mut self, _ctx: &mut Context<'_>) {}

    /// The node gained keyboard focus.
    fn on_keyboard_focus(&mut self, _ctx: &mut Context<'_>) {}

    /// The node lost keyboard focus.
    fn on_lost_keyboard_focus(&mut self, _ctx: &mut Context<'_>) {}

    /// The mouse entered the node.
    fn on_mouse_enter(&mut self, _ctx: &mut Context<'_>) {}

    /// The mouse left the node.
    fn on_mouse_leave(&mut self, _ctx: &mut Context<'_>) {}

    /// A key changed state while this node is on the focus chain. Return
    /// `true` to stop the key bubbling to the parent.
    fn on_key(&mut self, _key: Key, _down: bool, _ctx: &mut Context<'_>) -> bool {
        false
    }

    /// The mouse wheel moved over the node. Return `true` to stop bubbling.
    fn on_mouse_wheel(&mut self, _delta: i32, _ctx: &mut Context<'_>) -> bool {
        false
    }

    /// Whether accelerators on this node fire only while it has focus.
    fn accelerator_only_focus(&self) -> bool {
        false
    }

    /// Default accelerator action.
    fn accelerate_pressed(&mut self, _ctx: &mut Context<'_>) {}

    /// Whether a drop of this package is accepted.
    fn can_accept_package(&self, _package: &DragPackage) -> bool {
        false
    }

    /// The widget's value as a string.
    fn value(&self) -> String {
        String::new()
    }

    /// Set the widget's value from a string.
    fn set_value(&mut self, _value: &str) {}

    /// The node is about to be destroyed.
    fn pre_delete(&mut self, _ctx: &mut Context<'_>) {}
}

impl dyn Widget {
    /// Downcast to a concrete widget type.
    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        (self as &dyn Any).downcast_ref::<W>()
    }

    /// Mutably downcast to a concrete widget type.
    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        (self as &mut dyn Any).downcast_mut::<W>()
    }
}
