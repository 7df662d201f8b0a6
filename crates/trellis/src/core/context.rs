use std::ops::{Deref, DerefMut};

use super::{canvas::Canvas, id::NodeId};

/// Mutable access to the canvas from inside a widget hook, scoped to the
/// node whose hook is running.
pub struct Context<'a> {
    /// Canvas being mutated.
    canvas: &'a mut Canvas,
    /// Node whose hook is running.
    node: NodeId,
}

impl<'a> Context<'a> {
    /// Construct a context for a node.
    pub(crate) fn new(canvas: &'a mut Canvas, node: NodeId) -> Self {
        Self { canvas, node }
    }

    /// The node whose hook is running.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Invalidate this node's layout.
    pub fn invalidate(&mut self) {
        let id = self.node;
        self.canvas.invalidate(id);
    }

    /// Mark this node's rendering stale.
    pub fn redraw(&mut self) {
        let id = self.node;
        self.canvas.redraw(id);
    }
}

impl Deref for Context<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for Context<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}
