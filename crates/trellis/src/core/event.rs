//! Named events, handler bindings and key codes.

use tracing::trace;

use crate::core::{canvas::Canvas, error::Result, id::NodeId};

/// Event fired when the mouse enters a control.
pub const HOVER_ENTER: &str = "hover_enter";
/// Event fired when the mouse leaves a control.
pub const HOVER_LEAVE: &str = "hover_leave";

/// Keys the core routes specially. Everything else arrives as `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Return or enter.
    Return,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Shift modifier.
    Shift,
    /// Tab, which moves keyboard focus along the tab chain.
    Tab,
    /// Space bar.
    Space,
    /// Home.
    Home,
    /// End.
    End,
    /// Control modifier.
    Control,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Escape.
    Escape,
    /// Alt modifier.
    Alt,
    /// A character key.
    Char(char),
}

/// Identifies a handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// Node that fired the event.
    pub source: NodeId,
    /// Node the handler was bound for.
    pub target: NodeId,
}

/// Handler callback. Handlers get full canvas access.
pub type Handler = Box<dyn FnMut(&mut Canvas, Fired)>;

/// A handler bound on behalf of a target node.
struct Binding {
    /// Node whose lifetime scopes the handler.
    target: NodeId,
    /// Callback.
    handler: Handler,
}

/// An ordered list of handlers for one event or accelerator. Handlers whose
/// target node no longer exists are dropped instead of called.
#[derive(Default)]
pub struct Caller {
    /// Bindings in registration order.
    bindings: Vec<Binding>,
}

impl Caller {
    /// Construct an empty caller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler for a target node.
    pub fn add(&mut self, target: NodeId, handler: Handler) {
        self.bindings.push(Binding { target, handler });
    }

    /// Number of bound handlers.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Are there no handlers?
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Invoke every live handler in order. Returns the number called.
    pub(crate) fn call(&mut self, canvas: &mut Canvas, source: NodeId) -> usize {
        self.bindings.retain(|b| canvas.contains(b.target));
        let mut called = 0;
        for binding in &mut self.bindings {
            if !canvas.contains(binding.target) {
                continue;
            }
            (binding.handler)(
                canvas,
                Fired {
                    source,
                    target: binding.target,
                },
            );
            called += 1;
        }
        called
    }

    /// Append bindings registered while this caller was detached.
    pub(crate) fn absorb(&mut self, other: Self) {
        self.bindings.extend(other.bindings);
    }
}

impl Canvas {
    /// Bind a handler to a named event on a node.
    pub fn on(
        &mut self,
        node: NodeId,
        event: &str,
        target: NodeId,
        handler: impl FnMut(&mut Canvas, Fired) + 'static,
    ) -> Result<()> {
        let n = self.node_mut(node)?;
        n.events
            .entry(event.to_string())
            .or_default()
            .add(target, Box::new(handler));
        Ok(())
    }

    /// Fire a named event on a node. Returns the number of handlers called.
    pub fn emit(&mut self, node: NodeId, event: &str) -> usize {
        let Some(mut caller) = self
            .nodes
            .get_mut(node)
            .and_then(|n| n.events.remove(event))
        else {
            return 0;
        };
        trace!(?node, event, "emit");
        let called = caller.call(self, node);
        if let Some(n) = self.nodes.get_mut(node) {
            if let Some(added) = n.events.remove(event) {
                caller.absorb(added);
            }
            n.events.insert(event.to_string(), caller);
        }
        called
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn handlers_for_destroyed_targets_are_dropped() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let source = c.create(Some(root), "source")?;
        let listener = c.create(Some(root), "listener")?;
        let hits = Rc::new(Cell::new(0));
        for target in [root, listener] {
            let hits = hits.clone();
            c.on(source, "clicked", target, move |_, _| hits.set(hits.get() + 1))?;
        }

        assert_eq!(c.emit(source, "clicked"), 2);
        c.destroy(listener)?;
        assert_eq!(c.emit(source, "clicked"), 1);
        assert_eq!(hits.get(), 3);
        assert_eq!(c.emit(source, "other"), 0);
        Ok(())
    }

    #[test]
    fn handlers_bound_during_emit_survive() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let source = c.create(Some(root), "source")?;
        c.on(source, "tick", root, move |canvas, fired| {
            if let Err(e) = canvas.on(fired.source, "tick", fired.target, |_, _| {}) {
                panic!("bind failed: {e}");
            }
        })?;

        assert_eq!(c.emit(source, "tick"), 1);
        assert_eq!(c.emit(source, "tick"), 2);
        Ok(())
    }
}
