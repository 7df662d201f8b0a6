use tracing::debug;

use crate::core::{
    canvas::Canvas,
    error::Result,
    event::{Caller, Fired},
    focus::FocusManager,
    id::NodeId,
};

impl Canvas {
    /// Fold an accelerator string to its canonical form: whitespace removed,
    /// case folded per the configuration.
    pub fn normalize_accelerator(&self, accelerator: &str) -> String {
        let compact: String = accelerator.chars().filter(|c| !c.is_whitespace()).collect();
        self.config.accelerator_case.apply(&compact)
    }

    /// Bind an accelerator on a node. A later binding for the same key
    /// replaces the earlier one.
    pub fn add_accelerator(
        &mut self,
        id: NodeId,
        accelerator: &str,
        target: NodeId,
        handler: impl FnMut(&mut Canvas, Fired) + 'static,
    ) -> Result<()> {
        let key = self.normalize_accelerator(accelerator);
        let mut caller = Caller::new();
        caller.add(target, Box::new(handler));
        debug!(?id, %key, "add accelerator");
        self.node_mut(id)?.accelerators.insert(key, caller);
        Ok(())
    }

    /// Bind an accelerator that invokes the node's own accelerate hook.
    pub fn add_default_accelerator(&mut self, id: NodeId, accelerator: &str) -> Result<()> {
        self.add_accelerator(id, accelerator, id, |canvas, fired| {
            canvas.notify(fired.target, |w, ctx| w.accelerate_pressed(ctx));
        })
    }

    /// Does the node bind the accelerator?
    pub fn has_accelerator(&self, id: NodeId, accelerator: &str) -> bool {
        let key = self.normalize_accelerator(accelerator);
        self.nodes
            .get(id)
            .is_some_and(|n| n.accelerators.contains_key(&key))
    }

    /// Offer an accelerator to a subtree. The node handles it first, if it
    /// holds focus or does not restrict accelerators to focus; otherwise each
    /// literal child is tried in order, depth first. Returns `true` once a
    /// binding fires.
    pub fn handle_accelerator(&mut self, id: NodeId, accelerator: &str) -> bool {
        let key = self.normalize_accelerator(accelerator);
        self.dispatch_accelerator(id, &key)
    }

    /// Recursive step of [`Canvas::handle_accelerator`] on a normalized key.
    fn dispatch_accelerator(&mut self, id: NodeId, key: &str) -> bool {
        let only_focus = self
            .nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .is_some_and(|w| w.accelerator_only_focus());
        if (self.has_focus(id) || !only_focus) && self.fire_accelerator(id, key) {
            return true;
        }
        let children = match self.nodes.get(id) {
            Some(n) => n.children.clone(),
            None => return false,
        };
        children
            .into_iter()
            .any(|child| self.dispatch_accelerator(child, key))
    }

    /// Call the node's binding for a key, if it has one. A binding whose
    /// targets are all gone is dropped and does not count as handled.
    fn fire_accelerator(&mut self, id: NodeId, key: &str) -> bool {
        let Some(mut caller) = self
            .nodes
            .get_mut(id)
            .and_then(|n| n.accelerators.remove(key))
        else {
            return false;
        };
        let called = caller.call(self, id);
        debug!(?id, key, called, "accelerator");
        if !caller.is_empty()
            && let Some(n) = self.nodes.get_mut(id)
            && !n.accelerators.contains_key(key)
        {
            n.accelerators.insert(key.to_string(), caller);
        }
        called > 0
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn normalization_strips_and_folds() {
        let c = Canvas::new();
        assert_eq!(c.normalize_accelerator(" Ctrl + s "), "CTRL+S");
    }

    #[test]
    fn first_match_in_child_order_wins() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "a")?;
        let b = c.create(Some(root), "b")?;
        let hits = Rc::new(Cell::new((0, 0)));

        let h = hits.clone();
        c.add_accelerator(a, "ctrl+s", a, move |_, _| h.set((h.get().0 + 1, h.get().1)))?;
        let h = hits.clone();
        c.add_accelerator(b, "CTRL+S", b, move |_, _| h.set((h.get().0, h.get().1 + 1)))?;

        assert!(c.handle_accelerator(root, "Ctrl+S"));
        assert_eq!(hits.get(), (1, 0));
        assert!(!c.handle_accelerator(root, "ctrl+q"));
        Ok(())
    }

    #[test]
    fn rebinding_replaces() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        c.add_accelerator(root, "x", root, move |_, _| h.set(h.get() + 1))?;
        let h = hits.clone();
        c.add_accelerator(root, "x", root, move |_, _| h.set(h.get() + 10))?;
        assert!(c.handle_accelerator(root, "x"));
        assert_eq!(hits.get(), 10);
        Ok(())
    }

    #[test]
    fn dead_binding_does_not_shadow_children() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let gone = c.create(Some(root), "gone")?;
        let a = c.create(Some(root), "a")?;
        let hits = Rc::new(Cell::new(0));

        c.add_accelerator(root, "ctrl+s", gone, |_, _| {})?;
        let h = hits.clone();
        c.add_accelerator(a, "ctrl+s", a, move |_, _| h.set(h.get() + 1))?;
        c.destroy(gone)?;

        assert!(c.handle_accelerator(root, "ctrl+s"));
        assert_eq!(hits.get(), 1);
        assert!(!c.has_accelerator(root, "ctrl+s"));
        Ok(())
    }
}
