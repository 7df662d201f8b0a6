//! Tree shape: reparenting, inner-panel redirection, enumeration, lookup,
//! z-order and destruction.
//!
//! Every node has a logical parent (the node it was attached to) and an
//! actual parent (the node whose child list holds it). The two differ when
//! the logical parent redirects children into an inner panel. All shape
//! changes go through [`Canvas::set_parent`], which detaches from the old
//! container and attaches to the new one, following inner-panel redirection.

use std::mem;

use tracing::{debug, trace};

use crate::core::{
    canvas::Canvas,
    error::{Error, Result},
    id::NodeId,
};

impl Canvas {
    /// Attach a node to a new logical parent, or detach it with `None`.
    /// Reparenting to the current parent is a no-op.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<()> {
        if id == self.root {
            return Err(Error::CannotRemoveRoot);
        }
        let current = self.node(id)?.parent;
        if current == parent {
            return Ok(());
        }
        if let Some(p) = parent {
            self.node(p)?;
            if self.is_ancestor(id, p) {
                return Err(Error::WouldCreateCycle {
                    parent: p,
                    child: id,
                });
            }
        }
        debug!(?id, from = ?current, to = ?parent, "set_parent");
        if current.is_some() {
            self.detach(id);
        }
        self.node_mut(id)?.parent = parent;
        if let Some(p) = parent {
            self.attach(p, id);
        }
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Attach `child` under `parent`. Equivalent to `set_parent(child, Some(parent))`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` if its logical parent is `parent`. The child stays
    /// alive as a detached node. Returns `true` if it was detached.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        if self.node(child)?.parent != Some(parent) {
            return Ok(false);
        }
        self.set_parent(child, None)?;
        Ok(true)
    }

    /// Detach every logical child, front of the list first. Returns the
    /// detached nodes, which stay alive.
    pub fn remove_all_children(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut removed = Vec::new();
        while let Some(first) = self.children(id).first().copied() {
            self.set_parent(first, None)?;
            removed.push(first);
        }
        Ok(removed)
    }

    /// Destroy every logical child and its subtree.
    pub fn delete_all_children(&mut self, id: NodeId) -> Result<()> {
        while let Some(first) = self.children(id).first().copied() {
            self.destroy(first)?;
        }
        Ok(())
    }

    /// Follow inner-panel redirection to the node whose list receives
    /// children added to `id`.
    fn container_for(&self, id: NodeId) -> NodeId {
        let mut target = id;
        while let Some(inner) = self.nodes.get(target).and_then(|n| n.inner_panel) {
            target = inner;
        }
        target
    }

    /// Append a node to its parent's container list.
    fn attach(&mut self, parent: NodeId, id: NodeId) {
        let container = self.container_for(parent);
        self.push_child(container, id);
        self.invalidate(container);
        self.redraw(container);
        self.notify(container, |w, ctx| w.on_child_added(id, ctx));
    }

    /// Append a node directly to a container's list, bypassing redirection.
    pub(crate) fn push_child(&mut self, container: NodeId, id: NodeId) {
        if let Some(c) = self.nodes.get_mut(container) {
            c.children.push(id);
        }
        if let Some(n) = self.nodes.get_mut(id) {
            n.actual_parent = Some(container);
        }
    }

    /// Remove a node from its container list and clear any role it plays
    /// for its logical parent.
    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let (parent, actual) = (node.parent, node.actual_parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            if p.inner_panel == Some(id) {
                p.inner_panel = None;
            }
            if p.tooltip == Some(id) {
                p.tooltip = None;
            }
        }
        if let Some(a) = actual {
            if let Some(container) = self.nodes.get_mut(a) {
                container.children.retain(|c| *c != id);
            }
            if let Some(n) = self.nodes.get_mut(id) {
                n.actual_parent = None;
            }
            self.invalidate(a);
            self.redraw(a);
            self.notify(a, |w, ctx| w.on_child_removed(id, ctx));
        }
        if let Some(p) = parent
            && parent != actual
        {
            self.invalidate(p);
            self.notify(p, |w, ctx| w.on_child_removed(id, ctx));
        }
    }

    /// Redirect children added to `owner` into `panel`, which must already
    /// be a direct child of `owner`. Existing ordinary children migrate into
    /// the panel; the tooltip stays with the owner.
    pub fn set_inner_panel(&mut self, owner: NodeId, panel: NodeId) -> Result<()> {
        let o = self.node(owner)?;
        if !o.children.contains(&panel) {
            return Err(Error::InvalidInnerPanel { owner, panel });
        }
        let tooltip = o.tooltip;
        let movers: Vec<NodeId> = o
            .children
            .iter()
            .copied()
            .filter(|c| *c != panel && Some(*c) != tooltip)
            .collect();
        let target = self.container_for(panel);
        self.node_mut(owner)?.children.retain(|c| !movers.contains(c));
        for m in &movers {
            self.push_child(target, *m);
        }
        self.node_mut(owner)?.inner_panel = Some(panel);
        trace!(?owner, ?panel, moved = movers.len(), "set_inner_panel");
        self.invalidate(owner);
        self.invalidate(target);
        self.redraw(target);
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Logical children: the inner panel's children when one is set,
    /// otherwise the literal list.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        let target = self.container_for(id);
        self.nodes
            .get(target)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// The literal child list, including any inner panel and tooltip.
    pub fn direct_children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of logical children.
    pub fn num_children(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Logical child by index.
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Is `child` logically parented to `id`?
    pub fn is_child(&self, id: NodeId, child: NodeId) -> bool {
        self.nodes.get(child).and_then(|n| n.parent) == Some(id)
    }

    /// Depth-first search of the literal child lists for a name. With
    /// `recursive`, a child's whole subtree is searched before its next
    /// sibling.
    pub fn find_child_by_name(&self, id: NodeId, name: &str, recursive: bool) -> Option<NodeId> {
        for child in self.direct_children(id) {
            if self.nodes.get(*child).is_some_and(|n| n.name == name) {
                return Some(*child);
            }
            if recursive && let Some(found) = self.find_child_by_name(*child, name, true) {
                return Some(found);
            }
        }
        None
    }

    /// All children with a name, in depth-first order when `deep`.
    pub fn named_children(&self, id: NodeId, name: &str, deep: bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_named(id, name, deep, &mut out);
        out
    }

    /// Accumulate named children into `out`.
    fn collect_named(&self, id: NodeId, name: &str, deep: bool, out: &mut Vec<NodeId>) {
        for child in self.direct_children(id) {
            if self
                .nodes
                .get(*child)
                .is_some_and(|n| !n.name.is_empty() && n.name == name)
            {
                out.push(*child);
            }
            if deep {
                self.collect_named(*child, name, true, out);
            }
        }
    }

    /// Widget value of the first recursive match for a name, or an empty
    /// string.
    pub fn child_value(&self, id: NodeId, name: &str) -> String {
        self.find_child_by_name(id, name, true)
            .and_then(|c| self.nodes.get(c))
            .and_then(|n| n.widget.as_deref())
            .map(|w| w.value())
            .unwrap_or_default()
    }

    /// Move a node to the back of its container's z-order.
    pub fn send_to_back(&mut self, id: NodeId) -> Result<()> {
        let Some(actual) = self.node(id)?.actual_parent else {
            return Ok(());
        };
        let list = &mut self.node_mut(actual)?.children;
        if list.first() == Some(&id) {
            return Ok(());
        }
        list.retain(|c| *c != id);
        list.insert(0, id);
        self.invalidate(actual);
        self.redraw(actual);
        Ok(())
    }

    /// Move a node to the front of its container's z-order.
    pub fn bring_to_front(&mut self, id: NodeId) -> Result<()> {
        let Some(actual) = self.node(id)?.actual_parent else {
            return Ok(());
        };
        let list = &mut self.node_mut(actual)?.children;
        if list.last() == Some(&id) {
            return Ok(());
        }
        list.retain(|c| *c != id);
        list.push(id);
        self.invalidate(actual);
        self.redraw(id);
        Ok(())
    }

    /// Move a node directly behind or in front of a sibling. A sibling not
    /// in the same container list moves the node to the front.
    pub fn bring_next_to_control(&mut self, id: NodeId, sibling: NodeId, behind: bool) -> Result<()> {
        let Some(actual) = self.node(id)?.actual_parent else {
            return Ok(());
        };
        let list = &mut self.node_mut(actual)?.children;
        list.retain(|c| *c != id);
        match list.iter().position(|c| *c == sibling) {
            Some(pos) if behind => list.insert(pos, id),
            Some(pos) => list.insert(pos + 1, id),
            None => list.push(id),
        }
        self.invalidate(actual);
        self.redraw(actual);
        Ok(())
    }

    /// Is the node the topmost entry of its container's list?
    pub fn is_on_top(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.actual_parent)
            .and_then(|a| self.nodes.get(a))
            .is_some_and(|a| a.children.last() == Some(&id))
    }

    /// Notify every logical ancestor that a descendant was touched.
    pub fn touch(&mut self, id: NodeId) {
        let mut current = id;
        while let Some(parent) = self.nodes.get(current).and_then(|n| n.parent) {
            self.notify(parent, |w, ctx| w.on_child_touched(current, ctx));
            current = parent;
        }
    }

    /// Queue a node for destruction at the start of the next frame.
    pub fn delayed_delete(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::CannotRemoveRoot);
        }
        self.node(id)?;
        if !self.delayed_delete.contains(&id) {
            self.delayed_delete.push(id);
        }
        Ok(())
    }

    /// Destroy every queued node that still exists.
    pub fn process_delayed_deletes(&mut self) -> Result<()> {
        for id in mem::take(&mut self.delayed_delete) {
            if self.contains(id) {
                self.destroy(id)?;
            }
        }
        Ok(())
    }

    /// Destroy a node and its whole subtree.
    ///
    /// Every node in the subtree gets its `pre_delete` hook while the tree
    /// is still intact. The subtree is then detached, global references and
    /// subsystem registrations are cleared, and nodes are freed children
    /// first. No focus or hover callbacks fire for destroyed nodes.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::CannotRemoveRoot);
        }
        self.node(id)?;
        let subtree = self.subtree_pre_order(id);
        debug!(?id, count = subtree.len(), "destroy");

        self.delayed_delete.retain(|d| !subtree.contains(d));
        for n in &subtree {
            self.notify(*n, |w, ctx| w.pre_delete(ctx));
        }
        self.release_cache_textures(&subtree);

        if self.contains(id) {
            self.set_parent(id, None)?;
        }
        for n in self.subtree_post_order(id) {
            self.forget(n);
            self.nodes.remove(n);
        }
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Clear every canvas-level reference to a node.
    fn forget(&mut self, id: NodeId) {
        for slot in [
            &mut self.hovered,
            &mut self.keyboard_focus,
            &mut self.mouse_focus,
            &mut self.first_tab,
            &mut self.next_tab,
        ] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        self.dnd.control_deleted(id);
        self.tooltip.control_deleted(id);
        self.animations.cancel(id);
    }

    /// Release cache textures held for any cached node in a subtree.
    fn release_cache_textures(&mut self, subtree: &[NodeId]) {
        for n in subtree {
            if !self.nodes.get(*n).is_some_and(|node| node.cache_to_texture) {
                continue;
            }
            let Ok(skin) = self.resolve_skin(*n) else {
                continue;
            };
            if let Some(ctt) = self
                .skins
                .get_mut(skin)
                .and_then(|s| s.renderer().cache_to_texture())
            {
                ctt.release(*n);
            }
        }
    }
}
