//! Integration tests for tree shape and lifetime.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use trellis::{
        Canvas, Error, FocusManager, NodeId, Result,
        geom::{Point, Rect},
        testing::{Harness, HookLog, Recorder},
    };

    /// Snapshot of every node's literal child list.
    fn shape(c: &Canvas, nodes: &[NodeId]) -> Vec<Vec<NodeId>> {
        nodes.iter().map(|n| c.direct_children(*n).to_vec()).collect()
    }

    /// Check the parent/child links agree and no parent chain loops.
    fn assert_consistent(c: &Canvas, nodes: &[NodeId]) -> Result<()> {
        for n in nodes {
            let node = c.node(*n)?;
            if let Some(actual) = node.actual_parent() {
                let count = c.direct_children(actual).iter().filter(|x| *x == n).count();
                assert_eq!(count, 1);
            }
            assert_eq!(node.parent().is_some(), node.actual_parent().is_some());
            let mut steps = 0;
            let mut cur = node.parent();
            while let Some(p) = cur {
                steps += 1;
                assert!(steps <= nodes.len() + 1, "parent chain loops");
                cur = c.node(p)?.parent();
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn reparenting_keeps_links_consistent(
            ops in prop::collection::vec((0usize..6, prop::option::of(0usize..7)), 1..40)
        ) {
            let mut c = Canvas::new();
            let root = c.root();
            let mut nodes = vec![root];
            for i in 0..6 {
                nodes.push(c.create(Some(root), &format!("n{i}")).map_err(|e| TestCaseError::fail(e.to_string()))?);
            }
            for (child, parent) in ops {
                let child = nodes[child + 1];
                let parent = parent.map(|p| nodes[p]);
                match c.set_parent(child, parent) {
                    Ok(()) => {
                        let before = shape(&c, &nodes);
                        c.set_parent(child, parent).map_err(|e| TestCaseError::fail(e.to_string()))?;
                        prop_assert_eq!(before, shape(&c, &nodes));
                        prop_assert_eq!(c.node(child).map_err(|e| TestCaseError::fail(e.to_string()))?.parent(), parent);
                    }
                    Err(Error::WouldCreateCycle { .. }) => {}
                    Err(e) => return Err(TestCaseError::fail(e.to_string())),
                }
                assert_consistent(&c, &nodes).map_err(|e| TestCaseError::fail(e.to_string()))?;
            }
        }
    }

    #[test]
    fn destroying_focus_holder_clears_globals() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        c.set_bounds(root, Rect::new(0, 0, 50, 50))?;
        let panel = c.create(Some(root), "panel")?;
        c.set_bounds(panel, Rect::new(0, 0, 50, 50))?;
        let leaf = c.create(Some(panel), "leaf")?;
        c.set_bounds(leaf, Rect::new(0, 0, 20, 20))?;

        c.focus(leaf);
        c.mouse_moved(Point::new(5, 5));
        c.set_mouse_focus(Some(leaf));
        assert_eq!(c.hovered(), Some(leaf));

        c.destroy(panel)?;
        assert!(!c.contains(leaf));
        assert_eq!(c.keyboard_focus(), None);
        assert_eq!(c.hovered(), None);
        assert_eq!(c.mouse_focus(), None);
        assert_eq!(c.len(), 1);
        Ok(())
    }

    #[test]
    fn destroy_notifies_whole_subtree_first() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let log = HookLog::default();
        let top = c.create_with(Some(root), "top", Recorder::with_log(&log))?;
        let mid = c.create_with(Some(top), "mid", Recorder::with_log(&log))?;
        c.create_with(Some(mid), "low", Recorder::with_log(&log))?;
        log.clear();

        c.destroy(top)?;
        let events = log.events();
        assert_eq!(events[..3], ["pre_delete", "pre_delete", "pre_delete"]);
        assert_eq!(c.len(), 1);
        Ok(())
    }

    #[test]
    fn delayed_delete_waits_for_think() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "a")?;
        c.delayed_delete(a)?;
        c.delayed_delete(a)?;
        assert!(c.contains(a));
        assert_eq!(c.delayed_delete(root), Err(Error::CannotRemoveRoot));
        c.process_delayed_deletes()?;
        assert!(!c.contains(a));
        Ok(())
    }

    #[test]
    fn touch_reaches_every_ancestor() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let log = HookLog::default();
        let top = c.create_with(Some(root), "top", Recorder::with_log(&log))?;
        let mid = c.create_with(Some(top), "mid", Recorder::with_log(&log))?;
        let low = c.create(Some(mid), "low")?;
        log.clear();

        c.touch(low);
        assert_eq!(log.count("child_touched"), 2);
        Ok(())
    }

    #[test]
    fn child_value_reads_first_match() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let box_ = c.create(Some(root), "box")?;
        let mut recorder = Recorder::new();
        recorder.value = "42".into();
        c.create_with(Some(box_), "answer", recorder)?;
        assert_eq!(c.child_value(root, "answer"), "42");
        assert_eq!(c.child_value(root, "missing"), "");
        Ok(())
    }

    #[test]
    fn focus_after_destroying_holder_skips_dead_node() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let held = Recorder::new();
        let held_log = held.log();
        let held = c.create_with(Some(root), "held", held)?;
        let sibling = Recorder::new();
        let sibling_log = sibling.log();
        let sibling = c.create_with(Some(root), "sibling", sibling)?;

        assert!(c.focus(held));
        c.destroy(held)?;
        assert_eq!(c.keyboard_focus(), None);

        assert!(c.focus(sibling));
        assert_eq!(c.keyboard_focus(), Some(sibling));
        assert_eq!(held_log.count("blur"), 0);
        assert_eq!(sibling_log.events(), ["focus"]);
        Ok(())
    }

    #[test]
    fn reparent_away_and_back_relays_out_parent() -> Result<()> {
        let mut h = Harness::new(40, 40)?;
        let root = h.canvas.root();
        let a = h.canvas.create(Some(root), "a")?;
        let b = h.canvas.create(Some(root), "b")?;
        let n = h.canvas.create(Some(a), "n")?;
        h.frame()?;
        assert!(!h.canvas.node(a)?.needs_layout());

        h.canvas.set_parent(n, Some(b))?;
        h.canvas.set_parent(n, Some(a))?;
        assert!(h.canvas.node(a)?.needs_layout());
        assert_eq!(h.canvas.direct_children(a), [n]);
        assert!(h.canvas.direct_children(b).is_empty());
        assert_eq!(h.canvas.node(n)?.parent(), Some(a));
        Ok(())
    }
}
