//! Integration tests for docking layout.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use trellis::{
        Canvas, Dock, NodeId, Result,
        geom::{Edges, Point, Rect, Size, SizeFlag, SizeFlags},
        testing::{Harness, Recorder},
        widgets::Label,
    };

    /// Create a child with a fixed extent on one or both axes.
    fn fixed(
        c: &mut Canvas,
        parent: NodeId,
        name: &str,
        flags: SizeFlags,
        size: Size,
        dock: Dock,
    ) -> Result<NodeId> {
        let id = c.create(Some(parent), name)?;
        c.set_size_flags(id, flags)?;
        c.set_size(id, size.w, size.h)?;
        c.set_dock(id, dock)?;
        Ok(id)
    }

    /// Fixed width, expanding height.
    fn fixed_w() -> SizeFlags {
        SizeFlags::new(SizeFlag::Fixed, SizeFlag::Expand)
    }

    /// Expanding width, fixed height.
    fn fixed_h() -> SizeFlags {
        SizeFlags::new(SizeFlag::Expand, SizeFlag::Fixed)
    }

    #[test]
    fn left_docks_tile_and_fill_takes_rest() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();
        let a = fixed(c, root, "a", fixed_w(), Size::new(10, 1), Dock::LEFT)?;
        let b = fixed(c, root, "b", fixed_w(), Size::new(20, 1), Dock::LEFT)?;
        let d = fixed(c, root, "c", fixed_w(), Size::new(30, 1), Dock::LEFT)?;
        let f = c.create(Some(root), "f")?;
        c.set_dock(f, Dock::FILL)?;
        h.frame()?;

        let c = &h.canvas;
        assert_eq!(c.node(a)?.bounds(), Rect::new(0, 0, 10, 50));
        assert_eq!(c.node(b)?.bounds(), Rect::new(10, 0, 20, 50));
        assert_eq!(c.node(d)?.bounds(), Rect::new(30, 0, 30, 50));
        assert_eq!(c.node(f)?.bounds(), Rect::new(60, 0, 40, 50));
        assert_eq!(c.node(root)?.inner_bounds(), Rect::new(60, 0, 40, 50));
        Ok(())
    }

    #[test]
    fn top_and_bottom_respect_margins() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();
        let t = fixed(c, root, "t", fixed_h(), Size::new(1, 10), Dock::TOP)?;
        c.set_margin(t, Edges::new(2, 3, 4, 5))?;
        let bt = fixed(c, root, "bt", fixed_h(), Size::new(1, 10), Dock::BOTTOM)?;
        c.set_margin(bt, Edges::new(4, 0, 0, 0))?;
        let f = c.create(Some(root), "f")?;
        c.set_dock(f, Dock::FILL)?;
        h.frame()?;

        let c = &h.canvas;
        assert_eq!(c.node(t)?.bounds(), Rect::new(2, 3, 94, 10));
        assert_eq!(c.node(bt)?.bounds(), Rect::new(4, 40, 96, 10));
        assert_eq!(c.node(f)?.bounds(), Rect::new(0, 18, 100, 22));
        Ok(())
    }

    #[test]
    fn top_wins_over_left() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();
        let n = fixed(c, root, "n", fixed_h(), Size::new(1, 10), Dock::TOP | Dock::LEFT)?;
        h.frame()?;
        assert_eq!(h.canvas.node(n)?.bounds(), Rect::new(0, 0, 100, 10));
        Ok(())
    }

    #[test]
    fn padding_shrinks_inner_rect() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();
        c.set_padding(root, Edges::all(5))?;
        let f = c.create(Some(root), "f")?;
        c.set_dock(f, Dock::FILL)?;
        h.frame()?;
        assert_eq!(h.canvas.node(f)?.bounds(), Rect::new(5, 5, 90, 40));
        assert_eq!(h.canvas.node(root)?.inner_bounds(), Rect::new(5, 5, 90, 40));
        Ok(())
    }

    #[test]
    fn hidden_children_take_no_space() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();
        let a = fixed(c, root, "a", fixed_w(), Size::new(10, 1), Dock::LEFT)?;
        c.hide(a)?;
        let f = c.create(Some(root), "f")?;
        c.set_dock(f, Dock::FILL)?;
        h.frame()?;
        assert_eq!(h.canvas.node(f)?.bounds(), Rect::new(0, 0, 100, 50));
        Ok(())
    }

    #[test]
    fn centre_docks_centre_in_remaining_space() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();
        let n = c.create(Some(root), "n")?;
        c.set_bounds(n, Rect::new(0, 0, 20, 10))?;
        c.set_dock(n, Dock::CENTER)?;
        h.frame()?;
        assert_eq!(h.canvas.node(n)?.bounds(), Rect::new(40, 20, 20, 10));
        Ok(())
    }

    #[test]
    fn size_flags_shape_preferred_size() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();

        let tall = c.create(Some(root), "tall")?;
        c.set_size_flags(tall, SizeFlags::new(SizeFlag::Fixed, SizeFlag::Bloat))?;
        c.set_minimum_size(tall, Size::new(0, 30))?;
        c.set_size(tall, 7, 1)?;
        c.set_dock(tall, Dock::TOP)?;

        let grow = c.create(Some(root), "grow")?;
        c.set_minimum_size(grow, Size::new(30, 0))?;
        c.set_dock(grow, Dock::LEFT)?;

        let shrink = c.create(Some(root), "shrink")?;
        c.set_size_flags(shrink, SizeFlags::new(SizeFlag::Shrink, SizeFlag::Expand))?;
        c.set_maximum_size(shrink, Size::new(5, 100))?;
        c.set_dock(shrink, Dock::LEFT)?;
        let wide = c.create(Some(shrink), "wide")?;
        c.set_size_flags(wide, SizeFlags::both(SizeFlag::Fixed))?;
        c.set_bounds(wide, Rect::new(0, 0, 20, 5))?;

        let text = c.create_with(Some(root), "text", Label::new("hello"))?;
        c.set_dock(text, Dock::LEFT)?;

        h.frame()?;

        let c = &h.canvas;
        assert_eq!(c.node(tall)?.bounds(), Rect::new(0, 0, 7, 30));
        assert_eq!(c.node(grow)?.bounds(), Rect::new(0, 30, 30, 20));
        assert_eq!(c.node(shrink)?.bounds(), Rect::new(30, 30, 5, 20));
        assert_eq!(c.node(text)?.bounds(), Rect::new(35, 30, 5, 20));
        Ok(())
    }

    #[test]
    fn layout_hook_runs_once_per_invalidation() -> Result<()> {
        let mut h = Harness::new(40, 40)?;
        let root = h.canvas.root();
        let recorder = Recorder::new();
        let log = recorder.log();
        let p = h.canvas.create_with(Some(root), "p", recorder)?;
        h.canvas.set_dock(p, Dock::FILL)?;
        h.canvas.set_bounds(p, Rect::new(0, 0, 40, 40))?;

        h.frame()?;
        assert_eq!(log.count("layout"), 1);
        assert!(!h.canvas.node(p)?.needs_layout());
        h.frame()?;
        assert_eq!(log.count("layout"), 1);
        assert_eq!(log.count("post_layout"), 2);

        h.canvas.invalidate(p);
        h.frame()?;
        assert_eq!(log.count("layout"), 2);
        Ok(())
    }

    #[test]
    fn size_to_children_encloses_visible_children() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let p = c.create(Some(root), "p")?;
        c.set_padding(p, Edges::new(1, 1, 2, 2))?;
        let a = c.create(Some(p), "a")?;
        c.set_bounds(a, Rect::new(0, 0, 10, 10))?;
        let b = c.create(Some(p), "b")?;
        c.set_bounds(b, Rect::new(20, 5, 10, 10))?;
        c.set_margin(b, Edges::new(0, 0, 3, 0))?;

        assert_eq!(c.children_size(p), Size::new(33, 15));
        assert!(c.size_to_children(p, true, true)?);
        assert_eq!(c.node(p)?.bounds().size(), Size::new(35, 17));

        c.hide(b)?;
        assert_eq!(c.children_size(p), Size::new(10, 10));
        c.set_include_in_size(a, false)?;
        assert_eq!(c.children_size(p), Size::new(0, 0));
        Ok(())
    }

    #[test]
    fn inner_panel_children_lay_out_inside_panel() -> Result<()> {
        let mut h = Harness::new(100, 50)?;
        let c = &mut h.canvas;
        let root = c.root();
        let owner = c.create(Some(root), "owner")?;
        c.set_dock(owner, Dock::FILL)?;
        c.set_padding(owner, Edges::all(4))?;
        let panel = c.create(Some(owner), "panel")?;
        c.set_dock(panel, Dock::FILL)?;
        c.set_inner_panel(owner, panel)?;
        let a = fixed(c, owner, "a", fixed_w(), Size::new(10, 1), Dock::LEFT)?;
        h.frame()?;

        let c = &h.canvas;
        assert_eq!(c.node(a)?.actual_parent(), Some(panel));
        assert_eq!(c.node(panel)?.bounds(), Rect::new(4, 4, 92, 42));
        assert_eq!(c.node(a)?.bounds(), Rect::new(0, 0, 10, 42));
        assert_eq!(c.local_pos_to_canvas(a, Point::new(1, 1)), Point::new(5, 5));
        Ok(())
    }

    proptest! {
        #[test]
        fn canvas_coordinates_round_trip(
            ox in -50i32..50, oy in -50i32..50,
            px in -50i32..50, py in -50i32..50,
            lx in -50i32..50, ly in -50i32..50,
            x in -200i32..200, y in -200i32..200,
        ) {
            let mut c = Canvas::new();
            let root = c.root();
            let run = |c: &mut Canvas| -> Result<(NodeId, Point)> {
                let owner = c.create(Some(root), "owner")?;
                c.set_pos(owner, ox, oy)?;
                let panel = c.create(Some(owner), "panel")?;
                c.set_pos(panel, px, py)?;
                c.set_inner_panel(owner, panel)?;
                let leaf = c.create(Some(owner), "leaf")?;
                c.set_pos(leaf, lx, ly)?;
                Ok((leaf, Point::new(ox + px + lx, oy + py + ly)))
            };
            let (leaf, origin) = run(&mut c).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let p = Point::new(x, y);
            prop_assert_eq!(c.local_pos_to_canvas(leaf, Point::zero()), origin);
            prop_assert_eq!(c.canvas_pos_to_local(leaf, c.local_pos_to_canvas(leaf, p)), p);
        }
    }
}
