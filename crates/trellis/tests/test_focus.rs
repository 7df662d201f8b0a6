//! Integration tests for focus, tab order and input routing.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use trellis::{
        Canvas, Config, Dock, FocusManager, Key, NodeId, Result,
        event::{HOVER_ENTER, HOVER_LEAVE},
        geom::{Point, Rect},
        node::CursorType,
        testing::{Harness, Recorder},
    };

    /// Three tabable controls stacked from the top.
    fn tab_row(h: &mut Harness) -> Result<[NodeId; 3]> {
        let c = &mut h.canvas;
        let root = c.root();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let id = c.create(Some(root), name)?;
            c.set_dock(id, Dock::TOP)?;
            c.set_tabable(id, true)?;
            ids.push(id);
        }
        Ok([ids[0], ids[1], ids[2]])
    }

    #[test]
    fn tab_walks_chain_and_wraps() -> Result<()> {
        let mut h = Harness::new(40, 40)?;
        let [a, b, c] = tab_row(&mut h)?;
        h.frame()?;
        assert_eq!(h.canvas.first_tab(), Some(a));
        assert_eq!(h.canvas.next_tab(), Some(a));

        for expected in [a, b, c, a] {
            assert!(h.canvas.key_press(Key::Tab, true));
            assert_eq!(h.canvas.keyboard_focus(), Some(expected));
            h.frame()?;
        }
        Ok(())
    }

    #[test]
    fn tab_skips_disabled_and_untabable() -> Result<()> {
        let mut h = Harness::new(40, 40)?;
        let [a, b, c] = tab_row(&mut h)?;
        h.canvas.set_disabled(b, true)?;
        h.canvas.focus(a);
        h.frame()?;
        assert_eq!(h.canvas.next_tab(), Some(c));

        h.canvas.set_disabled(b, false)?;
        h.canvas.set_tabable(b, false)?;
        h.frame()?;
        assert_eq!(h.canvas.next_tab(), Some(c));
        Ok(())
    }

    #[test]
    fn tab_without_wrap_stops_at_end() -> Result<()> {
        let config = Config {
            tab_wraps: false,
            ..Config::default()
        };
        let mut h = Harness::with_config(config, 40, 40)?;
        let [_, _, c] = tab_row(&mut h)?;
        h.canvas.focus(c);
        h.frame()?;
        assert_eq!(h.canvas.next_tab(), None);
        assert!(h.canvas.key_press(Key::Tab, true));
        assert_eq!(h.canvas.keyboard_focus(), Some(c));
        Ok(())
    }

    #[test]
    fn tab_release_does_not_move_focus() -> Result<()> {
        let mut h = Harness::new(40, 40)?;
        let [a, _, _] = tab_row(&mut h)?;
        h.frame()?;
        assert!(h.canvas.key_release(Key::Tab));
        assert_eq!(h.canvas.keyboard_focus(), None);
        assert!(h.canvas.key_press(Key::Tab, true));
        assert_eq!(h.canvas.keyboard_focus(), Some(a));
        Ok(())
    }

    #[test]
    fn focus_change_notifies_both_sides() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let pa = Recorder::new();
        let (la, a) = (pa.log(), c.create_with(Some(root), "a", pa)?);
        let pb = Recorder::new();
        let (lb, b) = (pb.log(), c.create_with(Some(root), "b", pb)?);

        c.focus(a);
        c.focus(b);
        assert_eq!(la.events(), ["focus", "blur"]);
        assert_eq!(lb.events(), ["focus"]);
        assert!(c.has_focus(b));
        Ok(())
    }

    #[test]
    fn unhandled_keys_bubble_to_parents() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let mut outer = Recorder::new();
        outer.handles_keys = vec![Key::Char('x')];
        let outer_log = outer.log();
        let outer = c.create_with(Some(root), "outer", outer)?;
        let inner = Recorder::new();
        let inner_log = inner.log();
        let inner = c.create_with(Some(outer), "inner", inner)?;

        assert!(!c.key_press(Key::Char('x'), true));
        assert_eq!(outer_log.count("key"), 0);

        c.focus(inner);
        assert!(c.key_press(Key::Char('x'), true));
        assert_eq!(inner_log.count("key"), 1);
        assert_eq!(outer_log.count("key"), 1);

        assert!(!c.key_press(Key::Char('y'), true));
        assert_eq!(outer_log.count("key"), 2);
        Ok(())
    }

    #[test]
    fn widget_can_claim_tab() -> Result<()> {
        let mut h = Harness::new(40, 40)?;
        let root = h.canvas.root();
        let mut editor = Recorder::new();
        editor.handles_keys = vec![Key::Tab];
        let editor = h.canvas.create_with(Some(root), "editor", editor)?;
        h.canvas.set_tabable(editor, true)?;
        let other = h.canvas.create(Some(root), "other")?;
        h.canvas.set_tabable(other, true)?;
        h.canvas.focus(editor);
        h.frame()?;

        assert_eq!(h.canvas.next_tab(), Some(other));
        assert!(h.canvas.key_press(Key::Tab, true));
        assert_eq!(h.canvas.keyboard_focus(), Some(editor));
        Ok(())
    }

    #[test]
    fn accelerators_respect_focus_restriction() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let mut guarded = Recorder::new();
        guarded.accel_only_focus = true;
        let guarded_log = guarded.log();
        let guarded = c.create_with(Some(root), "guarded", guarded)?;
        let open = Recorder::new();
        let open_log = open.log();
        let open = c.create_with(Some(root), "open", open)?;
        c.add_default_accelerator(guarded, "Ctrl+S")?;
        c.add_default_accelerator(open, "ctrl + s")?;
        assert!(c.has_accelerator(open, "CTRL+S"));

        assert!(c.handle_accelerator(root, "ctrl+s"));
        assert_eq!(guarded_log.count("accelerate"), 0);
        assert_eq!(open_log.count("accelerate"), 1);

        c.focus(guarded);
        assert!(c.handle_accelerator(root, "Ctrl+S"));
        assert_eq!(guarded_log.count("accelerate"), 1);
        assert_eq!(open_log.count("accelerate"), 1);

        assert!(!c.handle_accelerator(root, "ctrl+q"));
        Ok(())
    }

    #[test]
    fn hover_events_fire_on_enter_and_leave() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        c.set_bounds(root, Rect::new(0, 0, 100, 100))?;
        let a = c.create(Some(root), "a")?;
        c.set_bounds(a, Rect::new(0, 0, 50, 50))?;

        let seen = Rc::new(RefCell::new(Vec::new()));
        for event in [HOVER_ENTER, HOVER_LEAVE] {
            let seen = seen.clone();
            c.on(a, event, root, move |_, fired| {
                seen.borrow_mut().push((event, fired.source));
            })?;
        }

        c.mouse_moved(Point::new(10, 10));
        c.mouse_moved(Point::new(20, 20));
        c.mouse_moved(Point::new(70, 70));
        assert_eq!(*seen.borrow(), [(HOVER_ENTER, a), (HOVER_LEAVE, a)]);
        assert_eq!(c.hovered(), Some(root));
        Ok(())
    }

    #[test]
    fn mouse_capture_pins_hover() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        c.set_bounds(root, Rect::new(0, 0, 100, 100))?;
        let a = c.create(Some(root), "a")?;
        c.set_bounds(a, Rect::new(0, 0, 50, 50))?;
        let b = c.create(Some(root), "b")?;
        c.set_bounds(b, Rect::new(50, 50, 50, 50))?;

        c.set_mouse_focus(Some(a));
        assert_eq!(c.mouse_moved(Point::new(70, 70)), Some(a));
        c.set_mouse_focus(None);
        assert_eq!(c.mouse_moved(Point::new(70, 70)), Some(b));
        Ok(())
    }

    #[test]
    fn wheel_bubbles_until_handled() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        c.set_bounds(root, Rect::new(0, 0, 100, 100))?;
        let mut outer = Recorder::new();
        outer.handles_wheel = true;
        let outer_log = outer.log();
        let outer = c.create_with(Some(root), "outer", outer)?;
        c.set_bounds(outer, Rect::new(0, 0, 50, 50))?;
        let inner = Recorder::new();
        let inner_log = inner.log();
        let inner = c.create_with(Some(outer), "inner", inner)?;
        c.set_bounds(inner, Rect::new(0, 0, 20, 20))?;

        assert!(!c.mouse_wheeled(1));
        c.mouse_moved(Point::new(5, 5));
        assert_eq!(c.hovered(), Some(inner));
        assert!(c.mouse_wheeled(-1));
        assert_eq!(inner_log.count("wheel"), 1);
        assert_eq!(outer_log.count("wheel"), 1);

        c.mouse_moved(Point::new(80, 80));
        assert!(!c.mouse_wheeled(1));
        Ok(())
    }

    #[test]
    fn hovered_node_publishes_its_cursor() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        c.set_bounds(root, Rect::new(0, 0, 100, 100))?;
        let a = c.create(Some(root), "a")?;
        c.set_bounds(a, Rect::new(0, 0, 50, 50))?;
        c.set_cursor(a, CursorType::Beam)?;

        assert_eq!(c.requested_cursor(), CursorType::Normal);
        c.mouse_moved(Point::new(10, 10));
        assert_eq!(c.requested_cursor(), CursorType::Beam);
        c.mouse_moved(Point::new(70, 70));
        assert_eq!(c.requested_cursor(), CursorType::Normal);
        Ok(())
    }
}
