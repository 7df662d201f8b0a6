use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};
use tracing::warn;

use crate::{
    core::{canvas::Canvas, id::NodeId, node::Node},
    geom::{Dim, Edges, Rect},
};

/// Traverses a subtree and returns a plain-text description of every node:
/// kind, name, geometry, spacing, flags and dock. This is a debug function.
pub fn dump(canvas: &Canvas, root: NodeId) -> String {
    render(canvas, root, Buffer::no_color())
}

/// Like [`dump`], with ANSI colouring for terminal display.
pub fn dump_colored(canvas: &Canvas, root: NodeId) -> String {
    render(canvas, root, Buffer::ansi())
}

/// Run the dump into a buffer and collect it as a string.
fn render(canvas: &Canvas, root: NodeId, mut buffer: Buffer) -> String {
    if let Err(e) = dump_node(&mut buffer, canvas, root, 0) {
        warn!(?root, error = %e, "dump truncated");
    }
    String::from_utf8_lossy(buffer.as_slice()).into_owned()
}

/// One-line layout summary of a node along an axis.
pub fn info(canvas: &Canvas, id: NodeId, dim: Dim) -> String {
    let Some(node) = canvas.nodes.get(id) else {
        return format!("{id:?} <missing>");
    };
    format!(
        "{} '{}' {:?}: pos {} extent {} pref {} margin {}+{} pad {}+{} flag {} dock {:?}",
        canvas.kind_of(id),
        node.name,
        dim,
        node.bounds.pos(dim),
        node.bounds.extent(dim),
        node.preferred.get(dim),
        node.margin.leading(dim),
        node.margin.trailing(dim),
        node.padding.leading(dim),
        node.padding.trailing(dim),
        node.size_flags.get(dim),
        node.dock,
    )
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> io::Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")
}

/// Format a rectangle.
fn rect(r: Rect) -> String {
    format!("x: {}, y: {}, w: {}, h: {}", r.x, r.y, r.w, r.h)
}

/// Format edge insets.
fn edges(e: Edges) -> String {
    format!("l: {}, t: {}, r: {}, b: {}", e.left, e.top, e.right, e.bottom)
}

/// Status indicators for a node.
fn indicators(canvas: &Canvas, id: NodeId, node: &Node) -> Vec<(&'static str, Color)> {
    let mut out = Vec::new();
    if canvas.keyboard_focus == Some(id) {
        out.push(("FOCUSED", Color::Magenta));
    }
    if canvas.hovered == Some(id) {
        out.push(("hovered", Color::Blue));
    }
    if node.hidden {
        out.push(("hidden", Color::Yellow));
    }
    if node.disabled {
        out.push(("disabled", Color::Yellow));
    }
    if node.tabable {
        out.push(("tabable", Color::White));
    }
    if node.needs_layout {
        out.push(("needs-layout", Color::Red));
    }
    if node.cache_to_texture {
        out.push(("cached", Color::White));
    }
    out
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, canvas: &Canvas, id: NodeId, level: usize) -> io::Result<()> {
    let Some(node) = canvas.nodes.get(id) else {
        return Ok(());
    };
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{} : {}", canvas.kind_of(id), node.name)?;
    buffer.reset()?;

    let flags = indicators(canvas, id, node);
    for (i, (label, color)) in flags.iter().enumerate() {
        write!(buffer, "{}", if i == 0 { " " } else { ", " })?;
        buffer.set_color(ColorSpec::new().set_fg(Some(*color)))?;
        write!(buffer, "{label}")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    write_field(buffer, &indent, "bounds:", &rect(node.bounds))?;
    write_field(
        buffer,
        &indent,
        "preferred:",
        &format!("{} × {}", node.preferred.w, node.preferred.h),
    )?;
    write_field(buffer, &indent, "margin:", &edges(node.margin))?;
    write_field(buffer, &indent, "padding:", &edges(node.padding))?;
    write_field(
        buffer,
        &indent,
        "size:",
        &format!(
            "{} / {}",
            node.size_flags.horizontal, node.size_flags.vertical
        ),
    )?;
    write_field(buffer, &indent, "dock:", &format!("{:?}", node.dock))?;

    if !node.hidden {
        for child in &node.children {
            dump_node(buffer, canvas, *child, level + 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{error::Result, layout::Dock};

    #[test]
    fn dump_lists_subtree() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "alpha")?;
        c.set_dock(a, Dock::LEFT)?;
        let b = c.create(Some(a), "beta")?;
        c.hide(b)?;

        let out = dump(&c, root);
        assert!(out.contains("Base : canvas"));
        assert!(out.contains("    Base : alpha"));
        assert!(out.contains("beta hidden"));
        assert!(!out.contains('\u{1b}'));
        Ok(())
    }

    #[test]
    fn info_names_axis() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "alpha")?;
        let line = info(&c, a, Dim::Y);
        assert!(line.starts_with("Base 'alpha' Y"));
        Ok(())
    }
}
