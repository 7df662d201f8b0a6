//! Grid test utility for building recursive docked layouts.

use crate::{
    core::{canvas::Canvas, error::Result, id::NodeId, layout::Dock},
    geom::{Point, Rect, Size, SizeFlag, SizeFlags},
    widgets::Panel,
};

/// Side of a leaf cell.
const CELL: i32 = 10;

/// A square grid of fixed 10×10 cells. Each level is a container of rows
/// docked to the top, each row holding sub-containers docked to the left.
pub struct Grid {
    /// Outermost container.
    pub root: NodeId,
    /// Recursion depth.
    recursion: usize,
    /// Number of subdivisions per level.
    divisions: usize,
}

impl Grid {
    /// Build a grid under a parent with the given recursion levels and
    /// subdivisions per level. The outermost container is fixed to the
    /// grid's full size at the origin.
    pub fn install(
        canvas: &mut Canvas,
        parent: NodeId,
        recursion: usize,
        divisions: usize,
    ) -> Result<Self> {
        let root = build_node(canvas, parent, 0, 0, recursion, divisions)?;
        let grid = Self {
            root,
            recursion,
            divisions,
        };
        let size = grid.expected_size();
        canvas.set_size_flags(root, SizeFlags::both(SizeFlag::Fixed))?;
        canvas.set_bounds(root, Rect::new(0, 0, size.w, size.h))?;
        Ok(grid)
    }

    /// Cells along one side.
    pub fn cells_per_side(&self) -> usize {
        self.divisions.pow(self.recursion as u32)
    }

    /// Get the expected grid size in units.
    pub fn expected_size(&self) -> Size {
        let side = self.cells_per_side() as i32 * CELL;
        Size::new(side, side)
    }

    /// Name of the topmost control at a point local to the grid.
    pub fn find_leaf_at(&self, canvas: &Canvas, x: i32, y: i32) -> Option<String> {
        let id = canvas.control_at(self.root, Point::new(x, y), false)?;
        let name = canvas.node(id).ok()?.name();
        name.starts_with("cell_").then(|| name.to_string())
    }
}

/// Recursively build grid nodes under a parent.
fn build_node(
    canvas: &mut Canvas,
    parent: NodeId,
    x: usize,
    y: usize,
    recursion: usize,
    divisions: usize,
) -> Result<NodeId> {
    if recursion == 0 {
        let cell = canvas.create_with(Some(parent), &format!("cell_{x}_{y}"), Panel)?;
        canvas.set_size_flags(cell, SizeFlags::both(SizeFlag::Fixed))?;
        canvas.set_size(cell, CELL, CELL)?;
        return Ok(cell);
    }

    let container = canvas.create(Some(parent), &format!("container_{x}_{y}"))?;
    let child_scale = divisions.pow((recursion - 1) as u32);
    for row in 0..divisions {
        let row_node = canvas.create(Some(container), &format!("row_{x}_{y}_{row}"))?;
        canvas.set_dock(row_node, Dock::TOP)?;
        for col in 0..divisions {
            let child = build_node(
                canvas,
                row_node,
                x + col * child_scale,
                y + row * child_scale,
                recursion - 1,
                divisions,
            )?;
            canvas.set_dock(child, Dock::LEFT)?;
        }
    }
    Ok(container)
}
