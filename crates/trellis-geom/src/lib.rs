//! Geometry primitives used across trellis.
//!
//! All coordinates are signed: child positions are relative to their
//! container, and hit-testing routinely produces negative local points.

#![warn(missing_docs)]

/// Margin and padding edges.
mod edges;
/// Signed point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;
/// Per-axis sizing policies.
mod sizeflag;

pub use edges::{Edges, Margin, Padding};
pub use point::Point;
pub use rect::Rect;
pub use size::Size;
pub use sizeflag::{SizeFlag, SizeFlags};

/// A layout axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Dim {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}
