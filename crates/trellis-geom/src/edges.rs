use serde::{Deserialize, Serialize};

use super::Dim;

/// Spacing on the four sides of a rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edges {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

/// Space reserved around a control, between it and its siblings or container.
pub type Margin = Edges;

/// Space reserved inside a control for its children.
pub type Padding = Edges;

impl Edges {
    /// Construct edges in left, top, right, bottom order.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same spacing on every side.
    pub fn all(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Total horizontal spacing.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical spacing.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// The leading edge along an axis (left or top).
    pub fn leading(&self, dim: Dim) -> i32 {
        match dim {
            Dim::X => self.left,
            Dim::Y => self.top,
        }
    }

    /// The trailing edge along an axis (right or bottom).
    pub fn trailing(&self, dim: Dim) -> i32 {
        match dim {
            Dim::X => self.right,
            Dim::Y => self.bottom,
        }
    }

    /// Total spacing along an axis.
    pub fn sum(&self, dim: Dim) -> i32 {
        self.leading(dim) + self.trailing(dim)
    }
}
