use serde::{Deserialize, Serialize};

use super::{Dim, Point, Rect};

/// A `Size` is a rectangle that has a width and height but no location.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Size {
    /// Construct a size from a width and height.
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// The extent along an axis.
    pub fn get(&self, dim: Dim) -> i32 {
        match dim {
            Dim::X => self.w,
            Dim::Y => self.h,
        }
    }

    /// Set the extent along an axis.
    pub fn set(&mut self, dim: Dim, v: i32) {
        match dim {
            Dim::X => self.w = v,
            Dim::Y => self.h = v,
        }
    }

    /// Return a `Rect` with the same dimensions, located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.w, self.h)
    }

    /// True if this size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(i32, i32)> for Size {
    fn from(v: (i32, i32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

impl From<Point> for Size {
    fn from(p: Point) -> Self {
        Self { w: p.x, h: p.y }
    }
}
