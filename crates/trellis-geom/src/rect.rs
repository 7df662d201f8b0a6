use serde::{Deserialize, Serialize};

use super::{Dim, Point, Size};

/// A rectangle with a signed origin and a size.
///
/// Negative widths and heights are tolerated (layout can over-subtract margins
/// from a small container) and are treated as empty.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// One past the right-most column.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the bottom-most row.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Does this rect cover no pixels?
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Is the point inside the rectangle? The right and bottom edges are exclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Shift the rectangle by an offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// The overlap of two rectangles. Disjoint rectangles produce an empty
    /// rectangle positioned at the clamped origin.
    pub fn intersect(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        Self::new(x, y, (r - x).max(0), (b - y).max(0))
    }

    /// Position along an axis.
    pub fn pos(&self, dim: Dim) -> i32 {
        match dim {
            Dim::X => self.x,
            Dim::Y => self.y,
        }
    }

    /// Extent along an axis.
    pub fn extent(&self, dim: Dim) -> i32 {
        match dim {
            Dim::X => self.w,
            Dim::Y => self.h,
        }
    }
}

impl From<Size> for Rect {
    fn from(s: Size) -> Self {
        s.rect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 0, 5, 5));
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 5, 5);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn contains_excludes_far_edges() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(r.contains(Point::new(2, 2)));
        assert!(r.contains(Point::new(4, 4)));
        assert!(!r.contains(Point::new(5, 4)));
        assert!(!r.contains(Point::new(1, 3)));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-50i32..50, -50i32..50, 0i32..60, 0i32..60).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn intersection_is_contained_in_both(a in rect(), b in rect()) {
            let i = a.intersect(&b);
            prop_assert_eq!(i, b.intersect(&a));
            if !i.is_empty() {
                prop_assert!(i.x >= a.x && i.right() <= a.right());
                prop_assert!(i.y >= b.y && i.bottom() <= b.bottom());
            }
        }

        #[test]
        fn intersection_covers_shared_points(a in rect(), b in rect(), px in -50i32..110, py in -50i32..110) {
            let p = Point::new(px, py);
            prop_assert_eq!(a.contains(p) && b.contains(p), a.intersect(&b).contains(p));
        }
    }
}
