//! Integer geometry shared by logical and device space.
//!
//! `Point`, `Size` and `Rect` carry no unit; callers decide whether a value
//! is logical (world) or device space. Conversions between the two live in
//! [`crate::xform`].

use std::ops::{Add, AddAssign, Sub};

/// A position in logical or device space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a measured run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a size of `width` x `height`.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An edge-based rectangle: `left..right` by `top..bottom`.
///
/// Constructors never reorder edges. Call [`Rect::normalized`] after mapping
/// corners through a transform that may flip an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at `origin` extending by `size`. Far edges
    /// saturate at the `i32` range.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x.saturating_add(size.width),
            origin.y.saturating_add(size.height),
        )
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// True when the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Swap edges so that `left <= right` and `top <= bottom`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    /// Shift every edge by `(dx, dy)`, saturating.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }

    /// Overlap of two rectangles. Disjoint inputs give an empty rectangle
    /// at the origin.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let r = Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_empty() { Self::default() } else { r }
    }

    /// Whether `p` lies inside (right and bottom edges exclusive).
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Size};

    #[test]
    fn normalized_swaps_inverted_edges() {
        let r = Rect::new(10, 20, 0, 5).normalized();
        assert_eq!(r, Rect::new(0, 5, 10, 20));
    }

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 20, 20);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 10, 10));
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 30, 30);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn from_origin_size_round_trips_dimensions() {
        let r = Rect::from_origin_size(Point::new(3, 4), Size::new(7, 9));
        assert_eq!(r.width(), 7);
        assert_eq!(r.height(), 9);
        assert_eq!(r.origin(), Point::new(3, 4));
    }

    #[test]
    fn contains_excludes_far_edges() {
        let r = Rect::new(0, 0, 4, 4);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(3, 3)));
        assert!(!r.contains(Point::new(4, 3)));
        assert!(!r.contains(Point::new(3, 4)));
    }

    #[test]
    fn far_edges_saturate() {
        let r = Rect::from_origin_size(Point::new(i32::MAX - 5, 0), Size::new(10, 4));
        assert_eq!(r.right, i32::MAX);
        let shifted = Rect::new(0, 0, 8, 8).offset(i32::MAX, 0);
        assert_eq!(shifted.left, i32::MAX);
        assert!(shifted.is_empty());
    }
}
