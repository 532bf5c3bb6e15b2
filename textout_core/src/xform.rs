//! Affine world/device transforms.
//!
//! A device context keeps one `Xform` mapping world (logical) coordinates to
//! device pixels and its inverse for the way back. Points go through the full
//! 2-D matrix: a rotated or sheared mapping makes device x depend on logical y,
//! so an axis can never be converted on its own.

use crate::geometry::Point;

/// Fixed-point one (16.16).
pub const FIXED_ONE: i64 = 0x1_0000;

/// Round half up, the rule used for every logical/device conversion.
pub fn round_coord(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Row-vector affine transform: `x' = x*m11 + y*m21 + dx`,
/// `y' = x*m12 + y*m22 + dy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xform {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Xform {
    pub const IDENTITY: Self = Self {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Axis-aligned scale followed by a translation.
    pub const fn scale_translate(sx: f64, sy: f64, dx: f64, dy: f64) -> Self {
        Self {
            m11: sx,
            m12: 0.0,
            m21: 0.0,
            m22: sy,
            dx,
            dy,
        }
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Self> {
        let det = self.m11 * self.m22 - self.m12 * self.m21;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let m11 = self.m22 / det;
        let m12 = -self.m12 / det;
        let m21 = -self.m21 / det;
        let m22 = self.m11 / det;
        Some(Self {
            m11,
            m12,
            m21,
            m22,
            dx: -(self.dx * m11 + self.dy * m21),
            dy: -(self.dx * m12 + self.dy * m22),
        })
    }

    /// Mapped x of the point `(x, y)`.
    pub fn map_x(&self, x: i32, y: i32) -> i32 {
        round_coord(f64::from(x) * self.m11 + f64::from(y) * self.m21 + self.dx)
    }

    /// Mapped y of the point `(x, y)`.
    pub fn map_y(&self, x: i32, y: i32) -> i32 {
        round_coord(f64::from(x) * self.m12 + f64::from(y) * self.m22 + self.dy)
    }

    /// Map a point; both coordinates come from the untransformed `p`.
    pub fn map_point(&self, p: Point) -> Point {
        Point::new(self.map_x(p.x, p.y), self.map_y(p.x, p.y))
    }

    /// Scale a horizontal length (no translation).
    pub fn scale_x(&self, w: i32) -> i32 {
        round_coord(f64::from(w) * self.m11)
    }

    /// Scale a wide horizontal length, `None` when the result leaves the
    /// `i32` range.
    pub fn checked_scale_x(&self, w: i64) -> Option<i32> {
        let v = (w as f64 * self.m11 + 0.5).floor();
        (v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX)).then_some(v as i32)
    }

    /// Horizontal scale as a 16.16 fixed-point value, truncated.
    pub fn fixed_scale_x(&self) -> i64 {
        (self.m11 * FIXED_ONE as f64) as i64
    }
}

impl Default for Xform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
