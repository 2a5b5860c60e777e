//! Homogeneous 2D points.
//!
//! [`HPoint`] is the geometric counterpart of [`Vec3`](crate::Vec3): the
//! same three numbers, but read as `(x, y, w)` and only meaningful after a
//! perspective divide.

use crate::Mat3;
use std::ops::Mul;

/// A 2D point in homogeneous coordinates.
///
/// # Example
///
/// ```rust
/// use recolor_math::{HPoint, Mat3};
///
/// let p = HPoint::new(4.0, 6.0);
/// assert_eq!(p.w, 1.0);
///
/// let half = Mat3::diagonal(1.0, 1.0, 2.0);
/// assert_eq!((half * p).project(), Some((2.0, 3.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HPoint {
    /// X coordinate (scaled by `w`)
    pub x: f64,
    /// Y coordinate (scaled by `w`)
    pub y: f64,
    /// Homogeneous weight
    pub w: f64,
}

impl HPoint {
    /// Creates a point at `(x, y)` with `w = 1`.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, w: 1.0 }
    }

    /// Creates a point from raw homogeneous components.
    #[inline]
    pub const fn from_homogeneous(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }

    /// Perspective divide: returns `(x / w, y / w)`.
    ///
    /// Returns `None` for points at infinity (`w == 0`) or when the result
    /// is not finite.
    #[inline]
    pub fn project(self) -> Option<(f64, f64)> {
        if self.w == 0.0 {
            return None;
        }
        let px = self.x / self.w;
        let py = self.y / self.w;
        (px.is_finite() && py.is_finite()).then_some((px, py))
    }
}

impl Mat3 {
    /// Transforms a homogeneous point by this matrix.
    #[inline]
    pub fn transform_point(&self, p: HPoint) -> HPoint {
        let m = &self.m;
        HPoint::from_homogeneous(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.w,
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.w,
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.w,
        )
    }
}

// Mat3 * HPoint
impl Mul<HPoint> for Mat3 {
    type Output = HPoint;

    #[inline]
    fn mul(self, rhs: HPoint) -> HPoint {
        self.transform_point(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_unit_weight() {
        assert_eq!(HPoint::new(3.0, -2.0).project(), Some((3.0, -2.0)));
    }

    #[test]
    fn test_project_at_infinity() {
        assert_eq!(HPoint::from_homogeneous(1.0, 1.0, 0.0).project(), None);
    }

    #[test]
    fn test_translation_moves_point() {
        let t = Mat3::translation(-2.0, 5.0);
        assert_eq!((t * HPoint::new(2.0, 0.0)).project(), Some((0.0, 5.0)));
    }

    #[test]
    fn test_inverse_maps_back() {
        let m = Mat3::translation(3.0, 1.0).scaled(2.5, 0.5);
        let inv = m.inverse().unwrap();
        let p = HPoint::new(7.0, 9.0);
        let (x, y) = (inv * (m * p)).project().unwrap();
        assert!((x - 7.0).abs() < 1e-12);
        assert!((y - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_perspective_row_divides() {
        let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.5, 0.0, 1.0]]);
        let (x, y) = (m * HPoint::new(2.0, 4.0)).project().unwrap();
        assert_eq!((x, y), (1.0, 2.0));
    }
}
