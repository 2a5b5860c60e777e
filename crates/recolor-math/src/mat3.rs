//! 3x3 matrix type.
//!
//! [`Mat3`] serves two roles in the pipeline:
//!
//! - linear color transforms (RGB → LMS, LMS → lαβ and back)
//! - 2D projective transforms acting on [`HPoint`](crate::HPoint)
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use recolor_math::{Mat3, Vec3};
//!
//! let rgb_to_lms = Mat3::from_rows([
//!     [0.3811, 0.5783, 0.0402],
//!     [0.1967, 0.7244, 0.0782],
//!     [0.0241, 0.1288, 0.8444],
//! ]);
//!
//! let lms = rgb_to_lms * Vec3::new(1.0, 0.0, 0.0);
//! assert_eq!(lms.x, 0.3811);
//! ```

use crate::{MathError, MathResult, Vec3};
use std::ops::{Index, Mul};

/// Determinant magnitude below which a matrix is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// A 3x3 matrix.
///
/// Stored in row-major order. Use [`Mat3::from_rows`] to construct from
/// component arrays.
///
/// # Example
///
/// ```rust
/// use recolor_math::{Mat3, Vec3};
///
/// let identity = Mat3::IDENTITY;
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(identity * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a diagonal matrix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recolor_math::Mat3;
    ///
    /// let scale = Mat3::diagonal(2.0, 2.0, 1.0);
    /// assert_eq!(scale.m[0][0], 2.0);
    /// assert_eq!(scale.m[2][2], 1.0);
    /// ```
    #[inline]
    pub const fn diagonal(d0: f64, d1: f64, d2: f64) -> Self {
        Self::from_rows([
            [d0, 0.0, 0.0],
            [0.0, d1, 0.0],
            [0.0, 0.0, d2],
        ])
    }

    /// Creates a 2D translation by `(tx, ty)` in homogeneous form.
    #[inline]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::from_rows([
            [1.0, 0.0, tx],
            [0.0, 1.0, ty],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Returns a row as Vec3.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Returns a column as Vec3.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_rows([
            [self.m[0][0], self.m[1][0], self.m[2][0]],
            [self.m[0][1], self.m[1][1], self.m[2][1]],
            [self.m[0][2], self.m[1][2], self.m[2][2]],
        ])
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse of this matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::Singular`] if `|det| < SINGULAR_EPSILON` or the
    /// determinant is not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recolor_math::Mat3;
    ///
    /// let m = Mat3::diagonal(2.0, 4.0, 1.0);
    /// let inv = m.inverse().unwrap();
    /// assert!((m * inv).approx_eq(&Mat3::IDENTITY, 1e-12));
    ///
    /// assert!(Mat3::ZERO.inverse().is_err());
    /// ```
    pub fn inverse(&self) -> MathResult<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(MathError::Singular { det });
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        // Adjugate (transposed cofactors) scaled by 1/det
        Ok(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    /// Transforms a Vec3 by this matrix.
    ///
    /// Equivalent to `matrix * vector`.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    /// Multiplies two matrices.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        result
    }

    /// Returns `S * self` where `S = diag(sx, sy, 1)`.
    ///
    /// The scale is composed on the left, so it is applied *after* whatever
    /// this matrix already does to a point.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recolor_math::{HPoint, Mat3};
    ///
    /// let m = Mat3::translation(1.0, 1.0).scaled(2.0, 3.0);
    /// let p = (m * HPoint::new(0.0, 0.0)).project().unwrap();
    /// assert_eq!(p, (2.0, 3.0));
    /// ```
    #[inline]
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::diagonal(sx, sy, 1.0).mul_mat(self)
    }

    /// Returns `T * self` where `T` translates by `(tx, ty)`.
    #[inline]
    pub fn translated(&self, tx: f64, ty: f64) -> Self {
        Self::translation(tx, ty).mul_mat(self)
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Element-wise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Mat3 * Vec3
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

// Mat3 * Mat3
impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

// Mat3 * f64
impl Mul<f64> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        let mut out = self;
        out.m.iter_mut().flatten().for_each(|x| *x *= rhs);
        out
    }
}

impl Index<usize> for Mat3 {
    type Output = [f64; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f64; 3] {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mat3_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn test_mat3_transpose() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let t = m.transpose();
        assert_eq!(t.m[0][1], 4.0);
        assert_eq!(t.m[1][0], 2.0);
    }

    #[test]
    fn test_mat3_determinant() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let inv = m.inverse().unwrap();
        assert!((m * inv).approx_eq(&Mat3::IDENTITY, 1e-10));
        assert!((inv * m).approx_eq(&Mat3::IDENTITY, 1e-10));
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0], // Row 2 = 2 * Row 1
            [1.0, 1.0, 1.0],
        ]);
        assert!(matches!(m.inverse(), Err(MathError::Singular { .. })));
    }

    #[test]
    fn test_mat3_zero_scale_is_singular() {
        // A zero-area transform cannot be inverted.
        let m = Mat3::IDENTITY.scaled(0.0, 2.0);
        assert!(m.inverse().is_err());
    }

    #[test]
    fn test_mat3_nan_is_singular() {
        let m = Mat3::diagonal(f64::NAN, 1.0, 1.0);
        assert!(m.inverse().is_err());
    }

    #[test]
    fn test_mat3_composition_order() {
        let a = Mat3::from_rows([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 2.0]]);
        let b = Mat3::from_rows([[1.0, 2.0, 0.0], [0.0, 1.0, 0.0], [3.0, 0.0, 1.0]]);
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_eq!((a * b) * v, a * (b * v));
    }

    #[test]
    fn test_mat3_scaled_composes_on_left() {
        let t = Mat3::translation(5.0, 7.0);
        let m = t.scaled(2.0, 3.0);
        // Translation happens first, then the scale.
        assert_eq!(m.m[0][2], 10.0);
        assert_eq!(m.m[1][2], 21.0);
        assert_eq!(m, Mat3::diagonal(2.0, 3.0, 1.0) * t);
    }

    #[test]
    fn test_mat3_translated() {
        let m = Mat3::IDENTITY.scaled(2.0, 2.0).translated(-1.0, -1.0);
        assert_eq!(m.m[0][2], -1.0);
        assert_eq!(m.m[0][0], 2.0);
    }

    #[test]
    fn test_mat3_mul_scalar() {
        let m = Mat3::IDENTITY * 3.0;
        assert_eq!(m, Mat3::diagonal(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_mat3_row_col() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.row(1), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.col(2), Vec3::new(3.0, 6.0, 9.0));
        assert_eq!(m[2], [7.0, 8.0, 9.0]);
    }
}
