//! 3D vector type for color triples.
//!
//! [`Vec3`] carries RGB, LMS or lαβ values through the color pipeline.
//! Geometry uses [`HPoint`](crate::HPoint) instead.
//!
//! # Usage
//!
//! ```rust
//! use recolor_math::Vec3;
//!
//! let lms = Vec3::new(1.0, 10.0, 100.0);
//! let log = lms.map(f64::log10);
//! assert_eq!(log, Vec3::new(0.0, 1.0, 2.0));
//! ```

use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// A 3-component vector for color triples.
///
/// # Components
///
/// Components are named `.x`, `.y`, `.z` and also indexable as `[0..3]`.
/// For RGB: x=R, y=G, z=B. For lαβ: x=l, y=α, z=β.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vec3 {
    /// X component (R, L or l)
    pub x: f64,
    /// Y component (G, M or α)
    pub y: f64,
    /// Z component (B, S or β)
    pub z: f64,
}

impl Vec3 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// One vector (1, 1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to the same value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recolor_math::Vec3;
    ///
    /// let gray = Vec3::splat(0.5);
    /// assert_eq!(gray, Vec3::new(0.5, 0.5, 0.5));
    /// ```
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// `[x, y, z]` to a vector.
    #[inline]
    pub const fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Applies `f` to every component.
    #[inline]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// Component-wise maximum; used to floor channels.
    #[inline]
    pub fn max(self, floor: Self) -> Self {
        Self::new(self.x.max(floor.x), self.y.max(floor.y), self.z.max(floor.z))
    }

    /// False if any component is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        [self.x, self.y, self.z].iter().all(|c| c.is_finite())
    }
}

// Indexing
impl Index<usize> for Vec3 {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 has 3 components, got index {i}"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 has 3 components, got index {i}"),
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// Vec3 * Vec3 (component-wise)
impl Mul for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<[f64; 3]> for Vec3 {
    #[inline]
    fn from(a: [f64; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec3> for [f64; 3] {
    #[inline]
    fn from(v: Vec3) -> [f64; 3] {
        v.to_array()
    }
}
