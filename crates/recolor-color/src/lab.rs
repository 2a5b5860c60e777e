//! RGB, LMS and lαβ conversions.
//!
//! The forward path takes an 8-bit RGB triple into the decorrelated
//! logarithmic lαβ space:
//!
//! ```text
//! byte / 255 -> max(., 1/255) -> RGB_TO_LMS -> log10 -> SCALE * DIFF -> lαβ
//! ```
//!
//! The inverse path undoes each step:
//!
//! ```text
//! lαβ -> DIFF_INV * SCALE_INV -> 10^x -> LMS_TO_RGB -> |x| * 255, min 255 -> byte
//! ```
//!
//! # Byte Conversion Quirk
//!
//! [`linear_to_byte`] takes the absolute value before scaling, so a slightly
//! negative reconstructed channel is reflected to a small positive byte
//! instead of being clipped to zero:
//!
//! ```rust
//! use recolor_color::lab::linear_to_byte;
//!
//! assert_eq!(linear_to_byte(-0.1), linear_to_byte(0.1));
//! assert_eq!(linear_to_byte(7.0), 255);
//! ```
//!
//! # Precision
//!
//! `RGB_TO_LMS` and `LMS_TO_RGB` are published to four decimals and are not
//! exact inverses; an 8-bit round trip lands within one or two levels.

use recolor_math::{Mat3, Vec3};

/// Linear RGB to LMS cone response.
pub const RGB_TO_LMS: Mat3 = Mat3::from_rows([
    [0.3811, 0.5783, 0.0402],
    [0.1967, 0.7244, 0.0782],
    [0.0241, 0.1288, 0.8444],
]);

/// LMS cone response to linear RGB.
pub const LMS_TO_RGB: Mat3 = Mat3::from_rows([
    [4.4679, -3.5873, 0.1193],
    [-1.2186, 2.3809, -0.1624],
    [0.0497, -0.2439, 1.2045],
]);

/// Differencing half of the log-LMS to lαβ transform.
pub const LMS_TO_LAB_DIFF: Mat3 = Mat3::from_rows([
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -2.0],
    [1.0, -1.0, 0.0],
]);

/// Scaling half of the log-LMS to lαβ transform: `diag(1/√3, 1/√6, 1/√2)`.
pub const LMS_TO_LAB_SCALE: Mat3 = Mat3::diagonal(
    0.577_350_269_189_625_8,
    0.408_248_290_463_863_0,
    0.707_106_781_186_547_6,
);

/// Scaling half of the lαβ to log-LMS transform: `diag(√3/3, √6/6, √2/2)`.
pub const LAB_TO_LMS_SCALE: Mat3 = Mat3::diagonal(
    0.577_350_269_189_625_8,
    0.408_248_290_463_863_0,
    0.707_106_781_186_547_6,
);

/// Differencing half of the lαβ to log-LMS transform.
pub const LAB_TO_LMS_DIFF: Mat3 = Mat3::from_rows([
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, -2.0, 0.0],
]);

/// Smallest normalised channel value; keeps `log10` away from zero.
pub const CHANNEL_FLOOR: f64 = 1.0 / 255.0;

/// Channel names in lαβ order, for diagnostics.
pub const CHANNEL_NAMES: [&str; 3] = ["l", "alpha", "beta"];

/// A color in lαβ space.
///
/// Kept apart from plain [`Vec3`] so lαβ values are not mixed up with RGB or
/// LMS triples at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab(pub Vec3);

impl Lab {
    /// Creates from `(l, α, β)`.
    #[inline]
    pub const fn new(l: f64, alpha: f64, beta: f64) -> Self {
        Self(Vec3::new(l, alpha, beta))
    }

    /// Luminance axis.
    #[inline]
    pub fn l(self) -> f64 {
        self.0.x
    }

    /// Yellow-blue axis.
    #[inline]
    pub fn alpha(self) -> f64 {
        self.0.y
    }

    /// Red-green axis.
    #[inline]
    pub fn beta(self) -> f64 {
        self.0.z
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

/// `LMS_TO_LAB_SCALE * LMS_TO_LAB_DIFF`.
#[inline]
pub fn lms_to_lab_matrix() -> Mat3 {
    LMS_TO_LAB_SCALE * LMS_TO_LAB_DIFF
}

/// `LAB_TO_LMS_DIFF * LAB_TO_LMS_SCALE`.
#[inline]
pub fn lab_to_lms_matrix() -> Mat3 {
    LAB_TO_LMS_DIFF * LAB_TO_LMS_SCALE
}

/// Precomposed forward and inverse matrices.
///
/// Build once per image and reuse for every pixel.
#[derive(Debug, Clone, Copy)]
pub struct LabConverter {
    to_lab: Mat3,
    to_lms: Mat3,
}

impl Default for LabConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl LabConverter {
    /// Composes the lαβ matrices.
    pub fn new() -> Self {
        Self {
            to_lab: lms_to_lab_matrix(),
            to_lms: lab_to_lms_matrix(),
        }
    }

    /// 8-bit RGB to lαβ.
    #[inline]
    pub fn rgb8_to_lab(&self, rgb: [u8; 3]) -> Lab {
        let v = Vec3::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64) / 255.0;
        let lms = RGB_TO_LMS * v.max(Vec3::splat(CHANNEL_FLOOR));
        Lab(self.to_lab * lms.map(f64::log10))
    }

    /// lαβ to linear RGB (nominally `[0, 1]`, not clamped).
    #[inline]
    pub fn lab_to_linear_rgb(&self, lab: Lab) -> Vec3 {
        let lms = (self.to_lms * lab.0).map(|c| 10f64.powf(c));
        LMS_TO_RGB * lms
    }

    /// lαβ to 8-bit RGB via [`linear_to_byte`].
    #[inline]
    pub fn lab_to_rgb8(&self, lab: Lab) -> [u8; 3] {
        linear_rgb_to_bytes(self.lab_to_linear_rgb(lab))
    }
}

/// 8-bit RGB to lαβ.
///
/// Composes the matrices on every call; prefer [`LabConverter`] in loops.
pub fn rgb8_to_lab(rgb: [u8; 3]) -> Lab {
    LabConverter::new().rgb8_to_lab(rgb)
}

/// lαβ to linear RGB.
pub fn lab_to_linear_rgb(lab: Lab) -> Vec3 {
    LabConverter::new().lab_to_linear_rgb(lab)
}

/// lαβ to 8-bit RGB.
pub fn lab_to_rgb8(lab: Lab) -> [u8; 3] {
    LabConverter::new().lab_to_rgb8(lab)
}

/// Linear channel to byte: `|v| * 255` clamped to `[0, 255]`, truncated.
///
/// NaN maps to 0.
#[inline]
pub fn linear_to_byte(v: f64) -> u8 {
    (v.abs() * 255.0).clamp(0.0, 255.0) as u8
}

/// Applies [`linear_to_byte`] to each channel.
#[inline]
pub fn linear_rgb_to_bytes(v: Vec3) -> [u8; 3] {
    [linear_to_byte(v.x), linear_to_byte(v.y), linear_to_byte(v.z)]
}
