//! Global statistical color transfer.
//!
//! Both images are converted to lαβ, per-channel statistics are taken, and
//! every destination pixel is remapped channel by channel:
//!
//! ```text
//! value = (value - dest_mean) * (source_std / dest_std) + source_mean
//! ```
//!
//! The result goes back through the inverse lαβ path to 8-bit RGB. The
//! destination's alpha is carried through untouched.
//!
//! # Flat Channels
//!
//! A destination channel with no variation has no meaningful ratio. What
//! happens then is chosen by [`DegeneratePolicy`].
//!
//! # Example
//!
//! ```rust
//! use recolor_color::{transfer, transfer_with, ColorError, DegeneratePolicy, TransferOptions};
//! use recolor_core::{PixelBuffer, Rgba8};
//!
//! let source = PixelBuffer::filled(2, 2, Rgba8::gray(128));
//! let dest = PixelBuffer::filled(2, 2, Rgba8::BLACK);
//!
//! // Flat destination: the default shifts it onto the source mean
//! let out = transfer(&source, &dest).unwrap();
//! assert!(out.data().iter().all(|p| p.r.abs_diff(128) <= 1));
//!
//! let strict = TransferOptions::default().with_degenerate(DegeneratePolicy::Reject);
//! let err = transfer_with(&source, &dest, &strict).unwrap_err();
//! assert!(matches!(err, ColorError::DegenerateStatistics { .. }));
//! ```

use crate::lab::{CHANNEL_NAMES, Lab, LabConverter, linear_rgb_to_bytes};
use crate::stats::ChannelStats;
use crate::{ColorError, ColorResult};
use recolor_core::PixelBuffer;
use recolor_math::Vec3;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Standard deviations at or below this count as flat.
pub const DEGENERATE_STD_EPSILON: f64 = 1e-9;

/// What to do when a destination channel is flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DegeneratePolicy {
    /// Use a ratio of 1: the channel is shifted onto the source mean.
    #[default]
    UnitRatio,
    /// Fail with [`ColorError::DegenerateStatistics`].
    Reject,
}

/// Transfer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferOptions {
    /// Flat-channel handling.
    pub degenerate: DegeneratePolicy,
}

impl TransferOptions {
    /// Sets the flat-channel policy.
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }
}

/// The per-channel affine map derived from two sets of statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferPlan {
    /// Reference statistics.
    pub source: ChannelStats,
    /// Statistics of the image being recolored.
    pub dest: ChannelStats,
    /// `source.std_dev / dest.std_dev`, with flat channels resolved.
    pub ratio: Vec3,
}

impl TransferPlan {
    /// Builds the map, resolving flat destination channels with `policy`.
    ///
    /// # Errors
    ///
    /// - [`ColorError::DegenerateStatistics`] for a flat channel under
    ///   [`DegeneratePolicy::Reject`]
    /// - [`ColorError::NonFinite`] if a ratio or mean is NaN or infinite
    pub fn new(
        source: ChannelStats,
        dest: ChannelStats,
        policy: DegeneratePolicy,
    ) -> ColorResult<Self> {
        let mut ratio = Vec3::ONE;
        for c in 0..3 {
            let d = dest.std_dev[c];
            if d <= DEGENERATE_STD_EPSILON {
                match policy {
                    DegeneratePolicy::UnitRatio => {
                        warn!(channel = CHANNEL_NAMES[c], std_dev = d, "flat destination channel, using unit ratio");
                    }
                    DegeneratePolicy::Reject => {
                        return Err(ColorError::DegenerateStatistics {
                            channel: CHANNEL_NAMES[c],
                            std_dev: d,
                        });
                    }
                }
            } else {
                ratio[c] = source.std_dev[c] / d;
            }
        }

        if !ratio.is_finite() {
            return Err(ColorError::NonFinite(format!("std ratio {:?}", ratio)));
        }
        if !source.mean.is_finite() || !dest.mean.is_finite() {
            return Err(ColorError::NonFinite("channel mean".into()));
        }

        Ok(Self {
            source,
            dest,
            ratio,
        })
    }

    /// Remaps one destination value.
    #[inline]
    pub fn apply(&self, lab: Lab) -> Lab {
        Lab((lab.0 - self.dest.mean) * self.ratio + self.source.mean)
    }
}

/// Converts every pixel of `buf` to lαβ, in storage order.
pub fn to_lab(buf: &PixelBuffer) -> Vec<Lab> {
    to_lab_with(&LabConverter::new(), buf)
}

#[cfg(feature = "parallel")]
fn to_lab_with(conv: &LabConverter, buf: &PixelBuffer) -> Vec<Lab> {
    buf.data().par_iter().map(|p| conv.rgb8_to_lab(p.rgb())).collect()
}

#[cfg(not(feature = "parallel"))]
fn to_lab_with(conv: &LabConverter, buf: &PixelBuffer) -> Vec<Lab> {
    buf.data().iter().map(|p| conv.rgb8_to_lab(p.rgb())).collect()
}

#[cfg(feature = "parallel")]
fn remap(plan: &TransferPlan, lab: &mut [Lab]) {
    lab.par_iter_mut().for_each(|p| *p = plan.apply(*p));
}

#[cfg(not(feature = "parallel"))]
fn remap(plan: &TransferPlan, lab: &mut [Lab]) {
    lab.iter_mut().for_each(|p| *p = plan.apply(*p));
}

#[cfg(feature = "parallel")]
fn to_linear_rgb(conv: &LabConverter, lab: &[Lab]) -> Vec<Vec3> {
    lab.par_iter().map(|l| conv.lab_to_linear_rgb(*l)).collect()
}

#[cfg(not(feature = "parallel"))]
fn to_linear_rgb(conv: &LabConverter, lab: &[Lab]) -> Vec<Vec3> {
    lab.iter().map(|l| conv.lab_to_linear_rgb(*l)).collect()
}

#[cfg(feature = "parallel")]
fn write_back(rgb: &[Vec3], out: &mut PixelBuffer) {
    out.data_mut()
        .par_iter_mut()
        .zip(rgb.par_iter())
        .for_each(|(px, v)| *px = px.with_rgb(linear_rgb_to_bytes(*v)));
}

#[cfg(not(feature = "parallel"))]
fn write_back(rgb: &[Vec3], out: &mut PixelBuffer) {
    out.data_mut()
        .iter_mut()
        .zip(rgb.iter())
        .for_each(|(px, v)| *px = px.with_rgb(linear_rgb_to_bytes(*v)));
}

/// Recolors `dest` to match the statistics of `source` with default options.
///
/// See [`transfer_with`].
pub fn transfer(source: &PixelBuffer, dest: &PixelBuffer) -> ColorResult<PixelBuffer> {
    transfer_with(source, dest, &TransferOptions::default())
}

/// Recolors `dest` to match the statistics of `source`.
///
/// Returns a new buffer; neither input is modified.
///
/// # Errors
///
/// - [`ColorError::EmptyImage`] if either image has no pixels
/// - [`ColorError::SizeMismatch`] if the sizes differ
/// - [`ColorError::DegenerateStatistics`] / [`ColorError::NonFinite`] from
///   [`TransferPlan::new`], or if a remapped value or its linear RGB is
///   not finite
pub fn transfer_with(
    source: &PixelBuffer,
    dest: &PixelBuffer,
    options: &TransferOptions,
) -> ColorResult<PixelBuffer> {
    if source.is_empty() || dest.is_empty() {
        return Err(ColorError::EmptyImage);
    }
    source
        .ensure_same_size(dest)
        .map_err(|_| ColorError::SizeMismatch {
            source_size: source.dimensions(),
            dest_size: dest.dimensions(),
        })?;

    let conv = LabConverter::new();
    let src_lab = to_lab_with(&conv, source);
    let mut dst_lab = to_lab_with(&conv, dest);

    let plan = TransferPlan::new(
        ChannelStats::compute(&src_lab)?,
        ChannelStats::compute(&dst_lab)?,
        options.degenerate,
    )?;
    debug!(
        source_mean = ?plan.source.mean,
        source_std = ?plan.source.std_dev,
        dest_mean = ?plan.dest.mean,
        dest_std = ?plan.dest.std_dev,
        ratio = ?plan.ratio,
        "transfer statistics"
    );

    remap(&plan, &mut dst_lab);
    if let Some(i) = dst_lab.iter().position(|p| !p.is_finite()) {
        return Err(ColorError::NonFinite(format!("lαβ value of pixel {}", i)));
    }

    let rgb = to_linear_rgb(&conv, &dst_lab);
    if let Some(i) = rgb.iter().position(|v| !v.is_finite()) {
        return Err(ColorError::NonFinite(format!("linear RGB of pixel {}", i)));
    }

    let mut out = dest.clone();
    write_back(&rgb, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use recolor_core::Rgba8;

    /// Deterministic pseudo-random image.
    fn noise(w: u32, h: u32, seed: u32) -> PixelBuffer {
        let mut state = seed.wrapping_mul(747_796_405).wrapping_add(1);
        let mut next = move || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        let mut buf = PixelBuffer::new(w, h);
        for p in buf.data_mut() {
            *p = Rgba8::new(next(), next(), next(), next());
        }
        buf
    }

    #[test]
    fn test_statistics_match_source() {
        let src = noise(16, 12, 1);
        let dst = noise(16, 12, 2);
        let src_lab = to_lab(&src);
        let dst_lab = to_lab(&dst);

        let plan = TransferPlan::new(
            ChannelStats::compute(&src_lab).unwrap(),
            ChannelStats::compute(&dst_lab).unwrap(),
            DegeneratePolicy::Reject,
        )
        .unwrap();
        let mapped: Vec<Lab> = dst_lab.iter().map(|p| plan.apply(*p)).collect();
        let after = ChannelStats::compute(&mapped).unwrap();

        for c in 0..3 {
            assert_abs_diff_eq!(after.mean[c], plan.source.mean[c], epsilon = 1e-9);
            assert_abs_diff_eq!(after.std_dev[c], plan.source.std_dev[c], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_self_transfer_is_identity() {
        let img = noise(9, 7, 3);
        let out = transfer(&img, &img).unwrap();
        for (a, b) in out.data().iter().zip(img.data()) {
            for c in 0..3 {
                assert!(a.rgb()[c].abs_diff(b.rgb()[c]) <= 2, "{:?} vs {:?}", a, b);
            }
            assert_eq!(a.a, b.a);
        }
    }

    #[test]
    fn test_gray_onto_black_unit_ratio() {
        let source = PixelBuffer::filled(2, 2, Rgba8::gray(128));
        let dest = PixelBuffer::filled(2, 2, Rgba8::BLACK);
        let out = transfer(&source, &dest).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        for p in out.data() {
            for c in p.rgb() {
                assert!(c.abs_diff(128) <= 1, "{:?}", p);
            }
            assert_eq!(p.a, 255);
        }
    }

    #[test]
    fn test_gray_onto_black_reject() {
        let source = PixelBuffer::filled(2, 2, Rgba8::gray(128));
        let dest = PixelBuffer::filled(2, 2, Rgba8::BLACK);
        let opts = TransferOptions::default().with_degenerate(DegeneratePolicy::Reject);
        let err = transfer_with(&source, &dest, &opts).unwrap_err();
        assert!(matches!(
            err,
            ColorError::DegenerateStatistics { channel: "l", .. }
        ));
    }

    #[test]
    fn test_flat_channel_keeps_others_scaled() {
        let stats = |m: f64, s: f64| ChannelStats {
            mean: Vec3::splat(m),
            std_dev: Vec3::new(s, 0.0, s),
        };
        let plan =
            TransferPlan::new(stats(1.0, 4.0), stats(0.0, 2.0), DegeneratePolicy::UnitRatio).unwrap();
        assert_eq!(plan.ratio, Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(plan.apply(Lab::new(1.0, 1.0, -1.0)), Lab::new(3.0, 2.0, -1.0));
    }

    #[test]
    fn test_infinite_ratio_is_rejected() {
        let source = ChannelStats {
            mean: Vec3::ZERO,
            std_dev: Vec3::splat(f64::MAX),
        };
        let dest = ChannelStats {
            mean: Vec3::ZERO,
            std_dev: Vec3::splat(0.5),
        };
        let err = TransferPlan::new(source, dest, DegeneratePolicy::UnitRatio).unwrap_err();
        assert!(matches!(err, ColorError::NonFinite(_)));
    }

    #[test]
    fn test_alpha_is_preserved() {
        let source = noise(4, 4, 10);
        let mut dest = noise(4, 4, 11);
        dest.set_pixel(0, 0, Rgba8::new(10, 20, 30, 7));
        let out = transfer(&source, &dest).unwrap();
        for (a, b) in out.data().iter().zip(dest.data()) {
            assert_eq!(a.a, b.a);
        }
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let source = noise(3, 3, 20);
        let dest = noise(3, 3, 21);
        let dest_before = dest.clone();
        let _ = transfer(&source, &dest).unwrap();
        assert_eq!(dest, dest_before);
    }

    #[test]
    fn test_size_mismatch() {
        let err = transfer(&PixelBuffer::new(2, 2), &PixelBuffer::new(2, 3)).unwrap_err();
        assert_eq!(
            err,
            ColorError::SizeMismatch {
                source_size: (2, 2),
                dest_size: (2, 3),
            }
        );
    }

    #[test]
    fn test_overflowing_outlier_is_rejected() {
        // one off-by-one pixel in a near-flat destination is stretched far
        // past what exp10 can represent
        let mut src = PixelBuffer::new(300, 300);
        for y in 0..300 {
            for x in 0..300 {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                src.set_pixel(x, y, Rgba8::gray(v));
            }
        }
        let mut dst = PixelBuffer::filled(300, 300, Rgba8::gray(1));
        dst.set_pixel(5, 5, Rgba8::gray(2));

        let err = transfer(&src, &dst).unwrap_err();
        assert!(matches!(err, ColorError::NonFinite(_)), "{err:?}");
    }

    #[test]
    fn test_empty_image() {
        let err = transfer(&PixelBuffer::empty(), &PixelBuffer::empty()).unwrap_err();
        assert_eq!(err, ColorError::EmptyImage);
    }
}
