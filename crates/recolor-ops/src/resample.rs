//! Projective inverse-mapping resampler.
//!
//! Given a source image and a 3x3 projective matrix `M`:
//!
//! 1. Transform the four source corners `(0,0) (W,0) (0,H) (W,H)` through `M`
//!    and perspective-divide.
//! 2. Take their axis-aligned bounding box.
//! 3. Prepend a translation that moves `(left, bottom)` to the origin.
//! 4. Allocate a `(right - left) x (top - bottom)` canvas (truncated).
//! 5. For every output pixel, map back through the inverse, truncate to
//!    integer source coordinates and copy that pixel if it exists. Pixels
//!    with no source stay transparent black.
//!
//! Sampling is nearest-neighbor only.
//!
//! # Example
//!
//! ```rust
//! use recolor_core::{PixelBuffer, Rgba8};
//! use recolor_math::Mat3;
//! use recolor_ops::resample::warp_projective;
//!
//! let src = PixelBuffer::filled(3, 2, Rgba8::gray(50));
//! let warp = warp_projective(&src, &Mat3::IDENTITY.scaled(2.0, 3.0))?;
//! assert_eq!(warp.image.dimensions(), (6, 6));
//! assert_eq!(warp.image.pixel(5, 5), Rgba8::gray(50));
//! # Ok::<(), recolor_ops::OpsError>(())
//! ```
//!
//! When the `parallel` feature is enabled, output rows are filled on the
//! rayon pool. Every pixel depends only on its own coordinates, so the
//! result is identical to the sequential path.

use crate::{OpsError, OpsResult};
use recolor_core::{PixelBuffer, Rgba8};
use recolor_math::{HPoint, Mat3};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Canvas extents within this distance of an integer are snapped to it
/// before truncation.
pub const DIMENSION_SNAP: f64 = 1e-6;

/// Axis-aligned bounds of a transformed image, in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum x.
    pub left: f64,
    /// Maximum x.
    pub right: f64,
    /// Minimum y.
    pub bottom: f64,
    /// Maximum y.
    pub top: f64,
}

impl BoundingBox {
    /// Smallest box containing all `points`, or `None` if there are none.
    pub fn of_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&(x0, y0), rest) = points.split_first()?;
        let init = Self {
            left: x0,
            right: x0,
            bottom: y0,
            top: y0,
        };
        Some(rest.iter().fold(init, |b, &(x, y)| Self {
            left: b.left.min(x),
            right: b.right.max(x),
            bottom: b.bottom.min(y),
            top: b.top.max(y),
        }))
    }

    /// `right - left`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// `top - bottom`.
    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Canvas size in whole pixels, truncated.
    ///
    /// Returns `None` if either extent is not finite or overflows `u32`.
    ///
    /// ```rust
    /// use recolor_ops::resample::BoundingBox;
    ///
    /// let b = BoundingBox { left: 0.0, right: 4.5, bottom: -1.0, top: 1.999_999_999_9 };
    /// assert_eq!(b.pixel_size(), Some((4, 3)));
    /// ```
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        Some((to_pixels(self.width())?, to_pixels(self.height())?))
    }
}

fn to_pixels(extent: f64) -> Option<u32> {
    if !extent.is_finite() || extent > u32::MAX as f64 {
        return None;
    }
    let nearest = extent.round();
    let snapped = if (extent - nearest).abs() < DIMENSION_SNAP {
        nearest
    } else {
        extent.trunc()
    };
    Some(snapped.max(0.0) as u32)
}

/// Bounding box of the `width x height` rectangle after `m`.
///
/// # Errors
///
/// [`OpsError::DegenerateTransform`] if a corner maps to infinity.
pub fn transformed_bounds(m: &Mat3, width: u32, height: u32) -> OpsResult<BoundingBox> {
    let (w, h) = (width as f64, height as f64);
    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];

    let mut mapped = [(0.0, 0.0); 4];
    for (dst, &(x, y)) in mapped.iter_mut().zip(&corners) {
        *dst = (*m * HPoint::new(x, y)).project().ok_or_else(|| {
            OpsError::DegenerateTransform(format!("corner ({}, {}) maps to infinity", x, y))
        })?;
    }

    BoundingBox::of_points(&mapped)
        .ok_or_else(|| OpsError::DegenerateTransform("no corners".into()))
}

/// Output of [`warp_projective`].
#[derive(Debug, Clone)]
pub struct Warp {
    /// The resampled image.
    pub image: PixelBuffer,
    /// Bounds of the transformed source before translation.
    pub bounds: BoundingBox,
    /// The full forward transform, translation included.
    pub transform: Mat3,
}

/// Resamples `src` through an arbitrary projective matrix.
///
/// The output canvas is sized to the transformed bounds, so nothing is
/// cropped; see the module docs for the procedure.
///
/// # Errors
///
/// - [`OpsError::InvalidDimensions`] for an empty source, a zero-area
///   result, or one too large to address
/// - [`OpsError::DegenerateTransform`] if `m` is not finite or a corner maps
///   to infinity
/// - [`OpsError::Math`] if the translated matrix cannot be inverted
pub fn warp_projective(src: &PixelBuffer, m: &Mat3) -> OpsResult<Warp> {
    if src.is_empty() {
        return Err(OpsError::InvalidDimensions("source image is empty".into()));
    }
    if !m.is_finite() {
        return Err(OpsError::DegenerateTransform(format!("non-finite matrix {:?}", m.m)));
    }

    let (sw, sh) = src.dimensions();
    let bounds = transformed_bounds(m, sw, sh)?;
    let (w2, h2) = bounds.pixel_size().ok_or_else(|| {
        OpsError::InvalidDimensions(format!(
            "transformed bounds {} x {} are not addressable",
            bounds.width(),
            bounds.height()
        ))
    })?;
    if w2 == 0 || h2 == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "transformed bounds {} x {} have zero area",
            bounds.width(),
            bounds.height()
        )));
    }

    let transform = m.translated(-bounds.left, -bounds.bottom);
    let inverse = transform.inverse()?;
    debug!(sw, sh, w2, h2, ?bounds, "warp_projective");

    let mut image = PixelBuffer::new(w2, h2);
    fill_rows(src, &inverse, &mut image);

    Ok(Warp {
        image,
        bounds,
        transform,
    })
}

#[inline]
fn fill_row(src: &PixelBuffer, inverse: &Mat3, y: usize, row: &mut [Rgba8]) {
    let (sw, sh) = (src.width() as f64, src.height() as f64);
    for (x, px) in row.iter_mut().enumerate() {
        let Some((u, v)) = (*inverse * HPoint::new(x as f64, y as f64)).project() else {
            continue;
        };
        // truncate toward zero, like an integer cast
        let (u, v) = (u.trunc(), v.trunc());
        if u >= 0.0 && v >= 0.0 && u < sw && v < sh {
            *px = src.pixel(u as u32, v as u32);
        }
    }
}

#[cfg(feature = "parallel")]
fn fill_rows(src: &PixelBuffer, inverse: &Mat3, out: &mut PixelBuffer) {
    out.par_rows_mut()
        .for_each(|(y, row)| fill_row(src, inverse, y, row));
}

#[cfg(not(feature = "parallel"))]
fn fill_rows(src: &PixelBuffer, inverse: &Mat3, out: &mut PixelBuffer) {
    out.rows_mut()
        .enumerate()
        .for_each(|(y, row)| fill_row(src, inverse, y, row));
}

/// Resamples `src` onto a `width x height` canvas.
///
/// Equal sizes return an exact copy without any transform math. Otherwise
/// the source is scaled independently in x and y by
/// `width / src_width` and `height / src_height` and passed to
/// [`warp_projective`].
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if either size is zero, plus everything
/// [`warp_projective`] returns.
pub fn resample_to(src: &PixelBuffer, width: u32, height: u32) -> OpsResult<PixelBuffer> {
    if src.dimensions() == (width, height) {
        trace!(width, height, "resample_to: identity");
        return Ok(src.clone());
    }
    if width == 0 || height == 0 || src.is_empty() {
        return Err(OpsError::InvalidDimensions(format!(
            "cannot resample {}x{} to {}x{}",
            src.width(),
            src.height(),
            width,
            height
        )));
    }

    let sx = width as f64 / src.width() as f64;
    let sy = height as f64 / src.height() as f64;
    let warp = warp_projective(src, &Mat3::IDENTITY.scaled(sx, sy))?;
    debug!(
        from_w = src.width(),
        from_h = src.height(),
        to_w = warp.image.width(),
        to_h = warp.image.height(),
        sx,
        sy,
        "resampled"
    );
    Ok(warp.image)
}
