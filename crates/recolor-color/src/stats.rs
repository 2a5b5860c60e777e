//! Per-channel statistics in lαβ space.

use crate::lab::Lab;
use crate::{ColorError, ColorResult};
use recolor_math::Vec3;

/// Mean and population standard deviation of each lαβ channel.
///
/// Always computed from a full buffer and never cached; see
/// [`ChannelStats::compute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// Per-channel mean `(l, α, β)`.
    pub mean: Vec3,
    /// Per-channel population standard deviation (divides by `n`).
    pub std_dev: Vec3,
}

impl ChannelStats {
    /// Computes mean and standard deviation over `pixels`.
    ///
    /// Sums run sequentially in slice order so the result does not depend on
    /// the thread count.
    ///
    /// # Errors
    ///
    /// [`ColorError::EmptyImage`] if `pixels` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recolor_color::{ChannelStats, Lab};
    ///
    /// let px = [Lab::new(1.0, 0.0, 0.0), Lab::new(3.0, 0.0, 0.0)];
    /// let s = ChannelStats::compute(&px).unwrap();
    /// assert_eq!(s.mean.x, 2.0);
    /// assert_eq!(s.std_dev.x, 1.0);
    /// ```
    pub fn compute(pixels: &[Lab]) -> ColorResult<Self> {
        if pixels.is_empty() {
            return Err(ColorError::EmptyImage);
        }
        let n = pixels.len() as f64;

        let sum = pixels.iter().fold(Vec3::ZERO, |acc, p| acc + p.0);
        let mean = sum / n;

        let sq = pixels.iter().fold(Vec3::ZERO, |acc, p| {
            let d = p.0 - mean;
            acc + d * d
        });
        let std_dev = (sq / n).map(f64::sqrt);

        Ok(Self { mean, std_dev })
    }
}
