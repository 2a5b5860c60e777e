//! The 8-bit RGBA pixel.

/// One pixel: red, green, blue, alpha, 8 bits each.
///
/// [`Default`] is all zeros (transparent black), which is what the
/// resampler leaves behind for output pixels with no source.
///
/// # Example
///
/// ```rust
/// use recolor_core::Rgba8;
///
/// let gray = Rgba8::opaque(128, 128, 128);
/// assert_eq!(gray.a, 255);
/// assert_eq!(Rgba8::default().to_array(), [0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha (255 = opaque)
    pub a: u8,
}

impl Rgba8 {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Creates a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque pixel.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Creates an opaque gray pixel.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::opaque(v, v, v)
    }

    /// Returns `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns `[r, g, b]`, dropping alpha.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns a copy with the color channels replaced.
    #[inline]
    pub const fn with_rgb(self, rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], self.a)
    }
}

impl From<[u8; 4]> for Rgba8 {
    #[inline]
    fn from(a: [u8; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    #[inline]
    fn from(p: Rgba8) -> Self {
        p.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_transparent_black() {
        assert_eq!(Rgba8::default(), Rgba8::TRANSPARENT);
    }

    #[test]
    fn test_with_rgb_keeps_alpha() {
        let p = Rgba8::new(1, 2, 3, 77).with_rgb([9, 8, 7]);
        assert_eq!(p, Rgba8::new(9, 8, 7, 77));
    }

    #[test]
    fn test_array_conversion() {
        let p: Rgba8 = [10, 20, 30, 40].into();
        let a: [u8; 4] = p.into();
        assert_eq!(a, [10, 20, 30, 40]);
        assert_eq!(p.rgb(), [10, 20, 30]);
    }
}
