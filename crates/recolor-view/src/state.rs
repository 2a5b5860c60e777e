//! Viewer state and persistence.
//!
//! Stores UI state that persists between sessions via eframe storage.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default window size.
pub const DEFAULT_WINDOW: [f32; 2] = [1024.0, 768.0];

/// Smallest window the viewer allows.
pub const MIN_WINDOW: [f32; 2] = [320.0, 240.0];

/// Centered, aspect-preserving placement of the image in the window.
///
/// Offsets and sizes are in window pixels. The image is shown 1:1 when it
/// fits; otherwise it is shrunk to the largest size with the same aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Horizontal offset of the image from the window edge.
    pub x: u32,
    /// Vertical offset of the image from the window edge.
    pub y: u32,
    /// Displayed image width.
    pub width: u32,
    /// Displayed image height.
    pub height: u32,
}

impl Viewport {
    /// Computes the viewport for an image of `image` size in a window of
    /// `window` size.
    ///
    /// ```rust
    /// use recolor_view::Viewport;
    ///
    /// let vp = Viewport::fit((100, 50), (400, 40));
    /// assert_eq!((vp.x, vp.y, vp.width, vp.height), (160, 0, 80, 40));
    /// ```
    pub fn fit(image: (u32, u32), window: (u32, u32)) -> Self {
        let (iw, ih) = image;
        let (ww, wh) = window;
        if iw == 0 || ih == 0 || ww == 0 || wh == 0 {
            return Self::default();
        }

        if ww >= iw && wh >= ih {
            return Self {
                x: (ww - iw) / 2,
                y: (wh - ih) / 2,
                width: iw,
                height: ih,
            };
        }

        let image_aspect = iw as f64 / ih as f64;
        let window_aspect = ww as f64 / wh as f64;
        if window_aspect > image_aspect {
            // wider than the image: full height
            let width = ((image_aspect * wh as f64) as u32).min(ww);
            Self {
                x: (ww - width) / 2,
                y: 0,
                width,
                height: wh,
            }
        } else {
            let height = ((ww as f64 / image_aspect) as u32).min(wh);
            Self {
                x: 0,
                y: (wh - height) / 2,
                width: ww,
                height,
            }
        }
    }

    /// Scale from image pixels to displayed pixels along each axis.
    pub fn zoom(&self, image: (u32, u32)) -> [f32; 2] {
        if image.0 == 0 || image.1 == 0 {
            return [1.0, 1.0];
        }
        [
            self.width as f32 / image.0 as f32,
            self.height as f32 / image.1 as f32,
        ]
    }
}

/// Persistent viewer settings (saved between sessions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerPersistence {
    /// Directory of the last successful export.
    pub last_export_dir: Option<PathBuf>,
}

/// Runtime viewer state (not persisted).
#[derive(Debug, Clone)]
pub struct ViewerState {
    /// Window content size in screen pixels.
    pub window_size: [f32; 2],
    /// Current image placement.
    pub viewport: Viewport,
    /// Image dimensions.
    pub image_dims: (u32, u32),
    /// Directory offered first by the save dialog.
    pub last_export_dir: Option<PathBuf>,
    /// Last status line (export result or error).
    pub status: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW,
            viewport: Viewport::default(),
            image_dims: (0, 0),
            last_export_dir: None,
            status: None,
        }
    }
}

impl ViewerState {
    /// Creates state from persistence for an image of the given size.
    pub fn from_persistence(persistence: &ViewerPersistence, image_dims: (u32, u32)) -> Self {
        Self {
            image_dims,
            last_export_dir: persistence.last_export_dir.clone(),
            ..Default::default()
        }
    }

    /// Converts to persistence for saving.
    pub fn to_persistence(&self) -> ViewerPersistence {
        ViewerPersistence {
            last_export_dir: self.last_export_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_fits_is_centered_one_to_one() {
        let vp = Viewport::fit((200, 100), (640, 480));
        assert_eq!(
            vp,
            Viewport {
                x: 220,
                y: 190,
                width: 200,
                height: 100
            }
        );
        assert_eq!(vp.zoom((200, 100)), [1.0, 1.0]);
    }

    #[test]
    fn wide_window_uses_full_height() {
        let vp = Viewport::fit((800, 600), (1000, 300));
        assert_eq!(vp.height, 300);
        assert_eq!(vp.width, 400);
        assert_eq!((vp.x, vp.y), (300, 0));
    }

    #[test]
    fn narrow_window_uses_full_width() {
        let vp = Viewport::fit((800, 600), (400, 900));
        assert_eq!(vp.width, 400);
        assert_eq!(vp.height, 300);
        assert_eq!((vp.x, vp.y), (0, 300));
    }

    #[test]
    fn same_aspect_smaller_window() {
        let vp = Viewport::fit((800, 600), (400, 300));
        assert_eq!(
            vp,
            Viewport {
                x: 0,
                y: 0,
                width: 400,
                height: 300
            }
        );
        assert_eq!(vp.zoom((800, 600)), [0.5, 0.5]);
    }

    #[test]
    fn empty_image_has_empty_viewport() {
        assert_eq!(Viewport::fit((0, 0), (640, 480)), Viewport::default());
        assert_eq!(Viewport::fit((10, 10), (0, 480)), Viewport::default());
    }

    #[test]
    fn persistence_round_trip() {
        let mut state = ViewerState::from_persistence(&ViewerPersistence::default(), (4, 4));
        assert!(state.last_export_dir.is_none());
        state.last_export_dir = Some(PathBuf::from("/tmp/out"));

        let restored = ViewerState::from_persistence(&state.to_persistence(), (4, 4));
        assert_eq!(restored.last_export_dir, Some(PathBuf::from("/tmp/out")));
    }
}
