//! Message types for UI <-> worker communication.
//!
//! The UI sends commands, the worker answers with events.

use std::path::PathBuf;

use crate::state::Viewport;

/// Messages from UI thread to worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    /// Write the current result to a file.
    Export(PathBuf),

    /// Window content was resized to `[width, height]` pixels.
    Resize([f32; 2]),

    /// Close viewer.
    Quit,
}

/// Events from worker thread to UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// Result written successfully.
    Exported(PathBuf),

    /// New image placement after a resize.
    ViewportChanged(Viewport),

    /// Error occurred.
    Error(String),
}
