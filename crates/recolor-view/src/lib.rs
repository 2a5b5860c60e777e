//! # recolor-view
//!
//! Minimal result window for the recolor pipeline.
//!
//! Shows the recolored image centered in the window, shrunk with its aspect
//! ratio kept when the window is smaller than the image. Exports run on a
//! worker thread that owns the [`Session`].
//!
//! # Quick Start
//!
//! ```ignore
//! use recolor_color::TransferOptions;
//! use recolor_ops::Session;
//! use recolor_view::{run, ViewerConfig};
//!
//! let mut session = Session::load("a.png", "b.png", TransferOptions::default());
//! session.recolor()?;
//! let exit_code = run(session, ViewerConfig::default());
//! ```
//!
//! # Keyboard Shortcuts
//!
//! | Key | Action |
//! |-----|--------|
//! | `W` | Write the result (save dialog) |
//! | `Q` / `Esc` | Exit |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;
mod handler;
mod messages;
mod state;

pub use app::{ViewerApp, ViewerConfig};
pub use handler::ViewerHandler;
pub use messages::{ViewerCommand, ViewerEvent};
pub use state::{Viewport, ViewerPersistence, ViewerState};

use recolor_ops::Session;
use std::path::PathBuf;
use tracing::{debug, error};

/// Run the viewer on a finished session.
///
/// Creates an eframe window showing [`Session::result`] and enters the event
/// loop. Returns the exit code when the window closes: 0 for success, 1 for
/// error.
pub fn run(session: Session, config: ViewerConfig) -> i32 {
    let (w, h) = session.result().dimensions();
    let title = format!("{} - {w}x{h}", config.title);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(config.initial_size)
            .with_min_inner_size(state::MIN_WINDOW),
        persistence_path: persistence_path(),
        ..Default::default()
    };

    debug!(verbose = config.verbose, "creating window");
    let result = eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, session)))),
    );

    match result {
        Ok(()) => {
            debug!("viewer exited normally");
            0
        }
        Err(e) => {
            error!("viewer error: {e}");
            1
        }
    }
}

/// Get platform-specific persistence path.
fn persistence_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("recolor").join("viewer"))
}
