//! View command - show the result window.

use anyhow::Result;
use recolor_ops::Session;

/// Open the viewer on a finished session.
#[cfg(feature = "viewer")]
pub fn run(session: Session, verbose: u8) -> Result<()> {
    let config = recolor_view::ViewerConfig {
        verbose,
        ..Default::default()
    };

    let exit_code = recolor_view::run(session, config);

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

/// Built without the viewer: report and return.
#[cfg(not(feature = "viewer"))]
pub fn run(session: Session, _verbose: u8) -> Result<()> {
    let (w, h) = session.result().dimensions();
    tracing::warn!(width = w, height = h, "built without viewer, nothing to show");
    Ok(())
}
