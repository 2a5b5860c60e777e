//! Recolor command - load, transfer, optionally write.

use anyhow::{Context, Result};
use recolor_color::{DegeneratePolicy, TransferOptions};
use recolor_ops::Session;
use std::path::PathBuf;
use tracing::{error, info};

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct RecolorArgs {
    /// Reference image.
    pub source: PathBuf,
    /// Image to recolor.
    pub destination: PathBuf,
    /// Optional output file.
    pub outfile: Option<PathBuf>,
    /// Flat-channel handling.
    pub policy: DegeneratePolicy,
}

/// Run the pipeline and return the finished session.
///
/// Unreadable inputs give an empty result, which is never written. A failed
/// write is logged and does not fail the run; a failed transfer does.
pub fn run(args: &RecolorArgs) -> Result<Session> {
    let options = TransferOptions::default().with_degenerate(args.policy);
    let mut session = Session::load(&args.source, &args.destination, options);

    session.recolor().with_context(|| {
        format!(
            "Failed to recolor {} from {}",
            args.destination.display(),
            args.source.display()
        )
    })?;

    let (w, h) = session.result().dimensions();
    info!(width = w, height = h, "result ready");

    match &args.outfile {
        Some(out) if session.result().is_empty() => {
            info!(path = %out.display(), "empty result, nothing written");
        }
        Some(out) => {
            if let Err(e) = session.export_image(out) {
                error!(path = %out.display(), "Failed to save: {e}");
            }
        }
        None => {}
    }

    Ok(session)
}
