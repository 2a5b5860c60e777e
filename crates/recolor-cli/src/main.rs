//! recolor - statistical color transfer CLI
//!
//! Recolors a destination image so its color distribution matches a source
//! image, then shows the result.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use recolor_color::DegeneratePolicy;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "recolor")]
#[command(author, version, about = "Match the colors of one image to another")]
#[command(long_about = "
Transfers the color statistics of SOURCE onto DESTINATION in a decorrelated
lαβ space. SOURCE is resampled to DESTINATION's size first.

Examples:
  recolor palette.jpg photo.png                 # recolor and view
  recolor palette.jpg photo.png out.png         # also write the result
  recolor palette.jpg photo.png out.jpg --no-view -v
  recolor flat.png photo.png --on-flat reject   # fail on flat channels

Viewer keys: W writes the result, Q or Esc quits.
")]
struct Cli {
    /// Image whose colors are copied
    source: PathBuf,

    /// Image to recolor
    destination: PathBuf,

    /// Write the result here (format from extension: png, jpg)
    outfile: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Do not open the viewer
    #[arg(long)]
    no_view: bool,

    /// What to do when a destination channel has no variation
    #[arg(long, value_enum, default_value_t = OnFlat::UnitRatio)]
    on_flat: OnFlat,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Handling of channels with zero standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnFlat {
    /// Shift the channel onto the source mean
    UnitRatio,
    /// Abort the transfer
    Reject,
}

impl From<OnFlat> for DegeneratePolicy {
    fn from(value: OnFlat) -> Self {
        match value {
            OnFlat::UnitRatio => Self::UnitRatio,
            OnFlat::Reject => Self::Reject,
        }
    }
}

/// Default filter: warnings from everything, more from our own crates.
fn default_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,recolor={level}")
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into()))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let session = commands::recolor::run(&commands::recolor::RecolorArgs {
        source: cli.source,
        destination: cli.destination,
        outfile: cli.outfile,
        policy: cli.on_flat.into(),
    })?;

    if cli.no_view || session.result().is_empty() {
        return Ok(());
    }
    commands::view::run(session, cli.verbose)
}
