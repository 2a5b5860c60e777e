//! The recolor pipeline: load, align, transfer, export.
//!
//! A [`Session`] owns every buffer the pipeline touches. Inputs that fail to
//! decode are logged and replaced with empty buffers, so a session is always
//! in a usable state; [`Session::recolor`] then yields an empty result.

use crate::resample::resample_to;
use crate::{OpsError, OpsResult};
use recolor_color::{TransferOptions, transfer_with};
use recolor_core::PixelBuffer;
use std::path::Path;
use tracing::{debug, error, info};

/// Buffers and options of one recolor run.
///
/// # Example
///
/// ```rust
/// use recolor_color::TransferOptions;
/// use recolor_core::{PixelBuffer, Rgba8};
/// use recolor_ops::Session;
///
/// let source = PixelBuffer::filled(2, 2, Rgba8::gray(128));
/// let dest = PixelBuffer::filled(4, 4, Rgba8::BLACK);
///
/// let mut session = Session::from_buffers(source, dest, TransferOptions::default());
/// let result = session.recolor().unwrap();
/// assert_eq!(result.dimensions(), (4, 4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    source: PixelBuffer,
    destination: PixelBuffer,
    aligned: PixelBuffer,
    result: PixelBuffer,
    options: TransferOptions,
}

impl Session {
    /// Creates a session with empty buffers.
    pub fn new(options: TransferOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Creates a session from already decoded buffers.
    pub fn from_buffers(
        source: PixelBuffer,
        destination: PixelBuffer,
        options: TransferOptions,
    ) -> Self {
        Self {
            source,
            destination,
            options,
            ..Self::default()
        }
    }

    /// Loads both inputs from disk.
    ///
    /// Decode failures are logged and leave the matching buffer empty.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        source: P,
        destination: Q,
        options: TransferOptions,
    ) -> Self {
        let mut session = Self::new(options);
        if let Err(e) = session.load_source(source.as_ref()) {
            error!(path = %source.as_ref().display(), "cannot load source: {e}");
        }
        if let Err(e) = session.load_destination(destination.as_ref()) {
            error!(path = %destination.as_ref().display(), "cannot load destination: {e}");
        }
        session
    }

    /// Replaces the source buffer with the decoded file.
    ///
    /// On error the source is cleared.
    pub fn load_source<P: AsRef<Path>>(&mut self, path: P) -> OpsResult<()> {
        self.source = PixelBuffer::empty();
        self.source = read_buffer(path.as_ref())?;
        Ok(())
    }

    /// Replaces the destination buffer with the decoded file.
    ///
    /// On error the destination is cleared.
    pub fn load_destination<P: AsRef<Path>>(&mut self, path: P) -> OpsResult<()> {
        self.destination = PixelBuffer::empty();
        self.destination = read_buffer(path.as_ref())?;
        Ok(())
    }

    /// Sets the reference image.
    pub fn set_source(&mut self, source: PixelBuffer) {
        self.source = source;
    }

    /// Sets the image to be recolored.
    pub fn set_destination(&mut self, destination: PixelBuffer) {
        self.destination = destination;
    }

    /// Sets transfer options for subsequent [`recolor`](Self::recolor) calls.
    pub fn set_options(&mut self, options: TransferOptions) {
        self.options = options;
    }

    /// Reference image, as loaded.
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// Image being recolored, as loaded.
    pub fn destination(&self) -> &PixelBuffer {
        &self.destination
    }

    /// Source resampled onto the destination frame by the last successful run.
    pub fn aligned(&self) -> &PixelBuffer {
        &self.aligned
    }

    /// Output of the last successful run.
    pub fn result(&self) -> &PixelBuffer {
        &self.result
    }

    /// Current transfer options.
    pub fn options(&self) -> &TransferOptions {
        &self.options
    }

    /// True when both inputs hold pixels.
    pub fn is_ready(&self) -> bool {
        !self.source.is_empty() && !self.destination.is_empty()
    }

    /// Aligns the source to the destination and transfers its statistics.
    ///
    /// With an empty input the result becomes empty and `Ok` is returned.
    ///
    /// # Errors
    ///
    /// Resampling or transfer failures. The previous aligned and result
    /// buffers are kept in that case.
    pub fn recolor(&mut self) -> OpsResult<&PixelBuffer> {
        if !self.is_ready() {
            info!("missing input, result is empty");
            self.aligned = PixelBuffer::empty();
            self.result = PixelBuffer::empty();
            return Ok(&self.result);
        }

        let (w, h) = self.destination.dimensions();
        let aligned = resample_to(&self.source, w, h)?;
        let result = transfer_with(&aligned, &self.destination, &self.options)?;
        debug!(width = w, height = h, "recolored");

        self.aligned = aligned;
        self.result = result;
        Ok(&self.result)
    }

    /// Writes the current result; the format follows the extension.
    ///
    /// # Errors
    ///
    /// [`OpsError::Io`] if the result is empty or encoding fails.
    pub fn export_image<P: AsRef<Path>>(&self, path: P) -> OpsResult<()> {
        let path = path.as_ref();
        recolor_io::save(path, &self.result)?;
        info!(path = %path.display(), "exported");
        Ok(())
    }
}

fn read_buffer(path: &Path) -> OpsResult<PixelBuffer> {
    recolor_io::load(path).map_err(OpsError::from).inspect(|buf| {
        debug!(path = %path.display(), width = buf.width(), height = buf.height(), "loaded");
    })
}
