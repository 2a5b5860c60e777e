//! Worker thread handler.
//!
//! Owns the [`Session`] while the window is open so exports never block
//! the UI thread.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use recolor_ops::Session;
use tracing::{debug, error, info};

use crate::messages::{ViewerCommand, ViewerEvent};
use crate::state::Viewport;

/// Worker thread handler.
pub struct ViewerHandler {
    rx: Receiver<ViewerCommand>,
    tx: Sender<ViewerEvent>,
    session: Session,
    viewport: Viewport,
}

impl ViewerHandler {
    /// Creates a new handler.
    pub fn new(rx: Receiver<ViewerCommand>, tx: Sender<ViewerEvent>, session: Session) -> Self {
        Self {
            rx,
            tx,
            session,
            viewport: Viewport::default(),
        }
    }

    /// Main event loop. Returns the session once the UI quits.
    pub fn run(mut self) -> Session {
        while let Ok(cmd) = self.rx.recv() {
            if !self.handle(cmd) {
                break;
            }
        }
        debug!("viewer handler shutdown");
        self.session
    }

    /// Applies one command. Returns false on quit.
    pub fn handle(&mut self, cmd: ViewerCommand) -> bool {
        match cmd {
            ViewerCommand::Quit => return false,
            ViewerCommand::Export(path) => self.export(path),
            ViewerCommand::Resize(size) => self.resize(size),
        }
        true
    }

    fn send(&self, event: ViewerEvent) {
        let _ = self.tx.send(event);
    }

    fn export(&self, path: PathBuf) {
        match self.session.export_image(&path) {
            Ok(()) => {
                info!(path = %path.display(), "written");
                self.send(ViewerEvent::Exported(path));
            }
            Err(e) => {
                error!(path = %path.display(), "cannot write image: {e}");
                self.send(ViewerEvent::Error(format!("Cannot write {}: {e}", path.display())));
            }
        }
    }

    fn resize(&mut self, size: [f32; 2]) {
        let window = (size[0].max(0.0) as u32, size[1].max(0.0) as u32);
        let viewport = Viewport::fit(self.session.result().dimensions(), window);
        if viewport != self.viewport {
            self.viewport = viewport;
            self.send(ViewerEvent::ViewportChanged(viewport));
        }
    }
}
