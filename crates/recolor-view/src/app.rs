//! Main viewer application with eframe/egui integration.
//!
//! Handles UI rendering and user interaction.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use recolor_core::PixelBuffer;
use recolor_ops::Session;
use tracing::debug;

use crate::handler::ViewerHandler;
use crate::messages::{ViewerCommand, ViewerEvent};
use crate::state::{DEFAULT_WINDOW, ViewerPersistence, ViewerState};

const STORAGE_KEY: &str = "recolor_viewer_state";

/// Main viewer application.
pub struct ViewerApp {
    /// Sender for commands to worker thread.
    tx: Sender<ViewerCommand>,
    /// Receiver for results from worker thread.
    rx: Receiver<ViewerEvent>,
    /// Worker thread handle (Option for Drop).
    worker: Option<JoinHandle<Session>>,

    /// Result texture, uploaded once.
    texture: Option<TextureHandle>,

    /// Runtime state.
    state: ViewerState,
}

/// Configuration for launching the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Window title.
    pub title: String,
    /// Initial window size in points.
    pub initial_size: [f32; 2],
    /// Verbosity level.
    pub verbose: u8,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "recolor".into(),
            initial_size: DEFAULT_WINDOW,
            verbose: 0,
        }
    }
}

impl ViewerApp {
    /// Creates a new viewer application showing the session's result.
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        let dims = session.result().dimensions();
        let texture = (!session.result().is_empty()).then(|| {
            cc.egui_ctx.load_texture(
                "recolor_result",
                to_color_image(session.result()),
                TextureOptions::LINEAR,
            )
        });

        // Create bidirectional channels
        let (tx_to_worker, rx_in_worker) = channel();
        let (tx_to_ui, rx_from_worker) = channel();

        let worker = thread::spawn(move || {
            ViewerHandler::new(rx_in_worker, tx_to_ui, session).run()
        });

        // Load persisted settings
        let persistence: ViewerPersistence = cc
            .storage
            .and_then(|s| eframe::get_value(s, STORAGE_KEY))
            .unwrap_or_default();

        Self {
            tx: tx_to_worker,
            rx: rx_from_worker,
            worker: Some(worker),
            texture,
            state: ViewerState::from_persistence(&persistence, dims),
        }
    }

    fn send(&self, cmd: ViewerCommand) {
        let _ = self.tx.send(cmd);
    }

    /// Ask for an output file and hand it to the worker.
    fn save_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name("recolored.png");
        if let Some(dir) = &self.state.last_export_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.send(ViewerCommand::Export(path));
        }
    }

    /// Process all pending events from worker. Returns true if any events were processed.
    fn process_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.rx.try_recv() {
            had_events = true;
            match event {
                ViewerEvent::Exported(path) => {
                    self.state.last_export_dir = path.parent().map(PathBuf::from);
                    self.state.status = Some(format!("Wrote {}", path.display()));
                }
                ViewerEvent::ViewportChanged(viewport) => {
                    self.state.viewport = viewport;
                }
                ViewerEvent::Error(msg) => {
                    self.state.status = Some(msg);
                }
            }
        }
        had_events
    }

    /// Handle keyboard input. Returns true if should exit.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        let mut exit = false;
        let mut save = false;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Q) {
                exit = true;
            }
            if i.key_pressed(egui::Key::W) {
                save = true;
            }
        });

        // Handle actions outside input closure
        if save {
            self.save_file_dialog();
        }

        exit
    }

    /// Draw bottom hints panel.
    fn draw_hints(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("hints").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (w, h) = self.state.image_dims;
                ui.label(format!("{w}x{h}"));
                ui.separator();
                if let Some(status) = &self.state.status {
                    ui.label(status);
                    ui.separator();
                }
                ui.label("W: Write | Q/Esc: Quit");
            });
        });
    }

    /// Draw main canvas with image.
    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let available = ui.available_size();

                // Track window size changes
                if (self.state.window_size[0] - available.x).abs() > 1.0
                    || (self.state.window_size[1] - available.y).abs() > 1.0
                    || self.state.viewport.width == 0
                {
                    self.state.window_size = [available.x, available.y];
                    self.send(ViewerCommand::Resize(self.state.window_size));
                }

                let (rect, _) = ui.allocate_exact_size(available, egui::Sense::hover());
                let Some(texture) = &self.texture else {
                    return;
                };

                let vp = self.state.viewport;
                let image_rect = egui::Rect::from_min_size(
                    rect.min + egui::vec2(vp.x as f32, vp.y as f32),
                    egui::vec2(vp.width as f32, vp.height as f32),
                );
                ui.painter_at(rect).image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            });
    }
}

/// Converts a bottom-first buffer to an egui image (top row first).
pub(crate) fn to_color_image(buf: &PixelBuffer) -> ColorImage {
    let (w, h) = buf.dimensions();
    let pixels = buf
        .rows()
        .rev()
        .flatten()
        .map(|p| Color32::from_rgba_unmultiplied(p.r, p.g, p.b, p.a))
        .collect();
    ColorImage {
        size: [w as usize, h as usize],
        pixels,
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_events = self.process_events();

        if self.handle_input(ctx) {
            self.send(ViewerCommand::Quit);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.draw_hints(ctx);
        self.draw_canvas(ctx);

        if had_events {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self.state.to_persistence());
    }
}

impl Drop for ViewerApp {
    fn drop(&mut self) {
        // Signal worker to stop
        let _ = self.tx.send(ViewerCommand::Quit);

        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            debug!("viewer worker panicked");
        }
    }
}
