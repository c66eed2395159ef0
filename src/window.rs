//! eframe side of the shell: turns `App::update` calls into blocking frame
//! events and declares the widget tree when the dispatcher renders them.

use crate::dispatcher::{Renderer, UiActions};
use crate::errors::ShellError;
use crate::session::Session;
use crate::shell::{EventSource, WindowEvent};
use egui::{ColorImage, RichText, TextureHandle};
use image::DynamicImage;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

enum Bridged {
    Frame(egui::Context),
    Closing,
}

/// Creates the eframe app and the event source it feeds.
pub fn bridge() -> (ViewerApp, EguiEvents) {
    let (frames_tx, frames_rx) = sync_channel(0);
    let (presented_tx, presented_rx) = sync_channel(0);
    (
        ViewerApp {
            frames: frames_tx,
            presented: presented_rx,
        },
        EguiEvents {
            frames: frames_rx,
            presented: presented_tx,
        },
    )
}

pub struct ViewerApp {
    frames: SyncSender<Bridged>,
    presented: Receiver<()>,
}

impl ViewerApp {
    /// Hands the frame to the dispatcher and blocks until it has been declared.
    fn present(&mut self, ctx: &egui::Context) {
        if self.frames.send(Bridged::Frame(ctx.clone())).is_ok() {
            let _ = self.presented.recv();
        }
    }

    fn close(&mut self) {
        let _ = self.frames.send(Bridged::Closing);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.present(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::debug!("Window closing");
        self.close();
    }
}

pub struct EguiEvents {
    frames: Receiver<Bridged>,
    presented: SyncSender<()>,
}

impl EventSource for EguiEvents {
    type Frame = EguiFrame;

    fn next_event(&mut self) -> WindowEvent<EguiFrame> {
        match self.frames.recv() {
            Ok(Bridged::Frame(ctx)) => WindowEvent::Frame(EguiFrame {
                ctx,
                presented: Some(self.presented.clone()),
            }),
            Ok(Bridged::Closing) => WindowEvent::Destroy(None),
            Err(_) => WindowEvent::Destroy(Some(ShellError::WindowLost)),
        }
    }
}

/// One pass of the egui frame. Dropping it lets the window finish the pass.
pub struct EguiFrame {
    ctx: egui::Context,
    presented: Option<SyncSender<()>>,
}

impl Drop for EguiFrame {
    fn drop(&mut self) {
        if let Some(presented) = self.presented.take() {
            let _ = presented.send(());
        }
    }
}

struct Preview {
    revision: u64,
    texture: TextureHandle,
}

/// Declares the vertical stack: open button, image or error, save button, save error.
pub struct EguiRenderer {
    ctx: egui::Context,
    preview: Option<Preview>,
}

impl EguiRenderer {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx, preview: None }
    }

    fn sync_preview(&mut self, ctx: &egui::Context, session: &Session) {
        let Some(loaded) = session.loaded() else {
            self.preview = None;
            return;
        };
        if self.preview.as_ref().map(|p| p.revision) == Some(session.revision()) {
            return;
        }
        self.preview = Some(Preview {
            revision: session.revision(),
            texture: upload_texture(ctx, &loaded.image),
        });
    }
}

impl Renderer<EguiFrame> for EguiRenderer {
    fn render(&mut self, frame: EguiFrame, session: &Session) -> UiActions {
        let ctx = frame.ctx.clone();
        self.sync_preview(&ctx, session);
        let mut actions = UiActions::default();

        egui::TopBottomPanel::top("open_panel").show(&ctx, |ui| {
            actions.open_clicked = ui.button("Open Image").clicked();
        });

        egui::TopBottomPanel::bottom("save_panel").show(&ctx, |ui| {
            actions.save_clicked = ui
                .add_enabled(session.can_save(), egui::Button::new("Save Image"))
                .clicked();
            if let Some(err) = session.save_error() {
                ui.label(RichText::new(err.to_string()).heading());
            }
        });

        let preview = self.preview.as_ref();
        egui::CentralPanel::default().show(&ctx, |ui| {
            if let Some(err) = session.open_error() {
                ui.label(RichText::new(err.to_string()).heading());
            } else if let Some(preview) = preview {
                let size = ui.available_size();
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::from_texture(&preview.texture).fit_to_exact_size(size));
                });
            }
        });

        drop(frame);
        actions
    }

    fn invalidate(&self) {
        self.ctx.request_repaint();
    }
}

fn upload_texture(ctx: &egui::Context, image: &DynamicImage) -> TextureHandle {
    // Textures larger than the GPU limit cannot be uploaded; show a downscaled copy instead.
    let max_side = ctx.input(|i| i.max_texture_side) as u32;
    let rgba = if image.width() > max_side || image.height() > max_side {
        log::debug!(
            "Downscaling {}x{} preview to fit {}px textures",
            image.width(),
            image.height(),
            max_side
        );
        image.thumbnail(max_side, max_side).to_rgba8()
    } else {
        image.to_rgba8()
    };

    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.as_flat_samples();
    ctx.load_texture(
        "preview",
        ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
        egui::TextureOptions::LINEAR,
    )
}
