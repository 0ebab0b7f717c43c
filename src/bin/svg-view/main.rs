#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod constants;
mod document;
mod ui;

use clap::Parser;
use constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use document::Document;
use eframe::egui::{self, ColorImage, Pos2, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use log::error;
use std::path::{Path, PathBuf};
use svg_view::Viewport;

#[derive(Parser, Debug)]
#[command(name = "svg-view", version, about = "A minimal pan/zoom SVG viewer")]
struct Args {
    /// SVG document to open at startup
    path: Option<PathBuf>,
}

/// Main application state for the SVG viewer.
pub struct SvgViewApp {
    document: Option<Document>,
    viewport: Viewport,
    /// Current document texture, tagged with the raster scale it was
    /// rendered at.
    texture: Option<(TextureHandle, f32)>,
    /// Refit the viewport against the widget size known at the next frame.
    /// Set on load and by the Center action.
    fit_requested: bool,
    /// Last cursor location in document coordinates, for the status bar.
    pointer_doc: Option<Pos2>,
    toasts: Toasts,
}

impl SvgViewApp {
    fn new(cc: &eframe::CreationContext<'_>, path: Option<PathBuf>) -> Self {
        let toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let mut app = Self {
            document: None,
            viewport: Viewport::default(),
            texture: None,
            fit_requested: false,
            pointer_doc: None,
            toasts,
        };

        if let Some(path) = path {
            app.load(&cc.egui_ctx, &path);
        }

        app
    }

    /// Loads a document, surfacing failures as error toasts. The viewport
    /// and current document are unchanged on failure.
    pub fn load(&mut self, ctx: &egui::Context, path: &Path) {
        match Document::load(path) {
            Ok(document) => {
                log::info!("loaded {}", document.path.display());

                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!("{name} - SVG View")));

                self.document = Some(document);
                self.texture = None;
                self.pointer_doc = None;
                self.fit_requested = true;
            }
            Err(err) => {
                error!("{err}");
                self.toasts.add(Toast {
                    kind: ToastKind::Error,
                    text: err.to_string().into(),
                    options: ToastOptions::default()
                        .duration_in_seconds(8.0)
                        .show_icon(true),
                    ..Default::default()
                });
            }
        }
    }

    /// Re-rasterizes the document when the zoom has crossed into a new
    /// raster bucket.
    fn ensure_texture(&mut self, ctx: &egui::Context) {
        let Some(document) = &self.document else {
            self.texture = None;
            return;
        };

        let wanted = document::raster_scale_for(self.viewport.scale(), document.bounds);
        if self
            .texture
            .as_ref()
            .is_some_and(|(_, scale)| *scale == wanted)
        {
            return;
        }

        match document.rasterize(wanted) {
            Ok(raster) => {
                let image = ColorImage::from_rgba_premultiplied(
                    [raster.width as usize, raster.height as usize],
                    &raster.pixels,
                );
                let texture = ctx.load_texture("document", image, TextureOptions::LINEAR);
                self.texture = Some((texture, wanted));
            }
            Err(err) => {
                error!("{err}");
                self.texture = None;
            }
        }
    }
}

impl eframe::App for SvgViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_input(ctx);
        self.handle_dropped_files(ctx);

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(
        "SVG View",
        options,
        Box::new(move |cc| Ok(Box::new(SvgViewApp::new(cc, args.path)))),
    )
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }
}
