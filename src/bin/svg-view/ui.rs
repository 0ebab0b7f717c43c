//! UI rendering and input handling for the viewer window.

use crate::SvgViewApp;
use eframe::egui;

impl SvgViewApp {
    /// Keyboard shortcuts: Ctrl+O open, Ctrl+Q quit, Space center.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (open, quit, center) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::O),
                i.modifiers.command && i.key_pressed(egui::Key::Q),
                i.key_pressed(egui::Key::Space),
            )
        });

        if open {
            self.open_file_dialog(ctx);
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if center {
            self.fit_requested = true;
        }
    }

    /// Loads a file dropped onto the window.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.last().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.load(ctx, &path);
        }
    }

    /// Opens the modal file picker. Cancelling leaves everything unchanged.
    pub fn open_file_dialog(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .add_filter("SVG documents", &["svg", "svgz"])
            .add_filter("All files", &["*"])
            .pick_file();

        if let Some(path) = picked {
            self.load(ctx, &path);
        }
    }

    /// Renders the menu bar with File and Edit menus.
    pub fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open...").clicked() {
                        ui.close();
                        self.open_file_dialog(ctx);
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ui.close();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Edit", |ui| {
                    if ui.button("Center").clicked() {
                        ui.close();
                        self.fit_requested = true;
                    }
                });
            });
        });
    }

    /// Renders the bottom status bar: cursor position in document
    /// coordinates and a controls hint.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.pointer_doc {
                    Some(pos) => ui.label(format!("{:.3} {:.3}", pos.x, pos.y)),
                    None => ui.label("--"),
                };

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Scroll: Zoom | Drag: Pan | Space: Center");
                });
            });
        });
    }

    /// Renders the central panel containing the document view.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.document.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("No document. Open one with File > Open... (Ctrl+O)");
                });
                return;
            }

            self.show_document(ui, ctx);
        });
    }

    /// Draws the rasterized document at its viewport-transformed rectangle.
    fn show_document(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (viewport_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let widget_size = viewport_rect.size();

        let Some(bounds) = self.document.as_ref().map(|d| d.bounds) else {
            return;
        };

        if self.fit_requested {
            self.viewport.fit(bounds, widget_size);
            self.fit_requested = false;
        }

        self.handle_pointer(ui, &response, viewport_rect);
        self.ensure_texture(ctx);

        let painter = ui.painter().with_clip_rect(viewport_rect);
        painter.rect_filled(viewport_rect, 0.0, egui::Color32::WHITE);

        if let Some((texture, _)) = &self.texture {
            let min = self.viewport.doc_to_pixel(bounds.min, widget_size)
                + viewport_rect.min.to_vec2();
            let max = self.viewport.doc_to_pixel(bounds.max, widget_size)
                + viewport_rect.min.to_vec2();

            painter.image(
                texture.id(),
                egui::Rect::from_min_max(min, max),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    /// Feeds drag and wheel input into the viewport and records the cursor
    /// location in document coordinates for the status bar.
    fn handle_pointer(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        viewport_rect: egui::Rect,
    ) {
        let widget_size = viewport_rect.size();
        let to_widget = |pos: egui::Pos2| pos - viewport_rect.min.to_vec2();

        if response.drag_started()
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.viewport.mouse_down(to_widget(pos));
        }

        if response.dragged()
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.viewport.mouse_move(to_widget(pos));
        }

        if response.drag_stopped() {
            match response.interact_pointer_pos().or_else(|| response.hover_pos()) {
                Some(pos) => self.viewport.mouse_up(to_widget(pos)),
                // Released outside the window; no final position to apply.
                None => self.viewport.cancel_drag(),
            }
        }

        let hover_pos = ui.input(|i| i.pointer.hover_pos());
        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);

        if scroll_delta != 0.0 && hover_pos.is_some_and(|p| viewport_rect.contains(p)) {
            self.viewport.wheel(scroll_delta);
        }

        if let Some(pos) = response.interact_pointer_pos().or(hover_pos) {
            self.pointer_doc = Some(self.viewport.pixel_to_doc(to_widget(pos), widget_size));
        }
    }
}
