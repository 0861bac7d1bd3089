use eframe::egui;
use log::{debug, info, warn};
use std::io::Write;

use crate::config::Config;
use crate::editor::{LandmarkEditor, LandmarkEvent};
use crate::geometry::{Point, Size};
use crate::marker::{Landmark, Marker};
use crate::photo::{Photo, PhotoSource};
use crate::sidecar;

// ── Interaction State ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    None,
    Moving { landmark: Landmark },
}

fn marker_color(landmark: Landmark) -> egui::Color32 {
    match landmark {
        Landmark::Crown => egui::Color32::from_rgb(255, 64, 64),
        Landmark::Chin => egui::Color32::from_rgb(64, 160, 255),
    }
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct LandmarkApp {
    photo: Option<Photo>,
    texture: Option<egui::TextureHandle>,
    editor: LandmarkEditor,
    drag: DragState,
    sidecar_enabled: bool,
    status: String,
    window_title: String,
}

impl LandmarkApp {
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            photo: None,
            texture: None,
            editor: LandmarkEditor::new(config.marker_size()),
            drag: DragState::None,
            sidecar_enabled: config.sidecar_enabled(),
            status: String::new(),
            window_title: String::new(),
        };
        if let Some(source) = config.photo_source() {
            app.open_photo(&source);
        }
        let landmarks = config.merge_landmarks(app.editor.landmarks());
        app.editor.set_landmarks(landmarks);
        app
    }

    pub fn title(&self) -> String {
        match &self.photo {
            Some(photo) => format!("landmark-edit - {}", photo.source.display_name()),
            None => "landmark-edit".to_string(),
        }
    }

    /// Decodes a photo and hands its dimensions to the editor. On failure
    /// the current photo stays in place.
    fn open_photo(&mut self, source: &PhotoSource) {
        let photo = match source.load() {
            Ok(photo) => photo,
            Err(e) => {
                warn!("failed to load {}: {e}", source.display_name());
                self.status = format!("Could not open {}: {e}", source.display_name());
                return;
            }
        };
        let size = photo.size();
        info!(
            "loaded {} ({}x{})",
            source.display_name(),
            size.width,
            size.height
        );

        let stored = match (self.sidecar_enabled, source.path()) {
            (true, Some(path)) => sidecar::load_landmarks(path).unwrap_or_else(|e| {
                warn!("ignoring landmark file for {}: {e}", path.display());
                None
            }),
            _ => None,
        };

        self.photo = Some(photo);
        self.texture = None;
        self.status.clear();
        self.editor.set_image_size(size);
        self.editor.set_landmarks(stored.unwrap_or_default());
    }

    fn pick_photo(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"])
            .pick_file()
        {
            self.open_photo(&PhotoSource::File(path));
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(ref photo) = self.photo {
            self.texture = Some(ctx.load_texture(
                "photo",
                photo.to_color_image(),
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    /// Hands completed drags to the host: stdout and the sidecar file.
    fn publish(&mut self, events: Vec<LandmarkEvent>) {
        for event in events {
            match serde_json::to_string(&event.landmarks) {
                Ok(line) => {
                    let mut out = std::io::stdout().lock();
                    if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
                        warn!("failed to write landmarks to stdout: {e}");
                    }
                }
                Err(e) => warn!("failed to serialize landmarks: {e}"),
            }
            self.save_sidecar(&event);
        }
    }

    fn save_sidecar(&mut self, event: &LandmarkEvent) {
        if !self.sidecar_enabled {
            return;
        }
        let Some(path) = self.photo.as_ref().and_then(|p| p.source.path()) else {
            return;
        };
        match sidecar::save_landmarks(path, &event.landmarks) {
            Ok(written) => debug!(
                "saved {} move to {}",
                event.moved.label(),
                written.display()
            ),
            Err(e) => {
                warn!("{e}");
                self.status = format!("Could not save landmarks: {e}");
            }
        }
    }

    fn draw_marker(&self, painter: &egui::Painter, origin: egui::Pos2, marker: &Marker) {
        let rect = egui::Rect::from_min_size(
            origin + marker.pos.to_egui().to_vec2(),
            egui::vec2(marker.size.width, marker.size.height),
        );
        let c = marker_color(marker.landmark);
        let center = origin + marker.center().to_egui().to_vec2();
        let r = rect.width().min(rect.height()) / 2.0;
        let active = self.drag == DragState::Moving { landmark: marker.landmark };
        let stroke = egui::Stroke::new(if active { 2.5 } else { 1.5 }, c);

        painter.circle_stroke(center, r, stroke);
        painter.line_segment(
            [center - egui::vec2(r, 0.0), center + egui::vec2(r, 0.0)],
            stroke,
        );
        painter.line_segment(
            [center - egui::vec2(0.0, r), center + egui::vec2(0.0, r)],
            stroke,
        );
        painter.text(
            rect.right_center() + egui::vec2(4.0, 0.0),
            egui::Align2::LEFT_CENTER,
            marker.landmark.label(),
            egui::FontId::proportional(14.0),
            c,
        );
    }

    fn landmark_label(&self, landmark: Landmark) -> String {
        let lm = self.editor.landmarks();
        let p: Point = match landmark {
            Landmark::Crown => lm.crown,
            Landmark::Chin => lm.chin,
        };
        if p.is_set() {
            format!("{}: ({:.1}, {:.1})", landmark.label(), p.x, p.y)
        } else {
            format!("{}: unset", landmark.label())
        }
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for LandmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open…").clicked() {
                    self.pick_photo();
                }
                ui.separator();
                for landmark in Landmark::ALL {
                    ui.colored_label(marker_color(landmark), self.landmark_label(landmark));
                }
                if let Some(fit) = self.editor.fit() {
                    ui.separator();
                    ui.label(format!("Zoom: {:.0}%", fit.ratio * 100.0));
                }
                if !self.status.is_empty() {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, &self.status);
                }
            });
        });
        let title = self.title();
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }

        // Canvas
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;
            let origin = canvas_rect.min;

            self.editor.resize(Size::from(canvas_rect.size()));

            painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

            // Draw photo
            if let (Some(tex), Some(fit), Some(image)) =
                (&self.texture, self.editor.fit(), self.editor.image_size())
            {
                let (pos, shown) = fit.image_rect(image);
                let img_rect = egui::Rect::from_min_size(
                    origin + pos.to_egui().to_vec2(),
                    egui::vec2(shown.width, shown.height),
                );
                painter.image(
                    tex.id(),
                    img_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            } else if self.photo.is_none() {
                painter.text(
                    canvas_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Open a photo to place crown and chin markers",
                    egui::FontId::proportional(18.0),
                    egui::Color32::from_gray(160),
                );
            }

            // Handle marker drags
            if response.drag_started_by(egui::PointerButton::Primary) {
                if let Some(pos) = ctx.input(|i| i.pointer.press_origin()) {
                    let rel = pos - origin;
                    if let Some(landmark) = self.editor.marker_at(Point::new(rel.x, rel.y)) {
                        self.drag = DragState::Moving { landmark };
                    }
                }
            }

            if response.dragged_by(egui::PointerButton::Primary) {
                if let DragState::Moving { landmark } = self.drag {
                    self.editor.drag_marker(landmark, response.drag_delta());
                }
            }

            if response.drag_stopped_by(egui::PointerButton::Primary) {
                if let DragState::Moving { landmark } = self.drag {
                    self.editor.end_drag(landmark);
                }
                self.drag = DragState::None;
            }

            if self.editor.landmarks_visible() {
                for landmark in Landmark::ALL {
                    self.draw_marker(&painter, origin, self.editor.marker(landmark));
                }
                if let Some(pos) = response.hover_pos() {
                    let rel = pos - origin;
                    if self.editor.marker_at(Point::new(rel.x, rel.y)).is_some() {
                        ctx.set_cursor_icon(egui::CursorIcon::Grab);
                    }
                }
            }
        });

        let events = self.editor.drain_events();
        if !events.is_empty() {
            self.publish(events);
        }
    }
}
