//! Scanner view: camera preview, viewfinder overlay, and the scan toggle.

use egui::{Align2, Color32, FontId, Rect, RichText, Stroke, Ui, pos2};
use scanbox_scan::{OverlayGeometry, frame_to_color_image};

use crate::state::State;

/// Side length of the viewfinder area, in points.
const VIEWFINDER_SIDE: f32 = 240.0;

/// Renders the scanner: preview frame (when running), dimming mask and
/// corner brackets on top, and the start/stop button below.
pub fn scan_view(state: &mut State, ui: &mut Ui) {
    ui.vertical(|ui| {
        ui.label(RichText::new("Scanner").strong());
        ui.add_space(4.0);

        let side = VIEWFINDER_SIDE.min(ui.available_width().max(120.0));
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
        let view = response.rect;

        refresh_preview_texture(state, ui);

        if state.is_scanning() && state.preview_texture.is_some() {
            if let Some(texture) = &state.preview_texture {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture.id(), view, uv, Color32::WHITE);
            }
        } else {
            painter.rect_filled(view, 4.0, Color32::from_gray(24));
            painter.text(
                view.center(),
                Align2::CENTER_CENTER,
                "Camera idle",
                FontId::proportional(14.0),
                Color32::GRAY,
            );
        }

        let mask_opacity = state.overlay_config.mask_opacity;
        let geometry = state.overlay_geometry(view);
        paint_overlay(&painter, geometry, mask_opacity);

        ui.add_space(6.0);
        let label = if state.is_scanning() {
            "Stop Scan"
        } else {
            "Start Scan"
        };
        if ui.button(label).clicked() {
            if state.is_scanning() {
                state.stop_scan(true);
            } else {
                state.start_scan();
            }
        }
    });
}

/// Pushes the session's latest frame into the preview texture.
fn refresh_preview_texture(state: &mut State, ui: &Ui) {
    let Some(session) = &state.session else {
        return;
    };
    let Some(frame) = session.preview() else {
        return;
    };
    let image = frame_to_color_image(frame);
    match &mut state.preview_texture {
        Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
        None => {
            state.preview_texture = Some(ui.ctx().load_texture(
                "scan_preview",
                image,
                egui::TextureOptions::NEAREST,
            ));
        }
    }
}

fn paint_overlay(painter: &egui::Painter, geometry: &OverlayGeometry, mask_opacity: f32) {
    let mask = Color32::from_black_alpha((mask_opacity.clamp(0.0, 1.0) * 255.0) as u8);
    for band in &geometry.dim_bands {
        painter.rect_filled(*band, 0.0, mask);
    }
    let stroke = Stroke::new(geometry.stroke_width, Color32::WHITE);
    for bracket in &geometry.brackets {
        painter.add(egui::Shape::line(bracket.clone(), stroke));
    }
}
