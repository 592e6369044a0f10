//! Generator card: the demo payload rendered as a QR image.

use egui::{Color32, RichText, Ui};
use scanbox_scan::generate_qr_image;

use crate::state::State;

/// Pixel size of the generated QR texture.
const QR_IMAGE_SIZE: usize = 200;

/// Renders the generated QR image for the demo payload, generating and
/// caching the texture on first use.
pub fn qr_card(state: &mut State, ui: &mut Ui) {
    ui.vertical(|ui| {
        ui.label(RichText::new("Generated code").strong());
        ui.add_space(4.0);

        if state.qr_texture.is_none() && state.qr_error.is_none() {
            match generate_qr_image(&state.demo_payload, QR_IMAGE_SIZE) {
                Ok(image) => {
                    state.qr_texture = Some(ui.ctx().load_texture(
                        "qr_code_display",
                        image,
                        egui::TextureOptions::NEAREST,
                    ));
                }
                Err(err) => {
                    log::error!("QR generation failed: {err}");
                    state.qr_error = Some(err.to_string());
                }
            }
        }

        egui::Frame::NONE
            .fill(Color32::WHITE)
            .inner_margin(egui::Margin::same(8))
            .corner_radius(4.0)
            .show(ui, |ui| {
                if let Some(texture) = &state.qr_texture {
                    ui.image(texture);
                } else if let Some(error) = &state.qr_error {
                    ui.label(RichText::new(error).color(Color32::DARK_RED).small());
                }
            });

        ui.add_space(4.0);
        ui.label(RichText::new(&state.demo_payload).monospace().small());
    });
}
