//! Status banner mapping scan outcomes to user-visible feedback.

use egui::{Color32, Frame, Margin, RichText, Ui};

use crate::state::{BannerKind, State};

/// Renders the latest scan outcome as a colored banner, or nothing before
/// the first outcome.
pub fn status_banner(state: &State, ui: &mut Ui) {
    let Some(banner) = &state.banner else {
        return;
    };

    let fill = match banner.kind {
        BannerKind::Success => Color32::from_rgb(34, 139, 34), // Forest green
        BannerKind::Error => Color32::from_rgb(220, 53, 69),   // Red
        BannerKind::Info => Color32::from_rgb(108, 117, 125),  // Gray
    };

    Frame::NONE
        .fill(fill)
        .inner_margin(Margin::symmetric(8, 2))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.label(RichText::new(&banner.text).color(Color32::WHITE).small());
        });
}
