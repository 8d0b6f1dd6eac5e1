pub mod panels;
pub mod plot;

use eframe::egui::{self, Color32};
use threat_lens::color::{named, Rgb};

/// Convert a chart colour into an egui colour.
pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Dark navy page with white text.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = color32(named::NAVY);
    visuals.window_fill = color32(named::NAVY);
    visuals.override_text_color = Some(color32(named::WHITE));
    ctx.set_visuals(visuals);
}
