use eframe::egui;

use threat_lens::{DashboardConfig, DashboardState};

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ThreatLensApp {
    pub state: DashboardState,
    pub config: DashboardConfig,
    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl ThreatLensApp {
    pub fn new(state: DashboardState, config: DashboardConfig) -> Self {
        Self {
            state,
            config,
            status_message: None,
        }
    }
}

impl eframe::App for ThreatLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, self);
        });

        // ---- Header: title, attack-type selector, selection label ----
        egui::TopBottomPanel::top("selector").show(ctx, |ui| {
            panels::selector(ui, self);
        });

        // ---- Central panel: chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_grid(ui, self.state.frame());
        });
    }
}
