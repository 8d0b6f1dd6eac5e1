mod app;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::ThreatLensApp;
use eframe::egui;
use threat_lens::data::loader::load_file;
use threat_lens::{DashboardConfig, DashboardState};

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    let table = load_file(&config.data_path)?;
    let state = DashboardState::new(Arc::new(table), &config.default_attack_type)
        .context("rendering the initial dashboard")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cybersecurity Threats (2015-2024) Globally",
        options,
        Box::new(move |cc| {
            ui::apply_theme(&cc.egui_ctx);
            Ok(Box::new(ThreatLensApp::new(state, config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
