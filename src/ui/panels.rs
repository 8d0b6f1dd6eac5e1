use std::path::Path;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};
use threat_lens::data::loader::load_file;

use crate::app::ThreatLensApp;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, app: &mut ThreatLensApp) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                let path = app.config.data_path.clone();
                load_into(app, &path);
                ui.close_menu();
            }
            if ui.button("Open…").clicked() {
                open_file_dialog(app);
                ui.close_menu();
            }
        });

        ui.separator();

        let frame = app.state.frame();
        ui.label(format!(
            "{} incidents loaded, {} matching",
            app.state.table().len(),
            frame.filtered_rows
        ));

        if app.config.debug {
            ui.separator();
            ui.label(format!("source: {}", app.config.data_path.display()));
        }

        if let Some(msg) = &app.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Attack-type selector
// ---------------------------------------------------------------------------

/// Page title, the attack-type combo box and the selection label.
pub fn selector(ui: &mut Ui, app: &mut ThreatLensApp) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Cybersecurity Threats (2015-2024) Globally").strong());
    });
    ui.add_space(4.0);

    // Clone what we need so we can mutate state inside the combo box.
    let attack_types = app.state.table().attack_types().to_vec();
    let current = app.state.selection().to_string();
    let mut chosen: Option<String> = None;

    egui::ComboBox::from_id_salt("select_attack_type")
        .selected_text(&current)
        .width(260.0)
        .show_ui(ui, |ui: &mut Ui| {
            for attack_type in &attack_types {
                if ui
                    .selectable_label(current == *attack_type, attack_type)
                    .clicked()
                {
                    chosen = Some(attack_type.clone());
                }
            }
        });

    if let Some(attack_type) = chosen.filter(|c| *c != current) {
        match app.state.select(&attack_type) {
            Ok(_) => app.status_message = None,
            Err(e) => {
                log::error!("Selection failed: {e}");
                app.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    ui.label(
        RichText::new(&app.state.frame().label)
            .strong()
            .size(20.0),
    );
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(app: &mut ThreatLensApp) {
    let file = rfd::FileDialog::new()
        .set_title("Open incident data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if load_into(app, &path) {
            app.config.data_path = path;
        }
    }
}

/// Load `path` and swap it in; failures leave the current table in place.
fn load_into(app: &mut ThreatLensApp, path: &Path) -> bool {
    let result = load_file(path)
        .and_then(|table| app.state.replace_table(Arc::new(table)).map(|_| ()));
    match result {
        Ok(()) => {
            app.status_message = None;
            true
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            app.status_message = Some(format!("Error: {e}"));
            false
        }
    }
}
