use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::selection::SiteSelection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(ws) = &state.workspace else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state after the widgets.
    let sites: Vec<String> = ws.dataset().sites().to_vec();
    let current_site = ws.selection().site().clone();
    let (min_mass, max_mass) = ws.dataset().payload_bounds();

    // ---- Launch site dropdown ----
    ui.strong("Launch site");
    let mut pending_site: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site_select")
        .selected_text(current_site.to_string())
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current_site == SiteSelection::All, "All Sites")
                .clicked()
            {
                pending_site = Some(SiteSelection::All);
            }
            for site in &sites {
                let selected = current_site == SiteSelection::Site(site.clone());
                if ui.selectable_label(selected, site).clicked() {
                    pending_site = Some(SiteSelection::Site(site.clone()));
                }
            }
        });
    if let Some(site) = pending_site {
        state.select_site(site);
    }

    ui.separator();

    // ---- Payload range sliders ----
    // The sliders edit a draft; each change is committed through
    // `apply_range`, which rejects an inverted range and keeps the last
    // valid one.
    ui.strong("Payload range (kg)");
    let low_changed = ui
        .add(Slider::new(&mut state.range_input.0, min_mass..=max_mass).text("min"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut state.range_input.1, min_mass..=max_mass).text("max"))
        .changed();
    if low_changed || high_changed {
        state.apply_range();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ws) = &state.workspace {
            ui.label(format!(
                "{} launches loaded, {} shown",
                ws.dataset().len(),
                ws.point_set().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records from {} sites",
                    dataset.len(),
                    dataset.sites().len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
