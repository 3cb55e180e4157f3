use eframe::egui;

use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchboardApp {
    pub state: AppState,
}

impl LaunchboardApp {
    /// Start with an optionally preloaded dataset (from the command line).
    pub fn new(dataset: Option<Dataset>) -> Self {
        let mut state = AppState::default();
        if let Some(ds) = dataset {
            state.set_dataset(ds);
        }
        Self { state }
    }
}

impl Default for LaunchboardApp {
    fn default() -> Self {
        Self::new(None)
    }
}

impl eframe::App for LaunchboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: payload scatter ----
        egui::TopBottomPanel::bottom("scatter_panel")
            .default_height(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::payload_scatter(ui, &self.state);
            });

        // ---- Central panel: success pie ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::success_pie(ui, &self.state);
        });
    }
}
