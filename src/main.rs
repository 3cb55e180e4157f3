mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::LaunchboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path on the command line. A startup load failure is
    // fatal; interactive loads (File → Open…) only set a status message.
    let dataset = std::env::args_os().nth(1).map(PathBuf::from).map(|path| {
        match data::loader::load_file(&path) {
            Ok(ds) => {
                log::info!("Loaded {} launch records from {}", ds.len(), path.display());
                ds
            }
            Err(err) => {
                log::error!("Failed to load {}: {err}", path.display());
                std::process::exit(1);
            }
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launchboard – Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchboardApp::new(dataset)))),
    )
}
