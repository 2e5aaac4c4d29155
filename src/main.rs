mod app;
mod state;
mod ui;

use app::OctsApp;
use eframe::egui;
use octs_plot::config::ViewerConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::from_env().unwrap_or_else(|e| {
        log::error!("Ignoring configuration: {e:#}");
        ViewerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "OCTS Plot – Ozone Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(OctsApp::new(config)))),
    )
}
