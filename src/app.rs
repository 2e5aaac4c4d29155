use eframe::egui;
use octs_plot::config::ViewerConfig;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OctsApp {
    pub state: AppState,
}

impl OctsApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for OctsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: model groups ----
        egui::SidePanel::left("model_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: box-plot statistics ----
        if self.state.bundle.as_ref().is_some_and(|b| b.boxplot.is_some()) {
            egui::TopBottomPanel::bottom("summary_panel")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    plot::summary_table(ui, &self.state);
                });
        }

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::ozone_plot(ui, &self.state);
        });
    }
}
