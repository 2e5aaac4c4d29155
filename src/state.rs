use std::path::Path;

use anyhow::Context;
use octs_plot::chart::{build_series, ChartOptions, PlotKind, SeriesBundle};
use octs_plot::config::ViewerConfig;
use octs_plot::data::filter::{included_models, ModelGroup};
use octs_plot::ModelTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Plot currently selected in the top bar.
    pub plot_kind: PlotKind,

    /// Pre-transformed models of the loaded payload (None until loaded).
    pub table: Option<ModelTable>,

    /// Model groups with their visibility switches.
    pub groups: Vec<ModelGroup>,

    /// Series of the visible models (cached, rebuilt on every change).
    pub bundle: Option<SeriesBundle>,

    /// Options matching `bundle`.
    pub options: Option<ChartOptions>,

    /// User-entered plot title; empty means the configured default.
    pub title: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let plot_kind = config.default_plot_kind();
        Self {
            config,
            plot_kind,
            table: None,
            groups: Vec::new(),
            bundle: None,
            options: None,
            title: String::new(),
            status_message: None,
        }
    }

    /// Ingest a freshly loaded table as a new, fully visible group.
    pub fn set_table(&mut self, table: ModelTable, group_name: &str) {
        self.groups = vec![ModelGroup::from_table(group_name, &table)];
        self.table = Some(table);
        self.status_message = None;
        self.rebuild();
    }

    /// Switching plot kind invalidates the loaded data, which only fits
    /// one kind.
    pub fn set_plot_kind(&mut self, kind: PlotKind) {
        if kind == self.plot_kind {
            return;
        }
        self.plot_kind = kind;
        self.table = None;
        self.groups.clear();
        self.bundle = None;
        self.options = None;
    }

    /// Recompute series and options after any change.
    pub fn rebuild(&mut self) {
        let Some(table) = &self.table else {
            self.bundle = None;
            self.options = None;
            return;
        };
        let filter = included_models(&self.groups);
        match build_series(self.plot_kind, table, &filter) {
            Ok(bundle) => {
                self.options = Some(ChartOptions::for_plot(
                    self.plot_kind,
                    &bundle.styling,
                    &self.title,
                    &self.config,
                ));
                self.bundle = Some(bundle);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to build {} series: {e}", self.plot_kind);
                self.status_message = Some(format!("Error: {e}"));
                self.bundle = None;
                self.options = None;
            }
        }
    }

    /// Toggle a whole group.
    pub fn toggle_group(&mut self, group: usize) {
        if let Some(g) = self.groups.get_mut(group) {
            g.is_visible = !g.is_visible;
            self.rebuild();
        }
    }

    /// Toggle a single model within a group.
    pub fn toggle_model(&mut self, group: usize, model: &str) {
        let Some(g) = self.groups.get_mut(group) else {
            return;
        };
        let visible = g
            .models
            .iter()
            .find(|m| m.name == model)
            .map(|m| m.is_visible);
        if let Some(visible) = visible {
            g.set_model_visible(model, !visible);
            self.rebuild();
        }
    }

    /// Show or hide every model of a group.
    pub fn set_group_models(&mut self, group: usize, visible: bool) {
        if let Some(g) = self.groups.get_mut(group) {
            g.set_all_visible(visible);
            self.rebuild();
        }
    }

    /// Write the current series, styling and options as JSON.
    pub fn export(&self, path: &Path) -> anyhow::Result<()> {
        let bundle = self.bundle.as_ref().context("nothing to export")?;
        let doc = serde_json::json!({
            "plotId": bundle.kind,
            "series": bundle.chart_series(),
            "styling": bundle.styling,
            "options": self.options,
        });
        let text = serde_json::to_string_pretty(&doc)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octs_plot::data::loader::parse_payload;

    const PAYLOAD: &str = r#"[
        {"model": "m1", "plotstyle": {"color": "red", "linestyle": "solid"},
         "x": [1960, 1961], "y": [300.0, 301.0]},
        {"model": "m2", "plotstyle": {"color": "blue", "linestyle": "dashed"},
         "x": [1960], "y": [299.0]}
    ]"#;

    fn loaded() -> AppState {
        let mut state = AppState::new(ViewerConfig::default());
        let table = parse_payload(PlotKind::TimeSeries, PAYLOAD).unwrap();
        state.set_table(table, "payload");
        state
    }

    #[test]
    fn loading_shows_every_model() {
        let state = loaded();
        let bundle = state.bundle.as_ref().unwrap();
        assert_eq!(bundle.series.len(), 2);
        assert_eq!(state.options.as_ref().unwrap().title, "OCTS Plot");
    }

    #[test]
    fn toggles_rebuild_series() {
        let mut state = loaded();
        state.toggle_model(0, "m1");
        assert_eq!(state.bundle.as_ref().unwrap().series.len(), 1);

        state.toggle_group(0);
        assert!(state.bundle.as_ref().unwrap().series.is_empty());

        state.toggle_group(0);
        state.set_group_models(0, true);
        assert_eq!(state.bundle.as_ref().unwrap().series.len(), 2);
    }

    #[test]
    fn switching_kind_drops_data() {
        let mut state = loaded();
        state.set_plot_kind(PlotKind::ReturnYear);
        assert!(state.table.is_none());
        assert!(state.bundle.is_none());
        assert!(state.export(Path::new("unused.json")).is_err());
    }
}
