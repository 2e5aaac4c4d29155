//! Viewer configuration.
//!
//! Read once at start-up from the JSON file named by `OCTS_CONFIG`; every
//! field falls back to its default when the variable, the file or the key
//! is missing.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::chart::PlotKind;

/// Environment variable pointing at a JSON configuration file.
pub const CONFIG_ENV: &str = "OCTS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Default title of the time-series plot
    pub time_series_title: String,
    /// Default title of the return-year plot
    pub return_year_title: String,
    /// Fill of the upper box half (median → Q3)
    pub box_upper_color: String,
    /// Fill of the lower box half (Q1 → median)
    pub box_lower_color: String,
    /// Scatter marker size in the return-year plot
    pub marker_size: f32,
    /// Plot shown when the viewer opens: "tco3_zm" or "tco3_return"
    pub default_plot: String,
    /// Initial window size in logical pixels
    pub window_size: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            time_series_title: "OCTS Plot".to_string(),
            return_year_title: "Return/Recovery".to_string(),
            box_upper_color: "#8def4e".to_string(),
            box_lower_color: "#63badb".to_string(),
            marker_size: 5.0,
            default_plot: PlotKind::TimeSeries.id().to_string(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl ViewerConfig {
    /// Load from `OCTS_CONFIG` if set, defaults otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Title for `kind`.
    pub fn title(&self, kind: PlotKind) -> &str {
        match kind {
            PlotKind::TimeSeries => &self.time_series_title,
            PlotKind::ReturnYear => &self.return_year_title,
        }
    }

    /// `default_plot` parsed; unknown identifiers fall back to the time series.
    pub fn default_plot_kind(&self) -> PlotKind {
        self.default_plot.parse().unwrap_or_else(|e| {
            log::warn!("{e}; falling back to {}", PlotKind::TimeSeries);
            PlotKind::TimeSeries
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg = ViewerConfig::from_json(r#"{"marker_size": 8.0}"#).unwrap();
        assert_eq!(cfg.marker_size, 8.0);
        assert_eq!(cfg.box_upper_color, "#8def4e");
        assert_eq!(cfg.title(PlotKind::ReturnYear), "Return/Recovery");
    }

    #[test]
    fn default_plot_parsing() {
        let cfg = ViewerConfig::from_json(r#"{"default_plot": "tco3_return"}"#).unwrap();
        assert_eq!(cfg.default_plot_kind(), PlotKind::ReturnYear);

        let cfg = ViewerConfig::from_json(r#"{"default_plot": "vrom3"}"#).unwrap();
        assert_eq!(cfg.default_plot_kind(), PlotKind::TimeSeries);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(ViewerConfig::from_json("{marker_size: }").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ViewerConfig::from_file(Path::new("/nonexistent/octs.json")).is_err());
    }
}
