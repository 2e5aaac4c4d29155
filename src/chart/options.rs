use serde::Serialize;

use super::series::{PlotKind, Styling};
use crate::color::DashStyle;
use crate::config::ViewerConfig;
use crate::data::model::{Region, YearRange};

/// Colours of the two box halves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxColors {
    pub upper: String,
    pub lower: String,
}

/// Chart settings that accompany a [`super::SeriesBundle`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub kind: PlotKind,
    pub title: String,
    /// x-axis categories; the implicit year list for the time series,
    /// region labels for the return-year plot.
    pub categories: Vec<String>,
    /// Legend colours, aligned with the model series.
    pub colors: Vec<String>,
    pub stroke_width: Vec<u32>,
    pub dash_array: Vec<DashStyle>,
    pub box_colors: Option<BoxColors>,
    pub marker_size: Option<f32>,
}

impl ChartOptions {
    /// Merge per-plot defaults with the styling produced by the builder.
    /// An empty `title` keeps the configured default.
    pub fn for_plot(kind: PlotKind, styling: &Styling, title: &str, config: &ViewerConfig) -> Self {
        let title = if title.trim().is_empty() {
            config.title(kind).to_string()
        } else {
            title.to_string()
        };

        match kind {
            PlotKind::TimeSeries => ChartOptions {
                kind,
                title,
                categories: YearRange::DEFAULT.years().map(|y| y.to_string()).collect(),
                colors: styling.colors.clone(),
                stroke_width: styling.width.clone(),
                dash_array: styling.dash_array.clone(),
                box_colors: None,
                marker_size: None,
            },
            PlotKind::ReturnYear => ChartOptions {
                kind,
                title,
                categories: Region::ALL
                    .iter()
                    .map(|r| r.label().to_string())
                    .collect(),
                colors: styling.colors.clone(),
                stroke_width: Vec::new(),
                dash_array: Vec::new(),
                box_colors: Some(BoxColors {
                    upper: config.box_upper_color.clone(),
                    lower: config.box_lower_color.clone(),
                }),
                marker_size: Some(config.marker_size),
            },
        }
    }
}
