//! Chart-ready output: series, styling arrays and plot options.

pub mod options;
pub mod series;

pub use options::{BoxColors, ChartOptions};
pub use series::{
    build_series, BoxPlotSeries, ChartSeries, PlotKind, RegionPoint, SeriesBundle, Styling,
    STROKE_WIDTH,
};
