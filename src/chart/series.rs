use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::color::{colour_name_to_hex, DashStyle};
use crate::data::filter::VisibilityFilter;
use crate::data::model::{ModelData, ModelEntry, ModelTable, Region, YearSeries};
use crate::error::{OctsError, Result};
use crate::stats::{summarize, FiveNumberSummary};

/// Stroke width of every model series.
pub const STROKE_WIDTH: u32 = 2;

// ---------------------------------------------------------------------------
// Plot kinds
// ---------------------------------------------------------------------------

/// The plots the series builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlotKind {
    /// Total column ozone over the implicit year list (`tco3_zm`).
    #[serde(rename = "tco3_zm")]
    TimeSeries,
    /// Ozone return/recovery year per region (`tco3_return`).
    #[serde(rename = "tco3_return")]
    ReturnYear,
}

impl PlotKind {
    pub const ALL: [PlotKind; 2] = [PlotKind::TimeSeries, PlotKind::ReturnYear];

    /// Identifier used by the API.
    pub fn id(&self) -> &'static str {
        match self {
            PlotKind::TimeSeries => "tco3_zm",
            PlotKind::ReturnYear => "tco3_return",
        }
    }

    /// Human-readable name for menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlotKind::TimeSeries => "Total column ozone",
            PlotKind::ReturnYear => "Return/Recovery",
        }
    }
}

impl FromStr for PlotKind {
    type Err = OctsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tco3_zm" | "time-series" => Ok(PlotKind::TimeSeries),
            "tco3_return" | "return-year" => Ok(PlotKind::ReturnYear),
            other => Err(OctsError::UnsupportedPlotKind(other.to_string())),
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

/// One point of a categorical (region) series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPoint<T> {
    pub x: Region,
    pub y: T,
}

/// The aggregate box-plot series of the return-year plot.
///
/// Holds one entry per region in canonical order; a region nobody
/// reported a value for has no summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSeries {
    pub name: String,
    pub data: Vec<RegionPoint<Option<FiveNumberSummary>>>,
}

impl BoxPlotSeries {
    pub fn summary(&self, region: Region) -> Option<FiveNumberSummary> {
        self.data.get(region.index()).and_then(|p| p.y)
    }
}

/// A chart series as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartSeries {
    Line {
        name: String,
        data: YearSeries,
    },
    BoxPlot {
        name: String,
        data: Vec<RegionPoint<Option<FiveNumberSummary>>>,
    },
    Scatter {
        name: String,
        data: Vec<RegionPoint<Option<f64>>>,
    },
}

impl ChartSeries {
    pub fn name(&self) -> &str {
        match self {
            ChartSeries::Line { name, .. }
            | ChartSeries::BoxPlot { name, .. }
            | ChartSeries::Scatter { name, .. } => name,
        }
    }
}

/// Styling arrays, index-aligned with [`SeriesBundle::series`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    /// `#rrggbb`
    pub colors: Vec<String>,
    pub dash_array: Vec<DashStyle>,
    pub width: Vec<u32>,
}

impl Styling {
    fn push(&mut self, entry: &ModelEntry) -> Result<()> {
        let color = colour_name_to_hex(&entry.style.color)?;
        let dash = entry.style.linestyle.parse::<DashStyle>()?;
        self.colors.push(color);
        self.dash_array.push(dash);
        self.width.push(STROKE_WIDTH);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Everything needed to draw one plot.
///
/// `series` holds one entry per included model and `styling` is aligned
/// with it. The return-year box plot is kept apart in `boxplot` because it
/// has no styling of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesBundle {
    pub kind: PlotKind,
    pub boxplot: Option<BoxPlotSeries>,
    pub series: Vec<ChartSeries>,
    pub styling: Styling,
}

impl SeriesBundle {
    /// Flat series list with the box plot (if any) first, the order chart
    /// libraries expect.
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        self.boxplot
            .iter()
            .map(|b| ChartSeries::BoxPlot {
                name: b.name.clone(),
                data: b.data.clone(),
            })
            .chain(self.series.iter().cloned())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Series builder
// ---------------------------------------------------------------------------

/// Build the series of `kind` for every model of `table` that `filter`
/// includes, in table order.
pub fn build_series(
    kind: PlotKind,
    table: &ModelTable,
    filter: &VisibilityFilter,
) -> Result<SeriesBundle> {
    let included: Vec<&ModelEntry> = table.iter().filter(|e| filter.contains(&e.name)).collect();
    log::debug!(
        "Building {kind} series for {} of {} models",
        included.len(),
        table.len()
    );

    match kind {
        PlotKind::TimeSeries => time_series(&included),
        PlotKind::ReturnYear => return_year(&included),
    }
}

fn time_series(models: &[&ModelEntry]) -> Result<SeriesBundle> {
    let mut series = Vec::with_capacity(models.len());
    let mut styling = Styling::default();

    for entry in models {
        let ModelData::TimeSeries(data) = &entry.data else {
            return Err(mismatch(entry, PlotKind::TimeSeries));
        };
        styling.push(entry)?;
        series.push(ChartSeries::Line {
            name: entry.name.clone(),
            data: data.clone(),
        });
    }

    Ok(SeriesBundle {
        kind: PlotKind::TimeSeries,
        boxplot: None,
        series,
        styling,
    })
}

fn return_year(models: &[&ModelEntry]) -> Result<SeriesBundle> {
    let lookups = models
        .iter()
        .map(|entry| match &entry.data {
            ModelData::ReturnYear(lookup) => Ok(lookup),
            ModelData::TimeSeries(_) => Err(mismatch(entry, PlotKind::ReturnYear)),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut buckets: BTreeMap<Region, Vec<f64>> =
        Region::ALL.iter().map(|r| (*r, Vec::new())).collect();
    for lookup in &lookups {
        for (region, value) in lookup.iter() {
            if let Some(bucket) = buckets.get_mut(region) {
                bucket.push(*value);
            }
        }
    }

    let mut boxes = Vec::with_capacity(Region::ALL.len());
    for region in Region::ALL {
        let summary = match summarize(&buckets[&region]) {
            Ok(summary) => Some(summary),
            Err(OctsError::EmptySample) => None,
            Err(e) => return Err(e),
        };
        boxes.push(RegionPoint { x: region, y: summary });
    }

    let mut series = Vec::with_capacity(models.len());
    let mut styling = Styling::default();
    for (entry, lookup) in models.iter().zip(lookups) {
        styling.push(entry)?;
        series.push(ChartSeries::Scatter {
            name: entry.name.clone(),
            data: Region::ALL
                .iter()
                .map(|r| RegionPoint {
                    x: *r,
                    y: lookup.get(r).copied(),
                })
                .collect(),
        });
    }

    Ok(SeriesBundle {
        kind: PlotKind::ReturnYear,
        boxplot: Some(BoxPlotSeries {
            name: "box".to_string(),
            data: boxes,
        }),
        series,
        styling,
    })
}

fn mismatch(entry: &ModelEntry, kind: PlotKind) -> OctsError {
    OctsError::MalformedInput(format!(
        "model {} does not carry {kind} data",
        entry.name
    ))
}
