use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// YearRange – the implicit, contiguous x-axis of every time series
// ---------------------------------------------------------------------------

/// First year of the implicit year list.
pub const START_YEAR: i32 = 1959;
/// Last year (inclusive) of the implicit year list.
pub const END_YEAR: i32 = 2100;

/// An inclusive, contiguous range of years. Index `i` of a series built
/// against this range corresponds to year `start + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// The range every API time series is plotted against.
    pub const DEFAULT: YearRange = YearRange {
        start: START_YEAR,
        end: END_YEAR,
    };

    /// Build a range; `start > end` yields an empty range.
    pub const fn new(start: i32, end: i32) -> Self {
        YearRange { start, end }
    }

    /// Number of years in the range.
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end.abs_diff(self.start) as usize).saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Year represented by slot `index`.
    pub fn year_at(&self, index: usize) -> Option<i32> {
        if index >= self.len() {
            return None;
        }
        i64::try_from(index)
            .ok()
            .and_then(|i| i32::try_from(i64::from(self.start) + i).ok())
    }

    /// The implicit year list, in order.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// YearSeries – dense, year-indexed values with explicit gaps
// ---------------------------------------------------------------------------

/// One optional value per year of `range`. `None` marks a year without
/// an observation; it is never replaced by a numeric placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    range: YearRange,
    values: Vec<Option<f64>>,
}

impl YearSeries {
    /// A series with every slot absent.
    pub fn empty(range: YearRange) -> Self {
        YearSeries {
            range,
            values: vec![None; range.len()],
        }
    }

    /// Wrap pre-computed slots. Returns `None` if the length does not match
    /// the range.
    pub fn from_values(range: YearRange, values: Vec<Option<f64>>) -> Option<Self> {
        (values.len() == range.len()).then_some(YearSeries { range, values })
    }

    /// Caller guarantees one slot per year of `range`.
    pub(crate) fn from_parts(range: YearRange, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(values.len(), range.len());
        YearSeries { range, values }
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value recorded for `year`, if the year is in range and observed.
    pub fn get(&self, year: i32) -> Option<f64> {
        if !self.range.contains(year) {
            return None;
        }
        self.values[year.abs_diff(self.range.start) as usize]
    }

    /// `(year, value)` pairs for every observed year.
    pub fn observed(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.range
            .years()
            .zip(self.values.iter())
            .filter_map(|(year, v)| v.map(|v| (year, v)))
    }
}

// Charting libraries expect the bare slot array.
impl Serialize for YearSeries {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Region – the fixed categorical axis of the return-year plot
// ---------------------------------------------------------------------------

/// The eight canonical regions. Variants are declared in lexicographic
/// order of their labels so the derived `Ord` matches the sorted label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Antarctic(Oct)")]
    Antarctic,
    #[serde(rename = "Arctic(Mar)")]
    Arctic,
    #[serde(rename = "Global")]
    Global,
    #[serde(rename = "NH mid-lat")]
    NhMidLat,
    #[serde(rename = "Near global")]
    NearGlobal,
    #[serde(rename = "SH mid-lat")]
    ShMidLat,
    #[serde(rename = "Tropics")]
    Tropics,
    #[serde(rename = "User region")]
    UserRegion,
}

impl Region {
    /// All regions in canonical (sorted label) order.
    pub const ALL: [Region; 8] = [
        Region::Antarctic,
        Region::Arctic,
        Region::Global,
        Region::NhMidLat,
        Region::NearGlobal,
        Region::ShMidLat,
        Region::Tropics,
        Region::UserRegion,
    ];

    /// Label as sent by the API.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Antarctic => "Antarctic(Oct)",
            Region::Arctic => "Arctic(Mar)",
            Region::Global => "Global",
            Region::NhMidLat => "NH mid-lat",
            Region::NearGlobal => "Near global",
            Region::ShMidLat => "SH mid-lat",
            Region::Tropics => "Tropics",
            Region::UserRegion => "User region",
        }
    }

    /// Exact label match; labels outside the fixed set return `None`.
    pub fn from_label(label: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.label() == label)
    }

    /// Position of the region on the categorical axis.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// Display style of a model as delivered by the API (`plotstyle`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotStyle {
    /// CSS colour name, e.g. `"darkorange"`.
    pub color: String,
    /// `"solid"`, `"dotted"` or `"dashed"`.
    pub linestyle: String,
}

/// Pre-transformed data of one model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelData {
    /// Dense series for the time-series (tco3_zm) plot.
    TimeSeries(YearSeries),
    /// Region → value lookup for the return-year (tco3_return) plot.
    ReturnYear(BTreeMap<Region, f64>),
}

/// A single model with its style and data.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub name: String,
    pub style: PlotStyle,
    pub data: ModelData,
}

// ---------------------------------------------------------------------------
// ModelTable – insertion-ordered lookup keyed by model name
// ---------------------------------------------------------------------------

/// Models keyed by name, iterated in insertion order.
///
/// Inserting a name that is already present replaces the entry but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelTable {
    entries: IndexMap<String, ModelEntry>,
}

impl ModelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the replaced entry, if any.
    pub fn insert(&mut self, entry: ModelEntry) -> Option<ModelEntry> {
        self.entries.insert(entry.name.clone(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, ModelEntry> {
        self.entries.values()
    }

    /// Model names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ModelEntry> for ModelTable {
    fn from_iter<I: IntoIterator<Item = ModelEntry>>(iter: I) -> Self {
        let mut table = ModelTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl<'a> IntoIterator for &'a ModelTable {
    type Item = &'a ModelEntry;
    type IntoIter = indexmap::map::Values<'a, String, ModelEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
