//! Data transformations behind the OCTS ozone plot tool.
//!
//! Raw API payloads are normalised into dense, year-indexed series (or
//! per-region lookups), collected into an insertion-ordered [`ModelTable`],
//! and turned into chart-ready series plus styling arrays by
//! [`chart::build_series`].
//!
//! ```text
//!  API payload (.json / .csv / .parquet)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  pre-transform → ModelTable (normalised per model)
//!   └──────────┘
//!        │          ┌──────────┐
//!        │◄─────────│  filter   │  model groups → VisibilityFilter
//!        ▼          └──────────┘
//!   ┌──────────┐
//!   │  chart    │  series + styling (+ box-plot statistics)
//!   └──────────┘
//! ```

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod stats;

pub use data::model::{ModelData, ModelEntry, ModelTable, PlotStyle, Region, YearRange, YearSeries};
pub use error::{OctsError, Result};
