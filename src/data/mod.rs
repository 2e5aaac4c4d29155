/// Data layer: core types, payload loading, normalisation and visibility.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse payload → ApiRecord list
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  sparse (year, value) → dense YearSeries
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ModelTable│  insertion-ordered, keyed by model name
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  model groups → included model names
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
