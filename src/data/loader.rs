use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeListArray, ListArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::model::{ModelData, ModelEntry, ModelTable, PlotStyle, Region};
use super::normalize::normalize;
use crate::chart::PlotKind;
use crate::error::{OctsError, Result};

// ---------------------------------------------------------------------------
// API record – one model as returned by the OCTS API
// ---------------------------------------------------------------------------

/// A single model of an API response.
///
/// `x` holds years for the time-series plot (numbers or numeric strings)
/// and region labels for the return-year plot; `y` is parallel to `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRecord {
    pub model: String,
    pub plotstyle: PlotStyle,
    pub x: Vec<JsonValue>,
    pub y: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Pre-transformation: records → ModelTable
// ---------------------------------------------------------------------------

/// Turn freshly fetched records into a [`ModelTable`] once, so that series
/// building never has to touch the raw arrays again.
///
/// Time-series records are normalised onto the implicit year list.
/// Return-year records become a region lookup; labels outside the fixed
/// region set are dropped.
pub fn pre_transform(kind: PlotKind, records: &[ApiRecord]) -> Result<ModelTable> {
    let mut table = ModelTable::new();
    for rec in records {
        if rec.x.len() != rec.y.len() {
            return Err(OctsError::MalformedInput(format!(
                "model {}: x has {} values but y has {}",
                rec.model,
                rec.x.len(),
                rec.y.len()
            )));
        }
        // NaN is neither an observation nor the absent marker.
        if let Some(i) = rec.y.iter().position(|v| !v.is_finite()) {
            return Err(OctsError::MalformedInput(format!(
                "model {}: non-finite value at index {i}",
                rec.model
            )));
        }
        let data = match kind {
            PlotKind::TimeSeries => {
                let years = rec
                    .x
                    .iter()
                    .map(|v| json_to_year(v, &rec.model))
                    .collect::<Result<Vec<i32>>>()?;
                ModelData::TimeSeries(normalize(&years, &rec.y).map_err(|e| match e {
                    OctsError::MalformedInput(msg) => {
                        OctsError::MalformedInput(format!("model {}: {msg}", rec.model))
                    }
                    other => other,
                })?)
            }
            PlotKind::ReturnYear => ModelData::ReturnYear(region_lookup(rec)),
        };
        let replaced = table.insert(ModelEntry {
            name: rec.model.clone(),
            style: rec.plotstyle.clone(),
            data,
        });
        if replaced.is_some() {
            log::warn!("Model {} listed twice; keeping the last record", rec.model);
        }
    }
    Ok(table)
}

fn json_to_year(val: &JsonValue, model: &str) -> Result<i32> {
    let year = match val {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    year.and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| OctsError::MalformedInput(format!("model {model}: {val} is not a year")))
}

fn region_lookup(rec: &ApiRecord) -> BTreeMap<Region, f64> {
    let mut lookup = BTreeMap::new();
    for (x, &y) in rec.x.iter().zip(rec.y.iter()) {
        let label = match x {
            JsonValue::String(s) => s.as_str(),
            other => {
                log::warn!("Model {}: ignoring non-text region {other}", rec.model);
                continue;
            }
        };
        match Region::from_label(label) {
            Some(region) => {
                lookup.insert(region, y);
            }
            None => log::warn!("Model {}: dropping unknown region {label:?}", rec.model),
        }
    }
    lookup
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and pre-transform a payload file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – the API response: `[{ "model", "plotstyle", "x", "y" }, ...]`
/// * `.csv`     – columns `model,color,linestyle,x,y`, lists separated by `;`
/// * `.parquet` – the same columns with `x` and `y` as list columns
pub fn load_file(path: &Path, kind: PlotKind) -> anyhow::Result<ModelTable> {
    let records = load_records(path)?;
    log::info!(
        "Read {} {} records from {}",
        records.len(),
        kind,
        path.display()
    );
    let table = pre_transform(kind, &records)
        .with_context(|| format!("transforming {}", path.display()))?;
    Ok(table)
}

/// Parse an API response held in memory.
pub fn parse_payload(kind: PlotKind, text: &str) -> anyhow::Result<ModelTable> {
    let records: Vec<ApiRecord> = serde_json::from_str(text).context("parsing API payload")?;
    Ok(pre_transform(kind, &records)?)
}

/// Read raw records without transforming them.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<ApiRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> anyhow::Result<Vec<ApiRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    model: String,
    color: String,
    linestyle: String,
    x: String,
    y: String,
}

/// CSV layout: one model per row.
/// `x` and `y` contain semicolon-separated lists:
///   `"1960;1961;1962"`, `"301.2;300.8;299.9"`
fn load_csv(path: &Path) -> anyhow::Result<Vec<ApiRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let x = split_list(&row.x)
            .map(|tok| JsonValue::String(tok.to_string()))
            .collect();
        let y = parse_semicolon_floats(&row.y, row_no, "y")?;
        records.push(ApiRecord {
            model: row.model,
            plotstyle: PlotStyle {
                color: row.color,
                linestyle: row.linestyle,
            },
            x,
            y,
        });
    }

    Ok(records)
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(';').map(str::trim).filter(|tok| !tok.is_empty())
}

fn parse_semicolon_floats(s: &str, row: usize, col: &str) -> anyhow::Result<Vec<f64>> {
    split_list(s)
        .enumerate()
        .map(|(j, tok)| {
            tok.parse::<f64>()
                .with_context(|| format!("Row {row}, {col}[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema:
/// - `model`, `color`, `linestyle`: Utf8
/// - `x`: List/LargeList of Utf8, Int32, Int64 or Float64
/// - `y`: List/LargeList of Float64 or Float32
fn load_parquet(path: &Path) -> anyhow::Result<Vec<ApiRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let model_col = column(&batch, "model")?;
        let color_col = column(&batch, "color")?;
        let style_col = column(&batch, "linestyle")?;
        let x_col = column(&batch, "x")?;
        let y_col = column(&batch, "y")?;

        for row in 0..batch.num_rows() {
            let x = list_values(x_col, row)
                .and_then(|arr| x_values(&arr))
                .with_context(|| format!("Row {row}: failed to read 'x'"))?;
            let y = list_values(y_col, row)
                .and_then(|arr| f64_values(&arr))
                .with_context(|| format!("Row {row}: failed to read 'y'"))?;

            records.push(ApiRecord {
                model: string_value(model_col, row).context("reading 'model'")?,
                plotstyle: PlotStyle {
                    color: string_value(color_col, row).context("reading 'color'")?,
                    linestyle: string_value(style_col, row).context("reading 'linestyle'")?,
                },
                x,
                y,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> anyhow::Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// The inner array of a List or LargeList column at the given row.
fn list_values(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<Arc<dyn Array>> {
    if col.is_null(row) {
        bail!("null value in list column");
    }
    match col.data_type() {
        DataType::List(_) => Ok(col
            .as_any()
            .downcast_ref::<ListArray>()
            .context("expected ListArray")?
            .value(row)),
        DataType::LargeList(_) => Ok(col
            .as_any()
            .downcast_ref::<LargeListArray>()
            .context("expected LargeListArray")?
            .value(row)),
        other => bail!("Expected List or LargeList column, got {other:?}"),
    }
}

fn f64_values(values: &Arc<dyn Array>) -> anyhow::Result<Vec<f64>> {
    if let Some(arr) = values.as_any().downcast_ref::<Float64Array>() {
        arr.iter()
            .map(|v| v.context("null value in 'y'"))
            .collect()
    } else if let Some(arr) = values.as_any().downcast_ref::<Float32Array>() {
        arr.iter()
            .map(|v| v.map(f64::from).context("null value in 'y'"))
            .collect()
    } else {
        bail!(
            "List inner type is {:?}, expected Float64 or Float32",
            values.data_type()
        )
    }
}

/// Years arrive as integers or text, region labels as text.
fn x_values(values: &Arc<dyn Array>) -> anyhow::Result<Vec<JsonValue>> {
    let any = values.as_any();
    if let Some(arr) = any.downcast_ref::<StringArray>() {
        arr.iter()
            .map(|v| v.map(JsonValue::from).context("null value in 'x'"))
            .collect()
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        arr.iter()
            .map(|v| v.map(JsonValue::from).context("null value in 'x'"))
            .collect()
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        arr.iter()
            .map(|v| v.map(JsonValue::from).context("null value in 'x'"))
            .collect()
    } else if let Some(arr) = any.downcast_ref::<Float64Array>() {
        arr.iter()
            .map(|v| v.map(JsonValue::from).context("null value in 'x'"))
            .collect()
    } else {
        bail!(
            "List inner type is {:?}, expected Utf8, Int32, Int64 or Float64",
            values.data_type()
        )
    }
}

fn string_value(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<String> {
    let arr = col
        .as_any()
        .downcast_ref::<StringArray>()
        .with_context(|| format!("expected Utf8 column, got {:?}", col.data_type()))?;
    if arr.is_null(row) {
        bail!("null value at row {row}");
    }
    Ok(arr.value(row).to_string())
}
