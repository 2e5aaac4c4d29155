use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Float64Builder, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use octs_plot::data::loader::ApiRecord;
use octs_plot::{PlotStyle, Region, YearRange};
use parquet::arrow::ArrowWriter;
use serde_json::Value as JsonValue;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (model, colour, line style, first year, last year)
const MODELS: [(&str, &str, &str, i32, i32); 5] = [
    ("CCMI-1_ACCESS_ACCESS-CCM-refC2", "red", "solid", 1960, 2100),
    ("CCMI-1_CCCma_CMAM-refC2", "blue", "dashed", 1960, 2100),
    ("CCMI-1_CHASER-MIROC-ESM-refC2", "darkorange", "dotted", 1959, 2099),
    ("CMIP6_CESM2-WACCM_historical", "forestgreen", "solid", 1959, 2014),
    ("SBUV_GSFC_merged-SAT-ozone", "black", "dotted", 1979, 2020),
];

/// Ozone dips towards ~2000 and recovers afterwards.
fn ozone_curve(year: i32, offset: f64) -> f64 {
    let t = (year - 2000) as f64 / 40.0;
    300.0 + offset - 12.0 * (-t * t).exp()
}

fn time_series_records(rng: &mut SimpleRng) -> Vec<ApiRecord> {
    MODELS
        .iter()
        .enumerate()
        .map(|(i, &(model, color, linestyle, first, last))| {
            // Observations leave a few gaps, as satellite records do.
            let years: Vec<i32> = YearRange::new(first, last)
                .years()
                .filter(|y| !(i == 4 && (1995..1997).contains(y)))
                .collect();
            let y = years
                .iter()
                .map(|&yr| ozone_curve(yr, i as f64 * 1.5) + rng.gauss(0.0, 1.0))
                .collect();
            ApiRecord {
                model: model.to_string(),
                plotstyle: PlotStyle {
                    color: color.to_string(),
                    linestyle: linestyle.to_string(),
                },
                x: years.iter().map(|yr| JsonValue::from(yr.to_string())).collect(),
                y,
            }
        })
        .collect()
}

fn return_year_records(rng: &mut SimpleRng) -> Vec<ApiRecord> {
    MODELS
        .iter()
        .take(4)
        .enumerate()
        .map(|(i, &(model, color, linestyle, _, _))| {
            // The last model skips the user region.
            let regions: Vec<Region> = Region::ALL
                .into_iter()
                .filter(|r| !(i == 3 && *r == Region::UserRegion))
                .collect();
            let y = regions
                .iter()
                .map(|r| (2030.0 + r.index() as f64 * 4.0 + rng.gauss(0.0, 5.0)).round())
                .collect();
            ApiRecord {
                model: model.to_string(),
                plotstyle: PlotStyle {
                    color: color.to_string(),
                    linestyle: linestyle.to_string(),
                },
                x: regions.iter().map(|r| JsonValue::from(r.label())).collect(),
                y,
            }
        })
        .collect()
}

fn write_json(path: &str, records: &[ApiRecord]) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(records)?;
    std::fs::write(path, text).with_context(|| format!("writing {path}"))?;
    println!("Wrote {} models to {path}", records.len());
    Ok(())
}

fn string_column(records: &[ApiRecord], f: impl Fn(&ApiRecord) -> &str) -> StringArray {
    StringArray::from(records.iter().map(f).collect::<Vec<_>>())
}

fn write_parquet(path: &str, records: &[ApiRecord]) -> anyhow::Result<()> {
    let model_array = string_column(records, |r| r.model.as_str());
    let color_array = string_column(records, |r| r.plotstyle.color.as_str());
    let style_array = string_column(records, |r| r.plotstyle.linestyle.as_str());

    let mut x_builder = ListBuilder::new(StringBuilder::new());
    let mut y_builder = ListBuilder::new(Float64Builder::new());
    for rec in records {
        for x in &rec.x {
            match x {
                JsonValue::String(s) => x_builder.values().append_value(s),
                other => x_builder.values().append_value(other.to_string()),
            }
        }
        x_builder.append(true);
        for &v in &rec.y {
            y_builder.values().append_value(v);
        }
        y_builder.append(true);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("model", DataType::Utf8, false),
        Field::new("color", DataType::Utf8, false),
        Field::new("linestyle", DataType::Utf8, false),
        Field::new("x", DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))), false),
        Field::new("y", DataType::List(Arc::new(Field::new("item", DataType::Float64, true))), false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(model_array),
            Arc::new(color_array),
            Arc::new(style_array),
            Arc::new(x_builder.finish()),
            Arc::new(y_builder.finish()),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    println!("Wrote {} models to {path}", records.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let zm = time_series_records(&mut rng);
    write_json("sample_tco3_zm.json", &zm)?;
    write_parquet("sample_tco3_zm.parquet", &zm)?;

    let ret = return_year_records(&mut rng);
    write_json("sample_tco3_return.json", &ret)?;
    Ok(())
}
