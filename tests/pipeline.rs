use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Builder, Int32Builder, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use octs_plot::chart::{build_series, ChartOptions, ChartSeries, PlotKind};
use octs_plot::config::ViewerConfig;
use octs_plot::data::filter::{included_models, GroupMember, ModelGroup};
use octs_plot::data::loader::{load_file, load_records, parse_payload};
use octs_plot::{ModelData, OctsError, Region, YearRange};
use parquet::arrow::ArrowWriter;

const ZM_PAYLOAD: &str = r#"[
    {"model": "CCMI-1_ACCESS", "plotstyle": {"color": "red", "linestyle": "solid"},
     "x": ["1960", "1963", "1965", "1966"], "y": [0, 1, 2, 3]},
    {"model": "CCMI-1_CMAM", "plotstyle": {"color": "Blue", "linestyle": "dashed"},
     "x": [1959, 2100], "y": [305.5, 310.25]},
    {"model": "SBUV", "plotstyle": {"color": "black", "linestyle": "dotted"},
     "x": [], "y": []}
]"#;

const RETURN_PAYLOAD: &str = r#"[
    {"model": "m1", "plotstyle": {"color": "red", "linestyle": "solid"},
     "x": ["Antarctic(Oct)", "SH mid-lat", "Tropics", "Arctic(Mar)",
           "Near global", "Global", "User region", "NH mid-lat"],
     "y": [2064, 2051, 2060, 2041, 2040, 2049, 2052, 2052]},
    {"model": "m2", "plotstyle": {"color": "blue", "linestyle": "solid"},
     "x": ["Antarctic(Oct)", "Global", "Mordor"],
     "y": [2070, 2047, 1]}
]"#;

fn groups(models: &[(&str, bool)]) -> Vec<ModelGroup> {
    vec![ModelGroup {
        name: "all".to_string(),
        is_visible: true,
        models: models
            .iter()
            .map(|(n, v)| GroupMember {
                name: n.to_string(),
                is_visible: *v,
            })
            .collect(),
    }]
}

#[test]
fn time_series_pipeline() {
    let table = parse_payload(PlotKind::TimeSeries, ZM_PAYLOAD).unwrap();
    let filter = included_models(&groups(&[
        ("CCMI-1_ACCESS", true),
        ("CCMI-1_CMAM", true),
        ("SBUV", false),
    ]));

    let bundle = build_series(PlotKind::TimeSeries, &table, &filter).unwrap();
    assert_eq!(bundle.series.len(), 2);
    assert_eq!(bundle.styling.colors, vec!["#ff0000", "#0000ff"]);
    assert_eq!(bundle.styling.width.len(), 2);
    assert_eq!(bundle.styling.dash_array.len(), 2);

    let ChartSeries::Line { name, data } = &bundle.series[0] else {
        panic!("expected line series");
    };
    assert_eq!(name, "CCMI-1_ACCESS");
    assert_eq!(data.len(), YearRange::DEFAULT.len());
    assert_eq!(
        &data.values()[..9],
        &[None, Some(0.0), None, None, Some(1.0), None, Some(2.0), Some(3.0), None]
    );

    let options = ChartOptions::for_plot(
        PlotKind::TimeSeries,
        &bundle.styling,
        "",
        &ViewerConfig::default(),
    );
    assert_eq!(options.title, "OCTS Plot");
    assert_eq!(options.categories.last().map(String::as_str), Some("2100"));
}

#[test]
fn empty_model_is_all_absent() {
    let table = parse_payload(PlotKind::TimeSeries, ZM_PAYLOAD).unwrap();
    let ModelData::TimeSeries(series) = &table.get("SBUV").unwrap().data else {
        panic!("expected time series");
    };
    assert!(series.values().iter().all(Option::is_none));
}

#[test]
fn return_year_pipeline() {
    let table = parse_payload(PlotKind::ReturnYear, RETURN_PAYLOAD).unwrap();
    let filter = included_models(&groups(&[("m1", true), ("m2", true)]));
    let bundle = build_series(PlotKind::ReturnYear, &table, &filter).unwrap();

    let boxplot = bundle.boxplot.as_ref().unwrap();
    assert_eq!(boxplot.data.len(), 8);
    assert!(boxplot.data.iter().all(|p| p.y.is_some()));
    assert_eq!(
        boxplot.summary(Region::Antarctic).unwrap().to_array(),
        [2064.0, 2065.5, 2067.0, 2068.5, 2070.0]
    );
    assert_eq!(boxplot.summary(Region::Tropics).unwrap().to_array(), [2060.0; 5]);

    assert_eq!(bundle.series.len(), 2);
    for series in &bundle.series {
        let ChartSeries::Scatter { data, .. } = series else {
            panic!("expected scatter series");
        };
        assert_eq!(data.len(), 8);
    }
    let ChartSeries::Scatter { data, .. } = &bundle.series[1] else {
        unreachable!();
    };
    assert_eq!(data.iter().filter(|p| p.y.is_none()).count(), 6);

    let flat = serde_json::to_value(bundle.chart_series()).unwrap();
    assert_eq!(flat.as_array().unwrap().len(), 3);
    assert_eq!(flat[0]["name"], "box");
}

#[test]
fn unsupported_plot_id() {
    assert_eq!(
        "vrom3".parse::<PlotKind>(),
        Err(OctsError::UnsupportedPlotKind("vrom3".to_string()))
    );
}

#[test]
fn csv_payload_from_disk() {
    let path = scratch_path("payload.csv");
    std::fs::write(
        &path,
        "model,color,linestyle,x,y\n\
         m1,red,solid,1960;1961,300.5;301\n\
         m2,green,dotted,,\n",
    )
    .unwrap();

    let table = load_file(&path, PlotKind::TimeSeries).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(table.names().collect::<Vec<_>>(), vec!["m1", "m2"]);
    let ModelData::TimeSeries(series) = &table.get("m1").unwrap().data else {
        panic!("expected time series");
    };
    assert_eq!(series.get(1961), Some(301.0));
}

#[test]
fn csv_nan_token_is_rejected() {
    let path = scratch_path("nan.csv");
    std::fs::write(
        &path,
        "model,color,linestyle,x,y\n\
         m1,red,solid,1960;1961;1962,300.5;NaN;301\n",
    )
    .unwrap();

    let err = load_file(&path, PlotKind::TimeSeries).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(format!("{err:#}").contains("model m1: non-finite value at index 1"));
}

// -- parquet --

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("octs_pipeline_{}_{name}", std::process::id()))
}

fn write_one_row_parquet(path: &Path, years: &[&str], y: ArrayRef) {
    let mut x_builder = ListBuilder::new(StringBuilder::new());
    for year in years {
        x_builder.values().append_value(year);
    }
    x_builder.append(true);

    let y_item = match y.data_type() {
        DataType::List(field) => field.data_type().clone(),
        other => panic!("y must be a list column, got {other:?}"),
    };
    let schema = Arc::new(Schema::new(vec![
        Field::new("model", DataType::Utf8, false),
        Field::new("color", DataType::Utf8, false),
        Field::new("linestyle", DataType::Utf8, false),
        Field::new("x", DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))), false),
        Field::new("y", DataType::List(Arc::new(Field::new("item", y_item, true))), false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["CCMI-1_ACCESS"])),
            Arc::new(StringArray::from(vec!["red"])),
            Arc::new(StringArray::from(vec!["dashed"])),
            Arc::new(x_builder.finish()),
            y,
        ],
    )
    .unwrap();

    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_payload_from_disk() {
    let path = scratch_path("zm.parquet");
    let mut y_builder = ListBuilder::new(Float64Builder::new());
    y_builder.values().append_value(300.0);
    y_builder.values().append_value(301.0);
    y_builder.append(true);
    write_one_row_parquet(&path, &["1960", "1962"], Arc::new(y_builder.finish()));

    let table = load_file(&path, PlotKind::TimeSeries).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(table.names().collect::<Vec<_>>(), vec!["CCMI-1_ACCESS"]);
    let entry = table.get("CCMI-1_ACCESS").unwrap();
    assert_eq!(entry.style.color, "red");
    assert_eq!(entry.style.linestyle, "dashed");
    let ModelData::TimeSeries(series) = &entry.data else {
        panic!("expected time series");
    };
    assert_eq!(series.len(), YearRange::DEFAULT.len());
    assert_eq!(series.get(1960), Some(300.0));
    assert_eq!(series.get(1961), None);
    assert_eq!(series.get(1962), Some(301.0));
}

#[test]
fn parquet_integer_y_list_is_rejected() {
    let path = scratch_path("int_y.parquet");
    let mut y_builder = ListBuilder::new(Int32Builder::new());
    y_builder.values().append_value(300);
    y_builder.append(true);
    write_one_row_parquet(&path, &["1960"], Arc::new(y_builder.finish()));

    let err = load_records(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    let msg = format!("{err:#}");
    assert!(msg.contains("failed to read 'y'"), "{msg}");
    assert!(msg.contains("expected Float64 or Float32"), "{msg}");
}
