use eframe::egui::{Color32, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Line, LineStyle, Plot, PlotPoints, Points};
use octs_plot::chart::{ChartSeries, SeriesBundle};
use octs_plot::color::{hex_to_rgb, DashStyle};
use octs_plot::{Region, YearSeries};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Ozone plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected plot in the central panel.
pub fn ozone_plot(ui: &mut Ui, state: &AppState) {
    let (Some(bundle), Some(options)) = (&state.bundle, &state.options) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a payload to plot models  (File → Open payload…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&options.title);
    });

    if bundle.boxplot.is_some() {
        return_year_plot(ui, bundle, state);
    } else {
        time_series_plot(ui, bundle);
    }
}

fn time_series_plot(ui: &mut Ui, bundle: &SeriesBundle) {
    Plot::new("tco3_zm")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Total column ozone (DU)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, series) in bundle.series.iter().enumerate() {
                let ChartSeries::Line { name, data } = series else {
                    continue;
                };
                let color = styling_colour(bundle, idx);
                let style = bundle
                    .styling
                    .dash_array
                    .get(idx)
                    .copied()
                    .map(line_style)
                    .unwrap_or(LineStyle::Solid);
                let width = bundle.styling.width.get(idx).copied().unwrap_or(2) as f32;

                // Same name on every segment keeps a single legend entry.
                for segment in observed_runs(data) {
                    let line = Line::new(segment)
                        .name(name)
                        .color(color)
                        .width(width)
                        .style(style);
                    plot_ui.line(line);
                }
            }
        });
}

fn return_year_plot(ui: &mut Ui, bundle: &SeriesBundle, state: &AppState) {
    let Some(boxplot) = &bundle.boxplot else {
        return;
    };
    let upper = parse_colour(&state.config.box_upper_color, Color32::LIGHT_GREEN);
    let lower = parse_colour(&state.config.box_lower_color, Color32::LIGHT_BLUE);

    let boxes: Vec<BoxElem> = boxplot
        .data
        .iter()
        .filter_map(|p| {
            let s = p.y?;
            Some(
                BoxElem::new(p.x.index() as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                    .name(p.x.label())
                    .fill(lower.gamma_multiply(0.5))
                    .stroke(Stroke::new(1.5, upper)),
            )
        })
        .collect();

    Plot::new("tco3_return")
        .legend(Legend::default())
        .x_axis_label("Region")
        .y_axis_label("Return year")
        .x_axis_formatter(|mark, _range| region_tick(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes).name(&boxplot.name));

            for (idx, series) in bundle.series.iter().enumerate() {
                let ChartSeries::Scatter { name, data } = series else {
                    continue;
                };
                let points: PlotPoints = data
                    .iter()
                    .filter_map(|p| p.y.map(|y| [p.x.index() as f64, y]))
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(name)
                        .color(styling_colour(bundle, idx))
                        .radius(state.config.marker_size),
                );
            }
        });
}

/// Five-number summaries per region (bottom panel).
pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(boxplot) = state.bundle.as_ref().and_then(|b| b.boxplot.as_ref()) else {
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .columns(Column::remainder(), 5)
        .header(20.0, |mut header| {
            for title in ["Region", "Min", "Q1", "Median", "Q3", "Max"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for point in &boxplot.data {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(point.x.label());
                    });
                    match point.y {
                        Some(s) => {
                            for v in s.to_array() {
                                row.col(|ui| {
                                    ui.label(format!("{v:.1}"));
                                });
                            }
                        }
                        None => {
                            for _ in 0..5 {
                                row.col(|ui| {
                                    ui.weak("–");
                                });
                            }
                        }
                    }
                });
            }
        });
}

// -- helpers --

/// Split a year series into its contiguous observed runs; gaps are not
/// bridged.
fn observed_runs(series: &YearSeries) -> Vec<PlotPoints> {
    let mut runs = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (year, value) in series.range().years().zip(series.values()) {
        match value {
            Some(v) => current.push([year as f64, *v]),
            None if !current.is_empty() => runs.push(PlotPoints::from(std::mem::take(&mut current))),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(PlotPoints::from(current));
    }
    runs
}

fn line_style(dash: DashStyle) -> LineStyle {
    match dash {
        DashStyle::Solid => LineStyle::Solid,
        DashStyle::Dotted => LineStyle::dotted_dense(),
        DashStyle::Dashed => LineStyle::dashed_loose(),
    }
}

fn styling_colour(bundle: &SeriesBundle, idx: usize) -> Color32 {
    bundle
        .styling
        .colors
        .get(idx)
        .map(|hex| parse_colour(hex, Color32::GRAY))
        .unwrap_or(Color32::GRAY)
}

fn parse_colour(hex: &str, fallback: Color32) -> Color32 {
    hex_to_rgb(hex)
        .map(|rgb| Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
        .unwrap_or(fallback)
}

fn region_tick(value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    Region::ALL
        .get(value as usize)
        .map(|r| r.label().to_string())
        .unwrap_or_default()
}
