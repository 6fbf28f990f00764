use crate::chart::{ChartKind, ChartSpec, DataRow, DataValue};
use crate::theme::series_color;
use dioxus::prelude::*;

const PLOT_WIDTH: f64 = 100.0;
const PLOT_HEIGHT: f64 = 40.0;

/// Largest numeric value across every series, or 1.0 when there is none.
fn value_ceiling(spec: &ChartSpec) -> f64 {
    let ceiling = spec
        .series
        .iter()
        .flat_map(|series| spec.series_values(&series.key))
        .flatten()
        .fold(0.0_f64, f64::max);
    if ceiling > 0.0 { ceiling } else { 1.0 }
}

/// SVG `points` for one series. Missing values are skipped.
fn polyline_points(values: &[Option<f64>], ceiling: f64) -> String {
    let step = if values.len() > 1 {
        PLOT_WIDTH / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            let value = (*value)?;
            let x = step * idx as f64;
            let y = PLOT_HEIGHT - (value / ceiling) * PLOT_HEIGHT;
            Some(format!("{x:.2},{y:.2}"))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn ChartView(spec: ChartSpec) -> Element {
    let ceiling = value_ceiling(&spec);
    rsx! {
        div { class: "chart",
            div { class: "chart-title", "{spec.title}" }
            {match spec.kind {
                ChartKind::Line => rsx! { LinePlot { spec: spec.clone(), ceiling } },
                ChartKind::Bar => rsx! { BarPlot { spec: spec.clone(), ceiling } },
            }}
            div { class: "chart-footer", "{spec.point_count()} titik data" }
        }
    }
}

#[component]
fn LinePlot(spec: ChartSpec, ceiling: f64) -> Element {
    let lines: Vec<(String, String, String)> = spec
        .series
        .iter()
        .enumerate()
        .map(|(idx, series)| {
            let points = polyline_points(&spec.series_values(&series.key), ceiling);
            (
                series.name.clone(),
                series_color(series.color.as_deref(), idx),
                points,
            )
        })
        .collect();
    let categories: Vec<String> = spec
        .data
        .iter()
        .map(|row| spec.category(row).unwrap_or_default())
        .collect();

    rsx! {
        svg {
            "viewBox": "0 0 {PLOT_WIDTH} {PLOT_HEIGHT}",
            "preserveAspectRatio": "none",
            width: "100%",
            height: "160",
            for (name, color, points) in lines.iter() {
                polyline {
                    key: "{name}",
                    "points": "{points}",
                    "fill": "none",
                    "stroke": "{color}",
                    "stroke-width": "0.8",
                }
            }
        }
        div { class: "chart-legend", style: "display: flex; justify-content: space-between; font-size: 0.7rem;",
            for category in categories.iter() {
                span { "{category}" }
            }
        }
        div { class: "chart-legend", style: "display: flex; gap: 0.75rem; font-size: 0.75rem;",
            for (name, color, _) in lines.iter() {
                span { style: "color: {color};", "{name}" }
            }
        }
    }
}

struct Bar {
    name: String,
    color: String,
    width: f64,
    label: String,
}

fn bars_for(spec: &ChartSpec, row: &DataRow, ceiling: f64) -> Vec<Bar> {
    spec.series
        .iter()
        .enumerate()
        .map(|(idx, series)| {
            let value = row.get(&series.key);
            Bar {
                name: series.name.clone(),
                color: series_color(series.color.as_deref(), idx),
                width: bar_width(value.and_then(DataValue::as_f64), ceiling),
                label: value
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect()
}

#[component]
fn BarPlot(spec: ChartSpec, ceiling: f64) -> Element {
    let groups: Vec<(String, Vec<Bar>)> = spec
        .data
        .iter()
        .map(|row| {
            (
                spec.category(row).unwrap_or_default(),
                bars_for(&spec, row, ceiling),
            )
        })
        .collect();

    rsx! {
        for (category, bars) in groups.iter() {
            div { style: "margin-bottom: 0.4rem;",
                div { style: "font-size: 0.75rem;", "{category}" }
                for bar in bars.iter() {
                    div { class: "chart-bar-row",
                        div {
                            class: "chart-bar",
                            style: "width: {bar.width}%; background: {bar.color};",
                        }
                        span { "{bar.name}: {bar.label}" }
                    }
                }
            }
        }
    }
}

fn bar_width(value: Option<f64>, ceiling: f64) -> f64 {
    value
        .map(|value| (value / ceiling * 100.0).clamp(0.0, 100.0))
        .unwrap_or(0.0)
}
