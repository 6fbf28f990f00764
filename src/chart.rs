//! Chart descriptions embedded in bot replies.
//!
//! The formatter hands over the raw fenced block; this module strips the
//! fences and decodes the JSON. A broken chart decodes to `None` so the rest
//! of the message still renders.

use crate::format::{CHART_FENCE_CLOSE, CHART_FENCE_OPEN};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Text(String),
}

impl DataValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(value) => Some(*value),
            DataValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Number(value) => write!(f, "{value}"),
            DataValue::Text(text) => f.write_str(text),
        }
    }
}

pub type DataRow = BTreeMap<String, DataValue>;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Series {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: Vec<DataRow>,
    pub x_axis_key: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Decode a raw fenced chart block. Returns `None` when the JSON is unusable.
    pub fn from_fenced(raw: &str) -> Option<Self> {
        let body = strip_fences(raw);
        match serde_json::from_str::<ChartSpec>(body) {
            Ok(spec) => Some(spec),
            Err(err) => {
                warn!(error = %err, "skipping chart with invalid description");
                None
            }
        }
    }

    pub fn point_count(&self) -> usize {
        self.data.len()
    }

    pub fn category(&self, row: &DataRow) -> Option<String> {
        row.get(&self.x_axis_key).map(ToString::to_string)
    }

    /// Values of one series in data order; missing or non-numeric cells are `None`.
    pub fn series_values(&self, key: &str) -> Vec<Option<f64>> {
        self.data
            .iter()
            .map(|row| row.get(key).and_then(DataValue::as_f64))
            .collect()
    }
}

fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix(CHART_FENCE_OPEN).unwrap_or(trimmed);
    let body = body.strip_suffix(CHART_FENCE_CLOSE).unwrap_or(body);
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAINFALL: &str = r##"```json:chart
{
  "type": "line",
  "title": "Curah Hujan Mingguan",
  "data": [
    {"hari": "Senin", "mm": 12.5, "rata": "10"},
    {"hari": "Selasa", "mm": 30}
  ],
  "xAxisKey": "hari",
  "series": [
    {"key": "mm", "name": "Curah hujan", "color": "#2563eb"},
    {"key": "rata", "name": "Rata-rata"}
  ]
}
```"##;

    #[test]
    fn decodes_fenced_chart() {
        let spec = ChartSpec::from_fenced(RAINFALL).unwrap();
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.title, "Curah Hujan Mingguan");
        assert_eq!(spec.x_axis_key, "hari");
        assert_eq!(spec.point_count(), 2);
        assert_eq!(spec.series[0].color.as_deref(), Some("#2563eb"));
        assert_eq!(spec.series[1].color, None);
        assert_eq!(spec.category(&spec.data[1]).as_deref(), Some("Selasa"));
    }

    #[test]
    fn series_values_parse_numeric_text() {
        let spec = ChartSpec::from_fenced(RAINFALL).unwrap();
        assert_eq!(spec.series_values("mm"), vec![Some(12.5), Some(30.0)]);
        assert_eq!(spec.series_values("rata"), vec![Some(10.0), None]);
    }

    #[test]
    fn broken_json_is_none() {
        assert!(ChartSpec::from_fenced("```json:chart {oops```").is_none());
        assert!(ChartSpec::from_fenced("```json:chart {\"type\":\"pie\"}```").is_none());
    }

    #[test]
    fn inline_fence_without_newlines() {
        let raw = r#"```json:chart {"type":"bar","title":"T","data":[],"xAxisKey":"x","series":[]}```"#;
        let spec = ChartSpec::from_fenced(raw).unwrap();
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.point_count(), 0);
    }
}
