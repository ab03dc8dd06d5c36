// Chart Payload - the interchange artifact between computation and presentation
// Serializable to JSON (numbers and strings only) so it doubles as the
// on-disk cache format: { "data": [bar, line], "layout": {...} }

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bar fill color for the monthly revenue series
pub const BAR_COLOR: &str = "#003f5c";
/// Line color for the fitted trend series
pub const LINE_COLOR: &str = "#ffa600";

/// One plotted series: the raw monthly bars or the fitted trend line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    /// Plot type: `bar` or `scatter`
    #[serde(rename = "type")]
    pub kind: String,

    /// Month labels "01".."12"
    pub x: Vec<String>,

    /// Amounts, one per month label
    pub y: Vec<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,

    /// Draw mode for scatter series (`lines` for the trend)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,

    /// Legend label
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: u32,
    pub color: String,
}

/// Display metadata consumed verbatim by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: AxisTitle,
    pub yaxis: AxisTitle,
    pub template: String,
    pub showlegend: bool,
    pub legend: Legend,
    pub margin: Margin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisTitle {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Legend {
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margin {
    pub t: u32,
    pub l: u32,
    pub r: u32,
    pub b: u32,
}

/// The full chart bundle: two series (bar revenue, line trend) plus layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPayload {
    pub data: Vec<Series>,
    pub layout: Layout,
}

impl ChartPayload {
    /// The raw monthly totals: y-values of the bar series.
    ///
    /// The bar series is always first; an empty slice means the payload was
    /// built (or cached) without data, which downstream code treats as zero
    /// revenue rather than an error.
    pub fn bar_values(&self) -> &[f64] {
        self.data.first().map(|s| s.y.as_slice()).unwrap_or(&[])
    }

    /// The fitted trend values: y-values of the line series.
    pub fn trend_values(&self) -> &[f64] {
        self.data.get(1).map(|s| s.y.as_slice()).unwrap_or(&[])
    }
}

/// Try to read a previously cached payload.
///
/// Any failure (missing file, unreadable, stale format) is a cache miss, not
/// an error: the caller falls back to recomputing from the CSV. There is no
/// expiry or versioning - a present, parsable cache is always taken as valid.
pub fn load_cache(cache_path: &Path) -> Option<ChartPayload> {
    let raw = fs::read_to_string(cache_path).ok()?;
    serde_json::from_str(&raw).ok()
}

/// Persist the payload so repeat runs skip re-reading the CSV.
pub fn save_cache(cache_path: &Path, payload: &ChartPayload) -> Result<()> {
    let json = serde_json::to_string(payload).context("Failed to serialize chart payload")?;
    fs::write(cache_path, json)
        .with_context(|| format!("Failed to write chart cache {:?}", cache_path))?;
    Ok(())
}
