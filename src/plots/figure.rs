//! Renderer-neutral chart descriptions.

use crate::data::GridPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Legend entry; single-series charts leave it empty.
    pub name: Option<String>,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub markers: bool,
    pub traces: Vec<Trace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayer {
    pub color: String,
    pub points: Vec<GridPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapChart {
    pub title: String,
    pub colorbar_label: String,
    pub value_range: (f64, f64),
    pub center: (f64, f64),
    pub zoom: f64,
    pub layers: Vec<MapLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    Line(LineChart),
    Map(MapChart),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Self::Line(chart) => &chart.title,
            Self::Map(chart) => &chart.title,
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            Self::Line(chart) => chart.traces.iter().map(|trace| trace.y.len()).sum(),
            Self::Map(chart) => chart.layers.iter().map(|layer| layer.points.len()).sum(),
        }
    }
}

/// Ten-step cool-to-warm palette, blue for low values and red for high.
const COOLWARM: [&str; 10] = [
    "#3b4cc0", "#5b7ae5", "#7da0f9", "#a0bffe", "#c1d4f4", "#dedcdb", "#f2c4ab", "#f6a385",
    "#e67660", "#c93d3b",
];

pub(crate) const MAP_CENTER: (f64, f64) = (-2.0, 118.0);
pub(crate) const MAP_ZOOM: f64 = 3.3;

/// Splits points into coloured layers over `range`; values outside the
/// range land in the first or last bin. Empty bins are dropped.
pub(crate) fn bin_points(points: &[GridPoint], range: (f64, f64)) -> Vec<MapLayer> {
    let (low, high) = range;
    let step = (high - low) / COOLWARM.len() as f64;
    let edges: Vec<f64> = (0..=COOLWARM.len())
        .map(|i| low + step * i as f64)
        .collect();
    let mut colors = Vec::with_capacity(COOLWARM.len() + 2);
    colors.push(COOLWARM[0]);
    colors.extend(COOLWARM.iter().copied());
    colors.push(COOLWARM[COOLWARM.len() - 1]);

    let mut bins: Vec<Vec<GridPoint>> = vec![Vec::new(); colors.len()];
    for point in points {
        let index = edges.iter().take_while(|edge| **edge <= point.value).count();
        bins[index].push(*point);
    }
    bins.into_iter()
        .zip(colors)
        .filter(|(points, _)| !points.is_empty())
        .map(|(points, color)| MapLayer {
            color: color.to_string(),
            points,
        })
        .collect()
}
