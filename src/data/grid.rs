use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A value on a lat/lon grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
}

/// One monthly field, row-major over latitude then longitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFrame {
    pub time: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Monthly gridded sea level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSeries {
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    pub frames: Vec<GridFrame>,
}

impl GridSeries {
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid file {}", path.display()))?;
        let grid: GridSeries = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse grid file {}", path.display()))?;
        let cells = grid.latitude.len() * grid.longitude.len();
        for frame in &grid.frames {
            if frame.values.len() != cells {
                bail!(
                    "Grid frame {} in {} has {} values, expected {}",
                    frame.time,
                    path.display(),
                    frame.values.len(),
                    cells
                );
            }
        }
        Ok(grid)
    }

    /// Per-cell mean over the frames of `year`; `None` when the year is not
    /// covered. Cells without any sample are left out.
    pub fn yearly_mean(&self, year: i32) -> Option<Vec<GridPoint>> {
        let frames: Vec<&GridFrame> = self
            .frames
            .iter()
            .filter(|frame| frame.time.year() == year)
            .collect();
        if frames.is_empty() {
            return None;
        }
        let cells = self.latitude.len() * self.longitude.len();
        let mut means = Vec::with_capacity(cells);
        for cell in 0..cells {
            let (sum, count) = frames
                .iter()
                .filter_map(|frame| frame.values.get(cell).copied().flatten())
                .filter(|value| value.is_finite())
                .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
            means.push((count > 0).then(|| sum / count as f64));
        }
        Some(flatten(&self.latitude, &self.longitude, &means))
    }
}

/// Per-cell linear trend in mm/year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendGrid {
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    pub values: Vec<Option<f64>>,
}

impl TrendGrid {
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read trend grid {}", path.display()))?;
        let grid: TrendGrid = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse trend grid {}", path.display()))?;
        let cells = grid.latitude.len() * grid.longitude.len();
        if grid.values.len() != cells {
            bail!(
                "Trend grid {} has {} values, expected {}",
                path.display(),
                grid.values.len(),
                cells
            );
        }
        Ok(grid)
    }

    pub fn points(&self) -> Vec<GridPoint> {
        flatten(&self.latitude, &self.longitude, &self.values)
    }
}

fn flatten(latitude: &[f64], longitude: &[f64], values: &[Option<f64>]) -> Vec<GridPoint> {
    let mut points = Vec::new();
    for (row, lat) in latitude.iter().enumerate() {
        for (col, lon) in longitude.iter().enumerate() {
            let index = row * longitude.len() + col;
            if let Some(value) = values.get(index).copied().flatten() {
                if value.is_finite() {
                    points.push(GridPoint {
                        latitude: *lat,
                        longitude: *lon,
                        value,
                    });
                }
            }
        }
    }
    points
}
