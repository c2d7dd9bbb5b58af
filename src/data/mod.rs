//! Read-only sea-level data shared by every chat session.
//!
//! The process bootstrap builds one [`DataContext`] and hands it to the plot
//! backend behind an `Arc`; nothing mutates it afterwards.

mod grid;
mod regions;
mod series;

pub use grid::{GridFrame, GridPoint, GridSeries, TrendGrid};
pub use regions::{translate_sea_name, RegionIndex, RegionShape, OFFSHORE, UNKNOWN_SEA};
pub use series::{normalize_name, AdminLevel, SeriesRecord, SeriesStore};

use crate::config::DataSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Observational record or climate-scenario projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Observation,
    Projection,
}

impl Dataset {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Observation => "observasi",
            Self::Projection => "proyeksi",
        }
    }

    /// Prefix inserted into chart titles.
    pub fn title_prefix(&self) -> &'static str {
        match self {
            Self::Observation => "",
            Self::Projection => "Proyeksi ",
        }
    }

    pub fn period(&self) -> &'static str {
        match self {
            Self::Observation => "1993-2023",
            Self::Projection => "2025-2100",
        }
    }
}

#[derive(Debug, Default)]
pub struct DataContext {
    pub observation: Option<SeriesStore>,
    pub projection: Option<SeriesStore>,
    pub observation_grid: Option<GridSeries>,
    pub projection_grid: Option<GridSeries>,
    pub observation_trend: Option<TrendGrid>,
    pub projection_trend: Option<TrendGrid>,
    pub seas: RegionIndex,
    pub provinces: RegionIndex,
}

impl DataContext {
    /// Loads every configured file that exists under `root`.
    ///
    /// Missing files leave the slot empty; a present but unreadable file is
    /// an error.
    pub fn load(settings: &DataSettings, root: &Path) -> Result<Self> {
        let context = Self {
            observation: load_optional(settings, root, &settings.observation_series, |p| {
                SeriesStore::from_csv_path(p)
            })?,
            projection: load_optional(settings, root, &settings.projection_series, |p| {
                SeriesStore::from_csv_path(p)
            })?,
            observation_grid: load_optional(settings, root, &settings.observation_grid, |p| {
                GridSeries::from_json_path(p)
            })?,
            projection_grid: load_optional(settings, root, &settings.projection_grid, |p| {
                GridSeries::from_json_path(p)
            })?,
            observation_trend: load_optional(
                settings,
                root,
                &settings.observation_trend_grid,
                |p| TrendGrid::from_json_path(p),
            )?,
            projection_trend: load_optional(settings, root, &settings.projection_trend_grid, |p| {
                TrendGrid::from_json_path(p)
            })?,
            seas: load_optional(settings, root, &settings.sea_regions, |p| {
                RegionIndex::from_json_path(p)
            })?
            .unwrap_or_default(),
            provinces: load_optional(settings, root, &settings.provinces, |p| {
                RegionIndex::from_json_path(p)
            })?
            .unwrap_or_default(),
        };
        info!(
            observation_rows = context.observation.as_ref().map_or(0, SeriesStore::len),
            projection_rows = context.projection.as_ref().map_or(0, SeriesStore::len),
            seas = context.seas.len(),
            provinces = context.provinces.len(),
            "data context loaded"
        );
        Ok(context)
    }

    pub fn series(&self, dataset: Dataset) -> Result<&SeriesStore> {
        match dataset {
            Dataset::Observation => self.observation.as_ref(),
            Dataset::Projection => self.projection.as_ref(),
        }
        .with_context(|| format!("No {} time series loaded", dataset.label()))
    }

    pub fn grid(&self, dataset: Dataset) -> Result<&GridSeries> {
        match dataset {
            Dataset::Observation => self.observation_grid.as_ref(),
            Dataset::Projection => self.projection_grid.as_ref(),
        }
        .with_context(|| format!("No {} sea-level grid loaded", dataset.label()))
    }

    pub fn trend_grid(&self, dataset: Dataset) -> Result<&TrendGrid> {
        match dataset {
            Dataset::Observation => self.observation_trend.as_ref(),
            Dataset::Projection => self.projection_trend.as_ref(),
        }
        .with_context(|| format!("No {} trend grid loaded", dataset.label()))
    }
}

fn load_optional<T>(
    settings: &DataSettings,
    root: &Path,
    configured: &Path,
    load: impl FnOnce(&Path) -> Result<T>,
) -> Result<Option<T>> {
    let path = settings.resolve(root, configured);
    if !path.exists() {
        warn!(path = %path.display(), "data file not found, skipping");
        return Ok(None);
    }
    load(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_leave_slots_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let context = DataContext::load(&DataSettings::default(), dir.path()).unwrap();
        assert!(context.observation.is_none());
        assert!(context.seas.is_empty());
        let err = context.series(Dataset::Projection).unwrap_err();
        assert!(err.to_string().contains("proyeksi"));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = DataSettings::default();
        let path = settings.resolve(dir.path(), &settings.observation_trend_grid);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(DataContext::load(&settings, dir.path()).is_err());
    }
}
