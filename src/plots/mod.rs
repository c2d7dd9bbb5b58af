//! Sea-level visualization functions.
//!
//! [`SeaLevelPlotter`] is the production [`PlotBackend`]: it resolves a
//! registered [`FunctionSpec`] against the shared [`DataContext`] and returns
//! one tagged result per call convention. `Ok(None)` means the function ran
//! but found nothing to draw.

mod figure;
mod frames;
mod map;
mod series;

pub use figure::{Figure, LineChart, MapChart, MapLayer, Trace};
pub use frames::{
    ComparisonFrame, ComparisonRow, DataFrame, RankingRow, RankingTable, SeriesFrame,
    SeriesPoint, YearPoint, YearlyFrame, RANKING_VALUE_COLUMN,
};

use crate::chat::router::context::CallArgs;
use crate::chat::router::dispatcher::PlotBackend;
use crate::chat::router::registry::{FunctionSpec, PlotKind};
use crate::data::DataContext;
use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub figure: Figure,
    pub data: DataFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingResult {
    pub table: RankingTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapResult {
    pub figure: Figure,
    pub region_max: String,
    pub region_min: String,
    pub prov_max: String,
    pub prov_min: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesResult {
    pub figure: Figure,
    pub data: DataFrame,
    /// Slope in mm/year, for trend functions only.
    pub trend: Option<f64>,
}

pub struct SeaLevelPlotter {
    data: Arc<DataContext>,
    default_top_n: usize,
}

impl SeaLevelPlotter {
    pub fn new(data: Arc<DataContext>, default_top_n: usize) -> Self {
        Self {
            data,
            default_top_n,
        }
    }

    pub fn data(&self) -> &DataContext {
        &self.data
    }
}

impl PlotBackend for SeaLevelPlotter {
    fn compare(
        &self,
        function: &FunctionSpec,
        first: &str,
        second: &str,
    ) -> Result<Option<ComparisonResult>> {
        let PlotKind::Comparison(level) = function.kind else {
            bail!("{} is not a comparison function", function.name);
        };
        let store = self.data.series(function.dataset)?;
        debug!(function = function.name, first, second, "comparing locations");
        Ok(
            series::comparison(store, function.dataset, level, first, second).map(|chart| {
                ComparisonResult {
                    figure: chart.figure,
                    data: DataFrame::Comparison(chart.frame),
                }
            }),
        )
    }

    fn rank(&self, function: &FunctionSpec, text: &str) -> Result<Option<RankingResult>> {
        let PlotKind::Ranking(level) = function.kind else {
            bail!("{} is not a ranking function", function.name);
        };
        let store = self.data.series(function.dataset)?;
        let table = series::ranking(store, level, text, self.default_top_n);
        Ok((!table.is_empty()).then_some(RankingResult { table }))
    }

    fn map(&self, function: &FunctionSpec, year: Option<i32>) -> Result<Option<MapResult>> {
        let seas = &self.data.seas;
        let provinces = &self.data.provinces;
        let chart = match (function.kind, year) {
            (PlotKind::YearMap, Some(year)) => {
                let grid = self.data.grid(function.dataset)?;
                let Some(points) = grid.yearly_mean(year) else {
                    return Ok(None);
                };
                map::year_map(points, function.dataset, year, seas, provinces)
            }
            (PlotKind::YearMap, None) => bail!("{} needs a year", function.name),
            (PlotKind::TrendMap, _) => {
                let grid = self.data.trend_grid(function.dataset)?;
                map::trend_map(grid.points(), function.dataset, seas, provinces)
            }
            _ => bail!("{} is not a map function", function.name),
        };
        Ok(chart.map(|chart| MapResult {
            figure: chart.figure,
            region_max: chart.region_max,
            region_min: chart.region_min,
            prov_max: chart.prov_max,
            prov_min: chart.prov_min,
        }))
    }

    fn series(&self, function: &FunctionSpec, args: &CallArgs) -> Result<Option<TimeSeriesResult>> {
        let dataset = function.dataset;
        let store = self.data.series(dataset)?;
        let result = match function.kind {
            PlotKind::LocationSeries(level) => {
                let name = args.require(level.as_str())?;
                let year = args.year("tahun")?;
                series::location_series(store, dataset, level, name, year).map(series_result)
            }
            PlotKind::LocationTrend(level) => {
                let name = args.require(level.as_str())?;
                series::location_trend(store, dataset, level, name).map(trend_result)
            }
            PlotKind::NationalTrend => series::national_trend(store, dataset).map(trend_result),
            PlotKind::RegionYearly(level) => {
                let name = args.require(level.as_str())?;
                let year = required_year(args)?;
                series::region_yearly(store, dataset, level, name, year).map(series_result)
            }
            PlotKind::NationalYearly => {
                let year = required_year(args)?;
                series::national_yearly(store, dataset, year).map(series_result)
            }
            PlotKind::Comparison(_) | PlotKind::Ranking(_) | PlotKind::YearMap | PlotKind::TrendMap => {
                bail!("{} cannot be called as a time series", function.name)
            }
        };
        Ok(result)
    }
}

fn required_year(args: &CallArgs) -> Result<i32> {
    args.year("tahun")?.context("Missing required argument 'tahun'")
}

fn trend_result(chart: series::TrendChart) -> TimeSeriesResult {
    TimeSeriesResult {
        figure: chart.figure,
        data: DataFrame::Yearly(chart.frame),
        trend: chart.slope,
    }
}

fn series_result(chart: series::SeriesChart) -> TimeSeriesResult {
    TimeSeriesResult {
        figure: chart.figure,
        data: DataFrame::Series(chart.frame),
        trend: None,
    }
}
