//! Gridded maps of yearly sea level and of the per-cell trend.

use super::figure::{bin_points, Figure, MapChart, MAP_CENTER, MAP_ZOOM};
use crate::data::{translate_sea_name, Dataset, GridPoint, RegionIndex, OFFSHORE, UNKNOWN_SEA};

const LEVEL_RANGE: (f64, f64) = (-0.25, 0.25);
const TREND_RANGE: (f64, f64) = (-5.0, 5.0);

pub(crate) struct MapChartWithRegions {
    pub figure: Figure,
    pub region_max: String,
    pub region_min: String,
    pub prov_max: String,
    pub prov_min: String,
}

pub(crate) fn year_map(
    points: Vec<GridPoint>,
    dataset: Dataset,
    year: i32,
    seas: &RegionIndex,
    provinces: &RegionIndex,
) -> Option<MapChartWithRegions> {
    let title = format!("Peta {}TML Tahun {year}", dataset.title_prefix());
    build(points, title, "Tinggi Muka Laut (m)", LEVEL_RANGE, seas, provinces)
}

pub(crate) fn trend_map(
    points: Vec<GridPoint>,
    dataset: Dataset,
    seas: &RegionIndex,
    provinces: &RegionIndex,
) -> Option<MapChartWithRegions> {
    let title = format!("Peta Tren {}TML", dataset.title_prefix());
    build(points, title, "Tren (mm/year)", TREND_RANGE, seas, provinces)
}

fn build(
    points: Vec<GridPoint>,
    title: String,
    colorbar_label: &str,
    value_range: (f64, f64),
    seas: &RegionIndex,
    provinces: &RegionIndex,
) -> Option<MapChartWithRegions> {
    let highest = extreme(&points, |candidate, best| candidate > best)?;
    let lowest = extreme(&points, |candidate, best| candidate < best)?;

    let sea_at = |point: &GridPoint| {
        seas.locate(point.latitude, point.longitude)
            .map_or(UNKNOWN_SEA, translate_sea_name)
            .to_string()
    };
    let province_at = |point: &GridPoint| {
        provinces
            .locate(point.latitude, point.longitude)
            .unwrap_or(OFFSHORE)
            .to_string()
    };

    Some(MapChartWithRegions {
        region_max: sea_at(&highest),
        region_min: sea_at(&lowest),
        prov_max: province_at(&highest),
        prov_min: province_at(&lowest),
        figure: Figure::Map(MapChart {
            title,
            colorbar_label: colorbar_label.to_string(),
            value_range,
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            layers: bin_points(&points, value_range),
        }),
    })
}

/// First point whose value beats every earlier one.
fn extreme(points: &[GridPoint], beats: impl Fn(f64, f64) -> bool) -> Option<GridPoint> {
    let mut best: Option<GridPoint> = None;
    for point in points.iter().filter(|point| point.value.is_finite()) {
        match best {
            Some(current) if !beats(point.value, current.value) => {}
            _ => best = Some(*point),
        }
    }
    best
}
