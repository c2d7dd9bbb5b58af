//! Tabular data returned next to each figure and consumed by the narrator.

use crate::data::AdminLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: NaiveDate,
    pub sla: f64,
}

/// Monthly mean sea level, ordered by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub points: Vec<SeriesPoint>,
}

impl SeriesFrame {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        mean(self.points.iter().map(|point| point.sla))
    }

    /// First point holding the maximum value.
    pub fn max_point(&self) -> Option<&SeriesPoint> {
        extreme(&self.points, |point| point.sla, Ordering::Greater)
    }

    /// First point holding the minimum value.
    pub fn min_point(&self) -> Option<&SeriesPoint> {
        extreme(&self.points, |point| point.sla, Ordering::Less)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: i32,
    pub sla: f64,
}

/// Yearly mean sea level, ordered by year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyFrame {
    pub points: Vec<YearPoint>,
}

impl YearlyFrame {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Least-squares slope of sla against year, in mm/year.
    pub fn slope_mm_per_year(&self) -> Option<f64> {
        let n = self.points.len() as f64;
        if self.points.len() < 2 {
            return None;
        }
        let mean_x = self.points.iter().map(|p| p.year as f64).sum::<f64>() / n;
        let mean_y = self.points.iter().map(|p| p.sla).sum::<f64>() / n;
        let (num, den) = self.points.iter().fold((0.0, 0.0), |(num, den), p| {
            let dx = p.year as f64 - mean_x;
            (num + dx * (p.sla - mean_y), den + dx * dx)
        });
        if den == 0.0 {
            return None;
        }
        Some(num / den * 1000.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub time: NaiveDate,
    pub location: String,
    pub sla: f64,
}

/// Monthly mean per location for a two-way comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonFrame {
    pub level: AdminLevel,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonFrame {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean over the rows of `location`, matched case-insensitively.
    pub fn mean_for(&self, location: &str) -> Option<f64> {
        let wanted = location.to_lowercase();
        mean(
            self.rows
                .iter()
                .filter(|row| row.location.to_lowercase() == wanted)
                .map(|row| row.sla),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,
    pub desa: Option<String>,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub provinsi: String,
    /// Mean sea level in metres, rounded to three decimals.
    pub mean_sla: f64,
}

impl RankingRow {
    pub fn name(&self, level: AdminLevel) -> &str {
        match level {
            AdminLevel::Desa => self.desa.as_deref().unwrap_or_default(),
            AdminLevel::Kecamatan => self.kecamatan.as_deref().unwrap_or_default(),
            AdminLevel::Kabupaten => self.kabupaten.as_deref().unwrap_or_default(),
            AdminLevel::Provinsi => &self.provinsi,
        }
    }
}

pub const RANKING_VALUE_COLUMN: &str = "Rata-rata TML (m)";

/// Areas ordered by descending mean sea level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    pub level: AdminLevel,
    pub rows: Vec<RankingRow>,
}

impl RankingTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        match self.level {
            AdminLevel::Provinsi => vec!["Peringkat", "Provinsi", RANKING_VALUE_COLUMN],
            _ => vec![
                "Peringkat",
                "Desa",
                "Kecamatan",
                "Kabupaten",
                "Provinsi",
                RANKING_VALUE_COLUMN,
            ],
        }
    }

    pub fn mean_of_values(&self) -> Option<f64> {
        mean(self.rows.iter().map(|row| row.mean_sla))
    }
}

/// Data returned alongside a figure or as a standalone table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataFrame {
    Series(SeriesFrame),
    Yearly(YearlyFrame),
    Comparison(ComparisonFrame),
    Ranking(RankingTable),
}

impl DataFrame {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Series(frame) => frame.is_empty(),
            Self::Yearly(frame) => frame.is_empty(),
            Self::Comparison(frame) => frame.is_empty(),
            Self::Ranking(table) => table.is_empty(),
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Series(frame) => frame.points.len(),
            Self::Yearly(frame) => frame.points.len(),
            Self::Comparison(frame) => frame.rows.len(),
            Self::Ranking(table) => table.rows.len(),
        }
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn extreme<T>(items: &[T], value: impl Fn(&T) -> f64, wanted: Ordering) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if value(item).partial_cmp(&value(current)) != Some(wanted) => {}
            _ => best = Some(item),
        }
    }
    best
}
