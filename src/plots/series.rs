//! Line charts and tables built from the per-area time series.

use super::figure::{Figure, LineChart, Trace};
use super::frames::{
    ComparisonFrame, ComparisonRow, RankingRow, RankingTable, SeriesFrame, SeriesPoint,
    YearPoint, YearlyFrame,
};
use crate::text::title_case;
use crate::data::{normalize_name, AdminLevel, Dataset, SeriesRecord, SeriesStore};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

const SLA_LABEL: &str = "Tinggi Muka Laut (m)";

static TOP_N: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

pub(crate) struct SeriesChart {
    pub figure: Figure,
    pub frame: SeriesFrame,
}

pub(crate) struct TrendChart {
    pub figure: Figure,
    pub frame: YearlyFrame,
    pub slope: Option<f64>,
}

pub(crate) struct ComparisonChart {
    pub figure: Figure,
    pub frame: ComparisonFrame,
}

/// Monthly series of one area, optionally limited to one year.
pub(crate) fn location_series(
    store: &SeriesStore,
    dataset: Dataset,
    level: AdminLevel,
    name: &str,
    year: Option<i32>,
) -> Option<SeriesChart> {
    let rows: Vec<&SeriesRecord> = store
        .at_location(level, name)
        .filter(|record| year.map_or(true, |y| record.year() == y))
        .collect();
    if rows.is_empty() {
        return None;
    }
    let frame = monthly_mean(rows);
    let mut title = format!(
        "{}TML {} {}",
        dataset.title_prefix(),
        level.title(),
        title_case(name)
    );
    if let Some(year) = year {
        title.push_str(&format!(" Tahun {year}"));
    }
    let figure = series_figure(title, "Waktu", SLA_LABEL, false, &frame);
    Some(SeriesChart { figure, frame })
}

/// Yearly means and slope for one area.
pub(crate) fn location_trend(
    store: &SeriesStore,
    dataset: Dataset,
    level: AdminLevel,
    name: &str,
) -> Option<TrendChart> {
    let rows: Vec<&SeriesRecord> = store.at_location(level, name).collect();
    if rows.is_empty() {
        return None;
    }
    let title = format!(
        "Tren {}TML {} {}",
        dataset.title_prefix(),
        level.title(),
        title_case(name)
    );
    Some(trend_chart(title, rows))
}

pub(crate) fn national_trend(store: &SeriesStore, dataset: Dataset) -> Option<TrendChart> {
    if store.is_empty() {
        return None;
    }
    let title = format!(
        "Tren {}TML Rata-Rata Nasional ({})",
        dataset.title_prefix(),
        dataset.period()
    );
    Some(trend_chart(title, store.records().iter().collect()))
}

/// Monthly means of one area during one year.
pub(crate) fn region_yearly(
    store: &SeriesStore,
    dataset: Dataset,
    level: AdminLevel,
    name: &str,
    year: i32,
) -> Option<SeriesChart> {
    let rows: Vec<&SeriesRecord> = store
        .at_location(level, name)
        .filter(|record| record.year() == year)
        .collect();
    if rows.is_empty() {
        return None;
    }
    let frame = monthly_mean(rows);
    let title = format!(
        "Rata-rata Bulanan {}TML di {} {} ({year})",
        dataset.title_prefix(),
        level.title(),
        title_case(name)
    );
    let figure = series_figure(title, "Bulan", "TML Rata-rata (m)", true, &frame);
    Some(SeriesChart { figure, frame })
}

/// National monthly means during one year.
pub(crate) fn national_yearly(
    store: &SeriesStore,
    dataset: Dataset,
    year: i32,
) -> Option<SeriesChart> {
    let rows: Vec<&SeriesRecord> = store
        .records()
        .iter()
        .filter(|record| record.year() == year)
        .collect();
    if rows.is_empty() {
        return None;
    }
    let frame = monthly_mean(rows);
    let title = format!("{}TML Rata-Rata Nasional Tahun {year}", dataset.title_prefix());
    let figure = series_figure(title, "Bulan", SLA_LABEL, false, &frame);
    Some(SeriesChart { figure, frame })
}

/// Monthly means of two areas, one trace each.
pub(crate) fn comparison(
    store: &SeriesStore,
    dataset: Dataset,
    level: AdminLevel,
    first: &str,
    second: &str,
) -> Option<ComparisonChart> {
    let names = [normalize_name(first), normalize_name(second)];
    let mut grouped: BTreeMap<(NaiveDate, String), (f64, usize)> = BTreeMap::new();
    for record in store.records() {
        let location = record.name(level);
        if names.iter().any(|name| name == location) {
            let slot = grouped
                .entry((record.time, location.to_string()))
                .or_insert((0.0, 0));
            slot.0 += record.sla;
            slot.1 += 1;
        }
    }
    if grouped.is_empty() {
        return None;
    }
    let rows: Vec<ComparisonRow> = grouped
        .into_iter()
        .map(|((time, location), (sum, count))| ComparisonRow {
            time,
            location,
            sla: sum / count as f64,
        })
        .collect();

    let mut traces: BTreeMap<&str, Trace> = BTreeMap::new();
    for row in &rows {
        let trace = traces.entry(row.location.as_str()).or_insert_with(|| Trace {
            name: Some(row.location.clone()),
            x: Vec::new(),
            y: Vec::new(),
        });
        trace.x.push(row.time.to_string());
        trace.y.push(row.sla);
    }
    let figure = Figure::Line(LineChart {
        title: format!(
            "Perbandingan {}TML: {} vs {}",
            dataset.title_prefix(),
            title_case(first),
            title_case(second)
        ),
        x_label: "Waktu".into(),
        y_label: SLA_LABEL.into(),
        markers: false,
        traces: traces.into_values().collect(),
    });
    Some(ComparisonChart {
        figure,
        frame: ComparisonFrame { level, rows },
    })
}

/// Areas with the highest mean sea level. The row count is the first
/// integer found in `text`, or `default_top_n`.
pub(crate) fn ranking(
    store: &SeriesStore,
    level: AdminLevel,
    text: &str,
    default_top_n: usize,
) -> RankingTable {
    let top_n = extract_top_n(text, default_top_n);
    let mut grouped: BTreeMap<Vec<&str>, (f64, usize)> = BTreeMap::new();
    for record in store.records() {
        let key = match level {
            AdminLevel::Provinsi => vec![record.provinsi.as_str()],
            _ => vec![
                record.desa.as_str(),
                record.kecamatan.as_str(),
                record.kabupaten.as_str(),
                record.provinsi.as_str(),
            ],
        };
        let slot = grouped.entry(key).or_insert((0.0, 0));
        slot.0 += record.sla;
        slot.1 += 1;
    }
    let mut means: Vec<(Vec<&str>, f64)> = grouped
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));

    let rows = means
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(index, (key, mean))| {
            let mean_sla = (mean * 1000.0).round() / 1000.0;
            match level {
                AdminLevel::Provinsi => RankingRow {
                    rank: index + 1,
                    desa: None,
                    kecamatan: None,
                    kabupaten: None,
                    provinsi: key[0].to_string(),
                    mean_sla,
                },
                _ => RankingRow {
                    rank: index + 1,
                    desa: Some(key[0].to_string()),
                    kecamatan: Some(key[1].to_string()),
                    kabupaten: Some(key[2].to_string()),
                    provinsi: key[3].to_string(),
                    mean_sla,
                },
            }
        })
        .collect();
    RankingTable {
        level: match level {
            AdminLevel::Provinsi => AdminLevel::Provinsi,
            _ => AdminLevel::Desa,
        },
        rows,
    }
}

pub(crate) fn extract_top_n(text: &str, default: usize) -> usize {
    TOP_N
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(default)
}

fn monthly_mean(rows: Vec<&SeriesRecord>) -> SeriesFrame {
    let mut grouped: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in rows {
        let slot = grouped.entry(record.time).or_insert((0.0, 0));
        slot.0 += record.sla;
        slot.1 += 1;
    }
    SeriesFrame {
        points: grouped
            .into_iter()
            .map(|(time, (sum, count))| SeriesPoint {
                time,
                sla: sum / count as f64,
            })
            .collect(),
    }
}

fn yearly_mean(rows: Vec<&SeriesRecord>) -> YearlyFrame {
    let mut grouped: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for record in rows {
        let slot = grouped.entry(record.year()).or_insert((0.0, 0));
        slot.0 += record.sla;
        slot.1 += 1;
    }
    YearlyFrame {
        points: grouped
            .into_iter()
            .map(|(year, (sum, count))| YearPoint {
                year,
                sla: sum / count as f64,
            })
            .collect(),
    }
}

fn trend_chart(title: String, rows: Vec<&SeriesRecord>) -> TrendChart {
    let frame = yearly_mean(rows);
    let slope = frame.slope_mm_per_year();
    let figure = Figure::Line(LineChart {
        title,
        x_label: "Tahun".into(),
        y_label: SLA_LABEL.into(),
        markers: true,
        traces: vec![Trace {
            name: None,
            x: frame.points.iter().map(|p| p.year.to_string()).collect(),
            y: frame.points.iter().map(|p| p.sla).collect(),
        }],
    });
    TrendChart {
        figure,
        frame,
        slope,
    }
}

fn series_figure(
    title: String,
    x_label: &str,
    y_label: &str,
    markers: bool,
    frame: &SeriesFrame,
) -> Figure {
    Figure::Line(LineChart {
        title,
        x_label: x_label.into(),
        y_label: y_label.into(),
        markers,
        traces: vec![Trace {
            name: None,
            x: frame.points.iter().map(|p| p.time.to_string()).collect(),
            y: frame.points.iter().map(|p| p.sla).collect(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: (i32, u32), sla: f64, desa: &str, provinsi: &str) -> SeriesRecord {
        SeriesRecord {
            time: NaiveDate::from_ymd_opt(date.0, date.1, 16).unwrap(),
            latitude: 0.0,
            longitude: 0.0,
            sla,
            provinsi: provinsi.into(),
            kabupaten: "kab".into(),
            kecamatan: "kec".into(),
            desa: desa.into(),
        }
    }

    fn store() -> SeriesStore {
        SeriesStore::from_records(vec![
            record((2020, 1), 0.10, "siomeda", "sulawesi tengah"),
            record((2020, 1), 0.30, "siomeda", "sulawesi tengah"),
            record((2021, 1), 0.30, "siomeda", "sulawesi tengah"),
            record((2020, 1), 0.50, "tolo", "jawa timur"),
            record((2021, 1), 0.70, "tolo", "jawa timur"),
        ])
    }

    #[test]
    fn series_groups_by_month_and_titles_location() {
        let chart =
            location_series(&store(), Dataset::Observation, AdminLevel::Desa, "Siomeda", None)
                .unwrap();
        assert_eq!(chart.frame.points.len(), 2);
        assert!((chart.frame.points[0].sla - 0.2).abs() < 1e-12);
        assert_eq!(chart.figure.title(), "TML Desa Siomeda");
        let filtered = location_series(
            &store(),
            Dataset::Projection,
            AdminLevel::Desa,
            "siomeda",
            Some(2021),
        )
        .unwrap();
        assert_eq!(filtered.figure.title(), "Proyeksi TML Desa Siomeda Tahun 2021");
        assert!(location_series(&store(), Dataset::Observation, AdminLevel::Desa, "x", None)
            .is_none());
    }

    #[test]
    fn trend_reports_slope() {
        let chart =
            location_trend(&store(), Dataset::Observation, AdminLevel::Desa, "siomeda").unwrap();
        assert!((chart.slope.unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(chart.figure.title(), "Tren TML Desa Siomeda");
    }

    #[test]
    fn comparison_has_one_trace_per_location() {
        let chart = comparison(
            &store(),
            Dataset::Observation,
            AdminLevel::Provinsi,
            "Jawa Timur",
            "Sulawesi Tengah",
        )
        .unwrap();
        match &chart.figure {
            Figure::Line(line) => assert_eq!(line.traces.len(), 2),
            other => panic!("unexpected figure {other:?}"),
        }
        assert_eq!(chart.figure.title(), "Perbandingan TML: Jawa Timur vs Sulawesi Tengah");
        assert!(chart.frame.mean_for("jawa timur").unwrap() > 0.5);
    }

    #[test]
    fn ranking_sorts_descending_and_honours_count() {
        let table = ranking(&store(), AdminLevel::Provinsi, "ranking 1 provinsi", 10);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].provinsi, "jawa timur");
        assert_eq!(table.rows[0].rank, 1);
        assert_eq!(table.rows[0].mean_sla, 0.6);

        let villages = ranking(&store(), AdminLevel::Desa, "ranking tml desa", 10);
        assert_eq!(villages.rows.len(), 2);
        assert_eq!(villages.rows[1].desa.as_deref(), Some("siomeda"));
    }

    #[test]
    fn top_n_defaults_when_absent() {
        assert_eq!(extract_top_n("top 5 desa", 10), 5);
        assert_eq!(extract_top_n("ranking desa", 10), 10);
    }
}
