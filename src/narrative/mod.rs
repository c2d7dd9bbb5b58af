//! Narration that accompanies each chart or table.
//!
//! [`generate_narrative`] is a pure function of the tag and the
//! [`NarrativeContext`]: the tag picks a template branch and the branch
//! computes its statistics from the context's data frame. Observational and
//! projection tags use separate template sets.

mod observation;
mod projection;

use crate::chat::router::context::NarrativeContext;
use crate::chat::router::registry::is_projection;
use crate::data::AdminLevel;
use crate::plots::{ComparisonFrame, DataFrame, RankingTable, SeriesFrame, SeriesPoint};
use crate::text::title_case;

/// Years covered by the cumulative figure in observational trend narration.
pub const OBSERVATION_HORIZON_YEARS: f64 = 30.0;
/// Years covered by the cumulative figure in projection trend narration.
pub const PROJECTION_HORIZON_YEARS: f64 = 100.0;

/// Template branch chosen for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    LocationSeries,
    NationalYearly,
    CompareDesa,
    CompareProvinsi,
    Trend,
    Ranking,
    YearMap,
    TrendMap,
    RegionYearly,
    Generic,
}

#[derive(Debug, Clone, Copy)]
enum TagMatch {
    Exact(&'static str),
    Contains(&'static str),
}

impl TagMatch {
    fn matches(&self, tag: &str) -> bool {
        match self {
            Self::Exact(expected) => tag == *expected,
            Self::Contains(needle) => tag.contains(needle),
        }
    }
}

// Exact map tags come before the trend substrings they contain.
const OBSERVATION_BRANCHES: [(TagMatch, Branch); 9] = [
    (TagMatch::Exact("plot_tml_desa"), Branch::LocationSeries),
    (TagMatch::Exact("plot_tml_tahunan"), Branch::NationalYearly),
    (TagMatch::Exact("bandingkan_desa"), Branch::CompareDesa),
    (TagMatch::Exact("bandingkan_provinsi"), Branch::CompareProvinsi),
    (TagMatch::Exact("peta_tml_tahun"), Branch::YearMap),
    (TagMatch::Exact("peta_tren_tml_nasional"), Branch::TrendMap),
    (TagMatch::Contains("tren_tml"), Branch::Trend),
    (TagMatch::Contains("ranking_tml"), Branch::Ranking),
    (TagMatch::Contains("grafik_tahunan"), Branch::RegionYearly),
];

const PROJECTION_BRANCHES: [(TagMatch, Branch); 9] = [
    (TagMatch::Exact("plot_proyeksi_tml_desa"), Branch::LocationSeries),
    (TagMatch::Exact("plot_proyeksi_tml_tahunan"), Branch::NationalYearly),
    (TagMatch::Exact("proyeksi_bandingkan_desa"), Branch::CompareDesa),
    (TagMatch::Exact("proyeksi_bandingkan_provinsi"), Branch::CompareProvinsi),
    (TagMatch::Exact("peta_proyeksi_tml_tahun"), Branch::YearMap),
    (TagMatch::Exact("peta_tren_proyeksi_tml_nasional"), Branch::TrendMap),
    (TagMatch::Contains("tren_proyeksi"), Branch::Trend),
    (TagMatch::Contains("ranking_proyeksi"), Branch::Ranking),
    (TagMatch::Contains("grafik_proyeksi_tahunan"), Branch::RegionYearly),
];

impl Branch {
    pub fn select(tag: &str) -> Self {
        let table = if is_projection(tag) {
            &PROJECTION_BRANCHES
        } else {
            &OBSERVATION_BRANCHES
        };
        table
            .iter()
            .find(|(matcher, _)| matcher.matches(tag))
            .map_or(Self::Generic, |(_, branch)| *branch)
    }
}

pub fn generate_narrative(tag: &str, context: &NarrativeContext) -> String {
    let branch = Branch::select(tag);
    if is_projection(tag) {
        projection::render(branch, tag, context)
    } else {
        observation::render(branch, tag, context)
    }
}

/// Mean, highest and lowest month of a non-empty series.
struct SeriesSummary<'a> {
    mean: f64,
    max: &'a SeriesPoint,
    min: &'a SeriesPoint,
}

impl<'a> SeriesSummary<'a> {
    fn of(context: &'a NarrativeContext) -> Option<Self> {
        let frame: &SeriesFrame = match &context.df {
            Some(DataFrame::Series(frame)) => frame,
            _ => return None,
        };
        Some(Self {
            mean: frame.mean()?,
            max: frame.max_point()?,
            min: frame.min_point()?,
        })
    }

    fn range(&self) -> f64 {
        self.max.sla - self.min.sla
    }
}

fn comparison_frame(context: &NarrativeContext) -> Option<&ComparisonFrame> {
    match &context.df {
        Some(DataFrame::Comparison(frame)) if !frame.is_empty() => Some(frame),
        _ => None,
    }
}

fn ranking_table(context: &NarrativeContext) -> Option<&RankingTable> {
    match &context.df {
        Some(DataFrame::Ranking(table)) if !table.is_empty() => Some(table),
        _ => None,
    }
}

/// "Provinsi" or "Desa", from the table when there is one.
fn ranking_level(tag: &str, context: &NarrativeContext) -> AdminLevel {
    match &context.df {
        Some(DataFrame::Ranking(table)) => table.level,
        _ if tag.contains("provinsi") => AdminLevel::Provinsi,
        _ => AdminLevel::Desa,
    }
}

/// Title-cased name, or `fallback` when absent.
fn display_name(value: Option<&str>, fallback: &str) -> String {
    title_case(value.unwrap_or(fallback))
}

/// Names ordered (higher, lower) by their mean in `frame`.
fn higher_first(frame: &ComparisonFrame, first: String, second: String) -> (String, String) {
    match (frame.mean_for(&first), frame.mean_for(&second)) {
        (Some(a), Some(b)) if a > b => (first, second),
        _ => (second, first),
    }
}

/// "di Desa Siomeda" style location phrase for trend tags.
fn trend_location(tag: &str, context: &NarrativeContext) -> String {
    let named = |level: &str, value: &Option<String>| {
        format!("di {level} {}", display_name(value.as_deref(), "N/A"))
    };
    if tag.contains("desa") {
        named("Desa", &context.desa)
    } else if tag.contains("kecamatan") {
        named("Kecamatan", &context.kecamatan)
    } else if tag.contains("kabupaten") {
        named("Kabupaten", &context.kabupaten)
    } else {
        "di tingkat Nasional".to_string()
    }
}

fn region_level(tag: &str) -> AdminLevel {
    if tag.contains("kabupaten") {
        AdminLevel::Kabupaten
    } else {
        AdminLevel::Kecamatan
    }
}

fn region_name(level: AdminLevel, context: &NarrativeContext) -> String {
    let value = match level {
        AdminLevel::Kabupaten => context.kabupaten.as_deref(),
        _ => context.kecamatan.as_deref(),
    };
    display_name(value, "N/A")
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}
