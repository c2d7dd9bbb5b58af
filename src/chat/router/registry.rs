//! Function registry for the chat router.
//!
//! Tags are sorted into a [`FunctionCategory`] by an ordered substring
//! table, and every plot function carries a static parameter manifest so
//! call arguments are a plain lookup.

use crate::data::{AdminLevel, Dataset};
use crate::intents::IntentsConfig;
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Calling convention used by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionCategory {
    Comparison,
    Ranking,
    Map,
    Generic,
}

/// Checked top to bottom; the first substring found in the tag wins.
pub const CATEGORY_TABLE: [(&str, FunctionCategory); 3] = [
    ("bandingkan", FunctionCategory::Comparison),
    ("ranking", FunctionCategory::Ranking),
    ("peta", FunctionCategory::Map),
];

pub fn classify_tag(tag: &str) -> FunctionCategory {
    CATEGORY_TABLE
        .iter()
        .find(|(needle, _)| tag.contains(needle))
        .map_or(FunctionCategory::Generic, |(_, category)| *category)
}

pub fn is_projection(tag: &str) -> bool {
    tag.contains("proyeksi")
}

/// Everything the dispatcher derives from a tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagProfile {
    pub category: FunctionCategory,
    pub projection: bool,
}

impl TagProfile {
    pub fn of(tag: &str) -> Self {
        Self {
            category: classify_tag(tag),
            projection: is_projection(tag),
        }
    }

    pub fn dataset(&self) -> Dataset {
        if self.projection {
            Dataset::Projection
        } else {
            Dataset::Observation
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    LocationSeries(AdminLevel),
    LocationTrend(AdminLevel),
    NationalTrend,
    RegionYearly(AdminLevel),
    NationalYearly,
    Comparison(AdminLevel),
    Ranking(AdminLevel),
    YearMap,
    TrendMap,
}

/// One named argument in a function's manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub required: bool,
}

impl Param {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// A registered plot function and the named arguments it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub dataset: Dataset,
    pub kind: PlotKind,
    pub params: &'static [Param],
}

impl FunctionSpec {
    pub fn required_params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params
            .iter()
            .filter(|param| param.required)
            .map(|param| param.name)
    }
}

const fn obs(name: &'static str, kind: PlotKind, params: &'static [Param]) -> FunctionSpec {
    FunctionSpec {
        name,
        dataset: Dataset::Observation,
        kind,
        params,
    }
}

const fn proj(name: &'static str, kind: PlotKind, params: &'static [Param]) -> FunctionSpec {
    FunctionSpec {
        name,
        dataset: Dataset::Projection,
        kind,
        params,
    }
}

const fn req(name: &'static str) -> Param {
    Param::required(name)
}

const fn opt(name: &'static str) -> Param {
    Param::optional(name)
}

use AdminLevel::{Desa, Kabupaten, Kecamatan, Provinsi};
use PlotKind::*;

pub const STANDARD_FUNCTIONS: [FunctionSpec; 28] = [
    obs("plot_tml_desa", LocationSeries(Desa), &[req("desa"), opt("tahun")]),
    proj("plot_proyeksi_tml_desa", LocationSeries(Desa), &[req("desa"), opt("tahun")]),
    obs("tren_tml_desa", LocationTrend(Desa), &[req("desa")]),
    proj("tren_proyeksi_tml_desa", LocationTrend(Desa), &[req("desa")]),
    obs("tren_tml_kecamatan", LocationTrend(Kecamatan), &[req("kecamatan")]),
    proj("tren_proyeksi_tml_kecamatan", LocationTrend(Kecamatan), &[req("kecamatan")]),
    obs("tren_tml_kabupaten", LocationTrend(Kabupaten), &[req("kabupaten")]),
    proj("tren_proyeksi_tml_kabupaten", LocationTrend(Kabupaten), &[req("kabupaten")]),
    obs("tren_tml_nasional", NationalTrend, &[]),
    proj("tren_proyeksi_tml_nasional", NationalTrend, &[]),
    obs("grafik_tahunan_kabupaten", RegionYearly(Kabupaten), &[req("kabupaten"), req("tahun")]),
    proj("grafik_proyeksi_tahunan_kabupaten", RegionYearly(Kabupaten), &[req("kabupaten"), req("tahun")]),
    obs("grafik_tahunan_kecamatan", RegionYearly(Kecamatan), &[req("kecamatan"), req("tahun")]),
    proj("grafik_proyeksi_tahunan_kecamatan", RegionYearly(Kecamatan), &[req("kecamatan"), req("tahun")]),
    obs("plot_tml_tahunan", NationalYearly, &[req("tahun")]),
    proj("plot_proyeksi_tml_tahunan", NationalYearly, &[req("tahun")]),
    obs("plot_bandingkan_desa", Comparison(Desa), &[req("desa1"), req("desa2")]),
    proj("plot_proyeksi_bandingkan_desa", Comparison(Desa), &[req("desa1"), req("desa2")]),
    obs("plot_bandingkan_provinsi", Comparison(Provinsi), &[req("provinsi1"), req("provinsi2")]),
    proj("plot_proyeksi_bandingkan_provinsi", Comparison(Provinsi), &[req("provinsi1"), req("provinsi2")]),
    obs("ranking_tml_desa", Ranking(Desa), &[req("text")]),
    proj("ranking_proyeksi_tml_desa", Ranking(Desa), &[req("text")]),
    obs("ranking_tml_provinsi", Ranking(Provinsi), &[req("text")]),
    proj("ranking_proyeksi_tml_provinsi", Ranking(Provinsi), &[req("text")]),
    obs("peta_tml_tahun", YearMap, &[req("year")]),
    proj("peta_proyeksi_tml_tahun", YearMap, &[req("year")]),
    obs("peta_tren_tml_nasional", TrendMap, &[]),
    proj("peta_tren_proyeksi_tml_nasional", TrendMap, &[]),
];

/// Name-keyed table of plot functions.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionSpec>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registry holding every built-in sea-level function.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();
        for spec in STANDARD_FUNCTIONS {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, spec: FunctionSpec) -> Result<()> {
        if self.functions.contains_key(spec.name) {
            bail!("Function {} already registered", spec.name);
        }
        self.functions.insert(spec.name, spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Every intent that names a function must resolve here.
    pub fn validate_bindings(&self, intents: &IntentsConfig) -> Result<()> {
        for (tag, function) in intents.function_bindings() {
            if self.get(function).is_none() {
                bail!("Intent '{tag}' refers to unknown function '{function}'");
            }
        }
        Ok(())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
