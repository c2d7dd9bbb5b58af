//! Location and year extraction from free-text questions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Semantic fields the extractor can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityField {
    Desa,
    Kecamatan,
    Kabupaten,
    Provinsi,
    Tahun,
}

impl EntityField {
    pub const LOCATIONS: [EntityField; 4] = [
        EntityField::Desa,
        EntityField::Kecamatan,
        EntityField::Kabupaten,
        EntityField::Provinsi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desa => "desa",
            Self::Kecamatan => "kecamatan",
            Self::Kabupaten => "kabupaten",
            Self::Provinsi => "provinsi",
            Self::Tahun => "tahun",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "desa" => Some(Self::Desa),
            "kecamatan" => Some(Self::Kecamatan),
            "kabupaten" => Some(Self::Kabupaten),
            "provinsi" => Some(Self::Provinsi),
            "tahun" => Some(Self::Tahun),
            _ => None,
        }
    }
}

impl fmt::Display for EntityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted fields. A field is either absent or holds at least one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities(BTreeMap<EntityField, Vec<String>>);

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `values` under `field`; an empty list leaves the field absent.
    pub fn insert(&mut self, field: EntityField, values: Vec<String>) {
        if values.is_empty() {
            self.0.remove(&field);
        } else {
            self.0.insert(field, values);
        }
    }

    pub fn get(&self, field: EntityField) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: EntityField) -> bool {
        self.0.contains_key(&field)
    }

    /// The value of a field that holds exactly one entry.
    pub fn single(&self, field: EntityField) -> Option<&str> {
        match self.0.get(&field).map(Vec::as_slice) {
            Some([value]) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityField, &[String])> {
        self.0.iter().map(|(field, values)| (*field, values.as_slice()))
    }
}

static PROVINSI_PAIR: Lazy<Regex> = Lazy::new(|| pair_pattern("provinsi"));
static DESA_PAIR: Lazy<Regex> = Lazy::new(|| pair_pattern("desa"));
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").unwrap());
static SINGLE_FIELDS: Lazy<Vec<(EntityField, Regex)>> = Lazy::new(|| {
    EntityField::LOCATIONS
        .iter()
        .map(|field| (*field, single_pattern(field.as_str())))
        .collect()
});

// The name run stops before " dan", " dengan", " tahun", a year or the end.
// The terminator is matched but not captured, so trailing keywords stay out
// of the name.
fn single_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(
        r"\b{keyword}\s+([\w\s./'-]+?)(?:\s+dan|\s+dengan|\s+tahun|\s+\d{{4}}|$)"
    ))
    .unwrap()
}

fn pair_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(
        r"{keyword}\s+([\w\s./'-]+?)\s+(?:dan|vs)\s+([\w\s./'-]+)"
    ))
    .unwrap()
}

/// Parses `text` into location and year fields.
///
/// Comparison phrases ("provinsi A dan B", "desa A vs B") take priority;
/// when one is found only the pair and an optional year are returned.
pub fn extract_entities(text: &str) -> Entities {
    let lower = text.to_lowercase();
    let mut entities = Entities::new();

    for (field, pattern) in [
        (EntityField::Provinsi, &*PROVINSI_PAIR),
        (EntityField::Desa, &*DESA_PAIR),
    ] {
        if let Some(caps) = pattern.captures(&lower) {
            let first = caps[1].trim().to_string();
            let second = caps[2].trim().to_string();
            entities.insert(field, vec![first, second]);
        }
    }

    if !entities.is_empty() {
        if let Some(caps) = YEAR.captures(&lower) {
            entities.insert(EntityField::Tahun, vec![caps[1].to_string()]);
        }
        debug!(?entities, "comparison entities extracted");
        return entities;
    }

    for (field, pattern) in SINGLE_FIELDS.iter() {
        let found: Vec<String> = pattern
            .captures_iter(&lower)
            .map(|caps| caps[1].trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        entities.insert(*field, found);
    }
    let years: Vec<String> = YEAR
        .captures_iter(&lower)
        .map(|caps| caps[1].to_string())
        .collect();
    entities.insert(EntityField::Tahun, years);

    debug!(?entities, "entities extracted");
    entities
}
