use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const UNKNOWN_SEA: &str = "Wilayah Tidak Diketahui";
pub const OFFSHORE: &str = "Jauh dari Daratan";

/// Named area made of one or more rings of `[lon, lat]` vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionShape {
    pub name: String,
    pub polygons: Vec<Vec<[f64; 2]>>,
}

impl RegionShape {
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        self.polygons
            .iter()
            .any(|ring| ring_contains(ring, longitude, latitude))
    }
}

/// Point-to-region lookup over a list of shapes; the first hit wins.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    shapes: Vec<RegionShape>,
}

impl RegionIndex {
    pub fn new(shapes: Vec<RegionShape>) -> Self {
        Self { shapes }
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read region file {}", path.display()))?;
        let shapes: Vec<RegionShape> = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse region file {}", path.display()))?;
        Ok(Self::new(shapes))
    }

    pub fn locate(&self, latitude: f64, longitude: f64) -> Option<&str> {
        self.shapes
            .iter()
            .find(|shape| shape.contains(longitude, latitude))
            .map(|shape| shape.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

// Even-odd rule.
fn ring_contains(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

const SEA_NAMES: &[(&str, &str)] = &[
    ("Arafura Sea", "Laut Arafura"),
    ("Banda Sea", "Laut Banda"),
    ("Java Sea", "Laut Jawa"),
    ("Savu Sea", "Laut Sawu"),
    ("Bali Sea", "Laut Bali"),
    ("Flores Sea", "Laut Flores"),
    ("Ceram Sea", "Laut Seram"),
    ("Bismarck Sea", "Laut Bismarck"),
    ("Gulf of Tomini", "Teluk Tomini"),
    ("Makassar Strait", "Selat Makassar"),
    ("Halmahera Sea", "Laut Halmahera"),
    ("Molukka Sea", "Laut Maluku"),
    ("Celebes Sea", "Laut Sulawesi"),
    ("Sulu Sea", "Laut Sulu"),
    ("Gulf of Thailand", "Teluk Thailand"),
    ("South China Sea", "Laut Cina Selatan"),
    ("Singapore Strait", "Selat Singapura"),
    ("Malacca Strait", "Selat Malaka"),
    ("Andaman or Burma Sea", "Laut Andaman"),
    ("Philippine Sea", "Laut Filipina"),
    ("Timor Sea", "Laut Timor"),
    ("Indian Ocean", "Samudra Hindia"),
    ("Pacific Ocean", "Samudra Pasifik"),
];

/// Indonesian name of an IHO sea area; unknown names pass through.
pub fn translate_sea_name(name: &str) -> &str {
    SEA_NAMES
        .iter()
        .find(|(english, _)| *english == name)
        .map(|(_, local)| *local)
        .unwrap_or(name)
}
