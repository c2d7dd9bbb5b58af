use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Indonesian administrative levels, village through province.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    Desa,
    Kecamatan,
    Kabupaten,
    Provinsi,
}

impl AdminLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desa => "desa",
            Self::Kecamatan => "kecamatan",
            Self::Kabupaten => "kabupaten",
            Self::Provinsi => "provinsi",
        }
    }

    /// Capitalised label used in chart titles and narration.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Desa => "Desa",
            Self::Kecamatan => "Kecamatan",
            Self::Kabupaten => "Kabupaten",
            Self::Provinsi => "Provinsi",
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One monthly sea-level sample attributed to an administrative area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub time: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub sla: f64,
    pub provinsi: String,
    pub kabupaten: String,
    pub kecamatan: String,
    pub desa: String,
}

impl SeriesRecord {
    pub fn year(&self) -> i32 {
        self.time.year()
    }

    pub fn name(&self, level: AdminLevel) -> &str {
        match level {
            AdminLevel::Desa => &self.desa,
            AdminLevel::Kecamatan => &self.kecamatan,
            AdminLevel::Kabupaten => &self.kabupaten,
            AdminLevel::Provinsi => &self.provinsi,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    time: String,
    latitude: f64,
    longitude: f64,
    sla: Option<f64>,
    #[serde(default)]
    provinsi: String,
    #[serde(default)]
    kabupaten: String,
    #[serde(default)]
    kecamatan: String,
    #[serde(default)]
    desa: String,
}

/// Sea-level time series for one dataset, location names normalised to
/// lower case.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    records: Vec<SeriesRecord>,
}

impl SeriesStore {
    pub fn from_records(records: Vec<SeriesRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut record| {
                record.provinsi = normalize_name(&record.provinsi);
                record.kabupaten = normalize_name(&record.kabupaten);
                record.kecamatan = normalize_name(&record.kecamatan);
                record.desa = normalize_name(&record.desa);
                record
            })
            .collect();
        Self { records }
    }

    /// Reads `time,latitude,longitude,sla,provinsi,kabupaten,kecamatan,desa`
    /// rows. Rows without a value are skipped.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open series file {}", path.display()))?;
        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.with_context(|| {
                format!("Malformed row {} in {}", index + 1, path.display())
            })?;
            let Some(sla) = row.sla.filter(|value| value.is_finite()) else {
                continue;
            };
            let time = parse_time(&row.time).with_context(|| {
                format!("Invalid time '{}' at row {} in {}", row.time, index + 1, path.display())
            })?;
            records.push(SeriesRecord {
                time,
                latitude: row.latitude,
                longitude: row.longitude,
                sla,
                provinsi: row.provinsi,
                kabupaten: row.kabupaten,
                kecamatan: row.kecamatan,
                desa: row.desa,
            });
        }
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[SeriesRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records whose `level` name equals `name`, compared case-insensitively.
    pub fn at_location<'a>(
        &'a self,
        level: AdminLevel,
        name: &str,
    ) -> impl Iterator<Item = &'a SeriesRecord> + 'a {
        let wanted = normalize_name(name);
        self.records
            .iter()
            .filter(move |record| record.name(level) == wanted)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn parse_time(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    Ok(NaiveDate::parse_from_str(date_part, "%Y-%m-%d")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn csv_rows_are_normalised_and_gaps_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("series.csv");
        fs::write(
            &path,
            "time,latitude,longitude,sla,provinsi,kabupaten,kecamatan,desa\n\
             2020-01-16 00:00:00,-6.1,106.8,0.12, DKI Jakarta ,Kep. Seribu,Seribu Utara,Pulau Panggang\n\
             2020-02-16,-6.1,106.8,,DKI Jakarta,Kep. Seribu,Seribu Utara,Pulau Panggang\n",
        )
        .unwrap();
        let store = SeriesStore::from_csv_path(&path).unwrap();
        assert_eq!(store.len(), 1);
        let record = &store.records()[0];
        assert_eq!(record.provinsi, "dki jakarta");
        assert_eq!(record.desa, "pulau panggang");
        assert_eq!(record.time, NaiveDate::from_ymd_opt(2020, 1, 16).unwrap());
        assert_eq!(record.year(), 2020);
    }

    #[test]
    fn location_filter_ignores_case() {
        let store = SeriesStore::from_records(vec![SeriesRecord {
            time: NaiveDate::from_ymd_opt(2001, 3, 1).unwrap(),
            latitude: 0.0,
            longitude: 0.0,
            sla: 0.1,
            provinsi: "Maluku".into(),
            kabupaten: "Ambon".into(),
            kecamatan: "Sirimau".into(),
            desa: "Batu Merah".into(),
        }]);
        assert_eq!(store.at_location(AdminLevel::Desa, "BATU MERAH").count(), 1);
        assert_eq!(store.at_location(AdminLevel::Provinsi, "papua").count(), 0);
    }
}
