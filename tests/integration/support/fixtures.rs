use anyhow::Result;
use samudra::config::DataSettings;
use serde_json::json;
use std::fs;
use std::path::Path;

/// Observation rows: two Javanese provinces with a clear gap between them,
/// and one village in Central Sulawesi rising 1 mm every year.
const OBSERVATION_CSV: &str = "\
time,latitude,longitude,sla,provinsi,kabupaten,kecamatan,desa
2000-01-16,-6.9,112.7,0.30,Jawa Timur,Sidoarjo,Sedati,Tolo
2000-02-16,-6.9,112.7,0.32,Jawa Timur,Sidoarjo,Sedati,Tolo
2000-01-16,-6.1,106.8,0.10,Jawa Barat,Bekasi,Muaragembong,Pantai Bahagia
2000-02-16,-6.1,106.8,0.12,Jawa Barat,Bekasi,Muaragembong,Pantai Bahagia
2000-01-16,-0.9,119.8,0.100,Sulawesi Tengah,Donggala,Banawa,Siomeda
2001-01-16,-0.9,119.8,0.101,Sulawesi Tengah,Donggala,Banawa,Siomeda
2002-01-16,-0.9,119.8,0.102,Sulawesi Tengah,Donggala,Banawa,Siomeda
2003-01-16,-0.9,119.8,0.103,Sulawesi Tengah,Donggala,Banawa,Siomeda
2003-02-16,-0.9,119.8,,Sulawesi Tengah,Donggala,Banawa,Siomeda
";

/// Projection rows: two villages rising 10 mm every year, so both the village
/// and the national trend come to one metre over a century.
const PROJECTION_CSV: &str = "\
time,latitude,longitude,sla,provinsi,kabupaten,kecamatan,desa
2030-01-16,-0.9,119.8,0.10,Sulawesi Tengah,Donggala,Banawa,Siomeda
2031-01-16,-0.9,119.8,0.11,Sulawesi Tengah,Donggala,Banawa,Siomeda
2032-01-16,-0.9,119.8,0.12,Sulawesi Tengah,Donggala,Banawa,Siomeda
2033-01-16,-0.9,119.8,0.13,Sulawesi Tengah,Donggala,Banawa,Siomeda
2030-01-16,-6.9,112.7,0.30,Jawa Timur,Sidoarjo,Sedati,Tolo
2031-01-16,-6.9,112.7,0.31,Jawa Timur,Sidoarjo,Sedati,Tolo
2032-01-16,-6.9,112.7,0.32,Jawa Timur,Sidoarjo,Sedati,Tolo
2033-01-16,-6.9,112.7,0.33,Jawa Timur,Sidoarjo,Sedati,Tolo
";

pub fn intents() -> serde_json::Value {
    json!({
        "intents": [
            {
                "tag": "salam",
                "patterns": ["halo"],
                "responses": ["Halo! Ada yang bisa dibantu?"]
            },
            {
                "tag": "bandingkan_provinsi",
                "patterns": ["bandingkan provinsi jawa timur dan jawa barat"],
                "responses": ["Berikut perbandingan kedua provinsi."],
                "function": "plot_bandingkan_provinsi"
            },
            {
                "tag": "tren_tml_desa",
                "patterns": ["tren tml desa siomeda"],
                "responses": ["Berikut tren TML desa tersebut."],
                "function": "tren_tml_desa"
            },
            {
                "tag": "tren_proyeksi_tml_desa",
                "patterns": ["tren proyeksi tml desa siomeda"],
                "responses": ["Berikut tren proyeksi TML desa tersebut."],
                "function": "tren_proyeksi_tml_desa"
            },
            {
                "tag": "tren_proyeksi_tml_nasional",
                "patterns": ["tren proyeksi tml nasional"],
                "responses": ["Berikut tren proyeksi nasional."],
                "function": "tren_proyeksi_tml_nasional"
            },
            {
                "tag": "plot_tml_desa",
                "patterns": ["grafik tml desa"],
                "responses": ["Berikut grafik TML desa."],
                "function": "plot_tml_desa"
            },
            {
                "tag": "ranking_tml_provinsi",
                "patterns": ["ranking tml provinsi"],
                "responses": ["Berikut peringkat provinsi."],
                "function": "ranking_tml_provinsi"
            },
            {
                "tag": "peta_tml_tahun",
                "patterns": ["peta tml tahun"],
                "responses": ["Berikut peta TML."],
                "function": "peta_tml_tahun"
            },
            {
                "tag": "peta_proyeksi_tml_tahun",
                "patterns": ["peta proyeksi tml tahun"],
                "responses": ["Berikut peta proyeksi TML."],
                "function": "peta_proyeksi_tml_tahun"
            },
            {
                "tag": "peta_tren_tml_nasional",
                "patterns": ["peta tren tml nasional"],
                "responses": ["Berikut peta tren TML."],
                "function": "peta_tren_tml_nasional"
            }
        ]
    })
}

/// Writes the intents file, every observation dataset and the projection
/// series at the default locations under `root`. Projection grids and
/// province shapes are left out.
pub fn write_all(root: &Path) -> Result<()> {
    let settings = DataSettings::default();
    let write = |relative: &Path, contents: String| -> Result<()> {
        let path = settings.resolve(root, relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    };

    write(&settings.intents, serde_json::to_string_pretty(&intents())?)?;
    write(&settings.observation_series, OBSERVATION_CSV.to_string())?;
    write(&settings.projection_series, PROJECTION_CSV.to_string())?;
    write(
        &settings.observation_grid,
        json!({
            "latitude": [-6.0],
            "longitude": [110.0, 111.0],
            "frames": [
                { "time": "2020-01-16", "values": [0.10, 0.18] },
                { "time": "2020-02-16", "values": [0.12, null] }
            ]
        })
        .to_string(),
    )?;
    write(
        &settings.observation_trend_grid,
        json!({
            "latitude": [-6.0],
            "longitude": [110.0, 111.0],
            "values": [3.2, 4.1]
        })
        .to_string(),
    )?;
    write(
        &settings.sea_regions,
        json!([
            {
                "name": "Java Sea",
                "polygons": [[[109.0, -7.0], [112.0, -7.0], [112.0, -5.0], [109.0, -5.0]]]
            }
        ])
        .to_string(),
    )?;
    Ok(())
}
