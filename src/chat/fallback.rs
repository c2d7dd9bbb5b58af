//! Fixed user-facing messages for turns that end without a visualization.

use super::router::entities::EntityField;

pub fn low_confidence(confidence: f32) -> String {
    format!(
        "Maaf, saya kurang yakin memahami maksud Anda (keyakinan: {:.0}%). Mohon coba tanyakan dengan lebih spesifik, misalnya 'tren tml nasional' atau 'bandingkan provinsi jawa timur dan jawa barat'.",
        confidence * 100.0
    )
}

pub fn unknown_intent() -> String {
    "Terjadi kesalahan: Tag dikenali, tetapi tidak ada definisi intent yang cocok di konfigurasi intents."
        .into()
}

pub fn need_two_names(field: EntityField) -> String {
    format!("Harap sebutkan dua nama {field} untuk dibandingkan.")
}

pub fn missing_argument(field: EntityField) -> String {
    match field {
        EntityField::Tahun => "Mohon sebutkan tahun untuk menampilkan grafik.".into(),
        _ => format!("Mohon sebutkan nama {field} untuk menampilkan grafik."),
    }
}

/// Several values were extracted where the function takes one.
pub fn ambiguous_argument(field: EntityField, values: &[String]) -> String {
    format!(
        "Ditemukan lebih dari satu {field} ({}). Mohon sebutkan satu saja.",
        values.join(", ")
    )
}

pub fn ranking_not_found() -> String {
    "Data untuk ranking tidak ditemukan.".into()
}

pub fn map_year_missing() -> String {
    "Mohon sebutkan tahun untuk menampilkan peta.".into()
}

pub fn map_not_found() -> String {
    "Data untuk membuat peta tidak ditemukan.".into()
}

pub fn data_not_found() -> String {
    "Maaf, data tidak ditemukan untuk permintaan Anda.".into()
}

pub fn technical_error() -> String {
    "Maaf, terjadi kesalahan teknis saat membuat visualisasi.".into()
}
