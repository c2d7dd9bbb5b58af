use samudra::chat::router::entities::EntityField;
use samudra::extract_entities;

const QUESTIONS: &[&str] = &[
    "Bandingkan provinsi Jawa Timur dan Jawa Barat",
    "bandingkan desa Siomeda vs Tolo tahun 2010",
    "Tren TML Desa Siomeda",
    "grafik tahunan kabupaten Kep. Seribu tahun 2020",
    "rata-rata bulanan kecamatan Sedati 2021",
    "peta tml tahun 2030",
    "halo, apa kabar?",
];

#[test]
fn values_are_lower_case_and_trimmed() {
    for question in QUESTIONS {
        let entities = extract_entities(question);
        for (field, values) in entities.iter() {
            assert!(!values.is_empty(), "{field} present but empty for {question}");
            for value in values {
                assert_eq!(value, &value.to_lowercase(), "{question}");
                assert_eq!(value, value.trim(), "{question}");
            }
        }
    }
}

#[test]
fn years_are_four_digits() {
    for question in QUESTIONS {
        if let Some(years) = extract_entities(question).get(EntityField::Tahun) {
            assert!(years
                .iter()
                .all(|year| year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())));
        }
    }
}

#[test]
fn comparison_pairs_hold_exactly_two_names() {
    let provinces = extract_entities("Bandingkan provinsi Jawa Timur dan Jawa Barat");
    assert_eq!(
        provinces.get(EntityField::Provinsi).map(<[String]>::len),
        Some(2)
    );
    assert!(!provinces.contains(EntityField::Desa));

    let villages = extract_entities("bandingkan desa Siomeda vs Tolo tahun 2010");
    let names = villages.get(EntityField::Desa).unwrap_or_default();
    assert_eq!(names.len(), 2);
    assert_eq!(names[0], "siomeda");
    assert_eq!(villages.single(EntityField::Tahun), Some("2010"));
}

#[test]
fn plain_greeting_has_no_entities() {
    assert!(extract_entities("halo, apa kabar?").is_empty());
}
