use anyhow::Result;
use samudra::Reply;

use crate::support::{last_text, reply_kinds};
use crate::IntegrationHarness;

#[test]
fn village_trend_reports_millimetres_over_thirty_years() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("tren tml desa siomeda");
    assert_eq!(outcome.tag, "tren_tml_desa");
    assert!(outcome.confidence > harness.config().chat.confidence_threshold);
    assert_eq!(reply_kinds(&outcome.replies), ["text", "chart", "text"]);

    let Reply::Chart(figure) = &outcome.replies[1] else {
        unreachable!();
    };
    assert_eq!(figure.title(), "Tren TML Desa Siomeda");
    assert_eq!(figure.point_count(), 4);

    let narration = last_text(&outcome.replies);
    assert!(narration.starts_with("Di Desa Siomeda"), "narration: {narration}");
    assert!(narration.contains("**1.00 milimeter setiap tahun**"));
    assert!(narration.contains("dalam 30 tahun terakhir"));
    assert!(narration.contains("**3.0 centimeter**"));
    Ok(())
}

#[test]
fn projected_village_trend_reports_metres_over_a_century() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("tren proyeksi tml desa siomeda");
    assert_eq!(outcome.tag, "tren_proyeksi_tml_desa");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "chart", "text"]);

    let Reply::Chart(figure) = &outcome.replies[1] else {
        unreachable!();
    };
    assert_eq!(figure.title(), "Tren Proyeksi TML Desa Siomeda");
    assert_eq!(figure.point_count(), 4);

    let narration = last_text(&outcome.replies);
    assert!(narration.starts_with("Di Desa Siomeda"), "narration: {narration}");
    assert!(narration.contains("**10.00 milimeter setiap tahunnya**"));
    assert!(narration.contains("dalam 100 tahun ke depan"));
    assert!(narration.contains("**berpotensi bertambah tinggi sekitar 1.0 meter**"));
    Ok(())
}

#[test]
fn projected_national_trend_averages_every_location() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("tren proyeksi tml nasional");
    assert_eq!(outcome.tag, "tren_proyeksi_tml_nasional");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "chart", "text"]);

    let Reply::Chart(figure) = &outcome.replies[1] else {
        unreachable!();
    };
    assert_eq!(
        figure.title(),
        "Tren Proyeksi TML Rata-Rata Nasional (2025-2100)"
    );
    let narration = last_text(&outcome.replies);
    assert!(narration.contains("**10.00 milimeter setiap tahunnya**"), "narration: {narration}");
    assert!(narration.contains("sekitar 1.0 meter"));
    Ok(())
}

#[test]
fn missing_projection_grid_is_a_technical_warning() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("peta proyeksi tml tahun 2050");
    assert_eq!(outcome.tag, "peta_proyeksi_tml_tahun");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "warning"]);
    assert_eq!(
        outcome.warnings().collect::<Vec<_>>(),
        ["Maaf, terjadi kesalahan teknis saat membuat visualisasi."]
    );
    Ok(())
}
