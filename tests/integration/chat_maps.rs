use anyhow::Result;
use samudra::Reply;

use crate::support::{last_text, reply_kinds};
use crate::IntegrationHarness;

#[test]
fn year_map_names_the_highest_sea() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("peta tml tahun 2020");
    assert_eq!(outcome.tag, "peta_tml_tahun");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "chart", "text"]);
    let Reply::Chart(figure) = &outcome.replies[1] else {
        unreachable!();
    };
    assert_eq!(figure.title(), "Peta TML Tahun 2020");
    assert_eq!(figure.point_count(), 2);

    let narration = last_text(&outcome.replies);
    assert!(narration.contains("tahun **2020**"), "narration: {narration}");
    assert!(narration.contains("**Laut Jawa**"));
    Ok(())
}

#[test]
fn malformed_year_asks_for_a_year() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("peta tml tahun 20x0");
    assert_eq!(outcome.tag, "peta_tml_tahun");
    assert_eq!(
        outcome.replies,
        vec![
            Reply::Text("Berikut peta TML.".into()),
            Reply::Warning("Mohon sebutkan tahun untuk menampilkan peta.".into()),
        ]
    );
    Ok(())
}

#[test]
fn uncovered_year_reports_missing_map_data() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("peta tml tahun 1990");
    assert_eq!(
        outcome.warnings().collect::<Vec<_>>(),
        ["Data untuk membuat peta tidak ditemukan."]
    );
    Ok(())
}

#[test]
fn trend_map_falls_back_to_offshore_province() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("peta tren tml nasional");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "chart", "text"]);
    let narration = last_text(&outcome.replies);
    assert!(
        narration.contains("**Laut Jawa** (dekat Provinsi **Jauh dari Daratan**)"),
        "narration: {narration}"
    );
    Ok(())
}
