use anyhow::Result;
use samudra::Reply;

use crate::support::reply_kinds;
use crate::IntegrationHarness;

#[test]
fn confidence_on_the_threshold_is_rejected() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    // Three of seven words match a three-word pattern: Dice score of exactly 0.6.
    let outcome = session.handle_message("peta tml tahun lima enam tujuh delapan");
    assert_eq!(outcome.tag, "peta_tml_tahun");
    assert!((outcome.confidence - 0.6).abs() < f32::EPSILON);
    assert_eq!(reply_kinds(&outcome.replies), ["warning"]);
    assert!(outcome
        .warnings()
        .next()
        .is_some_and(|message| message.contains("(keyakinan: 60%)")));
    assert_eq!(session.history().len(), 2);
    Ok(())
}

#[test]
fn unrelated_question_gets_low_confidence_warning() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("siapa juara piala dunia");
    assert_eq!(reply_kinds(&outcome.replies), ["warning"]);
    assert!(outcome
        .warnings()
        .next()
        .is_some_and(|message| message.contains("(keyakinan: 0%)")));
    Ok(())
}

#[test]
fn greeting_is_answered_without_dispatch() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("halo");
    assert_eq!(
        outcome.replies,
        vec![Reply::Text("Halo! Ada yang bisa dibantu?".into())]
    );
    Ok(())
}

#[test]
fn unknown_village_yields_a_single_warning() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("grafik tml desa atlantis");
    assert_eq!(outcome.tag, "plot_tml_desa");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "warning"]);
    assert_eq!(
        outcome.warnings().collect::<Vec<_>>(),
        ["Maaf, data tidak ditemukan untuk permintaan Anda."]
    );
    Ok(())
}

#[test]
fn trend_without_a_village_asks_for_one() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("tren tml desa");
    assert_eq!(outcome.tag, "tren_tml_desa");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "warning"]);
    assert_eq!(
        outcome.warnings().collect::<Vec<_>>(),
        ["Mohon sebutkan nama desa untuk menampilkan grafik."]
    );
    Ok(())
}

#[test]
fn trend_with_two_villages_asks_for_one() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("tren tml desa siomeda dan tolo");
    assert_eq!(outcome.tag, "tren_tml_desa");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "warning"]);
    assert_eq!(
        outcome.warnings().collect::<Vec<_>>(),
        ["Ditemukan lebih dari satu desa (siomeda, tolo). Mohon sebutkan satu saja."]
    );
    Ok(())
}

#[test]
fn sessions_sharing_an_engine_keep_separate_history() -> Result<()> {
    let harness = IntegrationHarness::new();
    let engine = harness.engine();
    let mut first = samudra::ChatSession::new(engine.clone());
    let mut second = samudra::ChatSession::new(engine);

    first.handle_message("halo");
    first.handle_message("ranking tml provinsi");
    second.handle_message("halo");
    assert_eq!(first.history().len(), 6);
    assert_eq!(second.history().len(), 2);

    first.reset();
    assert!(first.history().is_empty());
    assert_eq!(second.history().len(), 2);
    Ok(())
}
