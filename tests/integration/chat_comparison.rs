use anyhow::Result;
use samudra::chat::history::{Role, TurnContent};
use samudra::Reply;

use crate::support::{last_text, reply_kinds};
use crate::IntegrationHarness;

#[test]
fn province_comparison_returns_chart_then_narration() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("Bandingkan provinsi Jawa Timur dan Jawa Barat");
    assert_eq!(outcome.tag, "bandingkan_provinsi");
    assert_eq!(
        reply_kinds(&outcome.replies),
        ["text", "chart", "text"],
        "unexpected replies: {:?}",
        outcome.replies
    );
    assert_eq!(
        outcome.replies[0],
        Reply::Text("Berikut perbandingan kedua provinsi.".into())
    );
    let Reply::Chart(figure) = &outcome.replies[1] else {
        unreachable!();
    };
    assert_eq!(figure.title(), "Perbandingan TML: Jawa Timur vs Jawa Barat");

    let narration = last_text(&outcome.replies);
    assert!(narration.contains("**Provinsi Jawa Timur** dan **Provinsi Jawa Barat**"));
    assert!(
        narration.contains("**Jawa Timur** lebih tinggi dibandingkan dengan **Jawa Barat**"),
        "narration: {narration}"
    );

    let history = session.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history.entries()[0].role, Role::User);
    assert!(matches!(history.entries()[2].content, TurnContent::Chart(_)));
    assert!(history
        .iter()
        .all(|entry| entry.turn_id == outcome.turn_id));
    Ok(())
}

#[test]
fn one_province_asks_for_a_second_name() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("bandingkan provinsi jawa timur");
    assert_eq!(outcome.tag, "bandingkan_provinsi");
    assert_eq!(
        outcome.warnings().collect::<Vec<_>>(),
        ["Harap sebutkan dua nama provinsi untuk dibandingkan."]
    );
    assert!(!reply_kinds(&outcome.replies).contains(&"chart"));
    Ok(())
}

#[test]
fn history_is_written_as_json_lines() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();
    session.handle_message("halo");
    session.handle_message("Bandingkan provinsi Jawa Timur dan Jawa Barat");

    let path = harness.workspace_path().join("logs/history.jsonl");
    session.history().save_jsonl(&path)?;
    let content = std::fs::read_to_string(&path)?;
    assert_eq!(content.lines().count(), session.history().len());
    assert!(content.contains("\"type\":\"chart\""));
    Ok(())
}
