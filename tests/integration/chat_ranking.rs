use anyhow::Result;
use samudra::plots::DataFrame;
use samudra::Reply;

use crate::support::{last_text, reply_kinds};
use crate::IntegrationHarness;

#[test]
fn ranking_returns_table_and_narration_without_chart() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("ranking tml provinsi");
    assert_eq!(outcome.tag, "ranking_tml_provinsi");
    assert_eq!(reply_kinds(&outcome.replies), ["text", "table", "text"]);

    let Reply::Table(DataFrame::Ranking(table)) = &outcome.replies[1] else {
        panic!("expected a ranking table, got {:?}", outcome.replies[1]);
    };
    let provinces: Vec<&str> = table.rows.iter().map(|row| row.provinsi.as_str()).collect();
    assert_eq!(provinces, ["jawa timur", "jawa barat", "sulawesi tengah"]);
    assert_eq!(table.rows[0].rank, 1);

    let narration = last_text(&outcome.replies);
    assert!(narration.contains("**Jawa Timur**"), "narration: {narration}");
    assert!(narration.contains("**0.31 meter**"));
    Ok(())
}

#[test]
fn ranking_size_comes_from_the_question() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();

    let outcome = session.handle_message("ranking tml provinsi 2");
    let Reply::Table(DataFrame::Ranking(table)) = &outcome.replies[1] else {
        panic!("expected a ranking table, got {:?}", outcome.replies);
    };
    assert_eq!(table.rows.len(), 2);
    Ok(())
}
