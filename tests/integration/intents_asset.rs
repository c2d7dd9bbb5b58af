use anyhow::Result;
use samudra::chat::router::registry::{FunctionRegistry, STANDARD_FUNCTIONS};
use samudra::intents::{BagOfWordsClassifier, IntentClassifier, IntentsConfig};
use std::collections::HashSet;
use std::path::Path;

fn shipped_intents() -> Result<IntentsConfig> {
    IntentsConfig::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/samudra.json"))
}

#[test]
fn shipped_intents_bind_every_standard_function() -> Result<()> {
    let intents = shipped_intents()?;
    FunctionRegistry::standard()?.validate_bindings(&intents)?;

    let bound: HashSet<&str> = intents
        .function_bindings()
        .map(|(_, function)| function)
        .collect();
    for function in STANDARD_FUNCTIONS.iter() {
        assert!(bound.contains(function.name), "{} has no intent", function.name);
    }
    Ok(())
}

#[test]
fn shipped_intents_route_typical_questions() -> Result<()> {
    let intents = shipped_intents()?;
    let classifier = BagOfWordsClassifier::from_intents(&intents);
    for (question, tag) in [
        ("bandingkan provinsi jawa timur dan jawa barat", "bandingkan_provinsi"),
        ("tren tml desa siomeda", "tren_tml_desa"),
        ("peta tml tahun 2020", "peta_tml_tahun"),
        ("halo", "salam"),
    ] {
        let prediction = classifier.predict(question);
        assert_eq!(prediction.tag, tag, "{question}");
        assert!(prediction.exceeds(0.6), "{question}: {}", prediction.confidence);
    }
    Ok(())
}
