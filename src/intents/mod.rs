//! Intents configuration: tags, training utterances, canned replies and the
//! optional visualization function each tag triggers.

pub mod classifier;

pub use classifier::{BagOfWordsClassifier, IntentClassifier, Prediction};

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One intent entry of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRecord {
    pub tag: String,
    /// Example utterances, only consumed when building the classifier.
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
    /// Registry key of the visualization function this intent dispatches to.
    #[serde(default)]
    pub function: Option<String>,
}

impl IntentRecord {
    /// Chooses one reply uniformly at random.
    pub fn pick_response<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.responses.choose(rng).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntentsConfig {
    pub intents: Vec<IntentRecord>,
}

impl IntentsConfig {
    /// Loads a JSON or YAML intents file, picked by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read intents file {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let config: IntentsConfig = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&data)
                .with_context(|| format!("Failed to parse intents file {}", path.display()))?,
            _ => serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse intents file {}", path.display()))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for intent in &self.intents {
            if !seen.insert(intent.tag.as_str()) {
                bail!("Intent tag '{}' is declared more than once", intent.tag);
            }
        }
        Ok(())
    }

    pub fn find(&self, tag: &str) -> Option<&IntentRecord> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }

    /// Tags that declare a `function` field, with the function name.
    pub fn function_bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.intents.iter().filter_map(|intent| {
            intent
                .function
                .as_deref()
                .map(|function| (intent.tag.as_str(), function))
        })
    }
}
