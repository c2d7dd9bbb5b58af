use super::IntentsConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid token regex"));

/// Classifier output for a single utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub tag: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(tag: impl Into<String>, confidence: f32) -> Self {
        Self {
            tag: tag.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Strictly above the threshold; a prediction sitting on it is rejected.
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.confidence > threshold
    }
}

/// Maps free text to an intent tag.
pub trait IntentClassifier {
    fn predict(&self, text: &str) -> Prediction;
}

/// Bag-of-words matcher built from the intent patterns.
///
/// Each tag is scored by the best Dice overlap between the utterance's word
/// set and the word set of one of its patterns.
pub struct BagOfWordsClassifier {
    documents: Vec<(String, Vec<HashSet<String>>)>,
}

impl BagOfWordsClassifier {
    pub fn from_intents(config: &IntentsConfig) -> Self {
        let documents = config
            .intents
            .iter()
            .map(|intent| {
                let patterns = intent
                    .patterns
                    .iter()
                    .map(|pattern| tokenize(pattern))
                    .filter(|tokens| !tokens.is_empty())
                    .collect();
                (intent.tag.clone(), patterns)
            })
            .collect();
        Self { documents }
    }

    /// Distinct words across every pattern.
    pub fn vocabulary(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .documents
            .iter()
            .flat_map(|(_, patterns)| patterns.iter().flatten().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        words.sort();
        words
    }
}

impl IntentClassifier for BagOfWordsClassifier {
    fn predict(&self, text: &str) -> Prediction {
        let tokens = tokenize(text);
        let mut best: Option<(&str, f32)> = None;
        for (tag, patterns) in &self.documents {
            let score = patterns
                .iter()
                .map(|pattern| dice(&tokens, pattern))
                .fold(0.0_f32, f32::max);
            match best {
                Some((_, current)) if current >= score => {}
                _ => best = Some((tag, score)),
            }
        }
        match best {
            Some((tag, score)) => Prediction::new(tag, score),
            None => Prediction::new("fallback", 0.0),
        }
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

fn dice(left: &HashSet<String>, right: &HashSet<String>) -> f32 {
    let total = left.len() + right.len();
    if total == 0 {
        return 0.0;
    }
    let shared = left.intersection(right).count();
    (2 * shared) as f32 / total as f32
}
