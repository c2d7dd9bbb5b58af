//! Chat turn handling.
//!
//! A [`ChatEngine`] holds everything that is read-only for the life of the
//! process (intents, classifier, function registry, plot backend) and can be
//! shared between sessions. Each [`ChatSession`] owns its own history and
//! random source.

pub mod fallback;
pub mod history;
pub mod router;
pub mod stream;
pub mod ui;

use crate::config::{AppConfig, ChatSettings};
use crate::data::DataContext;
use crate::intents::{BagOfWordsClassifier, IntentClassifier, IntentsConfig};
use crate::plots::{DataFrame, Figure, SeaLevelPlotter};
use anyhow::{Context, Result};
use history::{History, Role, TurnContent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use router::dispatcher::{DispatchResult, Dispatcher, PlotBackend};
use router::entities::extract_entities;
use router::registry::FunctionRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, field, info, info_span, warn};
use uuid::Uuid;

/// One item to show the user, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Warning(String),
    Chart(Figure),
    Table(DataFrame),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub turn_id: Uuid,
    pub tag: String,
    pub confidence: f32,
    pub replies: Vec<Reply>,
}

impl TurnOutcome {
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.replies.iter().filter_map(|reply| match reply {
            Reply::Warning(message) => Some(message.as_str()),
            _ => None,
        })
    }
}

pub struct ChatEngine {
    intents: IntentsConfig,
    classifier: Box<dyn IntentClassifier + Send + Sync>,
    dispatcher: Dispatcher,
    backend: Box<dyn PlotBackend + Send + Sync>,
    settings: ChatSettings,
}

impl ChatEngine {
    /// Fails when an intent names a function the registry does not know.
    pub fn new(
        intents: IntentsConfig,
        classifier: Box<dyn IntentClassifier + Send + Sync>,
        backend: Box<dyn PlotBackend + Send + Sync>,
        settings: ChatSettings,
    ) -> Result<Self> {
        let registry = FunctionRegistry::standard()?;
        registry.validate_bindings(&intents)?;
        Ok(Self {
            intents,
            classifier,
            dispatcher: Dispatcher::new(registry),
            backend,
            settings,
        })
    }

    /// Loads intents and data under `root` and wires the default classifier
    /// and plotter.
    pub fn bootstrap(config: &AppConfig, root: &Path) -> Result<Self> {
        let intents_path = config.data.resolve(root, &config.data.intents);
        let intents = IntentsConfig::load(&intents_path)
            .with_context(|| format!("Failed to load intents from {}", intents_path.display()))?;
        let data = DataContext::load(&config.data, root)?;
        let classifier = BagOfWordsClassifier::from_intents(&intents);
        info!(
            intents = intents.intents.len(),
            vocabulary = classifier.vocabulary().len(),
            "chat engine ready"
        );
        let backend = SeaLevelPlotter::new(Arc::new(data), config.chat.ranking_default_top_n);
        Self::new(
            intents,
            Box::new(classifier),
            Box::new(backend),
            config.chat.clone(),
        )
    }

    pub fn intents(&self) -> &IntentsConfig {
        &self.intents
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }
}

pub struct ChatSession {
    engine: Arc<ChatEngine>,
    history: History,
    rng: StdRng,
}

impl ChatSession {
    pub fn new(engine: Arc<ChatEngine>) -> Self {
        Self::with_rng(engine, StdRng::from_entropy())
    }

    pub fn with_rng(engine: Arc<ChatEngine>, rng: StdRng) -> Self {
        Self {
            engine,
            history: History::new(),
            rng,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.reset();
    }

    /// Runs one user turn. Every path ends with at least one reply recorded
    /// in the history.
    pub fn handle_message(&mut self, text: &str) -> TurnOutcome {
        let engine = Arc::clone(&self.engine);
        let turn_id = Uuid::new_v4();
        let span = info_span!(
            "turn",
            %turn_id,
            tag = field::Empty,
            confidence = field::Empty
        );
        let _guard = span.enter();

        self.history
            .push(turn_id, Role::User, TurnContent::Text(text.to_string()));

        let prediction = engine.classifier.predict(text);
        span.record("tag", prediction.tag.as_str());
        span.record("confidence", prediction.confidence);
        let mut outcome = TurnOutcome {
            turn_id,
            tag: prediction.tag.clone(),
            confidence: prediction.confidence,
            replies: Vec::new(),
        };

        if !prediction.exceeds(engine.settings.confidence_threshold) {
            debug!("confidence at or below threshold");
            self.warn(&mut outcome, fallback::low_confidence(prediction.confidence));
            return outcome;
        }

        let Some(intent) = engine.intents.find(&prediction.tag) else {
            warn!(tag = %prediction.tag, "classifier returned a tag without an intent");
            self.warn(&mut outcome, fallback::unknown_intent());
            return outcome;
        };

        if let Some(response) = intent.pick_response(&mut self.rng) {
            self.say(&mut outcome, Reply::Text(response.to_string()));
        }

        if let Some(function) = intent.function.as_deref() {
            let entities = extract_entities(text);
            let result = engine.dispatcher.dispatch(
                engine.backend.as_ref(),
                &intent.tag,
                function,
                text,
                &entities,
            );
            self.record_dispatch(&mut outcome, result);
        }
        outcome
    }

    fn record_dispatch(&mut self, outcome: &mut TurnOutcome, result: DispatchResult) {
        match result {
            DispatchResult::Warning { message } => self.warn(outcome, message),
            DispatchResult::Chart { figure, narration } => {
                self.say(outcome, Reply::Chart(figure));
                self.say(outcome, Reply::Text(narration));
            }
            DispatchResult::Table {
                dataframe,
                narration,
            } => {
                self.say(outcome, Reply::Table(dataframe));
                self.say(outcome, Reply::Text(narration));
            }
        }
    }

    fn warn(&mut self, outcome: &mut TurnOutcome, message: String) {
        self.history.push(
            outcome.turn_id,
            Role::Assistant,
            TurnContent::Text(message.clone()),
        );
        outcome.replies.push(Reply::Warning(message));
    }

    fn say(&mut self, outcome: &mut TurnOutcome, reply: Reply) {
        let content = match &reply {
            Reply::Text(text) | Reply::Warning(text) => TurnContent::Text(text.clone()),
            Reply::Chart(figure) => TurnContent::Chart(figure.clone()),
            Reply::Table(frame) => TurnContent::DataFrame(frame.clone()),
        };
        self.history.push(outcome.turn_id, Role::Assistant, content);
        outcome.replies.push(reply);
    }
}
