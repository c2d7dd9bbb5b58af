use rand::rngs::StdRng;
use rand::SeedableRng;
use samudra::config::AppConfig;
use samudra::{ChatEngine, ChatSession};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Temporary workspace seeded with a small sea-level dataset.
///
/// The root is passed to the engine explicitly; `SAMUDRA_HOME` is left alone
/// so tests can run in parallel.
pub struct IntegrationHarness {
    workspace: TempDir,
    config: AppConfig,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        support::fixtures::write_all(workspace.path()).expect("failed to write fixtures");
        let mut config = AppConfig::default();
        config.chat.stream_delay_ms = 0;
        Self { workspace, config }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn engine(&self) -> Arc<ChatEngine> {
        Arc::new(
            ChatEngine::bootstrap(&self.config, self.workspace_path())
                .expect("failed to bootstrap chat engine"),
        )
    }

    pub fn session(&self) -> ChatSession {
        ChatSession::with_rng(self.engine(), StdRng::seed_from_u64(42))
    }
}

mod chat_comparison;
mod chat_fallbacks;
mod chat_maps;
mod chat_ranking;
mod chat_trend;
mod entity_extraction;
mod intents_asset;
pub mod support;
