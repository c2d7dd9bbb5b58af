pub mod chat;
pub mod config;
pub mod data;
pub mod intents;
pub mod narrative;
pub mod plots;
pub mod text;

// Re-export commonly used types for convenience.
pub use chat::router::{extract_entities, DispatchResult, Dispatcher, Entities, PlotBackend};
pub use chat::{ChatEngine, ChatSession, Reply, TurnOutcome};
pub use config::AppConfig;
pub use data::DataContext;
pub use narrative::generate_narrative;
