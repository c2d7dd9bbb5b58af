//! Turns a classified utterance into a plot call and its narration.

pub mod context;
pub mod dispatcher;
pub mod entities;
pub mod registry;

pub use context::{CallArgs, NarrativeContext};
pub use dispatcher::{DispatchResult, Dispatcher, PlotBackend};
pub use entities::{extract_entities, Entities, EntityField};
pub use registry::{
    classify_tag, is_projection, FunctionCategory, FunctionRegistry, FunctionSpec, PlotKind,
    TagProfile,
};
