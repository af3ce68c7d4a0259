//! # civica-core
//!
//! Foundation crate for the Civica advisory pipeline.
//! Defines conversation state, provider traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod action;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use action::PendingAction;
pub use config::CivicaConfig;
pub use errors::{CivicaError, CivicaResult};
pub use models::{
    Candidate, ConversationState, ProgramRecord, Role, TraceEntry, TraceStage, Turn, TurnOutcome,
    UserContext,
};
pub use traits::{IEmbeddingProvider, ITextGenerator, IVectorIndex, SimilarityMetric};
