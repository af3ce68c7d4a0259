//! Data model for the advisory pipeline.

mod candidate;
mod conversation;
mod record;
mod trace;
mod turn;
mod user_context;

pub use candidate::Candidate;
pub use conversation::{ConversationState, TurnOutcome};
pub use record::{ProgramRecord, SearchHit};
pub use trace::{TraceEntry, TraceStage};
pub use turn::{Role, Turn};
pub use user_context::UserContext;
