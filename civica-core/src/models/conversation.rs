//! The mutable record threaded through every pipeline stage.
//!
//! Created fresh per incoming user turn, exclusively owned by the engine
//! for the duration of that turn, and discarded after the reply is
//! returned. Multi-turn memory is the caller's responsibility.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::PendingAction;
use crate::models::{Candidate, Role, TraceEntry, TraceStage, Turn, UserContext};

/// Shared state for one turn of the advisory pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Correlates log lines and trace entries for this turn.
    pub turn_id: Uuid,
    /// Ordered history; the newest entry is the user's current utterance
    /// when the pipeline starts. Append-only within a turn.
    pub turns: Vec<Turn>,
    /// Caller-supplied profile, never mutated by the pipeline.
    pub user_context: UserContext,
    /// Set exactly once by the router, read exactly once by the engine.
    pub pending_action: Option<PendingAction>,
    /// Retrieved candidates in index order. Empty is a valid terminal value.
    pub candidates: Vec<Candidate>,
    /// The reply returned to the caller. Non-empty once the turn completes.
    pub final_reply: Option<String>,
    /// First internal failure observed, if any. Never blocks progression.
    pub failure: Option<String>,
    /// Append-only stage log.
    pub trace: Vec<TraceEntry>,
}

impl ConversationState {
    /// Build state from a full resubmitted history.
    pub fn new(turns: Vec<Turn>, user_context: UserContext) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            turns,
            user_context,
            pending_action: None,
            candidates: Vec::new(),
            final_reply: None,
            failure: None,
            trace: Vec::new(),
        }
    }

    /// Build state for a single-message turn (the common inbound case).
    pub fn for_message(user_message: impl Into<String>, user_context: UserContext) -> Self {
        Self::new(vec![Turn::user(user_message)], user_context)
    }

    /// The user's current utterance, if the history ends with a user turn.
    pub fn latest_user_text(&self) -> Option<&str> {
        match self.turns.last() {
            Some(turn) if turn.role == Role::User => Some(turn.text.as_str()),
            _ => None,
        }
    }

    /// Append a trace entry for a stage invocation.
    pub fn push_trace(
        &mut self,
        stage: TraceStage,
        action: impl Into<String>,
        detail: serde_json::Value,
    ) {
        self.trace.push(TraceEntry::new(stage, action, detail));
    }

    /// Record a diagnostic. The first failure wins; later ones are kept
    /// in the trace only, so the root cause survives to the caller.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        if self.failure.is_none() {
            self.failure = Some(message.into());
        }
    }

    /// Append the assistant's reply to the history and set `final_reply`.
    pub fn complete_with_reply(&mut self, reply: impl Into<String>) {
        let reply = reply.into();
        debug_assert!(!reply.trim().is_empty(), "final reply must be non-empty");
        self.turns.push(Turn::assistant(reply.clone()));
        self.final_reply = Some(reply);
    }
}

/// What `process_turn` hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub trace: Vec<TraceEntry>,
    pub failure: Option<String>,
}

impl TurnOutcome {
    /// Collapse a completed state into the caller-facing outcome.
    /// The state is discarded here; nothing persists across turns.
    pub fn from_state(state: ConversationState) -> Self {
        let reply = state.final_reply.unwrap_or_default();
        Self {
            reply,
            trace: state.trace,
            failure: state.failure,
        }
    }
}
