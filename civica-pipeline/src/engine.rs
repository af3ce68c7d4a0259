//! The orchestrator: drives one turn through router → retriever →
//! synthesizer and owns the stage-ordering rules.
//!
//! Stage transitions are encoded as consuming wrapper types. A stage
//! function takes the previous wrapper by value and returns the next, so
//! skipping the router or synthesizing before routing does not compile.

use tracing::info;

use civica_core::action::PendingAction;
use civica_core::config::PipelineConfig;
use civica_core::models::{ConversationState, TraceStage, Turn, TurnOutcome, UserContext};
use civica_core::traits::{IEmbeddingProvider, ITextGenerator, IVectorIndex};

use crate::retrieve::Retriever;
use crate::router::IntentRouter;
use crate::synthesize::{self, Synthesizer};

/// State that has been through intent classification.
pub struct Routed {
    state: ConversationState,
    /// The classified action; mirrors `state.pending_action`.
    pub action: PendingAction,
}

impl Routed {
    pub fn new(state: ConversationState, action: PendingAction) -> Self {
        Self { state, action }
    }

    pub fn into_state(self) -> ConversationState {
        self.state
    }
}

/// State that has passed the retrieval decision point. `candidates` may
/// be empty; that is a valid retrieval result.
pub struct Retrieved {
    state: ConversationState,
}

impl Retrieved {
    pub fn new(state: ConversationState) -> Self {
        Self { state }
    }

    pub fn into_state(self) -> ConversationState {
        self.state
    }
}

/// Terminal stage: `final_reply` is set and non-empty.
pub struct Responded {
    state: ConversationState,
}

impl Responded {
    pub fn new(state: ConversationState) -> Self {
        Self { state }
    }

    pub fn into_state(self) -> ConversationState {
        self.state
    }
}

/// Where the engine sends the turn after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStage {
    Retriever,
    Synthesizer,
    Terminal,
}

/// The action-to-stage mapping. Pure, total over the closed action set.
pub fn route(action: PendingAction) -> NextStage {
    match action {
        PendingAction::Retrieve => NextStage::Retriever,
        PendingAction::Respond => NextStage::Synthesizer,
        PendingAction::End => NextStage::Terminal,
    }
}

/// The advisory pipeline over injected providers. One instance serves
/// many turns; each turn gets fresh state.
pub struct AdvisoryEngine<'a> {
    generator: &'a dyn ITextGenerator,
    embedder: &'a dyn IEmbeddingProvider,
    index: &'a dyn IVectorIndex,
    config: PipelineConfig,
}

impl<'a> AdvisoryEngine<'a> {
    pub fn new(
        generator: &'a dyn ITextGenerator,
        embedder: &'a dyn IEmbeddingProvider,
        index: &'a dyn IVectorIndex,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            embedder,
            index,
            config,
        }
    }

    /// Process a single inbound user message. Never fails: every internal
    /// error becomes a fallback reply plus a `failure` diagnostic.
    pub fn process_turn(&self, user_message: &str, user_context: UserContext) -> TurnOutcome {
        self.process_history(vec![Turn::user(user_message)], user_context)
    }

    /// Process a caller-resubmitted history whose last turn is the user's
    /// current utterance.
    pub fn process_history(&self, turns: Vec<Turn>, user_context: UserContext) -> TurnOutcome {
        let mut state = ConversationState::new(turns, user_context);
        info!(turn_id = %state.turn_id, turns = state.turns.len(), "turn started");
        state.push_trace(
            TraceStage::Engine,
            "turn_started",
            serde_json::json!({ "turns": state.turns.len() }),
        );

        let routed = IntentRouter::new(self.generator).classify(state);
        let synthesizer = Synthesizer::new(self.generator, &self.config);

        let responded = match route(routed.action) {
            NextStage::Terminal => self.close_turn(routed),
            NextStage::Retriever => {
                let retriever =
                    Retriever::new(self.generator, self.embedder, self.index, &self.config);
                // Retrieval always flows into synthesis, even empty-handed.
                synthesizer.respond(retriever.run(routed))
            }
            NextStage::Synthesizer => synthesizer.respond_routed(routed),
        };

        let state = responded.into_state();
        info!(
            turn_id = %state.turn_id,
            failed = state.failure.is_some(),
            "turn completed"
        );
        TurnOutcome::from_state(state)
    }

    /// The `end` shortcut: canned farewell, no further provider calls.
    fn close_turn(&self, routed: Routed) -> Responded {
        let mut state = routed.into_state();
        state.push_trace(
            TraceStage::Engine,
            "turn_closed",
            serde_json::json!({ "reply": "canned_closing" }),
        );
        state.complete_with_reply(synthesize::fallback::CLOSING_REPLY);
        Responded::new(state)
    }
}
