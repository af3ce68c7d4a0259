//! Synthesizer: renders the final reply from the candidate set and
//! profile context. The last line of defense for the always-answer
//! invariant — when generation fails, a deterministic template replies
//! instead.

pub mod fallback;
pub mod prompt;

use tracing::{debug, warn};

use civica_core::config::PipelineConfig;
use civica_core::constants::MAX_PROMPT_TURNS;
use civica_core::models::{ConversationState, TraceStage, Turn};
use civica_core::traits::ITextGenerator;

use crate::engine::{Responded, Retrieved, Routed};

pub struct Synthesizer<'a> {
    generator: &'a dyn ITextGenerator,
    config: &'a PipelineConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(generator: &'a dyn ITextGenerator, config: &'a PipelineConfig) -> Self {
        Self { generator, config }
    }

    /// Synthesize after retrieval. Candidates (possibly none) are rendered
    /// into the request.
    pub fn respond(&self, retrieved: Retrieved) -> Responded {
        Responded::new(self.synthesize(retrieved.into_state()))
    }

    /// Synthesize directly from routing, skipping retrieval. Used for the
    /// conversational `respond` path where no programs are needed.
    pub fn respond_routed(&self, routed: Routed) -> Responded {
        Responded::new(self.synthesize(routed.into_state()))
    }

    /// One generation call, one trace entry, reply guaranteed non-empty.
    fn synthesize(&self, mut state: ConversationState) -> ConversationState {
        let latest = state
            .latest_user_text()
            .unwrap_or_default()
            .to_string();
        let request =
            prompt::build_generation_request(&state, &latest, self.config.synthesis_top_n);
        let rendered = state.candidates.len().min(self.config.synthesis_top_n);

        let turns = prompt_turns(&state, request);
        let reply = match self
            .generator
            .generate(prompt::SYNTHESIS_SYSTEM_PROMPT, &turns)
        {
            Ok(text) if !text.trim().is_empty() => {
                debug!(turn_id = %state.turn_id, chars = text.len(), "reply generated");
                state.push_trace(
                    TraceStage::Synthesizer,
                    "reply_generated",
                    serde_json::json!({
                        "fallback": false,
                        "candidates_rendered": rendered,
                    }),
                );
                text.trim().to_string()
            }
            Ok(_) => {
                warn!(turn_id = %state.turn_id, "generation returned empty text");
                state.record_failure("synthesis: provider returned empty text".to_string());
                state.push_trace(
                    TraceStage::Synthesizer,
                    "fallback_reply",
                    serde_json::json!({
                        "fallback": true,
                        "error": "empty generation",
                        "candidates_rendered": rendered,
                    }),
                );
                fallback::fallback_reply(&state.candidates)
            }
            Err(e) => {
                warn!(turn_id = %state.turn_id, error = %e, "generation failed");
                state.record_failure(format!("synthesis: {e}"));
                state.push_trace(
                    TraceStage::Synthesizer,
                    "fallback_reply",
                    serde_json::json!({
                        "fallback": true,
                        "error": e.to_string(),
                        "candidates_rendered": rendered,
                    }),
                );
                fallback::fallback_reply(&state.candidates)
            }
        };

        state.complete_with_reply(reply);
        state
    }
}

/// Recent history for conversational context, capped so resubmitted
/// histories keep prompts bounded. The composed request replaces the
/// user's latest utterance.
fn prompt_turns(state: &ConversationState, request: String) -> Vec<Turn> {
    let prior = state.turns.len().saturating_sub(1);
    let start = prior.saturating_sub(MAX_PROMPT_TURNS - 1);
    let mut turns: Vec<Turn> = state.turns[start..prior].to_vec();
    turns.push(Turn::user(request));
    turns
}
