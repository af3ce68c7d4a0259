//! Intent router ("supervisor"): classifies the latest user turn into one
//! of the closed set of pipeline actions.
//!
//! One generation call per turn. Any failure — provider error, malformed
//! JSON, unknown action name — degrades to `Respond`, never to `Retrieve`
//! (that would risk an unnecessary remote call) and never to a silent
//! termination.

pub mod prompt;

use serde::Deserialize;
use tracing::{debug, warn};

use civica_core::action::PendingAction;
use civica_core::errors::PipelineError;
use civica_core::models::{ConversationState, TraceStage, Turn};
use civica_core::traits::ITextGenerator;

use crate::engine::Routed;

/// Wire shape of the classification reply.
#[derive(Debug, Deserialize)]
struct RouteDecision {
    next_action: String,
    #[serde(default)]
    reasoning: String,
}

/// Parse the raw classification output. Malformed JSON or a missing
/// `next_action` is an error the caller maps to the `Respond` default;
/// a syntactically valid but unknown action name also maps to `Respond`.
fn parse_decision(raw: &str) -> Result<(PendingAction, String), PipelineError> {
    let decision: RouteDecision =
        serde_json::from_str(raw.trim()).map_err(|e| PipelineError::Classification {
            reason: format!("invalid JSON: {e}"),
        })?;
    if decision.next_action.is_empty() {
        return Err(PipelineError::Classification {
            reason: "next_action missing or empty".to_string(),
        });
    }
    let action = match PendingAction::from_wire(&decision.next_action) {
        Some(action) => action,
        None => {
            warn!(
                next_action = %decision.next_action,
                "unrecognized action from classifier, defaulting to respond"
            );
            PendingAction::Respond
        }
    };
    Ok((action, decision.reasoning))
}

/// Classifies the latest user turn. Holds only the generation provider;
/// the engine injects it per construction.
pub struct IntentRouter<'a> {
    generator: &'a dyn ITextGenerator,
}

impl<'a> IntentRouter<'a> {
    pub fn new(generator: &'a dyn ITextGenerator) -> Self {
        Self { generator }
    }

    /// Run classification, consuming the fresh state and producing the
    /// routed stage. Sets `pending_action` exactly once and appends
    /// exactly one trace entry.
    pub fn classify(&self, mut state: ConversationState) -> Routed {
        // Malformed caller input: nothing to classify, close the turn
        // without touching any provider.
        let Some(latest) = state.latest_user_text().map(str::to_owned) else {
            debug!(turn_id = %state.turn_id, "no user utterance, ending turn");
            state.pending_action = Some(PendingAction::End);
            state.push_trace(
                TraceStage::Router,
                "empty_conversation",
                serde_json::json!({ "next_action": "end" }),
            );
            return Routed::new(state, PendingAction::End);
        };

        let request = prompt::build_classification_request(&state, &latest);
        let (action, reasoning) = match self
            .generator
            .generate(prompt::ROUTER_SYSTEM_PROMPT, &[Turn::user(request)])
        {
            Ok(raw) => match parse_decision(&raw) {
                Ok(decision) => decision,
                Err(e) => {
                    warn!(turn_id = %state.turn_id, error = %e, "classification unparseable");
                    state.record_failure(format!("intent classification: {e}"));
                    (PendingAction::Respond, String::new())
                }
            },
            Err(e) => {
                warn!(turn_id = %state.turn_id, error = %e, "classification call failed");
                state.record_failure(format!("intent classification: {e}"));
                (PendingAction::Respond, String::new())
            }
        };

        debug!(turn_id = %state.turn_id, action = %action, "intent classified");
        state.pending_action = Some(action);
        state.push_trace(
            TraceStage::Router,
            "intent_classified",
            serde_json::json!({
                "next_action": action.as_str(),
                "reasoning": reasoning,
            }),
        );
        Routed::new(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_decision() {
        let (action, reasoning) =
            parse_decision(r#"{"next_action": "retrieve", "reasoning": "wants programs"}"#)
                .expect("valid decision");
        assert_eq!(action, PendingAction::Retrieve);
        assert_eq!(reasoning, "wants programs");
    }

    #[test]
    fn missing_next_action_is_an_error() {
        assert!(parse_decision(r#"{"reasoning": "unsure"}"#).is_err());
        assert!(parse_decision("not json at all").is_err());
    }

    #[test]
    fn unknown_action_defaults_to_respond() {
        let (action, _) = parse_decision(r#"{"next_action": "check_eligibility"}"#)
            .expect("parses despite unknown action");
        assert_eq!(action, PendingAction::Respond);
    }

    #[test]
    fn reasoning_is_optional() {
        let (action, reasoning) =
            parse_decision(r#"{"next_action": "end"}"#).expect("valid decision");
        assert_eq!(action, PendingAction::End);
        assert!(reasoning.is_empty());
    }
}
