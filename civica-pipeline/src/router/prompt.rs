//! Fixed instruction and request construction for intent classification.

use civica_core::models::ConversationState;

/// System instruction for the classification call. Enumerates the closed
/// action set and demands strict JSON so the reply parses mechanically.
pub const ROUTER_SYSTEM_PROMPT: &str = "\
You are the routing supervisor of a government support program advisor.

Analyze the user's latest message and decide what the pipeline must do next.

Possible actions (next_action):
1. \"retrieve\": the user is asking for programs, benefits, or \
recommendations that require searching the program database.
   Examples: \"recommend a savings program\", \"what scholarships exist?\"
2. \"respond\": the conversation already holds enough information and only \
an answer needs to be written.
   Examples: \"explain that again\", \"tell me more about the first one\"
3. \"end\": the user is closing the conversation.
   Examples: \"thanks, bye\", \"that's all\"

Reply with JSON only, no surrounding prose:
{\"next_action\": \"<action>\", \"reasoning\": \"<one sentence>\"}";

/// Render the classification request: a compact situation summary plus the
/// user's latest message.
pub fn build_classification_request(state: &ConversationState, latest_message: &str) -> String {
    format!(
        "Current situation:\n\
         - user profile: {}\n\
         - previously retrieved candidates: {}\n\
         - conversation turn: {}\n\n\
         Latest user message: \"{latest_message}\"\n\n\
         Decide the next action.",
        state.user_context.summary(),
        state.candidates.len(),
        state.turns.len(),
    )
}
