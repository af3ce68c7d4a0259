//! Deterministic fallback replies for when text generation is down.
//! These guarantee the pipeline's core invariant: `final_reply` is
//! always non-empty.

use civica_core::models::Candidate;

/// Canned reply for the `end` shortcut. No provider is invoked.
pub const CLOSING_REPLY: &str =
    "Thanks for stopping by! Come back any time you want to look into support programs.";

/// Template used when generation fails with at least one candidate:
/// name the best match, apologize for not elaborating.
pub fn with_candidates(candidates: &[Candidate]) -> String {
    let first = &candidates[0];
    format!(
        "I found {count} program(s) that may fit, the closest being \"{title}\". \
         I'm sorry I can't describe it in more detail right now — please ask \
         again in a moment.",
        count = candidates.len(),
        title = first.title,
    )
}

/// Template used when generation fails and retrieval found nothing.
pub fn without_candidates() -> String {
    "I'm sorry, I couldn't find programs matching that request. Try rephrasing \
     it, or broaden it — for example \"youth programs\" instead of a specific \
     product."
        .to_string()
}

/// Pick the fallback variant for the current candidate set.
pub fn fallback_reply(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        without_candidates()
    } else {
        with_candidates(candidates)
    }
}
