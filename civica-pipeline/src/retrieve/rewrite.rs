//! Query rewriting: compress the raw utterance plus profile attributes
//! into a compact search phrase. The raw-utterance fallback is required —
//! retrieval must proceed even when rewriting fails.

use tracing::{debug, warn};

use civica_core::models::{Turn, UserContext};
use civica_core::traits::ITextGenerator;

pub const REWRITE_SYSTEM_PROMPT: &str = "\
You optimize queries for vector search over government support programs.

Rewrite the user's message into a compact search phrase:
- keep only the core concepts of the request
- inject the profile attributes (age, region, employment, education) as keywords
- drop conversational filler such as \"please recommend\" or \"tell me\"

Output only the rewritten query, nothing else.";

/// Outcome of the rewrite step.
pub struct RewrittenQuery {
    pub text: String,
    /// False when the raw utterance was used as-is.
    pub rewritten: bool,
}

fn build_rewrite_request(raw_query: &str, user: &UserContext) -> String {
    format!(
        "User message: \"{raw_query}\"\n\
         User profile: {}\n\n\
         Produce the optimized search query.",
        user.summary()
    )
}

/// Rewrite `raw_query` via one generation call. Falls back to the raw
/// utterance on provider failure or an empty rewrite.
pub fn rewrite_query(
    generator: &dyn ITextGenerator,
    raw_query: &str,
    user: &UserContext,
) -> RewrittenQuery {
    let request = build_rewrite_request(raw_query, user);
    match generator.generate(REWRITE_SYSTEM_PROMPT, &[Turn::user(request)]) {
        Ok(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                warn!("query rewrite returned empty text, using raw utterance");
                RewrittenQuery {
                    text: raw_query.to_string(),
                    rewritten: false,
                }
            } else {
                debug!(raw = raw_query, rewritten = %text, "query rewritten");
                RewrittenQuery {
                    text,
                    rewritten: true,
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "query rewrite failed, using raw utterance");
            RewrittenQuery {
                text: raw_query.to_string(),
                rewritten: false,
            }
        }
    }
}
