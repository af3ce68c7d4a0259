//! Fixed instruction and request construction for reply synthesis.

use civica_core::models::{Candidate, ConversationState};

/// System instruction for the synthesis call.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = "\
You are a government support program advisor writing the final reply.

Principles:
- Personalize: reflect the user's age, region, and situation in the reply.
- Be concise: 3 to 5 sentences, one key fact per sentence.
- When candidate programs are listed, structure the reply as: recommended
  program, key benefit, eligibility conditions, and how to apply. Mention
  programs by their exact titles. Use only the information in the listing;
  never invent program details.
- When no candidates are listed, apologize briefly and suggest rephrasing
  or broadening the request.
- Keep a warm, encouraging tone.";

/// Render the top candidates, the user profile, and the latest message
/// into one generation request.
pub fn build_generation_request(
    state: &ConversationState,
    latest_message: &str,
    top_n: usize,
) -> String {
    let mut request = format!(
        "User message: \"{latest_message}\"\n\nUser profile: {}\n\n",
        state.user_context.summary()
    );

    if state.candidates.is_empty() {
        request.push_str("Retrieved programs: none\n");
    } else {
        request.push_str("Retrieved programs:\n");
        for (i, candidate) in state.candidates.iter().take(top_n).enumerate() {
            request.push_str(&render_candidate(i + 1, candidate));
        }
    }

    request.push_str("\nWrite the reply to the user.");
    request
}

fn render_candidate(position: usize, candidate: &Candidate) -> String {
    let mut block = format!(
        "{position}. {title}\n   description: {description}\n   category: {category}\n   \
         region: {region}\n   similarity: {score:.2}\n",
        title = candidate.title,
        description = candidate.description,
        category = if candidate.category.is_empty() {
            "uncategorized"
        } else {
            &candidate.category
        },
        region = if candidate.region.is_empty() {
            "nationwide"
        } else {
            &candidate.region
        },
        score = candidate.score,
    );
    if let Some(note) = &candidate.eligibility_note {
        block.push_str(&format!("   eligibility: {note}\n"));
    }
    block
}
