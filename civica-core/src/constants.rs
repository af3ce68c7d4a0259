/// Civica system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of prior turns included in generation prompts.
/// Callers may resubmit arbitrarily long histories; prompts stay bounded.
pub const MAX_PROMPT_TURNS: usize = 12;

/// Exactly one retrieval pass runs per turn; there is no retry-and-reroute.
pub const RETRIEVAL_PASSES_PER_TURN: usize = 1;
