use serde::{Deserialize, Serialize};

use super::defaults;

/// Pipeline tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Nearest neighbors requested from the vector index.
    pub top_k: usize,
    /// Candidates rendered into the synthesis prompt.
    pub synthesis_top_n: usize,
    /// Candidate descriptions are truncated to this many characters
    /// for prompt budgeting.
    pub description_max_chars: usize,
    /// Whether the retriever rewrites the query before embedding.
    /// When disabled (or when rewriting fails), the raw utterance is used.
    pub query_rewrite: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            synthesis_top_n: defaults::DEFAULT_SYNTHESIS_TOP_N,
            description_max_chars: defaults::DEFAULT_DESCRIPTION_MAX_CHARS,
            query_rewrite: true,
        }
    }
}
