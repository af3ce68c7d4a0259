//! Retriever ("program search"): rewrite → embed → nearest-neighbor
//! search → normalize. Never throws outward: any failure leaves
//! `candidates` empty, records the diagnostic, and the turn proceeds to
//! synthesis so the user still gets an answer.

pub mod normalize;
pub mod rewrite;

use tracing::{info, warn};

use civica_core::config::PipelineConfig;
use civica_core::errors::CivicaResult;
use civica_core::models::{Candidate, ConversationState, TraceStage};
use civica_core::traits::{IEmbeddingProvider, ITextGenerator, IVectorIndex};

use crate::engine::{Retrieved, Routed};

/// Runs the retrieval stage. All three collaborators are injected.
pub struct Retriever<'a> {
    generator: &'a dyn ITextGenerator,
    embedder: &'a dyn IEmbeddingProvider,
    index: &'a dyn IVectorIndex,
    config: &'a PipelineConfig,
}

impl<'a> Retriever<'a> {
    pub fn new(
        generator: &'a dyn ITextGenerator,
        embedder: &'a dyn IEmbeddingProvider,
        index: &'a dyn IVectorIndex,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            generator,
            embedder,
            index,
            config,
        }
    }

    /// Run one retrieval pass, consuming the routed stage. Appends exactly
    /// one trace entry whether the search succeeded or failed.
    pub fn run(&self, routed: Routed) -> Retrieved {
        let mut state = routed.into_state();

        let raw_query = state
            .latest_user_text()
            .unwrap_or_default()
            .to_string();

        // Step 1: query rewriting, with the raw utterance as the required
        // fallback. A failed rewrite is not a turn failure.
        let query = if self.config.query_rewrite {
            rewrite::rewrite_query(self.generator, &raw_query, &state.user_context)
        } else {
            rewrite::RewrittenQuery {
                text: raw_query.clone(),
                rewritten: false,
            }
        };

        // Steps 2-3: embed and search. These failures do end retrieval.
        match self.search(&query.text, &state) {
            Ok(candidates) => {
                info!(
                    turn_id = %state.turn_id,
                    query = %query.text,
                    hits = candidates.len(),
                    "program search completed"
                );
                state.push_trace(
                    TraceStage::Retriever,
                    "search_completed",
                    serde_json::json!({
                        "query": query.text,
                        "rewritten": query.rewritten,
                        "hits": candidates.len(),
                        "top_score": candidates.first().map(|c| c.score),
                    }),
                );
                state.candidates = candidates;
            }
            Err(e) => {
                warn!(turn_id = %state.turn_id, error = %e, "program search failed");
                state.record_failure(format!("retrieval: {e}"));
                state.push_trace(
                    TraceStage::Retriever,
                    "search_failed",
                    serde_json::json!({
                        "query": query.text,
                        "rewritten": query.rewritten,
                        "error": e.to_string(),
                    }),
                );
                state.candidates = Vec::new();
            }
        }

        Retrieved::new(state)
    }

    /// Embed the query and collect normalized candidates in index order.
    fn search(&self, query: &str, state: &ConversationState) -> CivicaResult<Vec<Candidate>> {
        let embedding = self.embedder.embed(query)?;
        let hits = self.index.search(&embedding, self.config.top_k)?;
        let metric = self.index.metric();
        Ok(hits
            .iter()
            .map(|hit| {
                normalize::to_candidate(
                    hit,
                    metric,
                    self.config.description_max_chars,
                    &state.user_context,
                )
            })
            .collect())
    }
}
