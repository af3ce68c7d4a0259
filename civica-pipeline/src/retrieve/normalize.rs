//! Hit normalization: native index scores become higher-is-better
//! candidate scores, descriptions are truncated for prompt budgeting,
//! and eligibility hints are attached. Order is never changed here.

use civica_core::models::{Candidate, SearchHit, UserContext};
use civica_core::traits::SimilarityMetric;

use crate::eligibility;

/// Convert a raw index score to higher-is-better. Cosine distance maps to
/// `1 − d`; cosine similarity and dot product are already similarities;
/// L2 distance maps to `1 / (1 + d)`.
pub fn normalize_score(metric: SimilarityMetric, raw: f64) -> f64 {
    match metric {
        SimilarityMetric::Cosine => 1.0 - raw,
        SimilarityMetric::CosineSimilarity | SimilarityMetric::DotProduct => raw,
        SimilarityMetric::Euclidean => 1.0 / (1.0 + raw.max(0.0)),
    }
}

/// Truncate on a character boundary, marking elision.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Normalize one hit into the candidate shape. Unknown optional payload
/// fields already defaulted to empty strings at deserialization.
pub fn to_candidate(
    hit: &SearchHit,
    metric: SimilarityMetric,
    max_chars: usize,
    user: &UserContext,
) -> Candidate {
    let note = eligibility::assess(&hit.payload, user).map(|a| a.explanation);
    Candidate {
        record_id: hit.record_id.clone(),
        title: hit.payload.title.clone(),
        description: truncate_description(&hit.payload.description, max_chars),
        category: hit.payload.category.clone(),
        region: hit.payload.region.clone(),
        score: normalize_score(metric, hit.raw_score),
        eligibility_note: note,
    }
}
