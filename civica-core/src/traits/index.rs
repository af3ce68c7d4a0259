use serde::{Deserialize, Serialize};

use crate::errors::CivicaResult;
use crate::models::SearchHit;

/// Native similarity metric of a vector index. Determines how raw scores
/// are normalized into higher-is-better candidate scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Index reports cosine distance; normalized as `1 − d`.
    Cosine,
    /// Index reports cosine similarity, already higher-is-better;
    /// used as-is. Milvus COSINE search behaves this way.
    CosineSimilarity,
    /// Index reports an inner-product score; used as-is.
    DotProduct,
    /// Index reports L2 distance; normalized as `1 / (1 + d)`.
    Euclidean,
}

/// Nearest-neighbor index over program records. Ingestion is a separate
/// collaborator; the pipeline only queries.
pub trait IVectorIndex: Send + Sync {
    /// Return the top-k nearest hits, in the index's native order.
    fn search(&self, query_vector: &[f32], top_k: usize) -> CivicaResult<Vec<SearchHit>>;

    /// The metric raw hit scores are expressed in.
    fn metric(&self) -> SimilarityMetric;

    /// Human-readable index name.
    fn name(&self) -> &str;
}
