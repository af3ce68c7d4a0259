use crate::errors::CivicaResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> CivicaResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    /// Agreed with the vector index at deployment time.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
