//! Capability contracts the pipeline depends on.
//!
//! All three remote collaborators are injected as trait objects so tests
//! can substitute fakes.

mod embedding;
mod generation;
mod index;

pub use embedding::IEmbeddingProvider;
pub use generation::ITextGenerator;
pub use index::{IVectorIndex, SimilarityMetric};
