//! Error taxonomy for the Civica workspace.
//!
//! One enum per subsystem, aggregated into `CivicaError`. Stage code
//! propagates `CivicaResult` internally; the pipeline boundary absorbs
//! every failure into a fallback reply.

mod pipeline_error;
mod provider_error;

pub use pipeline_error::PipelineError;
pub use provider_error::ProviderError;

/// Top-level error aggregating all subsystems.
#[derive(Debug, thiserror::Error)]
pub enum CivicaError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Workspace-wide result alias.
pub type CivicaResult<T> = Result<T, CivicaError>;
