/// Pipeline-internal errors. These are absorbed at the stage where they
/// occur — they never reach the caller of `process_turn`.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("classification output malformed: {reason}")]
    Classification { reason: String },

    #[error("configuration invalid: {reason}")]
    Config { reason: String },
}
