use crate::errors::CivicaResult;
use crate::models::Turn;

/// Text generation provider: given a system instruction and conversation
/// turns, returns generated text. Fails on quota, timeout, or
/// content-policy rejection.
pub trait ITextGenerator: Send + Sync {
    fn generate(&self, system_instruction: &str, turns: &[Turn]) -> CivicaResult<String>;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently usable (e.g. credentials present).
    fn is_available(&self) -> bool;
}
