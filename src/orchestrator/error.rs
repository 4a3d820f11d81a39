//! Terminating failures raised by the run loop.
use thiserror::Error;

/// Failure that stopped a run, naming the step and the phase it died in.
///
/// A check-phase failure means the idempotency probe could not complete
/// (probe tooling missing or broken); an execute-phase failure means the
/// action itself was attempted and did not finish. The wording differs so the
/// top-level error line already tells the reader which kind of problem to
/// chase.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("check for step '{step}' failed: {cause:#}")]
    Check { step: String, cause: anyhow::Error },
    #[error("step '{step}' failed: {cause:#}")]
    Execute { step: String, cause: anyhow::Error },
}

impl OrchestrationError {
    /// Description of the step the run stopped at.
    pub fn step(&self) -> &str {
        match self {
            OrchestrationError::Check { step, .. } => step,
            OrchestrationError::Execute { step, .. } => step,
        }
    }
}
