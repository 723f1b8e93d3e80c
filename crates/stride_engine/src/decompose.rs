//! The decomposition capability boundary.
//!
//! A `Decomposer` turns one task description plus a mood instruction into an
//! ordered step list. The real backend is an LLM call, which lives outside
//! this core; what's owned here is the seam, a bounded retry, and the static
//! fallback plan used when the capability stays unavailable.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecomposeError {
    /// Retryable: rate limits, timeouts, malformed transient output.
    #[error("transient decomposition failure: {0}")]
    Transient(String),

    /// Not worth retrying: missing credentials, rejected input.
    #[error("decomposition failed: {0}")]
    Fatal(String),
}

/// Steps used when every decomposition attempt fails.
pub const FALLBACK_STEPS: [&str; 2] = [
    "Break task into smaller parts.",
    "Start with the first part.",
];

#[async_trait]
pub trait Decomposer: Send + Sync {
    /// Decompose `task` into ordered steps, steered by the mood
    /// `instruction`.
    async fn decompose(&self, task: &str, instruction: &str) -> Result<Vec<String>, DecomposeError>;
}

/// Deterministic decomposer for tests and keyless operation.
#[derive(Debug, Clone, Default)]
pub struct MockDecomposer;

#[async_trait]
impl Decomposer for MockDecomposer {
    async fn decompose(
        &self,
        task: &str,
        _instruction: &str,
    ) -> Result<Vec<String>, DecomposeError> {
        Ok(vec![
            "Clear your workspace.".to_string(),
            format!("Spend 10 focused minutes on: {}.", task),
            "Review what you finished and note the next action.".to_string(),
        ])
    }
}

/// Call the decomposer up to `max_attempts` times, returning the fallback
/// steps once attempts are exhausted or a fatal error is hit. An empty step
/// list counts as a transient failure.
pub async fn decompose_with_retry(
    decomposer: &dyn Decomposer,
    task: &str,
    instruction: &str,
    max_attempts: u32,
) -> Vec<String> {
    for attempt in 1..=max_attempts {
        match decomposer.decompose(task, instruction).await {
            Ok(steps) if !steps.is_empty() => {
                if attempt > 1 {
                    tracing::info!("Decomposition succeeded on attempt {}", attempt);
                }
                return steps;
            }
            Ok(_) => {
                tracing::warn!(
                    "Decomposer returned no steps on attempt {}/{}",
                    attempt,
                    max_attempts
                );
            }
            Err(DecomposeError::Transient(e)) => {
                tracing::warn!(
                    "Transient decomposition error on attempt {}/{}: {}",
                    attempt,
                    max_attempts,
                    e
                );
            }
            Err(DecomposeError::Fatal(e)) => {
                tracing::warn!("Fatal decomposition error, using fallback steps: {}", e);
                break;
            }
        }
    }

    FALLBACK_STEPS.iter().map(|s| s.to_string()).collect()
}
