use thiserror::Error;

/// Error taxonomy for the decision core.
///
/// Storage read failures are not represented here — stores degrade to their
/// default state on unreadable data instead of propagating. Writes surface
/// `Storage` so callers never silently lose data.
#[derive(Debug, Error)]
pub enum StrideError {
    #[error("storage failure: {0}")]
    Storage(String),

    #[error("history entry {0} not found")]
    NotFound(u64),
}
