//! Source write errors.

use thiserror::Error;

/// Errors a source may report from its push/replace primitives.
///
/// These never reach callers of `History::navigate`; the wrapper recovers
/// by asking the source for a full document navigation instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WriteError {
    /// The platform refused to record more entries (e.g. a push-rate limit)
    #[error("History quota exceeded")]
    QuotaExceeded,

    /// The backend rejected the write for another reason
    #[error("History write rejected: {0}")]
    Rejected(String),
}
