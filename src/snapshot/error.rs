//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur when rebuilding a memory source from a snapshot
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The snapshot holds no entries
    #[error("Snapshot has no entries")]
    Empty,

    /// Entries and states are not index-aligned
    #[error("Snapshot has {entries} entries but {states} states")]
    Misaligned { entries: usize, states: usize },

    /// The cursor does not point at the last entry
    #[error("Snapshot cursor {index} must point at the last of {len} entries")]
    CursorNotAtTop { index: usize, len: usize },
}
