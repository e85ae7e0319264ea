//! Snapshots of in-memory history stacks.
//!
//! A snapshot is a plain serializable copy of a `MemorySource` stack. It lets
//! a caller inspect a simulated session or seed a new one with prebuilt
//! entries. The crate never writes snapshots anywhere itself.

use crate::core::Location;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;

pub use error::SnapshotError;

/// Serializable copy of a memory source's stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Entries, oldest first
    pub entries: Vec<Location>,

    /// Per-entry state, aligned with `entries`
    pub states: Vec<Value>,

    /// Cursor into `entries`
    pub index: usize,
}

impl MemorySnapshot {
    /// Check that the snapshot could have been produced by a memory source.
    ///
    /// Memory sources only ever append, so the cursor always sits on the
    /// last entry.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.entries.is_empty() {
            return Err(SnapshotError::Empty);
        }

        if self.states.len() != self.entries.len() {
            return Err(SnapshotError::Misaligned {
                entries: self.entries.len(),
                states: self.states.len(),
            });
        }

        if self.index + 1 != self.entries.len() {
            return Err(SnapshotError::CursorNotAtTop {
                index: self.index,
                len: self.entries.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(paths: &[&str]) -> MemorySnapshot {
        MemorySnapshot {
            entries: paths.iter().map(|p| Location::new(*p)).collect(),
            states: paths.iter().map(|_| Value::Null).collect(),
            index: paths.len().saturating_sub(1),
        }
    }

    #[test]
    fn well_formed_snapshot_validates() {
        assert!(snapshot(&["/", "/a", "/b"]).validate().is_ok());
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        assert_eq!(snapshot(&[]).validate(), Err(SnapshotError::Empty));
    }

    #[test]
    fn misaligned_states_are_rejected() {
        let mut snap = snapshot(&["/", "/a"]);
        snap.states.pop();
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::Misaligned {
                entries: 2,
                states: 1
            })
        );
    }

    #[test]
    fn cursor_past_end_is_rejected() {
        let mut snap = snapshot(&["/"]);
        snap.index = 3;
        assert_eq!(
            snap.validate(),
            Err(SnapshotError::CursorNotAtTop { index: 3, len: 1 })
        );
    }

    #[test]
    fn snapshot_deserializes_from_json() {
        let snap: MemorySnapshot = serde_json::from_value(json!({
            "entries": [{ "pathname": "/" }, { "pathname": "/a" }],
            "states": [null, { "scroll": 10 }],
            "index": 1
        }))
        .unwrap();

        assert!(snap.validate().is_ok());
        assert_eq!(snap.entries[1], Location::new("/a"));
        assert_eq!(snap.states[1], json!({ "scroll": 10 }));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = SnapshotError::Misaligned {
            entries: 3,
            states: 2,
        };
        assert_eq!(err.to_string(), "Snapshot has 3 entries but 2 states");
    }
}
