//! In-memory history source.
//!
//! Stores history entries in memory for tests and for platforms without a
//! browser history (native, server-side rendering).

use super::error::WriteError;
use super::location::Location;
use super::source::{RawListener, Source, WriteMode};
use crate::snapshot::{MemorySnapshot, SnapshotError};
use serde_json::Value;
use std::cell::RefCell;

#[derive(Clone, Debug)]
struct Stack {
    entries: Vec<Location>,
    states: Vec<Value>,
    index: usize,
}

/// History source backed by an ordered stack of locations.
///
/// `push` always appends and advances the cursor by one; `replace`
/// overwrites the entry under the cursor. Entries are never truncated and
/// the cursor never moves backwards, since nothing outside this crate can
/// drive a memory source back or forward. For the same reason
/// `subscribe`/`unsubscribe` are no-ops.
///
/// # Example
///
/// ```rust
/// use navstack::core::{Location, MemorySource, Source};
/// use serde_json::Value;
///
/// let source = MemorySource::new("/");
/// source.push(Value::Null, "/about").unwrap();
/// source.replace(Value::Null, "/contact").unwrap();
///
/// assert_eq!(source.index(), 1);
/// assert_eq!(
///     source.entries(),
///     vec![Location::new("/"), Location::new("/contact")]
/// );
/// ```
#[derive(Debug)]
pub struct MemorySource {
    stack: RefCell<Stack>,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemorySource {
    /// Create a source with a single entry at `initial_pathname`.
    ///
    /// The initial entry carries `Value::Null` as its state.
    pub fn new(initial_pathname: impl Into<String>) -> Self {
        Self {
            stack: RefCell::new(Stack {
                entries: vec![Location::new(initial_pathname)],
                states: vec![Value::Null],
                index: 0,
            }),
        }
    }

    /// Rebuild a source from a snapshot, validating its shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use navstack::core::MemorySource;
    ///
    /// let original = MemorySource::new("/");
    /// let copy = MemorySource::from_snapshot(original.snapshot()).unwrap();
    /// assert_eq!(copy.entries(), original.entries());
    /// ```
    pub fn from_snapshot(snapshot: MemorySnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let MemorySnapshot {
            entries,
            states,
            index,
        } = snapshot;
        Ok(Self {
            stack: RefCell::new(Stack {
                entries,
                states,
                index,
            }),
        })
    }

    /// Copy of the full stack, cursor included.
    pub fn snapshot(&self) -> MemorySnapshot {
        let stack = self.stack.borrow();
        MemorySnapshot {
            entries: stack.entries.clone(),
            states: stack.states.clone(),
            index: stack.index,
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<Location> {
        self.stack.borrow().entries.clone()
    }

    /// Cursor into `entries()`.
    pub fn index(&self) -> usize {
        self.stack.borrow().index
    }

    /// Number of entries on the stack.
    pub fn len(&self) -> usize {
        self.stack.borrow().entries.len()
    }

    /// Always `false`: a memory source holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.stack.borrow().entries.is_empty()
    }

    /// All states, aligned with `entries()`.
    pub fn states(&self) -> Vec<Value> {
        self.stack.borrow().states.clone()
    }
}

impl Source for MemorySource {
    fn location(&self) -> Location {
        let stack = self.stack.borrow();
        stack.entries[stack.index].clone()
    }

    fn subscribe(&self, _listener: RawListener) {}

    fn unsubscribe(&self, _listener: &RawListener) {}

    fn push(&self, state: Value, to: &str) -> Result<(), WriteError> {
        let mut stack = self.stack.borrow_mut();
        stack.index += 1;
        stack.entries.push(Location::new(to));
        stack.states.push(state);
        Ok(())
    }

    fn replace(&self, state: Value, to: &str) -> Result<(), WriteError> {
        let mut stack = self.stack.borrow_mut();
        let index = stack.index;
        stack.entries[index] = Location::new(to);
        stack.states[index] = state;
        Ok(())
    }

    fn hard_navigate(&self, to: &str, mode: WriteMode) {
        // There is no document to reload; record the entry instead.
        tracing::debug!(to, ?mode, "Memory source performing document navigation");
        if let Err(error) = self.write(mode, Value::Null, to) {
            tracing::warn!(%error, "Memory source write failed");
        }
    }

    fn state(&self) -> Value {
        let stack = self.stack.borrow();
        stack.states[stack.index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_source_starts_at_initial_pathname() {
        let source = MemorySource::new("/start");
        assert_eq!(source.location(), Location::new("/start"));
        assert_eq!(source.index(), 0);
        assert_eq!(source.len(), 1);
        assert_eq!(source.state(), Value::Null);
    }

    #[test]
    fn default_source_starts_at_root() {
        assert_eq!(MemorySource::default().location().pathname, "/");
    }

    #[test]
    fn push_appends_and_advances() {
        let source = MemorySource::new("/");
        source.push(json!(1), "/a").unwrap();
        source.push(json!(2), "/b").unwrap();

        assert_eq!(source.index(), 2);
        assert_eq!(
            source.entries(),
            vec![Location::new("/"), Location::new("/a"), Location::new("/b")]
        );
        assert_eq!(source.states(), vec![Value::Null, json!(1), json!(2)]);
        assert_eq!(source.state(), json!(2));
    }

    #[test]
    fn replace_overwrites_current_entry() {
        let source = MemorySource::new("/");
        source.push(json!("a"), "/a").unwrap();
        source.replace(json!("b"), "/b").unwrap();

        assert_eq!(source.index(), 1);
        assert_eq!(source.len(), 2);
        assert_eq!(source.location(), Location::new("/b"));
        assert_eq!(source.state(), json!("b"));
        assert_eq!(source.entries()[0], Location::new("/"));
    }

    #[test]
    fn replace_on_initial_entry_keeps_single_entry() {
        let source = MemorySource::new("/");
        source.replace(json!(true), "/home").unwrap();

        assert_eq!(source.len(), 1);
        assert_eq!(source.index(), 0);
        assert_eq!(source.location().pathname, "/home");
    }

    #[test]
    fn destination_is_stored_verbatim() {
        let source = MemorySource::new("/");
        source.push(Value::Null, "/search?q=x#r").unwrap();
        assert_eq!(source.location().pathname, "/search?q=x#r");
    }

    #[test]
    fn hard_navigate_records_entry() {
        let source = MemorySource::new("/");
        source.hard_navigate("/a", WriteMode::Push);
        source.hard_navigate("/b", WriteMode::Replace);

        assert_eq!(source.entries(), vec![Location::new("/"), Location::new("/b")]);
    }

    #[test]
    fn subscribe_is_a_no_op() {
        let source = MemorySource::new("/");
        let listener: RawListener = std::rc::Rc::new(|| panic!("never called"));
        source.subscribe(listener.clone());
        source.push(Value::Null, "/a").unwrap();
        source.unsubscribe(&listener);
    }

    #[test]
    fn snapshot_captures_stack() {
        let source = MemorySource::new("/");
        source.push(json!({ "k": 1 }), "/a").unwrap();

        let snapshot = source.snapshot();
        assert_eq!(snapshot.index, 1);
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.states[1], json!({ "k": 1 }));
    }

    #[test]
    fn from_snapshot_restores_stack() {
        let snapshot = MemorySnapshot {
            entries: vec![Location::new("/"), Location::new("/a"), Location::new("/b")],
            states: vec![Value::Null, json!(1), json!(2)],
            index: 2,
        };

        let source = MemorySource::from_snapshot(snapshot).unwrap();
        assert_eq!(source.location(), Location::new("/b"));
        assert_eq!(source.state(), json!(2));

        source.push(json!(3), "/c").unwrap();
        assert_eq!(source.index(), 3);
        assert_eq!(source.len(), 4);
        assert_eq!(source.location(), Location::new("/c"));
    }

    #[test]
    fn from_snapshot_rejects_invalid_shape() {
        let snapshot = MemorySnapshot {
            entries: vec![Location::new("/")],
            states: vec![],
            index: 0,
        };

        assert!(matches!(
            MemorySource::from_snapshot(snapshot),
            Err(SnapshotError::Misaligned { .. })
        ));

        let snapshot = MemorySnapshot {
            entries: vec![Location::new("/"), Location::new("/a")],
            states: vec![Value::Null, Value::Null],
            index: 0,
        };

        assert!(matches!(
            MemorySource::from_snapshot(snapshot),
            Err(SnapshotError::CursorNotAtTop { index: 0, len: 2 })
        ));
    }
}
