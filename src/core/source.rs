//! The history source contract.
//!
//! A source is the backend a `History` wraps: a real browser-style history
//! or an in-memory stack. Anything implementing `Source` can be substituted.

use super::error::WriteError;
use super::location::Location;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

/// Low-level change notification registered with a source.
///
/// Sources identify registrations by pointer, so the same `Rc` must be
/// passed to `unsubscribe` that was passed to `subscribe`.
pub type RawListener = Rc<dyn Fn()>;

/// Whether a write appends a new entry or overwrites the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WriteMode {
    /// Append a new entry and move the cursor onto it
    Push,
    /// Overwrite the entry under the cursor
    Replace,
}

/// Backend providing the current location, change notifications and
/// push/replace primitives.
///
/// All methods take `&self`; implementations use interior mutability.
/// A source must not hold any internal borrow while it runs raw listeners,
/// since listeners immediately call back into `location()`.
///
/// Sources keep raw listeners until `unsubscribe` is called with them. A
/// `History` unsubscribes every raw listener it still owns when its last
/// clone is dropped, so a source never needs to prune stale entries itself.
///
/// # Example
///
/// ```rust
/// use navstack::core::{MemorySource, Source};
/// use serde_json::json;
///
/// let source = MemorySource::new("/");
/// source.push(json!({ "from": "home" }), "/about").unwrap();
///
/// assert_eq!(source.location().pathname, "/about");
/// assert_eq!(source.state(), json!({ "from": "home" }));
/// ```
pub trait Source {
    /// Current location snapshot. Pure read.
    fn location(&self) -> Location;

    /// Register a callback for out-of-band location changes (back/forward).
    fn subscribe(&self, listener: RawListener);

    /// Remove a callback previously passed to `subscribe`.
    fn unsubscribe(&self, listener: &RawListener);

    /// Append an entry for `to` carrying `state`.
    fn push(&self, state: Value, to: &str) -> Result<(), WriteError>;

    /// Overwrite the current entry with `to` and `state`.
    fn replace(&self, state: Value, to: &str) -> Result<(), WriteError>;

    /// Leave single-page navigation and load `to` as a full document.
    ///
    /// `WriteMode::Push` assigns the document location, `WriteMode::Replace`
    /// replaces it. Used after `push`/`replace` fail.
    fn hard_navigate(&self, to: &str, mode: WriteMode);

    /// State stored with the current entry.
    ///
    /// Default implementation returns `Value::Null`.
    fn state(&self) -> Value {
        Value::Null
    }

    /// Dispatch to `push` or `replace` by mode.
    fn write(&self, mode: WriteMode, state: Value, to: &str) -> Result<(), WriteError> {
        match mode {
            WriteMode::Push => self.push(state, to),
            WriteMode::Replace => self.replace(state, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        writes: RefCell<Vec<(WriteMode, String)>>,
    }

    impl Source for Recorder {
        fn location(&self) -> Location {
            Location::default()
        }

        fn subscribe(&self, _listener: RawListener) {}

        fn unsubscribe(&self, _listener: &RawListener) {}

        fn push(&self, _state: Value, to: &str) -> Result<(), WriteError> {
            self.writes
                .borrow_mut()
                .push((WriteMode::Push, to.to_string()));
            Ok(())
        }

        fn replace(&self, _state: Value, to: &str) -> Result<(), WriteError> {
            self.writes
                .borrow_mut()
                .push((WriteMode::Replace, to.to_string()));
            Ok(())
        }

        fn hard_navigate(&self, _to: &str, _mode: WriteMode) {}
    }

    #[test]
    fn write_dispatches_by_mode() {
        let source = Recorder::default();
        source.write(WriteMode::Push, Value::Null, "/a").unwrap();
        source.write(WriteMode::Replace, Value::Null, "/b").unwrap();

        assert_eq!(
            *source.writes.borrow(),
            vec![
                (WriteMode::Push, "/a".to_string()),
                (WriteMode::Replace, "/b".to_string()),
            ]
        );
    }

    #[test]
    fn default_state_is_null() {
        assert_eq!(Recorder::default().state(), Value::Null);
    }
}
