//! Options accepted by `History::navigate`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a navigation is written to the source.
///
/// Both fields default: `state` to `null`, `replace` to `false`.
///
/// # Example
///
/// ```rust
/// use navstack::history::NavigateOptions;
/// use serde_json::json;
///
/// let options = NavigateOptions::new()
///     .state(json!({ "scroll": 120 }))
///     .replace(true);
///
/// assert!(options.replace);
/// assert_eq!(options.state["scroll"], 120);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigateOptions {
    /// Opaque value stored with the new entry
    pub state: Value,
    /// Overwrite the current entry instead of appending one
    pub replace: bool,
}

impl NavigateOptions {
    /// Options for a plain push with `null` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state stored with the entry.
    pub fn state(mut self, state: impl Into<Value>) -> Self {
        self.state = state.into();
        self
    }

    /// Request replace semantics.
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_push_null_state() {
        let options = NavigateOptions::new();
        assert_eq!(options.state, Value::Null);
        assert!(!options.replace);
    }

    #[test]
    fn builder_sets_fields() {
        let options = NavigateOptions::new().state("token").replace(true);
        assert_eq!(options.state, json!("token"));
        assert!(options.replace);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let options: NavigateOptions = serde_json::from_str(r#"{"replace":true}"#).unwrap();
        assert_eq!(options, NavigateOptions::new().replace(true));

        let options: NavigateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, NavigateOptions::default());
    }
}
