//! Immutable location snapshots.
//!
//! A `Location` describes where a history source currently points. Every
//! change produces a fresh value; snapshots are never mutated in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of the current address of a history source.
///
/// Only `pathname` is required. `search` and `hash` carry the query and
/// fragment when the backend knows them (a browser does, the in-memory
/// source does not) and are empty otherwise.
///
/// # Example
///
/// ```rust
/// use navstack::core::Location;
///
/// let location = Location::new("/about").with_search("?tab=team");
/// assert_eq!(location.pathname, "/about");
/// assert_eq!(location.to_string(), "/about?tab=team");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path portion of the address
    pub pathname: String,
    /// Query string including the leading `?`, or empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Fragment including the leading `#`, or empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
}

impl Location {
    /// Create a pathname-only location.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Return a copy with the given query string.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Return a copy with the given fragment.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl From<&str> for Location {
    fn from(pathname: &str) -> Self {
        Self::new(pathname)
    }
}
