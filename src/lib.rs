//! Navstack: navigation history over pluggable location sources
//!
//! Navstack unifies a browser-style session history and an in-memory stand-in
//! behind one interface: the current location, listeners for location
//! changes, and a `navigate` operation whose transition is completed by an
//! external driver rather than immediately.
//!
//! # Core Concepts
//!
//! - **Source**: A backend implementing the `Source` trait (memory or browser)
//! - **History**: Caches the location, notifies listeners, tracks one transition
//! - **Transition**: Pending from `navigate` until `on_transition_complete`
//!
//! # Example
//!
//! ```rust
//! use navstack::core::{Location, MemorySource};
//! use navstack::history::{History, NavigateOptions};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let source = Rc::new(MemorySource::new("/"));
//! let history = History::new(source.clone());
//!
//! let changes = Rc::new(Cell::new(0));
//! let counter = changes.clone();
//! let unlisten = history.listen(move || counter.set(counter.get() + 1));
//!
//! let transition = history.navigate("/about", NavigateOptions::default());
//! assert_eq!(history.location(), Location::new("/about"));
//! assert_eq!(changes.get(), 1);
//!
//! // Later, the render loop finishes animating:
//! history.on_transition_complete();
//! assert!(transition.is_complete());
//!
//! unlisten.unlisten();
//! ```

pub mod core;
pub mod history;
pub mod select;
pub mod snapshot;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

// Re-export commonly used types
pub use crate::core::{Location, MemorySource, Source, WriteError, WriteMode};
pub use history::{History, NavigateOptions, TransitionHandle, TransitionStatus, Unlisten};
pub use select::{global_history, navigate};
