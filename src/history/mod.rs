//! Stateful history layer.
//!
//! Wraps any [`Source`](crate::core::Source) with:
//! - A cached location refreshed on every navigation and source event
//! - Ordered listener fan-out
//! - A single in-flight transition completed by an external driver
//!
//! All of it is single-threaded and synchronous; the only deferred piece is
//! transition completion, which arrives through
//! [`History::on_transition_complete`].

mod listeners;
mod machine;
mod options;
mod transition;

pub use listeners::{Listener, ListenerId};
pub use machine::{History, Unlisten};
pub use options::NavigateOptions;
pub use transition::{TransitionHandle, TransitionStatus, TransitionSummary};
