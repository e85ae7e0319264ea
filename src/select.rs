//! Source selection and the default history instance.
//!
//! Picks the browser history when running in a DOM, otherwise an in-memory
//! stack, and wraps the choice once into a default [`History`].

use crate::core::{MemorySource, Source};
use crate::history::{History, NavigateOptions, TransitionHandle};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Where the process is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// A browser-like environment with `window.document`
    Dom,
    /// Anything else: native, server, tests
    Headless,
}

impl Environment {
    /// Detect the current environment.
    ///
    /// Only `wasm32` builds with the `web` feature can report `Dom`.
    pub fn detect() -> Self {
        if dom_available() {
            Self::Dom
        } else {
            Self::Headless
        }
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn dom_available() -> bool {
    web_sys::window().and_then(|window| window.document()).is_some()
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn dom_available() -> bool {
    false
}

/// Settings for the default history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Pathname of the first entry when an in-memory source is used
    pub initial_pathname: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            initial_pathname: "/".to_string(),
        }
    }
}

/// Choose a source for `environment`.
///
/// # Example
///
/// ```rust
/// use navstack::select::{select_source, Environment, HistoryConfig};
///
/// let config = HistoryConfig { initial_pathname: "/home".to_string() };
/// let source = select_source(Environment::Headless, &config);
/// assert_eq!(source.location().pathname, "/home");
/// ```
pub fn select_source(environment: Environment, config: &HistoryConfig) -> Rc<dyn Source> {
    match environment {
        Environment::Dom => dom_source(config),
        Environment::Headless => memory_source(config),
    }
}

fn memory_source(config: &HistoryConfig) -> Rc<dyn Source> {
    Rc::new(MemorySource::new(config.initial_pathname.clone()))
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn dom_source(config: &HistoryConfig) -> Rc<dyn Source> {
    match web_sys::window() {
        Some(window) => Rc::new(crate::web::WebSource::new(window)),
        None => {
            tracing::warn!("No window available, using an in-memory history");
            memory_source(config)
        }
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn dom_source(config: &HistoryConfig) -> Rc<dyn Source> {
    tracing::warn!("Browser history is not compiled in, using an in-memory history");
    memory_source(config)
}

/// Build a history for the detected environment.
pub fn create_history(config: &HistoryConfig) -> History {
    let environment = Environment::detect();
    tracing::debug!(?environment, "Selecting history source");
    History::new(select_source(environment, config))
}

thread_local! {
    static DEFAULT_HISTORY: History = create_history(&HistoryConfig::default());
}

/// The default history, created on first use.
///
/// There is one per thread; in the single-threaded environments this crate
/// targets that is one per process.
pub fn global_history() -> History {
    DEFAULT_HISTORY.with(History::clone)
}

/// Navigate the default history. See [`History::navigate`].
pub fn navigate(to: impl AsRef<str>, options: NavigateOptions) -> TransitionHandle {
    DEFAULT_HISTORY.with(|history| history.navigate(to, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Location;

    #[test]
    fn native_builds_detect_headless() {
        assert_eq!(Environment::detect(), Environment::Headless);
    }

    #[test]
    fn headless_selects_memory_at_configured_path() {
        let config = HistoryConfig {
            initial_pathname: "/start".to_string(),
        };
        let source = select_source(Environment::Headless, &config);
        assert_eq!(source.location(), Location::new("/start"));
    }

    #[test]
    fn dom_without_web_support_falls_back_to_memory() {
        let source = select_source(Environment::Dom, &HistoryConfig::default());
        assert_eq!(source.location(), Location::new("/"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: HistoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HistoryConfig::default());
    }

    #[test]
    fn free_navigate_drives_global_history() {
        let history = global_history();
        assert_eq!(history.location(), Location::new("/"));

        let handle = navigate("/about", NavigateOptions::default());
        assert_eq!(global_history().location().pathname, "/about");
        assert!(history.transitioning());

        global_history().on_transition_complete();
        assert!(handle.is_complete());
    }
}
