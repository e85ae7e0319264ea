//! Browser history source.
//!
//! Wraps `window.history` and `window.location`. State values are stored as
//! JSON strings so they survive the structured-clone round trip unchanged.

use crate::core::{Location, RawListener, Source, WriteError, WriteMode};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{PopStateEvent, Window};

/// Source backed by the browser's session history.
///
/// Back/forward navigation surfaces as `popstate`, which is forwarded to
/// every subscribed raw listener.
pub struct WebSource {
    window: Window,
    listeners: Rc<RefCell<Vec<RawListener>>>,
    popstate: Closure<dyn FnMut(PopStateEvent)>,
}

impl WebSource {
    /// Attach to `window`. The `popstate` hook is removed on drop.
    pub fn new(window: Window) -> Self {
        let listeners: Rc<RefCell<Vec<RawListener>>> = Rc::default();

        let dispatch = Rc::clone(&listeners);
        let popstate = Closure::wrap(Box::new(move |_event: PopStateEvent| {
            let snapshot = dispatch.borrow().clone();
            for listener in snapshot {
                listener();
            }
        }) as Box<dyn FnMut(_)>);

        if let Err(error) =
            window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?error, "Failed to attach popstate listener");
        }

        Self {
            window,
            listeners,
            popstate,
        }
    }

    fn history(&self) -> Result<web_sys::History, WriteError> {
        self.window.history().map_err(rejected)
    }
}

fn rejected(error: JsValue) -> WriteError {
    let message = error
        .as_string()
        .unwrap_or_else(|| format!("{error:?}"));
    if message.contains("QuotaExceeded") || message.contains("SecurityError") {
        WriteError::QuotaExceeded
    } else {
        WriteError::Rejected(message)
    }
}

fn encode_state(state: &Value) -> JsValue {
    if state.is_null() {
        JsValue::NULL
    } else {
        JsValue::from_str(&state.to_string())
    }
}

impl Drop for WebSource {
    fn drop(&mut self) {
        if let Err(error) = self.window.remove_event_listener_with_callback(
            "popstate",
            self.popstate.as_ref().unchecked_ref(),
        ) {
            tracing::warn!(error = ?error, "Failed to detach popstate listener");
        }
    }
}

impl Source for WebSource {
    fn location(&self) -> Location {
        let location = self.window.location();
        Location {
            pathname: location.pathname().unwrap_or_else(|_| "/".to_string()),
            search: location.search().unwrap_or_default(),
            hash: location.hash().unwrap_or_default(),
        }
    }

    fn subscribe(&self, listener: RawListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn unsubscribe(&self, listener: &RawListener) {
        self.listeners
            .borrow_mut()
            .retain(|existing| !Rc::ptr_eq(existing, listener));
    }

    fn push(&self, state: Value, to: &str) -> Result<(), WriteError> {
        self.history()?
            .push_state_with_url(&encode_state(&state), "", Some(to))
            .map_err(rejected)
    }

    fn replace(&self, state: Value, to: &str) -> Result<(), WriteError> {
        self.history()?
            .replace_state_with_url(&encode_state(&state), "", Some(to))
            .map_err(rejected)
    }

    fn hard_navigate(&self, to: &str, mode: WriteMode) {
        let location = self.window.location();
        let result = match mode {
            WriteMode::Push => location.assign(to),
            WriteMode::Replace => location.replace(to),
        };
        if let Err(error) = result {
            tracing::error!(to, error = ?error, "Document navigation failed");
        }
    }

    fn state(&self) -> Value {
        self.history()
            .ok()
            .and_then(|history| history.state().ok())
            .and_then(|state| state.as_string())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or(Value::Null)
    }
}
