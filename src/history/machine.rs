//! History wrapper that layers listeners and transitions over a source.

use super::listeners::{Listener, ListenerId, ListenerRegistry};
use super::options::NavigateOptions;
use super::transition::{TransitionHandle, TransitionSlot};
use crate::core::{Location, RawListener, Source, WriteMode};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

struct HistoryState {
    location: Location,
    listeners: ListenerRegistry,
    subscriptions: Vec<(ListenerId, RawListener)>,
    transition: TransitionSlot,
}

struct Inner {
    source: Rc<dyn Source>,
    state: RefCell<HistoryState>,
}

impl Drop for Inner {
    /// Detach raw listeners still registered with the source so it does not
    /// keep callbacks for a history that no longer exists.
    fn drop(&mut self) {
        let subscriptions = std::mem::take(&mut self.state.get_mut().subscriptions);
        for (_, raw) in subscriptions {
            self.source.unsubscribe(&raw);
        }
    }
}

impl Inner {
    /// Re-read the source's location into the cache.
    fn refresh(&self) {
        let location = self.source.location();
        self.state.borrow_mut().location = location;
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.state.borrow().listeners.contains(id)
    }

    /// Run every registered listener in registration order.
    ///
    /// Iterates a snapshot; a listener removed earlier in the same pass is
    /// skipped.
    fn notify(&self) {
        let listeners = self.state.borrow().listeners.snapshot();
        for (id, listener) in listeners {
            let registered = self.is_registered(id);
            if registered {
                listener();
            }
        }
    }
}

/// Navigation history over a pluggable source.
///
/// `History` caches the source's location, fans out change notifications to
/// listeners and tracks a single in-flight transition whose completion is
/// signalled from outside via [`History::on_transition_complete`].
///
/// Clones share state. Everything runs on the calling thread; listeners
/// are invoked synchronously before `navigate` returns.
///
/// # Known quirk
///
/// Navigating again before the previous transition completes orphans the
/// previous handle: it is marked [`TransitionStatus::Orphaned`] and never
/// resolves. Only the newest handle is resolved by the next completion.
///
/// [`TransitionStatus::Orphaned`]: super::TransitionStatus::Orphaned
///
/// # Example
///
/// ```rust
/// use navstack::core::MemorySource;
/// use navstack::history::{History, NavigateOptions};
/// use std::rc::Rc;
///
/// let source = Rc::new(MemorySource::new("/"));
/// let history = History::new(source.clone());
///
/// let handle = history.navigate("/about", NavigateOptions::default());
/// assert_eq!(history.location().pathname, "/about");
/// assert!(history.transitioning());
///
/// history.on_transition_complete();
/// assert!(!history.transitioning());
/// assert!(handle.is_complete());
/// assert_eq!(source.index(), 1);
/// ```
#[derive(Clone)]
pub struct History {
    inner: Rc<Inner>,
}

impl History {
    /// Wrap a source. The cached location is read from it immediately.
    pub fn new(source: Rc<dyn Source>) -> Self {
        let location = source.location();
        Self {
            inner: Rc::new(Inner {
                source,
                state: RefCell::new(HistoryState {
                    location,
                    listeners: ListenerRegistry::default(),
                    subscriptions: Vec::new(),
                    transition: TransitionSlot::default(),
                }),
            }),
        }
    }

    /// Latest known location.
    pub fn location(&self) -> Location {
        self.inner.state.borrow().location.clone()
    }

    /// True from a completed `navigate` until the completion hook fires.
    pub fn transitioning(&self) -> bool {
        self.inner.state.borrow().transition.is_pending()
    }

    /// The live transition, if any.
    pub fn pending_transition(&self) -> Option<TransitionHandle> {
        self.inner.state.borrow().transition.pending().cloned()
    }

    /// State stored with the source's current entry.
    pub fn state(&self) -> Value {
        self.inner.source.state()
    }

    /// Number of active `listen` registrations.
    pub fn listener_count(&self) -> usize {
        self.inner.state.borrow().listeners.len()
    }

    /// The wrapped source.
    pub fn source(&self) -> &Rc<dyn Source> {
        &self.inner.source
    }

    /// Register a listener for location changes.
    ///
    /// The listener runs after every `navigate`, and after every
    /// out-of-band change the source reports; in the latter case the cached
    /// location is refreshed first. Each call registers independently, even
    /// for the same callback.
    pub fn listen<F>(&self, listener: F) -> Unlisten
    where
        F: Fn() + 'static,
    {
        let listener: Listener = Rc::new(listener);
        let id = self
            .inner
            .state
            .borrow_mut()
            .listeners
            .insert(Rc::clone(&listener));

        let weak = Rc::downgrade(&self.inner);
        let raw: RawListener = Rc::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.refresh();
            tracing::trace!(%id, "Source reported a location change");
            if inner.is_registered(id) {
                listener();
            }
        });
        self.inner
            .state
            .borrow_mut()
            .subscriptions
            .push((id, Rc::clone(&raw)));
        self.inner.source.subscribe(Rc::clone(&raw));

        Unlisten {
            history: Rc::downgrade(&self.inner),
            id,
            raw,
        }
    }

    /// Navigate to `to`.
    ///
    /// Pushes a new entry unless `options.replace` is set or a transition is
    /// already in flight, in which case the current entry is replaced. The
    /// cached location is refreshed, a new transition starts, and listeners
    /// are notified before this returns.
    ///
    /// If the source refuses the write, the source is asked to load `to` as
    /// a full document instead and a detached handle is returned; the
    /// cached location, transition and listeners are left untouched.
    pub fn navigate(&self, to: impl AsRef<str>, options: NavigateOptions) -> TransitionHandle {
        let to = to.as_ref();
        let NavigateOptions { state, replace } = options;

        let mode = if self.transitioning() || replace {
            WriteMode::Replace
        } else {
            WriteMode::Push
        };

        if let Err(error) = self.inner.source.write(mode, state, to) {
            let requested = if replace {
                WriteMode::Replace
            } else {
                WriteMode::Push
            };
            tracing::warn!(
                %error,
                to,
                mode = ?requested,
                "History write failed, falling back to document navigation"
            );
            self.inner.source.hard_navigate(to, requested);
            return TransitionHandle::detached();
        }

        self.inner.refresh();

        let (handle, displaced) = self.inner.state.borrow_mut().transition.begin();
        if let Some(displaced) = displaced {
            displaced.orphan();
        }

        tracing::debug!(
            to,
            ?mode,
            transition = %handle.id(),
            "Navigated"
        );

        self.inner.notify();
        handle
    }

    /// Completion hook for the external transition driver.
    ///
    /// Clears the in-flight flag and resolves the newest handle. Harmless
    /// when no transition is pending.
    pub fn on_transition_complete(&self) {
        let completed = self.inner.state.borrow_mut().transition.complete();
        match completed {
            Some(handle) => {
                tracing::debug!(transition = %handle.id(), "Transition complete");
                handle.resolve();
            }
            None => tracing::trace!("Completion signalled with no pending transition"),
        }
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("History")
            .field("location", &state.location)
            .field("transitioning", &state.transition.is_pending())
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

/// Token returned by [`History::listen`].
///
/// Call [`Unlisten::unlisten`] to remove the registration from both the
/// history and its source. Dropping the token leaves the listener in place.
#[must_use = "dropping an Unlisten keeps the listener registered"]
pub struct Unlisten {
    history: Weak<Inner>,
    id: ListenerId,
    raw: RawListener,
}

impl Unlisten {
    /// Id of the registration this token removes.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. It will not run again.
    pub fn unlisten(self) {
        let Some(inner) = self.history.upgrade() else {
            return;
        };
        inner.source.unsubscribe(&self.raw);
        let mut state = inner.state.borrow_mut();
        state.listeners.remove(self.id);
        state.subscriptions.retain(|(id, _)| *id != self.id);
    }
}

impl fmt::Debug for Unlisten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unlisten").field("id", &self.id).finish()
    }
}
