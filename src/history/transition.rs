//! Externally completed transitions.
//!
//! `navigate` starts a transition and hands back a `TransitionHandle`. The
//! handle only resolves when an outside driver (an animation or render
//! loop) calls `History::on_transition_complete`. At most one transition is
//! live at a time; starting another orphans the previous handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use uuid::Uuid;

/// Lifecycle of a transition handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStatus {
    /// Waiting for the completion hook
    Pending,

    /// The completion hook fired while this handle was live
    Completed,

    /// A later navigation displaced this handle; it never resolves
    Orphaned,

    /// The navigation left the page via a document load; it never resolves
    Detached,
}

/// Serializable view of a transition, for drivers that log or report it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSummary {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub status: TransitionStatus,
}

type CompletionCallback = Box<dyn FnOnce()>;

struct Signal {
    status: TransitionStatus,
    wakers: Vec<Waker>,
    callbacks: Vec<CompletionCallback>,
}

/// Handle to a navigation's transition.
///
/// Clones share the same underlying signal. The handle can be polled with
/// `status()`, observed with `on_complete`, or awaited as a `Future`.
/// Orphaned and detached handles stay pending forever when awaited.
///
/// # Example
///
/// ```rust
/// use navstack::core::MemorySource;
/// use navstack::history::{History, NavigateOptions, TransitionStatus};
/// use std::rc::Rc;
///
/// let history = History::new(Rc::new(MemorySource::new("/")));
///
/// let first = history.navigate("/a", NavigateOptions::default());
/// let second = history.navigate("/b", NavigateOptions::default());
/// history.on_transition_complete();
///
/// assert_eq!(first.status(), TransitionStatus::Orphaned);
/// assert_eq!(second.status(), TransitionStatus::Completed);
/// ```
#[derive(Clone)]
pub struct TransitionHandle {
    id: Uuid,
    started_at: DateTime<Utc>,
    signal: Rc<RefCell<Signal>>,
}

impl TransitionHandle {
    fn with_status(status: TransitionStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            signal: Rc::new(RefCell::new(Signal {
                status,
                wakers: Vec::new(),
                callbacks: Vec::new(),
            })),
        }
    }

    /// Handle returned when control left the page; never resolves.
    pub(crate) fn detached() -> Self {
        Self::with_status(TransitionStatus::Detached)
    }

    /// Unique id of this transition.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the transition started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current lifecycle status.
    pub fn status(&self) -> TransitionStatus {
        self.signal.borrow().status
    }

    /// Point-in-time summary of this handle.
    pub fn summary(&self) -> TransitionSummary {
        TransitionSummary {
            id: self.id,
            started_at: self.started_at,
            status: self.status(),
        }
    }

    /// True once the completion hook resolved this handle.
    pub fn is_complete(&self) -> bool {
        self.status() == TransitionStatus::Completed
    }

    /// Run `callback` when the transition completes.
    ///
    /// Runs immediately if already complete. Callbacks registered on a
    /// handle that is or becomes orphaned or detached never run.
    pub fn on_complete<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let mut signal = self.signal.borrow_mut();
        let status = signal.status;
        match status {
            TransitionStatus::Pending => signal.callbacks.push(Box::new(callback)),
            TransitionStatus::Completed => {
                drop(signal);
                callback();
            }
            TransitionStatus::Orphaned | TransitionStatus::Detached => {}
        }
    }

    /// Resolve the handle, waking awaiters and running callbacks.
    pub(crate) fn resolve(&self) {
        if let Some((wakers, callbacks)) = self.settle(TransitionStatus::Completed) {
            wakers.into_iter().for_each(Waker::wake);
            callbacks.into_iter().for_each(|callback| callback());
        }
    }

    /// Mark the handle as displaced. Awaiters stay pending.
    pub(crate) fn orphan(&self) {
        if self.settle(TransitionStatus::Orphaned).is_some() {
            tracing::trace!(transition = %self.id, "Transition orphaned by a newer navigation");
        }
    }

    fn settle(&self, status: TransitionStatus) -> Option<(Vec<Waker>, Vec<CompletionCallback>)> {
        let mut signal = self.signal.borrow_mut();
        if signal.status != TransitionStatus::Pending {
            return None;
        }
        signal.status = status;
        let wakers = std::mem::take(&mut signal.wakers);
        let callbacks = std::mem::take(&mut signal.callbacks);
        Some((wakers, callbacks))
    }
}

impl fmt::Debug for TransitionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHandle")
            .field("id", &self.id)
            .field("started_at", &self.started_at)
            .field("status", &self.status())
            .finish()
    }
}

impl Future for TransitionHandle {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut signal = self.signal.borrow_mut();
        if signal.status == TransitionStatus::Completed {
            return Poll::Ready(());
        }
        if !signal.wakers.iter().any(|w| w.will_wake(cx.waker())) {
            signal.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

/// Single slot holding the live transition, if any.
#[derive(Default)]
pub(crate) struct TransitionSlot {
    pending: Option<TransitionHandle>,
}

impl TransitionSlot {
    /// Start a new transition.
    ///
    /// Returns the new handle and the handle it displaced. The caller
    /// settles the displaced handle once it no longer holds any borrow.
    pub(crate) fn begin(&mut self) -> (TransitionHandle, Option<TransitionHandle>) {
        let handle = TransitionHandle::with_status(TransitionStatus::Pending);
        let displaced = self.pending.replace(handle.clone());
        (handle, displaced)
    }

    /// Take the live transition for resolution. `None` when idle.
    pub(crate) fn complete(&mut self) -> Option<TransitionHandle> {
        self.pending.take()
    }

    pub(crate) fn pending(&self) -> Option<&TransitionHandle> {
        self.pending.as_ref()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
