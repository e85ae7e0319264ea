//! Ordered registry of high-level listeners.

use std::fmt;
use std::rc::Rc;

/// Zero-argument callback invoked after every location change.
pub type Listener = Rc<dyn Fn()>;

/// Identifies one `listen` registration.
///
/// Registering the same callback twice yields two ids, each removable on
/// its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove a registration. Unknown ids are ignored.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Registrations in insertion order, detached from the registry so
    /// callers can run them while the registry changes underneath.
    pub(crate) fn snapshot(&self) -> Vec<(ListenerId, Listener)> {
        self.entries.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener {
        Rc::new(|| {})
    }

    #[test]
    fn ids_are_unique_per_registration() {
        let mut registry = ListenerRegistry::default();
        let listener = noop();
        let a = registry.insert(Rc::clone(&listener));
        let b = registry.insert(listener);

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_only_drops_that_registration() {
        let mut registry = ListenerRegistry::default();
        let listener = noop();
        let a = registry.insert(Rc::clone(&listener));
        let b = registry.insert(listener);

        assert!(registry.remove(a));
        assert!(!registry.contains(a));
        assert!(registry.contains(b));
    }

    #[test]
    fn removing_twice_is_harmless() {
        let mut registry = ListenerRegistry::default();
        let id = registry.insert(noop());

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn snapshot_preserves_order() {
        let mut registry = ListenerRegistry::default();
        let ids: Vec<_> = (0..3).map(|_| registry.insert(noop())).collect();

        let order: Vec<_> = registry.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, ids);
    }
}
