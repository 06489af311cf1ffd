//! # Copy-on-write set of attached observers.
//!
//! [`ObserverSet`] tracks the observers currently attached to one stream.
//! Every mutation replaces the held collection with a new immutable one, so
//! [`ObserverSet::snapshot`] is O(1) and the returned collection can be
//! iterated for broadcast without any further synchronization — a concurrent
//! add/remove produces a *new* collection and never touches a snapshot
//! already taken.
//!
//! The set itself is mutated only by its owning stream, under the stream's
//! lock.

use std::sync::Arc;

use crate::subscribers::AsyncObserver;

/// Snapshot-able collection of the observers attached to a stream.
pub(crate) struct ObserverSet<T: Send + Sync + 'static> {
    observers: Arc<[Arc<AsyncObserver<T>>]>,
}

impl<T: Send + Sync + 'static> ObserverSet<T> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new().into(),
        }
    }

    /// Attaches an observer.
    pub fn add(&mut self, observer: Arc<AsyncObserver<T>>) {
        let mut next: Vec<_> = self.observers.iter().cloned().collect();
        next.push(observer);
        self.observers = next.into();
    }

    /// Detaches an observer by identity; a no-op when it is not attached.
    pub fn remove(&mut self, observer: &Arc<AsyncObserver<T>>) {
        if !self.observers.iter().any(|o| Arc::ptr_eq(o, observer)) {
            return;
        }
        let next: Vec<_> = self
            .observers
            .iter()
            .filter(|o| !Arc::ptr_eq(o, observer))
            .cloned()
            .collect();
        self.observers = next.into();
    }

    /// Detaches all observers.
    pub fn clear(&mut self) {
        self.observers = Vec::new().into();
    }

    /// Returns the current members as an immutable point-in-time collection.
    pub fn snapshot(&self) -> Arc<[Arc<AsyncObserver<T>>]> {
        Arc::clone(&self.observers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::subscribers::{Signal, Subscribe};
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl Subscribe<i64> for Noop {
        async fn on_signal(&self, _signal: &Signal<i64>) {}
    }

    fn observer() -> Arc<AsyncObserver<i64>> {
        AsyncObserver::new(Arc::new(Noop))
    }

    #[test]
    fn test_add_and_remove_by_identity() {
        let mut set = ObserverSet::new();
        let a = observer();
        let b = observer();
        set.add(Arc::clone(&a));
        set.add(Arc::clone(&b));
        assert_eq!(set.snapshot().len(), 2);

        set.remove(&a);
        assert_eq!(set.snapshot().len(), 1);
        assert!(Arc::ptr_eq(&set.snapshot()[0], &b));

        // Removing an absent observer is a no-op.
        set.remove(&a);
        assert_eq!(set.snapshot().len(), 1);
    }

    #[test]
    fn test_snapshot_is_isolated_from_mutation() {
        let mut set = ObserverSet::new();
        set.add(observer());
        let snapshot = set.snapshot();

        set.add(observer());
        set.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(set.snapshot().len(), 0);
    }
}
