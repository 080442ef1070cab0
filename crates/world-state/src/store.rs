//! Single-threaded snapshot store with facet-scoped subscriptions.
//!
//! The store is the explicit form of "run this block whenever facet X
//! changes": consumers register with [`SnapshotStore::on_facet_changed`] once
//! at setup and drop the returned [`Subscription`] at teardown.
//!
//! # Delivery
//!
//! Notifications are delivered synchronously on the publishing thread, one
//! snapshot at a time. A publish issued from inside a callback is queued and
//! delivered after the current snapshot has reached every subscriber, so two
//! deliveries never overlap.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::facet::FacetScope;
use crate::snapshot::StateSnapshot;

/// Identifier of a registered subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StateSnapshot, FacetScope)>;

struct Listener {
    id: SubscriptionId,
    selector: FacetScope,
    callback: Rc<RefCell<Callback>>,
}

struct Inner {
    current: StateSnapshot,
    listeners: Vec<Listener>,
    next_id: u64,
    pending: VecDeque<StateSnapshot>,
    delivering: bool,
}

impl Inner {
    fn is_registered(&self, id: SubscriptionId) -> bool {
        self.listeners.iter().any(|listener| listener.id == id)
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        before != self.listeners.len()
    }
}

/// Holds the current [`StateSnapshot`] and notifies subscribers of changes.
///
/// Cloning the store yields another handle to the same state.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Rc<RefCell<Inner>>,
}

impl SnapshotStore {
    pub fn new(initial: StateSnapshot) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: initial,
                listeners: Vec::new(),
                next_id: 1,
                pending: VecDeque::new(),
                delivering: false,
            })),
        }
    }

    /// Copy of the snapshot most recently delivered.
    pub fn current(&self) -> StateSnapshot {
        self.inner.borrow().current.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Registers `callback` to run whenever any facet in `selector` changes.
    ///
    /// The callback receives the new snapshot and the full set of facets that
    /// changed in that notification. The registration lives as long as the
    /// returned [`Subscription`].
    pub fn on_facet_changed<F>(&self, selector: FacetScope, callback: F) -> Subscription
    where
        F: FnMut(&StateSnapshot, FacetScope) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push(Listener {
            id,
            selector,
            callback: Rc::new(RefCell::new(Box::new(callback))),
        });
        tracing::trace!(?id, ?selector, "facet subscription registered");

        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Removes a subscription by id. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.borrow_mut().remove(id);
        if removed {
            tracing::trace!(?id, "facet subscription removed");
        }
        removed
    }

    /// Replaces the current snapshot and notifies affected subscribers.
    pub fn publish(&self, snapshot: StateSnapshot) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.pending.push_back(snapshot);
            if inner.delivering {
                tracing::trace!(
                    queued = inner.pending.len(),
                    "publish during delivery queued"
                );
                return;
            }
            inner.delivering = true;
        }
        self.drain();
    }

    /// Applies `reducer` to a copy of the current snapshot and publishes it.
    pub fn update<F>(&self, reducer: F)
    where
        F: FnOnce(&mut StateSnapshot),
    {
        let mut next = self.current();
        reducer(&mut next);
        self.publish(next);
    }

    fn drain(&self) {
        loop {
            let (snapshot, changed, targets) = {
                let mut inner = self.inner.borrow_mut();
                let Some(next) = inner.pending.pop_front() else {
                    inner.delivering = false;
                    return;
                };
                let changed = FacetScope::changed_between(&inner.current, &next);
                inner.current = next.clone();

                let targets: Vec<_> = inner
                    .listeners
                    .iter()
                    .filter(|listener| listener.selector.intersects(changed))
                    .map(|listener| (listener.id, Rc::clone(&listener.callback)))
                    .collect();
                (next, changed, targets)
            };

            if changed.is_empty() {
                tracing::trace!("published snapshot changed no facet");
                continue;
            }
            tracing::debug!(?changed, subscribers = targets.len(), "delivering snapshot");

            for (id, callback) in targets {
                // A callback earlier in this round may have dropped a later one.
                if !self.inner.borrow().is_registered(id) {
                    continue;
                }
                (*callback.borrow_mut())(&snapshot, changed);
            }
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(StateSnapshot::default())
    }
}

impl fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SnapshotStore")
            .field("current", &inner.current)
            .field("subscribers", &inner.listeners.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

/// Registration handle returned by [`SnapshotStore::on_facet_changed`].
///
/// Dropping it unregisters the callback.
#[must_use = "dropping a Subscription unregisters it immediately"]
pub struct Subscription {
    id: SubscriptionId,
    store: Weak<RefCell<Inner>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Explicit teardown; equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Store already gone: nothing left to unregister from.
        let Some(store) = self.store.upgrade() else {
            return;
        };
        // The store never holds its borrow across callbacks.
        match store.try_borrow_mut() {
            Ok(mut inner) => {
                inner.remove(self.id);
            }
            Err(_) => {
                tracing::warn!(id = ?self.id, "subscription dropped while store was borrowed");
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
