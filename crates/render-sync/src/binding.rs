//! Wires a [`SyncDispatcher`] to a [`SnapshotStore`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use world_state::{FacetScope, SnapshotStore, Subscription, SubscriptionId};

use crate::dispatcher::SyncDispatcher;
use crate::port::WorldRenderer;

/// Live subscription of a dispatcher to every facet of a store.
///
/// Dropping the binding unsubscribes. The store only holds a weak reference
/// to the dispatcher, so the host keeps ownership.
#[must_use = "dropping the binding unsubscribes the dispatcher"]
pub struct SyncBinding<R: WorldRenderer> {
    dispatcher: Rc<RefCell<SyncDispatcher<R>>>,
    subscription: Subscription,
}

impl<R: WorldRenderer + 'static> SyncBinding<R> {
    /// Subscribes `dispatcher` and syncs it once against the store's current
    /// snapshot.
    pub fn bind(store: &SnapshotStore, dispatcher: Rc<RefCell<SyncDispatcher<R>>>) -> Self {
        match dispatcher.try_borrow_mut() {
            Ok(mut target) => {
                target.sync(&store.current());
            }
            Err(_) => tracing::warn!("dispatcher busy during bind; initial sync skipped"),
        }

        let target = Rc::downgrade(&dispatcher);
        let subscription = store.on_facet_changed(FacetScope::ALL, move |snapshot, changed| {
            let Some(dispatcher) = target.upgrade() else {
                return;
            };
            let Ok(mut dispatcher) = dispatcher.try_borrow_mut() else {
                tracing::warn!(?changed, "dispatcher busy; notification dropped");
                return;
            };
            tracing::trace!(?changed, "facets changed");
            dispatcher.sync(snapshot);
        });

        tracing::debug!(subscription = ?subscription.id(), "dispatcher bound to store");

        Self {
            dispatcher,
            subscription,
        }
    }
}

impl<R: WorldRenderer> SyncBinding<R> {
    pub fn dispatcher(&self) -> &Rc<RefCell<SyncDispatcher<R>>> {
        &self.dispatcher
    }

    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    /// Unsubscribes and hands the dispatcher back.
    pub fn unbind(self) -> Rc<RefCell<SyncDispatcher<R>>> {
        self.subscription.unsubscribe();
        self.dispatcher
    }
}

impl<R: WorldRenderer> fmt::Debug for SyncBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncBinding")
            .field("subscription", &self.subscription.id())
            .finish()
    }
}
