use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use world_state::{
    CharacterId, CharacterRecord, CombatRecord, Coordinate, FacetScope, SnapshotStore,
    StateSnapshot, Subscription, ZoneData,
};

fn recorder() -> (Rc<RefCell<Vec<FacetScope>>>, impl FnMut(&StateSnapshot, FacetScope)) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |_: &StateSnapshot, changed| sink.borrow_mut().push(changed))
}

#[test]
fn selector_filters_unrelated_facets() {
    let store = SnapshotStore::default();
    let (combat_seen, on_combat) = recorder();
    let _sub = store.on_facet_changed(FacetScope::COMBAT, on_combat);

    store.update(|s| s.party_position = Some(Coordinate::new(1, 0)));
    assert!(combat_seen.borrow().is_empty());

    store.update(|s| s.combat_state = CombatRecord::active(1));
    assert_eq!(*combat_seen.borrow(), vec![FacetScope::COMBAT]);
}

#[test]
fn callback_receives_every_changed_facet() {
    let store = SnapshotStore::default();
    let (seen, on_any) = recorder();
    let _sub = store.on_facet_changed(FacetScope::ZONE, on_any);

    store.update(|s| {
        s.current_zone = Some(Arc::new(ZoneData::new("crypt")));
        s.party_position = Some(Coordinate::new(3, 3));
    });

    assert_eq!(*seen.borrow(), vec![FacetScope::ZONE | FacetScope::POSITION]);
}

#[test]
fn unchanged_publish_notifies_nobody() {
    let store = SnapshotStore::new(StateSnapshot::new().with_position(Coordinate::new(2, 2)));
    let (seen, on_any) = recorder();
    let _sub = store.on_facet_changed(FacetScope::ALL, on_any);

    store.publish(store.current());
    assert!(seen.borrow().is_empty());
}

#[test]
fn dropping_subscription_unregisters() {
    let store = SnapshotStore::default();
    let (seen, on_any) = recorder();
    let sub = store.on_facet_changed(FacetScope::ALL, on_any);
    assert_eq!(store.subscriber_count(), 1);

    sub.unsubscribe();
    assert_eq!(store.subscriber_count(), 0);

    store.update(|s| s.party_position = Some(Coordinate::new(9, 9)));
    assert!(seen.borrow().is_empty());
}

#[test]
fn unsubscribe_by_id_reports_membership() {
    let store = SnapshotStore::default();
    let sub = store.on_facet_changed(FacetScope::ALL, |_, _| {});
    let id = sub.id();

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    drop(sub);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn publish_from_callback_is_delivered_after_current_round() {
    let store = SnapshotStore::default();
    let depth = Rc::new(Cell::new(0u32));
    let max_depth = Rc::new(Cell::new(0u32));
    let order = Rc::new(RefCell::new(Vec::new()));

    let republisher = store.clone();
    let (d, m, o) = (Rc::clone(&depth), Rc::clone(&max_depth), Rc::clone(&order));
    let _first = store.on_facet_changed(FacetScope::ALL, move |snapshot, _| {
        d.set(d.get() + 1);
        m.set(m.get().max(d.get()));
        o.borrow_mut().push(("first", snapshot.party_position));
        // Nudge the party once, from inside the delivery.
        if snapshot.party_position == Some(Coordinate::new(1, 1)) {
            republisher.update(|s| s.party_position = Some(Coordinate::new(2, 2)));
        }
        d.set(d.get() - 1);
    });

    let o = Rc::clone(&order);
    let _second = store.on_facet_changed(FacetScope::POSITION, move |snapshot, _| {
        o.borrow_mut().push(("second", snapshot.party_position));
    });

    store.update(|s| s.party_position = Some(Coordinate::new(1, 1)));

    assert_eq!(max_depth.get(), 1, "deliveries must not overlap");
    assert_eq!(
        *order.borrow(),
        vec![
            ("first", Some(Coordinate::new(1, 1))),
            ("second", Some(Coordinate::new(1, 1))),
            ("first", Some(Coordinate::new(2, 2))),
            ("second", Some(Coordinate::new(2, 2))),
        ]
    );
    assert_eq!(store.current().party_position, Some(Coordinate::new(2, 2)));
}

#[test]
fn subscription_dropped_mid_round_is_skipped() {
    let store = SnapshotStore::default();
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let slot = Rc::clone(&victim);
    let _killer = store.on_facet_changed(FacetScope::ALL, move |_, _| {
        slot.borrow_mut().take();
    });

    let (seen, on_any) = recorder();
    *victim.borrow_mut() = Some(store.on_facet_changed(FacetScope::ALL, on_any));

    store.update(|s| {
        s.party_members.insert(
            CharacterId(1),
            Arc::new(CharacterRecord::new(CharacterId(1))),
        );
    });

    assert!(seen.borrow().is_empty());
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn subscription_outliving_store_drops_quietly() {
    let store = SnapshotStore::default();
    let sub = store.on_facet_changed(FacetScope::ALL, |_, _| {});
    drop(store);
    drop(sub);
}
