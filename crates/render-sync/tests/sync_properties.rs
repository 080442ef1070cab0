use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use render_sync::mock::{RecordingRenderer, RendererCall};
use render_sync::{BridgeConfig, MappingError, SyncDispatcher};
use world_state::{
    CharacterId, CharacterRecord, CombatRecord, CombatStatus, Combatant, ContentReloaded,
    ContentType, Coordinate, FacetScope, StateSnapshot, ZoneData, ZoneTiles,
};

fn marsh() -> Arc<ZoneData> {
    Arc::new(
        ZoneData::new("marsh")
            .with_name("Sunken Marsh")
            .with_tiles(ZoneTiles::new(2, 2, ["water", "grass", "floor", "door"])),
    )
}

fn member(id: u32, name: &str) -> Arc<CharacterRecord> {
    Arc::new(
        CharacterRecord::new(CharacterId(id))
            .with_name(name)
            .with_class("fighter")
            .with_position(Coordinate::new(id as i32, 0))
            .with_hit_points(10, 10),
    )
}

fn party_snapshot() -> StateSnapshot {
    StateSnapshot::new()
        .with_position(Coordinate::new(5, 5))
        .with_zone(marsh())
        .with_member(CharacterId(1), member(1, "Ayla"))
        .with_member(CharacterId(2), member(2, "Brin"))
}

type Attached = (Rc<RefCell<RecordingRenderer>>, SyncDispatcher<RecordingRenderer>);

fn attached(config: BridgeConfig) -> Attached {
    let renderer = Rc::new(RefCell::new(RecordingRenderer::new()));
    let mut dispatcher = SyncDispatcher::new(config);
    dispatcher.on_renderer_ready(&renderer);
    (renderer, dispatcher)
}

fn lazy() -> BridgeConfig {
    BridgeConfig {
        resync_on_attach: false,
        ..BridgeConfig::default()
    }
}

#[test]
fn unattached_notifications_cause_no_mutations() {
    let renderer = Rc::new(RefCell::new(RecordingRenderer::new()));
    let mut dispatcher = SyncDispatcher::new(lazy());

    for x in 0..3 {
        let report = dispatcher.sync(&party_snapshot().with_position(Coordinate::new(x, 0)));
        assert!(report.deferred);
    }
    assert_eq!(renderer.borrow().call_count(), 0);
    assert!(dispatcher.renderer().is_none());
    assert!(dispatcher.camera().is_none());

    dispatcher.on_renderer_ready(&renderer);
    assert_eq!(renderer.borrow().call_count(), 0);

    let report = dispatcher.sync(&StateSnapshot::new().with_position(Coordinate::new(9, 9)));
    assert!(!report.deferred);
    assert_eq!(
        renderer.borrow().calls(),
        &[RendererCall::PartyPosition(Coordinate::new(9, 9))]
    );
}

#[test]
fn identical_snapshot_twice_is_a_no_op() {
    let (renderer, mut dispatcher) = attached(lazy());
    let snapshot = party_snapshot();

    let first = dispatcher.sync(&snapshot);
    assert_eq!(first.mutations, 4);
    renderer.borrow_mut().take_calls();

    let second = dispatcher.sync(&snapshot);
    assert_eq!(second.mutations, 0);
    assert!(second.applied.is_empty());
    assert_eq!(renderer.borrow().call_count(), 0);
}

#[test]
fn position_compares_by_value_and_zone_by_reference() {
    let (renderer, mut dispatcher) = attached(lazy());
    let mut snapshot = party_snapshot();
    dispatcher.sync(&snapshot);
    renderer.borrow_mut().take_calls();

    // In-place edit of the same snapshot value.
    snapshot.party_position = Some(Coordinate::new(6, 5));
    dispatcher.sync(&snapshot);
    assert_eq!(
        renderer.borrow_mut().take_calls(),
        vec![RendererCall::PartyPosition(Coordinate::new(6, 5))]
    );

    // Equal contents, new zone object.
    let before = snapshot.current_zone.clone();
    snapshot.current_zone = Some(marsh());
    assert_eq!(before, snapshot.current_zone);
    let report = dispatcher.sync(&snapshot);
    assert_eq!(report.applied, FacetScope::ZONE);
    assert_eq!(renderer.borrow().tile_maps().len(), 1);
}

#[test]
fn malformed_roster_entry_does_not_block_the_others() {
    let (renderer, mut dispatcher) = attached(lazy());
    let broken = Arc::new(CharacterRecord::new(CharacterId(2)).with_hit_points(15, 10));
    let snapshot = StateSnapshot::new()
        .with_member(CharacterId(1), member(1, "Ayla"))
        .with_member(CharacterId(2), broken)
        .with_member(CharacterId(3), member(3, "Cato"));

    let report = dispatcher.sync(&snapshot);

    assert_eq!(report.sprites_updated, 2);
    assert_eq!(report.roster_failures.len(), 1);
    assert_eq!(report.roster_failures[0].character, CharacterId(2));
    assert!(matches!(
        report.roster_failures[0].error,
        MappingError::InvalidHitPoints { hp: 15, max_hp: 10, .. }
    ));

    let labels: Vec<_> = renderer
        .borrow()
        .sprites()
        .iter()
        .map(|sprite| sprite.label.clone())
        .collect();
    assert_eq!(labels, vec!["Ayla", "Cato"]);

    // Only the failed entry is retried.
    let retry = dispatcher.sync(&snapshot);
    assert_eq!(retry.sprites_updated, 0);
    assert_eq!(retry.roster_failures.len(), 1);
    assert_eq!(dispatcher.stats().roster_failures, 2);
}

#[test]
fn tile_map_is_sent_before_sprites() {
    let (renderer, mut dispatcher) = attached(lazy());
    dispatcher.sync(&party_snapshot());

    let calls = renderer.borrow().calls().to_vec();
    let tile_map_at = calls.iter().position(RendererCall::is_tile_map).unwrap();
    let first_sprite_at = calls.iter().position(RendererCall::is_sprite).unwrap();
    assert!(tile_map_at < first_sprite_at);
    assert_eq!(
        calls[0],
        RendererCall::PartyPosition(Coordinate::new(5, 5)),
        "position leads every pass"
    );
}

#[test]
fn combat_only_syncs_while_active() {
    let (renderer, mut dispatcher) = attached(lazy());
    let mut snapshot = StateSnapshot::new();
    dispatcher.sync(&snapshot);

    snapshot.combat_state.round = 4;
    snapshot.combat_state.turn_order = vec![CharacterId(1)];
    assert_eq!(snapshot.combat_state.status, CombatStatus::Idle);
    dispatcher.sync(&snapshot);
    assert!(renderer.borrow().combat_views().is_empty());

    snapshot.combat_state = CombatRecord::active(1)
        .with_turn_order(vec![CharacterId(1), CharacterId(50)])
        .with_enemy(Combatant {
            id: CharacterId(50),
            name: "Mire Hound".into(),
            hp: 6,
            max_hp: 12,
            position: Coordinate::new(2, 3),
        });
    dispatcher.sync(&snapshot);
    dispatcher.sync(&snapshot);

    let renderer = renderer.borrow();
    let views = renderer.combat_views();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].active_combatant, Some(CharacterId(1)));
    assert_eq!(views[0].enemies[0].name, "Mire Hound");
    assert_eq!(views[0].enemies[0].health_ratio, 0.5);
}

#[test]
fn failed_zone_is_retried_without_blocking_later_facets() {
    let (renderer, mut dispatcher) = attached(lazy());
    let unstreamed = Arc::new(ZoneData::new("keep"));
    let snapshot = StateSnapshot::new()
        .with_zone(Arc::clone(&unstreamed))
        .with_member(CharacterId(1), member(1, "Ayla"));

    let report = dispatcher.sync(&snapshot);
    assert_eq!(
        report.zone_failure,
        Some(MappingError::MissingTiles {
            zone_id: "keep".into()
        })
    );
    assert_eq!(report.failed(), FacetScope::ZONE);
    assert_eq!(report.sprites_updated, 1);
    assert!(renderer.borrow().tile_maps().is_empty());

    // The detector did not advance, so the same zone object is tried again.
    let retry = dispatcher.sync(&snapshot);
    assert!(retry.zone_failure.is_some());
    assert_eq!(dispatcher.stats().mapping_failures, 2);
}

#[test]
fn attach_resyncs_latest_snapshot() {
    let renderer = Rc::new(RefCell::new(RecordingRenderer::new()));
    let mut dispatcher = SyncDispatcher::new(BridgeConfig::default());
    dispatcher.sync(&party_snapshot());

    let report = dispatcher.on_renderer_ready(&renderer).unwrap();
    assert_eq!(report.mutations, 4);
    assert!(dispatcher.is_initialized());
    assert!(dispatcher.camera().is_some());
    assert!(dispatcher.tile_layer().is_some());
}

#[test]
fn attach_without_snapshot_runs_no_pass() {
    let renderer = Rc::new(RefCell::new(RecordingRenderer::new()));
    let mut dispatcher = SyncDispatcher::new(BridgeConfig::default());
    assert!(dispatcher.on_renderer_ready(&renderer).is_none());
    assert!(dispatcher.is_initialized());
}

#[test]
fn new_renderer_receives_full_state() {
    let (first, mut dispatcher) = attached(BridgeConfig::default());
    let snapshot = party_snapshot();
    dispatcher.sync(&snapshot);
    assert_eq!(first.borrow().call_count(), 4);

    dispatcher.on_renderer_lost();
    assert!(dispatcher.renderer().is_none());
    assert!(dispatcher.sync(&snapshot).deferred);

    let second = Rc::new(RefCell::new(RecordingRenderer::new()));
    dispatcher.on_renderer_ready(&second);
    assert_eq!(second.borrow().call_count(), 4);
    assert_eq!(first.borrow().call_count(), 4);
}

#[test]
fn dropped_renderer_defers_until_replaced() {
    let (renderer, mut dispatcher) = attached(lazy());
    drop(renderer);

    let report = dispatcher.sync(&party_snapshot());
    assert!(report.deferred);
    assert!(dispatcher.camera().is_none());
}

#[test]
fn zone_reload_forces_tile_map_resend() {
    let (renderer, mut dispatcher) = attached(lazy());
    dispatcher.sync(&party_snapshot());
    renderer.borrow_mut().take_calls();

    let event = ContentReloaded::new(ContentType::Zone, ["marsh"], "file-watcher");
    let report = dispatcher.on_content_reloaded(&event).unwrap();

    assert_eq!(report.applied, FacetScope::ZONE);
    assert_eq!(renderer.borrow().tile_maps().len(), 1);
}

#[test]
fn character_reload_resends_named_members_only() {
    let (renderer, mut dispatcher) = attached(lazy());
    dispatcher.sync(&party_snapshot());
    renderer.borrow_mut().take_calls();

    let event = ContentReloaded::new(ContentType::Character, ["2"], "admin");
    dispatcher.on_content_reloaded(&event);

    let renderer_ref = renderer.borrow();
    let sprites = renderer_ref.sprites();
    assert_eq!(sprites.len(), 1);
    assert_eq!(sprites[0].character_id, CharacterId(2));
    drop(renderer_ref);

    renderer.borrow_mut().take_calls();
    let everyone = ContentReloaded::new(ContentType::Character, ["npc-guard"], "admin");
    dispatcher.on_content_reloaded(&everyone);
    assert_eq!(renderer.borrow().sprites().len(), 2);
}

#[test]
fn reload_while_unattached_runs_no_pass() {
    let mut dispatcher = SyncDispatcher::new(lazy());
    dispatcher.sync(&party_snapshot());
    let passes = dispatcher.stats().passes;

    let event = ContentReloaded::new(ContentType::Zone, ["marsh"], "file-watcher");
    assert!(dispatcher.on_content_reloaded(&event).is_none());
    assert_eq!(dispatcher.stats().passes, passes);

    let renderer = Rc::new(RefCell::new(RecordingRenderer::new()));
    dispatcher.on_renderer_ready(&renderer);
    assert_eq!(renderer.borrow().call_count(), 0);
}
