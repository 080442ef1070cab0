//! Synchronization passes from state snapshots to the renderer.
//!
//! A pass evaluates facets in a fixed order: position, zone, roster, combat.
//! The zone's tile map therefore always lands before sprites that may be
//! positioned on it. Each facet (and each roster entry) is independent: a
//! mapping failure skips that facet only and leaves its detector untouched,
//! so the change is retried on the next pass.

use std::cell::RefCell;
use std::rc::Rc;

use world_state::{ContentReloaded, ContentType, FacetScope, StateSnapshot};

use crate::config::BridgeConfig;
use crate::detect::FacetDetectors;
use crate::error::{BridgeError, MappingError, RosterFailure};
use crate::handle::RendererHandle;
use crate::mapping::{to_combat_view, to_tile_map, try_sprite_descriptor};
use crate::port::WorldRenderer;
use crate::report::{SyncReport, SyncStats};

/// Pushes state snapshots into a [`WorldRenderer`].
pub struct SyncDispatcher<R: WorldRenderer> {
    config: BridgeConfig,
    handle: RendererHandle<R>,
    detectors: FacetDetectors,
    latest: Option<StateSnapshot>,
    initialized: bool,
    stats: SyncStats,
}

impl<R: WorldRenderer> SyncDispatcher<R> {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            handle: RendererHandle::new(),
            detectors: FacetDetectors::new(),
            latest: None,
            initialized: false,
            stats: SyncStats::default(),
        }
    }

    /// Runs one pass against `snapshot`.
    ///
    /// The snapshot is remembered as the latest seen even when no renderer is
    /// attached, so that a later attach can catch up.
    pub fn sync(&mut self, snapshot: &StateSnapshot) -> SyncReport {
        self.latest = Some(snapshot.clone());
        self.run_pass(snapshot)
    }

    /// Attaches a freshly created renderer.
    ///
    /// Every detector is reset because the new renderer holds none of the
    /// previous one's state. With `resync_on_attach`, the latest snapshot is
    /// applied immediately; returns `None` when no pass ran.
    pub fn on_renderer_ready(&mut self, renderer: &Rc<RefCell<R>>) -> Option<SyncReport> {
        self.handle.attach(renderer);
        self.detectors.reset();
        self.initialized = true;

        tracing::info!(
            resync = self.config.resync_on_attach,
            has_snapshot = self.latest.is_some(),
            "renderer ready"
        );

        if !self.config.resync_on_attach {
            return None;
        }
        let snapshot = self.latest.clone()?;
        Some(self.run_pass(&snapshot))
    }

    /// Host teardown hook.
    pub fn on_renderer_lost(&mut self) {
        self.handle.detach();
    }

    /// Forces re-application of reloaded content.
    ///
    /// Zone reloads invalidate the zone facet. Character reloads forget the
    /// named roster entries, or the whole roster when no id parses.
    pub fn on_content_reloaded(&mut self, event: &ContentReloaded) -> Option<SyncReport> {
        match &event.content_type {
            ContentType::Zone => self.detectors.invalidate(FacetScope::ZONE),
            ContentType::Character => {
                let ids = event.character_ids();
                if ids.is_empty() {
                    self.detectors.invalidate(FacetScope::ROSTER);
                } else {
                    self.detectors.roster.forget_members(&ids);
                }
            }
            ContentType::Other(kind) => {
                tracing::debug!(kind = %kind, "ignoring reload of unsynchronized content");
                return None;
            }
        }

        tracing::info!(
            content_type = %event.content_type,
            count = event.count(),
            source = %event.source,
            "content reloaded"
        );

        if !self.handle.is_attached() {
            return None;
        }
        let snapshot = self.latest.clone()?;
        Some(self.run_pass(&snapshot))
    }

    pub fn renderer(&self) -> Option<Rc<RefCell<R>>> {
        self.handle.current()
    }

    pub fn camera(&self) -> Option<Rc<R::Camera>> {
        self.handle.camera()
    }

    pub fn tile_layer(&self) -> Option<Rc<R::TileLayer>> {
        self.handle.tile_layer()
    }

    pub fn handle(&self) -> &RendererHandle<R> {
        &self.handle
    }

    /// Whether a renderer has ever signalled readiness.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn latest(&self) -> Option<&StateSnapshot> {
        self.latest.as_ref()
    }

    fn run_pass(&mut self, snapshot: &StateSnapshot) -> SyncReport {
        let report = if !self.handle.is_attached() {
            tracing::trace!("renderer unattached; sync deferred");
            SyncReport::deferred()
        } else {
            self.handle
                .with_renderer(|engine| apply_changes(engine, &mut self.detectors, snapshot))
                .unwrap_or_else(SyncReport::busy)
        };

        self.log_failures(&report);
        self.stats.record(&report);

        if report.mutations > 0 {
            tracing::debug!(
                facets = ?report.applied,
                mutations = report.mutations,
                sprites = report.sprites_updated,
                "sync pass applied"
            );
        }
        report
    }

    fn log_failures(&self, report: &SyncReport) {
        if let Some(error) = &report.zone_failure {
            self.log_mapping_failure("zone", None, error);
        }
        for RosterFailure { character, error } in &report.roster_failures {
            self.log_mapping_failure("roster", Some(character.0), error);
        }
    }

    fn log_mapping_failure(&self, facet: &str, character: Option<u32>, error: &MappingError) {
        let code = error.error_code();
        let severity = error.severity().as_str();
        if self.config.quiet_mapping_failures {
            tracing::debug!(facet, character, code, severity, %error, "mapping failed; skipped");
        } else {
            tracing::warn!(facet, character, code, severity, %error, "mapping failed; skipped");
        }
    }
}

impl<R: WorldRenderer> Default for SyncDispatcher<R> {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

/// Evaluates every facet against the renderer in the fixed order.
fn apply_changes<R: WorldRenderer>(
    engine: &mut R,
    detectors: &mut FacetDetectors,
    snapshot: &StateSnapshot,
) -> SyncReport {
    let mut report = SyncReport::default();

    if let Some(position) = detectors.position.detect(snapshot.party_position) {
        engine.update_party_position(position);
        detectors.position.commit(position);
        report.record(FacetScope::POSITION);
    }

    if let Some(zone) = detectors.zone.detect(snapshot.current_zone.as_ref()) {
        match to_tile_map(zone) {
            Ok(tile_map) => {
                engine.update_tile_map(&tile_map);
                detectors.zone.commit(zone);
                report.record(FacetScope::ZONE);
            }
            Err(error) => report.zone_failure = Some(error),
        }
    }

    for (character, record) in detectors.roster.detect(&snapshot.party_members) {
        match try_sprite_descriptor(character, record) {
            Ok(sprite) => {
                engine.update_character_sprite(&sprite);
                detectors.roster.commit(character, record);
                report.record(FacetScope::ROSTER);
                report.sprites_updated += 1;
            }
            Err(error) => report.roster_failures.push(RosterFailure { character, error }),
        }
    }

    if let Some(combat) = detectors.combat.detect(&snapshot.combat_state) {
        engine.update_combat_state(&to_combat_view(combat));
        detectors.combat.commit(combat);
        report.record(FacetScope::COMBAT);
    }

    report
}
