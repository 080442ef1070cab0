//! Outcome of synchronization passes.

use world_state::FacetScope;

use crate::error::{MappingError, RosterFailure};

/// What one synchronization pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncReport {
    /// No live renderer was available, so nothing was evaluated.
    pub deferred: bool,
    /// The renderer was attached but already borrowed elsewhere.
    pub renderer_busy: bool,
    /// Facets that issued at least one renderer mutation.
    pub applied: FacetScope,
    /// Number of renderer mutations issued.
    pub mutations: usize,
    pub sprites_updated: usize,
    pub zone_failure: Option<MappingError>,
    pub roster_failures: Vec<RosterFailure>,
}

impl SyncReport {
    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    pub fn busy() -> Self {
        Self {
            deferred: true,
            renderer_busy: true,
            ..Self::default()
        }
    }

    /// Facets that were skipped because their data failed to map.
    pub fn failed(&self) -> FacetScope {
        let mut failed = FacetScope::empty();
        if self.zone_failure.is_some() {
            failed |= FacetScope::ZONE;
        }
        if !self.roster_failures.is_empty() {
            failed |= FacetScope::ROSTER;
        }
        failed
    }

    pub fn has_failures(&self) -> bool {
        !self.failed().is_empty()
    }

    pub(crate) fn record(&mut self, facet: FacetScope) {
        self.applied |= facet;
        self.mutations += 1;
    }
}

/// Cumulative counters across every pass of a dispatcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub passes: u64,
    pub deferred_passes: u64,
    pub busy_passes: u64,
    pub position_updates: u64,
    pub tile_map_updates: u64,
    pub sprite_updates: u64,
    pub combat_updates: u64,
    pub mapping_failures: u64,
    pub roster_failures: u64,
}

impl SyncStats {
    pub fn record(&mut self, report: &SyncReport) {
        self.passes += 1;
        if report.renderer_busy {
            self.busy_passes += 1;
        }
        if report.deferred {
            self.deferred_passes += 1;
            return;
        }

        if report.applied.contains(FacetScope::POSITION) {
            self.position_updates += 1;
        }
        if report.applied.contains(FacetScope::ZONE) {
            self.tile_map_updates += 1;
        }
        if report.applied.contains(FacetScope::COMBAT) {
            self.combat_updates += 1;
        }
        self.sprite_updates += report.sprites_updated as u64;

        if report.zone_failure.is_some() {
            self.mapping_failures += 1;
        }
        self.mapping_failures += report.roster_failures.len() as u64;
        self.roster_failures += report.roster_failures.len() as u64;
    }

    pub fn total_mutations(&self) -> u64 {
        self.position_updates + self.tile_map_updates + self.sprite_updates + self.combat_updates
    }
}
