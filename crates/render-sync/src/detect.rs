//! Per-facet change detection.
//!
//! Each detector remembers the value it last saw applied to the renderer and
//! reports whether an incoming value differs under that facet's equality
//! policy. Detectors only advance through `commit`, which the dispatcher
//! calls after a successful renderer mutation; a failed mapping leaves the
//! remembered value in place so the change is retried on the next pass.

use std::collections::BTreeMap;
use std::sync::Arc;

use world_state::{
    CharacterId, CharacterRecord, CombatRecord, Coordinate, FacetScope, Roster, ZoneData,
};

/// Party position, compared by value.
#[derive(Clone, Debug, Default)]
pub struct PositionDetector {
    applied: Option<Coordinate>,
}

impl PositionDetector {
    /// An absent position is never a change.
    pub fn detect(&self, incoming: Option<Coordinate>) -> Option<Coordinate> {
        let position = incoming?;
        (self.applied != Some(position)).then_some(position)
    }

    pub fn commit(&mut self, position: Coordinate) {
        self.applied = Some(position);
    }

    pub fn reset(&mut self) {
        self.applied = None;
    }

    pub fn applied(&self) -> Option<Coordinate> {
        self.applied
    }
}

/// Current zone, compared by reference.
///
/// A new `Arc` with identical contents is a change; the store replaces the
/// zone object whenever it reloads it.
#[derive(Clone, Debug, Default)]
pub struct ZoneDetector {
    applied: Option<Arc<ZoneData>>,
}

impl ZoneDetector {
    pub fn detect<'a>(&self, incoming: Option<&'a Arc<ZoneData>>) -> Option<&'a Arc<ZoneData>> {
        let zone = incoming?;
        match &self.applied {
            Some(applied) if Arc::ptr_eq(applied, zone) => None,
            _ => Some(zone),
        }
    }

    pub fn commit(&mut self, zone: &Arc<ZoneData>) {
        self.applied = Some(Arc::clone(zone));
    }

    pub fn reset(&mut self) {
        self.applied = None;
    }

    pub fn applied_zone_id(&self) -> Option<&str> {
        self.applied.as_deref().map(|zone| zone.id.as_str())
    }
}

/// Party roster, compared per character by reference.
#[derive(Clone, Debug, Default)]
pub struct RosterDetector {
    applied: BTreeMap<CharacterId, Arc<CharacterRecord>>,
}

impl RosterDetector {
    /// Returns the entries whose record object changed, in id order.
    ///
    /// Characters no longer in `incoming` are forgotten, so one that rejoins
    /// later is sent again even if its record object is unchanged.
    pub fn detect<'a>(
        &mut self,
        incoming: &'a Roster,
    ) -> Vec<(CharacterId, &'a Arc<CharacterRecord>)> {
        self.applied.retain(|id, _| incoming.contains_key(id));

        incoming
            .iter()
            .filter(|(id, record)| {
                self.applied
                    .get(*id)
                    .is_none_or(|applied| !Arc::ptr_eq(applied, record))
            })
            .map(|(id, record)| (*id, record))
            .collect()
    }

    pub fn commit(&mut self, id: CharacterId, record: &Arc<CharacterRecord>) {
        self.applied.insert(id, Arc::clone(record));
    }

    /// Forgets individual characters so their next appearance is re-sent.
    pub fn forget_members(&mut self, ids: &[CharacterId]) {
        for id in ids {
            self.applied.remove(id);
        }
    }

    pub fn reset(&mut self) {
        self.applied.clear();
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Combat state, gated on an active status and then compared by value.
#[derive(Clone, Debug, Default)]
pub struct CombatDetector {
    applied: Option<CombatRecord>,
}

impl CombatDetector {
    /// Inactive combat is never a change. Observing it clears the remembered
    /// record, so the next activation is always sent.
    pub fn detect<'a>(&mut self, incoming: &'a CombatRecord) -> Option<&'a CombatRecord> {
        if !incoming.is_active() {
            self.applied = None;
            return None;
        }
        (self.applied.as_ref() != Some(incoming)).then_some(incoming)
    }

    pub fn commit(&mut self, combat: &CombatRecord) {
        self.applied = Some(combat.clone());
    }

    pub fn reset(&mut self) {
        self.applied = None;
    }
}

/// One detector per facet.
#[derive(Clone, Debug, Default)]
pub struct FacetDetectors {
    pub position: PositionDetector,
    pub zone: ZoneDetector,
    pub roster: RosterDetector,
    pub combat: CombatDetector,
}

impl FacetDetectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the remembered values of the selected facets.
    pub fn invalidate(&mut self, scope: FacetScope) {
        if scope.contains(FacetScope::POSITION) {
            self.position.reset();
        }
        if scope.contains(FacetScope::ZONE) {
            self.zone.reset();
        }
        if scope.contains(FacetScope::ROSTER) {
            self.roster.reset();
        }
        if scope.contains(FacetScope::COMBAT) {
            self.combat.reset();
        }
    }

    pub fn reset(&mut self) {
        self.invalidate(FacetScope::ALL);
    }
}
