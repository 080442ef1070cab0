//! Immutable application state snapshot and its facets.
//!
//! A [`StateSnapshot`] is one observation of the state store. Its four facets
//! are read independently; no cross-facet invariant is enforced here.
//!
//! Large payloads (zone data, character records) are shared behind [`Arc`] so
//! that identity can serve as the change signal: a reducer that produces a new
//! zone allocates a new `Arc`, one that leaves it untouched clones the pointer.
mod character;
mod combat;
mod common;
mod zone;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use character::CharacterRecord;
pub use combat::{CombatRecord, CombatStatus, Combatant};
pub use common::{CharacterId, Coordinate, ParseCharacterIdError};
pub use zone::{ZoneData, ZoneTiles};

/// Party roster keyed by character, each record shared by reference.
pub type Roster = BTreeMap<CharacterId, Arc<CharacterRecord>>;

/// One immutable observation of the state store.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StateSnapshot {
    /// Party location on the current zone, absent before the party is placed.
    pub party_position: Option<Coordinate>,
    /// Zone the party is in, absent while loading.
    pub current_zone: Option<Arc<ZoneData>>,
    pub party_members: Roster,
    pub combat_state: CombatRecord,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the party position (builder pattern).
    #[must_use]
    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.party_position = Some(position);
        self
    }

    /// Replaces the current zone reference (builder pattern).
    #[must_use]
    pub fn with_zone(mut self, zone: Arc<ZoneData>) -> Self {
        self.current_zone = Some(zone);
        self
    }

    /// Inserts or replaces one roster entry (builder pattern).
    #[must_use]
    pub fn with_member(mut self, id: CharacterId, record: Arc<CharacterRecord>) -> Self {
        self.party_members.insert(id, record);
        self
    }

    /// Replaces the combat record (builder pattern).
    #[must_use]
    pub fn with_combat(mut self, combat: CombatRecord) -> Self {
        self.combat_state = combat;
        self
    }

    pub fn member(&self, id: CharacterId) -> Option<&Arc<CharacterRecord>> {
        self.party_members.get(&id)
    }
}
