//! Facet selection and cheap store-side change classification.

use std::sync::Arc;

use bitflags::bitflags;

use crate::snapshot::{Roster, StateSnapshot};

bitflags! {
    /// Names the independently tracked slices of a [`StateSnapshot`].
    ///
    /// Used both as a subscription selector and to report which facets a
    /// notification touched.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FacetScope: u8 {
        /// Party position changed.
        const POSITION = 1 << 0;

        /// Current zone reference changed.
        const ZONE     = 1 << 1;

        /// Roster membership or a member record reference changed.
        const ROSTER   = 1 << 2;

        /// Combat record changed.
        const COMBAT   = 1 << 3;

        /// Every facet.
        const ALL = Self::POSITION.bits()
                  | Self::ZONE.bits()
                  | Self::ROSTER.bits()
                  | Self::COMBAT.bits();
    }
}

impl FacetScope {
    /// Facets whose selected value differs between two snapshots.
    ///
    /// Position and combat compare by value, the zone by `Arc` identity, the
    /// roster by key set and per-key `Arc` identity. These are the same
    /// signals the bridge's detectors use, minus the combat gating, which is a
    /// consumer concern.
    pub fn changed_between(old: &StateSnapshot, new: &StateSnapshot) -> Self {
        let mut scope = Self::empty();

        if old.party_position != new.party_position {
            scope |= Self::POSITION;
        }

        let zone_same = match (&old.current_zone, &new.current_zone) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if !zone_same {
            scope |= Self::ZONE;
        }

        if !roster_identical(&old.party_members, &new.party_members) {
            scope |= Self::ROSTER;
        }

        if old.combat_state != new.combat_state {
            scope |= Self::COMBAT;
        }

        scope
    }
}

impl Default for FacetScope {
    fn default() -> Self {
        Self::empty()
    }
}

fn roster_identical(old: &Roster, new: &Roster) -> bool {
    old.len() == new.len()
        && old
            .iter()
            .zip(new.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && Arc::ptr_eq(va, vb))
}
