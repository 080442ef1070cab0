//! Application state shapes observed by the renderer bridge.
//!
//! `world-state` owns the state-store side of the client: the immutable
//! [`StateSnapshot`] with its four independent facets (party position,
//! current zone, party roster, combat), the [`FacetScope`] bit set naming
//! those facets, the development [`ContentReloaded`] notice, and a
//! single-threaded [`SnapshotStore`] that delivers facet-scoped change
//! notifications to subscribers.
//!
//! Nothing in this crate knows about renderers; `render-sync` consumes these
//! types read-only.
pub mod content;
pub mod facet;
pub mod snapshot;
pub mod store;

pub use content::{ContentReloaded, ContentType};
pub use facet::FacetScope;
pub use snapshot::{
    CharacterId, CharacterRecord, CombatRecord, CombatStatus, Combatant, Coordinate,
    ParseCharacterIdError, Roster, StateSnapshot, ZoneData, ZoneTiles,
};
pub use store::{SnapshotStore, Subscription, SubscriptionId};
