use std::fmt;

use strum::EnumString;

use super::common::{CharacterId, Coordinate};

/// Combat lifecycle status as reported by the state store.
///
/// The store carries the status as a lowercase string; names outside the
/// known set are preserved in [`CombatStatus::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum CombatStatus {
    #[default]
    Idle,
    Active,
    Victory,
    Defeat,
    Fled,
    #[strum(default)]
    Other(String),
}

impl CombatStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Victory => "victory",
            Self::Defeat => "defeat",
            Self::Fled => "fled",
            Self::Other(name) => name,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for CombatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CombatStatus {
    fn from(value: String) -> Self {
        // `strum(default)` makes parsing infallible.
        value.parse().unwrap_or(Self::Other(value))
    }
}

impl From<CombatStatus> for String {
    fn from(value: CombatStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One enemy participant in an encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Combatant {
    pub id: CharacterId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub position: Coordinate,
}

/// Combat facet of the state store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CombatRecord {
    pub status: CombatStatus,
    pub round: u32,
    pub turn_order: Vec<CharacterId>,
    pub active_combatant: Option<CharacterId>,
    pub enemies: Vec<Combatant>,
}

impl CombatRecord {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn active(round: u32) -> Self {
        Self {
            status: CombatStatus::Active,
            round,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    #[must_use]
    pub fn with_turn_order(mut self, order: Vec<CharacterId>) -> Self {
        self.active_combatant = order.first().copied();
        self.turn_order = order;
        self
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: Combatant) -> Self {
        self.enemies.push(enemy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_and_unknown_names() {
        assert_eq!("active".parse::<CombatStatus>().unwrap(), CombatStatus::Active);
        assert_eq!("idle".parse::<CombatStatus>().unwrap(), CombatStatus::Idle);
        assert_eq!(
            CombatStatus::from("ambush".to_string()),
            CombatStatus::Other("ambush".into())
        );
    }

    #[test]
    fn status_round_trips_through_string() {
        let other = CombatStatus::Other("parley".into());
        assert_eq!(String::from(other.clone()), "parley");
        assert_eq!(CombatStatus::from(String::from(CombatStatus::Fled)), CombatStatus::Fled);
        assert_eq!(other.to_string(), "parley");
    }

    #[test]
    fn only_active_status_is_active() {
        assert!(CombatRecord::active(1).is_active());
        assert!(!CombatRecord::idle().is_active());
        assert!(!CombatStatus::Other("active-ish".into()).is_active());
    }

    #[test]
    fn turn_order_sets_active_combatant() {
        let record = CombatRecord::active(2).with_turn_order(vec![CharacterId(3), CharacterId(1)]);
        assert_eq!(record.active_combatant, Some(CharacterId(3)));
    }
}
