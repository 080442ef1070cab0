use super::common::{CharacterId, Coordinate};

/// Raw party member record as held by the state store.
///
/// Every field may be absent: records are assembled incrementally from
/// server updates and authored content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CharacterRecord {
    pub id: Option<CharacterId>,
    pub name: Option<String>,
    pub class: Option<String>,
    /// Explicit sprite sheet key, overriding the class-derived one.
    pub sprite: Option<String>,
    pub position: Option<Coordinate>,
    pub hp: Option<i32>,
    pub max_hp: Option<i32>,
    pub facing: Option<String>,
}

impl CharacterRecord {
    pub fn new(id: CharacterId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self, hp: i32, max_hp: i32) -> Self {
        self.hp = Some(hp);
        self.max_hp = Some(max_hp);
        self
    }

    #[must_use]
    pub fn with_facing(mut self, facing: impl Into<String>) -> Self {
        self.facing = Some(facing.into());
        self
    }
}
