use std::fmt;
use std::str::FromStr;

/// Identifier of a party member, the roster key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error returned when a content id cannot be read as a [`CharacterId`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid character id: {input:?}")]
pub struct ParseCharacterIdError {
    pub input: String,
}

impl FromStr for CharacterId {
    type Err = ParseCharacterIdError;

    /// Accepts both the bare number (`"7"`) and the display form (`"#7"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ParseCharacterIdError {
                input: s.to_string(),
            })
    }
}

/// Discrete grid coordinate in zone tile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_id_parses_bare_and_display_forms() {
        assert_eq!("7".parse::<CharacterId>(), Ok(CharacterId(7)));
        assert_eq!("#12".parse::<CharacterId>(), Ok(CharacterId(12)));
        assert_eq!(" 3 ".parse::<CharacterId>(), Ok(CharacterId(3)));
    }

    #[test]
    fn character_id_rejects_non_numeric() {
        let err = "goblin-king".parse::<CharacterId>().unwrap_err();
        assert_eq!(err.input, "goblin-king");
        assert!("#".parse::<CharacterId>().is_err());
        assert!("-1".parse::<CharacterId>().is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(CharacterId(4).to_string(), "#4");
        assert_eq!(Coordinate::new(-2, 5).to_string(), "(-2, 5)");
    }
}
