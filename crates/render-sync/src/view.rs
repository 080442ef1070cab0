//! Renderer-native shapes derived from state-store facets.
//!
//! These are what the renderer port consumes. They serialize so that
//! script-side renderers (canvas/webview) can receive them as JSON.

use serde::Serialize;
use strum::{AsRefStr, EnumString};
use world_state::{CharacterId, Coordinate};

/// Terrain of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumString, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Floor,
    Wall,
    Water,
    Door,
    Grass,
    #[default]
    Void,
}

impl TileKind {
    /// Parses an authored terrain name; unknown names render as [`TileKind::Void`].
    pub fn from_name(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Door | Self::Grass)
    }
}

/// Validated tile grid for one zone, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTileMap {
    pub zone_id: String,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileKind>,
}

impl ZoneTileMap {
    pub fn tile(&self, x: u32, y: u32) -> Option<TileKind> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }
}

/// Direction a sprite faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumString, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    North,
    East,
    #[default]
    South,
    West,
}

/// Everything the renderer needs to draw one party member.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteDescriptor {
    pub character_id: CharacterId,
    pub label: String,
    pub sprite_key: String,
    pub position: Coordinate,
    pub facing: Facing,
    /// Remaining health in `0.0..=1.0`; full when unknown.
    pub health_ratio: f32,
}

/// One enemy as drawn in the combat overlay.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyView {
    pub id: CharacterId,
    pub name: String,
    pub position: Coordinate,
    pub health_ratio: f32,
}

/// Combat overlay state, produced only while combat is active.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatView {
    pub round: u32,
    pub active_combatant: Option<CharacterId>,
    pub turn_order: Vec<CharacterId>,
    pub enemies: Vec<EnemyView>,
}
