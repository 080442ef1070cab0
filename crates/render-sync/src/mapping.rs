//! Field mappers: raw state-store shapes to renderer-native shapes.
//!
//! Every function here is pure. No logging, no renderer access; failures are
//! returned to the dispatcher, which decides how loudly to report them.

use world_state::{CharacterId, CharacterRecord, CombatRecord, Combatant, Coordinate, ZoneData};

use crate::error::MappingError;
use crate::view::{CombatView, EnemyView, SpriteDescriptor, TileKind, ZoneTileMap};

/// Sprite sheet used when a record names neither a sprite nor a class.
pub const DEFAULT_SPRITE_KEY: &str = "default";

/// Validates a zone's raw tile grid and converts it into a [`ZoneTileMap`].
pub fn to_tile_map(zone: &ZoneData) -> Result<ZoneTileMap, MappingError> {
    let zone_id = || zone.id.clone();

    let tiles = zone
        .tiles
        .as_ref()
        .ok_or_else(|| MappingError::MissingTiles { zone_id: zone_id() })?;

    let (Some(width), Some(height)) = (tiles.width, tiles.height) else {
        return Err(MappingError::MissingDimensions { zone_id: zone_id() });
    };

    if width == 0 || height == 0 {
        return Err(MappingError::EmptyGrid {
            zone_id: zone_id(),
            width,
            height,
        });
    }

    // Overflows on 32-bit hosts for very large grids; no cell list can match.
    let expected = (width as usize).checked_mul(height as usize);
    if expected != Some(tiles.cells.len()) {
        return Err(MappingError::GridSizeMismatch {
            zone_id: zone_id(),
            width,
            height,
            expected: expected.unwrap_or(usize::MAX),
            actual: tiles.cells.len(),
        });
    }

    Ok(ZoneTileMap {
        zone_id: zone_id(),
        width,
        height,
        tiles: tiles.cells.iter().map(|name| TileKind::from_name(name)).collect(),
    })
}

/// Converts a roster entry into a sprite descriptor.
///
/// Total: absent or unrecognized fields fall back to descriptor defaults.
pub fn to_sprite_descriptor(key: CharacterId, record: &CharacterRecord) -> SpriteDescriptor {
    let label = record
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string());

    let sprite_key = record
        .sprite
        .as_deref()
        .or(record.class.as_deref())
        .map(|key| key.trim().to_ascii_lowercase())
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| DEFAULT_SPRITE_KEY.to_string());

    let facing = record
        .facing
        .as_deref()
        .and_then(|facing| facing.trim().parse().ok())
        .unwrap_or_default();

    SpriteDescriptor {
        character_id: key,
        label,
        sprite_key,
        position: record.position.unwrap_or(Coordinate::ORIGIN),
        facing,
        health_ratio: health_ratio(record.hp, record.max_hp),
    }
}

/// Validates a roster entry, then maps it with [`to_sprite_descriptor`].
///
/// A record is malformed when it names a different character than its roster
/// key, or when both hit point fields are present but inconsistent.
pub fn try_sprite_descriptor(
    key: CharacterId,
    record: &CharacterRecord,
) -> Result<SpriteDescriptor, MappingError> {
    if let Some(record_id) = record.id
        && record_id != key
    {
        return Err(MappingError::RosterKeyMismatch { key, record_id });
    }

    if let (Some(hp), Some(max_hp)) = (record.hp, record.max_hp)
        && (max_hp <= 0 || !(0..=max_hp).contains(&hp))
    {
        return Err(MappingError::InvalidHitPoints {
            character: key,
            hp,
            max_hp,
        });
    }

    Ok(to_sprite_descriptor(key, record))
}

/// Converts a combat record into the overlay view.
pub fn to_combat_view(combat: &CombatRecord) -> CombatView {
    CombatView {
        round: combat.round,
        active_combatant: combat.active_combatant,
        turn_order: combat.turn_order.clone(),
        enemies: combat.enemies.iter().map(enemy_view).collect(),
    }
}

fn enemy_view(enemy: &Combatant) -> EnemyView {
    EnemyView {
        id: enemy.id,
        name: enemy.name.clone(),
        position: enemy.position,
        health_ratio: health_ratio(Some(enemy.hp), Some(enemy.max_hp)),
    }
}

fn health_ratio(hp: Option<i32>, max_hp: Option<i32>) -> f32 {
    match (hp, max_hp) {
        (Some(hp), Some(max_hp)) if max_hp > 0 => (hp as f32 / max_hp as f32).clamp(0.0, 1.0),
        _ => 1.0,
    }
}
