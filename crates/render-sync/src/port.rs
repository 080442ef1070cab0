//! Renderer port: the capabilities the bridge needs from a rendering engine.

use std::rc::Rc;

use world_state::Coordinate;

use crate::view::{CombatView, SpriteDescriptor, ZoneTileMap};

/// Mutation surface of a long-lived, stateful world renderer.
///
/// The engine owns its frame loop and draws whenever it likes; the bridge
/// only pushes state into it. Calls are fire-and-forget: implementations
/// should queue or apply the change and return without waiting for a frame.
///
/// # Sub-objects
///
/// The camera and the tile layer are engine-owned objects that hosts want
/// direct access to (camera shake, tile highlighting). The bridge resolves
/// them once at attach time and hands out the cached references.
pub trait WorldRenderer {
    /// Engine camera type.
    type Camera: ?Sized;

    /// Engine tile layer type.
    type TileLayer: ?Sized;

    /// Camera sub-object, if the engine has created one.
    fn camera(&self) -> Option<Rc<Self::Camera>>;

    /// Tile layer sub-object. Engines that draw tiles internally return `None`.
    fn tile_layer(&self) -> Option<Rc<Self::TileLayer>> {
        None
    }

    fn update_party_position(&mut self, position: Coordinate);

    fn update_tile_map(&mut self, tile_map: &ZoneTileMap);

    fn update_character_sprite(&mut self, sprite: &SpriteDescriptor);

    fn update_combat_state(&mut self, combat: &CombatView);
}
