//! Recording renderer for headless testing of the bridge.
//!
//! `RecordingRenderer` implements [`WorldRenderer`] by appending every
//! mutation to a call log. Use it to assert which mutations a pass issued and
//! in what order.

use std::cell::Cell;
use std::rc::Rc;

use world_state::Coordinate;

use crate::port::WorldRenderer;
use crate::view::{CombatView, SpriteDescriptor, ZoneTileMap};

/// One mutation received by a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RendererCall {
    PartyPosition(Coordinate),
    TileMap(ZoneTileMap),
    CharacterSprite(SpriteDescriptor),
    CombatState(CombatView),
}

impl RendererCall {
    pub fn is_tile_map(&self) -> bool {
        matches!(self, Self::TileMap(_))
    }

    pub fn is_sprite(&self) -> bool {
        matches!(self, Self::CharacterSprite(_))
    }
}

/// Camera sub-object of the recording renderer.
#[derive(Debug, Default)]
pub struct MockCamera {
    /// Number of times a host nudged the camera through the cached handle.
    pub shakes: Cell<u32>,
}

/// Tile layer sub-object of the recording renderer.
#[derive(Debug, Default)]
pub struct MockTileLayer {
    pub highlighted: Cell<Option<Coordinate>>,
}

/// Mock world renderer for tests.
#[derive(Debug)]
pub struct RecordingRenderer {
    calls: Vec<RendererCall>,
    camera: Option<Rc<MockCamera>>,
    tile_layer: Option<Rc<MockTileLayer>>,
    camera_requests: Cell<u32>,
}

impl RecordingRenderer {
    /// Renderer with a camera and a tile layer.
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            camera: Some(Rc::new(MockCamera::default())),
            tile_layer: Some(Rc::new(MockTileLayer::default())),
            camera_requests: Cell::new(0),
        }
    }

    /// Renderer that has not created its camera or tile layer.
    pub fn without_camera() -> Self {
        Self {
            camera: None,
            tile_layer: None,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> &[RendererCall] {
        &self.calls
    }

    /// Returns and clears the call log.
    pub fn take_calls(&mut self) -> Vec<RendererCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// How many times the bridge asked for the camera.
    pub fn camera_requests(&self) -> u32 {
        self.camera_requests.get()
    }

    pub fn positions(&self) -> Vec<Coordinate> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RendererCall::PartyPosition(position) => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn tile_maps(&self) -> Vec<&ZoneTileMap> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RendererCall::TileMap(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    pub fn sprites(&self) -> Vec<&SpriteDescriptor> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RendererCall::CharacterSprite(sprite) => Some(sprite),
                _ => None,
            })
            .collect()
    }

    pub fn combat_views(&self) -> Vec<&CombatView> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RendererCall::CombatState(view) => Some(view),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldRenderer for RecordingRenderer {
    type Camera = MockCamera;
    type TileLayer = MockTileLayer;

    fn camera(&self) -> Option<Rc<MockCamera>> {
        self.camera_requests.set(self.camera_requests.get() + 1);
        self.camera.clone()
    }

    fn tile_layer(&self) -> Option<Rc<MockTileLayer>> {
        self.tile_layer.clone()
    }

    fn update_party_position(&mut self, position: Coordinate) {
        self.calls.push(RendererCall::PartyPosition(position));
    }

    fn update_tile_map(&mut self, tile_map: &ZoneTileMap) {
        self.calls.push(RendererCall::TileMap(tile_map.clone()));
    }

    fn update_character_sprite(&mut self, sprite: &SpriteDescriptor) {
        self.calls.push(RendererCall::CharacterSprite(sprite.clone()));
    }

    fn update_combat_state(&mut self, combat: &CombatView) {
        self.calls.push(RendererCall::CombatState(combat.clone()));
    }
}
