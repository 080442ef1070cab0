//! One-way bridge from the state store to a stateful world renderer.
//!
//! The renderer draws on its own frame loop; this crate only pushes state into
//! it, and only the parts that changed. A [`SyncDispatcher`] owns a
//! [`RendererHandle`], one change detector per facet, and the field mappers
//! that translate raw snapshot shapes into renderer-native views. Hosts either
//! call [`SyncDispatcher::sync`] directly or bind the dispatcher to a
//! [`world_state::SnapshotStore`] with [`SyncBinding::bind`].
//!
//! Passes never fail. Skipped work (no renderer yet, renderer busy, content
//! that does not map) is reported in the returned [`SyncReport`] and retried
//! on the next pass.
pub mod binding;
pub mod config;
pub mod detect;
pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod logging;
pub mod mapping;
pub mod mock;
pub mod port;
pub mod report;
pub mod view;

pub use binding::SyncBinding;
pub use config::{BridgeConfig, LoggingConfig};
pub use detect::FacetDetectors;
pub use dispatcher::SyncDispatcher;
pub use error::{BridgeError, ErrorSeverity, MappingError, RosterFailure};
pub use handle::{Attachment, RendererHandle};
pub use mapping::{to_combat_view, to_sprite_descriptor, to_tile_map, try_sprite_descriptor};
pub use port::WorldRenderer;
pub use report::{SyncReport, SyncStats};
pub use view::{CombatView, EnemyView, Facing, SpriteDescriptor, TileKind, ZoneTileMap};
