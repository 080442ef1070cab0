//! Error taxonomy for the synchronization bridge.
//!
//! Nothing in a synchronization pass is fatal. Mapping errors are classified
//! so callers can tell "retry next cycle" apart from "fix the content", but
//! both end the same way inside the bridge: the facet (or roster entry) is
//! skipped, counted, logged, and retried on the next notification.
//!
//! An unattached renderer is deliberately absent from this module: it is a
//! normal state, reported through [`crate::SyncReport::deferred`].

use world_state::CharacterId;

/// Severity level of a bridge error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Data may still be arriving; the same input may map on a later cycle.
    ///
    /// Examples: zone tiles not streamed yet, dimensions missing
    Recoverable,

    /// The data is present but inconsistent; it will keep failing until the
    /// store holds corrected content.
    ///
    /// Examples: grid size mismatch, roster key disagreeing with record id
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common interface for bridge errors.
pub trait BridgeError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code for logs and diagnostics.
    fn error_code(&self) -> &'static str;
}

/// Raw facet data could not be translated into its renderer-native shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// The zone carries no tile grid.
    #[error("zone {zone_id:?} has no tiles")]
    MissingTiles { zone_id: String },

    /// The tile grid lacks a width or height.
    #[error("zone {zone_id:?} tile grid is missing its dimensions")]
    MissingDimensions { zone_id: String },

    /// Width or height is zero.
    #[error("zone {zone_id:?} tile grid is empty ({width}x{height})")]
    EmptyGrid {
        zone_id: String,
        width: u32,
        height: u32,
    },

    /// Cell count does not match the declared dimensions.
    #[error("zone {zone_id:?} expects {expected} cells ({width}x{height}) but has {actual}")]
    GridSizeMismatch {
        zone_id: String,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The record names a different character than its roster key.
    #[error("roster entry {key} holds a record for {record_id}")]
    RosterKeyMismatch {
        key: CharacterId,
        record_id: CharacterId,
    },

    /// Hit points are outside `0..=max_hp` or `max_hp` is not positive.
    #[error("character {character} has invalid hit points {hp}/{max_hp}")]
    InvalidHitPoints {
        character: CharacterId,
        hp: i32,
        max_hp: i32,
    },
}

impl BridgeError for MappingError {
    fn severity(&self) -> ErrorSeverity {
        use MappingError::*;
        match self {
            // Partially streamed zones fill these in later
            MissingTiles { .. } | MissingDimensions { .. } => ErrorSeverity::Recoverable,

            EmptyGrid { .. }
            | GridSizeMismatch { .. }
            | RosterKeyMismatch { .. }
            | InvalidHitPoints { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use MappingError::*;
        match self {
            MissingTiles { .. } => "MAPPING_MISSING_TILES",
            MissingDimensions { .. } => "MAPPING_MISSING_DIMENSIONS",
            EmptyGrid { .. } => "MAPPING_EMPTY_GRID",
            GridSizeMismatch { .. } => "MAPPING_GRID_SIZE_MISMATCH",
            RosterKeyMismatch { .. } => "MAPPING_ROSTER_KEY_MISMATCH",
            InvalidHitPoints { .. } => "MAPPING_INVALID_HIT_POINTS",
        }
    }
}

/// One roster entry that could not be mapped during a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterFailure {
    pub character: CharacterId,
    pub error: MappingError,
}
