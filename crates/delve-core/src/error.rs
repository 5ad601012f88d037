//! Generation errors
//!
//! Every stage reports broken invariants through [`GenerationError`] instead of
//! panicking; a failed `build_level` leaves no partial level behind.

use thiserror::Error;

use crate::grid::Pos;

/// Level generation errors
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(
        "area {width}x{height} is too small, at least {min_width}x{min_height} is required"
    )]
    AreaTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no room survived generation")]
    EmptyRoomGraph,

    #[error("corridor {corridor} touches room {room} which has no graph entry")]
    MissingAdjacency { corridor: Pos, room: Pos },

    #[error("anchor {0} is not a node of the room graph")]
    UnknownAnchor(Pos),

    #[error("no cell available for the player in room {0}")]
    NoSpawnCell(Pos),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GenerationError>;
