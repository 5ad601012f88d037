//! Generation constants

/// Default floor dimensions
pub const AREA_WIDTH: usize = 70;
pub const AREA_HEIGHT: usize = 40;

/// Smallest grid that can still hold a room
pub const MIN_AREA_WIDTH: usize = 5;
pub const MIN_AREA_HEIGHT: usize = 5;

/// Longest cycle (in edges) removed by the cycle breaker
pub const MAX_CYCLE_LENGTH: usize = 3;

/// How far a carved corridor keeps away from existing rooms and corridors,
/// measured perpendicular to the dig direction
pub const CORRIDOR_CLEARANCE: i32 = 2;

/// Default probability that a corridor mouth receives a door
pub const DOOR_CHANCE: f64 = 0.9;

/// Minimum Chebyshev distance kept between two doors
pub const DOOR_SPACING: i32 = 3;

/// Map symbols
pub const S_WALL: char = '#';
pub const S_FLOOR: char = '.';
pub const S_DOOR_CLOSED: char = '+';
pub const S_DOOR_OPEN: char = '\'';
pub const S_PLAYER: char = '@';
pub const S_STAIRS_DOWN: char = '>';
pub const S_STAIRS_UP: char = '<';
pub const S_CHEST: char = '=';
