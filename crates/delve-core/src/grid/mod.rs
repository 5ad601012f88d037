//! Block grid
//!
//! Coordinates, directions, blocks and the area that holds them.

mod area;
mod block;
mod pos;

pub use area::Area;
pub use block::{Block, BlockKind};
pub use pos::{Blocked, Direction, Pos};
