//! delve-core: single-floor dungeon layout generation
//!
//! A layout source produces a rough block grid. The dungeon pipeline
//! classifies every cell as wall, corridor or room, groups cells into
//! regions, builds a graph of rooms joined by corridors, cuts short cycles,
//! tunnels through rock to reach isolated rooms and finally rebuilds the grid
//! with doors, stairs, the player and room content.
//!
//! All randomness comes from one seeded [`GameRng`], so a seed fully
//! determines the level.

pub mod config;
pub mod consts;
pub mod dungeon;
pub mod entity;
pub mod error;
pub mod grid;
pub mod layout;
pub mod populate;
pub mod rng;

pub use config::{GeneratorConfig, LayoutConfig};
pub use dungeon::{GenerationStats, LevelBuilder};
pub use entity::{EnemyKind, Entity, ItemKind};
pub use error::{GenerationError, Result};
pub use grid::{Area, Block, BlockKind, Direction, Pos};
pub use layout::{FixedLayout, LayoutSource, RoomsAndTunnels};
pub use populate::{DefaultPopulation, NoPopulation, PopulationPolicy, RoomTheme};
pub use rng::GameRng;
