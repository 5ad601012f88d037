//! Dungeon pipeline
//!
//! Classification, region labeling, room graph construction, short-cycle
//! removal, reconnection and final level assembly.

mod builder;
mod cycles;
mod distance;
mod doors;
mod graph;
mod helper;
mod reconnect;
mod region;

pub use builder::{GenerationStats, LevelBuilder, Topology, repair_topology};
pub use cycles::{Cycle, break_short_cycles, find_short_cycles};
pub use distance::DistanceField;
pub use doors::{door_candidates, place_doors};
pub use graph::{RegionEdge, RoomGraph, build_room_graph};
pub use helper::{HelperMap, HelperTile, TileKind, classify, classify_mask};
pub use reconnect::{ReconnectReport, reconnect};
pub use region::{Region, assign_anchors, flood_region, region_cells};
