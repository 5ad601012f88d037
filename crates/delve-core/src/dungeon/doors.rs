//! Door placement at corridor mouths

use log::debug;

use super::helper::{HelperMap, TileKind};
use crate::entity::Entity;
use crate::grid::{Area, Pos};
use crate::rng::GameRng;

/// Corridor cells that open directly onto a room
pub fn door_candidates(map: &HelperMap) -> Vec<Pos> {
    map.cells_of(TileKind::Corridor)
        .into_iter()
        .filter(|pos| pos.neighbors().iter().any(|&n| map.is_kind(n, TileKind::Room)))
        .collect()
}

/// Put closed doors on corridor mouths.
///
/// Each candidate, in row-major order, gets a door with probability
/// `chance`. Every earlier door within Chebyshev distance `spacing` costs a
/// coin flip: heads removes the old door, tails suppresses the new one.
/// Returns the positions of the doors that survive.
pub fn place_doors(
    area: &mut Area,
    map: &HelperMap,
    chance: f64,
    spacing: i32,
    rng: &mut GameRng,
) -> Vec<Pos> {
    let mut doors: Vec<Pos> = Vec::new();
    let mut suppressed = 0;
    for pos in door_candidates(map) {
        if !rng.chance(chance) {
            continue;
        }

        let mut blocked = false;
        doors.retain(|&door| {
            if door.chebyshev(pos) > spacing {
                return true;
            }
            if rng.chance(0.5) {
                if let Some(block) = area.block_mut(door) {
                    block.remove_doors();
                }
                false
            } else {
                blocked = true;
                true
            }
        });

        if blocked {
            suppressed += 1;
        } else if area.add_entity(pos, Entity::Door { open: false }) {
            doors.push(pos);
        }
    }
    debug!("placed {} doors, {} suppressed by spacing", doors.len(), suppressed);
    doors
}
