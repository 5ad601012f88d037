//! Forced reconnection of disconnected room clusters
//!
//! Starting from one random room, straight corridors are tunnelled through
//! solid wall towards rooms not yet reachable. Whatever is still cut off at the
//! end is filled in.

use hashbrown::HashSet;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::graph::RoomGraph;
use super::helper::{HelperMap, HelperTile, TileKind};
use super::region::flood_region;
use crate::consts::CORRIDOR_CLEARANCE;
use crate::error::{GenerationError, Result};
use crate::grid::{Direction, Pos};
use crate::rng::GameRng;

/// What the reconnector changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconnectReport {
    /// Anchors of the corridors carved through wall
    pub carved: Vec<Pos>,
    /// Room anchors dropped because nothing could reach them
    pub discarded: Vec<Pos>,
}

/// True when a tunnel cell at `pos` heading `dir` would run alongside open
/// ground within the clearance distance.
fn crowded(map: &HelperMap, pos: Pos, dir: Direction) -> bool {
    dir.perpendicular().into_iter().any(|side| {
        (1..=CORRIDOR_CLEARANCE).any(|n| {
            matches!(
                map.kind(pos.step_n(side, n)),
                Some(TileKind::Room | TileKind::Corridor)
            )
        })
    })
}

/// Walk from `start` through wall in `dir`.
///
/// Returns the wall cells crossed and the room cell the walk ended on, or
/// `None` if it ran into a corridor, left the grid or lacked clearance.
fn tunnel(map: &HelperMap, start: Pos, dir: Direction) -> Option<(Vec<Pos>, Pos)> {
    let mut cells = Vec::new();
    let mut cur = start.step(dir);
    loop {
        match map.kind(cur)? {
            TileKind::Room => return Some((cells, cur)),
            TileKind::Corridor => return None,
            TileKind::Wall => {
                if crowded(map, cur, dir) {
                    return None;
                }
                cells.push(cur);
                cur = cur.step(dir);
            }
        }
    }
}

/// Mark every room cell reachable from `start` (through corridors) as
/// connected and queue the new ones.
fn absorb(map: &HelperMap, start: Pos, connected: &mut HashSet<Pos>, work: &mut Vec<Pos>) {
    for cell in flood_region(map, start, true).members {
        if map.is_kind(cell, TileKind::Room) && connected.insert(cell) {
            work.push(cell);
        }
    }
}

/// Join every room reachable by straight tunnels into one component and
/// discard the rest.
pub fn reconnect(map: &mut HelperMap, graph: &mut RoomGraph, rng: &mut GameRng) -> Result<ReconnectReport> {
    let mut report = ReconnectReport::default();
    let rooms = graph.room_list();
    let Some(&seed) = rng.choose(&rooms) else {
        return Ok(report);
    };

    let mut connected: HashSet<Pos> = HashSet::new();
    let mut work = Vec::new();
    absorb(map, seed, &mut connected, &mut work);

    while !work.is_empty() {
        let tile = work.swap_remove(rng.index(work.len()));
        let room = map.anchor(tile).unwrap_or(tile);
        if !graph.contains(room) {
            return Err(GenerationError::UnknownAnchor(room));
        }

        for dir in Direction::ALL {
            let Some((cells, dest)) = tunnel(map, tile, dir) else {
                continue;
            };
            if connected.contains(&dest) {
                continue;
            }

            if let Some(&corridor) = cells.first() {
                for &cell in &cells {
                    map.set(cell, HelperTile::anchored(TileKind::Corridor, corridor));
                }
                let dest_room = map.anchor(dest).unwrap_or(dest);
                graph.add_edge(room, corridor, dest_room)?;
                trace!("carved {} cells {dir} from {tile} to {dest}", cells.len());
                report.carved.push(corridor);
            }
            absorb(map, dest, &mut connected, &mut work);
            break;
        }
    }

    for cell in map.cells_of(TileKind::Room) {
        if connected.contains(&cell) || !map.is_kind(cell, TileKind::Room) {
            continue;
        }
        let region = flood_region(map, cell, true);
        for &member in &region.members {
            if map.is_kind(member, TileKind::Room)
                && let Some(anchor) = map.anchor(member)
                && graph.remove_room(anchor).is_some()
            {
                report.discarded.push(anchor);
            }
        }
        map.seal(&region.members);
    }

    if !report.discarded.is_empty() {
        warn!("discarded {} unreachable rooms", report.discarded.len());
    }
    debug!(
        "reconnector: {} corridors carved, {} rooms left",
        report.carved.len(),
        graph.len()
    );
    Ok(report)
}
