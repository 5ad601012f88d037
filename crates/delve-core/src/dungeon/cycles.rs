//! Short-cycle removal
//!
//! Loops of two or three corridors make a floor feel like a grid of pillars.
//! Each one is cut by sealing a single corridor; longer loops are kept.

use std::collections::BTreeSet;

use log::{debug, trace};

use super::graph::{RegionEdge, RoomGraph};
use super::helper::HelperMap;
use super::region::flood_region;
use crate::consts::MAX_CYCLE_LENGTH;
use crate::grid::Pos;
use crate::rng::GameRng;

/// A closed walk through the room graph, as the edges it follows
pub type Cycle = Vec<RegionEdge>;

/// Whether `path` is a simple cycle: it ends where it started, visits no room
/// twice on the way and uses every corridor once.
fn is_simple_cycle(path: &[RegionEdge]) -> bool {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return false;
    };
    if path.len() < 2 || first.room_a != last.room_b {
        return false;
    }

    let mut rooms = BTreeSet::from([first.room_a]);
    if !path[..path.len() - 1].iter().all(|e| rooms.insert(e.room_b)) {
        return false;
    }
    let mut corridors = BTreeSet::new();
    path.iter().all(|e| corridors.insert(e.corridor))
}

/// Enumerate every simple cycle of at most `max_len` edges.
///
/// Each cycle is reported once per starting room and direction. Paths are
/// grown one edge per round; a path is dropped as soon as it repeats a
/// corridor or returns to its start.
pub fn find_short_cycles(graph: &RoomGraph, max_len: usize) -> Vec<Cycle> {
    let mut live: Vec<Vec<RegionEdge>> = graph.all_edges().map(|&e| vec![e]).collect();
    let mut cycles = Vec::new();

    for _ in 1..max_len {
        let mut next = Vec::new();
        for path in live {
            let Some(tail) = path.last() else { continue };
            for &edge in graph.edges(tail.room_b) {
                if path.iter().any(|e| e.corridor == edge.corridor) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(edge);
                if edge.room_b == extended[0].room_a {
                    if is_simple_cycle(&extended) {
                        cycles.push(extended);
                    }
                } else {
                    next.push(extended);
                }
            }
        }
        live = next;
    }
    cycles
}

/// Seal one corridor of every cycle of length ≤ `MAX_CYCLE_LENGTH`.
///
/// Cycles are visited in random order. A cycle that already lost a corridor
/// to an earlier pick is skipped, otherwise its first corridor is removed.
/// Returns the anchors of the sealed corridors.
pub fn break_short_cycles(map: &mut HelperMap, graph: &mut RoomGraph, rng: &mut GameRng) -> Vec<Pos> {
    let mut cycles = find_short_cycles(graph, MAX_CYCLE_LENGTH);
    rng.shuffle(&mut cycles);

    let mut removed: BTreeSet<Pos> = BTreeSet::new();
    let mut sealed = Vec::new();
    for cycle in &cycles {
        if cycle.iter().any(|e| removed.contains(&e.corridor)) {
            continue;
        }
        let corridor = cycle[0].corridor;
        trace!("cutting {}-cycle at corridor {corridor}", cycle.len());
        removed.insert(corridor);
        sealed.push(corridor);
    }

    for &corridor in &sealed {
        let region = flood_region(map, corridor, false);
        map.seal(&region.members);
        graph.remove_corridor(corridor);
    }

    debug!(
        "cycle breaker: {} short cycles found, {} corridors sealed",
        cycles.len(),
        sealed.len()
    );
    sealed
}
