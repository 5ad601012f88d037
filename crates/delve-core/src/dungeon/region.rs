//! Connected-region labeling
//!
//! Regions are maximal 4-connected sets of same-kind cells. Each region is
//! identified by its anchor, the cell the labeling flood started from.

use std::collections::VecDeque;

use hashbrown::HashSet;
use log::trace;

use super::helper::{HelperMap, TileKind};
use crate::grid::Pos;

/// Result of a flood fill
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    /// Cells reached, in breadth-first order starting with the start cell
    pub members: Vec<Pos>,
    /// In-grid neighbours of the members that did not join the flood
    pub boundary: Vec<Pos>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Breadth-first flood from `start` over cells of the start's kind.
///
/// With `bridge_corridors` set, corridor cells are crossed as well, so a flood
/// from a room collects every room reachable through existing corridors.
pub fn flood_region(map: &HelperMap, start: Pos, bridge_corridors: bool) -> Region {
    let Some(kind) = map.kind(start) else {
        return Region::default();
    };
    let joins = |pos: Pos| match map.kind(pos) {
        Some(k) => k == kind || (bridge_corridors && k == TileKind::Corridor),
        None => false,
    };

    let mut open = VecDeque::from([start]);
    let mut visited: HashSet<Pos> = HashSet::new();
    visited.insert(start);
    let mut members = Vec::new();
    let mut boundary = Vec::new();
    let mut boundary_seen: HashSet<Pos> = HashSet::new();

    while let Some(current) = open.pop_front() {
        members.push(current);
        for next in current.neighbors() {
            if joins(next) {
                if visited.insert(next) {
                    open.push_back(next);
                }
            } else if map.contains(next) && boundary_seen.insert(next) {
                boundary.push(next);
            }
        }
    }

    Region { members, boundary }
}

/// Give every non-wall cell the anchor of its region.
///
/// Cells are visited row by row; the first unanchored cell of each region
/// becomes its anchor. Returns the number of regions labeled.
pub fn assign_anchors(map: &mut HelperMap) -> usize {
    let mut regions = 0;
    for pos in map.positions() {
        let Some(&tile) = map.get(pos) else { continue };
        if tile.kind == TileKind::Wall || tile.anchor.is_some() {
            continue;
        }
        let region = flood_region(map, pos, false);
        trace!("{} region anchored at {} ({} cells)", tile.kind, pos, region.len());
        for &member in &region.members {
            map.set_anchor(member, pos);
        }
        regions += 1;
    }
    regions
}

/// All cells sharing `anchor`'s region, or an empty list for walls
pub fn region_cells(map: &HelperMap, anchor: Pos) -> Vec<Pos> {
    match map.kind(anchor) {
        Some(TileKind::Wall) | None => Vec::new(),
        Some(_) => flood_region(map, anchor, false).members,
    }
}
