//! Room graph: rooms as nodes, corridors as edges

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::helper::{HelperMap, TileKind};
use super::region::flood_region;
use crate::error::{GenerationError, Result};
use crate::grid::Pos;

/// A corridor region joining two distinct rooms.
///
/// Stored in both endpoints' adjacency lists, each copy oriented so that
/// `room_a` is the room owning the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionEdge {
    pub room_a: Pos,
    /// Anchor of the corridor region
    pub corridor: Pos,
    pub room_b: Pos,
}

impl RegionEdge {
    pub const fn new(room_a: Pos, corridor: Pos, room_b: Pos) -> Self {
        Self {
            room_a,
            corridor,
            room_b,
        }
    }

    /// The same corridor seen from the other end
    pub const fn reversed(self) -> Self {
        Self::new(self.room_b, self.corridor, self.room_a)
    }
}

/// Room anchor → incident edges, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomGraph {
    adjacency: BTreeMap<Pos, Vec<RegionEdge>>,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without edges (no-op if present)
    pub fn insert_room(&mut self, anchor: Pos) {
        self.adjacency.entry(anchor).or_default();
    }

    pub fn contains(&self, anchor: Pos) -> bool {
        self.adjacency.contains_key(&anchor)
    }

    /// Room anchors in ascending (row-major) order
    pub fn rooms(&self) -> impl Iterator<Item = Pos> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn room_list(&self) -> Vec<Pos> {
        self.rooms().collect()
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Edges leaving `anchor`; empty for unknown rooms
    pub fn edges(&self, anchor: Pos) -> &[RegionEdge] {
        self.adjacency
            .get(&anchor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every adjacency entry (each edge appears once per endpoint)
    pub fn all_edges(&self) -> impl Iterator<Item = &RegionEdge> + '_ {
        self.adjacency.values().flatten()
    }

    /// Connect two rooms through `corridor`, recording the edge at both ends
    pub fn add_edge(&mut self, room_a: Pos, corridor: Pos, room_b: Pos) -> Result<()> {
        for room in [room_a, room_b] {
            if !self.contains(room) {
                return Err(GenerationError::MissingAdjacency { corridor, room });
            }
        }
        let edge = RegionEdge::new(room_a, corridor, room_b);
        self.adjacency.entry(room_a).or_default().push(edge);
        self.adjacency.entry(room_b).or_default().push(edge.reversed());
        Ok(())
    }

    /// Drop every adjacency entry using `corridor`; returns how many were removed
    pub fn remove_corridor(&mut self, corridor: Pos) -> usize {
        let mut removed = 0;
        for edges in self.adjacency.values_mut() {
            let before = edges.len();
            edges.retain(|e| e.corridor != corridor);
            removed += before - edges.len();
        }
        removed
    }

    /// Remove a room node together with its outgoing list
    pub fn remove_room(&mut self, anchor: Pos) -> Option<Vec<RegionEdge>> {
        self.adjacency.remove(&anchor)
    }

    /// Distinct corridor anchors in use
    pub fn corridors(&self) -> BTreeSet<Pos> {
        self.all_edges().map(|e| e.corridor).collect()
    }

    /// Number of distinct corridors
    pub fn edge_count(&self) -> usize {
        self.corridors().len()
    }

    /// Connected components, each listed in discovery order
    pub fn components(&self) -> Vec<Vec<Pos>> {
        let mut seen = BTreeSet::new();
        let mut components = Vec::new();
        for start in self.rooms() {
            if !seen.insert(start) {
                continue;
            }
            let mut component = Vec::new();
            let mut open = VecDeque::from([start]);
            while let Some(room) = open.pop_front() {
                component.push(room);
                for edge in self.edges(room) {
                    if seen.insert(edge.room_b) {
                        open.push_back(edge.room_b);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// True when every room can reach every other one
    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }
}

/// Turn the labeled helper map into a room graph.
///
/// Corridors touching anything other than exactly two distinct rooms
/// (dead ends, loops back into one room) are sealed into wall.
pub fn build_room_graph(map: &mut HelperMap) -> Result<RoomGraph> {
    let mut graph = RoomGraph::new();
    let mut corridor_anchors = BTreeSet::new();
    for pos in map.positions() {
        let Some(tile) = map.get(pos) else { continue };
        match (tile.kind, tile.anchor) {
            (TileKind::Room, Some(anchor)) => graph.insert_room(anchor),
            (TileKind::Corridor, Some(anchor)) => {
                corridor_anchors.insert(anchor);
            }
            _ => {}
        }
    }

    let mut sealed = 0;
    for corridor in corridor_anchors {
        let region = flood_region(map, corridor, false);
        let mut rooms: Vec<Pos> = Vec::with_capacity(2);
        for &cell in &region.boundary {
            if !map.is_kind(cell, TileKind::Room) {
                continue;
            }
            if let Some(anchor) = map.anchor(cell)
                && !rooms.contains(&anchor)
            {
                rooms.push(anchor);
            }
        }

        if let [a, b] = rooms[..] {
            trace!("corridor {corridor} joins {a} and {b}");
            graph.add_edge(a, corridor, b)?;
        } else {
            trace!("sealing corridor {corridor} touching {} rooms", rooms.len());
            map.seal(&region.members);
            sealed += 1;
        }
    }

    debug!(
        "room graph: {} rooms, {} corridors, {} corridors sealed",
        graph.len(),
        graph.edge_count(),
        sealed
    );
    Ok(graph)
}
