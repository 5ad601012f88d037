//! Rooms-and-tunnels layout
//!
//! Rectangular rooms scattered over solid rock, joined by meandering tunnels
//! dug between random room pairs. Nothing guarantees the result is connected
//! or loop-free.

use log::debug;

use super::{LayoutSource, Rect};
use crate::config::LayoutConfig;
use crate::entity::Entity;
use crate::error::Result;
use crate::grid::{Area, BlockKind, Direction, Pos};
use crate::rng::GameRng;

const MAX_TUNNEL_STEPS: usize = 500;
const MIN_DEAD_END: usize = 3;
const MAX_DEAD_END: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct RoomsAndTunnels {
    config: LayoutConfig,
}

impl RoomsAndTunnels {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn place_rooms(&self, width: usize, height: usize, rng: &mut GameRng) -> Vec<Rect> {
        let mut rooms: Vec<Rect> = Vec::new();
        for _ in 0..self.config.room_attempts {
            let w = rng.range(self.config.min_room_size, self.config.max_room_size);
            let h = rng.range(self.config.min_room_size, self.config.max_room_size);

            // Keep a rock border around the grid
            if w + 2 > width || h + 2 > height {
                continue;
            }
            let x = rng.range(1, width - w - 1);
            let y = rng.range(1, height - h - 1);
            let room = Rect::new(x, y, w, h);

            if rooms.iter().any(|r| room.overlaps(r, 1)) {
                continue;
            }
            rooms.push(room);
        }
        rooms
    }

    /// Carve one rock cell, sometimes leaving a closed door panel in it
    fn carve(&self, area: &mut Area, pos: Pos, rng: &mut GameRng) {
        if area.kind(pos) != Some(BlockKind::Wall) {
            return;
        }
        area.set_kind(pos, BlockKind::Floor);
        if rng.chance(self.config.closed_door_chance) {
            area.add_entity(pos, Entity::Door { open: false });
        }
    }

    /// Dig a meandering tunnel from `start` towards `end`.
    ///
    /// Each step prefers the axis with the larger remaining distance, with a
    /// small chance of a sideways step.
    fn dig_tunnel(&self, area: &mut Area, start: Pos, end: Pos, rng: &mut GameRng) {
        let mut cur = start;
        let mut steps = 0;
        while cur != end && steps < MAX_TUNNEL_STEPS {
            steps += 1;
            let dx = end.x - cur.x;
            let dy = end.y - cur.y;

            let (mx, my) = if dx.abs() > dy.abs() {
                if rng.rn2((dx.abs() + 1) as u32) > 0 || dy == 0 {
                    (dx.signum(), 0)
                } else {
                    (0, dy.signum())
                }
            } else if dy.abs() > dx.abs() {
                if rng.rn2((dy.abs() + 1) as u32) > 0 || dx == 0 {
                    (0, dy.signum())
                } else {
                    (dx.signum(), 0)
                }
            } else if rng.one_in(2) {
                (dx.signum(), 0)
            } else {
                (0, dy.signum())
            };

            let next = cur.offset(mx, my);
            if !self.inside_border(area, next) {
                break;
            }
            self.carve(area, next, rng);
            cur = next;
        }
    }

    /// Dig a straight tunnel out of a room that ends in the rock
    fn dig_dead_end(&self, area: &mut Area, room: &Rect, rng: &mut GameRng) {
        let dir = Direction::ALL[rng.index(Direction::ALL.len())];
        let length = rng.range(MIN_DEAD_END, MAX_DEAD_END);
        let mut cur = room.random_point(rng);
        while room.contains(cur) {
            cur = cur.step(dir);
        }
        for _ in 0..length {
            if !self.inside_border(area, cur) {
                break;
            }
            self.carve(area, cur, rng);
            cur = cur.step(dir);
        }
    }

    fn inside_border(&self, area: &Area, pos: Pos) -> bool {
        pos.x >= 1 && pos.y >= 1 && (pos.x as usize) < area.width() - 1 && (pos.y as usize) < area.height() - 1
    }
}

impl LayoutSource for RoomsAndTunnels {
    fn generate(&mut self, width: usize, height: usize, rng: &mut GameRng) -> Result<Area> {
        let mut area = Area::new(width, height);
        let rooms = self.place_rooms(width, height, rng);
        for room in &rooms {
            for pos in room.cells() {
                area.set_kind(pos, BlockKind::Floor);
            }
        }

        if rooms.len() >= 2 {
            for _ in 0..self.config.tunnels {
                let a = rng.index(rooms.len());
                let mut b = rng.index(rooms.len() - 1);
                if b >= a {
                    b += 1;
                }
                let start = rooms[a].random_point(rng);
                let end = rooms[b].random_point(rng);
                self.dig_tunnel(&mut area, start, end, rng);
            }
        }
        if !rooms.is_empty() {
            for _ in 0..self.config.dead_ends {
                let room = rooms[rng.index(rooms.len())];
                self.dig_dead_end(&mut area, &room, rng);
            }
        }

        debug!(
            "raw layout {width}x{height}: {} rooms, {} floor cells",
            rooms.len(),
            area.count_kind(BlockKind::Floor)
        );
        Ok(area)
    }
}
