//! Raw layout sources
//!
//! A layout source fills a block grid with rough rooms and tunnels. The grid
//! may contain dead ends, loops and unreachable pockets; the dungeon pipeline
//! repairs all of that.

mod rooms_and_tunnels;

pub use rooms_and_tunnels::RoomsAndTunnels;

use crate::error::Result;
use crate::grid::{Area, Pos};
use crate::rng::GameRng;

/// Producer of the raw block grid for one floor
pub trait LayoutSource {
    fn generate(&mut self, width: usize, height: usize, rng: &mut GameRng) -> Result<Area>;
}

/// A layout source that always hands out the same grid, whatever size is asked
#[derive(Debug, Clone)]
pub struct FixedLayout(pub Area);

impl FixedLayout {
    pub fn from_ascii(rows: &[&str]) -> Self {
        Self(Area::from_ascii(rows))
    }
}

impl LayoutSource for FixedLayout {
    fn generate(&mut self, _width: usize, _height: usize, _rng: &mut GameRng) -> Result<Area> {
        Ok(self.0.clone())
    }
}

/// Axis-aligned rectangle of floor cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the two rects intersect once both are grown by `buffer`
    pub fn overlaps(&self, other: &Rect, buffer: usize) -> bool {
        let grow = |r: &Rect| {
            (
                r.x.saturating_sub(buffer),
                r.y.saturating_sub(buffer),
                r.x + r.width + buffer,
                r.y + r.height + buffer,
            )
        };
        let (ax1, ay1, ax2, ay2) = grow(self);
        let (bx1, by1, bx2, by2) = grow(other);
        ax1 < bx2 && bx1 < ax2 && ay1 < by2 && by1 < ay2
    }

    pub fn center(&self) -> Pos {
        Pos::new((self.x + self.width / 2) as i32, (self.y + self.height / 2) as i32)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        let (x, y) = (pos.x as usize, pos.y as usize);
        pos.x >= 0 && pos.y >= 0 && x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// A uniformly random cell inside the rect
    pub fn random_point(&self, rng: &mut GameRng) -> Pos {
        let x = self.x + rng.rn2(self.width as u32) as usize;
        let y = self.y + rng.rn2(self.height as u32) as usize;
        Pos::new(x as i32, y as i32)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let Rect {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |cy| (x..x + width).map(move |cx| Pos::new(cx as i32, cy as i32)))
    }
}
