//! Grid coordinates and cardinal directions

use std::cmp::Ordering;
use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A cell coordinate inside a fixed-size grid.
///
/// Ordered row-major (`y` first, then `x`) so ordered collections of
/// positions iterate the way the grid is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring position one step in `dir`
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    /// The position `n` steps away in `dir`
    pub const fn step_n(self, dir: Direction, n: i32) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx * n, dy * n)
    }

    /// 4-connected neighbours in N, E, S, W order
    pub fn neighbors(self) -> [Pos; 4] {
        Direction::ALL.map(|dir| self.step(dir))
    }

    /// Chebyshev (king-move) distance
    pub fn chebyshev(self, other: Pos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Manhattan distance
    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise from north
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step, with y growing southwards
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The two directions at right angles
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::North | Direction::South => [Direction::East, Direction::West],
            Direction::East | Direction::West => [Direction::North, Direction::South],
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

bitflags! {
    /// Which of a cell's sides (and the cell itself) cannot be entered
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Blocked: u8 {
        const SELF = 0x01;
        const NORTH = 0x02;
        const EAST = 0x04;
        const SOUTH = 0x08;
        const WEST = 0x10;
        const HORIZONTAL = Self::EAST.bits() | Self::WEST.bits();
        const VERTICAL = Self::NORTH.bits() | Self::SOUTH.bits();
    }
}

impl Blocked {
    /// The flag for one side
    pub const fn side(dir: Direction) -> Blocked {
        match dir {
            Direction::North => Blocked::NORTH,
            Direction::East => Blocked::EAST,
            Direction::South => Blocked::SOUTH,
            Direction::West => Blocked::WEST,
        }
    }
}
