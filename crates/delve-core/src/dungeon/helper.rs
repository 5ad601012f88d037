//! Helper map: per-cell tile kind and region anchor
//!
//! Built once per `build_level` call from the raw area and mutated in place
//! by every topology stage.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::grid::{Area, Blocked, Pos};

/// Topological role of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum TileKind {
    Wall,
    Corridor,
    Room,
}

/// One helper cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperTile {
    pub kind: TileKind,

    /// Representative cell of the region this cell belongs to; never set on walls
    pub anchor: Option<Pos>,
}

impl HelperTile {
    pub const fn new(kind: TileKind) -> Self {
        Self { kind, anchor: None }
    }

    pub const fn wall() -> Self {
        Self::new(TileKind::Wall)
    }

    pub const fn anchored(kind: TileKind, anchor: Pos) -> Self {
        Self {
            kind,
            anchor: Some(anchor),
        }
    }
}

/// Classify one cell from the blocking information around it
pub fn classify(area: &Area, pos: Pos) -> TileKind {
    classify_mask(area.blocked_mask(pos))
}

/// Corridors are open cells walled in on two opposite sides
pub fn classify_mask(mask: Blocked) -> TileKind {
    if mask.contains(Blocked::SELF) {
        TileKind::Wall
    } else if mask.contains(Blocked::HORIZONTAL) || mask.contains(Blocked::VERTICAL) {
        TileKind::Corridor
    } else {
        TileKind::Room
    }
}

/// Flat arena of helper tiles, addressed by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperMap {
    width: usize,
    height: usize,
    tiles: Vec<HelperTile>,
}

impl HelperMap {
    /// A map where every cell is wall
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![HelperTile::wall(); width * height],
        }
    }

    /// Run the tile classifier over a whole area. No anchors are assigned.
    pub fn classify(area: &Area) -> Self {
        let mut map = Self::new(area.width(), area.height());
        for pos in area.positions() {
            map.set(pos, HelperTile::new(classify(area, pos)));
        }
        map
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn get(&self, pos: Pos) -> Option<&HelperTile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    pub fn kind(&self, pos: Pos) -> Option<TileKind> {
        self.get(pos).map(|t| t.kind)
    }

    pub fn anchor(&self, pos: Pos) -> Option<Pos> {
        self.get(pos).and_then(|t| t.anchor)
    }

    pub fn is_kind(&self, pos: Pos, kind: TileKind) -> bool {
        self.kind(pos) == Some(kind)
    }

    pub fn set(&mut self, pos: Pos, tile: HelperTile) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    pub fn set_anchor(&mut self, pos: Pos, anchor: Pos) {
        if let Some(i) = self.index(pos) {
            self.tiles[i].anchor = Some(anchor);
        }
    }

    /// Turn a set of cells back into wall
    pub fn seal(&mut self, cells: &[Pos]) {
        for &pos in cells {
            self.set(pos, HelperTile::wall());
        }
    }

    /// Every position, row by row
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y)))
    }

    /// Positions of every cell of the given kind, row by row
    pub fn cells_of(&self, kind: TileKind) -> Vec<Pos> {
        self.positions().filter(|&p| self.is_kind(p, kind)).collect()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Block;

    #[test]
    fn test_open_grid_is_all_room() {
        let area = Area::filled(5, 5, Block::floor());
        let map = HelperMap::classify(&area);
        assert_eq!(map.count(TileKind::Room), 25);
        assert_eq!(map.count(TileKind::Corridor), 0);
        assert_eq!(map.count(TileKind::Wall), 0);
    }

    #[test]
    fn test_corridor_detection() {
        let area = Area::from_ascii(&[
            "#######", //
            "#.....#",
            "###.###",
            "###.###",
            "#.....#",
            "#######",
        ]);
        let map = HelperMap::classify(&area);
        assert_eq!(map.kind(Pos::new(3, 2)), Some(TileKind::Corridor));
        assert_eq!(map.kind(Pos::new(3, 3)), Some(TileKind::Corridor));
        // Walled above and below: a one-row room reads as a corridor too
        assert_eq!(map.kind(Pos::new(1, 1)), Some(TileKind::Corridor));
        assert_eq!(map.kind(Pos::new(0, 0)), Some(TileKind::Wall));
    }

    #[test]
    fn test_closed_door_is_wall() {
        let area = Area::from_ascii(&[".....", ".....", "..+..", ".....", "....."]);
        let map = HelperMap::classify(&area);
        assert_eq!(map.kind(Pos::new(2, 2)), Some(TileKind::Wall));
        // The door blocks one side only, so its neighbours stay rooms
        assert_eq!(map.kind(Pos::new(2, 1)), Some(TileKind::Room));
        assert_eq!(map.kind(Pos::new(1, 2)), Some(TileKind::Room));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let area = Area::from_ascii(&[
            "#########",
            "#...#...#",
            "#...+...#",
            "##.##...#",
            "##.######",
        ]);
        assert_eq!(HelperMap::classify(&area), HelperMap::classify(&area));
    }

    #[test]
    fn test_seal_and_lookup() {
        let mut map = HelperMap::new(3, 3);
        map.set(Pos::new(1, 1), HelperTile::anchored(TileKind::Room, Pos::new(1, 1)));
        assert_eq!(map.anchor(Pos::new(1, 1)), Some(Pos::new(1, 1)));
        map.seal(&[Pos::new(1, 1)]);
        assert_eq!(map.get(Pos::new(1, 1)), Some(&HelperTile::wall()));
        assert!(map.get(Pos::new(3, 1)).is_none());
    }
}
