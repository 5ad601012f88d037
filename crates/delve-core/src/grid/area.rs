//! The persistent block grid of one floor

use serde::{Deserialize, Serialize};

use super::{Block, BlockKind, Blocked, Direction, Pos};
use crate::entity::Entity;

/// A fixed-size rectangular grid of blocks.
///
/// Blocks are stored column-major (`blocks[x][y]`). A raw area comes from a
/// layout source; `build_level` returns the repaired and populated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    width: usize,
    height: usize,

    /// Floor index this area was built for (0 = top floor)
    pub floor: u32,

    blocks: Vec<Vec<Block>>,

    /// Where the player entity stands, if placed
    player: Option<Pos>,
}

impl Area {
    /// Create an area filled with solid wall
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Block::wall())
    }

    /// Create an area where every block is a clone of `block`
    pub fn filled(width: usize, height: usize, block: Block) -> Self {
        Self {
            width,
            height,
            floor: 0,
            blocks: vec![vec![block; height]; width],
            player: None,
        }
    }

    /// Build an area from text rows: `#` is wall, `+` a floor block holding a
    /// closed door, anything else floor. Short rows are padded with wall.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut area = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Pos::new(x as i32, y as i32);
                match ch {
                    '#' => {}
                    '+' => {
                        area.set_kind(pos, BlockKind::Floor);
                        area.add_entity(pos, Entity::Door { open: false });
                    }
                    _ => area.set_kind(pos, BlockKind::Floor),
                }
            }
        }
        area
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position lies inside the grid
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn block(&self, pos: Pos) -> Option<&Block> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self.blocks[pos.x as usize][pos.y as usize])
    }

    pub fn block_mut(&mut self, pos: Pos) -> Option<&mut Block> {
        if !self.contains(pos) {
            return None;
        }
        Some(&mut self.blocks[pos.x as usize][pos.y as usize])
    }

    /// Replace a block wholesale, dropping whatever stood on it
    pub fn set_block(&mut self, pos: Pos, block: Block) {
        if let Some(slot) = self.block_mut(pos) {
            *slot = block;
        }
    }

    /// Change only the terrain of a block
    pub fn set_kind(&mut self, pos: Pos, kind: BlockKind) {
        if let Some(block) = self.block_mut(pos) {
            block.kind = kind;
        }
    }

    pub fn kind(&self, pos: Pos) -> Option<BlockKind> {
        self.block(pos).map(|b| b.kind)
    }

    /// Every position, row by row
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y)))
    }

    /// Whether the block at `pos` (or one step from it in `dir`) cannot be
    /// entered. Positions outside the grid are always blocked.
    pub fn is_blocked(&self, pos: Pos, dir: Option<Direction>) -> bool {
        let target = match dir {
            Some(dir) => pos.step(dir),
            None => pos,
        };
        self.block(target).is_none_or(Block::blocks_movement)
    }

    /// Blocking information for a cell and its four sides
    pub fn blocked_mask(&self, pos: Pos) -> Blocked {
        let mut mask = Blocked::empty();
        if self.is_blocked(pos, None) {
            mask |= Blocked::SELF;
        }
        for dir in Direction::ALL {
            if self.is_blocked(pos, Some(dir)) {
                mask |= Blocked::side(dir);
            }
        }
        mask
    }

    /// Put an entity on a block; returns false when `pos` is outside the grid
    pub fn add_entity(&mut self, pos: Pos, entity: Entity) -> bool {
        let Some(block) = self.block_mut(pos) else {
            return false;
        };
        block.entities.push(entity);
        if entity == Entity::Player {
            self.player = Some(pos);
        }
        true
    }

    pub fn player_position(&self) -> Option<Pos> {
        self.player
    }

    /// All entities with their positions, row by row
    pub fn entities(&self) -> impl Iterator<Item = (Pos, &Entity)> + '_ {
        self.positions().flat_map(move |pos| {
            self.blocks[pos.x as usize][pos.y as usize]
                .entities
                .iter()
                .map(move |e| (pos, e))
        })
    }

    /// Positions of every entity matching `pred`
    pub fn find_entities(&self, pred: impl Fn(&Entity) -> bool) -> Vec<Pos> {
        self.entities()
            .filter(|(_, e)| pred(e))
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count_kind(&self, kind: BlockKind) -> usize {
        self.blocks
            .iter()
            .flat_map(|col| col.iter())
            .filter(|b| b.kind == kind)
            .count()
    }

    /// Text rendering, one line per row
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.blocks[x][y].symbol());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_solid() {
        let area = Area::new(4, 3);
        assert_eq!(area.count_kind(BlockKind::Wall), 12);
        assert!(area.is_blocked(Pos::new(1, 1), None));
    }

    #[test]
    fn test_outside_is_blocked() {
        let area = Area::filled(3, 3, Block::floor());
        assert!(area.is_blocked(Pos::new(0, 0), Some(Direction::West)));
        assert!(area.is_blocked(Pos::new(0, 0), Some(Direction::North)));
        assert!(!area.is_blocked(Pos::new(0, 0), Some(Direction::East)));
        assert!(area.block(Pos::new(3, 0)).is_none());
        assert!(area.block(Pos::new(-1, 0)).is_none());
    }

    #[test]
    fn test_blocked_mask() {
        let area = Area::from_ascii(&["###", "...", "###"]);
        let mask = area.blocked_mask(Pos::new(1, 1));
        assert_eq!(mask, Blocked::VERTICAL);
        let mask = area.blocked_mask(Pos::new(0, 1));
        assert_eq!(mask, Blocked::VERTICAL | Blocked::WEST);
        assert!(area.blocked_mask(Pos::new(1, 0)).contains(Blocked::SELF));
    }

    #[test]
    fn test_from_ascii_door() {
        let area = Area::from_ascii(&[".+."]);
        let door = Pos::new(1, 0);
        assert_eq!(area.kind(door), Some(BlockKind::Floor));
        assert!(area.is_blocked(door, None));
        assert!(area.is_blocked(Pos::new(0, 0), Some(Direction::East)));
    }

    #[test]
    fn test_player_tracking_and_render() {
        let mut area = Area::from_ascii(&["#..", "..#"]);
        assert!(area.add_entity(Pos::new(1, 0), Entity::Player));
        assert!(!area.add_entity(Pos::new(7, 7), Entity::Player));
        assert_eq!(area.player_position(), Some(Pos::new(1, 0)));
        assert_eq!(area.render_ascii(), "#@.\n..#\n");
        assert_eq!(area.find_entities(|e| *e == Entity::Player), vec![Pos::new(1, 0)]);
    }

    #[test]
    fn test_positions_row_major() {
        let area = Area::new(2, 2);
        let all: Vec<Pos> = area.positions().collect();
        assert_eq!(
            all,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
    }
}
