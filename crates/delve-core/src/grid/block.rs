//! Grid blocks: terrain plus the entities standing on it

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{S_FLOOR, S_WALL};
use crate::entity::Entity;

/// Terrain of a block
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum BlockKind {
    #[default]
    Wall,
    Floor,
}

impl BlockKind {
    pub const fn symbol(self) -> char {
        match self {
            BlockKind::Wall => S_WALL,
            BlockKind::Floor => S_FLOOR,
        }
    }
}

/// A single grid block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,

    /// Entities occupying this block, in placement order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
}

impl Block {
    pub const fn wall() -> Self {
        Self {
            kind: BlockKind::Wall,
            entities: Vec::new(),
        }
    }

    pub const fn floor() -> Self {
        Self {
            kind: BlockKind::Floor,
            entities: Vec::new(),
        }
    }

    /// Walls and closed door panels cannot be entered
    pub fn blocks_movement(&self) -> bool {
        self.kind == BlockKind::Wall || self.entities.iter().any(Entity::blocks_movement)
    }

    /// Whether the block can be walked once every door is open
    pub fn is_traversable(&self) -> bool {
        self.kind == BlockKind::Floor
    }

    pub fn has_door(&self) -> bool {
        self.entities.iter().any(Entity::is_door)
    }

    pub fn remove_doors(&mut self) {
        self.entities.retain(|e| !e.is_door());
    }

    /// Glyph of the topmost entity, falling back to the terrain
    pub fn symbol(&self) -> char {
        self.entities
            .iter()
            .rev()
            .max_by_key(|e| e.draw_priority())
            .map(Entity::symbol)
            .unwrap_or_else(|| self.kind.symbol())
    }
}
