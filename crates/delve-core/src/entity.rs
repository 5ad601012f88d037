//! Entities placed on a generated level

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{S_CHEST, S_DOOR_CLOSED, S_DOOR_OPEN, S_PLAYER, S_STAIRS_DOWN, S_STAIRS_UP};

/// Hostile or breakable creatures the population table can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum EnemyKind {
    Rat,
    Dog,
    Orc,
    Golem,
    Ghost,
    Pot,
    SmallPot,
}

impl EnemyKind {
    pub const fn symbol(self) -> char {
        match self {
            EnemyKind::Rat => 'r',
            EnemyKind::Dog => 'd',
            EnemyKind::Orc => 'o',
            EnemyKind::Golem => 'G',
            EnemyKind::Ghost => 'W',
            EnemyKind::Pot => 'U',
            EnemyKind::SmallPot => 'u',
        }
    }
}

/// Loot that can lie on the floor or inside a chest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ItemKind {
    HealthPotion,
    Armor,
    Ring,
    Sword,
    Campfire,
}

impl ItemKind {
    pub const fn symbol(self) -> char {
        match self {
            ItemKind::HealthPotion => '!',
            ItemKind::Armor => '[',
            ItemKind::Ring => '*',
            ItemKind::Sword => ')',
            ItemKind::Campfire => '^',
        }
    }
}

/// Anything occupying a block besides its terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entity {
    Player,
    Stairs { down: bool },
    Door { open: bool },
    Enemy { kind: EnemyKind },
    Item { kind: ItemKind },
    Chest { loot: ItemKind },
}

impl Entity {
    /// A closed door panel stops movement; nothing else placed by the generator does
    pub const fn blocks_movement(&self) -> bool {
        matches!(self, Entity::Door { open: false })
    }

    pub const fn is_door(&self) -> bool {
        matches!(self, Entity::Door { .. })
    }

    pub const fn is_stairs(&self) -> bool {
        matches!(self, Entity::Stairs { .. })
    }

    /// Glyph drawn when this entity is the topmost one on its block
    pub const fn symbol(&self) -> char {
        match self {
            Entity::Player => S_PLAYER,
            Entity::Stairs { down: true } => S_STAIRS_DOWN,
            Entity::Stairs { down: false } => S_STAIRS_UP,
            Entity::Door { open: false } => S_DOOR_CLOSED,
            Entity::Door { open: true } => S_DOOR_OPEN,
            Entity::Enemy { kind } => kind.symbol(),
            Entity::Item { kind } => kind.symbol(),
            Entity::Chest { .. } => S_CHEST,
        }
    }

    /// Drawing priority; higher wins when several entities share a block
    pub const fn draw_priority(&self) -> u8 {
        match self {
            Entity::Player => 5,
            Entity::Enemy { .. } => 4,
            Entity::Chest { .. } | Entity::Item { .. } => 3,
            Entity::Stairs { .. } => 2,
            Entity::Door { .. } => 1,
        }
    }
}
