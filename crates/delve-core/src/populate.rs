//! Room population
//!
//! The level builder only knows which cells make up each room; what goes in
//! them is decided by a [`PopulationPolicy`].

use log::trace;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::entity::{EnemyKind, Entity, ItemKind};
use crate::grid::{Area, Pos};
use crate::rng::GameRng;

/// Rooms larger than this do not get more enemies
const MAX_COUNTED_ROOM_SIZE: usize = 200;
/// One pot for every this many room cells
const TILES_PER_POT: usize = 10;
/// Pots rolled above this are large
const LARGE_POT_ROLL: f64 = 0.7;
const SMALL_POTS_PER_ROOM: usize = 2;

/// Decides the content of generated rooms
pub trait PopulationPolicy {
    /// Fill one room other than the spawn room
    fn populate_room(&mut self, area: &mut Area, cells: &[Pos], floor: u32, rng: &mut GameRng);

    /// Fill the room the player starts in
    fn populate_spawn_room(&mut self, _area: &mut Area, _cells: &[Pos], _floor: u32, _rng: &mut GameRng) {}

    /// Called once after every room was handed out
    fn populate_level(&mut self, _area: &mut Area, _floor: u32, _rng: &mut GameRng) {}
}

/// Leaves every room empty
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPopulation;

impl PopulationPolicy for NoPopulation {
    fn populate_room(&mut self, _area: &mut Area, _cells: &[Pos], _floor: u32, _rng: &mut GameRng) {}
}

/// What a room is filled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum RoomTheme {
    Dogs,
    Rats,
    Orcs,
    Golems,
    Empty,
    Chest,
}

impl RoomTheme {
    /// Enemy kind, room cells per enemy and depth scale of an enemy theme.
    ///
    /// The enemy count grows by one base count every `depth_scale` floors.
    pub const fn enemies(self) -> Option<(EnemyKind, usize, u32)> {
        match self {
            RoomTheme::Dogs => Some((EnemyKind::Dog, 60, 70)),
            RoomTheme::Rats => Some((EnemyKind::Rat, 120, 140)),
            RoomTheme::Orcs => Some((EnemyKind::Orc, 240, 300)),
            RoomTheme::Golems => Some((EnemyKind::Golem, 240, 300)),
            RoomTheme::Empty | RoomTheme::Chest => None,
        }
    }
}

/// Number of enemies for a room of `room_size` cells.
///
/// The fractional part is resolved randomly: one extra enemy is added when a
/// uniform roll exceeds it.
pub fn enemy_count(room_size: usize, tiles_per_enemy: usize, depth_scale: u32, floor: u32, rng: &mut GameRng) -> usize {
    let base = (room_size.min(MAX_COUNTED_ROOM_SIZE) / tiles_per_enemy) as f64;
    let count = base * (1.0 + f64::from(floor) / f64::from(depth_scale));
    let whole = count.trunc();
    whole as usize + usize::from(rng.next_f64() > count - whole)
}

/// Weighted room table: four enemy themes, an empty room and a chest room
#[derive(Debug, Clone)]
pub struct DefaultPopulation {
    table: Vec<(u32, RoomTheme)>,
}

impl Default for DefaultPopulation {
    fn default() -> Self {
        Self {
            table: RoomTheme::iter().map(|theme| (1, theme)).collect(),
        }
    }
}

impl DefaultPopulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom weight table; zero-weight entries are never picked
    pub fn with_table(table: Vec<(u32, RoomTheme)>) -> Self {
        Self { table }
    }

    pub fn choose_theme(&self, rng: &mut GameRng) -> Option<RoomTheme> {
        let total: u32 = self.table.iter().map(|(w, _)| w).sum();
        if total == 0 {
            return None;
        }
        let mut roll = rng.rn2(total);
        for &(weight, theme) in &self.table {
            if roll < weight {
                return Some(theme);
            }
            roll -= weight;
        }
        None
    }

    /// Pots on the first `room_size / 10` of `cells`
    fn add_pots(area: &mut Area, cells: &[Pos], room_size: usize, rng: &mut GameRng) {
        for &pos in cells.iter().take(room_size / TILES_PER_POT) {
            let kind = if rng.next_f64() > LARGE_POT_ROLL {
                EnemyKind::Pot
            } else {
                EnemyKind::SmallPot
            };
            area.add_entity(pos, Entity::Enemy { kind });
        }
    }

    pub fn fill_room(&self, theme: RoomTheme, area: &mut Area, cells: &[Pos], floor: u32, rng: &mut GameRng) {
        let size = cells.len();
        let mut shuffled = cells.to_vec();
        rng.shuffle(&mut shuffled);

        match theme.enemies() {
            Some((kind, tiles_per_enemy, depth_scale)) => {
                let count = enemy_count(size, tiles_per_enemy, depth_scale, floor, rng);
                for &pos in shuffled.iter().take(count) {
                    area.add_entity(pos, Entity::Enemy { kind });
                }
                shuffled.reverse();
                for &pos in shuffled.iter().take(SMALL_POTS_PER_ROOM) {
                    area.add_entity(pos, Entity::Enemy { kind: EnemyKind::SmallPot });
                }
                Self::add_pots(area, &shuffled, size, rng);
            }
            None if theme == RoomTheme::Chest => {
                let items: Vec<ItemKind> = ItemKind::iter().collect();
                if let (Some(&pos), Some(&loot)) = (rng.choose(cells), rng.choose(&items)) {
                    area.add_entity(pos, Entity::Chest { loot });
                }
            }
            None => Self::add_pots(area, &shuffled, size, rng),
        }
    }
}

impl PopulationPolicy for DefaultPopulation {
    fn populate_room(&mut self, area: &mut Area, cells: &[Pos], floor: u32, rng: &mut GameRng) {
        if let Some(theme) = self.choose_theme(rng) {
            trace!("{theme} room of {} cells", cells.len());
            self.fill_room(theme, area, cells, floor, rng);
        }
    }

    fn populate_level(&mut self, area: &mut Area, floor: u32, _rng: &mut GameRng) {
        for _ in 0..=floor {
            area.add_entity(Pos::new(0, 0), Entity::Enemy { kind: EnemyKind::Ghost });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Block;

    fn room(width: usize, height: usize) -> (Area, Vec<Pos>) {
        let area = Area::filled(width, height, Block::floor());
        let cells = area.positions().collect();
        (area, cells)
    }

    fn count_enemies(area: &Area, kind: EnemyKind) -> usize {
        area.find_entities(|e| *e == Entity::Enemy { kind }).len()
    }

    #[test]
    fn test_enemy_count_bounds() {
        let mut rng = GameRng::new(5);
        for _ in 0..50 {
            // 120 / 60 = 2, no depth bonus on floor 0
            let n = enemy_count(120, 60, 70, 0, &mut rng);
            assert!((2..=3).contains(&n));
            // 2 * (1 + 35/70) = 3
            let n = enemy_count(120, 60, 70, 35, &mut rng);
            assert!((3..=4).contains(&n));
        }
    }

    #[test]
    fn test_enemy_count_caps_room_size() {
        let mut rng = GameRng::new(6);
        let n = enemy_count(10_000, 60, 70, 0, &mut rng);
        assert!(n <= 4);
    }

    #[test]
    fn test_dog_room() {
        let (mut area, cells) = room(12, 10);
        let policy = DefaultPopulation::new();
        policy.fill_room(RoomTheme::Dogs, &mut area, &cells, 0, &mut GameRng::new(2));
        let dogs = count_enemies(&area, EnemyKind::Dog);
        assert!((2..=3).contains(&dogs));
        let pots = count_enemies(&area, EnemyKind::Pot) + count_enemies(&area, EnemyKind::SmallPot);
        assert_eq!(pots, SMALL_POTS_PER_ROOM + 120 / TILES_PER_POT);
    }

    #[test]
    fn test_empty_room_has_only_pots() {
        let (mut area, cells) = room(5, 6);
        DefaultPopulation::new().fill_room(RoomTheme::Empty, &mut area, &cells, 3, &mut GameRng::new(1));
        let all: Vec<Entity> = area.entities().map(|(_, e)| *e).collect();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| matches!(
            e,
            Entity::Enemy {
                kind: EnemyKind::Pot | EnemyKind::SmallPot
            }
        )));
    }

    #[test]
    fn test_chest_room_has_one_chest() {
        let (mut area, cells) = room(4, 4);
        DefaultPopulation::new().fill_room(RoomTheme::Chest, &mut area, &cells, 0, &mut GameRng::new(9));
        let chests = area.find_entities(|e| matches!(e, Entity::Chest { .. }));
        assert_eq!(chests.len(), 1);
        assert_eq!(area.entities().count(), 1);
    }

    #[test]
    fn test_zero_weights_are_never_picked() {
        let policy = DefaultPopulation::with_table(vec![(0, RoomTheme::Dogs), (3, RoomTheme::Chest)]);
        let mut rng = GameRng::new(4);
        for _ in 0..30 {
            assert_eq!(policy.choose_theme(&mut rng), Some(RoomTheme::Chest));
        }
        assert_eq!(DefaultPopulation::with_table(Vec::new()).choose_theme(&mut rng), None);
    }

    #[test]
    fn test_ghosts_scale_with_floor() {
        let (mut area, _) = room(3, 3);
        DefaultPopulation::new().populate_level(&mut area, 2, &mut GameRng::new(0));
        assert_eq!(count_enemies(&area, EnemyKind::Ghost), 3);
        assert!(area.find_entities(|e| matches!(e, Entity::Enemy { .. })).iter().all(|&p| p == Pos::new(0, 0)));
    }

    #[test]
    fn test_no_population_is_inert() {
        let (mut area, cells) = room(4, 4);
        let before = area.clone();
        let mut policy = NoPopulation;
        let mut rng = GameRng::new(0);
        policy.populate_room(&mut area, &cells, 5, &mut rng);
        policy.populate_spawn_room(&mut area, &cells, 5, &mut rng);
        policy.populate_level(&mut area, 5, &mut rng);
        assert_eq!(area, before);
    }
}
