//! Level assembly
//!
//! Runs the topology stages over a raw layout, rebuilds the block grid from
//! the result and places the player, stairs, doors and room content.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::cycles::break_short_cycles;
use super::distance::DistanceField;
use super::doors::place_doors;
use super::graph::{RoomGraph, build_room_graph};
use super::helper::{HelperMap, TileKind};
use super::reconnect::{ReconnectReport, reconnect};
use super::region::{assign_anchors, region_cells};
use crate::config::GeneratorConfig;
use crate::consts::{MIN_AREA_HEIGHT, MIN_AREA_WIDTH};
use crate::entity::Entity;
use crate::error::{GenerationError, Result};
use crate::grid::{Area, Block, Pos};
use crate::layout::{LayoutSource, RoomsAndTunnels};
use crate::populate::{DefaultPopulation, PopulationPolicy};
use crate::rng::GameRng;

/// Repaired topology of one raw grid
#[derive(Debug, Clone)]
pub struct Topology {
    pub map: HelperMap,
    pub graph: RoomGraph,
    /// Corridor anchors sealed to cut short cycles
    pub sealed_cycles: Vec<Pos>,
    pub reconnect: ReconnectReport,
}

/// Classify, label and repair a raw grid until its rooms form one
/// connected graph without short cycles.
pub fn repair_topology(raw: &Area, rng: &mut GameRng) -> Result<Topology> {
    let mut map = HelperMap::classify(raw);
    let regions = assign_anchors(&mut map);
    debug!("labeled {regions} regions");

    let mut graph = build_room_graph(&mut map)?;
    let sealed_cycles = break_short_cycles(&mut map, &mut graph, rng);
    let reconnect = reconnect(&mut map, &mut graph, rng)?;
    Ok(Topology {
        map,
        graph,
        sealed_cycles,
        reconnect,
    })
}

/// Summary of the last generated level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub seed: u64,
    pub floor: u32,
    pub rooms: usize,
    pub corridors: usize,
    pub sealed_cycles: usize,
    pub carved_corridors: usize,
    pub discarded_rooms: usize,
    pub doors: usize,
    pub spawn: Pos,
    pub stairs_down: Pos,
}

/// Builds complete floors from a layout source and a population policy
pub struct LevelBuilder {
    config: GeneratorConfig,
    layout: Box<dyn LayoutSource>,
    population: Box<dyn PopulationPolicy>,
    rng: GameRng,
    stats: Option<GenerationStats>,
}

impl LevelBuilder {
    /// Builder with the rooms-and-tunnels layout and the default room table
    pub fn new(config: GeneratorConfig, rng: GameRng) -> Self {
        let layout = RoomsAndTunnels::new(config.layout.clone());
        Self {
            config,
            layout: Box::new(layout),
            population: Box::new(DefaultPopulation::new()),
            rng,
            stats: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(GeneratorConfig::default(), GameRng::new(seed))
    }

    pub fn with_layout(mut self, layout: impl LayoutSource + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn with_population(mut self, population: impl PopulationPolicy + 'static) -> Self {
        self.population = Box::new(population);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Statistics of the most recent successful `build_level`
    pub fn last_stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    /// Generate floor `floor`
    pub fn build_level(&mut self, floor: u32) -> Result<Area> {
        self.config.validate()?;
        let raw = self
            .layout
            .generate(self.config.width, self.config.height, &mut self.rng)?;
        if raw.width() < MIN_AREA_WIDTH || raw.height() < MIN_AREA_HEIGHT {
            return Err(GenerationError::AreaTooSmall {
                width: raw.width(),
                height: raw.height(),
                min_width: MIN_AREA_WIDTH,
                min_height: MIN_AREA_HEIGHT,
            });
        }

        let topology = repair_topology(&raw, &mut self.rng)?;
        let Topology {
            map,
            graph,
            sealed_cycles,
            reconnect,
        } = topology;
        if graph.is_empty() {
            return Err(GenerationError::EmptyRoomGraph);
        }

        let mut area = Area::new(raw.width(), raw.height());
        area.floor = floor;
        for pos in map.positions() {
            if matches!(map.kind(pos), Some(TileKind::Room | TileKind::Corridor)) {
                area.set_block(pos, Block::floor());
            }
        }
        let doors = place_doors(
            &mut area,
            &map,
            self.config.door_chance,
            self.config.door_spacing,
            &mut self.rng,
        );

        let rooms = graph.room_list();
        let spawn_room = *self
            .rng
            .choose(&rooms)
            .ok_or(GenerationError::EmptyRoomGraph)?;
        let spawn_cells = region_cells(&map, spawn_room);
        let spawn = *self
            .rng
            .choose(&spawn_cells)
            .ok_or(GenerationError::NoSpawnCell(spawn_room))?;
        area.add_entity(spawn, Entity::Player);
        if floor > 0 {
            area.add_entity(spawn, Entity::Stairs { down: false });
        }

        let stairs_down = self.pick_stairs_down(&area, &map, spawn);
        area.add_entity(stairs_down, Entity::Stairs { down: true });

        for &room in &rooms {
            let cells = region_cells(&map, room);
            if room == spawn_room {
                self.population
                    .populate_spawn_room(&mut area, &cells, floor, &mut self.rng);
            } else {
                self.population
                    .populate_room(&mut area, &cells, floor, &mut self.rng);
            }
        }
        self.population.populate_level(&mut area, floor, &mut self.rng);

        let stats = GenerationStats {
            seed: self.rng.seed(),
            floor,
            rooms: graph.len(),
            corridors: graph.edge_count(),
            sealed_cycles: sealed_cycles.len(),
            carved_corridors: reconnect.carved.len(),
            discarded_rooms: reconnect.discarded.len(),
            doors: doors.len(),
            spawn,
            stairs_down,
        };
        info!(
            "floor {floor}: {} rooms, {} corridors, spawn {spawn}, stairs {stairs_down}",
            stats.rooms, stats.corridors
        );
        self.stats = Some(stats);
        Ok(area)
    }

    /// A room cell more than half the longest walk away from the spawn, or
    /// failing that one of the farthest room cells.
    fn pick_stairs_down(&mut self, area: &Area, map: &HelperMap, spawn: Pos) -> Pos {
        let field = DistanceField::compute(area, spawn);
        let max = field.max();
        let is_room = |pos: &Pos| map.is_kind(*pos, TileKind::Room);

        let mut candidates: Vec<Pos> = field
            .cells_where(|d| d > max / 2)
            .into_iter()
            .filter(is_room)
            .collect();
        if candidates.is_empty() {
            candidates = field.cells_where(|d| d == max).into_iter().filter(is_room).collect();
        }
        self.rng.choose(&candidates).copied().unwrap_or(spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedLayout;
    use crate::populate::NoPopulation;

    fn builder(rows: &[&str], seed: u64) -> LevelBuilder {
        LevelBuilder::seeded(seed)
            .with_layout(FixedLayout::from_ascii(rows))
            .with_population(NoPopulation)
    }

    const TWO_ROOMS: &[&str] = &[
        "#############",
        "#...#####...#",
        "#...........#",
        "#...#####...#",
        "#############",
    ];

    #[test]
    fn test_two_rooms_level() {
        let mut builder = builder(TWO_ROOMS, 1);
        let area = builder.build_level(0).unwrap();
        let stats = builder.last_stats().unwrap().clone();
        assert_eq!(stats.rooms, 2);
        assert_eq!(stats.corridors, 1);
        assert_eq!(area.player_position(), Some(stats.spawn));
        assert_eq!(area.find_entities(|e| *e == Entity::Stairs { down: true }), vec![stats.stairs_down]);
        assert!(area.find_entities(|e| *e == Entity::Stairs { down: false }).is_empty());
        // Stairs go in the far room
        assert_ne!(stats.spawn.x < 6, stats.stairs_down.x < 6);
    }

    #[test]
    fn test_lower_floor_gets_up_stairs_at_spawn() {
        let mut builder = builder(TWO_ROOMS, 4);
        let area = builder.build_level(3).unwrap();
        let spawn = area.player_position().unwrap();
        assert_eq!(area.find_entities(|e| *e == Entity::Stairs { down: false }), vec![spawn]);
        assert_eq!(area.floor, 3);
    }

    #[test]
    fn test_solid_rock_has_no_rooms() {
        let rows = ["#####"; 5];
        let err = builder(&rows, 0).build_level(0).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyRoomGraph));
    }

    #[test]
    fn test_small_layout_is_rejected() {
        let err = builder(&["...", "..."], 0).build_level(0).unwrap_err();
        assert!(matches!(err, GenerationError::AreaTooSmall { width: 3, height: 2, .. }));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneratorConfig {
            width: 3,
            ..GeneratorConfig::default()
        };
        let err = LevelBuilder::new(config, GameRng::new(0)).build_level(0).unwrap_err();
        assert!(matches!(err, GenerationError::AreaTooSmall { .. }));
    }

    #[test]
    fn test_tiny_room_puts_stairs_in_far_corner() {
        let mut builder = builder(&["######", "######", "##..##", "##..##", "######", "######"], 0);
        let area = builder.build_level(0).unwrap();
        let stats = builder.last_stats().unwrap();
        assert_eq!(stats.rooms, 1);
        assert_eq!(stats.spawn.manhattan(stats.stairs_down), 2);
        assert_eq!(area.player_position(), Some(stats.spawn));
    }

    #[test]
    fn test_output_only_wall_and_floor_from_repaired_map() {
        // The dead-end stub on the right is filled back in
        let mut builder = builder(
            &[
                "##########",
                "#...######",
                "#.......##",
                "#...######",
                "##########",
            ],
            2,
        );
        let area = builder.build_level(0).unwrap();
        assert_eq!(area.kind(Pos::new(6, 2)), Some(crate::grid::BlockKind::Wall));
        assert_eq!(area.count_kind(crate::grid::BlockKind::Floor), 9);
    }

    #[test]
    fn test_default_builder_is_reproducible() {
        let run = |seed| {
            let mut builder = LevelBuilder::seeded(seed);
            let area = builder.build_level(1).unwrap();
            (area, builder.last_stats().cloned())
        };
        assert_eq!(run(1234), run(1234));
    }
}
