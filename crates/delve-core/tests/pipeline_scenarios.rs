//! Whole-pipeline scenarios on hand-drawn grids

use delve_core::dungeon::{
    HelperMap, RoomGraph, TileKind, assign_anchors, break_short_cycles, build_room_graph,
    find_short_cycles, reconnect, repair_topology,
};
use delve_core::{Area, BlockKind, Entity, FixedLayout, GameRng, LevelBuilder, NoPopulation, Pos};

// ============================================================================
// Helpers
// ============================================================================

fn graph_of(rows: &[&str]) -> (HelperMap, RoomGraph) {
    let mut map = HelperMap::classify(&Area::from_ascii(rows));
    assign_anchors(&mut map);
    let graph = build_room_graph(&mut map).unwrap();
    (map, graph)
}

const TRIANGLE: &[&str] = &[
    "###############",
    "#...#######...#",
    "#.............#",
    "#...#######...#",
    "##.#########.##",
    "##.#########.##",
    "#.............#",
    "#.............#",
    "#.............#",
    "###############",
];

// ============================================================================
// Classification and graph construction
// ============================================================================

#[test]
fn test_open_grid_is_one_room() {
    let (map, graph) = graph_of(&["....."; 5]);
    assert_eq!(map.count(TileKind::Room), 25);
    assert_eq!(map.count(TileKind::Corridor), 0);
    assert_eq!(graph.len(), 1);
    let anchor = map.anchor(Pos::new(0, 0)).unwrap();
    assert!(map.positions().all(|p| map.anchor(p) == Some(anchor)));
}

#[test]
fn test_single_corridor_gives_single_edge() {
    let (map, graph) = graph_of(&[
        "#############",
        "#...#####...#",
        "#...........#",
        "#...#####...#",
        "#############",
    ]);
    assert_eq!(map.count(TileKind::Corridor), 5);
    assert_eq!(graph.edge_count(), 1);
    for room in graph.rooms() {
        assert_eq!(graph.edges(room).len(), 1);
    }
}

// ============================================================================
// Cycle breaking and reconnection
// ============================================================================

#[test]
fn test_triangle_is_cut_once_for_every_seed() {
    for seed in 0..16 {
        let (mut map, mut graph) = graph_of(TRIANGLE);
        let sealed = break_short_cycles(&mut map, &mut graph, &mut GameRng::new(seed));
        assert_eq!(sealed.len(), 1, "seed {seed}");
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_connected());
        assert!(find_short_cycles(&graph, 3).is_empty());
    }
}

#[test]
fn test_separated_rooms_are_joined() {
    let (mut map, mut graph) = graph_of(&[
        "#############",
        "#...#####...#",
        "#...#####...#",
        "#...#####...#",
        "#############",
    ]);
    let report = reconnect(&mut map, &mut graph, &mut GameRng::new(21)).unwrap();
    assert_eq!(report.carved.len(), 1);
    assert!(graph.is_connected());
    assert_eq!(map.count(TileKind::Corridor), 5);
}

#[test]
fn test_walled_off_room_is_dropped() {
    let (mut map, mut graph) = graph_of(&[
        "############",
        "#..#########",
        "#..#########",
        "############",
        "#########..#",
        "#########..#",
        "############",
    ]);
    let report = reconnect(&mut map, &mut graph, &mut GameRng::new(0)).unwrap();
    assert!(report.carved.is_empty());
    assert_eq!(report.discarded.len(), 1);
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_repair_keeps_triangle_connected() {
    let mut rng = GameRng::new(3);
    let topology = repair_topology(&Area::from_ascii(TRIANGLE), &mut rng).unwrap();
    assert_eq!(topology.sealed_cycles.len(), 1);
    assert!(topology.reconnect.carved.is_empty());
    assert_eq!(topology.graph.len(), 3);
    assert!(topology.graph.is_connected());
}

// ============================================================================
// Level assembly
// ============================================================================

#[test]
fn test_fixed_layout_level() {
    let mut builder = LevelBuilder::seeded(8)
        .with_layout(FixedLayout::from_ascii(TRIANGLE))
        .with_population(NoPopulation);
    let area = builder.build_level(1).unwrap();

    let players = area.find_entities(|e| *e == Entity::Player);
    assert_eq!(players.len(), 1);
    assert_eq!(area.player_position(), Some(players[0]));
    assert_eq!(area.find_entities(|e| *e == Entity::Stairs { down: false }), players);
    assert_eq!(area.find_entities(|e| *e == Entity::Stairs { down: true }).len(), 1);

    for (pos, _) in area.entities() {
        assert_eq!(area.kind(pos), Some(BlockKind::Floor), "entity on wall at {pos}");
    }
    // One of the three corridors was filled in
    let stats = builder.last_stats().unwrap();
    assert_eq!(stats.sealed_cycles, 1);
    assert_eq!(stats.corridors, 2);
}

#[test]
fn test_render_shows_player_and_stairs() {
    let mut builder = LevelBuilder::seeded(5)
        .with_layout(FixedLayout::from_ascii(TRIANGLE))
        .with_population(NoPopulation);
    let text = builder.build_level(0).unwrap().render_ascii();
    assert_eq!(text.lines().count(), TRIANGLE.len());
    assert_eq!(text.matches('@').count(), 1);
    assert_eq!(text.matches('>').count(), 1);
}
