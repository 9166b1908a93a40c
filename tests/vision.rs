//! Integration tests for line of sight, line of fire and fog of war.

use proptest::prelude::*;
use tactica::{Coord, Game, Map, TeamId, TerrainPalette};

fn standard_map(rows: &[&str]) -> Map {
    Map::from_rows(rows, &TerrainPalette::standard()).expect("valid map")
}

#[test]
fn test_cell_behind_wall_hidden_from_both_sides() {
    // The wall sits off centre, so the two observers are not mirror images
    let map = standard_map(&[
        "........",
        "...#....",
        "........",
    ]);
    let west = Coord::new(0, 1);
    let east = Coord::new(6, 1);

    let seen_from_west = map.tiles_unit_sees(west, 8);
    let seen_from_east = map.tiles_unit_sees(east, 8);

    assert!(seen_from_west.contains(&Coord::new(3, 1)));
    assert!(seen_from_east.contains(&Coord::new(3, 1)));
    assert!(!seen_from_west.contains(&east));
    assert!(!seen_from_east.contains(&west));
    assert!(!seen_from_west.contains(&Coord::new(4, 1)));
    assert!(!seen_from_east.contains(&Coord::new(2, 1)));
}

#[test]
fn test_forest_blocks_sight_and_water_does_not() {
    let map = standard_map(&[".^..", ".~..", "...."]);
    let seen = map.tiles_unit_sees(Coord::new(0, 0), 4);
    assert!(seen.contains(&Coord::new(1, 0)));
    assert!(!seen.contains(&Coord::new(2, 0)));
    assert!(seen.contains(&Coord::new(2, 2)));
}

#[test]
fn test_vision_radius_is_euclidean() {
    let map = Map::new(10, 10);
    let seen = map.tiles_unit_sees(Coord::new(0, 0), 3);
    assert!(seen.contains(&Coord::new(3, 0)));
    assert!(seen.contains(&Coord::new(2, 2)));
    assert!(!seen.contains(&Coord::new(3, 1)));
    assert!(seen.contains(&Coord::new(0, 0)));
}

#[test]
fn test_fog_of_war_follows_active_team() {
    let map = standard_map(&["....#...."]);
    let mut game = Game::new(map, 0);
    game.add_team(TeamId(1));
    game.add_team(TeamId(2));
    game.spawn_unit(TeamId(1), "West", Coord::new(0, 0)).unwrap();
    game.spawn_unit(TeamId(2), "East", Coord::new(8, 0)).unwrap();

    game.init_game();
    assert_eq!(game.render_fog_of_war(), "1...#    \n");
    game.next_turn();
    assert_eq!(game.render_fog_of_war(), "    #...2\n");
}

fn terrain_symbol() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['.', '.', '.', '#', '-', '~', '^'])
}

fn random_map() -> impl Strategy<Value = Map> {
    (1usize..10, 1usize..10).prop_flat_map(|(width, height)| {
        prop::collection::vec(
            prop::collection::vec(terrain_symbol(), width)
                .prop_map(|symbols| symbols.into_iter().collect::<String>()),
            height,
        )
        .prop_map(|rows| Map::from_rows(rows.as_slice(), &TerrainPalette::standard()).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every target in the line of fire is also in sight and within range.
    #[test]
    fn prop_shoot_set_is_inside_sight(
        map in random_map(),
        ox in 0usize..10,
        oy in 0usize..10,
        range in 0u32..8
    ) {
        let origin = Coord::new(ox % map.width(), oy % map.height());
        let seen = map.tiles_unit_sees(origin, range);
        for target in map.tiles_can_shoot_on(origin, range) {
            prop_assert!(seen.contains(&target));
        }
        for target in seen {
            prop_assert!(map.are_valid_coords(target));
            prop_assert!(origin.within_range(target, range));
        }
    }

    /// Queries from outside the map are empty rather than panicking.
    #[test]
    fn prop_out_of_bounds_queries_are_empty(
        map in random_map(),
        dx in 0usize..20,
        y in 0usize..30,
        range in 0u32..10
    ) {
        let origin = Coord::new(map.width() + dx, y);
        prop_assert!(!map.are_valid_coords(origin));
        prop_assert!(map.get_terrain(origin).is_none());
        prop_assert!(!map.can_move_to_coords(origin));
        prop_assert!(map.tiles_unit_sees(origin, range).is_empty());
        prop_assert!(map.tiles_can_shoot_on(origin, range).is_empty());
        prop_assert!(map.possible_tiles_to_move_to(origin, range).is_empty());
    }
}
