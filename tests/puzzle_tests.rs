use proptest::prelude::*;

use termcade::game::puzzle::{apply_move, slide_and_merge, Move, Puzzle, Tiles};
use termcade::Simulation;

const MOVES: [Move; 4] = [Move::Left, Move::Up, Move::Right, Move::Down];

fn tile() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), (1u32..=11).prop_map(|p| 1 << p)]
}

fn tiles() -> impl Strategy<Value = Tiles> {
    prop::array::uniform4(prop::array::uniform4(tile()))
}

fn sum(tiles: &Tiles) -> u32 {
    tiles.iter().flatten().sum()
}

#[test]
fn documented_left_merge() {
    let tiles = [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]];
    let result = apply_move(&tiles, Move::Left);
    assert_eq!(result.tiles, [[4, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    assert_eq!(result.score_gain, 4);
    assert!(result.moved);
}

#[test]
fn four_equal_tiles_merge_pairwise() {
    assert_eq!(slide_and_merge([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
    assert_eq!(slide_and_merge([4, 4, 8, 0]), ([8, 8, 0, 0], 8));
}

#[test]
fn blocked_move_spawns_nothing() {
    let tiles = [[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]];
    let mut game = Puzzle::with_tiles(tiles, 3);
    assert!(!game.slide(Move::Left));
    assert_eq!(game.tiles, tiles);
    assert_eq!(game.score(), 0);
}

#[test]
fn full_board_without_pairs_is_over() {
    let tiles = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
    let game = Puzzle::with_tiles(tiles, 3);
    assert!(game.is_over());
}

proptest! {
    #[test]
    fn moves_conserve_the_tile_sum(tiles in tiles(), index in 0usize..4) {
        let result = apply_move(&tiles, MOVES[index]);
        prop_assert_eq!(sum(&result.tiles), sum(&tiles));
        if !result.moved {
            prop_assert_eq!(result.tiles, tiles);
            prop_assert_eq!(result.score_gain, 0);
        }
    }

    #[test]
    fn each_tile_merges_at_most_once(line in prop::array::uniform4(tile())) {
        let (out, gain) = slide_and_merge(line);
        let before = line.iter().filter(|&&v| v != 0).count();
        let after = out.iter().filter(|&&v| v != 0).count();
        // Every merge removes exactly one tile, and no tile merges twice.
        prop_assert!(after * 2 >= before);
        prop_assert_eq!(out.iter().sum::<u32>(), line.iter().sum::<u32>());
        let merges = (before - after) as u32;
        prop_assert!(gain >= merges * 4 || merges == 0);
        // Survivors are packed toward the front.
        prop_assert!(out[after..].iter().all(|&v| v == 0));
    }

    #[test]
    fn a_real_move_adds_exactly_one_tile(tiles in tiles(), index in 0usize..4, seed in any::<u64>()) {
        let mut game = Puzzle::with_tiles(tiles, seed);
        prop_assume!(!game.is_over());
        let before = sum(&game.tiles);
        let moved = game.slide(MOVES[index]);
        let added = sum(&game.tiles) - before;
        if moved {
            prop_assert!(added == 2 || added == 4);
        } else {
            prop_assert_eq!(added, 0);
        }
    }
}
