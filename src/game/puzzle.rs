use std::time::Duration;

use rand::Rng;

use crate::constants::{PUZZLE_FOUR_CHANCE, PUZZLE_SIZE};
use crate::game::Simulation;
use crate::rng::{self, GameRng};

/// Tile values, 0 for an empty slot.
pub type Tiles = [[u32; PUZZLE_SIZE]; PUZZLE_SIZE];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Left,
    Up,
    Right,
    Down,
}

impl Move {
    /// Clockwise quarter turns that make this move a left move.
    fn turns(self) -> usize {
        match self {
            Move::Left => 0,
            Move::Up => 3,
            Move::Right => 2,
            Move::Down => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub tiles: Tiles,
    pub moved: bool,
    pub score_gain: u32,
}

/// Slide one line toward index 0, merging each pair at most once.
pub fn slide_and_merge(line: [u32; PUZZLE_SIZE]) -> ([u32; PUZZLE_SIZE], u32) {
    let nums: Vec<u32> = line.iter().copied().filter(|&n| n != 0).collect();
    let mut out = [0; PUZZLE_SIZE];
    let mut gain = 0;
    let mut write = 0;
    let mut i = 0;
    while i < nums.len() {
        if i + 1 < nums.len() && nums[i] == nums[i + 1] {
            out[write] = nums[i] * 2;
            gain += out[write];
            i += 2;
        } else {
            out[write] = nums[i];
            i += 1;
        }
        write += 1;
    }
    (out, gain)
}

fn rotate_clockwise(tiles: &Tiles) -> Tiles {
    let mut rotated = [[0; PUZZLE_SIZE]; PUZZLE_SIZE];
    for (y, row) in tiles.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            rotated[x][PUZZLE_SIZE - 1 - y] = value;
        }
    }
    rotated
}

/// Apply a move to a board without touching any game state.
pub fn apply_move(tiles: &Tiles, direction: Move) -> MoveResult {
    let turns = direction.turns();
    let mut board = *tiles;
    for _ in 0..turns {
        board = rotate_clockwise(&board);
    }

    let mut score_gain = 0;
    for row in board.iter_mut() {
        let (line, gain) = slide_and_merge(*row);
        *row = line;
        score_gain += gain;
    }

    for _ in 0..(4 - turns) % 4 {
        board = rotate_clockwise(&board);
    }

    MoveResult {
        tiles: board,
        moved: board != *tiles,
        score_gain,
    }
}

pub fn has_moves(tiles: &Tiles) -> bool {
    for y in 0..PUZZLE_SIZE {
        for x in 0..PUZZLE_SIZE {
            let v = tiles[y][x];
            if v == 0 {
                return true;
            }
            if x + 1 < PUZZLE_SIZE && v == tiles[y][x + 1] {
                return true;
            }
            if y + 1 < PUZZLE_SIZE && v == tiles[y + 1][x] {
                return true;
            }
        }
    }
    false
}

pub struct Puzzle {
    pub tiles: Tiles,
    pub score: u32,
    pub paused: bool,
    pub over: bool,
    rng: GameRng,
}

impl Puzzle {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            tiles: [[0; PUZZLE_SIZE]; PUZZLE_SIZE],
            score: 0,
            paused: false,
            over: false,
            rng: rng::seeded(seed),
        };
        game.reset();
        game
    }

    /// A game on a given board, e.g. to set up a scenario.
    pub fn with_tiles(tiles: Tiles, seed: u64) -> Self {
        Self {
            tiles,
            score: 0,
            paused: false,
            over: !has_moves(&tiles),
            rng: rng::seeded(seed),
        }
    }

    pub fn max_tile(&self) -> u32 {
        self.tiles.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Drop a 2 (or rarely a 4) on a random empty slot.
    pub fn add_random_tile(&mut self) {
        let mut empty = Vec::new();
        for y in 0..PUZZLE_SIZE {
            for x in 0..PUZZLE_SIZE {
                if self.tiles[y][x] == 0 {
                    empty.push((x, y));
                }
            }
        }
        if let Some((x, y)) = rng::pick(&mut self.rng, &empty) {
            self.tiles[y][x] = if self.rng.gen_bool(PUZZLE_FOUR_CHANCE) { 4 } else { 2 };
        }
    }

    /// Returns whether the board changed.
    pub fn slide(&mut self, direction: Move) -> bool {
        if self.over || self.paused {
            return false;
        }
        let result = apply_move(&self.tiles, direction);
        if !result.moved {
            return false;
        }

        self.tiles = result.tiles;
        self.score += result.score_gain;
        self.add_random_tile();
        if !has_moves(&self.tiles) {
            self.over = true;
            log::info!(
                "puzzle: game over with {} points, best tile {}",
                self.score,
                self.max_tile()
            );
        }
        true
    }
}

impl Simulation for Puzzle {
    /// Moves happen on input only.
    fn tick(&mut self) {}

    fn tick_interval(&self) -> Option<Duration> {
        None
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn toggle_pause(&mut self) {
        if !self.over {
            self.paused = !self.paused;
        }
    }

    fn is_over(&self) -> bool {
        self.over
    }

    fn reset(&mut self) {
        self.tiles = [[0; PUZZLE_SIZE]; PUZZLE_SIZE];
        self.score = 0;
        self.paused = false;
        self.over = false;
        self.add_random_tile();
        self.add_random_tile();
    }

    fn score(&self) -> u32 {
        self.score
    }
}
