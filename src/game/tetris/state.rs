use std::time::Duration;

use crate::constants::{LINE_CLEAR_POINTS, TETRIS_COLS, TETRIS_KICKS, TETRIS_ROWS};
use crate::game::board::{empty_grid, is_row_full, Grid, EMPTY};
use crate::game::tetris::piece::{Piece, PieceType};
use crate::game::Simulation;
use crate::rng::{self, GameRng};
use crate::settings::TetrisSettings;

pub type Board = Grid<TETRIS_COLS, TETRIS_ROWS>;

/// `Spawning` and `Locking` only last for the duration of a call; between
/// ticks a game is either `Active` or `GameOver`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Spawning,
    Active,
    Locking,
    GameOver,
}

/// Points for clearing `lines` rows at once.
pub fn line_clear_points(lines: u32) -> u32 {
    match lines {
        1..=4 => LINE_CLEAR_POINTS[lines as usize - 1],
        _ => lines * 100,
    }
}

pub struct Tetris {
    pub board: Board,
    pub current_piece: Option<Piece>,
    pub next_piece: PieceType,
    pub score: u32,
    pub lines_cleared: u32,
    pub phase: Phase,
    pub paused: bool,
    gravity: Duration,
    rng: GameRng,
}

impl Tetris {
    pub fn new(settings: &TetrisSettings, seed: u64) -> Self {
        let mut rng = rng::seeded(seed);
        let next_piece = Self::random_type(&mut rng);
        let mut game = Self {
            board: empty_grid(),
            current_piece: None,
            next_piece,
            score: 0,
            lines_cleared: 0,
            phase: Phase::Spawning,
            paused: false,
            gravity: settings.gravity(),
            rng,
        };
        game.spawn_piece();
        game
    }

    fn random_type(rng: &mut GameRng) -> PieceType {
        rng::pick(rng, &PieceType::ALL).unwrap_or(PieceType::I)
    }

    fn can_act(&self) -> bool {
        self.phase == Phase::Active && !self.paused
    }

    pub fn spawn_piece(&mut self) {
        self.phase = Phase::Spawning;
        let piece = Piece::new(self.next_piece);
        self.next_piece = Self::random_type(&mut self.rng);

        if self.is_valid_position(&piece) {
            self.current_piece = Some(piece);
            self.phase = Phase::Active;
        } else {
            self.current_piece = None;
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        log::info!(
            "tetris: game over with {} points, {} lines",
            self.score,
            self.lines_cleared
        );
    }

    /// Cells above the field are allowed; anything inside it must be free.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        for (x, y) in piece.get_blocks() {
            if x < 0 || x >= TETRIS_COLS as i32 || y >= TETRIS_ROWS as i32 {
                return false;
            }
            if y >= 0 && self.board[y as usize][x as usize] != EMPTY {
                return false;
            }
        }
        true
    }

    pub fn get_ghost_piece(&self) -> Option<Piece> {
        let current_piece = self.current_piece?;
        let mut ghost = current_piece;
        while self.is_valid_position(&ghost.shifted(0, 1)) {
            ghost.y += 1;
        }
        if ghost.y != current_piece.y {
            Some(ghost)
        } else {
            None
        }
    }

    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if !self.can_act() {
            return false;
        }
        if let Some(piece) = self.current_piece {
            let moved = piece.shifted(dx, dy);
            if self.is_valid_position(&moved) {
                self.current_piece = Some(moved);
                return true;
            }
        }
        false
    }

    /// Rotate clockwise, trying each horizontal kick in order.
    pub fn rotate_piece(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        if let Some(piece) = self.current_piece {
            let rotated = piece.rotate_clockwise();
            for kick in TETRIS_KICKS {
                let kicked = rotated.shifted(kick, 0);
                if self.is_valid_position(&kicked) {
                    self.current_piece = Some(kicked);
                    return true;
                }
            }
        }
        false
    }

    /// One gravity step: fall a row, or lock if the piece is resting.
    /// Returns true if the piece moved.
    pub fn step_down(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        if self.move_piece(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    pub fn soft_drop(&mut self) {
        self.step_down();
    }

    pub fn hard_drop(&mut self) {
        if !self.can_act() {
            return;
        }
        while self.move_piece(0, 1) {}
        self.lock_piece();
    }

    pub fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };
        self.phase = Phase::Locking;

        let mut locked_out = false;
        for (x, y) in piece.get_blocks() {
            if y < 0 {
                locked_out = true;
            } else if y < TETRIS_ROWS as i32 && x >= 0 && x < TETRIS_COLS as i32 {
                self.board[y as usize][x as usize] = piece.piece_type.id();
            }
        }

        let lines = self.clear_lines();
        if lines > 0 {
            self.lines_cleared += lines;
            self.score += line_clear_points(lines);
            log::debug!("tetris: cleared {lines} lines, score {}", self.score);
        }

        // A piece that comes to rest partly above the field ends the game.
        if locked_out {
            self.game_over();
            return;
        }

        self.spawn_piece();
    }

    /// Remove full rows, shifting the rest down. Returns the number removed.
    pub fn clear_lines(&mut self) -> u32 {
        let kept: Vec<[u8; TETRIS_COLS]> = self
            .board
            .iter()
            .filter(|row| !is_row_full(&row[..]))
            .copied()
            .collect();
        let cleared = TETRIS_ROWS - kept.len();
        if cleared == 0 {
            return 0;
        }

        let mut board: Board = empty_grid();
        board[cleared..].copy_from_slice(&kept);
        self.board = board;
        cleared as u32
    }

    /// Board with the falling piece drawn in.
    pub fn visible_board(&self) -> Board {
        let mut board = self.board;
        if let Some(piece) = &self.current_piece {
            for (x, y) in piece.get_blocks() {
                if y >= 0 && y < TETRIS_ROWS as i32 && x >= 0 && x < TETRIS_COLS as i32 {
                    board[y as usize][x as usize] = piece.piece_type.id();
                }
            }
        }
        board
    }

    pub fn set_cell(&mut self, x: usize, y: usize, value: u8) {
        self.board[y][x] = value;
    }

    /// Replace the falling piece, e.g. to set up a scenario.
    pub fn set_current_piece(&mut self, piece: Piece) {
        self.current_piece = Some(piece);
        self.phase = Phase::Active;
    }
}

impl Simulation for Tetris {
    fn tick(&mut self) {
        self.step_down();
    }

    fn tick_interval(&self) -> Option<Duration> {
        Some(self.gravity)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn toggle_pause(&mut self) {
        if self.phase != Phase::GameOver {
            self.paused = !self.paused;
        }
    }

    fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    fn reset(&mut self) {
        self.board = empty_grid();
        self.current_piece = None;
        self.score = 0;
        self.lines_cleared = 0;
        self.paused = false;
        self.next_piece = Self::random_type(&mut self.rng);
        self.spawn_piece();
    }

    fn score(&self) -> u32 {
        self.score
    }
}
