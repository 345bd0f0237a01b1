use std::collections::BTreeSet;
use std::time::Duration;

use rand::Rng;

use crate::constants::{JEWELED_COLS, JEWELED_GEM_POINTS, JEWELED_GEM_TYPES, JEWELED_ROWS};
use crate::game::board::{empty_grid, Cell, Grid, EMPTY};
use crate::game::Simulation;
use crate::rng::{self, GameRng};
use crate::settings::JeweledSettings;

pub type Board = Grid<JEWELED_COLS, JEWELED_ROWS>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_adjacent(self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected,
    Deselected,
    /// Adjacent swap that would not create a match.
    Rejected,
    Swapped { gained: u32, cascades: u32 },
}

/// Every cell that is part of a horizontal or vertical run of three or more.
pub fn find_matches(board: &Board) -> BTreeSet<Pos> {
    let mut matches = BTreeSet::new();

    for r in 0..JEWELED_ROWS {
        let mut run = 1;
        for c in 1..=JEWELED_COLS {
            let same = c < JEWELED_COLS && board[r][c] != EMPTY && board[r][c] == board[r][c - 1];
            if same {
                run += 1;
            } else {
                if run >= 3 {
                    for k in c - run..c {
                        matches.insert(Pos::new(r, k));
                    }
                }
                run = 1;
            }
        }
    }

    for c in 0..JEWELED_COLS {
        let mut run = 1;
        for r in 1..=JEWELED_ROWS {
            let same = r < JEWELED_ROWS && board[r][c] != EMPTY && board[r][c] == board[r - 1][c];
            if same {
                run += 1;
            } else {
                if run >= 3 {
                    for k in r - run..r {
                        matches.insert(Pos::new(k, c));
                    }
                }
                run = 1;
            }
        }
    }

    matches
}

pub fn remove_matches(board: &mut Board, matches: &BTreeSet<Pos>) {
    for pos in matches {
        board[pos.row][pos.col] = EMPTY;
    }
}

/// Let gems fall to the bottom of each column, leaving holes on top.
pub fn collapse(board: &mut Board) {
    for c in 0..JEWELED_COLS {
        let mut write = JEWELED_ROWS;
        for r in (0..JEWELED_ROWS).rev() {
            if board[r][c] != EMPTY {
                write -= 1;
                board[write][c] = board[r][c];
            }
        }
        for r in 0..write {
            board[r][c] = EMPTY;
        }
    }
}

fn random_gem(rng: &mut GameRng) -> Cell {
    rng.gen_range(1..=JEWELED_GEM_TYPES)
}

fn refill(board: &mut Board, rng: &mut GameRng) {
    for cell in board.iter_mut().flatten() {
        if *cell == EMPTY {
            *cell = random_gem(rng);
        }
    }
}

/// Fill a board so that no run of three exists from the start.
fn make_board_no_initial_matches(rng: &mut GameRng) -> Board {
    let mut board: Board = empty_grid();
    for r in 0..JEWELED_ROWS {
        for c in 0..JEWELED_COLS {
            board[r][c] = loop {
                let gem = random_gem(rng);
                let makes_row = c >= 2 && board[r][c - 1] == gem && board[r][c - 2] == gem;
                let makes_col = r >= 2 && board[r - 1][c] == gem && board[r - 2][c] == gem;
                if !makes_row && !makes_col {
                    break gem;
                }
            };
        }
    }
    board
}

pub struct Jeweled {
    pub board: Board,
    pub score: u32,
    pub selected: Option<Pos>,
    /// Keyboard cursor, an alternative to clicking.
    pub cursor: Pos,
    pub message: Option<&'static str>,
    cascade_cap: u32,
    rng: GameRng,
}

impl Jeweled {
    pub fn new(settings: &JeweledSettings, seed: u64) -> Self {
        let mut rng = rng::seeded(seed);
        let board = make_board_no_initial_matches(&mut rng);
        Self {
            board,
            score: 0,
            selected: None,
            cursor: Pos::new(0, 0),
            message: None,
            cascade_cap: settings.cascade_cap,
            rng,
        }
    }

    /// A game on a given board, e.g. to set up a scenario.
    pub fn with_board(settings: &JeweledSettings, board: Board, seed: u64) -> Self {
        Self {
            board,
            ..Self::new(settings, seed)
        }
    }

    pub fn click(&mut self, pos: Pos) -> ClickOutcome {
        self.message = None;
        let Some(selected) = self.selected else {
            self.selected = Some(pos);
            return ClickOutcome::Selected;
        };
        if selected == pos {
            self.selected = None;
            return ClickOutcome::Deselected;
        }
        if !selected.is_adjacent(pos) {
            self.selected = Some(pos);
            return ClickOutcome::Selected;
        }

        self.selected = None;
        self.try_swap(selected, pos)
    }

    /// Swap two adjacent gems if that creates a match, then resolve cascades.
    pub fn try_swap(&mut self, a: Pos, b: Pos) -> ClickOutcome {
        let mut swapped = self.board;
        swapped[a.row][a.col] = self.board[b.row][b.col];
        swapped[b.row][b.col] = self.board[a.row][a.col];

        if find_matches(&swapped).is_empty() {
            self.message = Some("No match");
            return ClickOutcome::Rejected;
        }

        let (gained, cascades) = self.resolve_cascades(&mut swapped);
        self.board = swapped;
        self.score += gained;
        log::debug!("jeweled: +{gained} over {cascades} cascades");
        ClickOutcome::Swapped { gained, cascades }
    }

    /// Clear, collapse and refill until the board settles or the cap is hit.
    /// Returns points gained and the number of cascade levels resolved.
    pub fn resolve_cascades(&mut self, board: &mut Board) -> (u32, u32) {
        let mut gained = 0;
        let mut level = 0;
        while level < self.cascade_cap {
            let matches = find_matches(board);
            if matches.is_empty() {
                break;
            }
            level += 1;
            gained += matches.len() as u32 * JEWELED_GEM_POINTS * level;

            remove_matches(board, &matches);
            collapse(board);
            refill(board, &mut self.rng);
        }
        if level == self.cascade_cap && !find_matches(board).is_empty() {
            log::warn!("jeweled: cascade cap of {} reached", self.cascade_cap);
        }
        (gained, level)
    }

    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let row = (self.cursor.row as i32 + d_row).clamp(0, JEWELED_ROWS as i32 - 1);
        let col = (self.cursor.col as i32 + d_col).clamp(0, JEWELED_COLS as i32 - 1);
        self.cursor = Pos::new(row as usize, col as usize);
    }

    pub fn activate_cursor(&mut self) -> ClickOutcome {
        self.click(self.cursor)
    }
}

impl Simulation for Jeweled {
    fn tick(&mut self) {}

    fn tick_interval(&self) -> Option<Duration> {
        None
    }

    fn is_paused(&self) -> bool {
        false
    }

    fn toggle_pause(&mut self) {}

    fn is_over(&self) -> bool {
        false
    }

    fn reset(&mut self) {
        self.board = make_board_no_initial_matches(&mut self.rng);
        self.score = 0;
        self.selected = None;
        self.message = None;
    }

    fn score(&self) -> u32 {
        self.score
    }
}
