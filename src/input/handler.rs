use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEventKind};

use crate::constants::KEY_TIMEOUT;
use crate::game::jeweled::Jeweled;
use crate::game::pong::PaddleInput;
use crate::game::puzzle::{Move, Puzzle};
use crate::game::snake::{Direction, Snake};
use crate::game::tetris::Tetris;
use crate::game::Arcade;
use crate::input::held::{KeyHold, PaddleKey};

pub struct InputState {
    pub keys: HashMap<PaddleKey, KeyHold>,
    pub keyboard_enhancement_active: bool,
}

impl InputState {
    pub fn new(now: Instant) -> Self {
        let mut keys = HashMap::new();
        keys.insert(PaddleKey::Up, KeyHold::new(now));
        keys.insert(PaddleKey::Down, KeyHold::new(now));

        Self {
            keys,
            keyboard_enhancement_active: false,
        }
    }

    pub fn press_key(&mut self, key: PaddleKey, now: Instant) {
        if let Some(state) = self.keys.get_mut(&key) {
            state.press(now);
        }
    }

    pub fn release_key(&mut self, key: PaddleKey, now: Instant) {
        if let Some(state) = self.keys.get_mut(&key) {
            state.release(now);
        }
    }

    pub fn is_pressed(&self, key: PaddleKey) -> bool {
        self.keys.get(&key).map_or(false, |hold| hold.pressed)
    }

    pub fn release_all(&mut self, now: Instant) {
        for state in self.keys.values_mut() {
            state.release(now);
        }
    }

    /// Fallback release for terminals that never report key-up.
    pub fn check_timeouts(&mut self, now: Instant) {
        if self.keyboard_enhancement_active {
            return;
        }
        for state in self.keys.values_mut() {
            if state.pressed
                && now.duration_since(state.last_update) > Duration::from_millis(KEY_TIMEOUT)
            {
                state.release(now);
            }
        }
    }

    pub fn paddle_input(&self) -> PaddleInput {
        PaddleInput {
            up: self.is_pressed(PaddleKey::Up),
            down: self.is_pressed(PaddleKey::Down),
        }
    }
}

fn arrow_or_wasd(key_code: KeyCode) -> Option<Direction> {
    match key_code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn handle_tetris(game: &mut Tetris, key_code: KeyCode) {
    match key_code {
        KeyCode::Left => {
            game.move_piece(-1, 0);
        }
        KeyCode::Right => {
            game.move_piece(1, 0);
        }
        KeyCode::Down => game.soft_drop(),
        KeyCode::Up => {
            game.rotate_piece();
        }
        KeyCode::Char(' ') => game.hard_drop(),
        _ => {}
    }
}

fn handle_snake(game: &mut Snake, key_code: KeyCode) {
    if let Some(direction) = arrow_or_wasd(key_code) {
        game.steer(direction);
    }
}

fn handle_puzzle(game: &mut Puzzle, key_code: KeyCode) {
    let direction = match arrow_or_wasd(key_code) {
        Some(Direction::Left) => Move::Left,
        Some(Direction::Up) => Move::Up,
        Some(Direction::Right) => Move::Right,
        Some(Direction::Down) => Move::Down,
        None => return,
    };
    game.slide(direction);
}

fn handle_jeweled(game: &mut Jeweled, key_code: KeyCode) {
    match key_code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            game.activate_cursor();
        }
        _ => {
            if let Some(direction) = arrow_or_wasd(key_code) {
                let (d_col, d_row) = direction.delta();
                game.move_cursor(d_row, d_col);
            }
        }
    }
}

fn paddle_key(key_code: KeyCode) -> Option<PaddleKey> {
    match key_code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(PaddleKey::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(PaddleKey::Down),
        _ => None,
    }
}

/// Route one key event to the mounted game.
pub fn handle_input(
    arcade: &mut Arcade,
    input_state: &mut InputState,
    key_code: KeyCode,
    kind: KeyEventKind,
    now: Instant,
) {
    if kind == KeyEventKind::Release {
        if let (Arcade::Pong(_), Some(key)) = (&*arcade, paddle_key(key_code)) {
            input_state.release_key(key, now);
        }
        return;
    }

    match key_code {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if kind == KeyEventKind::Press {
                log::info!("{}: reset", arcade.kind());
                arcade.simulation_mut().reset();
                input_state.release_all(now);
            }
            return;
        }
        KeyCode::Char('p') | KeyCode::Char('P') if !matches!(arcade, Arcade::Jeweled(_)) => {
            if kind == KeyEventKind::Press {
                arcade.simulation_mut().toggle_pause();
            }
            return;
        }
        _ => {}
    }

    match arcade {
        Arcade::Tetris(game) => handle_tetris(game, key_code),
        Arcade::Snake(game) => handle_snake(game, key_code),
        Arcade::Puzzle(game) => handle_puzzle(game, key_code),
        Arcade::Jeweled(game) => handle_jeweled(game, key_code),
        Arcade::Pong(_) => {
            if let Some(key) = paddle_key(key_code) {
                input_state.press_key(key, now);
            }
        }
    }
}
