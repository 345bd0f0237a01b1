//! Menu screen and the one mounted game session.
//!
//! `App` owns the live `Arcade`, the `Ticker` driving it and the held-key
//! state. The event loop in `main` feeds it key/mouse events and calls
//! `update` once per frame; rendering only reads it.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::game::{Arcade, GameKind};
use crate::input::{handle_input, InputState};
use crate::scheduler::{Ticker, TickerState};
use crate::settings::Settings;
use crate::ui;

pub enum Screen {
    Menu,
    Playing(Arcade),
}

pub struct App {
    pub screen: Screen,
    pub menu_index: usize,
    pub settings: Settings,
    pub input_state: InputState,
    /// Last drawn terminal area, for mapping mouse clicks onto cells.
    pub frame_area: Rect,
    pub should_quit: bool,
    ticker: Option<Ticker>,
    seed: u64,
    sessions: u64,
    reported_over: bool,
}

impl App {
    pub fn new(settings: Settings, seed: u64, now: Instant) -> Self {
        Self {
            screen: Screen::Menu,
            menu_index: 0,
            settings,
            input_state: InputState::new(now),
            frame_area: Rect::default(),
            should_quit: false,
            ticker: None,
            seed,
            sessions: 0,
            reported_over: false,
        }
    }

    pub fn arcade(&self) -> Option<&Arcade> {
        match &self.screen {
            Screen::Playing(arcade) => Some(arcade),
            Screen::Menu => None,
        }
    }

    pub fn ticker_state(&self) -> Option<TickerState> {
        self.ticker.as_ref().map(Ticker::state)
    }

    /// Mount a fresh session of `kind`, replacing whatever was running.
    pub fn launch(&mut self, kind: GameKind, now: Instant) {
        self.unmount();
        // Each session gets its own seed so replays through the menu differ,
        // while a fixed base seed still reproduces the whole run.
        let seed = self.seed.wrapping_add(self.sessions);
        self.sessions += 1;

        let arcade = Arcade::mount(kind, &self.settings, seed);
        self.ticker = arcade
            .simulation()
            .tick_interval()
            .map(|interval| Ticker::new(interval, now));
        self.input_state.release_all(now);
        self.reported_over = false;
        if let Some(index) = GameKind::ALL.iter().position(|&k| k == kind) {
            self.menu_index = index;
        }
        log::info!("{kind}: mounted with seed {seed}");
        self.screen = Screen::Playing(arcade);
    }

    /// Drop the running session, if any, and cancel its ticker.
    pub fn unmount(&mut self) {
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.cancel();
        }
        self.ticker = None;
        if let Screen::Playing(arcade) = std::mem::replace(&mut self.screen, Screen::Menu) {
            log::info!(
                "{}: unmounted at score {}",
                arcade.kind(),
                arcade.simulation().score()
            );
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if matches!(self.screen, Screen::Playing(_)) && key.code == KeyCode::Esc {
            if key.kind == KeyEventKind::Press {
                self.unmount();
            }
            return;
        }

        match &mut self.screen {
            Screen::Menu => {
                if key.kind == KeyEventKind::Press {
                    self.on_menu_key(key.code, now);
                }
            }
            Screen::Playing(arcade) => {
                handle_input(arcade, &mut self.input_state, key.code, key.kind, now);
                self.sync_ticker(now);
            }
        }
    }

    fn on_menu_key(&mut self, code: KeyCode, now: Instant) {
        let count = GameKind::ALL.len();
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => {
                self.menu_index = (self.menu_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
                self.menu_index = (self.menu_index + 1) % count;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.launch(GameKind::ALL[self.menu_index], now);
            }
            KeyCode::Char(c) => {
                if let Some(kind) = c
                    .to_digit(10)
                    .and_then(|d| GameKind::ALL.get((d as usize).wrapping_sub(1)))
                {
                    self.launch(*kind, now);
                }
            }
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let area = self.frame_area;
        if let Screen::Playing(Arcade::Jeweled(game)) = &mut self.screen {
            let board_area = ui::jeweled_board_area(area);
            if let Some(pos) = ui::jeweled_cell_at(board_area, mouse.column, mouse.row) {
                game.cursor = pos;
                game.click(pos);
            }
        }
    }

    /// Per-frame housekeeping: release stale keys and run a due tick.
    pub fn update(&mut self, now: Instant) {
        self.input_state.check_timeouts(now);
        let Screen::Playing(arcade) = &mut self.screen else {
            return;
        };
        if let Arcade::Pong(pong) = arcade {
            pong.input = self.input_state.paddle_input();
        }

        let due = self.ticker.as_mut().map_or(false, |ticker| ticker.poll(now));
        if due {
            arcade.simulation_mut().tick();
        }
        self.sync_ticker(now);
    }

    /// Keep the ticker in step with the game: suspended while paused or over,
    /// and at whatever period the game currently wants.
    fn sync_ticker(&mut self, now: Instant) {
        let Screen::Playing(arcade) = &self.screen else {
            return;
        };
        let sim = arcade.simulation();

        if sim.is_over() && !self.reported_over {
            log::info!("{}: game over with score {}", arcade.kind(), sim.score());
        }
        self.reported_over = sim.is_over();

        let Some(ticker) = self.ticker.as_mut() else {
            return;
        };
        if let Some(interval) = sim.tick_interval() {
            ticker.set_interval(interval);
        }
        if sim.is_paused() || sim.is_over() {
            ticker.suspend();
        } else {
            ticker.resume(now);
        }
    }
}
