pub mod board;
pub mod jeweled;
pub mod pong;
pub mod puzzle;
pub mod snake;
pub mod tetris;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::settings::Settings;

pub use jeweled::Jeweled;
pub use pong::Pong;
pub use puzzle::Puzzle;
pub use snake::Snake;
pub use tetris::Tetris;

/// The shape every game shares: a step function driven by a tick source,
/// plus the pause/over/reset controls the app needs.
pub trait Simulation {
    /// Advance one step. A no-op while paused or after game over.
    fn tick(&mut self);

    /// How often `tick` should run, or `None` for games that only move on input.
    fn tick_interval(&self) -> Option<Duration>;

    fn is_paused(&self) -> bool;

    fn toggle_pause(&mut self);

    fn is_over(&self) -> bool;

    fn reset(&mut self);

    fn score(&self) -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKind {
    Tetris,
    Snake,
    Pong,
    Puzzle,
    Jeweled,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Tetris,
        GameKind::Snake,
        GameKind::Pong,
        GameKind::Puzzle,
        GameKind::Jeweled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Tetris => "tetris",
            GameKind::Snake => "snake",
            GameKind::Pong => "pong",
            GameKind::Puzzle => "puzzle",
            GameKind::Jeweled => "jeweled",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Tetris => "Tetris",
            GameKind::Snake => "Snake",
            GameKind::Pong => "Pong",
            GameKind::Puzzle => "Puzzle",
            GameKind::Jeweled => "Jeweled",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameKind::Tetris => "Stack falling pieces and clear lines",
            GameKind::Snake => "Eat, grow, and stay off the walls",
            GameKind::Pong => "First to seven against the machine",
            GameKind::Puzzle => "Slide and merge tiles to reach 2048",
            GameKind::Jeweled => "Swap gems to line up three or more",
        }
    }

    pub fn controls(self) -> &'static str {
        match self {
            GameKind::Tetris => "←→ move · ↓ soft drop · ↑ rotate · Space hard drop · P pause · R reset",
            GameKind::Snake => "←→↑↓ / WASD · P pause · R reset",
            GameKind::Pong => "W/S or ↑/↓ · P pause · R reset",
            GameKind::Puzzle => "←↑→↓ / WASD · P pause · R reset",
            GameKind::Jeweled => "Click two adjacent gems · arrows + Space also work · R reset",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown game '{s}'"))
    }
}

/// One mounted game session.
pub enum Arcade {
    Tetris(Tetris),
    Snake(Snake),
    Pong(Pong),
    Puzzle(Puzzle),
    Jeweled(Jeweled),
}

impl Arcade {
    pub fn mount(kind: GameKind, settings: &Settings, seed: u64) -> Self {
        match kind {
            GameKind::Tetris => Arcade::Tetris(Tetris::new(&settings.tetris, seed)),
            GameKind::Snake => Arcade::Snake(Snake::new(&settings.snake, seed)),
            GameKind::Pong => Arcade::Pong(Pong::new(&settings.pong, seed)),
            GameKind::Puzzle => Arcade::Puzzle(Puzzle::new(seed)),
            GameKind::Jeweled => Arcade::Jeweled(Jeweled::new(&settings.jeweled, seed)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Arcade::Tetris(_) => GameKind::Tetris,
            Arcade::Snake(_) => GameKind::Snake,
            Arcade::Pong(_) => GameKind::Pong,
            Arcade::Puzzle(_) => GameKind::Puzzle,
            Arcade::Jeweled(_) => GameKind::Jeweled,
        }
    }

    pub fn simulation(&self) -> &dyn Simulation {
        match self {
            Arcade::Tetris(game) => game,
            Arcade::Snake(game) => game,
            Arcade::Pong(game) => game,
            Arcade::Puzzle(game) => game,
            Arcade::Jeweled(game) => game,
        }
    }

    pub fn simulation_mut(&mut self) -> &mut dyn Simulation {
        match self {
            Arcade::Tetris(game) => game,
            Arcade::Snake(game) => game,
            Arcade::Pong(game) => game,
            Arcade::Puzzle(game) => game,
            Arcade::Jeweled(game) => game,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in GameKind::ALL {
            assert_eq!(kind.name().parse::<GameKind>(), Ok(kind));
        }
        assert_eq!("TETRIS".parse::<GameKind>(), Ok(GameKind::Tetris));
        assert!("pacman".parse::<GameKind>().is_err());
    }

    #[test]
    fn mounted_games_start_fresh() {
        let settings = Settings::default();
        for kind in GameKind::ALL {
            let arcade = Arcade::mount(kind, &settings, 1);
            assert_eq!(arcade.kind(), kind);
            let sim = arcade.simulation();
            assert_eq!(sim.score(), 0);
            assert!(!sim.is_over());
            assert!(!sim.is_paused());
        }
    }

    #[test]
    fn only_input_driven_games_lack_a_timer() {
        let settings = Settings::default();
        let timed: Vec<GameKind> = GameKind::ALL
            .into_iter()
            .filter(|&kind| Arcade::mount(kind, &settings, 1).simulation().tick_interval().is_some())
            .collect();
        assert_eq!(timed, vec![GameKind::Tetris, GameKind::Snake, GameKind::Pong]);
    }
}
