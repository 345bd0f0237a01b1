//! termcade - a terminal arcade
//!
//! Core modules:
//! - `game`: the five simulations (Tetris, Snake, Pong, 2048, Jeweled)
//! - `scheduler`: tick source driving the mounted game
//! - `input`: key mapping and held-key tracking
//! - `app`: menu and session lifecycle
//! - `ui`: ratatui rendering
//! - `settings`: JSON-loadable tuning

pub mod app;
pub mod constants;
pub mod game;
pub mod input;
pub mod rng;
pub mod scheduler;
pub mod settings;
pub mod ui;

pub use app::App;
pub use game::{Arcade, GameKind, Simulation};
pub use settings::Settings;
