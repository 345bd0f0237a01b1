pub mod piece;
pub mod state;

pub use piece::{Piece, PieceType};
pub use state::{line_clear_points, Phase, Tetris};
