use crate::constants::{TETRIS_COLS, TETRIS_SPAWN_Y};
use crate::game::board::Cell;

/// One orientation of a tetromino, tight bounding box, row-major.
pub type Shape = &'static [&'static [u8]];

const I_ROTATIONS: &[Shape] = &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const O_ROTATIONS: &[Shape] = &[&[&[1, 1], &[1, 1]]];

const T_ROTATIONS: &[Shape] = &[
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
];

const S_ROTATIONS: &[Shape] = &[&[&[0, 1, 1], &[1, 1, 0]], &[&[1, 0], &[1, 1], &[0, 1]]];

const Z_ROTATIONS: &[Shape] = &[&[&[1, 1, 0], &[0, 1, 1]], &[&[0, 1], &[1, 1], &[1, 0]]];

const J_ROTATIONS: &[Shape] = &[
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

const L_ROTATIONS: &[Shape] = &[
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::O,
        PieceType::T,
        PieceType::S,
        PieceType::Z,
        PieceType::J,
        PieceType::L,
    ];

    /// Board id of a locked block of this type (1..=7).
    pub fn id(self) -> Cell {
        match self {
            PieceType::I => 1,
            PieceType::O => 2,
            PieceType::T => 3,
            PieceType::S => 4,
            PieceType::Z => 5,
            PieceType::J => 6,
            PieceType::L => 7,
        }
    }

    pub fn rotations(self) -> &'static [Shape] {
        match self {
            PieceType::I => I_ROTATIONS,
            PieceType::O => O_ROTATIONS,
            PieceType::T => T_ROTATIONS,
            PieceType::S => S_ROTATIONS,
            PieceType::Z => Z_ROTATIONS,
            PieceType::J => J_ROTATIONS,
            PieceType::L => L_ROTATIONS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// A piece at its spawn position: orientation 0, centered, above the field.
    pub fn new(piece_type: PieceType) -> Self {
        let width = piece_type.rotations()[0][0].len() as i32;
        Self {
            piece_type,
            rotation: 0,
            x: (TETRIS_COLS as i32 - width) / 2,
            y: TETRIS_SPAWN_Y,
        }
    }

    pub fn shape(&self) -> Shape {
        self.piece_type.rotations()[self.rotation]
    }

    pub fn width(&self) -> usize {
        self.shape().iter().map(|row| row.len()).max().unwrap_or(0)
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotate_clockwise(&self) -> Self {
        let count = self.piece_type.rotations().len();
        Self {
            rotation: (self.rotation + 1) % count,
            ..*self
        }
    }

    pub fn get_blocks(&self) -> Vec<(i32, i32)> {
        let mut blocks = Vec::new();
        for (i, row) in self.shape().iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    blocks.push((self.x + j as i32, self.y + i as i32));
                }
            }
        }
        blocks
    }
}
