/// A cell holds 0 for empty or the id of its occupant.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

pub type Grid<const W: usize, const H: usize> = [[Cell; W]; H];

pub fn empty_grid<const W: usize, const H: usize>() -> Grid<W, H> {
    [[EMPTY; W]; H]
}

/// Grid coordinate check for signed positions.
pub fn in_bounds<const W: usize, const H: usize>(x: i32, y: i32) -> bool {
    x >= 0 && x < W as i32 && y >= 0 && y < H as i32
}

pub fn is_row_full(row: &[Cell]) -> bool {
    row.iter().all(|&cell| cell != EMPTY)
}
