mod renderer;

pub use renderer::{jeweled_board_area, jeweled_cell_at, ui};
