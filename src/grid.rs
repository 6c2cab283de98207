// grid.rs - Grid types for the 8x8 pad surface

pub const ROWS: usize = 8;
pub const COLS: usize = 8;
pub const CELLS: usize = ROWS * COLS;

/// Row-major cell states.
pub type TGrid = [u8; CELLS];

/// Row-major index of a position, both coordinates wrapped onto the torus.
pub fn index(row: i32, col: i32) -> usize {
    let row = row.rem_euclid(ROWS as i32) as usize;
    let col = col.rem_euclid(COLS as i32) as usize;
    COLS * row + col
}

pub fn position(index: usize) -> (u8, u8) {
    ((index / COLS) as u8, (index % COLS) as u8)
}
