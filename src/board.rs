use crate::piece::ActivePiece;
use crate::shape::{occupied, Shape, SHAPE_SIZE};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

const EMPTY: u8 = 0;

/// Locked cells of the playfield, row-major. 0 is empty; 1..=7 is the
/// `cell_value` of the shape that locked there.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [u8; BOARD_WIDTH * BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_WIDTH * BOARD_HEIGHT],
        }
    }

    pub fn reset(&mut self) {
        self.cells.fill(EMPTY);
    }

    fn offset(x: usize, y: usize) -> usize {
        assert!(
            x < BOARD_WIDTH && y < BOARD_HEIGHT,
            "cell ({x}, {y}) outside {BOARD_WIDTH}x{BOARD_HEIGHT} board"
        );
        y * BOARD_WIDTH + x
    }

    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.cells[Self::offset(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        assert!(value <= 7, "cell value {value} out of range");
        self.cells[Self::offset(x, y)] = value;
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = Self::offset(0, y);
        &self.cells[start..start + BOARD_WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(BOARD_WIDTH)
    }

    /// Inside the playfield or anywhere above it.
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH as i32 && y < BOARD_HEIGHT as i32
    }

    /// Space above the board is never locked.
    pub fn is_locked(&self, x: i32, y: i32) -> bool {
        if y < 0 {
            return false;
        }
        assert!(x >= 0, "column {x} outside board");
        self.cell(x as usize, y as usize) != EMPTY
    }

    /// True if `shape` at `rotation` with its box at `(x, y)` would leave the
    /// side walls, reach the floor, or overlap a locked cell.
    pub fn would_collide(&self, shape: Shape, rotation: i32, x: i32, y: i32) -> bool {
        for r in 0..SHAPE_SIZE {
            for c in 0..SHAPE_SIZE {
                if !occupied(shape, rotation, r, c) {
                    continue;
                }
                let bx = x + c as i32;
                let by = y + r as i32;
                if !self.is_inside(bx, by) || self.is_locked(bx, by) {
                    return true;
                }
            }
        }
        false
    }

    /// Writes the piece's cells into the board. Cells still above the board
    /// are dropped.
    pub fn lock_piece(&mut self, piece: &ActivePiece) {
        let value = piece.shape.cell_value();
        for (x, y) in piece.cells() {
            if y >= 0 && y < BOARD_HEIGHT as i32 && x >= 0 && x < BOARD_WIDTH as i32 {
                self.set(x as usize, y as usize, value);
            }
        }
    }

    /// Removes every full row, pulling the rows above down, and returns how
    /// many went.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                // Shift rows [0, row) down one and empty the top row.
                self.cells.copy_within(0..row * BOARD_WIDTH, BOARD_WIDTH);
                self.cells[..BOARD_WIDTH].fill(EMPTY);
                cleared += 1;
                // Don't advance - the row above has moved into this index
            } else {
                y -= 1;
            }
        }

        cleared
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    pub fn filled_in_row(&self, y: usize) -> usize {
        self.row(y).iter().filter(|&&cell| cell != EMPTY).count()
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set(x, y, Shape::T.cell_value());
        }
    }

    pub fn fill_row_with_gap(board: &mut Board, y: usize, gap_x: usize) {
        for x in 0..BOARD_WIDTH {
            if x != gap_x {
                board.set(x, y, Shape::T.cell_value());
            }
        }
    }
}
