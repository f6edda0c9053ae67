use crate::board::BOARD_WIDTH;
use crate::shape::{occupied, Shape, SHAPE_SIZE};

/// Row the bounding box starts on when a piece spawns; one row above the board.
pub const SPAWN_Y: i32 = -1;

/// The falling piece: a shape, a rotation in `0..4`, and the board position
/// of its 4x4 bounding box's top-left corner. `y` may be negative.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ActivePiece {
    pub shape: Shape,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Rotation 0, horizontally centred, one row above the board.
    pub fn spawn(shape: Shape) -> Self {
        Self::new_at(shape, BOARD_WIDTH as i32 / 2 - 2, SPAWN_Y)
    }

    pub fn new_at(shape: Shape, x: i32, y: i32) -> Self {
        Self {
            shape,
            rotation: 0,
            x,
            y,
        }
    }

    pub fn with_rotation(mut self, rotation: u8) -> Self {
        self.rotation = rotation % 4;
        self
    }

    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// One quarter turn, same position.
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }

    /// Board coordinates `(x, y)` of the four filled cells, top to bottom.
    pub fn cells(&self) -> [(i32, i32); 4] {
        let mut cells = [(0, 0); 4];
        let mut n = 0;
        for r in 0..SHAPE_SIZE {
            for c in 0..SHAPE_SIZE {
                if occupied(self.shape, self.rotation as i32, r, c) {
                    cells[n] = (self.x + c as i32, self.y + r as i32);
                    n += 1;
                }
            }
        }
        debug_assert_eq!(n, 4, "every tetromino has four cells");
        cells
    }
}
