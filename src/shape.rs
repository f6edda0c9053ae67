// ============================================================================
// Shape Table
// ============================================================================

/// Side length of the square grid every shape is defined on.
pub const SHAPE_SIZE: usize = 4;

type Grid = [[u8; SHAPE_SIZE]; SHAPE_SIZE];

// Canonical (rotation 0) grids, row-major, indexed by `Shape::index()`.
const GRIDS: [Grid; 7] = [
    // I
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    // O
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // T
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // S
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // Z
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // J
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // L
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Shape {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::S,
        Shape::Z,
        Shape::J,
        Shape::L,
    ];

    /// Table index in `0..7`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Panics if `index >= 7`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Self::ALL.len(), "shape index {index} out of range");
        Self::ALL[index]
    }

    /// Value written into a board cell when this shape locks (`1..=7`).
    pub fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`Shape::cell_value`]; `None` for empty (0) or junk values.
    pub fn from_cell_value(value: u8) -> Option<Self> {
        match value {
            1..=7 => Some(Self::ALL[value as usize - 1]),
            _ => None,
        }
    }
}

/// Whether cell `(row, col)` of `shape` is filled after `rotation` quarter
/// turns. Any rotation is accepted and reduced mod 4, so negative values
/// turn the other way.
///
/// Panics if `row` or `col` is outside `0..4`.
pub fn occupied(shape: Shape, rotation: i32, row: usize, col: usize) -> bool {
    assert!(
        row < SHAPE_SIZE && col < SHAPE_SIZE,
        "shape cell ({row}, {col}) out of range"
    );
    let grid = &GRIDS[shape.index()];
    let last = SHAPE_SIZE - 1;
    let value = match rotation.rem_euclid(4) {
        0 => grid[row][col],
        1 => grid[last - col][row],
        2 => grid[last - row][last - col],
        _ => grid[col][last - row],
    };
    value != 0
}
