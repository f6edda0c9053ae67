//! Falling-block puzzle engine driven by a gravity clock and discrete commands.
//!
//! The library holds the game rules only: shapes, board, collision, locking,
//! line clears, scoring and the tick scheduler. Rendering, input polling and
//! frame pacing live in the `tick-tetris` binary.

pub mod board;
pub mod game;
pub mod piece;
pub mod scoring;
pub mod shape;
pub mod source;

pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::{Command, GameEvent, GameState, LockReport, Phase, Snapshot};
pub use piece::ActivePiece;
pub use scoring::{gravity_interval_ms, level_for_lines, line_clear_points, ScoreBoard};
pub use shape::{occupied, Shape};
pub use source::{RandomShapes, SequenceShapes, ShapeSource};
