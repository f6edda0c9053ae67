use tracing::{debug, info, trace};

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::scoring::{gravity_interval_ms, ScoreBoard};
use crate::source::{RandomShapes, ShapeSource};

// ============================================================================
// Types
// ============================================================================

/// One player input per tick. `Quit` is the driver's business; the engine
/// treats it like `None`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Command {
    #[default]
    None,
    Left,
    Right,
    RotateCw,
    SoftDrop,
    HardDrop,
    Quit,
}

/// Locking is not a phase: lock, clear, score and respawn happen inside a
/// single call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Falling,
    GameOver,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceLocked,
    LinesCleared(u32),
    LevelUp(u32),
    GameOver,
    GameReset,
}

/// What a lock sequence did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LockReport {
    pub cleared: u32,
    pub points: u64,
    pub game_over: bool,
}

/// Read-only copy of everything a renderer needs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub board: Board,
    /// `None` once the game is over.
    pub active: Option<ActivePiece>,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl Snapshot {
    /// The board with the active piece drawn over it.
    pub fn composed(&self) -> Board {
        let mut board = self.board;
        if let Some(piece) = &self.active {
            for (x, y) in piece.cells() {
                if board.is_inside(x, y) && y >= 0 {
                    board.set(x as usize, y as usize, piece.shape.cell_value());
                }
            }
        }
        board
    }
}

// ============================================================================
// Game
// ============================================================================

pub struct GameState {
    board: Board,
    piece: ActivePiece,
    scores: ScoreBoard,
    phase: Phase,
    gravity_ms: u64,
    source: Box<dyn ShapeSource>,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_source(Box::new(RandomShapes::from_entropy()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(Box::new(RandomShapes::seeded(seed)))
    }

    pub fn with_source(mut source: Box<dyn ShapeSource>) -> Self {
        let piece = ActivePiece::spawn(source.next_shape());
        Self {
            board: Board::new(),
            piece,
            scores: ScoreBoard::new(),
            phase: Phase::Falling,
            gravity_ms: 0,
            source,
            events: Vec::new(),
        }
    }

    /// Starts from an arbitrary board and piece. Later spawns come from
    /// `source`.
    pub fn with_board(board: Board, piece: ActivePiece, source: Box<dyn ShapeSource>) -> Self {
        Self {
            board,
            piece,
            scores: ScoreBoard::new(),
            phase: Phase::Falling,
            gravity_ms: 0,
            source,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn score(&self) -> u64 {
        self.scores.score()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn lines(&self) -> u32 {
        self.scores.lines()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Milliseconds accumulated towards the next gravity step.
    pub fn gravity_clock_ms(&self) -> u64 {
        self.gravity_ms
    }

    pub fn fits(&self, piece: &ActivePiece) -> bool {
        !self
            .board
            .would_collide(piece.shape, piece.rotation as i32, piece.x, piece.y)
    }

    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_game_over() {
            return false;
        }
        let moved = self.piece.moved(dx, dy);
        if self.fits(&moved) {
            self.piece = moved;
            true
        } else {
            false
        }
    }

    /// Quarter turn in place. No wall kicks: a blocked rotation is refused.
    pub fn rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let rotated = self.piece.rotated();
        if self.fits(&rotated) {
            self.piece = rotated;
            true
        } else {
            false
        }
    }

    /// One row down, locking if the piece is resting on something.
    pub fn soft_drop(&mut self) -> Option<LockReport> {
        if self.is_game_over() {
            return None;
        }
        if self.move_piece(0, 1) {
            None
        } else {
            Some(self.lock_and_spawn())
        }
    }

    pub fn hard_drop(&mut self) -> Option<LockReport> {
        if self.is_game_over() {
            return None;
        }
        while self.move_piece(0, 1) {}
        Some(self.lock_and_spawn())
    }

    fn lock_and_spawn(&mut self) -> LockReport {
        let piece = self.piece;
        self.board.lock_piece(&piece);
        self.events.push(GameEvent::PieceLocked);

        let cleared = self.board.clear_full_rows();
        let delta = self.scores.apply_clear(cleared);
        if cleared > 0 {
            self.events.push(GameEvent::LinesCleared(cleared));
        }
        if delta.leveled_up {
            info!(level = self.level(), lines = self.lines(), "level up");
            self.events.push(GameEvent::LevelUp(self.level()));
        }
        debug!(
            shape = ?piece.shape,
            rotation = piece.rotation,
            x = piece.x,
            y = piece.y,
            cleared,
            points = delta.points,
            "piece locked"
        );

        self.spawn_next_piece();

        LockReport {
            cleared,
            points: delta.points,
            game_over: self.is_game_over(),
        }
    }

    /// Draws the next shape and places it at the spawn pose. A blocked spawn
    /// ends the game.
    pub fn spawn_next_piece(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.piece = ActivePiece::spawn(self.source.next_shape());
        debug!(shape = ?self.piece.shape, "spawned");

        if !self.fits(&self.piece) {
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver);
            info!(
                score = self.score(),
                level = self.level(),
                lines = self.lines(),
                "game over"
            );
        }
    }

    /// Advances the game by one driver cycle: `elapsed_ms` since the previous
    /// call, plus at most one command. Returns the lock performed this cycle,
    /// if any. At most one lock happens per call.
    pub fn tick(&mut self, elapsed_ms: u64, command: Command) -> Option<LockReport> {
        if self.is_game_over() {
            return None;
        }
        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);

        let report = match command {
            Command::Left => {
                self.move_piece(-1, 0);
                None
            }
            Command::Right => {
                self.move_piece(1, 0);
                None
            }
            Command::RotateCw => {
                self.rotate();
                None
            }
            Command::SoftDrop => {
                let report = self.soft_drop();
                self.gravity_ms = 0;
                report
            }
            Command::HardDrop => {
                let report = self.hard_drop();
                self.gravity_ms = 0;
                report
            }
            Command::None | Command::Quit => None,
        };
        if report.is_some() || self.is_game_over() {
            return report;
        }

        let interval = gravity_interval_ms(self.level());
        if self.gravity_ms < interval {
            return None;
        }
        self.gravity_ms = 0;
        trace!(interval, y = self.piece.y, "gravity step");
        self.soft_drop()
    }

    /// Empty board, zeroed score, fresh piece from the current source.
    pub fn reset(&mut self) {
        self.board.reset();
        self.scores = ScoreBoard::new();
        self.phase = Phase::Falling;
        self.gravity_ms = 0;
        self.events.clear();
        self.events.push(GameEvent::GameReset);
        info!("game reset");
        self.spawn_next_piece();
    }

    /// Like [`GameState::reset`], but reseeds shape selection first so the
    /// following game is reproducible.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.source = Box::new(RandomShapes::seeded(seed));
        self.reset();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            active: (!self.is_game_over()).then_some(self.piece),
            score: self.score(),
            level: self.level(),
            lines: self.lines(),
            game_over: self.is_game_over(),
        }
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
