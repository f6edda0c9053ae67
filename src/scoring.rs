// ============================================================================
// Configuration
// ============================================================================

pub const LINES_PER_LEVEL: u32 = 10;

// Scoring, multiplied by the level the clear happened on
pub const SCORE_SINGLE: u32 = 40;
pub const SCORE_DOUBLE: u32 = 100;
pub const SCORE_TRIPLE: u32 = 300;
pub const SCORE_TETRIS: u32 = 1200;

// Gravity timing (in milliseconds)
pub const BASE_GRAVITY_MS: u64 = 1000;
pub const GRAVITY_STEP_MS: u64 = 80;
pub const MIN_GRAVITY_MS: u64 = 100;

// ============================================================================
// Scoring
// ============================================================================

/// Base points for clearing `lines` rows at once. Anything outside 1..=4
/// scores nothing.
pub fn line_clear_points(lines: u32) -> u32 {
    match lines {
        1 => SCORE_SINGLE,
        2 => SCORE_DOUBLE,
        3 => SCORE_TRIPLE,
        4 => SCORE_TETRIS,
        _ => 0,
    }
}

pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Milliseconds between forced downward steps at `level`.
pub fn gravity_interval_ms(level: u32) -> u64 {
    let speed_reduction = u64::from(level.saturating_sub(1)) * GRAVITY_STEP_MS;
    BASE_GRAVITY_MS
        .saturating_sub(speed_reduction)
        .max(MIN_GRAVITY_MS)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ScoreDelta {
    pub points: u64,
    pub leveled_up: bool,
}

/// Score, level and line total. The level is always derived from the line
/// total, so it can only go up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScoreBoard {
    score: u64,
    level: u32,
    lines: u32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Credits a clear of `cleared` rows at the current level, then moves the
    /// level up if the new line total crossed a threshold.
    pub fn apply_clear(&mut self, cleared: u32) -> ScoreDelta {
        let points = u64::from(line_clear_points(cleared)) * u64::from(self.level);
        self.score += points;
        self.lines += cleared;

        let new_level = level_for_lines(self.lines);
        let leveled_up = new_level > self.level;
        self.level = new_level;

        ScoreDelta { points, leveled_up }
    }
}
