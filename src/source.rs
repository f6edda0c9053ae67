use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shape::Shape;

/// Supplies the shape of each newly spawned piece.
pub trait ShapeSource: Send {
    fn next_shape(&mut self) -> Shape;
}

/// Uniform choice over the seven shapes.
pub struct RandomShapes {
    rng: StdRng,
}

impl RandomShapes {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same shape sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> Shape {
        Shape::from_index(self.rng.gen_range(0..Shape::ALL.len()))
    }
}

/// Cycles through a fixed list. Used to script games in tests.
pub struct SequenceShapes {
    shapes: Vec<Shape>,
    index: usize,
}

impl SequenceShapes {
    /// Panics if `shapes` is empty.
    pub fn new(shapes: Vec<Shape>) -> Self {
        assert!(!shapes.is_empty(), "shape sequence must not be empty");
        Self { shapes, index: 0 }
    }
}

impl ShapeSource for SequenceShapes {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        shape
    }
}
