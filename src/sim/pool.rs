//! Fixed-size pipe pool
//!
//! Five pipes scroll left forever. A pipe that leaves the screen is moved back
//! to the right edge with a fresh gap instead of being reallocated.

use rand::Rng;

use crate::consts::*;

/// One pipe pair (upper and lower segment sharing an x position)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    /// Left edge
    pub x: i32,
    /// Top edge of the upper segment sprite
    pub upper_y: i32,
    /// Top edge of the lower segment sprite
    pub lower_y: i32,
}

impl Obstacle {
    /// Create a pipe at `x` with a randomized gap
    pub fn new<R: Rng>(x: i32, rng: &mut R) -> Self {
        let (upper_y, lower_y) = roll_gap(rng);
        Self {
            x,
            upper_y,
            lower_y,
        }
    }

    /// Bottom edge of the upper segment (top of the gap)
    pub fn gap_top(&self) -> i32 {
        self.upper_y + PIPE_HEIGHT
    }

    /// Top edge of the lower segment (bottom of the gap)
    pub fn gap_bottom(&self) -> i32 {
        self.lower_y
    }

    /// Vertical opening of the gap
    pub fn gap_size(&self) -> i32 {
        self.gap_bottom() - self.gap_top()
    }

    /// Right edge
    pub fn trailing_edge(&self) -> i32 {
        self.x + PIPE_WIDTH
    }

    /// Move back to the right edge with a new gap
    fn recycle<R: Rng>(&mut self, rng: &mut R) {
        *self = Obstacle::new(SCREEN_WIDTH, rng);
    }
}

/// Draw a gap placement `(upper_y, lower_y)`.
///
/// The upper segment's top edge is uniform in `[-PIPE_HEIGHT, 0]` and the lower
/// segment's top edge uniform in `[SCREEN_HEIGHT - PIPE_HEIGHT, SCREEN_HEIGHT]`.
/// When the opening comes out narrower than [`MIN_GAP`] the upper segment is
/// pushed fully off-screen, which leaves a gap of at least
/// `SCREEN_HEIGHT - PIPE_HEIGHT`.
pub fn roll_gap<R: Rng>(rng: &mut R) -> (i32, i32) {
    let mut upper_y = rng.random_range(0..=PIPE_HEIGHT) - PIPE_HEIGHT;
    let lower_y = rng.random_range(0..=PIPE_HEIGHT) + SCREEN_HEIGHT - PIPE_HEIGHT;
    if lower_y - (upper_y + PIPE_HEIGHT) < MIN_GAP {
        upper_y = -PIPE_HEIGHT;
    }
    (upper_y, lower_y)
}

/// The pipe slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstaclePool {
    slots: [Obstacle; POOL_SIZE],
}

impl ObstaclePool {
    /// Lay out all pipes off the right edge, spaced `SCREEN_WIDTH / POOL_SIZE` apart
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let spacing = SCREEN_WIDTH / POOL_SIZE as i32;
        let slots = std::array::from_fn(|i| Obstacle::new(SCREEN_WIDTH + i as i32 * spacing, rng));
        Self { slots }
    }

    /// Build a pool from explicit slots (tests and replays)
    pub fn from_slots(slots: [Obstacle; POOL_SIZE]) -> Self {
        Self { slots }
    }

    /// Scroll every pipe left by `speed`, recycling the ones that left the screen.
    ///
    /// Returns the recycled slot indices in slot order.
    pub fn advance<R: Rng>(&mut self, speed: i32, rng: &mut R) -> Vec<usize> {
        let mut recycled = Vec::new();
        for (i, obstacle) in self.slots.iter_mut().enumerate() {
            obstacle.x -= speed;
            if obstacle.x < -PIPE_WIDTH {
                obstacle.recycle(rng);
                recycled.push(i);
            }
        }
        recycled
    }

    pub fn get(&self, slot: usize) -> &Obstacle {
        &self.slots[slot]
    }

    pub fn get_mut(&mut self, slot: usize) -> &mut Obstacle {
        &mut self.slots[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
