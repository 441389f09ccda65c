//! Game state and core simulation types
//!
//! Everything one run needs lives in [`GameState`]; the screen machine owns it
//! and passes it by reference to the tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Crash;
use super::pool::ObstaclePool;
use crate::consts::*;

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Top edge in screen pixels (grows downward)
    pub y: i32,
    /// Vertical velocity in pixels per tick (positive = falling)
    pub velocity: i32,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            y: BIRD_START_Y,
            velocity: 0,
        }
    }
}

impl Actor {
    /// Fixed horizontal position
    pub const X: i32 = BIRD_X;

    /// Replace the current velocity with an upward impulse
    pub fn jump(&mut self) {
        self.velocity = -JUMP_STRENGTH;
    }

    /// One Euler step: gravity into velocity, velocity into position
    pub fn integrate(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity;
    }

    /// Bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + BIRD_HEIGHT
    }
}

/// Per-run bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Pipes cleared this run
    pub score: u32,
    /// Set on the tick the bird crashes
    pub is_over: bool,
    /// Slot of the pipe the bird must clear next (round-robin)
    pub tracked: usize,
    /// What ended the run
    pub crash: Option<Crash>,
}

/// Bird color variant (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skin {
    Blue,
    Red,
    #[default]
    Yellow,
}

impl Skin {
    pub const ALL: [Skin; 3] = [Skin::Blue, Skin::Red, Skin::Yellow];

    /// Index into per-skin asset tables
    pub fn index(self) -> usize {
        match self {
            Skin::Blue => 0,
            Skin::Red => 1,
            Skin::Yellow => 2,
        }
    }

    /// File name prefix of the sprite set
    pub fn as_str(self) -> &'static str {
        match self {
            Skin::Blue => "bluebird",
            Skin::Red => "redbird",
            Skin::Yellow => "yellowbird",
        }
    }

    /// Uniformly pick one of the three skins
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Wing position of one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Down,
    Mid,
    Up,
}

impl Pose {
    pub const ALL: [Pose; 3] = [Pose::Down, Pose::Mid, Pose::Up];

    pub fn index(self) -> usize {
        match self {
            Pose::Down => 0,
            Pose::Mid => 1,
            Pose::Up => 2,
        }
    }

    /// File name suffix of the frame
    pub fn as_str(self) -> &'static str {
        match self {
            Pose::Down => "downflap",
            Pose::Mid => "midflap",
            Pose::Up => "upflap",
        }
    }

    /// Frame shown after this one
    pub fn next(self) -> Self {
        match self {
            Pose::Down => Pose::Mid,
            Pose::Mid => Pose::Up,
            Pose::Up => Pose::Down,
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A pipe was cleared; carries the new score
    Scored { score: u32 },
    /// A pipe scrolled off the left edge and was moved back to the right
    Recycled { slot: usize },
    /// The run ended
    Crashed(Crash),
}

/// Complete game state for one run (plus the RNG, which outlives runs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Gap placement RNG
    pub rng: Pcg32,
    pub actor: Actor,
    pub pool: ObstaclePool,
    pub run: RunState,
    /// Ticks simulated this run
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = ObstaclePool::new(&mut rng);
        Self {
            seed,
            rng,
            actor: Actor::default(),
            pool,
            run: RunState::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start a new run: bird back to center, new pipes, score cleared.
    ///
    /// The RNG keeps its stream so consecutive runs get different layouts.
    pub fn reset(&mut self) {
        self.actor = Actor::default();
        self.pool = ObstaclePool::new(&mut self.rng);
        self.run = RunState::default();
        self.time_ticks = 0;
        self.events.clear();
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
