//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call
//! - Seeded RNG only
//! - Stable slot order in the pipe pool
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod pool;
pub mod state;
pub mod tick;

pub use collision::{Crash, hits_obstacle, out_of_bounds, overlaps_horizontally};
pub use pool::{Obstacle, ObstaclePool, roll_gap};
pub use state::{Actor, GameEvent, GameState, Pose, RunState, Skin};
pub use tick::{TickInput, obstacle_speed, tick};
