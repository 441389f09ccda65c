//! Collision detection
//!
//! The bird is an axis-aligned box. A pipe pair is tested as a single gap
//! channel: once the bird overlaps the pipe horizontally it must be fully
//! inside `[gap_top, gap_bottom]` vertically.

use super::pool::Obstacle;
use super::state::Actor;
use crate::consts::*;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    /// Hit the pipe in the given slot
    Obstacle { slot: usize },
    /// Left the screen through the top or bottom
    Boundary,
}

/// Whether the bird's horizontal extent overlaps the pipe's
pub fn overlaps_horizontally(obstacle: &Obstacle) -> bool {
    Actor::X + BIRD_WIDTH > obstacle.x && Actor::X < obstacle.trailing_edge()
}

/// Whether the bird sticks out of the pipe's gap vertically
pub fn outside_gap(actor: &Actor, obstacle: &Obstacle) -> bool {
    actor.y < obstacle.gap_top() || actor.bottom() > obstacle.gap_bottom()
}

/// Check the bird against one pipe pair
pub fn hits_obstacle(actor: &Actor, obstacle: &Obstacle) -> bool {
    overlaps_horizontally(obstacle) && outside_gap(actor, obstacle)
}

/// Check the bird against the top and bottom of the screen
pub fn out_of_bounds(actor: &Actor) -> bool {
    actor.y < 0 || actor.bottom() > SCREEN_HEIGHT
}
