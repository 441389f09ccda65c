//! Fixed timestep simulation tick
//!
//! Advances the bird, the pipes and the score by exactly one step.

use super::collision::{hits_obstacle, out_of_bounds, Crash};
use super::state::{Actor, GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key was pressed since the previous tick
    pub jump: bool,
}

/// Pipe scroll speed for a given score (+1 every five points, unbounded)
pub fn obstacle_speed(score: u32) -> i32 {
    BASE_SPEED + (score / SPEED_STEP_SCORE) as i32
}

/// Advance the game state by one tick.
///
/// Does nothing once the run is over, so the state the bird crashed in stays
/// frozen for the game-over screen.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.run.is_over {
        return;
    }

    state.time_ticks += 1;

    if input.jump {
        state.actor.jump();
    }

    // Physics
    state.actor.integrate();

    // Scroll pipes
    let speed = obstacle_speed(state.run.score);
    for slot in state.pool.advance(speed, &mut state.rng) {
        state.events.push(GameEvent::Recycled { slot });
    }

    // Pipe collisions
    let hit = state
        .pool
        .iter()
        .position(|obstacle| hits_obstacle(&state.actor, obstacle));
    if let Some(slot) = hit {
        end_run(state, Crash::Obstacle { slot });
    }

    // Top / bottom of the screen
    if out_of_bounds(&state.actor) {
        end_run(state, Crash::Boundary);
    }

    // Scoring
    let tracked = state.pool.get(state.run.tracked);
    if Actor::X > tracked.trailing_edge() {
        state.run.tracked = (state.run.tracked + 1) % POOL_SIZE;
        state.run.score += 1;
        state.events.push(GameEvent::Scored {
            score: state.run.score,
        });
    }
}

/// Mark the run over, keeping the first cause
fn end_run(state: &mut GameState, crash: Crash) {
    if state.run.is_over {
        return;
    }
    state.run.is_over = true;
    state.run.crash = Some(crash);
    state.events.push(GameEvent::Crashed(crash));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::{Obstacle, ObstaclePool};
    use proptest::prelude::*;

    /// Pipes far to the right with a wide-open gap
    fn clear_sky(state: &mut GameState) {
        let slot = Obstacle {
            x: 5000,
            upper_y: -PIPE_HEIGHT,
            lower_y: SCREEN_HEIGHT,
        };
        let mut slots = [slot; POOL_SIZE];
        for (i, s) in slots.iter_mut().enumerate() {
            s.x += i as i32 * 200;
        }
        state.pool = ObstaclePool::from_slots(slots);
    }

    #[test]
    fn test_gravity_pulls_bird_down() {
        let mut state = GameState::new(12345);
        clear_sky(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.actor.velocity, GRAVITY);
        assert_eq!(state.actor.y, BIRD_START_Y + GRAVITY);
        assert!(!state.run.is_over);
    }

    #[test]
    fn test_jump_then_gravity() {
        let mut state = GameState::new(12345);
        clear_sky(&mut state);
        tick(&mut state, &TickInput { jump: true });
        assert_eq!(state.actor.velocity, -JUMP_STRENGTH + GRAVITY);
        assert_eq!(state.actor.y, BIRD_START_Y - JUMP_STRENGTH + GRAVITY);
    }

    #[test]
    fn test_pipes_scroll_at_current_speed() {
        let mut state = GameState::new(1);
        let before: Vec<i32> = state.pool.iter().map(|o| o.x).collect();
        tick(&mut state, &TickInput::default());
        for (x0, o) in before.iter().zip(state.pool.iter()) {
            assert_eq!(o.x, x0 - BASE_SPEED);
        }

        let mut state = GameState::new(1);
        state.run.score = 12;
        let before: Vec<i32> = state.pool.iter().map(|o| o.x).collect();
        tick(&mut state, &TickInput::default());
        for (x0, o) in before.iter().zip(state.pool.iter()) {
            assert_eq!(o.x, x0 - (BASE_SPEED + 2));
        }
    }

    #[test]
    fn test_speed_formula() {
        assert_eq!(obstacle_speed(0), 10);
        assert_eq!(obstacle_speed(4), 10);
        assert_eq!(obstacle_speed(5), 11);
        assert_eq!(obstacle_speed(9), 11);
        assert_eq!(obstacle_speed(10), 12);
        assert_eq!(obstacle_speed(103), 30);
    }

    #[test]
    fn test_pipe_hit_ends_run() {
        let mut state = GameState::new(2);
        clear_sky(&mut state);
        // Pipe right on the bird with the gap far below it
        *state.pool.get_mut(3) = Obstacle {
            x: BIRD_X + BASE_SPEED,
            upper_y: 450 - PIPE_HEIGHT,
            lower_y: 580,
        };
        tick(&mut state, &TickInput::default());
        assert!(state.run.is_over);
        assert_eq!(state.run.crash, Some(Crash::Obstacle { slot: 3 }));
        assert!(state
            .drain_events()
            .contains(&GameEvent::Crashed(Crash::Obstacle { slot: 3 })));
    }

    #[test]
    fn test_passing_through_gap_is_safe() {
        let mut state = GameState::new(2);
        clear_sky(&mut state);
        *state.pool.get_mut(0) = Obstacle {
            x: BIRD_X + BASE_SPEED,
            upper_y: 200 - PIPE_HEIGHT,
            lower_y: 420,
        };
        tick(&mut state, &TickInput::default());
        assert!(!state.run.is_over);
    }

    #[test]
    fn test_score_once_per_pipe() {
        let mut state = GameState::new(3);
        clear_sky(&mut state);
        // Tracked pipe's trailing edge one step from the bird
        *state.pool.get_mut(0) = Obstacle {
            x: BIRD_X - PIPE_WIDTH + BASE_SPEED - 1,
            upper_y: -PIPE_HEIGHT,
            lower_y: SCREEN_HEIGHT,
        };
        tick(&mut state, &TickInput::default());
        assert_eq!(state.run.score, 1);
        assert_eq!(state.run.tracked, 1);

        // The same pipe stays behind the bird but is no longer tracked
        tick(&mut state, &TickInput { jump: true });
        assert_eq!(state.run.score, 1);
        assert_eq!(state.run.tracked, 1);
    }

    #[test]
    fn test_tracked_index_wraps() {
        let mut state = GameState::new(4);
        clear_sky(&mut state);
        state.run.tracked = POOL_SIZE - 1;
        state.pool.get_mut(POOL_SIZE - 1).x = BIRD_X - PIPE_WIDTH - 5 + BASE_SPEED;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.run.score, 1);
        assert_eq!(state.run.tracked, 0);
    }

    #[test]
    fn test_free_fall_ends_on_first_crossing_tick() {
        let mut state = GameState::new(777);
        clear_sky(&mut state);

        // Predict the crossing tick from the integration rule alone
        let (mut y, mut v, mut expected_tick) = (BIRD_START_Y, 0, 0u64);
        while y + BIRD_HEIGHT <= SCREEN_HEIGHT {
            v += GRAVITY;
            y += v;
            expected_tick += 1;
        }

        let mut ended_on = None;
        for t in 1..=100u64 {
            tick(&mut state, &TickInput::default());
            if state.run.is_over {
                ended_on = Some(t);
                break;
            }
        }
        assert_eq!(ended_on, Some(expected_tick));
        assert_eq!(state.run.crash, Some(Crash::Boundary));

        // Nothing moves after the ending tick
        let frozen_pool = state.pool.clone();
        let frozen_run = state.run.clone();
        let frozen_actor = state.actor;
        for _ in 0..10 {
            tick(&mut state, &TickInput { jump: true });
        }
        assert_eq!(state.pool, frozen_pool);
        assert_eq!(state.run, frozen_run);
        assert_eq!(state.actor, frozen_actor);
    }

    #[test]
    fn test_ceiling_crash() {
        let mut state = GameState::new(8);
        clear_sky(&mut state);
        state.actor.y = 5;
        tick(&mut state, &TickInput { jump: true });
        assert!(state.run.is_over);
        assert_eq!(state.run.crash, Some(Crash::Boundary));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let inputs = [false, true, false, false, true, false, false, false];
        for _ in 0..20 {
            for &jump in &inputs {
                tick(&mut state1, &TickInput { jump });
                tick(&mut state2, &TickInput { jump });
            }
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.actor, state2.actor);
        assert_eq!(state1.pool, state2.pool);
        assert_eq!(state1.run, state2.run);
    }

    proptest! {
        #[test]
        fn prop_speed_monotonic(a in 0u32..100_000, b in 0u32..100_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(obstacle_speed(lo) <= obstacle_speed(hi));
            prop_assert_eq!(obstacle_speed(a), BASE_SPEED + (a / 5) as i32);
        }

        #[test]
        fn prop_score_never_jumps_by_more_than_one(seed in any::<u64>(), pattern in any::<u32>()) {
            let mut state = GameState::new(seed);
            for t in 0..300u32 {
                let before = state.run.score;
                let jump = (pattern >> (t % 32)) & 1 == 1;
                tick(&mut state, &TickInput { jump });
                prop_assert!(state.run.score - before <= 1);
                prop_assert!(state.pool.iter().all(|o| o.gap_size() >= MIN_GAP));
                if state.run.is_over {
                    break;
                }
            }
        }
    }
}
