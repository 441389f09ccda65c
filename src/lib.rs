//! Flappy - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle pool, collisions, scoring)
//! - `screens`: Start / Playing / GameOver screen sequencing
//! - `timing`: Fixed-step tick accumulator
//! - `assets`: Image and font loading
//! - `audio`: Music and sound effects
//! - `renderer`: Frame composition and wgpu presentation
//! - `platform`: Window and keyboard handling

pub mod assets;
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod screens;
pub mod settings;
pub mod sim;
pub mod timing;

pub use error::{AssetError, PlatformError};
pub use screens::{Screen, ScreenMachine};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (20 Hz, one tick per frame)
    pub const TICK_INTERVAL: Duration = Duration::from_millis(50);
    /// Maximum ticks run per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window / playfield dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Bird geometry - horizontal position never changes
    pub const BIRD_X: i32 = SCREEN_WIDTH / 4;
    pub const BIRD_WIDTH: i32 = 50;
    pub const BIRD_HEIGHT: i32 = 36;
    /// Bird start height (vertical center)
    pub const BIRD_START_Y: i32 = SCREEN_HEIGHT / 2;

    /// Downward acceleration per tick
    pub const GRAVITY: i32 = 2;
    /// Upward velocity set by a jump
    pub const JUMP_STRENGTH: i32 = 15;

    /// Pipe geometry
    pub const PIPE_WIDTH: i32 = 60;
    pub const PIPE_HEIGHT: i32 = 320;
    /// Number of pipe slots in the pool
    pub const POOL_SIZE: usize = 5;
    /// Minimum vertical opening between the upper and lower pipe
    pub const MIN_GAP: i32 = 100;

    /// Pipe scroll speed at score 0
    pub const BASE_SPEED: i32 = 10;
    /// Score points per +1 of scroll speed
    pub const SPEED_STEP_SCORE: u32 = 5;

    /// Bottom status bar vertical position
    pub const BAR_Y: i32 = SCREEN_HEIGHT - 43;
}
