//! Flappy entry point
//!
//! Sets up logging, picks the RNG seed and runs the windowed game.

use std::time::{SystemTime, UNIX_EPOCH};

use flappy::Settings;
use flappy::platform;

/// Seed from settings, or from the wall clock
fn pick_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy starting...");

    let settings = Settings::load();
    let seed = pick_seed(&settings);

    if let Err(err) = platform::run(&settings, seed) {
        log::error!("Fatal: {}", err);
        if let Some(cause) = std::error::Error::source(&err) {
            log::error!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }

    println!("Thank you for playing!");
}
