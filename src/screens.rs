//! Screen sequencing
//!
//! ```text
//!  Start ──any key──▶ Playing ──crash──▶ GameOver ──Y──▶ Playing
//!    │                   │                  │
//!    └──── close ────────┴──── close / N ───┴──────▶ Closed
//! ```
//!
//! The machine owns the [`GameState`] and the fixed-step clock. It never
//! touches the window or the sound card: it queues [`AudioCue`]s for the
//! platform layer and exposes its state for the renderer.

use std::time::Duration;

use crate::audio::{AudioCue, SoundEffect};
use crate::sim::{GameEvent, GameState, Skin, TickInput, tick};
use crate::timing::FixedStep;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title screen, waiting for any key
    Start,
    /// A run is in progress
    Playing,
    /// Final score shown, waiting for Y/N
    GameOver,
    /// Terminal: the window should close
    Closed,
}

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Jump
    Space,
    /// Play again
    Y,
    /// Quit
    N,
    Other,
}

/// Input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyPressed(Key),
    WindowClosed,
}

/// Drives the game from screen to screen
#[derive(Debug)]
pub struct ScreenMachine {
    screen: Screen,
    state: GameState,
    /// Bird colors for the current (or next) run
    skin: Skin,
    clock: FixedStep,
    /// Jump pressed since the last tick
    jump_queued: bool,
    cues: Vec<AudioCue>,
}

impl ScreenMachine {
    pub fn new(seed: u64) -> Self {
        Self::with_clock(seed, FixedStep::default())
    }

    pub fn with_clock(seed: u64, clock: FixedStep) -> Self {
        Self {
            screen: Screen::Start,
            state: GameState::new(seed),
            skin: Skin::default(),
            clock,
            jump_queued: false,
            cues: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    pub fn is_closed(&self) -> bool {
        self.screen == Screen::Closed
    }

    /// Time until the next tick is due
    pub fn until_next_tick(&self) -> Duration {
        self.clock.until_next()
    }

    /// Take all queued audio cues, oldest first
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    /// React to a key press or window close
    pub fn handle_input(&mut self, event: InputEvent) {
        let key = match event {
            InputEvent::WindowClosed => {
                self.close();
                return;
            }
            InputEvent::KeyPressed(key) => key,
        };

        match self.screen {
            Screen::Start => self.begin_run(),
            Screen::Playing => {
                if key == Key::Space && !self.state.run.is_over {
                    self.jump_queued = true;
                    self.cues.push(AudioCue::Play(SoundEffect::Jump));
                }
            }
            Screen::GameOver => match key {
                Key::Y => self.begin_run(),
                Key::N => self.close(),
                _ => {}
            },
            Screen::Closed => {}
        }
    }

    /// Advance by `elapsed` wall-clock time; returns the number of ticks run
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            self.step();
        }
        ticks
    }

    /// Run exactly one tick of the current screen
    pub fn step(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }

        // The crash frame has been shown for one tick; move on
        if self.state.run.is_over {
            self.enter_game_over();
            return;
        }

        let input = TickInput {
            jump: std::mem::take(&mut self.jump_queued),
        };
        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            match event {
                GameEvent::Scored { score } => log::debug!("Scored: {}", score),
                GameEvent::Recycled { slot } => log::debug!("Recycled pipe slot {}", slot),
                GameEvent::Crashed(crash) => log::debug!(
                    "Crashed ({:?}) after {} ticks",
                    crash,
                    self.state.time_ticks
                ),
            }
        }
    }

    /// The renderer could not draw the current screen's illustration.
    ///
    /// Without a title image the run starts straight away; without a
    /// game-over image there is no way to offer a replay, so the game closes.
    pub fn screen_unavailable(&mut self) {
        match self.screen {
            Screen::Start => {
                log::warn!("Title screen unavailable, starting run");
                self.begin_run();
            }
            Screen::GameOver => {
                log::warn!("Game over screen unavailable, closing");
                self.close();
            }
            Screen::Playing | Screen::Closed => {}
        }
    }

    /// Enter the terminal state
    pub fn close(&mut self) {
        if self.screen != Screen::Closed {
            self.transition(Screen::Closed);
        }
    }

    /// Reset everything for a fresh run and start the music
    fn begin_run(&mut self) {
        self.state.reset();
        self.jump_queued = false;
        self.clock.reset();
        self.cues.push(AudioCue::StartMusic);
        log::info!("Run started with {:?} bird", self.skin);
        self.transition(Screen::Playing);
    }

    fn enter_game_over(&mut self) {
        self.cues.push(AudioCue::Play(SoundEffect::GameOver));
        self.cues.push(AudioCue::StopMusic);
        log::info!(
            "Run over: score {} ({:?})",
            self.state.run.score,
            self.state.run.crash
        );
        self.skin = Skin::random(&mut self.state.rng);
        self.transition(Screen::GameOver);
    }

    fn transition(&mut self, to: Screen) {
        log::info!("Screen: {:?} -> {:?}", self.screen, to);
        self.screen = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Crash, Obstacle, ObstaclePool};

    fn playing(seed: u64) -> ScreenMachine {
        let mut machine = ScreenMachine::new(seed);
        machine.handle_input(InputEvent::KeyPressed(Key::Other));
        machine.drain_cues();
        machine
    }

    /// Move every pipe far right so only the screen edges matter
    fn clear_sky(machine: &mut ScreenMachine) {
        let slot = Obstacle {
            x: 5000,
            upper_y: -PIPE_HEIGHT,
            lower_y: SCREEN_HEIGHT,
        };
        machine.state.pool = ObstaclePool::from_slots([slot; POOL_SIZE]);
    }

    /// Tick until the machine leaves Playing (bounded)
    fn play_until_game_over(machine: &mut ScreenMachine) {
        for _ in 0..200 {
            machine.step();
            if machine.screen() != Screen::Playing {
                return;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_initial_screen() {
        let machine = ScreenMachine::new(1);
        assert_eq!(machine.screen(), Screen::Start);
        assert_eq!(machine.skin(), Skin::Yellow);
        assert!(!machine.is_closed());
    }

    #[test]
    fn test_any_key_starts_run_with_music() {
        let mut machine = ScreenMachine::new(1);
        machine.handle_input(InputEvent::KeyPressed(Key::N));
        assert_eq!(machine.screen(), Screen::Playing);
        assert_eq!(machine.drain_cues(), vec![AudioCue::StartMusic]);
        assert_eq!(machine.state().run.score, 0);
    }

    #[test]
    fn test_close_from_start() {
        let mut machine = ScreenMachine::new(1);
        machine.handle_input(InputEvent::WindowClosed);
        assert!(machine.is_closed());
        assert!(machine.drain_cues().is_empty());
    }

    #[test]
    fn test_start_screen_does_not_tick() {
        let mut machine = ScreenMachine::new(1);
        let before = machine.state().pool.clone();
        assert_eq!(machine.update(Duration::from_millis(500)), 8);
        assert_eq!(machine.state().pool, before);
        assert_eq!(machine.state().time_ticks, 0);
    }

    #[test]
    fn test_jump_applies_on_next_tick() {
        let mut machine = playing(2);
        clear_sky(&mut machine);
        machine.handle_input(InputEvent::KeyPressed(Key::Space));
        assert_eq!(
            machine.drain_cues(),
            vec![AudioCue::Play(SoundEffect::Jump)]
        );
        machine.step();
        assert_eq!(machine.state().actor.velocity, -JUMP_STRENGTH + GRAVITY);

        // Consumed: the next tick is plain gravity
        machine.step();
        assert_eq!(machine.state().actor.velocity, -JUMP_STRENGTH + 2 * GRAVITY);
    }

    #[test]
    fn test_other_keys_ignored_while_playing() {
        let mut machine = playing(2);
        machine.handle_input(InputEvent::KeyPressed(Key::Y));
        machine.handle_input(InputEvent::KeyPressed(Key::Other));
        assert_eq!(machine.screen(), Screen::Playing);
        assert!(machine.drain_cues().is_empty());
    }

    #[test]
    fn test_update_runs_whole_ticks_only() {
        let mut machine = playing(3);
        clear_sky(&mut machine);
        assert_eq!(machine.update(Duration::from_millis(49)), 0);
        assert_eq!(machine.state().time_ticks, 0);
        assert_eq!(machine.update(Duration::from_millis(1)), 1);
        assert_eq!(machine.state().time_ticks, 1);
        assert_eq!(machine.update(Duration::from_millis(100)), 2);
        assert_eq!(machine.state().time_ticks, 3);
    }

    #[test]
    fn test_crash_frame_then_game_over() {
        let mut machine = playing(4);
        clear_sky(&mut machine);
        while !machine.state().run.is_over {
            machine.step();
        }
        // Crash tick itself stays on the play screen
        assert_eq!(machine.screen(), Screen::Playing);
        assert!(machine.drain_cues().is_empty());
        let score = machine.state().run.score;

        machine.step();
        assert_eq!(machine.screen(), Screen::GameOver);
        assert_eq!(
            machine.drain_cues(),
            vec![AudioCue::Play(SoundEffect::GameOver), AudioCue::StopMusic]
        );
        assert_eq!(machine.state().run.crash, Some(Crash::Boundary));
        assert_eq!(machine.state().run.score, score);
    }

    #[test]
    fn test_replay_resets_run() {
        let mut machine = playing(5);
        for _ in 0..10 {
            machine.handle_input(InputEvent::KeyPressed(Key::Space));
            machine.step();
        }
        play_until_game_over(&mut machine);
        assert_eq!(machine.screen(), Screen::GameOver);

        // Ignored keys on the prompt
        machine.handle_input(InputEvent::KeyPressed(Key::Space));
        machine.handle_input(InputEvent::KeyPressed(Key::Other));
        assert_eq!(machine.screen(), Screen::GameOver);
        machine.drain_cues();

        machine.handle_input(InputEvent::KeyPressed(Key::Y));
        assert_eq!(machine.screen(), Screen::Playing);
        assert_eq!(machine.drain_cues(), vec![AudioCue::StartMusic]);

        let state = machine.state();
        assert_eq!(state.run.score, 0);
        assert!(!state.run.is_over);
        assert_eq!(state.run.tracked, 0);
        assert_eq!(state.actor.y, SCREEN_HEIGHT / 2);
        assert_eq!(state.actor.velocity, 0);
        assert!(state.pool.iter().all(|o| o.gap_size() >= MIN_GAP));
    }

    #[test]
    fn test_no_closes_from_game_over() {
        let mut machine = playing(6);
        play_until_game_over(&mut machine);
        machine.handle_input(InputEvent::KeyPressed(Key::N));
        assert!(machine.is_closed());

        // Terminal
        machine.handle_input(InputEvent::KeyPressed(Key::Y));
        assert!(machine.is_closed());
        machine.update(Duration::from_secs(1));
        assert!(machine.is_closed());
    }

    #[test]
    fn test_window_close_from_game_over() {
        let mut machine = playing(6);
        play_until_game_over(&mut machine);
        machine.handle_input(InputEvent::WindowClosed);
        assert!(machine.is_closed());
    }

    #[test]
    fn test_skin_changes_are_drawn_from_rng() {
        let mut seen = [false; 3];
        let mut machine = playing(7);
        for _ in 0..30 {
            play_until_game_over(&mut machine);
            seen[machine.skin().index()] = true;
            machine.handle_input(InputEvent::KeyPressed(Key::Y));
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_missing_title_starts_run() {
        let mut machine = ScreenMachine::new(8);
        machine.screen_unavailable();
        assert_eq!(machine.screen(), Screen::Playing);
        assert_eq!(machine.drain_cues(), vec![AudioCue::StartMusic]);
    }

    #[test]
    fn test_missing_game_over_image_closes() {
        let mut machine = playing(8);
        play_until_game_over(&mut machine);
        machine.screen_unavailable();
        assert!(machine.is_closed());
    }

    #[test]
    fn test_screen_unavailable_ignored_while_playing() {
        let mut machine = playing(9);
        machine.screen_unavailable();
        assert_eq!(machine.screen(), Screen::Playing);
    }
}
