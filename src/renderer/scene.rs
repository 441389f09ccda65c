//! Frame composition for each screen

use glam::IVec2;
use thiserror::Error;

use super::canvas::{Canvas, TextStyle, BLACK, ORANGE, WHITE};
use crate::assets::Assets;
use crate::consts::*;
use crate::screens::{Screen, ScreenMachine};
use crate::sim::{GameState, Pose, Skin};

/// Where the title-screen bird sits
pub const TITLE_BIRD_POS: IVec2 = IVec2::new(SCREEN_WIDTH / 2 - 30, SCREEN_HEIGHT / 2 + 30);
/// Score counter position during play
pub const SCORE_POS: IVec2 = IVec2::new(10, 30);
/// Game-over illustration position
pub const GAME_OVER_POS: IVec2 = IVec2::new(SCREEN_WIDTH / 4, SCREEN_HEIGHT / 4);
/// Final score and prompt position
pub const PROMPT_POS: IVec2 = IVec2::new(SCREEN_WIDTH / 4 + 70, SCREEN_HEIGHT / 2);

pub const SCORE_STYLE: TextStyle = TextStyle {
    size: 50.0,
    fill: WHITE,
    shadow: BLACK,
    shadow_offset: IVec2::new(-2, -2),
};

pub const PROMPT_STYLE: TextStyle = TextStyle {
    size: 40.0,
    fill: WHITE,
    shadow: ORANGE,
    shadow_offset: IVec2::new(-2, -2),
};

/// A screen could not be drawn at all
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("{0} illustration is not loaded")]
    MissingIllustration(&'static str),
}

/// Play-screen score text
pub fn score_text(score: u32) -> String {
    format!(" {score}")
}

/// Game-over panel text
pub fn prompt_text(score: u32) -> String {
    format!(" Your Score: {score}\nPlay Again? (Y/N)")
}

/// Composes frames and keeps the per-draw animation counters
#[derive(Debug, Clone)]
pub struct Scene {
    /// Pose of the most recently drawn bird
    pose: Pose,
    /// Play frames drawn so far (bar parity)
    bar_draws: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            pose: Pose::Down,
            bar_draws: 0,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Index of the bar image the next play frame will use
    pub fn next_bar(&self) -> usize {
        (self.bar_draws % 2) as usize
    }

    /// Advance the flap animation; every bird draw moves it one frame
    fn next_pose(&mut self) -> Pose {
        self.pose = self.pose.next();
        self.pose
    }

    /// Compose whatever the machine's current screen shows
    pub fn compose(
        &mut self,
        canvas: &mut Canvas,
        assets: &Assets,
        machine: &ScreenMachine,
    ) -> Result<(), SceneError> {
        match machine.screen() {
            Screen::Start => self.compose_start(canvas, assets, machine.skin()),
            Screen::Playing => {
                self.compose_play(canvas, assets, machine.state(), machine.skin());
                Ok(())
            }
            Screen::GameOver => self.compose_game_over(canvas, assets, machine.state().run.score),
            Screen::Closed => Ok(()),
        }
    }

    /// Background, centered title image and a large flapping bird
    pub fn compose_start(
        &mut self,
        canvas: &mut Canvas,
        assets: &Assets,
        skin: Skin,
    ) -> Result<(), SceneError> {
        let title = assets
            .title
            .as_ref()
            .ok_or(SceneError::MissingIllustration("title"))?;

        canvas.clear(BLACK);
        if let Some(bg) = &assets.background {
            canvas.draw_sprite(bg, IVec2::ZERO);
        }
        let centered = IVec2::new(
            (SCREEN_WIDTH - title.width() as i32) / 2,
            (SCREEN_HEIGHT - title.height() as i32) / 2,
        );
        canvas.draw_sprite(title, centered);

        let pose = self.next_pose();
        if let Some(bird) = assets.title_bird(skin, pose) {
            canvas.draw_sprite(bird, TITLE_BIRD_POS);
        }
        Ok(())
    }

    /// One frame of the running game
    pub fn compose_play(&mut self, canvas: &mut Canvas, assets: &Assets, state: &GameState, skin: Skin) {
        canvas.clear(BLACK);
        if let Some(bg) = &assets.background {
            canvas.draw_sprite(bg, IVec2::ZERO);
        }

        let pose = self.next_pose();
        if let Some(bird) = assets.bird(skin, pose) {
            canvas.draw_sprite(bird, IVec2::new(BIRD_X, state.actor.y));
        }

        for obstacle in state.pool.iter() {
            if let Some(upper) = &assets.pipe_upper {
                canvas.draw_sprite(upper, IVec2::new(obstacle.x, obstacle.upper_y));
            }
            if let Some(lower) = &assets.pipe_lower {
                canvas.draw_sprite(lower, IVec2::new(obstacle.x, obstacle.lower_y));
            }
        }

        if let Some(font) = &assets.font {
            canvas.draw_styled_text(
                font,
                &score_text(state.run.score),
                SCORE_POS,
                &SCORE_STYLE,
            );
        }

        let bar = self.next_bar();
        self.bar_draws += 1;
        if let Some(img) = &assets.bars[bar] {
            canvas.draw_sprite(img, IVec2::new(0, BAR_Y));
        }
    }

    /// Final score and the replay prompt
    pub fn compose_game_over(
        &mut self,
        canvas: &mut Canvas,
        assets: &Assets,
        score: u32,
    ) -> Result<(), SceneError> {
        let panel = assets
            .game_over
            .as_ref()
            .ok_or(SceneError::MissingIllustration("game over"))?;

        canvas.clear(BLACK);
        if let Some(bg) = &assets.background {
            canvas.draw_sprite(bg, IVec2::ZERO);
        }
        canvas.draw_sprite(panel, GAME_OVER_POS);

        if let Some(font) = &assets.font {
            canvas.draw_styled_text(
                font,
                &prompt_text(score),
                PROMPT_POS,
                &PROMPT_STYLE,
            );
        }
        Ok(())
    }
}
