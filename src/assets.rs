//! Image and font assets
//!
//! Everything is read from fixed paths under the asset root once at startup.
//! A file that fails to load is logged and left as `None`; drawing code skips
//! whatever is missing.

use std::path::Path;

use ab_glyph::FontVec;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::AssetError;
use crate::sim::{Pose, Skin};

/// Scale of the bird on the title screen
pub const TITLE_BIRD_SCALE: f32 = 1.75;

pub const BACKGROUND_FILE: &str = "Image/bg.jpg";
pub const PIPE_UPPER_FILE: &str = "Image/pipe_upper.png";
pub const PIPE_LOWER_FILE: &str = "Image/pipe_lower.png";
pub const TITLE_FILE: &str = "Image/message.png";
pub const GAME_OVER_FILE: &str = "Image/gameover.png";
pub const BAR_FILES: [&str; 2] = ["Image/bar1.jpg", "Image/bar2.jpg"];
pub const FONT_FILE: &str = "Font/arial.ttf";

/// Path of one bird frame, relative to the asset root
pub fn bird_file(skin: Skin, pose: Pose) -> String {
    format!("Image/Skin/{}-{}.png", skin.as_str(), pose.as_str())
}

/// Decode an image file into RGBA pixels
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Read and parse a TrueType/OpenType font
pub fn load_font(path: &Path) -> Result<FontVec, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(bytes).map_err(|source| AssetError::Font {
        path: path.to_path_buf(),
        source,
    })
}

/// Nearest-neighbour scaled copy of a sprite
pub fn scaled(img: &RgbaImage, scale: f32) -> RgbaImage {
    let width = ((img.width() as f32 * scale).round() as u32).max(1);
    let height = ((img.height() as f32 * scale).round() as u32).max(1);
    imageops::resize(img, width, height, FilterType::Nearest)
}

type PoseTable = [[Option<RgbaImage>; 3]; 3];

/// All images and the font, loaded once
#[derive(Default)]
pub struct Assets {
    pub background: Option<RgbaImage>,
    pub pipe_upper: Option<RgbaImage>,
    pub pipe_lower: Option<RgbaImage>,
    /// Title screen illustration
    pub title: Option<RgbaImage>,
    /// Game-over screen illustration
    pub game_over: Option<RgbaImage>,
    /// Alternating bottom bar frames
    pub bars: [Option<RgbaImage>; 2],
    pub font: Option<FontVec>,
    /// Bird frames indexed `[skin][pose]`
    birds: PoseTable,
    /// Same frames pre-scaled for the title screen
    title_birds: PoseTable,
}

impl Assets {
    /// Load every asset under `root`
    pub fn load(root: &Path) -> Self {
        let sprite = |rel: &str| load_image(&root.join(rel)).inspect_err(|err| err.log()).ok();

        let mut birds: PoseTable = Default::default();
        let mut title_birds: PoseTable = Default::default();
        for skin in Skin::ALL {
            for pose in Pose::ALL {
                let frame = sprite(bird_file(skin, pose).as_str());
                title_birds[skin.index()][pose.index()] =
                    frame.as_ref().map(|img| scaled(img, TITLE_BIRD_SCALE));
                birds[skin.index()][pose.index()] = frame;
            }
        }

        let assets = Self {
            background: sprite(BACKGROUND_FILE),
            pipe_upper: sprite(PIPE_UPPER_FILE),
            pipe_lower: sprite(PIPE_LOWER_FILE),
            title: sprite(TITLE_FILE),
            game_over: sprite(GAME_OVER_FILE),
            bars: [sprite(BAR_FILES[0]), sprite(BAR_FILES[1])],
            font: load_font(&root.join(FONT_FILE))
                .inspect_err(|err| err.log())
                .ok(),
            birds,
            title_birds,
        };

        log::info!(
            "Loaded {} of {} images from {}, font: {}",
            assets.loaded_images(),
            Self::IMAGE_COUNT,
            root.display(),
            if assets.font.is_some() { "ok" } else { "missing" }
        );
        assets
    }

    /// Number of image files the game expects
    pub const IMAGE_COUNT: usize = 7 + 9;

    /// Number of image files that loaded
    pub fn loaded_images(&self) -> usize {
        let singles = [
            &self.background,
            &self.pipe_upper,
            &self.pipe_lower,
            &self.title,
            &self.game_over,
            &self.bars[0],
            &self.bars[1],
        ];
        singles.iter().filter(|img| img.is_some()).count()
            + self.birds.iter().flatten().filter(|img| img.is_some()).count()
    }

    /// Bird frame at normal size
    pub fn bird(&self, skin: Skin, pose: Pose) -> Option<&RgbaImage> {
        self.birds[skin.index()][pose.index()].as_ref()
    }

    /// Bird frame at title-screen size
    pub fn title_bird(&self, skin: Skin, pose: Pose) -> Option<&RgbaImage> {
        self.title_birds[skin.index()][pose.index()].as_ref()
    }

    /// Install a bird frame (and its title-size copy)
    pub fn set_bird(&mut self, skin: Skin, pose: Pose, img: RgbaImage) {
        self.title_birds[skin.index()][pose.index()] = Some(scaled(&img, TITLE_BIRD_SCALE));
        self.birds[skin.index()][pose.index()] = Some(img);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_bird_file_names() {
        assert_eq!(
            bird_file(Skin::Blue, Pose::Down),
            "Image/Skin/bluebird-downflap.png"
        );
        assert_eq!(
            bird_file(Skin::Yellow, Pose::Up),
            "Image/Skin/yellowbird-upflap.png"
        );
        assert_eq!(
            bird_file(Skin::Red, Pose::Mid),
            "Image/Skin/redbird-midflap.png"
        );
    }

    #[test]
    fn test_missing_root_degrades_to_empty() {
        let assets = Assets::load(Path::new("/nonexistent/asset/root"));
        assert_eq!(assets.loaded_images(), 0);
        assert!(assets.font.is_none());
        assert!(assets.bird(Skin::Yellow, Pose::Mid).is_none());
    }

    #[test]
    fn test_missing_font_is_io_error() {
        let err = load_font(Path::new("/nonexistent/arial.ttf")).err();
        assert!(matches!(err, Some(AssetError::Io { .. })));
    }

    #[test]
    fn test_scaled_nearest() {
        let img = RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]));
        let big = scaled(&img, TITLE_BIRD_SCALE);
        assert_eq!(big.dimensions(), (7, 4));
        assert_eq!(*big.get_pixel(6, 3), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_set_bird_fills_both_tables() {
        let mut assets = Assets::default();
        assets.set_bird(Skin::Red, Pose::Up, RgbaImage::new(34, 24));
        assert_eq!(assets.bird(Skin::Red, Pose::Up).map(|i| i.dimensions()), Some((34, 24)));
        assert_eq!(
            assets.title_bird(Skin::Red, Pose::Up).map(|i| i.dimensions()),
            Some((60, 42))
        );
        assert!(assets.bird(Skin::Red, Pose::Down).is_none());
        assert_eq!(assets.loaded_images(), 1);
    }
}
