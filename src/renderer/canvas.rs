//! CPU frame compositor
//!
//! Every frame is painted into one RGBA image in screen pixels (origin top
//! left, y down) and handed to the GPU as a single texture.

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use glam::IVec2;
use image::{imageops, Pixel, Rgba, RgbaImage};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const ORANGE: Rgba<u8> = Rgba([255, 165, 0, 255]);

/// Text drawn twice: a shadow copy first, then the fill on top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixel height of the font
    pub size: f32,
    pub fill: Rgba<u8>,
    pub shadow: Rgba<u8>,
    /// Shadow position relative to the fill
    pub shadow_offset: IVec2,
}

/// Frame being composed
pub struct Canvas {
    image: RgbaImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BLACK),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Composed pixels
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row major
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Fill the whole frame with one color
    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Alpha-blend a sprite with its top-left corner at `pos`; anything
    /// outside the frame is clipped
    pub fn draw_sprite(&mut self, sprite: &RgbaImage, pos: IVec2) {
        imageops::overlay(&mut self.image, sprite, i64::from(pos.x), i64::from(pos.y));
    }

    /// Blend `color` into one pixel, scaling its alpha by `coverage`
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let alpha = (f32::from(color[3]) * coverage.clamp(0.0, 1.0)).round() as u8;
        if alpha == 0 {
            return;
        }
        let src = Rgba([color[0], color[1], color[2], alpha]);
        self.image.get_pixel_mut(x as u32, y as u32).blend(&src);
    }

    /// Draw text with its top-left corner at `pos`; `\n` starts a new line
    pub fn draw_text(&mut self, font: &FontVec, text: &str, pos: IVec2, size: f32, color: Rgba<u8>) {
        let scaled = font.as_scaled(PxScale::from(size));
        let left = pos.x as f32;
        let mut caret = point(left, pos.y as f32 + scaled.ascent());
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            if c == '\n' {
                caret.x = left;
                caret.y += scaled.height() + scaled.line_gap();
                previous = None;
                continue;
            }

            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scaled.scale(), caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (origin_x, origin_y) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                self.blend_pixel(origin_x + gx as i32, origin_y + gy as i32, color, coverage);
            });
        }
    }

    /// Draw the shadow copy, then the fill
    pub fn draw_styled_text(&mut self, font: &FontVec, text: &str, pos: IVec2, style: &TextStyle) {
        self.draw_text(font, text, pos + style.shadow_offset, style.size, style.shadow);
        self.draw_text(font, text, pos, style.size, style.fill);
    }
}
