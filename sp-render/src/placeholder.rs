use image::Rgba;
use tracing::debug;

use crate::glyphs::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph, text_width};
use crate::{PixelRect, Surface};

pub const PLACEHOLDER_BACKGROUND: Rgba<u8> = Rgba([0x2d, 0x2f, 0x33, 255]);
pub const PLACEHOLDER_TEXT_COLOR: Rgba<u8> = Rgba([0x66, 0x66, 0x66, 255]);
pub const PLACEHOLDER_TEXT: &str = "No skin";

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderStyle {
    pub background: Rgba<u8>,
    pub text_color: Rgba<u8>,
    pub text: String,
    /// Surface pixels per font cell.
    pub glyph_scale: u32,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            background: PLACEHOLDER_BACKGROUND,
            text_color: PLACEHOLDER_TEXT_COLOR,
            text: PLACEHOLDER_TEXT.to_string(),
            glyph_scale: 2,
        }
    }
}

/// Replaces whatever is on `surface` with a solid fill and a centered caption.
pub fn draw_placeholder(surface: &mut Surface, style: &PlaceholderStyle) {
    surface.clear();
    surface.fill(style.background);

    let scale = style.glyph_scale.max(1);
    let text_w = (text_width(&style.text) * scale) as i64;
    let text_h = (GLYPH_HEIGHT * scale) as i64;
    let mut pen_x = (surface.width() as i64 - text_w) / 2;
    let top = (surface.height() as i64 - text_h) / 2;

    for c in style.text.chars() {
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let cell = PixelRect {
                    x: pen_x + (col * scale) as i64,
                    y: top + row as i64 * scale as i64,
                    width: scale,
                    height: scale,
                };
                surface.fill_rect(cell, style.text_color);
            }
        }
        pen_x += (GLYPH_ADVANCE * scale) as i64;
    }
    debug!("drew placeholder {:?}", style.text);
}
