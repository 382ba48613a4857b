use std::path::Path;

use image::{ImageResult, Pixel, Rgba, RgbaImage};

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A destination rectangle in surface pixels. May extend past the surface edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }
}

/// The drawing target for previews.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.pixels.save_with_format(path, image::ImageFormat::Png)
    }

    pub fn clear(&mut self) {
        self.fill(TRANSPARENT);
    }

    pub fn fill(&mut self, color: Rgba<u8>) {
        for px in self.pixels.pixels_mut() {
            *px = color;
        }
    }

    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba<u8>) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x, y, color);
            }
        }
    }

    /// Draws `texels` with its top-left at (`x`, `y`), each texel replicated
    /// into a `scale`x`scale` block. Source-over blending, no smoothing.
    pub fn blit_scaled(&mut self, texels: &RgbaImage, x: i64, y: i64, scale: u32) {
        let dest = PixelRect {
            x,
            y,
            width: texels.width() * scale,
            height: texels.height() * scale,
        };
        let Some((x0, y0, x1, y1)) = self.clip(dest) else {
            return;
        };
        let scale = scale as i64;
        for py in y0..y1 {
            let ty = ((py as i64 - y) / scale) as u32;
            for px in x0..x1 {
                let tx = ((px as i64 - x) / scale) as u32;
                let src = *texels.get_pixel(tx, ty);
                let dst = self.pixels.get_pixel_mut(px, py);
                match src[3] {
                    0 => {}
                    255 => *dst = src,
                    _ => dst.blend(&src),
                }
            }
        }
    }

    fn clip(&self, rect: PixelRect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width() as i64);
        let y1 = rect.bottom().min(self.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Parses `#rrggbb` or `#rgb` into an opaque color.
pub fn parse_hex_color(value: &str) -> Option<Rgba<u8>> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgba([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ])),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Rgba([short(0)?, short(1)?, short(2)?, 255]))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_replicates_each_texel() {
        let mut texels = RgbaImage::new(2, 1);
        texels.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        texels.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        let mut surface = Surface::new(20, 10);
        surface.blit_scaled(&texels, 2, 1, 3);

        for y in 1..4 {
            for x in 2..5 {
                assert_eq!(surface.pixel(x, y), Rgba([255, 0, 0, 255]));
            }
            for x in 5..8 {
                assert_eq!(surface.pixel(x, y), Rgba([0, 0, 255, 255]));
            }
        }
        assert_eq!(surface.pixel(1, 1), TRANSPARENT);
        assert_eq!(surface.pixel(8, 1), TRANSPARENT);
        assert_eq!(surface.pixel(2, 4), TRANSPARENT);
    }

    #[test]
    fn blit_clips_at_edges() {
        let texels = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let mut surface = Surface::new(8, 8);
        surface.blit_scaled(&texels, -6, 5, 2);
        assert_eq!(surface.pixel(0, 5), Rgba([9, 9, 9, 255]));
        assert_eq!(surface.pixel(1, 7), Rgba([9, 9, 9, 255]));
        assert_eq!(surface.pixel(2, 5), TRANSPARENT);
        surface.blit_scaled(&texels, 100, 100, 8);
    }

    #[test]
    fn transparent_texels_leave_destination_alone() {
        let texels = RgbaImage::from_pixel(1, 1, TRANSPARENT);
        let mut surface = Surface::new(4, 4);
        surface.fill(Rgba([1, 2, 3, 255]));
        surface.blit_scaled(&texels, 0, 0, 4);
        assert_eq!(surface.pixel(3, 3), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#2d2f33"), Some(Rgba([0x2d, 0x2f, 0x33, 255])));
        assert_eq!(parse_hex_color("#666"), Some(Rgba([0x66, 0x66, 0x66, 255])));
        assert_eq!(parse_hex_color("2d2f33"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
