use image::RgbaImage;
use tracing::debug;

use crate::RenderError;

pub const ATLAS_WIDTH: u32 = 64;
pub const LEGACY_ATLAS_HEIGHT: u32 = 32;
pub const MODERN_ATLAS_HEIGHT: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtlasFormat {
    /// 64x32, right limbs only.
    Legacy,
    /// 64x64, independent left arm and left leg.
    Modern,
}

impl AtlasFormat {
    /// Classifies by height alone. Width is checked separately by [`SkinImage`].
    pub const fn detect(height: u32) -> Self {
        if height < MODERN_ATLAS_HEIGHT {
            Self::Legacy
        } else {
            Self::Modern
        }
    }
}

/// A rectangle of texels inside a skin atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRegion {
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x + self.width <= width && self.y + self.height <= height
    }
}

/// A decoded skin atlas, validated to one of the two known layouts.
#[derive(Debug, Clone)]
pub struct SkinImage {
    pixels: RgbaImage,
    format: AtlasFormat,
}

impl SkinImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, RenderError> {
        let decoded = image::load_from_memory(bytes)?;
        Self::from_rgba(decoded.to_rgba8())
    }

    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, RenderError> {
        let (width, height) = pixels.dimensions();
        let supported = width == ATLAS_WIDTH
            && (height == LEGACY_ATLAS_HEIGHT || height == MODERN_ATLAS_HEIGHT);
        if !supported {
            return Err(RenderError::FormatUnsupported { width, height });
        }
        let format = AtlasFormat::detect(height);
        debug!("skin atlas {}x{} detected as {:?}", width, height, format);
        Ok(Self { pixels, format })
    }

    pub fn format(&self) -> AtlasFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_threshold() {
        assert_eq!(AtlasFormat::detect(64), AtlasFormat::Modern);
        assert_eq!(AtlasFormat::detect(128), AtlasFormat::Modern);
        assert_eq!(AtlasFormat::detect(32), AtlasFormat::Legacy);
        assert_eq!(AtlasFormat::detect(63), AtlasFormat::Legacy);
    }

    #[test]
    fn rejects_unexpected_dimensions() {
        for (width, height) in [(128, 64), (64, 48), (32, 32), (64, 128)] {
            let err = SkinImage::from_rgba(RgbaImage::new(width, height)).unwrap_err();
            assert!(matches!(
                err,
                RenderError::FormatUnsupported { width: w, height: h } if w == width && h == height
            ));
        }
    }

    #[test]
    fn accepts_both_layouts() {
        let legacy = SkinImage::from_rgba(RgbaImage::new(64, 32)).unwrap();
        assert_eq!(legacy.format(), AtlasFormat::Legacy);
        let modern = SkinImage::from_rgba(RgbaImage::new(64, 64)).unwrap();
        assert_eq!(modern.format(), AtlasFormat::Modern);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = SkinImage::decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)));
    }
}
