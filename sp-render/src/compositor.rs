use tracing::debug;

use crate::{BodyPart, PixelRect, SkinImage, Surface, extract_part, resolve_parts};

/// Destination pixels per atlas texel.
pub const PREVIEW_SCALE: u32 = 8;
/// Figure footprint in texels: two 4-wide arms around an 8-wide torso.
pub const FIGURE_WIDTH: u32 = 16;
pub const FIGURE_HEIGHT: u32 = 32;
/// Distance from the top of the surface to the top of the head, in pixels.
pub const FIGURE_TOP: i64 = 20;

/// Top-left of each part on the figure, in texels, indexed by [`BodyPart::index`].
///
/// Left and right columns mirror each other about x = 8.
const PART_SLOTS: [[u32; 2]; 6] = [
    [4, 0],  // head
    [4, 8],  // torso
    [0, 8],  // right arm
    [12, 8], // left arm
    [4, 20], // right leg
    [8, 20], // left leg
];

/// Placement of the figure on a surface of a given size. Lives for one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeFrame {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub origin_x: i64,
    pub origin_y: i64,
}

impl CompositeFrame {
    pub fn new(width: u32, height: u32) -> Self {
        let scale = PREVIEW_SCALE;
        Self {
            width,
            height,
            scale,
            origin_x: (width as i64 - (FIGURE_WIDTH * scale) as i64) / 2,
            origin_y: FIGURE_TOP,
        }
    }

    pub fn for_surface(surface: &Surface) -> Self {
        Self::new(surface.width(), surface.height())
    }

    pub fn destination(&self, part: BodyPart) -> PixelRect {
        let [slot_x, slot_y] = PART_SLOTS[part.index()];
        let [w, h] = part.size();
        PixelRect {
            x: self.origin_x + (slot_x * self.scale) as i64,
            y: self.origin_y + (slot_y * self.scale) as i64,
            width: w * self.scale,
            height: h * self.scale,
        }
    }
}

/// Clears `surface` and draws the front view of `skin` onto it.
pub fn composite(skin: &SkinImage, surface: &mut Surface) {
    let format = skin.format();
    // Every part is resolved before the first pixel is touched.
    let parts = resolve_parts(format);
    let frame = CompositeFrame::for_surface(surface);

    surface.clear();
    for (part, source) in parts {
        let texels = extract_part(skin.pixels(), source);
        let dest = frame.destination(part);
        surface.blit_scaled(&texels, dest.x, dest.y, frame.scale);
    }
    debug!(
        "composited {:?} skin onto {}x{} surface",
        format, frame.width, frame.height
    );
}
