//! Front-facing skin preview rendering.
//!
//! - The atlas layouts (64x32 legacy, 64x64 modern) are hardcoded static tables.
//! - Everything draws into an explicit [`Surface`]; nothing here holds global state.
//! - Scaling is nearest-neighbor only.

// Small table macros so the atlas layout reads like the layout it describes.
macro_rules! region {
    ($x:expr, $y:expr, $w:expr, $h:expr $(,)?) => {
        $crate::AtlasRegion {
            x: $x,
            y: $y,
            width: $w,
            height: $h,
        }
    };
}

macro_rules! part_mapping {
    (
        part: $part:ident,
        legacy: $legacy:expr,
        modern: $modern:expr $(,)?
    ) => {
        $crate::PartMapping {
            part: $crate::BodyPart::$part,
            legacy: $legacy,
            modern: $modern,
        }
    };
}

mod atlas;
mod body_parts;
mod compositor;
mod error;
mod glyphs;
mod placeholder;
mod surface;


pub use atlas::*;
pub use body_parts::*;
pub use compositor::*;
pub use error::*;
pub use placeholder::*;
pub use surface::*;
