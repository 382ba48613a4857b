use image::{RgbaImage, imageops};

use crate::{AtlasFormat, AtlasRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Head,
    Torso,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
}

impl BodyPart {
    /// Draw order.
    pub const ALL: [BodyPart; 6] = [
        Self::Head,
        Self::Torso,
        Self::RightArm,
        Self::LeftArm,
        Self::RightLeg,
        Self::LeftLeg,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Torso => "torso",
            Self::RightArm => "right_arm",
            Self::LeftArm => "left_arm",
            Self::RightLeg => "right_leg",
            Self::LeftLeg => "left_leg",
        }
    }

    /// Front face size in texels.
    pub const fn size(self) -> [u32; 2] {
        match self {
            Self::Head => [8, 8],
            Self::Torso => [8, 12],
            Self::RightArm | Self::LeftArm | Self::RightLeg | Self::LeftLeg => [4, 12],
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Head => 0,
            Self::Torso => 1,
            Self::RightArm => 2,
            Self::LeftArm => 3,
            Self::RightLeg => 4,
            Self::LeftLeg => 5,
        }
    }
}

/// Where a part's pixels come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartSource {
    Direct(AtlasRegion),
    /// The region flipped left-right about its own vertical centerline.
    Mirrored(AtlasRegion),
}

impl PartSource {
    pub const fn region(self) -> AtlasRegion {
        match self {
            Self::Direct(region) | Self::Mirrored(region) => region,
        }
    }

    pub const fn is_mirrored(self) -> bool {
        matches!(self, Self::Mirrored(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PartMapping {
    pub part: BodyPart,
    pub legacy: PartSource,
    pub modern: PartSource,
}

impl PartMapping {
    pub const fn source(&self, format: AtlasFormat) -> PartSource {
        match format {
            AtlasFormat::Legacy => self.legacy,
            AtlasFormat::Modern => self.modern,
        }
    }
}

pub const HEAD_FRONT: AtlasRegion = region!(8, 8, 8, 8);
pub const TORSO_FRONT: AtlasRegion = region!(20, 20, 8, 12);
pub const RIGHT_ARM_FRONT: AtlasRegion = region!(44, 20, 4, 12);
pub const RIGHT_LEG_FRONT: AtlasRegion = region!(4, 20, 4, 12);
// Only present in the 64x64 layout.
pub const LEFT_ARM_FRONT: AtlasRegion = region!(36, 52, 4, 12);
pub const LEFT_LEG_FRONT: AtlasRegion = region!(20, 52, 4, 12);

/// Indexed by [`BodyPart::index`].
pub static BODY_PART_MAPPING: [PartMapping; 6] = [
    part_mapping! {
        part: Head,
        legacy: PartSource::Direct(HEAD_FRONT),
        modern: PartSource::Direct(HEAD_FRONT),
    },
    part_mapping! {
        part: Torso,
        legacy: PartSource::Direct(TORSO_FRONT),
        modern: PartSource::Direct(TORSO_FRONT),
    },
    part_mapping! {
        part: RightArm,
        legacy: PartSource::Direct(RIGHT_ARM_FRONT),
        modern: PartSource::Direct(RIGHT_ARM_FRONT),
    },
    // The legacy atlas only describes the right limbs.
    part_mapping! {
        part: LeftArm,
        legacy: PartSource::Mirrored(RIGHT_ARM_FRONT),
        modern: PartSource::Direct(LEFT_ARM_FRONT),
    },
    part_mapping! {
        part: RightLeg,
        legacy: PartSource::Direct(RIGHT_LEG_FRONT),
        modern: PartSource::Direct(RIGHT_LEG_FRONT),
    },
    part_mapping! {
        part: LeftLeg,
        legacy: PartSource::Mirrored(RIGHT_LEG_FRONT),
        modern: PartSource::Direct(LEFT_LEG_FRONT),
    },
];

pub fn part_source(part: BodyPart, format: AtlasFormat) -> PartSource {
    BODY_PART_MAPPING[part.index()].source(format)
}

/// Resolves every part for `format`, in draw order.
pub fn resolve_parts(format: AtlasFormat) -> [(BodyPart, PartSource); 6] {
    BodyPart::ALL.map(|part| (part, part_source(part, format)))
}

/// Copies a part's texels out of the atlas, flipping mirrored sources.
pub fn extract_part(atlas: &RgbaImage, source: PartSource) -> RgbaImage {
    let region = source.region();
    let texels =
        imageops::crop_imm(atlas, region.x, region.y, region.width, region.height).to_image();
    match source {
        PartSource::Direct(_) => texels,
        PartSource::Mirrored(_) => imageops::flip_horizontal(&texels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn table_is_indexed_by_part() {
        for part in BodyPart::ALL {
            assert_eq!(BODY_PART_MAPPING[part.index()].part, part);
        }
    }

    #[test]
    fn regions_match_part_sizes_and_fit_their_atlas() {
        for mapping in &BODY_PART_MAPPING {
            let [w, h] = mapping.part.size();
            for (format, source, atlas_height) in [
                (AtlasFormat::Legacy, mapping.legacy, 32),
                (AtlasFormat::Modern, mapping.modern, 64),
            ] {
                let region = source.region();
                assert_eq!((region.width, region.height), (w, h), "{:?} {:?}", mapping.part, format);
                assert!(region.fits_within(64, atlas_height), "{:?} {:?}", mapping.part, format);
            }
        }
    }

    #[test]
    fn only_legacy_left_limbs_are_mirrored() {
        for part in BodyPart::ALL {
            assert!(!part_source(part, AtlasFormat::Modern).is_mirrored());
            let legacy_mirrored = part_source(part, AtlasFormat::Legacy).is_mirrored();
            assert_eq!(
                legacy_mirrored,
                matches!(part, BodyPart::LeftArm | BodyPart::LeftLeg)
            );
        }
        assert_eq!(
            part_source(BodyPart::LeftArm, AtlasFormat::Legacy),
            PartSource::Mirrored(RIGHT_ARM_FRONT)
        );
        assert_eq!(
            part_source(BodyPart::LeftLeg, AtlasFormat::Legacy),
            PartSource::Mirrored(RIGHT_LEG_FRONT)
        );
    }

    #[test]
    fn mirrored_extraction_flips_columns() {
        let mut atlas = RgbaImage::new(64, 32);
        for y in 0..12 {
            for x in 0..4 {
                atlas.put_pixel(44 + x, 20 + y, Rgba([x as u8 * 10, y as u8, 0, 255]));
            }
        }
        let direct = extract_part(&atlas, PartSource::Direct(RIGHT_ARM_FRONT));
        let mirrored = extract_part(&atlas, PartSource::Mirrored(RIGHT_ARM_FRONT));
        assert_eq!(mirrored.dimensions(), (4, 12));
        for y in 0..12 {
            for x in 0..4 {
                assert_eq!(mirrored.get_pixel(x, y), direct.get_pixel(3 - x, y));
            }
        }
    }
}
