use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to decode skin image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported skin atlas {width}x{height} (expected 64x32 or 64x64)")]
    FormatUnsupported { width: u32, height: u32 },
}
