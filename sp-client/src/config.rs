use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sp_render::{PlaceholderStyle, parse_hex_color};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid preview config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{key} must be a #rrggbb color, got {value:?}")]
    InvalidColor { key: &'static str, value: String },
    #[error("preview surface must be non-empty, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
    #[error("preview surface may be at most {max}x{max}, got {width}x{height}")]
    SurfaceTooLarge { width: u32, height: u32, max: u32 },
}

/// Largest width or height accepted for the preview surface.
pub const MAX_SURFACE_SIDE: u32 = 4096;

/// `preview.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub text_color: String,
    pub placeholder_text: String,
    pub user_agent: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 300,
            background: "#2d2f33".to_string(),
            text_color: "#666666".to_string(),
            placeholder_text: "No skin".to_string(),
            user_agent: concat!("SkinPreview/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_SURFACE_SIDE || self.height > MAX_SURFACE_SIDE {
            return Err(ConfigError::SurfaceTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_SURFACE_SIDE,
            });
        }
        self.placeholder_style().map(|_| ())
    }

    pub fn placeholder_style(&self) -> Result<PlaceholderStyle, ConfigError> {
        let color = |key: &'static str, value: &str| {
            parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
                key,
                value: value.to_string(),
            })
        };
        Ok(PlaceholderStyle {
            background: color("background", &self.background)?,
            text_color: color("text_color", &self.text_color)?,
            text: self.placeholder_text.clone(),
            ..PlaceholderStyle::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_render::{PLACEHOLDER_BACKGROUND, PLACEHOLDER_TEXT_COLOR};

    #[test]
    fn defaults_match_builtin_placeholder() {
        let style = PreviewConfig::default().placeholder_style().unwrap();
        assert_eq!(style, PlaceholderStyle::default());
        assert_eq!(style.background, PLACEHOLDER_BACKGROUND);
        assert_eq!(style.text_color, PLACEHOLDER_TEXT_COLOR);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.toml");
        std::fs::write(&path, "width = 256\nplaceholder_text = \"Offline\"\n").unwrap();

        let config = PreviewConfig::load(&path).unwrap();
        assert_eq!(config.width, 256);
        assert_eq!(config.height, 300);
        assert_eq!(config.placeholder_style().unwrap().text, "Offline");
    }

    #[test]
    fn bad_color_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.toml");
        std::fs::write(&path, "background = \"dark grey\"\n").unwrap();

        let err = PreviewConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { key: "background", .. }));
    }

    #[test]
    fn oversized_surface_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.toml");
        std::fs::write(&path, "width = 100000\nheight = 100000\n").unwrap();

        let err = PreviewConfig::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SurfaceTooLarge { width: 100000, height: 100000, max: MAX_SURFACE_SIDE }
        ));

        let largest = PreviewConfig {
            width: MAX_SURFACE_SIDE,
            height: MAX_SURFACE_SIDE,
            ..PreviewConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let config = PreviewConfig {
            height: 0,
            ..PreviewConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySurface { width: 200, height: 0 })
        ));
    }
}
