use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod settings;
pub use settings::{InMemorySettings, JsonSettingsFile, Settings, SettingsError, SettingsStore};

pub const SKINPREVIEW_DATA_DIR_ENV: &str = "SKINPREVIEW_DATA_DIR";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Locates the launcher data directory that holds `settings.json`.
pub fn launcher_data_root() -> PathBuf {
    if let Ok(explicit) = std::env::var(SKINPREVIEW_DATA_DIR_ENV) {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return path;
        }
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        let sibling = exe_dir.join(".launcher");
        if sibling.exists() {
            return sibling;
        }
    }

    Path::new(".launcher").to_path_buf()
}

pub fn settings_path(data_root: &Path) -> PathBuf {
    data_root.join(SETTINGS_FILE_NAME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Microsoft,
    ElyBy,
    // Anything the launcher writes that we don't know is treated as offline.
    #[default]
    #[serde(other)]
    Offline,
}

impl AuthType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Microsoft => "microsoft",
            Self::ElyBy => "elyby",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown auth type {0:?} (expected microsoft, elyby or offline)")]
pub struct UnknownAuthType(pub String);

impl FromStr for AuthType {
    type Err = UnknownAuthType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "microsoft" => Ok(Self::Microsoft),
            "elyby" => Ok(Self::ElyBy),
            "offline" => Ok(Self::Offline),
            _ => Err(UnknownAuthType(s.to_string())),
        }
    }
}

/// Where a signed-in profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    ElyBy,
    #[serde(other)]
    Other,
}

impl FromStr for ProfileSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim().eq_ignore_ascii_case("elyby") {
            Self::ElyBy
        } else {
            Self::Other
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub uuid: String,
    pub source: ProfileSource,
}

impl Profile {
    pub fn elyby(username: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            uuid: uuid.into(),
            source: ProfileSource::ElyBy,
        }
    }
}
