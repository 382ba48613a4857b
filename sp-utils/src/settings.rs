use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::AuthType;

/// The subset of launcher settings the skin preview reads.
///
/// Every field falls back to the launcher's default when the key is absent,
/// and keys the preview doesn't care about are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub auth_type: AuthType,
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub microsoft_skin_url: String,
    /// Custom skin file chosen in the launcher, if any.
    pub skin_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: "Player".to_string(),
            auth_type: AuthType::Offline,
            uuid: String::new(),
            microsoft_skin_url: String::new(),
            skin_path: None,
        }
    }
}

// Logging out writes `null` over several keys.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only access to the launcher's stored settings.
pub trait SettingsStore: Send + Sync {
    fn read(&self) -> impl Future<Output = Result<Settings, SettingsError>> + Send;
}

/// `settings.json` as written by the launcher.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsFile {
    async fn read(&self) -> Result<Settings, SettingsError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no settings at {:?}, using defaults", self.path);
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Settings held in memory, handed over by whoever already loaded them.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings(pub Settings);

impl SettingsStore for InMemorySettings {
    async fn read(&self) -> Result<Settings, SettingsError> {
        Ok(self.0.clone())
    }
}
