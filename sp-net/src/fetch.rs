use std::future::Future;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::SkinSource;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot load from {0:?}")]
    InvalidSource(String),
}

/// Fetches the raw bytes behind a [`SkinSource`].
pub trait SkinFetcher: Send + Sync {
    fn fetch(&self, source: &SkinSource) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Loads `http(s)://` sources with reqwest and `file://` sources from disk.
#[derive(Debug, Clone)]
pub struct HttpSkinFetcher {
    client: reqwest::Client,
}

impl HttpSkinFetcher {
    pub fn new(user_agent: &str) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("skin request to {} failed with {}", url, status);
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl SkinFetcher for HttpSkinFetcher {
    async fn fetch(&self, source: &SkinSource) -> Result<Vec<u8>, LoadError> {
        if source.is_remote() {
            debug!("fetching skin from {}", source);
            return self.fetch_remote(source.as_str()).await;
        }
        let Some(path) = file_uri_to_path(source.as_str()) else {
            return Err(LoadError::InvalidSource(source.to_string()));
        };
        debug!("reading skin from {:?}", path);
        tokio::fs::read(&path)
            .await
            .map_err(|source| LoadError::Io { path, source })
    }
}

/// `file:///C:/a/b.png` -> `C:/a/b.png`, `file:///home/my%20skin.png` -> `/home/my skin.png`.
pub fn file_uri_to_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok().filter(|url| url.scheme() == "file")?;
    let path = url.to_file_path().ok()?;
    if cfg!(windows) {
        return Some(path);
    }

    // Drive-letter URIs written on Windows come back as `/C:/...` elsewhere.
    let text = path.to_str()?;
    let bytes = text.as_bytes();
    let has_drive = bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b':';
    // `file:///` glued onto an absolute unix path leaves a doubled slash.
    if has_drive || text.starts_with("//") {
        Some(PathBuf::from(&text[1..]))
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CacheBuster, normalize_source};

    #[cfg(unix)]
    #[test]
    fn file_uris_map_back_to_paths() {
        assert_eq!(
            file_uri_to_path("file:///C:/Users/a/skin.png"),
            Some(PathBuf::from("C:/Users/a/skin.png"))
        );
        assert_eq!(
            file_uri_to_path("file:///home/a/skin.png"),
            Some(PathBuf::from("/home/a/skin.png"))
        );
        assert_eq!(
            file_uri_to_path("file:////home/a/skin.png"),
            Some(PathBuf::from("/home/a/skin.png"))
        );
        assert_eq!(
            file_uri_to_path("file:///home/a/my%20skin.png"),
            Some(PathBuf::from("/home/a/my skin.png"))
        );
        assert_eq!(
            file_uri_to_path("file:///C:/Users/a/my%20skin.png"),
            Some(PathBuf::from("C:/Users/a/my skin.png"))
        );
    }

    #[test]
    fn non_file_uris_have_no_path() {
        assert_eq!(file_uri_to_path("http://x/y.png"), None);
        assert_eq!(file_uri_to_path("not a uri"), None);
    }

    #[tokio::test]
    async fn reads_percent_encoded_file_uris() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my skin.png");
        std::fs::write(&path, b"png bytes").unwrap();

        let uri = Url::from_file_path(&path).unwrap();
        assert!(uri.as_str().ends_with("my%20skin.png"));
        let source = normalize_source(uri.as_str(), &CacheBuster::new());
        let fetcher = HttpSkinFetcher::new("test").unwrap();
        assert_eq!(fetcher.fetch(&source).await.unwrap(), b"png bytes");
    }

    #[tokio::test]
    async fn reads_normalized_local_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skin.png");
        std::fs::write(&path, b"png bytes").unwrap();

        let source = normalize_source(path.to_str().unwrap(), &CacheBuster::new());
        let fetcher = HttpSkinFetcher::new("test").unwrap();
        assert_eq!(fetcher.fetch(&source).await.unwrap(), b"png bytes");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = normalize_source(
            dir.path().join("nope.png").to_str().unwrap(),
            &CacheBuster::new(),
        );
        let fetcher = HttpSkinFetcher::new("test").unwrap();
        let err = fetcher.fetch(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
