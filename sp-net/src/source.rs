use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sp_utils::{AuthType, Profile, ProfileSource, SettingsError, SettingsStore};
use tracing::{debug, warn};
use url::Url;

pub const ELYBY_SKIN_URL_BASE: &str = "http://skinsystem.ely.by/skins/";

pub fn elyby_skin_url(username: &str) -> String {
    format!("{ELYBY_SKIN_URL_BASE}{username}.png")
}

/// A loadable skin location: an `http(s)://` URL or a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkinSource(String);

impl SkinSource {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_remote(&self) -> bool {
        is_http(&self.0)
    }

    pub fn is_file(&self) -> bool {
        has_prefix_ignore_case(&self.0, "file://")
    }
}

impl std::fmt::Display for SkinSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn is_http(s: &str) -> bool {
    has_prefix_ignore_case(s, "http://") || has_prefix_ignore_case(s, "https://")
}

/// Timestamps for cache-busting query parameters.
///
/// Values are milliseconds since the epoch, strictly increasing per buster
/// even when called twice within the same millisecond.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let prev = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(prev + 1)
    }
}

/// Turns a raw path or URL into a [`SkinSource`].
///
/// Anything without an http(s) or file scheme is a local path: backslashes
/// become forward slashes and `file:///` is prepended. Remote URLs get a
/// fresh `t=` query parameter.
pub fn normalize_source(raw: &str, buster: &CacheBuster) -> SkinSource {
    let src = if is_http(raw) || has_prefix_ignore_case(raw, "file://") {
        raw.to_string()
    } else {
        format!("file:///{}", raw.replace('\\', "/"))
    };

    if !is_http(&src) {
        return SkinSource(src);
    }
    match Url::parse(&src) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("t", &buster.next().to_string());
            SkinSource(url.into())
        }
        Err(err) => {
            // Left as-is; the load will fail and end in the placeholder.
            warn!("unparseable skin URL {:?}: {}", src, err);
            SkinSource(src)
        }
    }
}

/// Picks the skin to show for the current sign-in state.
#[derive(Debug, Default)]
pub struct SourceResolver {
    buster: CacheBuster,
}

impl SourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Ok(None)` when there is nothing to load. Never writes settings.
    pub async fn resolve<S: SettingsStore>(
        &self,
        profile: Option<&Profile>,
        auth: AuthType,
        settings: &S,
    ) -> Result<Option<SkinSource>, SettingsError> {
        let raw = match auth {
            AuthType::Microsoft => {
                let url = settings.read().await?.microsoft_skin_url;
                non_empty(url)
            }
            AuthType::ElyBy => {
                let username = match profile {
                    // Signed in with something other than Ely.by: nothing to show.
                    Some(profile) if profile.source != ProfileSource::ElyBy => None,
                    Some(profile) if !profile.username.trim().is_empty() => {
                        Some(profile.username.clone())
                    }
                    // No profile, or one without a username: use the stored name.
                    _ => non_empty(settings.read().await?.username),
                };
                username.map(|name| elyby_skin_url(&name))
            }
            AuthType::Offline => None,
        };

        let Some(raw) = raw else {
            debug!("no skin source for auth type {}", auth);
            return Ok(None);
        };
        let source = normalize_source(&raw, &self.buster);
        debug!("resolved skin source {}", source);
        Ok(Some(source))
    }

    /// Normalizes a path or URL supplied directly, bypassing sign-in state.
    pub fn explicit(&self, raw: &str) -> Option<SkinSource> {
        non_empty(raw.to_string()).map(|raw| normalize_source(&raw, &self.buster))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
