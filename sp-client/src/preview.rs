use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use sp_net::{LoadError, SkinFetcher, SkinSource, SourceResolver};
use sp_render::{
    AtlasFormat, PlaceholderStyle, RenderError, SkinImage, Surface, composite, draw_placeholder,
};
use sp_utils::{AuthType, Profile, SettingsError, SettingsStore};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SkinError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("image load failed: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// No profile, credentials or URL to load from.
    NoSource,
    /// Network, filesystem or decode failure.
    LoadFailed,
    /// Decoded fine but isn't a 64x32 or 64x64 atlas.
    FormatUnsupported,
}

/// Terminal state of one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Composited(AtlasFormat),
    Placeholder(PlaceholderReason),
    /// A newer request was issued before this one finished; the surface was left alone.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

/// Renders skin previews onto one surface.
///
/// Each call runs the whole pipeline from scratch: resolve source, load,
/// detect format, composite. Failures end in the placeholder. Only the most
/// recently issued request may draw.
pub struct SkinPreview<S, F> {
    settings: S,
    fetcher: F,
    resolver: SourceResolver,
    style: PlaceholderStyle,
    surface: Mutex<Surface>,
    latest: AtomicU64,
}

impl<S: SettingsStore, F: SkinFetcher> SkinPreview<S, F> {
    pub fn new(settings: S, fetcher: F, surface: Surface, style: PlaceholderStyle) -> Self {
        Self {
            settings,
            fetcher,
            resolver: SourceResolver::new(),
            style,
            surface: Mutex::new(surface),
            latest: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Surface {
        self.lock_surface().clone()
    }

    /// Shows the skin for the given sign-in state.
    pub async fn render(&self, profile: Option<&Profile>, auth: AuthType) -> RenderOutcome {
        let ticket = self.issue_ticket();
        let source = match self.resolver.resolve(profile, auth, &self.settings).await {
            Ok(Some(source)) => source,
            Ok(None) => {
                return self.finish_with_placeholder(ticket, PlaceholderReason::NoSource);
            }
            Err(err) => {
                let err = SkinError::from(err);
                warn!("could not resolve skin source: {}", err);
                return self.finish_with_placeholder(ticket, PlaceholderReason::NoSource);
            }
        };
        self.load_and_draw(ticket, source).await
    }

    /// Shows the skin at an explicit path or URL.
    pub async fn render_source(&self, raw: &str) -> RenderOutcome {
        let ticket = self.issue_ticket();
        match self.resolver.explicit(raw) {
            Some(source) => self.load_and_draw(ticket, source).await,
            None => self.finish_with_placeholder(ticket, PlaceholderReason::NoSource),
        }
    }

    fn issue_ticket(&self) -> RenderTicket {
        RenderTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn is_current(&self, ticket: RenderTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    fn lock_surface(&self) -> MutexGuard<'_, Surface> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn acquire(&self, source: &SkinSource) -> Result<SkinImage, SkinError> {
        let bytes = self.fetcher.fetch(source).await?;
        Ok(SkinImage::decode(&bytes)?)
    }

    async fn load_and_draw(&self, ticket: RenderTicket, source: SkinSource) -> RenderOutcome {
        let started = Instant::now();
        debug!("{:?}: loading {}", ticket, source);
        let skin = match self.acquire(&source).await {
            Ok(skin) => skin,
            Err(err) => {
                warn!("skin preview from {} failed: {}", source, err);
                let reason = match err {
                    SkinError::Render(RenderError::FormatUnsupported { .. }) => {
                        PlaceholderReason::FormatUnsupported
                    }
                    _ => PlaceholderReason::LoadFailed,
                };
                return self.finish_with_placeholder(ticket, reason);
            }
        };

        let mut surface = self.lock_surface();
        if !self.is_current(ticket) {
            debug!("{:?}: superseded, dropping {}", ticket, source);
            return RenderOutcome::Superseded;
        }
        composite(&skin, &mut surface);
        info!(
            "rendered {:?} skin from {} in {:.2}ms",
            skin.format(),
            source,
            started.elapsed().as_secs_f32() * 1000.0
        );
        RenderOutcome::Composited(skin.format())
    }

    fn finish_with_placeholder(
        &self,
        ticket: RenderTicket,
        reason: PlaceholderReason,
    ) -> RenderOutcome {
        let mut surface = self.lock_surface();
        if !self.is_current(ticket) {
            debug!("{:?}: superseded, skipping placeholder", ticket);
            return RenderOutcome::Superseded;
        }
        draw_placeholder(&mut surface, &self.style);
        info!("skin preview shows placeholder ({:?})", reason);
        RenderOutcome::Placeholder(reason)
    }
}
