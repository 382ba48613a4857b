use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sp_net::HttpSkinFetcher;
use sp_render::Surface;
use sp_utils::{
    AuthType, JsonSettingsFile, Profile, ProfileSource, SettingsStore, launcher_data_root,
    settings_path,
};
use tracing::{info, warn};

mod config;
mod preview;

use config::PreviewConfig;
use preview::{RenderOutcome, SkinPreview};

#[derive(Parser)]
#[command(name = "sp-client", version, about = "Render a front-facing skin preview")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the preview for the current sign-in state (or an explicit skin) to a PNG.
    Render(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Auth type to render for. Defaults to the launcher's stored `auth_type`.
    #[arg(long)]
    auth: Option<AuthType>,
    /// Signed-in profile username. Without it, Ely.by falls back to the stored username.
    #[arg(long)]
    profile_username: Option<String>,
    #[arg(long, default_value = "")]
    profile_uuid: String,
    #[arg(long, default_value = "elyby")]
    profile_source: ProfileSource,
    /// Skin path or URL to render instead of the sign-in state.
    #[arg(long, conflicts_with = "custom")]
    source: Option<String>,
    /// Render the launcher's custom skin file (`skin_path`).
    #[arg(long)]
    custom: bool,
    /// preview.toml with surface size and placeholder styling.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Launcher data directory holding settings.json.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, short)]
    out: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().without_time().compact().init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(args).await,
    }
}

async fn render(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => PreviewConfig::load(path)?,
        None => PreviewConfig::default(),
    };
    let data_root = args.data_dir.clone().unwrap_or_else(launcher_data_root);
    let settings = JsonSettingsFile::new(settings_path(&data_root));
    info!("using launcher settings at {:?}", settings.path());

    let stored = settings.read().await?;
    let auth = args.auth.unwrap_or(stored.auth_type);
    let profile = args.profile_username.map(|username| Profile {
        username,
        uuid: args.profile_uuid,
        source: args.profile_source,
    });

    let preview = SkinPreview::new(
        settings,
        HttpSkinFetcher::new(&config.user_agent)?,
        Surface::new(config.width, config.height),
        config.placeholder_style()?,
    );

    let outcome = if let Some(source) = &args.source {
        preview.render_source(source).await
    } else if args.custom {
        match &stored.skin_path {
            Some(path) => preview.render_source(path).await,
            None => {
                warn!("no custom skin set in launcher settings");
                preview.render_source("").await
            }
        }
    } else {
        preview.render(profile.as_ref(), auth).await
    };

    preview.snapshot().save_png(&args.out)?;
    match outcome {
        RenderOutcome::Composited(format) => {
            info!("wrote {:?} skin preview to {:?}", format, args.out)
        }
        RenderOutcome::Placeholder(reason) => {
            info!("wrote placeholder ({:?}) to {:?}", reason, args.out)
        }
        RenderOutcome::Superseded => {}
    }
    Ok(())
}
