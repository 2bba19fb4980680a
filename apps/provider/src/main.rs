//! Command-line lookup against Apple Music
//!
//! Runs the same resolution the host runs and prints the result as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use applemusic_client::{ProviderIds, ProviderKey};
use applemusic_provider::{AlbumInfo, ArtistInfo, Config, MetadataProvider};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "applemusic-lookup")]
#[command(about = "Look up album and artist metadata on Apple Music")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an album
    Album(AlbumArgs),
    /// Resolve an artist
    Artist(ArtistArgs),
    /// Download an image
    Image {
        /// Image URL, usually taken from a previous lookup
        url: String,
        /// Where to write the bytes
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct Mode {
    /// List every matching candidate instead of the first match
    #[arg(long, conflicts_with = "images")]
    search: bool,
    /// List remote images instead of metadata
    #[arg(long)]
    images: bool,
}

#[derive(Args, Debug)]
struct AlbumArgs {
    /// Album name as tagged locally
    #[arg(long, default_value = "")]
    name: String,
    /// Album artist
    #[arg(long)]
    artist: Vec<String>,
    /// Album field of the first track
    #[arg(long)]
    track_album: Option<String>,
    /// Album-artist field of the first track
    #[arg(long)]
    track_artist: Option<String>,
    /// Expected release year
    #[arg(long)]
    year: Option<i32>,
    /// Stored Apple Music album id
    #[arg(long)]
    id: Option<String>,
    #[command(flatten)]
    mode: Mode,
}

#[derive(Args, Debug)]
struct ArtistArgs {
    /// Artist name
    #[arg(long, default_value = "")]
    name: String,
    /// Stored Apple Music artist id
    #[arg(long)]
    id: Option<String>,
    #[command(flatten)]
    mode: Mode,
}

impl AlbumArgs {
    fn to_info(&self) -> AlbumInfo {
        let mut info = self
            .artist
            .iter()
            .fold(AlbumInfo::new(self.name.as_str()), |info, artist| {
                info.with_album_artist(artist.as_str())
            });
        if self.track_album.is_some() || self.track_artist.is_some() {
            info = info.with_song(self.track_album.as_deref(), self.track_artist.as_deref());
        }
        if let Some(year) = self.year {
            info = info.with_year(year);
        }
        if let Some(id) = &self.id {
            info = info.with_provider_ids(ProviderIds::new().with(ProviderKey::Album, id.as_str()));
        }
        info
    }
}

impl ArtistArgs {
    fn to_info(&self) -> ArtistInfo {
        let info = ArtistInfo::new(self.name.as_str());
        match &self.id {
            Some(id) => {
                info.with_provider_ids(ProviderIds::new().with(ProviderKey::Artist, id.as_str()))
            }
            None => info,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let provider = MetadataProvider::from_config(&config).context("Failed to build provider")?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling lookup");
            on_signal.cancel();
        }
    });

    match cli.command {
        Command::Album(args) => {
            let info = args.to_info();
            info!(album = %info.name, "Looking up album");
            if args.mode.search {
                print_json(&provider.albums().get_search_results(&info, &cancel).await?)
            } else if args.mode.images {
                print_json(&provider.album_images().get_images(&info, &cancel).await?)
            } else {
                print_json(&provider.albums().get_metadata(&info, &cancel).await?)
            }
        }
        Command::Artist(args) => {
            let info = args.to_info();
            info!(artist = %info.name, "Looking up artist");
            if args.mode.search {
                print_json(&provider.artists().get_search_results(&info, &cancel).await?)
            } else if args.mode.images {
                print_json(&provider.artist_images().get_images(&info, &cancel).await?)
            } else {
                print_json(&provider.artists().get_metadata(&info, &cancel).await?)
            }
        }
        Command::Image { url, output } => {
            let bytes = provider.artists().get_image_response(&url, &cancel).await?;
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(bytes = bytes.len(), path = %output.display(), "Image saved");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
