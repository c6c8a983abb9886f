//! Video metadata from a URL.
//!
//! [`VideoInfo::resolve`] picks the provider that recognizes the URL, fetches
//! the video or playlist from that provider's API (when a credential is
//! configured) or its public pages, and returns one normalized record.
//!
//! ```no_run
//! # async fn example() -> video_info::Result<()> {
//! use video_info::{Config, Credentials, VideoInfo};
//!
//! let credentials = Credentials::new().with("youtube", "my-api-key");
//! let info = VideoInfo::new(Config::new(credentials))?;
//!
//! let resolved = info.resolve("https://www.youtube.com/watch?v=9g2U12SsRns").await?;
//! if resolved.available() {
//!     println!("{:?}", resolved.title());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod embed;
mod error;
pub mod models;
pub mod providers;
mod scrape;
mod utils;

use log::debug;

pub use config::{Config, Credentials, Endpoints};
pub use embed::EmbedOptions;
pub use error::{Error, Result};
pub use models::{PlaylistMetadata, PlaylistVideo, Resolved, Thumbnails, VideoMetadata};
pub use providers::{find_provider, ProviderKind};

use client::HttpClient;
use providers::{dailymotion, vimeo, youtube, youtube_playlist, ProviderContext};

/// Entry point: holds the HTTP client and the read-only configuration.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    http: HttpClient,
    config: Config,
}

impl VideoInfo {
    pub fn new(config: Config) -> Result<Self> {
        Ok(VideoInfo {
            http: HttpClient::new()?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The provider that would handle `url`.
    pub fn provider_for(&self, url: &str) -> Result<ProviderKind> {
        find_provider(url).ok_or_else(|| Error::UnsupportedUrl(url.to_string()))
    }

    /// Matches, fetches and normalizes `url`.
    ///
    /// A resource the provider does not know is not an error: the record comes
    /// back with `available() == false`.
    pub async fn resolve(&self, url: &str) -> Result<Resolved> {
        let kind = self.provider_for(url)?;
        let resource_id = kind
            .resource_id(url)
            .ok_or_else(|| Error::UnsupportedUrl(url.to_string()))?;

        let ctx = ProviderContext {
            http: &self.http,
            endpoints: &self.config.endpoints,
            credential: self.config.credentials.for_provider(kind),
        };
        debug!(
            "Resolving {resource_id} with {kind:?} ({})",
            if ctx.credential.is_some() { "api" } else { "scraper" }
        );

        match kind {
            ProviderKind::YouTubePlaylist => youtube_playlist::fetch(&ctx, &resource_id, url)
                .await
                .map(Resolved::Playlist),
            ProviderKind::YouTube => youtube::fetch(&ctx, &resource_id, url)
                .await
                .map(Resolved::Video),
            ProviderKind::Vimeo => vimeo::fetch(&ctx, &resource_id, url)
                .await
                .map(Resolved::Video),
            ProviderKind::Dailymotion => dailymotion::fetch(&ctx, &resource_id, url)
                .await
                .map(Resolved::Video),
        }
    }
}

/// One-off resolve against the real provider hosts.
pub async fn resolve(url: &str, credentials: &Credentials) -> Result<Resolved> {
    VideoInfo::new(Config::new(credentials.clone()))?
        .resolve(url)
        .await
}
