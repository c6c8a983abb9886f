//! Provider registry: URL matching and dispatch to the per-provider fetchers.

pub mod dailymotion;
pub mod vimeo;
pub mod youtube;
pub mod youtube_playlist;

use serde::{Deserialize, Serialize};

use crate::client::HttpClient;
use crate::config::Endpoints;
use crate::embed::{Attributes, EmbedDefaults};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    Dailymotion,
    Vimeo,
    YouTubePlaylist,
    YouTube,
}

/// Registration order; the first usable provider wins.
pub const PROVIDERS: [ProviderKind; 4] = [
    ProviderKind::Dailymotion,
    ProviderKind::Vimeo,
    ProviderKind::YouTubePlaylist,
    ProviderKind::YouTube,
];

impl ProviderKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Dailymotion => "Dailymotion",
            ProviderKind::Vimeo => "Vimeo",
            ProviderKind::YouTubePlaylist | ProviderKind::YouTube => "YouTube",
        }
    }

    /// Key under which this provider's API credential is stored.
    pub fn credential_key(self) -> &'static str {
        match self {
            ProviderKind::Dailymotion => "dailymotion",
            ProviderKind::Vimeo => "vimeo",
            ProviderKind::YouTubePlaylist | ProviderKind::YouTube => "youtube",
        }
    }

    /// The single-video provider behind a display name.
    pub fn for_video(display_name: &str) -> Option<ProviderKind> {
        match display_name {
            "Dailymotion" => Some(ProviderKind::Dailymotion),
            "Vimeo" => Some(ProviderKind::Vimeo),
            "YouTube" => Some(ProviderKind::YouTube),
            _ => None,
        }
    }

    pub fn usable(self, url: &str) -> bool {
        self.resource_id(url).is_some()
    }

    /// Video or playlist id this provider reads from `url`.
    pub fn resource_id(self, url: &str) -> Option<String> {
        match self {
            ProviderKind::Dailymotion => dailymotion::video_id(url),
            ProviderKind::Vimeo => vimeo::video_id(url),
            ProviderKind::YouTubePlaylist => youtube_playlist::playlist_id(url),
            ProviderKind::YouTube => youtube::video_id(url),
        }
    }

    pub fn embed_url(self, resource_id: &str) -> String {
        match self {
            ProviderKind::Dailymotion => format!("//www.dailymotion.com/embed/video/{resource_id}"),
            ProviderKind::Vimeo => format!("//player.vimeo.com/video/{resource_id}"),
            ProviderKind::YouTubePlaylist => {
                format!("//www.youtube.com/embed/videoseries?list={resource_id}")
            }
            ProviderKind::YouTube => format!("//www.youtube.com/embed/{resource_id}"),
        }
    }

    pub fn embed_defaults(self) -> EmbedDefaults {
        let url_attributes = match self {
            ProviderKind::Dailymotion => Attributes::new().with("autoplay", "0"),
            ProviderKind::Vimeo => Attributes::new()
                .with("title", "0")
                .with("byline", "0")
                .with("portrait", "0")
                .with("autoplay", "0"),
            ProviderKind::YouTubePlaylist | ProviderKind::YouTube => Attributes::new(),
        };
        EmbedDefaults {
            url_attributes,
            iframe_attributes: Attributes::new().with("allowfullscreen", "allowfullscreen"),
        }
    }
}

/// First registered provider that recognizes `url`.
pub fn find_provider(url: &str) -> Option<ProviderKind> {
    PROVIDERS.into_iter().find(|p| p.usable(url))
}

/// Everything a fetcher needs for one call.
pub struct ProviderContext<'a> {
    pub http: &'a HttpClient,
    pub endpoints: &'a Endpoints,
    pub credential: Option<&'a str>,
}
