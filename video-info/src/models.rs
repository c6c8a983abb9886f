use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::embed::{self, EmbedOptions};
use crate::providers::ProviderKind;

/// Thumbnail URLs at the five size tiers providers publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub large_2x: Option<String>,
    pub maxres: Option<String>,
}

impl Thumbnails {
    pub fn is_empty(&self) -> bool {
        self.small.is_none()
            && self.medium.is_none()
            && self.large.is_none()
            && self.large_2x.is_none()
            && self.maxres.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub provider: String,
    pub video_id: String,
    pub url: String,
    pub available: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub duration: Option<u64>, // in seconds
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub date: Option<DateTime<Utc>>,
    pub view_count: Option<u64>,
    pub thumbnails: Thumbnails,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub author_thumbnail: Option<String>,
    pub embed_url: String,
}

impl VideoMetadata {
    /// An empty record for `video_id`; normalizers fill in what the provider returned.
    pub fn new(kind: ProviderKind, video_id: &str, url: &str) -> Self {
        VideoMetadata {
            provider: kind.display_name().to_string(),
            video_id: video_id.to_string(),
            url: url.to_string(),
            available: false,
            title: None,
            description: None,
            keywords: None,
            duration: None,
            width: None,
            height: None,
            date: None,
            view_count: None,
            thumbnails: Thumbnails::default(),
            author: None,
            author_url: None,
            author_thumbnail: None,
            embed_url: kind.embed_url(video_id),
        }
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnails.small.as_deref()
    }

    pub fn embed_code(&self, options: &EmbedOptions) -> String {
        let defaults = ProviderKind::for_video(&self.provider)
            .map(|k| k.embed_defaults())
            .unwrap_or_default();
        embed::embed_code(&self.embed_url, &defaults, options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistVideo {
    pub video_id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistMetadata {
    pub provider: String,
    pub playlist_id: String,
    pub url: String,
    pub available: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Thumbnails,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub author_thumbnail: Option<String>,
    pub embed_url: String,
    pub videos: Vec<PlaylistVideo>,
}

impl PlaylistMetadata {
    pub fn new(playlist_id: &str, url: &str) -> Self {
        let kind = ProviderKind::YouTubePlaylist;
        PlaylistMetadata {
            provider: kind.display_name().to_string(),
            playlist_id: playlist_id.to_string(),
            url: url.to_string(),
            available: false,
            title: None,
            description: None,
            thumbnails: Thumbnails::default(),
            author: None,
            author_url: None,
            author_thumbnail: None,
            embed_url: kind.embed_url(playlist_id),
            videos: Vec::new(),
        }
    }

    pub fn video_ids(&self) -> Vec<&str> {
        self.videos.iter().map(|v| v.video_id.as_str()).collect()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnails.small.as_deref()
    }

    // Playlists carry none of the per-video measurements.
    pub fn keywords(&self) -> Option<&[String]> {
        None
    }

    pub fn duration(&self) -> Option<u64> {
        None
    }

    pub fn width(&self) -> Option<u32> {
        None
    }

    pub fn height(&self) -> Option<u32> {
        None
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        None
    }

    pub fn view_count(&self) -> Option<u64> {
        None
    }

    pub fn embed_code(&self, options: &EmbedOptions) -> String {
        let defaults = ProviderKind::YouTubePlaylist.embed_defaults();
        embed::embed_code(&self.embed_url, &defaults, options)
    }
}

/// What a URL resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resolved {
    Video(VideoMetadata),
    Playlist(PlaylistMetadata),
}

impl Resolved {
    pub fn provider(&self) -> &str {
        match self {
            Resolved::Video(v) => &v.provider,
            Resolved::Playlist(p) => &p.provider,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Resolved::Video(v) => &v.url,
            Resolved::Playlist(p) => &p.url,
        }
    }

    pub fn available(&self) -> bool {
        match self {
            Resolved::Video(v) => v.available,
            Resolved::Playlist(p) => p.available,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Resolved::Video(v) => v.title.as_deref(),
            Resolved::Playlist(p) => p.title.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Resolved::Video(v) => v.description.as_deref(),
            Resolved::Playlist(p) => p.description.as_deref(),
        }
    }

    pub fn thumbnails(&self) -> &Thumbnails {
        match self {
            Resolved::Video(v) => &v.thumbnails,
            Resolved::Playlist(p) => &p.thumbnails,
        }
    }

    pub fn embed_url(&self) -> &str {
        match self {
            Resolved::Video(v) => &v.embed_url,
            Resolved::Playlist(p) => &p.embed_url,
        }
    }

    pub fn embed_code(&self, options: &EmbedOptions) -> String {
        match self {
            Resolved::Video(v) => v.embed_code(options),
            Resolved::Playlist(p) => p.embed_code(options),
        }
    }

    pub fn as_video(&self) -> Option<&VideoMetadata> {
        match self {
            Resolved::Video(v) => Some(v),
            Resolved::Playlist(_) => None,
        }
    }

    pub fn as_playlist(&self) -> Option<&PlaylistMetadata> {
        match self {
            Resolved::Playlist(p) => Some(p),
            Resolved::Video(_) => None,
        }
    }
}
