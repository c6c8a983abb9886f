//! YouTube playlists. Only the first page of items is read.

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde_json::Value;

use super::{youtube, ProviderContext};
use crate::client::endpoint;
use crate::error::{Error, Result};
use crate::models::{PlaylistMetadata, PlaylistVideo, Thumbnails};
use crate::scrape::{self, MetaTags};
use crate::utils::{host_matches, non_empty_field, parse_url, query_param, string_field};

lazy_static! {
    static ref PLAYLIST_ID: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex");
}

const MAX_RESULTS: &str = "50";

pub fn playlist_id(url: &str) -> Option<String> {
    let parsed = parse_url(url)?;
    if !host_matches(&parsed, "youtube.com") {
        return None;
    }

    match parsed.path().trim_end_matches('/') {
        "/playlist" | "/embed/videoseries" => {}
        _ => return None,
    }

    query_param(&parsed, "list")
        .or_else(|| query_param(&parsed, "p"))
        .filter(|id| PLAYLIST_ID.is_match(id))
}

pub async fn fetch(
    ctx: &ProviderContext<'_>,
    playlist_id: &str,
    url: &str,
) -> Result<PlaylistMetadata> {
    let playlist = match ctx.credential {
        Some(api_key) => fetch_api(ctx, api_key, playlist_id, url).await?,
        None => fetch_scraper(ctx, playlist_id, url).await?,
    };

    if playlist.available {
        info!(
            "Resolved YouTube playlist {playlist_id} with {} videos",
            playlist.videos.len()
        );
    } else {
        warn!("YouTube playlist {playlist_id} is not available");
    }
    Ok(playlist)
}

// Documentation: https://developers.google.com/youtube/v3/docs/playlists
async fn fetch_api(
    ctx: &ProviderContext<'_>,
    api_key: &str,
    playlist_id: &str,
    url: &str,
) -> Result<PlaylistMetadata> {
    let request = endpoint(
        &ctx.endpoints.youtube_api,
        "/youtube/v3/playlists",
        &[("id", playlist_id), ("part", "snippet"), ("key", api_key)],
    )?;

    let item = match ctx.http.get_json(&request, None).await? {
        Some(response) => youtube::first_item(&response)?,
        None => None,
    };
    let Some(item) = item else {
        return Ok(normalize_api(playlist_id, url, None, &[]));
    };

    let items = fetch_api_items(ctx, api_key, playlist_id).await?;
    let mut playlist = normalize_api(playlist_id, url, Some(&item), &items);

    if let Some(channel_id) = item["snippet"]["channelId"].as_str() {
        playlist.author_thumbnail =
            youtube::fetch_channel_thumbnail(ctx, api_key, channel_id).await?;
    }

    Ok(playlist)
}

// Documentation: https://developers.google.com/youtube/v3/docs/playlistItems
async fn fetch_api_items(
    ctx: &ProviderContext<'_>,
    api_key: &str,
    playlist_id: &str,
) -> Result<Vec<Value>> {
    let request = endpoint(
        &ctx.endpoints.youtube_api,
        "/youtube/v3/playlistItems",
        &[
            ("playlistId", playlist_id),
            ("part", "snippet"),
            ("maxResults", MAX_RESULTS),
            ("key", api_key),
        ],
    )?;

    Ok(ctx
        .http
        .get_json(&request, None)
        .await?
        .and_then(|response| response["items"].as_array().cloned())
        .unwrap_or_default())
}

/// Maps a `playlists` item and its `playlistItems`. `None` means no such playlist.
pub fn normalize_api(
    playlist_id: &str,
    url: &str,
    item: Option<&Value>,
    items: &[Value],
) -> PlaylistMetadata {
    let mut playlist = PlaylistMetadata::new(playlist_id, url);
    let Some(item) = item else {
        return playlist;
    };
    let snippet = &item["snippet"];

    playlist.available = true;
    playlist.title = non_empty_field(&snippet["title"]);
    playlist.description = string_field(&snippet["description"]);
    playlist.author = non_empty_field(&snippet["channelTitle"]);
    playlist.author_url = snippet["channelId"].as_str().map(youtube::channel_url);
    playlist.videos = items
        .iter()
        .filter_map(|entry| {
            let snippet = &entry["snippet"];
            Some(PlaylistVideo {
                video_id: snippet["resourceId"]["videoId"].as_str()?.to_string(),
                title: non_empty_field(&snippet["title"]),
            })
        })
        .collect();
    playlist.thumbnails = playlist_thumbnails(&playlist.videos);
    playlist
}

async fn fetch_scraper(
    ctx: &ProviderContext<'_>,
    playlist_id: &str,
    url: &str,
) -> Result<PlaylistMetadata> {
    let request = endpoint(
        &ctx.endpoints.youtube_web,
        "/playlist",
        &[("list", playlist_id), ("hl", "en")],
    )?;

    match ctx.http.get_text(&request).await? {
        Some(html) => normalize_page(playlist_id, url, &html),
        None => Ok(PlaylistMetadata::new(playlist_id, url)),
    }
}

/// Maps a playlist page through its `ytInitialData` blob.
pub fn normalize_page(playlist_id: &str, url: &str, html: &str) -> Result<PlaylistMetadata> {
    let data = scrape::embedded_json(html, "ytInitialData").ok_or_else(|| {
        Error::InvalidResponse(format!("no initial data on playlist page for {playlist_id}"))
    })?;
    let meta = MetaTags::parse(html);

    let mut playlist = PlaylistMetadata::new(playlist_id, url);
    let Some(details) = scrape::find_first(&data, "playlistMetadataRenderer") else {
        return Ok(playlist);
    };

    playlist.available = true;
    playlist.title = non_empty_field(&details["title"])
        .or_else(|| meta.get("og:title").map(String::from));
    playlist.description = string_field(&details["description"])
        .or_else(|| meta.get("og:description").map(String::from));

    let header = scrape::find_first(&data, "playlistHeaderRenderer");
    let owner = scrape::find_first(&data, "videoOwnerRenderer");

    playlist.author = header
        .and_then(|h| scrape::text_of(&h["ownerText"]))
        .or_else(|| owner.and_then(|o| scrape::text_of(&o["title"])))
        .filter(|name| !name.is_empty());
    playlist.author_url = header
        .and_then(|h| h["ownerText"]["runs"][0]["navigationEndpoint"]["browseEndpoint"]["browseId"].as_str())
        .or_else(|| {
            owner.and_then(|o| {
                o["navigationEndpoint"]["browseEndpoint"]["browseId"].as_str()
            })
        })
        .map(youtube::channel_url);
    playlist.author_thumbnail =
        owner.and_then(|o| non_empty_field(&o["thumbnail"]["thumbnails"][0]["url"]));

    playlist.videos = scrape::find_all(&data, "playlistVideoRenderer")
        .into_iter()
        .filter_map(|renderer| {
            Some(PlaylistVideo {
                video_id: renderer["videoId"].as_str()?.to_string(),
                title: scrape::text_of(&renderer["title"]).filter(|t| !t.is_empty()),
            })
        })
        .collect();
    playlist.thumbnails = playlist_thumbnails(&playlist.videos);

    Ok(playlist)
}

/// A playlist shows its first video's thumbnails.
fn playlist_thumbnails(videos: &[PlaylistVideo]) -> Thumbnails {
    videos
        .first()
        .map(|v| youtube::thumbnails(&v.video_id))
        .unwrap_or_default()
}
