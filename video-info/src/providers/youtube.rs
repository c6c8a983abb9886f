//! Single YouTube videos, through the Data API v3 or the watch page.

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde_json::Value;

use super::{ProviderContext, ProviderKind};
use crate::client::endpoint;
use crate::error::{Error, Result};
use crate::models::{Thumbnails, VideoMetadata};
use crate::scrape::{self, MetaTags};
use crate::utils::{
    host_matches, non_empty_field, parse_count, parse_iso8601_date,
    parse_iso8601_duration_to_seconds, parse_url, query_param, string_field,
};

lazy_static! {
    static ref VIDEO_ID: Regex = Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid regex");
}

const THUMBNAIL_HOST: &str = "https://i.ytimg.com/vi";
const CHANNEL_URL: &str = "https://www.youtube.com/channel";

pub fn video_id(url: &str) -> Option<String> {
    let parsed = parse_url(url)?;

    let candidate = if host_matches(&parsed, "youtu.be") {
        parsed.path_segments()?.next().map(String::from)
    } else if host_matches(&parsed, "youtube.com") || host_matches(&parsed, "youtube-nocookie.com")
    {
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        match segments.as_slice() {
            ["watch", ..] => query_param(&parsed, "v"),
            ["embed" | "v" | "e" | "shorts" | "live", id, ..] if *id != "videoseries" => {
                Some(id.to_string())
            }
            _ => None,
        }
    } else {
        None
    };

    candidate.filter(|id| VIDEO_ID.is_match(id))
}

/// Thumbnails follow a fixed naming scheme, no request needed.
pub fn thumbnails(video_id: &str) -> Thumbnails {
    let sized = |size: &str| Some(format!("{THUMBNAIL_HOST}/{video_id}/{size}.jpg"));
    Thumbnails {
        small: sized("default"),
        medium: sized("mqdefault"),
        large: sized("hqdefault"),
        large_2x: sized("sddefault"),
        maxres: sized("maxresdefault"),
    }
}

pub fn channel_url(channel_id: &str) -> String {
    format!("{CHANNEL_URL}/{channel_id}")
}

pub async fn fetch(ctx: &ProviderContext<'_>, video_id: &str, url: &str) -> Result<VideoMetadata> {
    let video = match ctx.credential {
        Some(api_key) => fetch_api(ctx, api_key, video_id, url).await?,
        None => fetch_scraper(ctx, video_id, url).await?,
    };

    if video.available {
        info!("Resolved YouTube video {video_id}: {:?}", video.title);
    } else {
        warn!("YouTube video {video_id} is not available");
    }
    Ok(video)
}

// Documentation: https://developers.google.com/youtube/v3/docs/videos
async fn fetch_api(
    ctx: &ProviderContext<'_>,
    api_key: &str,
    video_id: &str,
    url: &str,
) -> Result<VideoMetadata> {
    let request = endpoint(
        &ctx.endpoints.youtube_api,
        "/youtube/v3/videos",
        &[
            ("id", video_id),
            ("part", "snippet,statistics,contentDetails"),
            ("key", api_key),
        ],
    )?;

    let item = match ctx.http.get_json(&request, None).await? {
        Some(response) => first_item(&response)?,
        None => None,
    };

    let mut video = normalize_api(video_id, url, item.as_ref());

    if let Some(channel_id) = item
        .as_ref()
        .and_then(|i| i["snippet"]["channelId"].as_str())
    {
        video.author_thumbnail = fetch_channel_thumbnail(ctx, api_key, channel_id).await?;
    }

    Ok(video)
}

/// `items[0]` of a Data API list response; `None` for an empty result set.
pub(crate) fn first_item(response: &Value) -> Result<Option<Value>> {
    let items = response["items"]
        .as_array()
        .ok_or_else(|| Error::InvalidResponse("missing `items` in YouTube API response".into()))?;
    Ok(items.first().cloned())
}

pub(crate) async fn fetch_channel_thumbnail(
    ctx: &ProviderContext<'_>,
    api_key: &str,
    channel_id: &str,
) -> Result<Option<String>> {
    let request = endpoint(
        &ctx.endpoints.youtube_api,
        "/youtube/v3/channels",
        &[("id", channel_id), ("part", "snippet"), ("key", api_key)],
    )?;

    let channel = match ctx.http.get_json(&request, None).await? {
        Some(response) => first_item(&response)?,
        None => None,
    };

    Ok(channel.and_then(|c| non_empty_field(&c["snippet"]["thumbnails"]["default"]["url"])))
}

/// Maps a `videos` API item. `None` means the API returned no such video.
pub fn normalize_api(video_id: &str, url: &str, item: Option<&Value>) -> VideoMetadata {
    let mut video = VideoMetadata::new(ProviderKind::YouTube, video_id, url);
    video.thumbnails = thumbnails(video_id);

    let Some(item) = item else {
        return video;
    };
    let snippet = &item["snippet"];

    video.available = true;
    video.title = non_empty_field(&snippet["title"]);
    // an empty description stays `Some("")`
    video.description = string_field(&snippet["description"]);
    video.keywords = snippet["tags"].as_array().map(|tags| {
        tags.iter()
            .filter_map(|t| t.as_str())
            .map(String::from)
            .collect()
    });
    video.duration = item["contentDetails"]["duration"]
        .as_str()
        .and_then(parse_iso8601_duration_to_seconds);
    video.date = snippet["publishedAt"].as_str().and_then(parse_iso8601_date);
    video.view_count = parse_count(&item["statistics"]["viewCount"]);
    video.author = non_empty_field(&snippet["channelTitle"]);
    video.author_url = snippet["channelId"].as_str().map(channel_url);
    video
}

async fn fetch_scraper(ctx: &ProviderContext<'_>, video_id: &str, url: &str) -> Result<VideoMetadata> {
    let request = endpoint(
        &ctx.endpoints.youtube_web,
        "/watch",
        &[("v", video_id), ("hl", "en")],
    )?;

    match ctx.http.get_text(&request).await? {
        Some(html) => normalize_page(video_id, url, &html),
        None => Ok(normalize_api(video_id, url, None)),
    }
}

/// Maps a watch page: `ytInitialPlayerResponse`, `ytInitialData` and OpenGraph tags.
pub fn normalize_page(video_id: &str, url: &str, html: &str) -> Result<VideoMetadata> {
    let player = scrape::embedded_json(html, "ytInitialPlayerResponse").ok_or_else(|| {
        Error::InvalidResponse(format!("no player response on watch page for {video_id}"))
    })?;
    let meta = MetaTags::parse(html);

    let mut video = VideoMetadata::new(ProviderKind::YouTube, video_id, url);
    video.thumbnails = thumbnails(video_id);

    let details = &player["videoDetails"];
    let status = player["playabilityStatus"]["status"].as_str().unwrap_or("OK");
    if details.is_null() || status == "ERROR" {
        return Ok(video);
    }
    let microformat = &player["microformat"]["playerMicroformatRenderer"];

    video.available = true;
    video.title = non_empty_field(&details["title"])
        .or_else(|| meta.get("og:title").map(String::from));
    video.description = string_field(&details["shortDescription"])
        .or_else(|| meta.get("og:description").map(String::from));
    video.keywords = details["keywords"]
        .as_array()
        .map(|tags| tags.iter().filter_map(|t| t.as_str()).map(String::from).collect())
        .or_else(|| {
            let tags = meta.get_all("og:video:tag");
            (!tags.is_empty()).then(|| tags.into_iter().map(String::from).collect())
        });
    video.duration = parse_count(&details["lengthSeconds"]);
    video.width = meta.get_u32("og:video:width");
    video.height = meta.get_u32("og:video:height");
    video.date = microformat["publishDate"]
        .as_str()
        .or_else(|| meta.get("datePublished"))
        .and_then(parse_iso8601_date);
    video.view_count = parse_count(&details["viewCount"]);
    video.author = non_empty_field(&details["author"]);
    video.author_url = details["channelId"].as_str().map(channel_url);
    video.author_thumbnail = scrape::embedded_json(html, "ytInitialData").and_then(|data| {
        scrape::find_first(&data, "videoOwnerRenderer")
            .and_then(|owner| non_empty_field(&owner["thumbnail"]["thumbnails"][0]["url"]))
    });

    Ok(video)
}
