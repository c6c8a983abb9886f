//! Dailymotion videos through the public Data API. No credential needed.

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde_json::Value;

use super::{ProviderContext, ProviderKind};
use crate::client::endpoint;
use crate::error::Result;
use crate::models::{Thumbnails, VideoMetadata};
use crate::utils::{
    host_matches, non_empty_field, parse_count, parse_unix_timestamp, parse_url, string_field,
};

lazy_static! {
    static ref VIDEO_ID: Regex = Regex::new(r"^[a-zA-Z0-9]+$").expect("valid regex");
}

const FIELDS: &str = "id,title,description,duration,created_time,views_total,tags,\
owner.screenname,owner.url,owner.avatar_60_url,\
thumbnail_60_url,thumbnail_120_url,thumbnail_240_url,thumbnail_720_url,thumbnail_1080_url";

pub fn video_id(url: &str) -> Option<String> {
    let parsed = parse_url(url)?;
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();

    let candidate = if host_matches(&parsed, "dai.ly") {
        segments.first().copied()
    } else if host_matches(&parsed, "dailymotion.com") {
        match segments.as_slice() {
            ["video", id, ..] | ["embed", "video", id, ..] => Some(*id),
            _ => None,
        }
    } else {
        None
    };

    // old links append a slug: x7tgad0_some-title
    let id = candidate?.split('_').next()?;
    VIDEO_ID.is_match(id).then(|| id.to_string())
}

pub async fn fetch(ctx: &ProviderContext<'_>, video_id: &str, url: &str) -> Result<VideoMetadata> {
    let request = endpoint(
        &ctx.endpoints.dailymotion_api,
        &format!("/video/{video_id}"),
        &[("fields", FIELDS)],
    )?;
    let response = ctx.http.get_json(&request, None).await?;
    let video = normalize(video_id, url, response.as_ref());

    if video.available {
        info!("Resolved Dailymotion video {video_id}: {:?}", video.title);
    } else {
        warn!("Dailymotion video {video_id} is not available");
    }
    Ok(video)
}

pub fn normalize(video_id: &str, url: &str, data: Option<&Value>) -> VideoMetadata {
    let mut video = VideoMetadata::new(ProviderKind::Dailymotion, video_id, url);
    // error bodies carry an `error` object instead of fields
    let Some(data) = data.filter(|d| d.get("error").is_none()) else {
        return video;
    };

    video.available = true;
    video.title = non_empty_field(&data["title"]);
    video.description = string_field(&data["description"]);
    video.keywords = data["tags"].as_array().map(|tags| {
        tags.iter()
            .filter_map(|t| t.as_str())
            .map(String::from)
            .collect()
    });
    video.duration = parse_count(&data["duration"]);
    video.date = data["created_time"].as_i64().and_then(parse_unix_timestamp);
    video.view_count = parse_count(&data["views_total"]);
    video.thumbnails = Thumbnails {
        small: non_empty_field(&data["thumbnail_60_url"]),
        medium: non_empty_field(&data["thumbnail_240_url"]),
        large: non_empty_field(&data["thumbnail_720_url"]),
        large_2x: non_empty_field(&data["thumbnail_1080_url"]),
        maxres: non_empty_field(&data["thumbnail_1080_url"]),
    };
    video.author = non_empty_field(&data["owner.screenname"]);
    video.author_url = non_empty_field(&data["owner.url"]);
    video.author_thumbnail = non_empty_field(&data["owner.avatar_60_url"]);
    video
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_ids() {
        for url in [
            "https://www.dailymotion.com/video/x7tgad0",
            "http://www.dailymotion.com/video/x7tgad0_cherry-bloom-king-of-the-knife_music",
            "https://www.dailymotion.com/embed/video/x7tgad0?autoplay=1",
            "https://dai.ly/x7tgad0",
        ] {
            assert_eq!(video_id(url).as_deref(), Some("x7tgad0"), "{url}");
        }
    }

    #[test]
    fn rejects_other_pages() {
        assert_eq!(video_id("https://www.dailymotion.com/us"), None);
        assert_eq!(video_id("https://www.dailymotion.com/playlist/x6hynp"), None);
        assert_eq!(video_id("https://example.com/video/x7tgad0"), None);
    }

    #[test]
    fn normalizes_api_response() {
        let data = json!({
            "id": "x7tgad0",
            "title": "Cherry Bloom - King Of The Knife",
            "description": "",
            "duration": 175,
            "created_time": 1_269_946_800,
            "views_total": 4321,
            "tags": ["music"],
            "owner.screenname": "Octave",
            "owner.url": "https://www.dailymotion.com/octave",
            "owner.avatar_60_url": "https://s1.dmcdn.net/avatar/60x60.jpg",
            "thumbnail_60_url": "https://s1.dmcdn.net/x7tgad0/x60",
            "thumbnail_240_url": "https://s1.dmcdn.net/x7tgad0/x240",
            "thumbnail_720_url": "https://s1.dmcdn.net/x7tgad0/x720",
            "thumbnail_1080_url": "https://s1.dmcdn.net/x7tgad0/x1080"
        });
        let video = normalize("x7tgad0", "https://dai.ly/x7tgad0", Some(&data));

        assert!(video.available);
        assert_eq!(video.provider, "Dailymotion");
        assert_eq!(video.description.as_deref(), Some(""));
        assert_eq!(video.date.unwrap().to_rfc3339(), "2010-03-30T11:00:00+00:00");
        assert_eq!(video.view_count, Some(4321));
        assert_eq!(video.thumbnail(), Some("https://s1.dmcdn.net/x7tgad0/x60"));
        assert_eq!(video.author.as_deref(), Some("Octave"));
        assert_eq!(video.embed_url, "//www.dailymotion.com/embed/video/x7tgad0");
    }

    #[test]
    fn error_body_is_unavailable() {
        let data = json!({"error": {"code": 404, "message": "This video does not exist."}});
        let video = normalize("x7tgad0", "https://dai.ly/x7tgad0", Some(&data));
        assert!(!video.available);
        assert_eq!(video.title, None);
    }
}
