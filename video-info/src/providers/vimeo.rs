//! Vimeo videos, through the authenticated API or the public oEmbed endpoint.

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use reqwest::StatusCode;
use serde_json::Value;

use super::{ProviderContext, ProviderKind};
use crate::client::endpoint;
use crate::error::Result;
use crate::models::{Thumbnails, VideoMetadata};
use crate::utils::{
    host_matches, non_empty_field, parse_count, parse_iso8601_date, parse_url, string_field,
};

lazy_static! {
    static ref NUMERIC_ID: Regex = Regex::new(r"^[0-9]+$").expect("valid regex");
    static ref SIZED_IMAGE: Regex = Regex::new(r"_\d+(x\d+)?(\.\w+)?$").expect("valid regex");
}

// oEmbed answers 403 for private videos and 404 for unknown ones
const OEMBED_NOT_FOUND: &[StatusCode] = &[
    StatusCode::FORBIDDEN,
    StatusCode::NOT_FOUND,
    StatusCode::GONE,
];

pub fn video_id(url: &str) -> Option<String> {
    let parsed = parse_url(url)?;
    if !host_matches(&parsed, "vimeo.com") {
        return None;
    }
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();

    let candidate = match segments.as_slice() {
        [id] => *id,
        ["video", id, ..] => *id,
        ["channels" | "ondemand", _, id, ..] => *id,
        ["groups", _, "videos", id, ..] => *id,
        _ => return None,
    };

    NUMERIC_ID
        .is_match(candidate)
        .then(|| candidate.to_string())
}

pub async fn fetch(ctx: &ProviderContext<'_>, video_id: &str, url: &str) -> Result<VideoMetadata> {
    let video = match ctx.credential {
        Some(token) => fetch_api(ctx, token, video_id, url).await?,
        None => fetch_oembed(ctx, video_id, url).await?,
    };

    if video.available {
        info!("Resolved Vimeo video {video_id}: {:?}", video.title);
    } else {
        warn!("Vimeo video {video_id} is not available");
    }
    Ok(video)
}

// Documentation: https://developer.vimeo.com/api/reference/videos
async fn fetch_api(
    ctx: &ProviderContext<'_>,
    token: &str,
    video_id: &str,
    url: &str,
) -> Result<VideoMetadata> {
    let request = endpoint(&ctx.endpoints.vimeo_api, &format!("/videos/{video_id}"), &[])?;
    let response = ctx.http.get_json(&request, Some(token)).await?;
    Ok(normalize_api(video_id, url, response.as_ref()))
}

pub fn normalize_api(video_id: &str, url: &str, data: Option<&Value>) -> VideoMetadata {
    let mut video = VideoMetadata::new(ProviderKind::Vimeo, video_id, url);
    let Some(data) = data else {
        return video;
    };

    video.available = true;
    video.title = non_empty_field(&data["name"]);
    // Vimeo sends `null` for a missing description
    video.description = string_field(&data["description"]);
    video.keywords = data["tags"].as_array().map(|tags| {
        tags.iter()
            .filter_map(|t| t["name"].as_str().or_else(|| t["tag"].as_str()))
            .map(String::from)
            .collect()
    });
    video.duration = parse_count(&data["duration"]);
    video.width = parse_count(&data["width"]).and_then(|w| u32::try_from(w).ok());
    video.height = parse_count(&data["height"]).and_then(|h| u32::try_from(h).ok());
    video.date = data["release_time"]
        .as_str()
        .or_else(|| data["created_time"].as_str())
        .and_then(parse_iso8601_date);
    video.view_count = parse_count(&data["stats"]["plays"]);
    video.thumbnails = picture_tiers(&data["pictures"]["sizes"]);
    video.author = non_empty_field(&data["user"]["name"]);
    video.author_url = non_empty_field(&data["user"]["link"]);
    video.author_thumbnail = data["user"]["pictures"]["sizes"]
        .as_array()
        .and_then(|sizes| sizes.first())
        .and_then(|size| non_empty_field(&size["link"]));
    video
}

/// Picks the API picture sizes closest to the 100/200/640/1280 tiers.
fn picture_tiers(sizes: &Value) -> Thumbnails {
    let Some(sizes) = sizes.as_array() else {
        return Thumbnails::default();
    };
    let mut sized: Vec<(u64, String)> = sizes
        .iter()
        .filter_map(|s| Some((parse_count(&s["width"])?, non_empty_field(&s["link"])?)))
        .collect();
    sized.sort_by_key(|(width, _)| *width);

    // smallest picture at least `width` wide, else the largest one
    let at_least = |width: u64| {
        sized
            .iter()
            .find(|(w, _)| *w >= width)
            .or_else(|| sized.last())
            .map(|(_, link)| link.clone())
    };

    Thumbnails {
        small: at_least(100),
        medium: at_least(200),
        large: at_least(640),
        large_2x: at_least(1280),
        maxres: sized.last().map(|(_, link)| link.clone()),
    }
}

// Documentation: https://developer.vimeo.com/api/oembed/videos
async fn fetch_oembed(ctx: &ProviderContext<'_>, video_id: &str, url: &str) -> Result<VideoMetadata> {
    let canonical = format!("https://vimeo.com/{video_id}");
    let request = endpoint(
        &ctx.endpoints.vimeo_web,
        "/api/oembed.json",
        &[("url", canonical.as_str())],
    )?;
    let response = ctx
        .http
        .get_json_with(&request, None, OEMBED_NOT_FOUND)
        .await?;
    Ok(normalize_oembed(video_id, url, response.as_ref()))
}

pub fn normalize_oembed(video_id: &str, url: &str, data: Option<&Value>) -> VideoMetadata {
    let mut video = VideoMetadata::new(ProviderKind::Vimeo, video_id, url);
    let Some(data) = data else {
        return video;
    };

    video.available = true;
    video.title = non_empty_field(&data["title"]);
    video.description = string_field(&data["description"]);
    video.duration = parse_count(&data["duration"]);
    video.width = parse_count(&data["width"]).and_then(|w| u32::try_from(w).ok());
    video.height = parse_count(&data["height"]).and_then(|h| u32::try_from(h).ok());
    video.date = data["upload_date"].as_str().and_then(parse_iso8601_date);
    video.author = non_empty_field(&data["author_name"]);
    video.author_url = non_empty_field(&data["author_url"]);
    if let Some(thumbnail) = data["thumbnail_url"].as_str() {
        video.thumbnails = resized_tiers(thumbnail);
    }
    video
}

/// vimeocdn images take their width from the `_<width>` suffix.
fn resized_tiers(thumbnail: &str) -> Thumbnails {
    if !SIZED_IMAGE.is_match(thumbnail) {
        return Thumbnails {
            large: Some(thumbnail.to_string()),
            ..Thumbnails::default()
        };
    }
    let sized = |width: &str| Some(SIZED_IMAGE.replace(thumbnail, format!("_{width}")).into_owned());
    Thumbnails {
        small: sized("100x75"),
        medium: sized("200x150"),
        large: sized("640"),
        large_2x: sized("1280"),
        maxres: sized("1920"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_ids() {
        for url in [
            "http://vimeo.com/898029",
            "https://vimeo.com/898029?share=copy",
            "https://player.vimeo.com/video/898029",
            "http://vimeo.com/channels/staffpicks/898029",
            "https://vimeo.com/groups/1234/videos/898029",
            "https://vimeo.com/ondemand/less/898029",
        ] {
            assert_eq!(video_id(url).as_deref(), Some("898029"), "{url}");
        }
    }

    #[test]
    fn rejects_albums_and_search() {
        for url in [
            "https://vimeo.com/album/2755718",
            "https://vimeo.com/search?q=cats",
            "https://vimeo.com/staff",
            "https://notvimeo.com/898029",
        ] {
            assert_eq!(video_id(url), None, "{url}");
        }
    }

    #[test]
    fn normalizes_api_response() {
        let data = json!({
            "name": "Cherry Bloom - King Of The Knife",
            "description": null,
            "duration": 175,
            "width": 640,
            "height": 360,
            "release_time": "2010-03-30T11:00:00+00:00",
            "tags": [{"name": "cherry bloom"}, {"name": "guitar"}],
            "stats": {"plays": 1234},
            "pictures": {"sizes": [
                {"width": 640, "link": "https://i.vimeocdn.com/video/1_640x360"},
                {"width": 100, "link": "https://i.vimeocdn.com/video/1_100x75"},
                {"width": 200, "link": "https://i.vimeocdn.com/video/1_200x150"}
            ]},
            "user": {
                "name": "Octave Zangs",
                "link": "https://vimeo.com/octave",
                "pictures": {"sizes": [{"width": 30, "link": "https://i.vimeocdn.com/portrait/1_30x30"}]}
            }
        });
        let video = normalize_api("898029", "http://vimeo.com/898029", Some(&data));

        assert!(video.available);
        assert_eq!(video.provider, "Vimeo");
        assert_eq!(video.description, None);
        assert_eq!(video.keywords, Some(vec!["cherry bloom".to_string(), "guitar".to_string()]));
        assert_eq!(video.duration, Some(175));
        assert_eq!((video.width, video.height), (Some(640), Some(360)));
        assert_eq!(video.view_count, Some(1234));
        assert_eq!(video.thumbnail(), Some("https://i.vimeocdn.com/video/1_100x75"));
        assert_eq!(video.thumbnails.medium.as_deref(), Some("https://i.vimeocdn.com/video/1_200x150"));
        assert_eq!(video.thumbnails.large.as_deref(), Some("https://i.vimeocdn.com/video/1_640x360"));
        // nothing that large, fall back to the biggest
        assert_eq!(video.thumbnails.large_2x.as_deref(), Some("https://i.vimeocdn.com/video/1_640x360"));
        assert_eq!(video.author_thumbnail.as_deref(), Some("https://i.vimeocdn.com/portrait/1_30x30"));
    }

    #[test]
    fn normalizes_oembed_response() {
        let data = json!({
            "title": "Cherry Bloom - King Of The Knife",
            "description": "",
            "duration": 175,
            "width": 640,
            "height": 360,
            "upload_date": "2010-03-30 11:00:00",
            "author_name": "Octave Zangs",
            "author_url": "https://vimeo.com/octave",
            "thumbnail_url": "https://i.vimeocdn.com/video/1_295x166"
        });
        let video = normalize_oembed("898029", "http://vimeo.com/898029", Some(&data));

        assert!(video.available);
        assert_eq!(video.description.as_deref(), Some(""));
        assert_eq!(video.date.unwrap().to_rfc3339(), "2010-03-30T11:00:00+00:00");
        assert_eq!(video.thumbnail(), Some("https://i.vimeocdn.com/video/1_100x75"));
        assert_eq!(video.thumbnails.large.as_deref(), Some("https://i.vimeocdn.com/video/1_640"));
        assert_eq!(video.view_count, None);
    }

    #[test]
    fn missing_response_is_unavailable() {
        let video = normalize_oembed("898029", "http://vimeo.com/898029", None);
        assert!(!video.available);
        assert!(video.thumbnails.is_empty());
        assert_eq!(video.embed_url, "//player.vimeo.com/video/898029");
    }
}
