mod common;

use common::{fixture, mock_html, mock_json, params, video_info, youtube_credentials, API_KEY};
use mockito::{Matcher, Server};
use video_info::{Config, Credentials, EmbedOptions, Endpoints, Error, Resolved, VideoInfo, VideoMetadata};

const NO_DESCRIPTION_URL: &str = "http://www.youtube.com/watch?v=WVsj2pS-zFY";

fn expect_video(resolved: Resolved) -> VideoMetadata {
    match resolved {
        Resolved::Video(video) => video,
        other => panic!("expected a video, got {other:?}"),
    }
}

#[tokio::test]
async fn api_video_without_description_keeps_empty_string() {
    let mut server = Server::new_async().await;
    let videos = mock_json(
        &mut server,
        "/youtube/v3/videos",
        params(&[("id", "WVsj2pS-zFY"), ("key", API_KEY)]),
        200,
        &fixture("youtube_video_no_description.json"),
    )
    .await;
    mock_json(&mut server, "/youtube/v3/channels", Matcher::Any, 200, r#"{"items": []}"#).await;

    let video = expect_video(
        video_info(&server, youtube_credentials())
            .resolve(NO_DESCRIPTION_URL)
            .await
            .unwrap(),
    );

    assert!(video.available);
    // an empty string, not None: kept as the provider sends it
    assert_eq!(video.description.as_deref(), Some(""));
    assert_eq!(video.title.as_deref(), Some("Wiki Loves Monuments 2013"));
    assert_eq!(video.duration, Some(75));
    assert_eq!(video.view_count, Some(5148));
    assert_eq!(video.author.as_deref(), Some("Wikimedia"));
    assert_eq!(video.author_thumbnail, None);
    assert_eq!(video.date.unwrap().to_rfc3339(), "2013-09-02T09:13:41+00:00");
    videos.assert_async().await;
}

#[tokio::test]
async fn scraped_video_without_description_keeps_empty_string() {
    let mut server = Server::new_async().await;
    let page = mock_html(
        &mut server,
        "/watch",
        params(&[("v", "WVsj2pS-zFY")]),
        &fixture("youtube_watch_no_description.html"),
    )
    .await;

    let video = expect_video(
        video_info(&server, Credentials::new())
            .resolve(NO_DESCRIPTION_URL)
            .await
            .unwrap(),
    );

    assert!(video.available);
    assert_eq!(video.provider, "YouTube");
    assert_eq!(video.video_id, "WVsj2pS-zFY");
    assert_eq!(video.url, NO_DESCRIPTION_URL);
    assert_eq!(video.description.as_deref(), Some(""));
    assert_eq!(video.title.as_deref(), Some("Wiki Loves Monuments 2013"));
    assert_eq!(video.keywords, Some(vec!["wiki".to_string(), "monuments".to_string()]));
    assert_eq!(video.duration, Some(75));
    assert_eq!((video.width, video.height), (Some(1280), Some(720)));
    assert_eq!(video.view_count, Some(5148));
    assert_eq!(video.date.unwrap().to_rfc3339(), "2013-09-02T09:13:41+00:00");
    assert_eq!(
        video.author_url.as_deref(),
        Some("https://www.youtube.com/channel/UCPL5lE1b8W6EqLZpaMxbAtg")
    );
    assert_eq!(
        video.author_thumbnail.as_deref(),
        Some("https://yt3.ggpht.com/wikimedia=s48-c-k-c0x00ffffff-no-rj")
    );
    assert_eq!(
        video.embed_code(&EmbedOptions::new().url_scheme("https")),
        r#"<iframe src="https://www.youtube.com/embed/WVsj2pS-zFY" frameborder="0" allowfullscreen="allowfullscreen"></iframe>"#
    );
    page.assert_async().await;
}

#[tokio::test]
async fn thumbnails_do_not_depend_on_the_provider_answer() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, "/youtube/v3/videos", Matcher::Any, 200, r#"{"items": []}"#).await;

    let video = expect_video(
        video_info(&server, youtube_credentials())
            .resolve("https://youtu.be/9g2U12SsRns")
            .await
            .unwrap(),
    );

    assert!(!video.available);
    assert_eq!(video.thumbnail(), Some("https://i.ytimg.com/vi/9g2U12SsRns/default.jpg"));
    assert_eq!(
        video.thumbnails.maxres.as_deref(),
        Some("https://i.ytimg.com/vi/9g2U12SsRns/maxresdefault.jpg")
    );
}

#[tokio::test]
async fn server_errors_are_not_treated_as_missing() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, "/youtube/v3/videos", Matcher::Any, 503, "{}").await;

    let result = video_info(&server, youtube_credentials())
        .resolve(NO_DESCRIPTION_URL)
        .await;

    match result {
        Err(Error::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected an http status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_failure() {
    // nothing listens on the discard port
    let config = Config::new(youtube_credentials()).with_endpoints(Endpoints::all("http://127.0.0.1:9"));
    let info = VideoInfo::new(config).unwrap();

    let result = info.resolve(NO_DESCRIPTION_URL).await;

    assert!(matches!(result, Err(Error::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn garbage_api_body_is_an_invalid_response() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, "/youtube/v3/videos", Matcher::Any, 200, r#"{"kind": "youtube#videoListResponse"}"#).await;

    let result = video_info(&server, youtube_credentials())
        .resolve(NO_DESCRIPTION_URL)
        .await;

    assert!(matches!(result, Err(Error::InvalidResponse(_))), "{result:?}");
}
