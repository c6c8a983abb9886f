#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use video_info::{Config, Credentials, Endpoints, VideoInfo};

pub const API_KEY: &str = "youtube_api_key_123";

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {path}: {e}"))
}

pub fn youtube_credentials() -> Credentials {
    Credentials::new().with("youtube", API_KEY)
}

/// A facade whose every provider host is the mock server.
pub fn video_info(server: &ServerGuard, credentials: Credentials) -> VideoInfo {
    let config = Config::new(credentials).with_endpoints(Endpoints::all(&server.url()));
    VideoInfo::new(config).expect("http client builds")
}

pub fn params(pairs: &[(&str, &str)]) -> Matcher {
    Matcher::AllOf(
        pairs
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
            .collect(),
    )
}

pub async fn mock_json(
    server: &mut ServerGuard,
    path: &str,
    query: Matcher,
    status: usize,
    body: &str,
) -> Mock {
    server
        .mock("GET", path)
        .match_query(query)
        .with_status(status)
        .with_header("content-type", "application/json; charset=UTF-8")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_html(server: &mut ServerGuard, path: &str, query: Matcher, body: &str) -> Mock {
    server
        .mock("GET", path)
        .match_query(query)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}
