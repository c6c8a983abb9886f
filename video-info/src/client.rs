use log::{debug, warn};
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Statuses that mean "the resource does not exist" rather than a failed request.
const NOT_FOUND: &[StatusCode] = &[StatusCode::NOT_FOUND, StatusCode::GONE];

/// Thin wrapper over one shared `reqwest::Client`.
///
/// `Ok(None)` is a not-found answer; transport errors and other non-success
/// statuses are returned as `Err`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static("en"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(HttpClient { client })
    }

    pub async fn get_json(&self, url: &Url, bearer: Option<&str>) -> Result<Option<Value>> {
        self.get_json_with(url, bearer, NOT_FOUND).await
    }

    pub async fn get_json_with(
        &self,
        url: &Url,
        bearer: Option<&str>,
        not_found: &[StatusCode],
    ) -> Result<Option<Value>> {
        match self.send(url, bearer, not_found).await? {
            Some(response) => {
                let body = response.text().await?;
                Ok(Some(serde_json::from_str(&body)?))
            }
            None => Ok(None),
        }
    }

    pub async fn get_text(&self, url: &Url) -> Result<Option<String>> {
        match self.send(url, None, NOT_FOUND).await? {
            Some(response) => Ok(Some(response.text().await?)),
            None => Ok(None),
        }
    }

    async fn send(
        &self,
        url: &Url,
        bearer: Option<&str>,
        not_found: &[StatusCode],
    ) -> Result<Option<reqwest::Response>> {
        // never log the query, it carries API keys
        debug!("GET {}{}", url.host_str().unwrap_or_default(), url.path());

        let mut request = self.client.get(url.clone());
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Some(response));
        }
        if not_found.contains(&status) {
            warn!("{} answered {status}, treating as not found", url.path());
            return Ok(None);
        }

        Err(Error::HttpStatus {
            status,
            url: format!("{}{}", url.host_str().unwrap_or_default(), url.path()),
        })
    }
}

/// Joins `path` onto `base` and appends query parameters.
pub fn endpoint(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if params.is_empty() {
        return Ok(Url::parse(&url)?);
    }
    Ok(Url::parse_with_params(&url, params)?)
}
