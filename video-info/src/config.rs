use log::info;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;

use crate::providers::ProviderKind;

pub const YOUTUBE_API_URL: &str = "https://www.googleapis.com";
pub const YOUTUBE_WEB_URL: &str = "https://www.youtube.com";
pub const VIMEO_API_URL: &str = "https://api.vimeo.com";
pub const VIMEO_WEB_URL: &str = "https://vimeo.com";
pub const DAILYMOTION_API_URL: &str = "https://api.dailymotion.com";

/// Per-provider API credentials.
///
/// Set once when the facade is built and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: Arc<HashMap<String, String>>,
}

// keys stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        providers.sort_unstable();
        f.debug_struct("Credentials")
            .field("providers", &providers)
            .finish()
    }
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a credential for `provider` (`"youtube"`, `"vimeo"`). Empty keys are ignored.
    pub fn with(self, provider: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        if key.trim().is_empty() {
            return self;
        }
        let mut keys = (*self.keys).clone();
        keys.insert(provider.to_lowercase(), key);
        Credentials {
            keys: Arc::new(keys),
        }
    }

    pub fn get(&self, provider: &str) -> Option<&str> {
        self.keys.get(&provider.to_lowercase()).map(String::as_str)
    }

    pub fn for_provider(&self, kind: ProviderKind) -> Option<&str> {
        self.get(kind.credential_key())
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Credentials::new(), |creds, (provider, key)| {
            let provider: String = provider.into();
            creds.with(&provider, key)
        })
    }
}

/// Base URLs of every host the providers talk to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub youtube_api: String,
    pub youtube_web: String,
    pub vimeo_api: String,
    pub vimeo_web: String,
    pub dailymotion_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            youtube_api: YOUTUBE_API_URL.to_string(),
            youtube_web: YOUTUBE_WEB_URL.to_string(),
            vimeo_api: VIMEO_API_URL.to_string(),
            vimeo_web: VIMEO_WEB_URL.to_string(),
            dailymotion_api: DAILYMOTION_API_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every provider at one host, used against a local mock server.
    pub fn all(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Endpoints {
            youtube_api: base.clone(),
            youtube_web: base.clone(),
            vimeo_api: base.clone(),
            vimeo_web: base.clone(),
            dailymotion_api: base,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Config {
            credentials,
            endpoints: Endpoints::default(),
        }
    }

    /// Reads `YOUTUBE_API_KEY` and `VIMEO_ACCESS_TOKEN`. Missing keys fall back to scraping.
    pub fn from_env() -> Self {
        let mut credentials = Credentials::new();
        if let Ok(key) = env::var("YOUTUBE_API_KEY") {
            credentials = credentials.with("youtube", key);
        }
        if let Ok(token) = env::var("VIMEO_ACCESS_TOKEN") {
            credentials = credentials.with("vimeo", token);
        }

        info!(
            "Loaded provider credentials: youtube={}, vimeo={}",
            credentials.get("youtube").is_some(),
            credentials.get("vimeo").is_some()
        );

        Config::new(credentials)
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_ignore_blank_keys() {
        let creds = Credentials::new().with("youtube", "  ").with("vimeo", "tok");
        assert_eq!(creds.get("youtube"), None);
        assert_eq!(creds.get("vimeo"), Some("tok"));
    }

    #[test]
    fn credentials_lookup_is_case_insensitive() {
        let creds: Credentials = [("YouTube", "key_123")].into_iter().collect();
        assert_eq!(creds.get("youtube"), Some("key_123"));
        assert_eq!(creds.for_provider(ProviderKind::YouTubePlaylist), Some("key_123"));
        assert_eq!(creds.for_provider(ProviderKind::Vimeo), None);
    }

    #[test]
    fn debug_output_hides_keys() {
        let creds = Credentials::new().with("youtube", "secret-key");
        let printed = format!("{creds:?}");
        assert!(printed.contains("youtube"));
        assert!(!printed.contains("secret-key"));
    }

    #[test]
    fn endpoints_all_trims_trailing_slash() {
        let endpoints = Endpoints::all("http://127.0.0.1:1234/");
        assert_eq!(endpoints.youtube_api, "http://127.0.0.1:1234");
        assert_eq!(endpoints.dailymotion_api, "http://127.0.0.1:1234");
    }
}
