use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No registered provider recognizes the URL.
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider answered {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The provider answered successfully but the body is not what we expect.
    #[error("unrecognized provider response: {0}")]
    InvalidResponse(String),

    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("failed to decode provider json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
