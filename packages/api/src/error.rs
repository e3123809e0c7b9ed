use thiserror::Error;

/// Failures raised by the REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. The display message carries the status code so a 401
    /// reads differently from a 500 even when the body is unhelpful.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (DNS failure, refused
    /// connection, aborted fetch).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response decoded as JSON but not into the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Status code for HTTP-level failures, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
