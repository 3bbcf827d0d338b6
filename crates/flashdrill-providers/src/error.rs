//! Provider error types.

use thiserror::Error;

/// Errors that can occur when talking to a speech or translation backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The endpoint answered with an error status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not in the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The audio player could not be run or failed.
    #[error("audio player failed: {0}")]
    Player(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ProviderError::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => ProviderError::Network(err.to_string()),
        }
    }
}
