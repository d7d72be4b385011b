use reqwest::{StatusCode, Url};
use thiserror::Error;

/// Everything that may go wrong between submitting a forecast request and rendering its results.
///
/// None of these are retried: the caller logs them and keeps whatever it was displaying before.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The request could not complete: connection refused, timeout, broken body stream, and alike.
    #[error("request to `{url}` failed")]
    Network {
        url: Url,

        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("`{url}` responded with {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Response { url: Url, status: StatusCode, message: Option<String> },

    #[error(transparent)]
    Format(#[from] FormatError),

    /// A billing entry is not a number, or the mandatory total is missing.
    #[error("billing entry `{key}` must be a number, got {found}")]
    Type { key: String, found: &'static str },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("`{0}` is not a valid timestamp")]
    Timestamp(String),

    #[error("failed to decode the response body")]
    Body(#[from] serde_json::Error),

    #[error("amount `{0}` cannot be displayed")]
    Amount(f64),
}
