//! HTTP-specific error type wrapping reqwest errors.

use autopanel_domain::error::PanelError;

/// Errors originating from the HTTP backend adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request could not be sent or its body could not be read.
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid backend url {url:?}")]
    InvalidUrl { url: String },

    /// The configured session cookie cannot be sent as a header.
    #[error("invalid session cookie")]
    InvalidCookie(#[from] reqwest::header::InvalidHeaderValue),
}

impl From<HttpError> for PanelError {
    fn from(err: HttpError) -> Self {
        Self::Gateway(Box::new(err))
    }
}
