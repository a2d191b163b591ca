//! HTTP client setup.

use std::time::Duration;

use reqwest::{Client, Url};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

use crate::error::HttpError;
use crate::gateway::HttpAutomationGateway;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HTTP backend adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, e.g. `http://localhost:8000`. Endpoints are resolved
    /// relative to it.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value sent as the `Cookie` header on every request, standing in for
    /// the browser's session credentials.
    pub session_cookie: Option<String>,
}

impl Config {
    /// Configuration with the default timeout and no session cookie.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            session_cookie: None,
        }
    }

    /// Build an [`HttpAutomationGateway`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the base URL is not an absolute http(s) URL,
    /// the cookie is not a valid header value or the client cannot be built.
    pub fn build(self) -> Result<HttpAutomationGateway, HttpError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = self.session_cookie.as_deref() {
            let mut value = HeaderValue::from_str(cookie)?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        tracing::debug!(base_url = %base_url, timeout = ?self.timeout, "http gateway ready");
        Ok(HttpAutomationGateway::new(client, base_url))
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, HttpError> {
    let invalid = || HttpError::InvalidUrl {
        url: raw.to_string(),
    };
    let parsed = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(parsed)
}
