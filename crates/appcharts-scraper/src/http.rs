//! Shared `reqwest` client construction and request header profiles.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;

use crate::error::ScraperError;

pub(crate) const BROWSER_FALLBACK_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Builds a client with the configured request timeout and `User-Agent`.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed (e.g., invalid TLS config).
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScraperError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Header set that mimics a desktop browser navigating to a storefront page.
///
/// Falls back to a stock Chrome `User-Agent` when `user_agent` is not a valid
/// header value.
#[must_use]
pub fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let ua = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static(BROWSER_FALLBACK_UA));
    headers.insert(header::USER_AGENT, ua);
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers
}

/// JSON API requests only need a plain `Accept`.
pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json,text/javascript;q=0.9,*/*;q=0.8"),
    );
    headers
}

/// Extracts the scheme+host origin from a base URL, trailing slash removed.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, ScraperError> {
    let parsed = reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(parsed.origin().ascii_serialization())
}
