//! HTTP client for the iTunes `lookup` endpoint.

use appcharts_core::AppDetail;
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::feed::DEFAULT_FEED_BASE_URL;
use crate::http::{build_client, json_headers, normalize_base_url};
use crate::normalize::detail_from_lookup;
use crate::types::LookupResponse;

/// Client for `GET {base}/lookup?id=..&country=..&entity=software`.
///
/// Like [`crate::FeedClient`], it never returns an error from a lookup: an
/// unknown id or a failed request yields [`AppDetail::default()`].
pub struct LookupClient {
    client: Client,
    base_url: String,
}

impl LookupClient {
    /// Creates a client pointed at the production lookup API.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_FEED_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed, or
    /// [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Looks up one app. Returns the all-default detail when the id is
    /// unknown or the request fails.
    pub async fn fetch_detail(&self, app_id: &str, country: &str) -> AppDetail {
        match self.try_fetch_detail(app_id, country).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(app_id, country, error = %e, "app lookup failed");
                AppDetail::default()
            }
        }
    }

    async fn try_fetch_detail(&self, app_id: &str, country: &str) -> Result<AppDetail, ScraperError> {
        let url = self.lookup_url(app_id, country)?;
        let response = self
            .client
            .get(url.clone())
            .headers(json_headers())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<LookupResponse>(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("lookup for app {app_id}"),
                source: e,
            })?;

        if parsed.result_count == 0 {
            tracing::debug!(app_id, "lookup returned no results");
            return Ok(AppDetail::default());
        }
        Ok(parsed
            .results
            .into_iter()
            .next()
            .map(detail_from_lookup)
            .unwrap_or_default())
    }

    fn lookup_url(&self, app_id: &str, country: &str) -> Result<Url, ScraperError> {
        let base = format!("{}/lookup", self.base_url);
        let mut url = Url::parse(&base).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("id", app_id)
            .append_pair("country", country)
            .append_pair("entity", "software");
        Ok(url)
    }
}
