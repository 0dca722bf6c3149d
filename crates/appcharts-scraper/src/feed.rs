//! HTTP client for the iTunes RSS top-chart JSON feed.

use appcharts_core::{ChartType, FeedAppRecord};
use reqwest::Client;
use serde_json::Value;

use crate::error::ScraperError;
use crate::http::{build_client, json_headers, normalize_base_url};
use crate::normalize::{feed_record_from_entry, next_rank};

pub const DEFAULT_FEED_BASE_URL: &str = "https://itunes.apple.com";

/// Client for `GET {base}/{country}/rss/{chart}/limit={N}/json`.
///
/// Failures never reach the caller: a transport error, non-2xx status, or a
/// body without `feed.entry` is logged and yields an empty list.
pub struct FeedClient {
    client: Client,
    base_url: String,
}

impl FeedClient {
    /// Creates a client pointed at the production feed.
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

    /// Fetches one top chart and maps its entries to ranked records.
    ///
    /// Entries that cannot be mapped are skipped and do not consume a rank.
    pub async fn fetch_top_list(
        &self,
        country: &str,
        limit: u32,
        chart: ChartType,
    ) -> Vec<FeedAppRecord> {
        let url = self.feed_url(country, limit, chart);
        match self.try_fetch_top_list(&url).await {
            Ok(records) => {
                tracing::info!(url, count = records.len(), "fetched top chart");
                records
            }
            Err(e) => {
                tracing::error!(url, error = %e, "top chart request failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch_top_list(&self, url: &str) -> Result<Vec<FeedAppRecord>, ScraperError> {
        let body = self.get_json(url).await?;
        let entries = feed_entries(&body).ok_or_else(|| ScraperError::MissingField {
            context: url.to_owned(),
            field: "feed.entry",
        })?;

        let mut records: Vec<FeedAppRecord> = Vec::with_capacity(entries.len());
        for entry in entries {
            let rank = next_rank(records.len());
            match feed_record_from_entry(entry, rank) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(rank, error = %e, "skipping unparseable feed entry"),
            }
        }
        Ok(records)
    }

    async fn get_json(&self, url: &str) -> Result<Value, ScraperError> {
        let response = self
            .client
            .get(url)
            .headers(json_headers())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Value>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("top chart from {url}"),
            source: e,
        })
    }

    fn feed_url(&self, country: &str, limit: u32, chart: ChartType) -> String {
        format!(
            "{}/{}/rss/{}/limit={limit}/json",
            self.base_url,
            country.trim().to_ascii_lowercase(),
            chart.feed_segment()
        )
    }
}

/// The `feed.entry` list. A chart with a single app returns `entry` as a bare
/// object, which is treated as a one-element list.
fn feed_entries(body: &Value) -> Option<&[Value]> {
    match body.get("feed")?.get("entry")? {
        Value::Array(entries) => Some(entries.as_slice()),
        single @ Value::Object(_) => Some(std::slice::from_ref(single)),
        _ => None,
    }
}
