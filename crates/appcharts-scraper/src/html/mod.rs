//! Top-app discovery over the HTML storefront.
//!
//! Each candidate page is tried in order. On a page, listing-card selectors
//! are tried in order and the first one that yields records wins; if none do,
//! bare detail-page anchors are used instead. Nothing is merged across
//! selectors or pages.

pub mod cascade;
pub mod config;
pub mod extract;

use appcharts_core::PlayAppRecord;
use reqwest::{Client, StatusCode};
use scraper::Html;

use crate::error::ScraperError;
use crate::http::{browser_headers, build_client};
use crate::normalize::next_rank;
use crate::pacing::Pacer;

pub use cascade::first_success;
pub use config::{CompiledRules, SelectorConfig, DEFAULT_PLAY_ORIGIN};
pub use extract::{absolutize, extract_from_element, extract_from_link, parse_app_id};

pub struct PlayStoreScraper {
    client: Client,
    user_agent: String,
    candidate_urls: Vec<String>,
    rules: CompiledRules,
    pacer: Box<dyn Pacer>,
}

impl PlayStoreScraper {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed, or
    /// [`ScraperError::InvalidSelector`] if any configured selector is invalid.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        config: &SelectorConfig,
        pacer: Box<dyn Pacer>,
    ) -> Result<Self, ScraperError> {
        let rules = CompiledRules::compile(config)?;
        let candidate_urls = config
            .candidate_urls
            .iter()
            .map(|url| absolutize(&rules.origin, url))
            .collect();
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            user_agent: user_agent.to_owned(),
            candidate_urls,
            rules,
            pacer,
        })
    }

    /// Returns the first page's worth of records, at most `max_results`.
    /// Empty only after every candidate page failed or yielded nothing.
    pub async fn discover_top_apps(&self) -> Vec<PlayAppRecord> {
        for url in &self.candidate_urls {
            self.pacer.pause().await;

            let body = match self.fetch_page(url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(url, error = %e, "storefront page unavailable");
                    continue;
                }
            };

            match self.extract_page(&body) {
                Some((strategy, records)) => {
                    tracing::info!(url, strategy, count = records.len(), "extracted storefront listing");
                    return records;
                }
                None => tracing::warn!(url, "no listing matched on page"),
            }
        }

        tracing::error!(
            candidates = self.candidate_urls.len(),
            "no storefront page yielded any apps"
        );
        Vec::new()
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .headers(browser_headers(&self.user_agent))
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }

    /// Runs the selector cascade, then the anchor fallback, over one page.
    /// Returns the selector that matched along with its records.
    fn extract_page(&self, body: &str) -> Option<(String, Vec<PlayAppRecord>)> {
        let document = Html::parse_document(body);
        let limit = self.rules.max_results;

        let cards = first_success(&self.rules.elements, |named| {
            let mut records: Vec<PlayAppRecord> = Vec::new();
            for element in document.select(&named.selector).take(limit) {
                let rank = next_rank(records.len());
                match extract_from_element(element, rank, &self.rules) {
                    Ok(record) => records.push(record),
                    Err(e) => tracing::debug!(selector = %named.css, error = %e, "skipping listing element"),
                }
            }
            records
        });
        if let Some((named, records)) = cards {
            return Some((named.css.clone(), records));
        }

        let anchors = &self.rules.detail_links;
        let records: Vec<PlayAppRecord> = document
            .select(&anchors.selector)
            .take(limit)
            .enumerate()
            .map(|(idx, anchor)| extract_from_link(anchor, next_rank(idx), &self.rules))
            .collect();
        (!records.is_empty()).then(|| (anchors.css.clone(), records))
    }
}
