//! Collection run: fetch, optional enrichment, preview, export, statistics.
//!
//! Each marketplace runs to completion before the next one starts. A
//! marketplace that yields nothing prints a notice and writes no file; it
//! never fails the run.

use std::path::PathBuf;

use appcharts_core::{AppConfig, CollectRequest, FeedAppRecord, PlayAppRecord};
use appcharts_scraper::{
    enrich_records, FeedClient, FixedPause, JitterPause, LookupClient, PlayStoreScraper,
    SelectorConfig,
};

use crate::stats::{category_counts, rating_summary, RatingSummary};

const FEED_PREVIEW: usize = 10;
const STOREFRONT_PREVIEW: usize = 5;

/// What one marketplace produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct MarketplaceOutcome {
    pub collected: usize,
    pub enriched: usize,
    pub written: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub(crate) struct RunOutcome {
    pub app_store: Option<MarketplaceOutcome>,
    pub google_play: Option<MarketplaceOutcome>,
}

/// Runs every marketplace `request` names, App Store first.
///
/// # Errors
///
/// Returns an error only if an HTTP client cannot be constructed. Fetch and
/// export failures are logged and reflected in the outcome.
pub(crate) async fn run_request(
    config: &AppConfig,
    request: &CollectRequest,
) -> anyhow::Result<RunOutcome> {
    let mut outcome = RunOutcome::default();
    if request.marketplace.includes_app_store() {
        outcome.app_store = Some(run_app_store(config, request).await?);
    }
    if request.marketplace.includes_google_play() {
        outcome.google_play = Some(run_google_play(config, request).await?);
    }
    Ok(outcome)
}

pub(crate) async fn run_app_store(
    config: &AppConfig,
    request: &CollectRequest,
) -> anyhow::Result<MarketplaceOutcome> {
    let limit = request.feed_limit();
    println!(
        "Collecting App Store top {limit} ({}, {})...",
        request.chart,
        request.country
    );

    let feed = FeedClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.itunes_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build feed client: {e}"))?;
    let mut records = feed
        .fetch_top_list(&request.country, limit, request.chart)
        .await;

    if records.is_empty() {
        println!("no apps collected from the App Store");
        return Ok(MarketplaceOutcome::default());
    }
    println!("Collected {} apps", records.len());

    let mut enriched = 0;
    if request.enrich {
        let lookup = LookupClient::with_base_url(
            config.request_timeout_secs,
            &config.user_agent,
            &config.itunes_base_url,
        )
        .map_err(|e| anyhow::anyhow!("failed to build lookup client: {e}"))?;
        let pacer = FixedPause::from_millis(config.detail_delay_ms);
        enriched = enrich_records(&mut records, &lookup, &request.country, &pacer).await;
        println!("Fetched details for {enriched}/{} apps", records.len());
    }

    print_feed_preview(&records);
    let written = appcharts_export::export(&request.app_store_path(), request.format, &records);
    report_written(written.as_ref());
    print_feed_stats(&records);

    Ok(MarketplaceOutcome {
        collected: records.len(),
        enriched,
        written,
    })
}

pub(crate) async fn run_google_play(
    config: &AppConfig,
    request: &CollectRequest,
) -> anyhow::Result<MarketplaceOutcome> {
    println!("Collecting Google Play top apps...");

    let selectors = SelectorConfig {
        origin: config.play_base_url.clone(),
        ..SelectorConfig::default()
    };
    let pacer = JitterPause::from_millis(config.html_delay_min_ms, config.html_delay_max_ms);
    let scraper = PlayStoreScraper::new(
        config.request_timeout_secs,
        &config.user_agent,
        &selectors,
        Box::new(pacer),
    )
    .map_err(|e| anyhow::anyhow!("failed to build storefront scraper: {e}"))?;

    let records = scraper.discover_top_apps().await;
    if records.is_empty() {
        println!("no apps collected from Google Play");
        return Ok(MarketplaceOutcome::default());
    }
    println!("Collected {} apps", records.len());

    print_play_preview(&records);
    let written = appcharts_export::export(&request.google_play_path(), request.format, &records);
    report_written(written.as_ref());

    Ok(MarketplaceOutcome {
        collected: records.len(),
        enriched: 0,
        written,
    })
}

fn print_feed_preview(records: &[FeedAppRecord]) {
    println!();
    println!("=== Top {} ===", records.len().min(FEED_PREVIEW));
    for record in records.iter().take(FEED_PREVIEW) {
        println!("{}", feed_preview_line(record));
    }
}

fn feed_preview_line(record: &FeedAppRecord) -> String {
    let rating = record.rating();
    let rating_info = if rating > 0.0 {
        format!("rating {rating:.1}")
    } else {
        "no rating".to_owned()
    };
    format!(
        "{}. {} - {} ({rating_info})",
        record.rank, record.name, record.artist
    )
}

fn print_play_preview(records: &[PlayAppRecord]) {
    println!();
    println!("=== Top {} ===", records.len().min(STOREFRONT_PREVIEW));
    for record in records.iter().take(STOREFRONT_PREVIEW) {
        println!("{}. {} - {}", record.rank, record.name, record.developer);
    }
}

fn report_written(written: Option<&PathBuf>) {
    match written {
        Some(path) => println!("Saved {}", path.display()),
        None => println!("export failed; see log for details"),
    }
}

fn print_feed_stats(records: &[FeedAppRecord]) {
    println!();
    println!("=== By category ===");
    for (category, count) in category_counts(records) {
        println!("{category}: {count}");
    }

    if let Some(summary) = rating_summary(records) {
        println!();
        println!("=== Ratings ===");
        for line in rating_lines(&summary) {
            println!("{line}");
        }
    }
}

fn rating_lines(summary: &RatingSummary) -> Vec<String> {
    vec![
        format!("Rated apps: {}", summary.rated),
        format!("Mean rating: {:.2}", summary.mean),
        format!("Highest rating: {}", summary.max),
        format!("Lowest rating: {}", summary.min),
        format!("Rated 4.0 or higher: {}", summary.high_rated),
        format!("Mean rating count: {:.0}", summary.mean_rating_count),
    ]
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
