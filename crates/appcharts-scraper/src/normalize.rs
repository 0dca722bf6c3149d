//! Conversion from raw marketplace payloads to the canonical records in
//! [`appcharts_core::records`].

use appcharts_core::{AppDetail, FeedAppRecord};
use serde_json::Value;

use crate::error::ScraperError;
use crate::types::LookupResult;
use crate::value_path::{text_at, text_at_path, PathSegment};

/// Format of `scraped_at` timestamps.
pub const CAPTURE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rank for the next record given how many have already been produced.
///
/// Skipped entries never consume a rank, so ranks stay contiguous from 1.
#[must_use]
pub fn next_rank(produced: usize) -> u32 {
    u32::try_from(produced).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// Local wall-clock time formatted with [`CAPTURE_TIMESTAMP_FORMAT`].
#[must_use]
pub fn capture_timestamp() -> String {
    chrono::Local::now()
        .format(CAPTURE_TIMESTAMP_FORMAT)
        .to_string()
}

/// Maps one feed entry to a [`FeedAppRecord`].
///
/// Every field is looked up with [`text_at`], so missing keys become empty
/// strings.
///
/// # Errors
///
/// Returns [`ScraperError::Extraction`] if the entry is not a JSON object.
pub fn feed_record_from_entry(entry: &Value, rank: u32) -> Result<FeedAppRecord, ScraperError> {
    if !entry.is_object() {
        return Err(ScraperError::Extraction {
            rank,
            reason: format!("feed entry is not an object: {}", type_name(entry)),
        });
    }

    Ok(FeedAppRecord {
        rank,
        name: text_at(entry, &["im:name", "label"]),
        artist: text_at(entry, &["im:artist", "label"]),
        category: text_at(entry, &["category", "attributes", "label"]),
        price: text_at(entry, &["im:price", "label"]),
        release_date: text_at(entry, &["im:releaseDate", "label"]),
        app_id: text_at(entry, &["id", "attributes", "im:id"]),
        bundle_id: text_at(entry, &["id", "attributes", "im:bundleId"]),
        app_url: feed_app_url(entry),
        icon_url: feed_icon_url(entry),
        summary: text_at(entry, &["summary", "label"]),
        rights: text_at(entry, &["rights", "label"]),
        detail: None,
    })
}

/// `link` is an object for single-link entries and an array otherwise; the
/// first array element is the store page.
fn feed_app_url(entry: &Value) -> String {
    match entry.get("link") {
        Some(Value::Array(_)) => text_at_path(
            entry,
            &[
                PathSegment::Key("link"),
                PathSegment::Index(0),
                PathSegment::Key("attributes"),
                PathSegment::Key("href"),
            ],
        ),
        Some(Value::Object(_)) => text_at(entry, &["link", "attributes", "href"]),
        _ => String::new(),
    }
}

/// Images are listed smallest first; the last one is the largest.
fn feed_icon_url(entry: &Value) -> String {
    entry
        .get("im:image")
        .and_then(Value::as_array)
        .and_then(|images| images.last())
        .map(|image| text_at(image, &["label"]))
        .unwrap_or_default()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Maps a lookup result to an [`AppDetail`].
#[must_use]
pub fn detail_from_lookup(result: LookupResult) -> AppDetail {
    AppDetail {
        version: result.version,
        file_size: result.file_size_bytes,
        rating: result.average_user_rating.clamp(0.0, 5.0),
        rating_count: result.user_rating_count,
        content_rating: result.content_advisory_rating,
        description: result.description,
        screenshots: result.screenshot_urls,
        languages: result.language_codes,
        genres: result.genres,
        minimum_os_version: result.minimum_os_version,
        current_version_release_date: result.current_version_release_date,
        developer_website: result.artist_view_url,
        support_url: result.support_url,
    }
}

/// Merges lookup fields into `record`. Base fields are never touched.
///
/// An empty `detail` leaves the record unchanged.
pub fn merge_detail(record: &mut FeedAppRecord, detail: AppDetail) {
    if detail.is_empty() {
        return;
    }
    record.detail = Some(detail);
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
