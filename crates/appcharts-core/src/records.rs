//! Canonical record shapes produced by one collection run.
//!
//! Every field is always present: missing source data renders as an empty
//! string, zero, or a sentinel so exported files keep a fixed set of columns.

use serde::{Deserialize, Serialize};

pub const UNKNOWN_APP: &str = "Unknown App";
pub const UNKNOWN_DEVELOPER: &str = "Unknown Developer";
pub const UNKNOWN_APP_ID: &str = "unknown";
pub const RATING_NOT_AVAILABLE: &str = "N/A";

/// Column order of a feed record without detail fields.
pub const FEED_BASE_COLUMNS: [&str; 12] = [
    "rank",
    "name",
    "artist",
    "category",
    "price",
    "release_date",
    "app_id",
    "bundle_id",
    "app_url",
    "icon_url",
    "summary",
    "rights",
];

/// Column order of the detail fields appended after [`FEED_BASE_COLUMNS`].
pub const DETAIL_COLUMNS: [&str; 13] = [
    "version",
    "file_size",
    "rating",
    "rating_count",
    "content_rating",
    "description",
    "screenshots",
    "languages",
    "genres",
    "minimum_os_version",
    "current_version_release_date",
    "developer_website",
    "support_url",
];

/// Column order of a storefront-scraped record.
pub const PLAY_COLUMNS: [&str; 7] = [
    "rank",
    "name",
    "developer",
    "rating",
    "app_id",
    "url",
    "scraped_at",
];

/// One ranked entry from the feed marketplace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedAppRecord {
    /// 1-based position in discovery order. Not stable across runs.
    pub rank: u32,
    pub name: String,
    pub artist: String,
    pub category: String,
    /// Price label as the feed presents it (e.g. `"Free"`, `"₩1,200"`).
    pub price: String,
    pub release_date: String,
    pub app_id: String,
    pub bundle_id: String,
    pub app_url: String,
    pub icon_url: String,
    pub summary: String,
    pub rights: String,
    /// Lookup fields, present once the record has been through enrichment.
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<AppDetail>,
}

impl FeedAppRecord {
    #[must_use]
    pub fn has_app_id(&self) -> bool {
        !self.app_id.trim().is_empty()
    }

    /// Detail rating, or `0.0` when the record was never enriched.
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.detail.as_ref().map_or(0.0, |d| d.rating)
    }

    #[must_use]
    pub fn rating_count(&self) -> u64 {
        self.detail.as_ref().map_or(0, |d| d.rating_count)
    }
}

/// Per-app fields from the lookup endpoint.
///
/// `AppDetail::default()` is what a lookup with no result produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppDetail {
    pub version: String,
    /// Bytes.
    pub file_size: u64,
    /// Average user rating, 0.0 to 5.0.
    pub rating: f64,
    pub rating_count: u64,
    pub content_rating: String,
    pub description: String,
    pub screenshots: Vec<String>,
    /// ISO 639-1 codes, upper case as the lookup API returns them.
    pub languages: Vec<String>,
    pub genres: Vec<String>,
    pub minimum_os_version: String,
    pub current_version_release_date: String,
    pub developer_website: String,
    pub support_url: String,
}

impl AppDetail {
    /// Returns `true` when every field still holds its default.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One ranked entry scraped from the HTML marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayAppRecord {
    pub rank: u32,
    pub name: String,
    pub developer: String,
    /// Always [`RATING_NOT_AVAILABLE`]: the listing page carries no rating.
    pub rating: String,
    /// Package name, or [`UNKNOWN_APP_ID`] when it could not be resolved.
    pub app_id: String,
    pub url: String,
    pub scraped_at: String,
}
