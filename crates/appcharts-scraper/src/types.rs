//! Response types for the iTunes `lookup` endpoint.
//!
//! ## Observed shape
//!
//! `{"resultCount": 1, "results": [{...}]}`. An unknown id returns
//! `{"resultCount": 0, "results": []}` with HTTP 200.
//!
//! ### `fileSizeBytes`
//! Returned as a decimal **string** (`"157286400"`), not a number. Both forms
//! are accepted; anything unparseable becomes `0`.
//!
//! ### Missing and `null` keys
//! Paid, region-locked, and recently removed apps drop keys such as
//! `averageUserRating` or `supportUrl`, and some keys come back `null`.
//! Every field defaults instead of failing the whole lookup.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level response from `GET /lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    #[serde(rename = "resultCount", default)]
    pub result_count: u64,
    #[serde(default)]
    pub results: Vec<LookupResult>,
}

/// One software result from the lookup endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub file_size_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_user_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_rating_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_advisory_rating: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screenshot_urls: Vec<String>,
    #[serde(
        rename = "languageCodesISO2A",
        default,
        deserialize_with = "null_as_default"
    )]
    pub language_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minimum_os_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_version_release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_view_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub support_url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    })
}
