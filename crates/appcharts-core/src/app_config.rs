use std::path::PathBuf;

pub const DEFAULT_ITUNES_BASE_URL: &str = "https://itunes.apple.com";
pub const DEFAULT_PLAY_BASE_URL: &str = "https://play.google.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Process-wide settings read from the environment.
///
/// Per-run choices (marketplace, country, output file) live in
/// [`crate::CollectRequest`] instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub itunes_base_url: String,
    pub play_base_url: String,
    /// Pause between consecutive detail lookups.
    pub detail_delay_ms: u64,
    /// Lower bound of the jittered pause before each storefront page.
    pub html_delay_min_ms: u64,
    /// Upper bound (inclusive) of the jittered pause before each storefront page.
    pub html_delay_max_ms: u64,
    pub export_dir: PathBuf,
}
