//! The resolved per-run request handed to the collection pipeline.
//!
//! Prompting and flag parsing happen in the CLI; everything here is plain
//! data so the pipeline never touches stdin.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::ConfigError;

/// The feed accepts at most this many entries per request.
pub const MAX_FEED_LIMIT: u32 = 200;

pub const DEFAULT_COUNTRY: &str = "kr";
pub const DEFAULT_FEED_LIMIT: u32 = 100;
pub const DEFAULT_APP_STORE_STEM: &str = "appstore_top_apps";
pub const DEFAULT_GOOGLE_PLAY_STEM: &str = "googleplay_top_apps";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marketplace {
    AppStore,
    GooglePlay,
    Both,
}

impl Marketplace {
    #[must_use]
    pub fn includes_app_store(self) -> bool {
        matches!(self, Self::AppStore | Self::Both)
    }

    #[must_use]
    pub fn includes_google_play(self) -> bool {
        matches!(self, Self::GooglePlay | Self::Both)
    }
}

impl FromStr for Marketplace {
    type Err = ConfigError;

    /// Accepts the menu numbers (`1`, `2`, `3`) as well as names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "appstore" | "app-store" | "apple" | "itunes" => Ok(Self::AppStore),
            "2" | "googleplay" | "google-play" | "google" | "play" => Ok(Self::GooglePlay),
            "3" | "both" | "all" => Ok(Self::Both),
            _ => Err(ConfigError::InvalidValue {
                field: "marketplace",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    TopFree,
    TopPaid,
    TopGrossing,
}

impl ChartType {
    /// Path segment used by the feed endpoint.
    #[must_use]
    pub fn feed_segment(self) -> &'static str {
        match self {
            Self::TopFree => "topfreeapplications",
            Self::TopPaid => "toppaidapplications",
            Self::TopGrossing => "topgrossingapplications",
        }
    }

    /// Short label used in default file names (`free`, `paid`, `grossing`).
    #[must_use]
    pub fn short_label(self) -> &'static str {
        match self {
            Self::TopFree => "free",
            Self::TopPaid => "paid",
            Self::TopGrossing => "grossing",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feed_segment())
    }
}

impl FromStr for ChartType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "topfreeapplications" | "free" | "top-free" => Ok(Self::TopFree),
            "toppaidapplications" | "paid" | "top-paid" => Ok(Self::TopPaid),
            "topgrossingapplications" | "grossing" | "top-grossing" => Ok(Self::TopGrossing),
            _ => Err(ConfigError::InvalidValue {
                field: "chart type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                field: "output format",
                value: s.to_string(),
            }),
        }
    }
}

/// Everything one collection run needs, already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectRequest {
    pub marketplace: Marketplace,
    pub country: String,
    pub limit: u32,
    pub chart: ChartType,
    /// Whether to run the per-app detail lookup after the feed fetch.
    pub enrich: bool,
    pub format: OutputFormat,
    /// File name without extension, per marketplace.
    pub app_store_stem: String,
    pub google_play_stem: String,
    pub export_dir: PathBuf,
}

impl CollectRequest {
    #[must_use]
    pub fn new(marketplace: Marketplace, export_dir: &Path) -> Self {
        Self {
            marketplace,
            country: DEFAULT_COUNTRY.to_string(),
            limit: DEFAULT_FEED_LIMIT,
            chart: ChartType::default(),
            enrich: false,
            format: OutputFormat::default(),
            app_store_stem: DEFAULT_APP_STORE_STEM.to_string(),
            google_play_stem: DEFAULT_GOOGLE_PLAY_STEM.to_string(),
            export_dir: export_dir.to_path_buf(),
        }
    }

    /// The requested limit clamped to what the feed accepts.
    #[must_use]
    pub fn feed_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_FEED_LIMIT)
    }

    #[must_use]
    pub fn app_store_path(&self) -> PathBuf {
        self.output_path(&self.app_store_stem)
    }

    #[must_use]
    pub fn google_play_path(&self) -> PathBuf {
        self.output_path(&self.google_play_stem)
    }

    fn output_path(&self, stem: &str) -> PathBuf {
        self.export_dir
            .join(format!("{stem}.{}", self.format.extension()))
    }
}

/// Timestamped file stem used when the caller did not name the output.
///
/// `apple_free_apps_20240101-09` for the feed marketplace and
/// `google_apps_20240101-09` for the storefront.
#[must_use]
pub fn default_file_stem(
    marketplace: Marketplace,
    chart: ChartType,
    at: NaiveDateTime,
) -> String {
    let stamp = at.format("%Y%m%d-%H");
    match marketplace {
        Marketplace::GooglePlay => format!("google_apps_{stamp}"),
        Marketplace::AppStore | Marketplace::Both => {
            format!("apple_{}_apps_{stamp}", chart.short_label())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn marketplace_parses_menu_numbers() {
        assert_eq!("1".parse::<Marketplace>().unwrap(), Marketplace::AppStore);
        assert_eq!("2".parse::<Marketplace>().unwrap(), Marketplace::GooglePlay);
        assert_eq!(" 3 ".parse::<Marketplace>().unwrap(), Marketplace::Both);
    }

    #[test]
    fn marketplace_rejects_unknown_choice() {
        let err = "4".parse::<Marketplace>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "marketplace", .. }));
    }

    #[test]
    fn both_includes_each_marketplace() {
        assert!(Marketplace::Both.includes_app_store());
        assert!(Marketplace::Both.includes_google_play());
        assert!(!Marketplace::AppStore.includes_google_play());
        assert!(!Marketplace::GooglePlay.includes_app_store());
    }

    #[test]
    fn chart_type_round_trips_feed_segment() {
        for chart in [ChartType::TopFree, ChartType::TopPaid, ChartType::TopGrossing] {
            assert_eq!(chart.feed_segment().parse::<ChartType>().unwrap(), chart);
        }
    }

    #[test]
    fn chart_type_accepts_short_names() {
        assert_eq!("paid".parse::<ChartType>().unwrap(), ChartType::TopPaid);
        assert_eq!("GROSSING".parse::<ChartType>().unwrap(), ChartType::TopGrossing);
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn feed_limit_is_clamped() {
        let mut req = CollectRequest::new(Marketplace::AppStore, Path::new("exports"));
        req.limit = 500;
        assert_eq!(req.feed_limit(), 200);
        req.limit = 0;
        assert_eq!(req.feed_limit(), 1);
        req.limit = 10;
        assert_eq!(req.feed_limit(), 10);
    }

    #[test]
    fn new_request_uses_documented_defaults() {
        let req = CollectRequest::new(Marketplace::AppStore, Path::new("exports"));
        assert_eq!(req.country, "kr");
        assert_eq!(req.limit, 100);
        assert_eq!(req.chart, ChartType::TopFree);
        assert!(!req.enrich);
        assert_eq!(req.format, OutputFormat::Csv);
        assert_eq!(req.app_store_path(), Path::new("exports/appstore_top_apps.csv"));
        assert_eq!(
            req.google_play_path(),
            Path::new("exports/googleplay_top_apps.csv")
        );
    }

    #[test]
    fn output_path_follows_format() {
        let mut req = CollectRequest::new(Marketplace::GooglePlay, Path::new("out"));
        req.format = OutputFormat::Json;
        assert_eq!(req.google_play_path(), Path::new("out/googleplay_top_apps.json"));
    }

    #[test]
    fn default_file_stem_is_timestamped() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(
            default_file_stem(Marketplace::AppStore, ChartType::TopPaid, at),
            "apple_paid_apps_20240305-09"
        );
        assert_eq!(
            default_file_stem(Marketplace::GooglePlay, ChartType::TopFree, at),
            "google_apps_20240305-09"
        );
    }
}
