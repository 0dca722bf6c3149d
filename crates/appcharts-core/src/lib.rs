pub mod app_config;
pub mod collect;
pub mod config;
pub mod error;
pub mod records;

pub use app_config::AppConfig;
pub use collect::{default_file_stem, ChartType, CollectRequest, Marketplace, OutputFormat};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use records::{
    AppDetail, FeedAppRecord, PlayAppRecord, DETAIL_COLUMNS, FEED_BASE_COLUMNS, PLAY_COLUMNS,
    RATING_NOT_AVAILABLE, UNKNOWN_APP, UNKNOWN_APP_ID, UNKNOWN_DEVELOPER,
};
