use std::path::PathBuf;

use crate::app_config::{
    AppConfig, DEFAULT_ITUNES_BASE_URL, DEFAULT_PLAY_BASE_URL, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed or the
/// storefront delay bounds are inverted.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("APPCHARTS_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("APPCHARTS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("APPCHARTS_USER_AGENT", DEFAULT_USER_AGENT);
    let itunes_base_url = or_default("APPCHARTS_ITUNES_BASE_URL", DEFAULT_ITUNES_BASE_URL);
    let play_base_url = or_default("APPCHARTS_PLAY_BASE_URL", DEFAULT_PLAY_BASE_URL);
    let detail_delay_ms = parse_u64("APPCHARTS_DETAIL_DELAY_MS", "500")?;
    let html_delay_min_ms = parse_u64("APPCHARTS_HTML_DELAY_MIN_MS", "2000")?;
    let html_delay_max_ms = parse_u64("APPCHARTS_HTML_DELAY_MAX_MS", "5000")?;
    let export_dir = PathBuf::from(or_default("APPCHARTS_EXPORT_DIR", "exports"));

    if html_delay_min_ms > html_delay_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "APPCHARTS_HTML_DELAY_MAX_MS".to_string(),
            reason: format!(
                "must be >= APPCHARTS_HTML_DELAY_MIN_MS ({html_delay_min_ms}), got {html_delay_max_ms}"
            ),
        });
    }

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        user_agent,
        itunes_base_url,
        play_base_url,
        detail_delay_ms,
        html_delay_min_ms,
        html_delay_max_ms,
        export_dir,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
