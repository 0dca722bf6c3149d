mod prompt;
mod run;
mod stats;

use std::path::{Path, PathBuf};

use appcharts_core::collect::{DEFAULT_COUNTRY, DEFAULT_FEED_LIMIT};
use appcharts_core::{default_file_stem, ChartType, CollectRequest, Marketplace, OutputFormat};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "appcharts")]
#[command(about = "Collect top-chart apps from the App Store and Google Play")]
struct Cli {
    /// Directory for exported files; overrides APPCHARTS_EXPORT_DIR
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Top chart from the App Store feed
    AppStore(AppStoreArgs),
    /// Top free apps from the Google Play storefront
    GooglePlay(OutputArgs),
    /// App Store, then Google Play
    All {
        #[command(flatten)]
        app_store: AppStoreArgs,
        /// Google Play file name without extension
        #[arg(long)]
        play_output: Option<String>,
    },
}

#[derive(Debug, Args)]
struct AppStoreArgs {
    /// Two-letter storefront country code
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,
    /// Number of apps to fetch (clamped to 1..=200)
    #[arg(long, default_value_t = DEFAULT_FEED_LIMIT)]
    limit: u32,
    /// topfreeapplications, toppaidapplications, or topgrossingapplications
    #[arg(long, default_value = "topfreeapplications")]
    chart: ChartType,
    /// Look up per-app details after the chart fetch
    #[arg(long)]
    details: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// csv or json
    #[arg(long, default_value = "csv")]
    format: OutputFormat,
    /// File name without extension; defaults to a timestamped name
    #[arg(long)]
    output: Option<String>,
}

impl Commands {
    fn into_request(self, export_dir: &Path, now: NaiveDateTime) -> CollectRequest {
        match self {
            Self::AppStore(args) => {
                let mut request = CollectRequest::new(Marketplace::AppStore, export_dir);
                args.apply(&mut request, now);
                request
            }
            Self::GooglePlay(output) => {
                let mut request = CollectRequest::new(Marketplace::GooglePlay, export_dir);
                request.format = output.format;
                request.google_play_stem = output.output.unwrap_or_else(|| {
                    default_file_stem(Marketplace::GooglePlay, request.chart, now)
                });
                request
            }
            Self::All {
                app_store,
                play_output,
            } => {
                let mut request = CollectRequest::new(Marketplace::Both, export_dir);
                app_store.apply(&mut request, now);
                request.google_play_stem = play_output.unwrap_or_else(|| {
                    default_file_stem(Marketplace::GooglePlay, request.chart, now)
                });
                request
            }
        }
    }
}

impl AppStoreArgs {
    fn apply(self, request: &mut CollectRequest, now: NaiveDateTime) {
        request.country = self.country.trim().to_ascii_lowercase();
        request.limit = self.limit;
        request.chart = self.chart;
        request.enrich = self.details;
        request.format = self.output.format;
        request.app_store_stem = self
            .output
            .output
            .unwrap_or_else(|| default_file_stem(Marketplace::AppStore, self.chart, now));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = appcharts_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let export_dir = cli
        .export_dir
        .unwrap_or_else(|| config.export_dir.clone());

    let request = match cli.command {
        Some(command) => command.into_request(&export_dir, chrono::Local::now().naive_local()),
        None => match prompt::resolve_interactive(&mut prompt::StdinPrompter, &export_dir)? {
            Some(request) => request,
            None => return Ok(()),
        },
    };

    tracing::debug!(?request, "resolved collection request");
    run::run_request(&config, &request).await?;
    Ok(())
}

#[cfg(test)]
mod tests;
