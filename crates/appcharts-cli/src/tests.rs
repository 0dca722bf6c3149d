use chrono::NaiveDate;

use super::*;

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn request_from(args: &[&str]) -> CollectRequest {
    let cli = Cli::try_parse_from(args).expect("expected valid cli args");
    cli.command
        .expect("expected a subcommand")
        .into_request(Path::new("exports"), at())
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["appcharts"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.export_dir.is_none());
}

#[test]
fn app_store_defaults() {
    let request = request_from(&["appcharts", "app-store"]);
    assert_eq!(request.marketplace, Marketplace::AppStore);
    assert_eq!(request.country, "kr");
    assert_eq!(request.limit, 100);
    assert_eq!(request.chart, ChartType::TopFree);
    assert!(!request.enrich);
    assert_eq!(request.format, OutputFormat::Csv);
    assert_eq!(
        request.app_store_path(),
        Path::new("exports").join("apple_free_apps_20240305-09.csv")
    );
}

#[test]
fn app_store_with_all_flags() {
    let request = request_from(&[
        "appcharts",
        "app-store",
        "--country",
        "US",
        "--limit",
        "50",
        "--chart",
        "toppaidapplications",
        "--details",
        "--format",
        "json",
        "--output",
        "paid_us",
    ]);
    assert_eq!(request.country, "us");
    assert_eq!(request.limit, 50);
    assert_eq!(request.chart, ChartType::TopPaid);
    assert!(request.enrich);
    assert_eq!(
        request.app_store_path(),
        Path::new("exports").join("paid_us.json")
    );
}

#[test]
fn app_store_rejects_unknown_chart() {
    let result = Cli::try_parse_from(["appcharts", "app-store", "--chart", "topmovies"]);
    assert!(result.is_err());
}

#[test]
fn app_store_rejects_non_numeric_limit() {
    let result = Cli::try_parse_from(["appcharts", "app-store", "--limit", "many"]);
    assert!(result.is_err());
}

#[test]
fn google_play_defaults_to_timestamped_name() {
    let request = request_from(&["appcharts", "google-play"]);
    assert_eq!(request.marketplace, Marketplace::GooglePlay);
    assert_eq!(
        request.google_play_path(),
        Path::new("exports").join("google_apps_20240305-09.csv")
    );
}

#[test]
fn google_play_with_format_and_output() {
    let request = request_from(&["appcharts", "google-play", "--format", "json", "--output", "gp"]);
    assert_eq!(request.google_play_path(), Path::new("exports").join("gp.json"));
}

#[test]
fn all_runs_both_marketplaces() {
    let request = request_from(&[
        "appcharts",
        "all",
        "--chart",
        "grossing",
        "--play-output",
        "play",
    ]);
    assert_eq!(request.marketplace, Marketplace::Both);
    assert_eq!(request.chart, ChartType::TopGrossing);
    assert_eq!(
        request.app_store_path(),
        Path::new("exports").join("apple_grossing_apps_20240305-09.csv")
    );
    assert_eq!(request.google_play_path(), Path::new("exports").join("play.csv"));
}

#[test]
fn export_dir_is_global() {
    let cli = Cli::try_parse_from(["appcharts", "google-play", "--export-dir", "/tmp/out"])
        .expect("expected valid cli args");
    assert_eq!(cli.export_dir, Some(PathBuf::from("/tmp/out")));
}
