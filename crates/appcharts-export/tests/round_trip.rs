//! CSV and JSON exports read back through `read_csv` and `serde_json`.

use appcharts_core::{AppDetail, FeedAppRecord, OutputFormat, DETAIL_COLUMNS, FEED_BASE_COLUMNS};
use appcharts_export::{export, read_csv, ExportRow};

fn enriched(rank: u32, name: &str) -> FeedAppRecord {
    FeedAppRecord {
        rank,
        name: name.to_owned(),
        artist: "Kakao Corp.".to_owned(),
        category: "Social Networking".to_owned(),
        price: "무료".to_owned(),
        release_date: "2010-03-18T03:01:20-07:00".to_owned(),
        app_id: format!("{}", 362_057_947 + rank),
        bundle_id: "com.iwilab.KakaoTalk".to_owned(),
        app_url: "https://apps.apple.com/kr/app/id362057947".to_owned(),
        icon_url: "https://img.example.com/100.png".to_owned(),
        summary: "line one\nline two, with \"quotes\"".to_owned(),
        rights: "© Kakao Corp.".to_owned(),
        detail: Some(AppDetail {
            version: "10.5.0".to_owned(),
            file_size: 401_000_000,
            rating: 3.2,
            rating_count: 12_345,
            content_rating: "12+".to_owned(),
            description: "메시지".to_owned(),
            screenshots: vec!["https://img.example.com/a.png".to_owned()],
            languages: vec!["EN".to_owned(), "KO".to_owned()],
            genres: vec!["Social Networking".to_owned()],
            ..AppDetail::default()
        }),
    }
}

#[test]
fn csv_has_header_plus_one_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apple.csv");
    let records = vec![enriched(1, "카카오톡"), enriched(2, "Two"), enriched(3, "Three")];

    export(&path, OutputFormat::Csv, &records).unwrap();
    let table = read_csv(&path).unwrap();

    let expected: Vec<&str> = FEED_BASE_COLUMNS
        .iter()
        .chain(DETAIL_COLUMNS.iter())
        .copied()
        .collect();
    assert_eq!(table.header, expected);
    assert_eq!(table.rows.len(), records.len());
}

#[test]
fn csv_round_trip_preserves_string_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apple.csv");
    let records = vec![enriched(1, "카카오톡"), enriched(2, "Second")];

    export(&path, OutputFormat::Csv, &records).unwrap();
    let table = read_csv(&path).unwrap();

    for (idx, record) in records.iter().enumerate() {
        assert_eq!(table.rows[idx], record.row());
    }
    assert_eq!(table.cell(0, "name"), Some("카카오톡"));
    assert_eq!(table.cell(0, "summary"), Some("line one\nline two, with \"quotes\""));
    assert_eq!(table.cell(1, "languages"), Some("EN, KO"));
    assert_eq!(table.cell(1, "rank"), Some("2"));
}

#[test]
fn csv_reexported_as_json_matches_record_strings() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("apple.csv");
    let json_path = dir.path().join("apple.json");
    let records = vec![enriched(1, "카카오톡")];

    export(&csv_path, OutputFormat::Csv, &records).unwrap();
    export(&json_path, OutputFormat::Json, &records).unwrap();

    let from_csv = read_csv(&csv_path).unwrap().to_json();
    let from_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();

    for key in ["name", "artist", "price", "app_id", "summary", "rights", "version"] {
        assert_eq!(from_csv[0][key], from_json[0][key], "field {key} differs");
    }
    assert_eq!(from_json[0]["rank"], 1);
    assert_eq!(from_json[0]["file_size"], 401_000_000);
    assert_eq!(from_json[0]["languages"], serde_json::json!(["EN", "KO"]));
}

#[test]
fn json_export_reads_back_into_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apple.json");
    let records = vec![enriched(1, "카카오톡"), enriched(2, "Second")];

    export(&path, OutputFormat::Json, &records).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<FeedAppRecord> = serde_json::from_str(&text).unwrap();

    assert!(text.contains("카카오톡"));
    assert!(text.contains("\n  {\n    \"rank\": 1,"));
    assert_eq!(parsed, records);
}
