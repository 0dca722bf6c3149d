//! Integration tests for `PlayStoreScraper::discover_top_apps`.
//!
//! Each test points the scraper at a `wiremock` origin with its own candidate
//! page list and uses `NoPause` or a counting pacer, so nothing sleeps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appcharts_core::{RATING_NOT_AVAILABLE, UNKNOWN_DEVELOPER};
use appcharts_scraper::pacing::PauseFuture;
use appcharts_scraper::{NoPause, Pacer, PlayStoreScraper, SelectorConfig};

/// Records how many times it was awaited.
#[derive(Clone, Default)]
struct CountingPause(Arc<AtomicUsize>);

impl CountingPause {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Pacer for CountingPause {
    fn pause(&self) -> PauseFuture<'_> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Box::pin(std::future::ready(()))
    }
}

fn paced_scraper_for(
    server: &MockServer,
    pages: &[&str],
    pacer: Box<dyn Pacer>,
) -> PlayStoreScraper {
    let config = SelectorConfig {
        origin: server.uri(),
        candidate_urls: pages.iter().map(|p| (*p).to_owned()).collect(),
        ..SelectorConfig::default()
    };
    PlayStoreScraper::new(5, "appcharts-test/0.1", &config, pacer)
        .expect("failed to build test PlayStoreScraper")
}

fn scraper_for(server: &MockServer, pages: &[&str]) -> PlayStoreScraper {
    paced_scraper_for(server, pages, Box::new(NoPause))
}

fn card(class: &str, n: usize) -> String {
    format!(
        r#"<div class="{class}">
             <a href="/store/apps/details?id=com.example.app{n}">
               <div class="Epkrse">App {n}</div>
               <div class="ubGTjb">Dev {n}</div>
             </a>
           </div>"#
    )
}

fn page(body: &str) -> String {
    format!("<!doctype html><html><head><title>Top</title></head><body>{body}</body></html>")
}

async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn skips_failed_page_and_caps_results_at_ten() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let cards: String = (1..=12).map(|n| card("VfPpkd-EScbFb-JIbuQc", n)).collect();
    mount_html(&server, "/second", page(&cards)).await;

    let records = scraper_for(&server, &["/first", "/second"])
        .discover_top_apps()
        .await;

    assert_eq!(records.len(), 10);
    for (idx, record) in records.iter().enumerate() {
        let n = idx + 1;
        assert_eq!(record.rank as usize, n);
        assert_eq!(record.name, format!("App {n}"));
        assert_eq!(record.developer, format!("Dev {n}"));
        assert_eq!(record.app_id, format!("com.example.app{n}"));
        assert_eq!(
            record.url,
            format!("{}/store/apps/details?id=com.example.app{n}", server.uri())
        );
        assert_eq!(record.rating, RATING_NOT_AVAILABLE);
    }
}

#[tokio::test]
async fn first_matching_selector_wins_over_later_ones() {
    let server = MockServer::start().await;
    let body = format!(
        "{}{}{}",
        card("ULeU3b", 1),
        card("ULeU3b", 2),
        card("Si6A0c", 99)
    );
    mount_html(&server, "/top", page(&body)).await;

    let records = scraper_for(&server, &["/top"]).discover_top_apps().await;

    let ids: Vec<_> = records.iter().map(|r| r.app_id.as_str()).collect();
    assert_eq!(ids, vec!["com.example.app1", "com.example.app2"]);
}

#[tokio::test]
async fn unextractable_cards_are_skipped_without_consuming_rank() {
    let server = MockServer::start().await;
    let body = format!(
        "{}<div class=\"ULeU3b\"><div class=\"Epkrse\">No Link</div></div>{}",
        card("ULeU3b", 1),
        card("ULeU3b", 2)
    );
    mount_html(&server, "/top", page(&body)).await;

    let records = scraper_for(&server, &["/top"]).discover_top_apps().await;

    let ranked: Vec<_> = records.iter().map(|r| (r.rank, r.name.as_str())).collect();
    assert_eq!(ranked, vec![(1, "App 1"), (2, "App 2")]);
}

#[tokio::test]
async fn falls_back_to_detail_links() {
    let server = MockServer::start().await;
    let body = r#"
        <ul>
          <li><a href="/store/apps/details?id=com.link.one">Link One</a><span>Link Labs</span></li>
          <li><a href="/store/apps/details?id=com.link.two&hl=en">Link Two</a></li>
          <li><a href="/store/apps/top">Not an app</a></li>
        </ul>"#;
    mount_html(&server, "/top", page(body)).await;

    let records = scraper_for(&server, &["/top"]).discover_top_apps().await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].rank, 1);
    assert_eq!(records[0].name, "Link One");
    assert_eq!(records[0].developer, "Link Labs");
    assert_eq!(records[0].app_id, "com.link.one");
    assert_eq!(records[1].rank, 2);
    assert_eq!(records[1].app_id, "com.link.two");
    assert_eq!(records[1].developer, UNKNOWN_DEVELOPER);
}

#[tokio::test]
async fn page_without_listings_moves_to_next_candidate() {
    let server = MockServer::start().await;
    mount_html(&server, "/empty", page("<p>Nothing to see</p>")).await;
    mount_html(&server, "/full", page(&card("b8cIId", 7))).await;

    let records = scraper_for(&server, &["/empty", "/full"])
        .discover_top_apps()
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].rank, 1);
    assert_eq!(records[0].app_id, "com.example.app7");
}

#[tokio::test]
async fn all_candidates_failing_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let pacer = CountingPause::default();
    let records = paced_scraper_for(&server, &["/a", "/b", "/c"], Box::new(pacer.clone()))
        .discover_top_apps()
        .await;

    assert!(records.is_empty());
    assert_eq!(pacer.count(), 3);
}

#[tokio::test]
async fn pauses_before_each_attempted_page_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_html(&server, "/second", page(&card("ULeU3b", 1))).await;

    let pacer = CountingPause::default();
    let records = paced_scraper_for(
        &server,
        &["/first", "/second", "/third"],
        Box::new(pacer.clone()),
    )
    .discover_top_apps()
    .await;

    assert_eq!(records.len(), 1);
    assert_eq!(pacer.count(), 2);
}
