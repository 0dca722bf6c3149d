//! Per-record detail enrichment for feed records.

use appcharts_core::{AppDetail, FeedAppRecord};

use crate::detail::LookupClient;
use crate::normalize::merge_detail;
use crate::pacing::Pacer;

/// Looks up every record that has an `app_id` and merges the result in,
/// awaiting `pacer` after each lookup.
///
/// Records without an `app_id`, and records whose lookup came back empty,
/// end up with a default detail so the whole batch exports the same columns.
/// Returns how many records received non-empty detail.
pub async fn enrich_records(
    records: &mut [FeedAppRecord],
    client: &LookupClient,
    country: &str,
    pacer: &dyn Pacer,
) -> usize {
    let total = records.len();
    let mut enriched = 0usize;

    for (idx, record) in records.iter_mut().enumerate() {
        let position = idx + 1;
        if !record.has_app_id() {
            tracing::info!(position, total, name = %record.name, "no app_id; skipping detail lookup");
            continue;
        }

        tracing::info!(position, total, name = %record.name, "fetching app detail");
        let detail = client.fetch_detail(&record.app_id, country).await;
        if !detail.is_empty() {
            enriched += 1;
        }
        merge_detail(record, detail);
        pacer.pause().await;
    }

    for record in records.iter_mut() {
        record.detail.get_or_insert_with(AppDetail::default);
    }

    enriched
}
