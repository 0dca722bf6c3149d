//! Summary statistics printed after a feed collection.

use std::collections::HashMap;

use appcharts_core::FeedAppRecord;

pub(crate) const UNKNOWN_CATEGORY: &str = "Unknown";

/// Ratings at or above this count as highly rated.
pub(crate) const HIGH_RATING: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RatingSummary {
    /// Records with a positive rating.
    pub rated: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub high_rated: usize,
    /// Mean rating count over every record, rated or not.
    pub mean_rating_count: f64,
}

/// Apps per category, most common first; ties sort by name.
pub(crate) fn category_counts(records: &[FeedAppRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let category = record.category.trim();
        let key = if category.is_empty() {
            UNKNOWN_CATEGORY
        } else {
            category
        };
        *counts.entry(key).or_default() += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(category, count)| (category.to_owned(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// `None` when no record has a positive rating.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn rating_summary(records: &[FeedAppRecord]) -> Option<RatingSummary> {
    let ratings: Vec<f64> = records
        .iter()
        .map(FeedAppRecord::rating)
        .filter(|rating| *rating > 0.0)
        .collect();
    if ratings.is_empty() {
        return None;
    }

    let total_count: u64 = records.iter().map(FeedAppRecord::rating_count).sum();
    Some(RatingSummary {
        rated: ratings.len(),
        mean: ratings.iter().sum::<f64>() / ratings.len() as f64,
        max: ratings.iter().copied().fold(f64::MIN, f64::max),
        min: ratings.iter().copied().fold(f64::MAX, f64::min),
        high_rated: ratings.iter().filter(|r| **r >= HIGH_RATING).count(),
        mean_rating_count: total_count as f64 / records.len() as f64,
    })
}
