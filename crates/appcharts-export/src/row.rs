//! Flat column views of the record types.

use appcharts_core::{
    AppDetail, FeedAppRecord, PlayAppRecord, DETAIL_COLUMNS, FEED_BASE_COLUMNS, PLAY_COLUMNS,
};
use serde::Serialize;

/// Separator for list-valued fields inside one CSV cell.
pub const LIST_SEPARATOR: &str = ", ";

/// A record that can be written as one CSV row.
///
/// `header()` and `row()` must have the same length.
pub trait ExportRow: Serialize {
    fn header(&self) -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl ExportRow for FeedAppRecord {
    fn header(&self) -> Vec<&'static str> {
        let mut columns = FEED_BASE_COLUMNS.to_vec();
        if self.detail.is_some() {
            columns.extend_from_slice(&DETAIL_COLUMNS);
        }
        columns
    }

    fn row(&self) -> Vec<String> {
        let mut cells = vec![
            self.rank.to_string(),
            self.name.clone(),
            self.artist.clone(),
            self.category.clone(),
            self.price.clone(),
            self.release_date.clone(),
            self.app_id.clone(),
            self.bundle_id.clone(),
            self.app_url.clone(),
            self.icon_url.clone(),
            self.summary.clone(),
            self.rights.clone(),
        ];
        if let Some(detail) = &self.detail {
            cells.extend(detail_cells(detail));
        }
        cells
    }
}

fn detail_cells(detail: &AppDetail) -> [String; 13] {
    [
        detail.version.clone(),
        detail.file_size.to_string(),
        detail.rating.to_string(),
        detail.rating_count.to_string(),
        detail.content_rating.clone(),
        detail.description.clone(),
        detail.screenshots.join(LIST_SEPARATOR),
        detail.languages.join(LIST_SEPARATOR),
        detail.genres.join(LIST_SEPARATOR),
        detail.minimum_os_version.clone(),
        detail.current_version_release_date.clone(),
        detail.developer_website.clone(),
        detail.support_url.clone(),
    ]
}

impl ExportRow for PlayAppRecord {
    fn header(&self) -> Vec<&'static str> {
        PLAY_COLUMNS.to_vec()
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.rank.to_string(),
            self.name.clone(),
            self.developer.clone(),
            self.rating.clone(),
            self.app_id.clone(),
            self.url.clone(),
            self.scraped_at.clone(),
        ]
    }
}
