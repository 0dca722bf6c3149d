//! Listing-card and hyperlink field extraction.

use appcharts_core::{
    PlayAppRecord, RATING_NOT_AVAILABLE, UNKNOWN_APP, UNKNOWN_APP_ID, UNKNOWN_DEVELOPER,
};
use scraper::{ElementRef, Selector};

use super::config::CompiledRules;
use crate::error::ScraperError;
use crate::normalize::capture_timestamp;

/// Builds a record from one listing card.
///
/// Name and developer fall back to their sentinels. The link is looked up on
/// the card itself, then inside it, then on an enclosing anchor. A package
/// data attribute supplies the id when the link carries none.
///
/// # Errors
///
/// Returns [`ScraperError::Extraction`] when the card has neither a link nor
/// a package attribute.
pub fn extract_from_element(
    element: ElementRef<'_>,
    rank: u32,
    rules: &CompiledRules,
) -> Result<PlayAppRecord, ScraperError> {
    let name = first_text(element, &rules.names).unwrap_or_else(|| UNKNOWN_APP.to_owned());
    let developer =
        first_text(element, &rules.developers).unwrap_or_else(|| UNKNOWN_DEVELOPER.to_owned());

    let href = card_href(element, rules);
    let linked_id = href.and_then(|href| parse_app_id(href).map(|app_id| (app_id, href)));
    let (app_id, url) = match linked_id {
        Some((app_id, href)) => (app_id, absolutize(&rules.origin, href)),
        None => match (package_attribute(element, &rules.package_attributes), href) {
            (Some(package), _) => {
                let url = format!("{}/store/apps/details?id={package}", rules.origin);
                (package, url)
            }
            (None, Some(href)) => (UNKNOWN_APP_ID.to_owned(), absolutize(&rules.origin, href)),
            (None, None) => {
                return Err(ScraperError::Extraction {
                    rank,
                    reason: "no link or package attribute on listing element".to_owned(),
                });
            }
        },
    };

    Ok(PlayAppRecord {
        rank,
        name,
        developer,
        rating: RATING_NOT_AVAILABLE.to_owned(),
        app_id,
        url,
        scraped_at: capture_timestamp(),
    })
}

/// Builds a record from a bare detail-page anchor.
///
/// The developer is a best-effort guess: the first text under the anchor's
/// parent, outside the anchor, that is longer than two characters and differs
/// from the name.
pub fn extract_from_link(anchor: ElementRef<'_>, rank: u32, rules: &CompiledRules) -> PlayAppRecord {
    let href = anchor.value().attr("href").unwrap_or_default();
    let app_id = parse_app_id(href).unwrap_or_else(|| UNKNOWN_APP_ID.to_owned());

    let name = Some(clean_text(anchor))
        .filter(|text| !text.is_empty())
        .or_else(|| {
            anchor
                .value()
                .attr("title")
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| UNKNOWN_APP.to_owned());

    let developer = sibling_text(anchor, &name).unwrap_or_else(|| UNKNOWN_DEVELOPER.to_owned());

    PlayAppRecord {
        rank,
        name,
        developer,
        rating: RATING_NOT_AVAILABLE.to_owned(),
        app_id,
        url: absolutize(&rules.origin, href),
        scraped_at: capture_timestamp(),
    }
}

/// The value of the `id` query parameter of an app link.
pub fn parse_app_id(href: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Prefixes `origin` onto relative hrefs. Absolute URLs pass through.
pub fn absolutize(origin: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_owned();
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }
    let origin = origin.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

/// All text under `element` with whitespace runs collapsed.
pub fn clean_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

fn first_text(element: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        element
            .select(selector)
            .map(clean_text)
            .find(|text| !text.is_empty())
    })
}

fn card_href<'a>(element: ElementRef<'a>, rules: &CompiledRules) -> Option<&'a str> {
    if is_link(element) {
        return element.value().attr("href");
    }
    if let Some(inner) = element.select(&rules.descendant_links).next() {
        return inner.value().attr("href");
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| is_link(*ancestor))
        .and_then(|anchor| anchor.value().attr("href"))
}

fn is_link(element: ElementRef<'_>) -> bool {
    element.value().name() == "a" && element.value().attr("href").is_some()
}

fn package_attribute(element: ElementRef<'_>, attributes: &[String]) -> Option<String> {
    attributes.iter().find_map(|attr| {
        element
            .value()
            .attr(attr)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    })
}

fn sibling_text(anchor: ElementRef<'_>, name: &str) -> Option<String> {
    let parent = anchor.parent()?;
    let anchor_id = anchor.id();
    parent
        .descendants()
        .filter(|node| !node.ancestors().any(|a| a.id() == anchor_id))
        .filter_map(|node| node.value().as_text().map(|text| text.trim().to_owned()))
        .find(|text| !text.is_empty() && text != name && text.chars().count() > 2)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
