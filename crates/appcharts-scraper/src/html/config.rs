//! Storefront URLs and CSS selectors for the HTML marketplace.
//!
//! The class names below are obfuscated build artifacts of the storefront and
//! change without notice. They are ordered fallbacks, not a contract: expect
//! some to be stale at any given time.

use scraper::Selector;

use crate::error::ScraperError;

pub const DEFAULT_PLAY_ORIGIN: &str = "https://play.google.com";

#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Scheme+host used to absolutize relative links.
    pub origin: String,
    /// Listing pages tried in order. Relative entries are joined to `origin`.
    pub candidate_urls: Vec<String>,
    /// Selectors for one listing card, tried in order.
    pub element_selectors: Vec<String>,
    /// Sub-selectors for the app name inside a card, tried in order.
    pub name_selectors: Vec<String>,
    /// Sub-selectors for the developer inside a card, tried in order.
    pub developer_selectors: Vec<String>,
    /// Attributes that carry the raw package name on a card.
    pub package_attributes: Vec<String>,
    /// Path fragment every app detail link contains.
    pub detail_path_marker: String,
    /// Cards extracted per page.
    pub max_results: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        Self {
            origin: DEFAULT_PLAY_ORIGIN.to_owned(),
            candidate_urls: owned(&[
                "/store/apps/collection/topselling_free",
                "/store/apps/top",
                "/store/apps/category/APPLICATION/collection/topselling_free",
                "/store/apps?hl=en&gl=US",
            ]),
            element_selectors: owned(&[
                "div.VfPpkd-EScbFb-JIbuQc",
                "div.ULeU3b",
                "div.Si6A0c",
                "div[role='listitem']",
                "div.ImZGtf",
                "div.b8cIId",
            ]),
            name_selectors: owned(&[
                "div.Epkrse",
                "span.DdYX5",
                "div.WsMG1c",
                "div.nnK0zc",
                "span.sT93pb",
            ]),
            developer_selectors: owned(&[
                "div.ubGTjb",
                "span.wMUdtb",
                "div.KoLSrc",
                "div.b8cIId.ReQCgd",
            ]),
            package_attributes: owned(&["data-docid", "data-item-id", "data-package-name"]),
            detail_path_marker: "/store/apps/details".to_owned(),
            max_results: 10,
        }
    }
}

/// A listing-card selector paired with its source text for logging.
#[derive(Debug)]
pub struct NamedSelector {
    pub(crate) css: String,
    pub(crate) selector: Selector,
}

/// [`SelectorConfig`] with every selector parsed.
#[derive(Debug)]
pub struct CompiledRules {
    pub(crate) origin: String,
    pub(crate) package_attributes: Vec<String>,
    pub(crate) max_results: usize,
    pub(crate) elements: Vec<NamedSelector>,
    pub(crate) names: Vec<Selector>,
    pub(crate) developers: Vec<Selector>,
    pub(crate) detail_links: NamedSelector,
    pub(crate) descendant_links: Selector,
}

impl CompiledRules {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] for the first selector that
    /// does not parse.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScraperError> {
        let elements = config
            .element_selectors
            .iter()
            .map(|css| {
                Ok(NamedSelector {
                    css: css.clone(),
                    selector: parse_selector(css)?,
                })
            })
            .collect::<Result<Vec<_>, ScraperError>>()?;
        let names = parse_all(&config.name_selectors)?;
        let developers = parse_all(&config.developer_selectors)?;

        let marker = config.detail_path_marker.replace('"', "\\\"");
        let detail_css = format!("a[href*=\"{marker}\"]");
        let detail_links = NamedSelector {
            selector: parse_selector(&detail_css)?,
            css: detail_css,
        };

        Ok(Self {
            origin: config.origin.trim_end_matches('/').to_owned(),
            package_attributes: config.package_attributes.clone(),
            max_results: config.max_results,
            elements,
            names,
            developers,
            detail_links,
            descendant_links: parse_selector("a[href]")?,
        })
    }
}

fn parse_all(selectors: &[String]) -> Result<Vec<Selector>, ScraperError> {
    selectors.iter().map(|css| parse_selector(css)).collect()
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        selector: css.to_owned(),
        reason: format!("{e:?}"),
    })
}
