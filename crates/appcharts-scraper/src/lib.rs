pub mod detail;
pub mod enrich;
pub mod error;
pub mod feed;
pub mod html;
pub mod http;
pub mod normalize;
pub mod pacing;
pub mod types;
pub mod value_path;

pub use detail::LookupClient;
pub use enrich::enrich_records;
pub use error::ScraperError;
pub use feed::FeedClient;
pub use html::{PlayStoreScraper, SelectorConfig};
pub use pacing::{FixedPause, JitterPause, NoPause, Pacer};
