//! campus-search-scrape — HTML-scraping contract and cache-backed runner.
//!
//! A record type's ingestion plugin implements [`Scraper`]; [`run_scraper`]
//! wraps it with the cache-then-scrape-then-background-persist protocol.
//! [`html`] supplies the DOM-walking primitives plugins compose to pull
//! structured fields out of a parsed page.

pub mod contract;
pub mod error;
pub mod html;

pub use contract::{run_scraper, CacheConfig, ScrapeEnv, Scraper};
pub use error::{CacheIoError, ParsingError, ScrapingError};
