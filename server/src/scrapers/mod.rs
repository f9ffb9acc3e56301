//! The two reference scraper plugins (spec §1, §4.6): [`DisciplineScraper`]
//! and [`CourseScraper`]. The spec treats their concrete HTML layouts as
//! out of scope; these are a self-consistent reference implementation of
//! the [`campus_search_scrape::Scraper`] contract against a configurable
//! catalog site.

mod course;
mod discipline;

pub use course::CourseScraper;
pub use discipline::DisciplineScraper;
