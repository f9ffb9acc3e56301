//! campus-search-server — the reference binary's library half: process
//! configuration, the initialization orchestrator (C8), the two reference
//! scraper plugins, and the typed HTTP routes that sit alongside the
//! generic fuzzy-search surface from `campus_search_http`.

pub mod app;
pub mod config;
pub mod corpus;
pub mod domain;
pub mod init;
pub mod routes;
pub mod scrapers;

pub use config::{Config, Env};
pub use init::InitState;
