//! campus-search-http — the search orchestrator (C9) and the generic
//! fuzzy-search HTTP surface built on top of it: wire encoding, axum
//! handlers for `/api/busca` and `/api/busca/ws`, and the `RequestError`
//! status-code mapping.

pub mod config;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod wire;

pub use config::SearchConfig;
pub use error::RequestError;
pub use handlers::{busca, busca_ws, SearchState};
pub use orchestrator::{run_search, SearchSource};
pub use wire::SearchResult;
