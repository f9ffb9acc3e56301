//! campus-search-core — the generic weighted fuzzy-search index.
//!
//! A record type registers a [`Searchable`] schema describing its properties,
//! their weights, and which ones are identifiers or hidden. [`Index`] builds
//! one [`Entry`] per record in parallel and answers ranked fuzzy queries with
//! a score cutoff. [`CacheRegistry`] holds one such index behind a lock so it
//! can be replaced wholesale when a corpus is rebuilt.

pub mod entry;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod normalize;
pub mod ordered_set;
pub mod registry;
pub mod schema;

pub use entry::Entry;
pub use error::SchemaError;
pub use fuzzy::Scorer;
pub use index::{Index, SearchHit};
pub use ordered_set::OrderedSet;
pub use registry::CacheRegistry;
pub use schema::{PropertySpec, Searchable};
