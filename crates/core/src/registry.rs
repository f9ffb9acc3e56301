//! Cache registry (spec §4.5 / C6): a thread-safe slot holding one typed
//! [`Index`] for a single record type, guarded by its own lock so that no
//! corpus's rebuild or query blocks any other corpus.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::index::{Index, SearchHit};
use crate::schema::Searchable;

/// Holds at most one built [`Index<T>`] behind a lock. `None` until the
/// first successful [`CacheRegistry::overwrite`].
pub struct CacheRegistry<T: Searchable> {
    slot: RwLock<Option<Arc<Index<T>>>>,
}

impl<T: Searchable + Sync + 'static> Default for CacheRegistry<T> {
    fn default() -> Self {
        Self { slot: RwLock::new(None) }
    }
}

impl<T: Searchable + Sync + 'static> CacheRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new index from `values` and atomically replace the slot. On
    /// schema error, log and leave any previous slot untouched (spec §4.5).
    pub async fn overwrite(&self, values: Vec<T>) {
        match Index::build(&values) {
            Ok(index) => {
                *self.slot.write().await = Some(Arc::new(index));
            }
            Err(err) => {
                info!(error = %err, "schema error building index, keeping previous snapshot");
            }
        }
    }

    /// Forward `query` to the current index snapshot, or return an empty
    /// result if the corpus hasn't been built yet (spec §4.5).
    pub async fn search(&self, query: &str, cutoff: f64, send_hidden: bool) -> Vec<SearchHit> {
        let snapshot = self.slot.read().await.clone();
        match snapshot {
            Some(index) => index.search(query, cutoff, send_hidden),
            None => Vec::new(),
        }
    }

    /// Whether the corpus has ever been successfully built.
    pub async fn is_ready(&self) -> bool {
        self.slot.read().await.is_some()
    }
}
