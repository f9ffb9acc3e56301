//! A per-type corpus: the raw scraped records (for direct by-code lookup)
//! plus the fuzzy-search [`CacheRegistry`] built over them (for `/api/busca`).
//! Not a spec component on its own — it's the server-level pairing C6's
//! fuzzy index needs with the raw data the `/api/disciplina` and
//! `/api/curso` routes serve directly.

use std::sync::Arc;

use async_trait::async_trait;
use campus_search_core::index::SearchHit;
use campus_search_core::registry::CacheRegistry;
use campus_search_core::schema::Searchable;
use campus_search_http::SearchSource;
use tokio::sync::RwLock;

pub struct Corpus<T: Searchable + Sync + 'static> {
    pub registry: CacheRegistry<T>,
    records: RwLock<Arc<Vec<T>>>,
}

impl<T: Searchable + Sync + 'static> Default for Corpus<T> {
    fn default() -> Self {
        Corpus { registry: CacheRegistry::new(), records: RwLock::new(Arc::new(Vec::new())) }
    }
}

impl<T: Searchable + Sync + Clone + 'static> Corpus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the fuzzy index and replace the raw-record snapshot (spec §4.5
    /// `overwrite`, extended to keep the raw records direct lookups need).
    pub async fn set(&self, records: Vec<T>) {
        self.registry.overwrite(records.clone()).await;
        *self.records.write().await = Arc::new(records);
    }

    pub async fn snapshot(&self) -> Arc<Vec<T>> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl<T: Searchable + Sync + 'static> SearchSource for Corpus<T> {
    async fn search(&self, query: &str, cutoff: f64, send_hidden: bool) -> Vec<SearchHit> {
        self.registry.search(query, cutoff, send_hidden).await
    }
}
