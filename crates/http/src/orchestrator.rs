//! Search orchestrator (spec §4.9 / C9): fan out a query to every registered
//! corpus in parallel, merge each corpus's pre-sorted results into a single
//! running buffer, truncating to `limit` after every merge.

use std::sync::Arc;

use async_trait::async_trait;
use campus_search_core::index::SearchHit;

use crate::wire::SearchResult;

/// One corpus the orchestrator can query. Implemented once per registered
/// record type over that type's `CacheRegistry`.
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, query: &str, cutoff: f64, send_hidden: bool) -> Vec<SearchHit>;
}

#[async_trait]
impl<T> SearchSource for campus_search_core::registry::CacheRegistry<T>
where
    T: campus_search_core::schema::Searchable + Sync + 'static,
{
    async fn search(&self, query: &str, cutoff: f64, send_hidden: bool) -> Vec<SearchHit> {
        campus_search_core::registry::CacheRegistry::search(self, query, cutoff, send_hidden).await
    }
}

/// Merge `incoming` (pre-sorted ascending by score) into `buffer` (also
/// pre-sorted), keeping at most `limit` elements — the incremental
/// merge-and-cap of spec §4.9, equivalent to a full sort-then-truncate.
fn merge_capped(buffer: &mut Vec<SearchHit>, incoming: Vec<SearchHit>, limit: usize) {
    buffer.extend(incoming);
    buffer.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.content.cmp(&b.content))
            .then_with(|| a.fields.cmp(&b.fields))
    });
    buffer.truncate(limit);
}

/// Run a single query across every `sources` entry concurrently and return
/// the merged, capped, score-ascending result set (spec §4.9).
pub async fn run_search(
    sources: &[Arc<dyn SearchSource>],
    query: &str,
    limit: usize,
    cutoff: f64,
    send_hidden: bool,
) -> Vec<SearchHit> {
    let tasks: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = Arc::clone(source);
            let query = query.to_string();
            tokio::spawn(async move {
                let mut hits = source.search(&query, cutoff, send_hidden).await;
                hits.truncate(limit);
                hits
            })
        })
        .collect();

    let mut buffer: Vec<SearchHit> = Vec::new();
    for task in tasks {
        if let Ok(hits) = task.await {
            merge_capped(&mut buffer, hits, limit);
        }
    }
    buffer
}

/// Encode a merged result set as the public wire envelope.
pub fn to_wire(hits: Vec<SearchHit>, send_score: bool) -> Vec<SearchResult> {
    hits.into_iter().map(|hit| SearchResult::from_hit(hit, send_score)).collect()
}
