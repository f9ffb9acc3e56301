//! Typed corpus index (spec §4.4 / C5): a set of [`Entry`]s for a single
//! record type, built in parallel, queried with a score cutoff.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::entry::Entry;
use crate::error::SchemaError;
use crate::normalize::search_normalize;
use crate::schema::Searchable;

/// Default per-entry score cutoff (spec: `MAX_RESULT_SCORE`).
pub const MAX_RESULT_SCORE: f64 = 0.99;

/// One ranked match from [`Index::search`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub content: String,
    pub score: f64,
    pub fields: BTreeMap<String, String>,
}

/// An immutable set of [`Entry`]s for a single record type `T` (spec §4.4).
/// Built once from a `Vec<T>`; rebuilds replace the whole index rather than
/// mutating it in place.
pub struct Index<T: Searchable> {
    entries: Vec<Entry<T>>,
    content_label: String,
}

impl<T: Searchable + Sync> Index<T> {
    /// Build an index from `records`, entries computed in parallel (spec §4.4).
    /// Records whose schema is malformed abort the whole build — a single
    /// bad record means the type's schema itself is broken, not the data.
    pub fn build(records: &[T]) -> Result<Self, SchemaError> {
        let start = Instant::now();
        let entries: Result<Vec<Entry<T>>, SchemaError> =
            records.par_iter().map(Entry::build).collect();
        let entries = entries?;
        info!(
            ty = T::content_label(),
            count = entries.len(),
            elapsed_secs = start.elapsed().as_secs_f64(),
            "Building search cache"
        );
        Ok(Index { entries, content_label: T::content_label().to_string() })
    }

    /// Rank all entries against `raw_query`, dropping any at or above `cutoff`,
    /// sorted ascending by score (spec §4.4). `send_hidden` controls whether
    /// hidden properties are included in each hit's `fields`.
    pub fn search(&self, raw_query: &str, cutoff: f64, send_hidden: bool) -> Vec<SearchHit> {
        let query = search_normalize(raw_query);

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = entry.score(&query);
                if score >= cutoff {
                    return None;
                }
                let fields = if send_hidden { entry.all_fields() } else { entry.visible_fields() };
                Some(SearchHit {
                    content: self.content_label.clone(),
                    score,
                    fields: fields.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.content.cmp(&b.content))
                .then_with(|| a.fields.cmp(&b.fields))
        });
        hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
